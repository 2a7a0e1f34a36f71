// src/edgar/client.rs
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header;

use crate::edgar::models::{CompanySubmission, CompanyTicker, FilingInfo, FilingsList};
use crate::utils::error::EdgarError;

/// SEC asks for a descriptive User-Agent with contact details. Override with `--user-agent`.
pub const DEFAULT_USER_AGENT: &str = "sec-insights research contact@example.com";
// SEC asks for 10 requests/second max. Be conservative. >100ms delay.
const EDGAR_REQUEST_DELAY_MS: u64 = 150;

const TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";
const SUBMISSIONS_BASE_URL: &str = "https://data.sec.gov/submissions";

pub struct EdgarClient {
    http: reqwest::Client,
}

impl EdgarClient {
    /// Creates a reqwest client configured for EDGAR interaction.
    pub fn new(user_agent: &str) -> Result<Self, EdgarError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(120))
            .build()?;
        tracing::debug!("Using User-Agent: {}", user_agent);
        Ok(Self { http })
    }

    /// Rate-limited GET with SEC-specific status handling.
    async fn get(&self, url: &str) -> Result<reqwest::Response, EdgarError> {
        tokio::time::sleep(Duration::from_millis(EDGAR_REQUEST_DELAY_MS)).await;

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json,text/html,text/plain,*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            if status == reqwest::StatusCode::FORBIDDEN {
                tracing::warn!("Received 403 Forbidden - check User-Agent and rate limits.");
                return Err(EdgarError::RateLimited);
            }
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(EdgarError::FilingDocNotFound(url.to_string()));
            }
            return Err(EdgarError::Http(status));
        }

        Ok(response)
    }

    /// Gets the CIK (Central Index Key) for a ticker symbol
    pub async fn get_cik_from_ticker(&self, ticker: &str) -> Result<u64, EdgarError> {
        let companies: HashMap<String, CompanyTicker> = self.get(TICKERS_URL).await?.json().await?;

        companies
            .into_values()
            .find(|c| c.ticker.eq_ignore_ascii_case(ticker))
            .map(|c| {
                tracing::debug!("{} is CIK {} ({})", ticker, c.cik_str, c.title);
                c.cik_str
            })
            .ok_or_else(|| EdgarError::UnknownTicker(ticker.to_uppercase()))
    }

    /// Fetches the company submission index for a given CIK
    pub async fn get_company_submissions(&self, cik: u64) -> Result<CompanySubmission, EdgarError> {
        let url = format!("{}/CIK{:010}.json", SUBMISSIONS_BASE_URL, cik);
        Ok(self.get(&url).await?.json().await?)
    }

    /// Fetches one page of older filings listed under `filings.files`.
    async fn get_filings_page(&self, name: &str) -> Result<FilingsList, EdgarError> {
        let url = format!("{}/{}", SUBMISSIONS_BASE_URL, name);
        Ok(self.get(&url).await?.json().await?)
    }

    /// Finds 10-K filings for a ticker filed between `after` and `before` (inclusive).
    pub async fn find_10k_filings(
        &self,
        ticker: &str,
        after: NaiveDate,
        before: NaiveDate,
    ) -> Result<Vec<FilingInfo>, EdgarError> {
        let cik = self.get_cik_from_ticker(ticker).await?;
        let submissions = self.get_company_submissions(cik).await?;
        let window = FilingWindow { ticker, company_name: &submissions.name, cik, after, before };

        let mut filings = window.collect_10k(&submissions.filings.recent)?;

        for page in &submissions.filings.files {
            let page_to = NaiveDate::parse_from_str(&page.filing_to, "%Y-%m-%d").ok();
            let page_from = NaiveDate::parse_from_str(&page.filing_from, "%Y-%m-%d").ok();
            if page_to.is_some_and(|d| d < after) || page_from.is_some_and(|d| d > before) {
                tracing::debug!("Skipping filings page {} ({}..{})", page.name, page.filing_from, page.filing_to);
                continue;
            }
            tracing::info!("Fetching older filings page {} ({} filings)", page.name, page.filing_count);
            let list = self.get_filings_page(&page.name).await?;
            filings.extend(window.collect_10k(&list)?);
        }

        let mut seen = HashSet::new();
        filings.retain(|f| seen.insert(f.accession_number.clone()));
        filings.sort_by(|a, b| a.filing_date.cmp(&b.filing_date));

        Ok(filings)
    }

    /// Downloads the complete submission text of a filing.
    pub async fn download_full_submission(&self, filing: &FilingInfo) -> Result<String, EdgarError> {
        let url = filing.full_submission_url();
        tracing::info!("Downloading document from: {}", url);

        let body = self.get(&url).await?.text().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

/// Filters a column-oriented filing table down to the 10-Ks inside a date window.
struct FilingWindow<'a> {
    ticker: &'a str,
    company_name: &'a str,
    cik: u64,
    after: NaiveDate,
    before: NaiveDate,
}

impl FilingWindow<'_> {
    fn collect_10k(&self, list: &FilingsList) -> Result<Vec<FilingInfo>, EdgarError> {
        let mut filings = Vec::new();

        for (i, form) in list.form.iter().enumerate() {
            if form != "10-K" {
                continue;
            }

            let raw_date = list
                .filing_date
                .get(i)
                .ok_or_else(|| EdgarError::Parse("Missing filing date".to_string()))?;
            let filing_date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
                .map_err(|e| EdgarError::Parse(format!("Invalid filing date '{}': {}", raw_date, e)))?;

            if filing_date < self.after || filing_date > self.before {
                continue;
            }

            let accession_number = list
                .accession_number
                .get(i)
                .ok_or_else(|| EdgarError::Parse("Missing accession number".to_string()))?;

            filings.push(FilingInfo {
                accession_number: accession_number.clone(),
                filing_date,
                form_type: form.clone(),
                ticker: self.ticker.to_uppercase(),
                company_name: self.company_name.to_string(),
                cik: self.cik,
            });
        }

        Ok(filings)
    }
}
