// src/edgar/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const ARCHIVES_BASE_URL: &str = "https://www.sec.gov/Archives/edgar/data";

/// One entry of https://www.sec.gov/files/company_tickers.json
#[derive(Debug, Deserialize)]
pub struct CompanyTicker {
    pub cik_str: u64,
    pub ticker: String,
    pub title: String,
}

/// Structure representing the EDGAR company submission index.
/// Example: https://data.sec.gov/submissions/CIK0000320193.json
/// Only the fields the fetcher needs are kept.
#[derive(Debug, Deserialize)]
pub struct CompanySubmission {
    pub cik: String,
    pub name: String,
    #[serde(default)]
    pub tickers: Vec<String>,
    pub filings: Filings,
}

#[derive(Debug, Deserialize)]
pub struct Filings {
    pub recent: FilingsList,
    /// Older filings, paged into separate JSON documents.
    #[serde(default)]
    pub files: Vec<FilingFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingFile {
    pub name: String,
    pub filing_count: u32,
    pub filing_from: String,
    pub filing_to: String,
}

/// Column-oriented filing table: index `i` of every vector describes one filing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingsList {
    pub accession_number: Vec<String>,
    pub filing_date: Vec<String>,
    pub form: Vec<String>,
    #[serde(default)]
    pub primary_document: Vec<String>,
}

/// A 10-K we want on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingInfo {
    pub accession_number: String,
    pub filing_date: NaiveDate,
    pub form_type: String,
    pub ticker: String,
    pub company_name: String,
    pub cik: u64,
}

impl FilingInfo {
    /// Complete submission text file (all documents of the filing in one `.txt`).
    pub fn full_submission_url(&self) -> String {
        let acc_no_dashes = self.accession_number.replace('-', "");
        format!(
            "{}/{}/{}/{}.txt",
            ARCHIVES_BASE_URL, self.cik, acc_no_dashes, self.accession_number
        )
    }

    /// Year-folder name in the filing tree.
    pub fn folder_name(&self) -> &str {
        &self.accession_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_submission_url() {
        let filing = FilingInfo {
            accession_number: "0000320193-23-000106".to_string(),
            filing_date: NaiveDate::from_ymd_opt(2023, 11, 3).unwrap(),
            form_type: "10-K".to_string(),
            ticker: "AAPL".to_string(),
            company_name: "Apple Inc.".to_string(),
            cik: 320193,
        };
        assert_eq!(
            filing.full_submission_url(),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/0000320193-23-000106.txt"
        );
        assert_eq!(filing.folder_name(), "0000320193-23-000106");
    }

    #[test]
    fn test_submission_deserializes_camel_case() {
        let json = r#"{
            "cik": "320193",
            "name": "Apple Inc.",
            "tickers": ["AAPL"],
            "filings": {
                "recent": {
                    "accessionNumber": ["0000320193-23-000106"],
                    "filingDate": ["2023-11-03"],
                    "form": ["10-K"],
                    "primaryDocument": ["aapl-20230930.htm"]
                },
                "files": [
                    {"name": "CIK0000320193-submissions-001.json", "filingCount": 10, "filingFrom": "1994-01-26", "filingTo": "2010-01-01"}
                ]
            }
        }"#;
        let submission: CompanySubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.name, "Apple Inc.");
        assert_eq!(submission.filings.recent.form, vec!["10-K"]);
        assert_eq!(submission.filings.files[0].filing_from, "1994-01-26");
    }
}
