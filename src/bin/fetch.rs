// src/bin/fetch.rs
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use sec_insights::edgar::{EdgarClient, DEFAULT_USER_AGENT};
use sec_insights::extractors::SectionExtractor;
use sec_insights::pipeline::{self, ProcessingSummary};
use sec_insights::storage::FilingStore;
use sec_insights::utils::{self, AppError};
use sec_insights::Company;

/// Download 10-K filings and extract their Item 8 sections
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root of the filing tree (`<dir>/<Company>/sec-edgar-filings/...`)
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Ticker(s) to process (AAPL, MSFT). Defaults to both.
    #[arg(short, long = "ticker", value_delimiter = ',')]
    tickers: Vec<String>,

    /// Earliest filing date to download
    #[arg(long, default_value = "1995-01-01")]
    after: NaiveDate,

    /// Latest filing date to download
    #[arg(long, default_value = "2023-12-31")]
    before: NaiveDate,

    /// Only extract sections from filings already on disk
    #[arg(long)]
    skip_download: bool,

    /// Debug mode - save annotated HTML with ITEM 8 / ITEM 9 markers highlighted
    #[arg(long)]
    debug: bool,

    /// User-Agent sent to sec.gov (SEC requires contact details)
    #[arg(long, env = "SEC_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

fn selected_companies(tickers: &[String]) -> Result<Vec<Company>, AppError> {
    if tickers.is_empty() {
        return Ok(Company::ALL.to_vec());
    }
    tickers
        .iter()
        .map(|t| {
            Company::from_ticker(t)
                .ok_or_else(|| AppError::Config(format!("Unsupported ticker '{}' (expected AAPL or MSFT)", t)))
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    utils::logging::setup_logging("info");

    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    if args.after > args.before {
        return Err(AppError::Config(format!(
            "--after ({}) is later than --before ({})",
            args.after, args.before
        )));
    }

    let companies = selected_companies(&args.tickers)?;
    let store = FilingStore::new(&args.data_dir)?;
    let section_extractor = SectionExtractor::new();
    let client = if args.skip_download {
        None
    } else {
        Some(EdgarClient::new(&args.user_agent)?)
    };

    let mut totals = ProcessingSummary::default();
    for company in companies {
        if let Some(client) = &client {
            match pipeline::download_filings(client, &store, company, args.after, args.before).await {
                Ok(summary) => tracing::info!(
                    "{}: {} downloaded, {} already present, {} failed",
                    company,
                    summary.succeeded,
                    summary.skipped,
                    summary.failed
                ),
                // Extraction still runs over whatever is already on disk.
                Err(e) => tracing::error!("Could not list filings for {}: {}", company, e),
            }
        }

        let summary = pipeline::extract_sections(&store, company, &section_extractor, args.debug)?;
        totals.succeeded += summary.succeeded;
        totals.skipped += summary.skipped;
        totals.failed += summary.failed;
    }

    tracing::info!(
        "Processing finished. Success: {}, Skipped: {}, Failures: {}",
        totals.succeeded,
        totals.skipped,
        totals.failed
    );

    if totals.succeeded == 0 && totals.failed > 0 {
        return Err(AppError::Processing(format!(
            "Failed to extract any Item 8 sections from {} filings",
            totals.failed
        )));
    }

    Ok(())
}
