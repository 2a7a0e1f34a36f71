// src/pipeline.rs
//! Download and extraction passes driven by the `sec-fetch` binary.
//! Each filing is processed on its own; a failure is counted and the loop moves on.

use chrono::NaiveDate;

use crate::company::Company;
use crate::edgar::EdgarClient;
use crate::extractors::section::SectionExtractor;
use crate::storage::layout::{year_from_folder, SECTION_DEBUG_FILE};
use crate::storage::FilingStore;
use crate::utils::error::{EdgarError, StorageError};
use crate::utils::html_debug;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub succeeded: usize,
    /// Already on disk (downloads) or no submission file (extraction).
    pub skipped: usize,
    pub failed: usize,
}

/// Downloads every 10-K for `company` in the window that is not already on disk.
pub async fn download_filings(
    client: &EdgarClient,
    store: &FilingStore,
    company: Company,
    after: NaiveDate,
    before: NaiveDate,
) -> Result<ProcessingSummary, EdgarError> {
    tracing::info!("Finding 10-K filings for {} ({} .. {})", company.ticker(), after, before);
    let filings = client.find_10k_filings(company.ticker(), after, before).await?;
    tracing::info!("Found {} 10-K filings for {}", filings.len(), company.ticker());

    let mut summary = ProcessingSummary::default();
    for filing in &filings {
        if store.has_full_submission(company, filing.folder_name()) {
            tracing::debug!("{} already downloaded", filing.accession_number);
            summary.skipped += 1;
            continue;
        }

        let saved = match client.download_full_submission(filing).await {
            Ok(content) => store
                .save_full_submission(company, filing.folder_name(), &content)
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match saved {
            Ok(_) => summary.succeeded += 1,
            Err(e) => {
                tracing::error!("Failed to fetch {} ({}): {}", filing.accession_number, filing.filing_date, e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Extracts the Item 8 section of every downloaded filing for `company` and
/// writes it (plus metadata) next to the submission.
pub fn extract_sections(
    store: &FilingStore,
    company: Company,
    extractor: &SectionExtractor,
    debug: bool,
) -> Result<ProcessingSummary, StorageError> {
    let mut summary = ProcessingSummary::default();

    for folder in store.list_year_folders(company)? {
        let year = match year_from_folder(&folder) {
            Ok(year) => year,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", folder, e);
                summary.skipped += 1;
                continue;
            }
        };

        let text = match store.read_full_submission(company, &folder) {
            Ok(text) => text,
            Err(StorageError::MissingFiling(path)) => {
                tracing::debug!("No submission at {}, skipping", path.display());
                summary.skipped += 1;
                continue;
            }
            Err(e) => {
                tracing::error!("Could not read submission for {} {}: {}", company, year, e);
                summary.failed += 1;
                continue;
            }
        };

        if debug {
            let debug_path = store.filing_dir(company, &folder).join(SECTION_DEBUG_FILE);
            if let Err(e) = html_debug::annotate_section_markers(&text, &debug_path) {
                tracing::warn!("Failed to create debug HTML: {}", e);
            }
        }

        let section = match extractor.extract_item_8(&text, year, &folder, company) {
            Ok(section) => section,
            Err(e) => {
                tracing::warn!("No Item 8 for {} {} ({}): {}", company, year, folder, e);
                // A section from an earlier run would keep serving old figures.
                if let Err(e) = store.remove_section(company, &folder) {
                    tracing::error!("Failed to remove old section for {} {}: {}", company, year, e);
                }
                summary.failed += 1;
                continue;
            }
        };

        let saved = store
            .save_section(&section)
            .and_then(|_| store.save_section_metadata(&section));
        match saved {
            Ok(_) => summary.succeeded += 1,
            Err(e) => {
                tracing::error!("Failed to save section for {} {}: {}", company, year, e);
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        "{}: {} section(s) extracted, {} skipped, {} failed",
        company,
        summary.succeeded,
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}
