// src/storage/layout.rs
use crate::utils::error::ExtractError;

pub const FILINGS_DIR: &str = "sec-edgar-filings";
pub const FORM_TYPE: &str = "10-K";
pub const FULL_SUBMISSION_FILE: &str = "full-submission.txt";
pub const SECTION_TEXT_FILE: &str = "section 8 Text.txt";
pub const SECTION_META_FILE: &str = "section 8 meta.json";
pub const SECTION_DEBUG_FILE: &str = "section 8 debug.html";

/// Expands a two-digit accession year. Only 91..=99 belong to the 1900s.
/// `None` when the result does not fit in a `u32`.
pub fn resolve_century(short_year: u32) -> Option<u32> {
    if short_year > 90 && short_year < 100 {
        Some(1900 + short_year)
    } else {
        short_year.checked_add(2000)
    }
}

/// Year of an accession folder such as `0000320193-23-000106`.
pub fn year_from_folder(folder: &str) -> Result<u32, ExtractError> {
    let segment = folder
        .split('-')
        .nth(1)
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| ExtractError::InvalidYearFolder(folder.to_string()))?;

    let short_year: u32 = segment
        .parse()
        .map_err(|_| ExtractError::InvalidYearFolder(folder.to_string()))?;

    resolve_century(short_year).ok_or_else(|| ExtractError::InvalidYearFolder(folder.to_string()))
}
