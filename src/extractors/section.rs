// src/extractors/section.rs

// --- Imports ---
use crate::company::Company;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

// --- Constants ---
/// Phrases a candidate region must contain to count as the real Item 8.
/// Table-of-contents entries usually contain neither.
pub const DEFAULT_KEYWORDS: [&str; 2] = ["net income", "operating income"];

// --- Regex Patterns (Lazy Static) ---
// "ITEM 8." / "Item&nbsp;8 " ... a whitespace character must follow, so "ITEM 80" never starts a section.
pub(crate) static ITEM_8_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bITEM\s*(?:&nbsp;)?8\.?\s").expect("Failed to compile ITEM_8_START_RE")
});

// Any "ITEM 9" variant (9, 9., 9A, 9B) terminates the section.
pub(crate) static ITEM_9_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bITEM\s*(?:&nbsp;)?9").expect("Failed to compile ITEM_9_RE")
});

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE"));

// --- Data Structures ---

/// How a candidate region was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEnd {
    /// Stopped just before an "ITEM 9" marker.
    Item9Marker,
    /// No "ITEM 9" followed the start marker; the region runs to the end of the document.
    EndOfDocument,
}

impl SectionEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionEnd::Item9Marker => "item9_marker",
            SectionEnd::EndOfDocument => "end_of_document",
        }
    }
}

/// Byte range of one raw ITEM 8 candidate inside the filing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRegion {
    pub start: usize,
    pub end: usize,
    pub terminated_by: SectionEnd,
}

#[derive(Debug, Clone)]
pub struct ExtractedSection {
    pub section_name: String, // "Item 8"
    pub content_text: String, // markup stripped, whitespace collapsed
    pub filing_year: u32,
    pub year_folder: String, // accession folder the filing lives in
    pub company: Company,
    pub match_count: usize, // qualifying regions found in the filing
    pub terminated_by: SectionEnd,
}

// --- Main Extractor Structure ---
pub struct SectionExtractor {
    keywords: Vec<String>,
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionExtractor {
    pub fn new() -> Self {
        Self::with_keywords(DEFAULT_KEYWORDS)
    }

    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Finds every non-overlapping ITEM 8 .. ITEM 9 region, in document order.
    ///
    /// A region starts at the "ITEM 8" marker and stops just before the next
    /// "ITEM 9" marker; scanning resumes at that marker. A start marker with no
    /// terminating marker after it takes the rest of the document.
    pub fn find_regions(&self, text: &str) -> Vec<SectionRegion> {
        let mut regions = Vec::new();
        let mut pos = 0;

        while let Some(start) = ITEM_8_START_RE.find_at(text, pos) {
            match ITEM_9_RE.find_at(text, start.end()) {
                Some(end) => {
                    regions.push(SectionRegion {
                        start: start.start(),
                        end: end.start(),
                        terminated_by: SectionEnd::Item9Marker,
                    });
                    pos = end.start();
                }
                None => {
                    tracing::debug!(
                        "No ITEM 9 marker after offset {}, taking the rest of the document",
                        start.start()
                    );
                    regions.push(SectionRegion {
                        start: start.start(),
                        end: text.len(),
                        terminated_by: SectionEnd::EndOfDocument,
                    });
                    break;
                }
            }
        }

        regions
    }

    /// Regions that mention every keyword (case-insensitive, checked on the raw text).
    pub fn qualifying_regions(&self, text: &str) -> Vec<SectionRegion> {
        self.find_regions(text)
            .into_iter()
            .filter(|region| self.contains_keywords(&text[region.start..region.end]))
            .collect()
    }

    /// Cleaned text of every qualifying region, in document order.
    pub fn extract_sections(&self, text: &str) -> Vec<String> {
        self.qualifying_regions(text)
            .iter()
            .map(|region| clean_section(&text[region.start..region.end]))
            .collect()
    }

    /// Extracts the Item 8 section of one filing. The first qualifying region wins.
    pub fn extract_item_8(
        &self,
        filing_text: &str,
        filing_year: u32,
        year_folder: &str,
        company: Company,
    ) -> Result<ExtractedSection, ExtractError> {
        let regions = self.qualifying_regions(filing_text);
        tracing::debug!(
            "{} ({}): {} qualifying Item 8 region(s) in {}",
            company.ticker(),
            filing_year,
            regions.len(),
            year_folder
        );

        let first = regions.first().ok_or_else(|| {
            ExtractError::SectionNotFound(format!(
                "no ITEM 8 region mentioning {:?} in {} {} ({})",
                self.keywords,
                company.ticker(),
                filing_year,
                year_folder
            ))
        })?;

        let content_text = clean_section(&filing_text[first.start..first.end]);
        tracing::info!(
            "Extracted Item 8 for {} ({}): {} chars",
            company.ticker(),
            filing_year,
            content_text.len()
        );

        Ok(ExtractedSection {
            section_name: "Item 8".to_string(),
            content_text,
            filing_year,
            year_folder: year_folder.to_string(),
            company,
            match_count: regions.len(),
            terminated_by: first.terminated_by,
        })
    }

    fn contains_keywords(&self, region: &str) -> bool {
        let lowered = region.to_lowercase();
        self.keywords.iter().all(|k| lowered.contains(k.as_str()))
    }
}

/// Strips markup (entities decoded) and collapses whitespace runs to one space.
pub fn clean_section(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let text: String = fragment.root_element().text().collect();
    WHITESPACE_RE.replace_all(&text, " ").into_owned()
}
