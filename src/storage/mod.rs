// src/storage/mod.rs
pub mod layout;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::company::Company;
use crate::extractors::section::ExtractedSection;
use crate::utils::error::StorageError;
use layout::{FILINGS_DIR, FORM_TYPE, FULL_SUBMISSION_FILE, SECTION_META_FILE, SECTION_TEXT_FILE};

/// Filing tree rooted at `base_dir`:
/// `<base>/<Company>/sec-edgar-filings/<TICKER>/10-K/<accession>/...`
#[derive(Debug, Clone)]
pub struct FilingStore {
    base_dir: PathBuf,
}

impl FilingStore {
    /// Creates a FilingStore, creating the base directory if it doesn't exist.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Opens an existing tree without touching the filesystem.
    pub fn open<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn company_dir(&self, company: Company) -> PathBuf {
        self.base_dir
            .join(company.name())
            .join(FILINGS_DIR)
            .join(company.ticker())
            .join(FORM_TYPE)
    }

    pub fn filing_dir(&self, company: Company, folder: &str) -> PathBuf {
        self.company_dir(company).join(folder)
    }

    /// Year-folder names for a company, sorted. A company with no filings yet has none.
    pub fn list_year_folders(&self, company: Company) -> Result<Vec<String>, StorageError> {
        let dir = self.company_dir(company);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No filings directory at {}", dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::IoError(e)),
        };

        let mut folders = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                folders.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        folders.sort();
        Ok(folders)
    }

    /// Reads a file from a year folder. Bytes that are not UTF-8 are replaced.
    pub fn read_text(&self, company: Company, folder: &str, file_name: &str) -> Result<String, StorageError> {
        let path = self.filing_dir(company, folder).join(file_name);
        match fs::read(&path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::MissingFiling(path)),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    pub fn read_full_submission(&self, company: Company, folder: &str) -> Result<String, StorageError> {
        self.read_text(company, folder, FULL_SUBMISSION_FILE)
    }

    pub fn has_full_submission(&self, company: Company, folder: &str) -> bool {
        self.filing_dir(company, folder).join(FULL_SUBMISSION_FILE).is_file()
    }

    pub fn save_full_submission(&self, company: Company, folder: &str, content: &str) -> Result<PathBuf, StorageError> {
        let target_dir = self.filing_dir(company, folder);
        fs::create_dir_all(&target_dir)?;

        let file_path = target_dir.join(FULL_SUBMISSION_FILE);
        fs::write(&file_path, content)?;

        tracing::info!("Saved full submission to {}", file_path.display());
        Ok(file_path)
    }

    /// Writes the cleaned section next to the submission it came from.
    pub fn save_section(&self, section: &ExtractedSection) -> Result<PathBuf, StorageError> {
        let target_dir = self.filing_dir(section.company, &section.year_folder);
        fs::create_dir_all(&target_dir)?;

        let file_path = target_dir.join(SECTION_TEXT_FILE);
        fs::write(&file_path, section.content_text.as_bytes())?;

        tracing::info!("Saved section to {}", file_path.display());
        Ok(file_path)
    }

    /// Removes section files left by an earlier run. Missing files are fine.
    pub fn remove_section(&self, company: Company, folder: &str) -> Result<(), StorageError> {
        let dir = self.filing_dir(company, folder);
        for file_name in [SECTION_TEXT_FILE, SECTION_META_FILE] {
            match fs::remove_file(dir.join(file_name)) {
                Ok(()) => tracing::info!("Removed stale {} in {}", file_name, dir.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::IoError(e)),
            }
        }
        Ok(())
    }

    /// Saves metadata about the section in JSON format
    pub fn save_section_metadata(&self, section: &ExtractedSection) -> Result<PathBuf, StorageError> {
        let target_dir = self.filing_dir(section.company, &section.year_folder);
        fs::create_dir_all(&target_dir)?;

        let file_path = target_dir.join(SECTION_META_FILE);

        let metadata = serde_json::json!({
            "ticker": section.company.ticker(),
            "company_name": section.company.name(),
            "filing_year": section.filing_year,
            "year_folder": section.year_folder,
            "section_name": section.section_name,
            "content_length": section.content_text.len(),
            "match_count": section.match_count,
            "terminated_by": section.terminated_by.as_str(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}
