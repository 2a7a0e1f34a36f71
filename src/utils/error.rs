// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 500 Internal Server Error

    #[error("SEC Rate limit likely exceeded")]
    RateLimited, // 403 from sec.gov usually means a bad User-Agent or too many requests

    #[error("Could not find CIK for ticker {0}")]
    UnknownTicker(String),

    #[error("Could not find specified filing: {0}")]
    FilingDocNotFound(String),

    #[error("Failed to parse EDGAR response: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// A required figure is absent from an otherwise readable section.
    #[error("Required field '{0}' not found")]
    MissingField(String),

    #[error("Invalid amount for field '{field}': {raw}")]
    InvalidAmount { field: String, raw: String },

    #[error("Cannot resolve a year from folder name '{0}'")]
    InvalidYearFolder(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    /// The expected filing file does not exist. Callers skip the year.
    #[error("Filing file not found: {}", .0.display())]
    MissingFiling(PathBuf),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Unknown entities requested at the web boundary.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown company '{0}'")]
    UnknownCompany(String),

    #[error("No data for {company} in {year}")]
    UnknownYear { company: String, year: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("EDGAR interaction failed: {0}")]
    Edgar(#[from] EdgarError), // Automatically convert Edgar errors

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
