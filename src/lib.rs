// src/lib.rs
//! 10-K ingestion for Apple and Microsoft: download filings, cut out the
//! Item 8 section, parse net/operating income and serve them as pages and charts.

pub mod aggregate;
pub mod company;
pub mod edgar;
pub mod extractors;
pub mod pipeline;
pub mod storage;
pub mod utils;
pub mod web;

pub use aggregate::{CompanyData, FinancialData, YearSeries};
pub use company::Company;
pub use utils::AppError;
