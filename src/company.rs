// src/company.rs
use std::fmt;

use crate::utils::error::LookupError;

/// The two filers this service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Company {
    Apple,
    Microsoft,
}

impl Company {
    pub const ALL: [Company; 2] = [Company::Apple, Company::Microsoft];

    /// Exchange ticker, also used in the on-disk filing layout.
    pub fn ticker(self) -> &'static str {
        match self {
            Company::Apple => "AAPL",
            Company::Microsoft => "MSFT",
        }
    }

    /// Display name and top-level data folder.
    pub fn name(self) -> &'static str {
        match self {
            Company::Apple => "Apple",
            Company::Microsoft => "Microsoft",
        }
    }

    /// Lowercase name used in URLs (`/stock/apple/2023`).
    pub fn slug(self) -> &'static str {
        match self {
            Company::Apple => "apple",
            Company::Microsoft => "microsoft",
        }
    }

    pub fn from_ticker(ticker: &str) -> Option<Company> {
        Self::ALL
            .into_iter()
            .find(|c| c.ticker().eq_ignore_ascii_case(ticker))
    }

    /// Resolves a URL slug. Matching is exact, as the routes are.
    pub fn from_slug(slug: &str) -> Result<Company, LookupError> {
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == slug)
            .ok_or_else(|| LookupError::UnknownCompany(slug.to_string()))
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_lookup() {
        assert_eq!(Company::from_slug("apple"), Ok(Company::Apple));
        assert_eq!(Company::from_slug("microsoft"), Ok(Company::Microsoft));
        assert_eq!(
            Company::from_slug("Apple"),
            Err(LookupError::UnknownCompany("Apple".to_string()))
        );
        assert!(Company::from_slug("google").is_err());
    }

    #[test]
    fn test_ticker_lookup_is_case_insensitive() {
        assert_eq!(Company::from_ticker("msft"), Some(Company::Microsoft));
        assert_eq!(Company::from_ticker("AAPL"), Some(Company::Apple));
        assert_eq!(Company::from_ticker("GOOG"), None);
    }
}
