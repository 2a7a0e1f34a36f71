// src/aggregate.rs
//! Per-company year series built once at startup.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::company::Company;
use crate::extractors::figures::{ExtractedFigures, FigureExtractor};
use crate::storage::layout::year_from_folder;
use crate::storage::FilingStore;
use crate::utils::error::{LookupError, StorageError};

/// Parallel, year-ascending sequences used by the charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct YearSeries {
    pub years: Vec<u32>,
    pub net_incomes: Vec<i64>,
    pub operating_incomes: Vec<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct CompanyData {
    by_year: BTreeMap<u32, ExtractedFigures>,
    series: YearSeries,
}

impl CompanyData {
    /// Builds the series from (year, figures) pairs in any order.
    /// A repeated year keeps the figures that came last.
    pub fn from_years<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (u32, ExtractedFigures)>,
    {
        Self::from_map(records.into_iter().collect())
    }

    fn from_map(by_year: BTreeMap<u32, ExtractedFigures>) -> Self {
        let mut series = YearSeries::default();
        for (year, figures) in &by_year {
            series.years.push(*year);
            series.net_incomes.push(figures.net_income);
            series.operating_incomes.push(figures.operating_income);
        }
        Self { by_year, series }
    }

    pub fn series(&self) -> &YearSeries {
        &self.series
    }

    pub fn years(&self) -> &[u32] {
        &self.series.years
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }

    pub fn figures(&self, year: u32) -> Option<&ExtractedFigures> {
        self.by_year.get(&year)
    }

    /// Nearest year strictly before `year` that has data.
    pub fn previous_year(&self, year: u32) -> Option<u32> {
        self.by_year.range(..year).next_back().map(|(y, _)| *y)
    }

    pub fn previous(&self, year: u32) -> Option<(u32, &ExtractedFigures)> {
        self.by_year.range(..year).next_back().map(|(y, f)| (*y, f))
    }
}

/// Everything the web layer serves. Immutable once built.
#[derive(Debug, Clone)]
pub struct FinancialData {
    companies: BTreeMap<Company, CompanyData>,
}

impl FinancialData {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (Company, u32, ExtractedFigures)>,
    {
        let mut grouped: BTreeMap<Company, BTreeMap<u32, ExtractedFigures>> =
            Company::ALL.into_iter().map(|c| (c, BTreeMap::new())).collect();
        for (company, year, figures) in records {
            grouped.entry(company).or_default().insert(year, figures);
        }

        Self {
            companies: grouped
                .into_iter()
                .map(|(company, by_year)| (company, CompanyData::from_map(by_year)))
                .collect(),
        }
    }

    /// Loads figures for every company from `figures_file` in each year folder.
    ///
    /// One bad folder never stops the others: missing files, unparseable
    /// figures and odd folder names are logged and skipped. Only a failure to
    /// list a company directory is returned.
    pub fn load(store: &FilingStore, figures_file: &str) -> Result<Self, StorageError> {
        let extractor = FigureExtractor::new();
        let mut companies = BTreeMap::new();
        for company in Company::ALL {
            let data = load_company(store, company, figures_file, &extractor)?;
            tracing::info!("Loaded {} year(s) of figures for {}", data.years().len(), company);
            companies.insert(company, data);
        }
        Ok(Self { companies })
    }

    pub fn company(&self, company: Company) -> Option<&CompanyData> {
        self.companies.get(&company)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Company, &CompanyData)> {
        self.companies.iter().map(|(c, d)| (*c, d))
    }

    /// Resolves a `/stock/<name>/<year>` request.
    pub fn lookup(&self, slug: &str, year: &str) -> Result<(Company, u32, &ExtractedFigures), LookupError> {
        let company = Company::from_slug(slug)?;
        let unknown_year = || LookupError::UnknownYear {
            company: company.name().to_string(),
            year: year.to_string(),
        };

        if year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unknown_year());
        }
        let year: u32 = year.parse().map_err(|_| unknown_year())?;
        let figures = self
            .company(company)
            .and_then(|data| data.figures(year))
            .ok_or_else(unknown_year)?;

        Ok((company, year, figures))
    }
}

fn load_company(
    store: &FilingStore,
    company: Company,
    figures_file: &str,
    extractor: &FigureExtractor,
) -> Result<CompanyData, StorageError> {
    let mut by_year = BTreeMap::new();

    for folder in store.list_year_folders(company)? {
        let year = match year_from_folder(&folder) {
            Ok(year) => year,
            Err(e) => {
                tracing::warn!("Skipping {} folder: {}", company, e);
                continue;
            }
        };

        let text = match store.read_text(company, &folder, figures_file) {
            Ok(text) => text,
            Err(StorageError::MissingFiling(path)) => {
                tracing::debug!("No {} for {} {}", path.display(), company, year);
                continue;
            }
            Err(e) => {
                tracing::warn!("Could not read {} for {} {}: {}", figures_file, company, year, e);
                continue;
            }
        };

        match extractor.extract(&text) {
            Ok(figures) => {
                if by_year.insert(year, figures).is_some() {
                    tracing::warn!("{} {}: folder {} replaces an earlier filing for the same year", company, year, folder);
                }
            }
            Err(e) => tracing::warn!("Skipping {} {} ({}): {}", company, year, folder, e),
        }
    }

    Ok(CompanyData::from_map(by_year))
}
