// src/extractors/figures.rs
//! Pulls reported figures out of cleaned Item 8 text.
//!
//! Each figure is described by a [`FieldSpec`]: a name, a locator regex and a
//! post-processing rule. A [`FigureGrammar`] is an ordered list of specs, so a
//! new figure is one more `with_field` call rather than a new code path.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::utils::error::ExtractError;

pub const NET_INCOME: &str = "net_income";
pub const OPERATING_INCOME: &str = "operating_income";
pub const SUMMARY: &str = "summary";

static STANDARD_GRAMMAR: Lazy<FigureGrammar> = Lazy::new(|| {
    FigureGrammar::new()
        .with_field(
            FieldSpec::labelled_amount(NET_INCOME, "Net Income")
                .expect("Failed to compile net income locator"),
        )
        .with_field(
            FieldSpec::labelled_amount(OPERATING_INCOME, "Operating Income")
                .expect("Failed to compile operating income locator"),
        )
        .with_field(
            FieldSpec::new(SUMMARY, r"(?is)summary:(?P<text>.*)", PostProcess::TrimmedText)
                .expect("Failed to compile summary locator"),
        )
});

/// What to do with a locator match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    /// `amount` group with thousands separators, optional `sign` group holding `-`.
    SignedAmount,
    /// `text` group (or the whole match), surrounding whitespace trimmed.
    TrimmedText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Amount(i64),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub locator: Regex,
    pub post: PostProcess,
}

impl FieldSpec {
    pub fn new(name: &str, locator: &str, post: PostProcess) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.to_string(),
            locator: Regex::new(locator)?,
            post,
        })
    }

    /// `<label>: -$1,234` style figure, label matched case-insensitively.
    pub fn labelled_amount(name: &str, label: &str) -> Result<Self, regex::Error> {
        let locator = format!(
            r"(?i){}:\s*(?P<sign>-)?\$(?P<amount>[\d,]+)",
            regex::escape(label)
        );
        Self::new(name, &locator, PostProcess::SignedAmount)
    }

    /// Applies the locator to `text`; only the first occurrence counts.
    pub fn apply(&self, text: &str) -> Result<Option<FieldValue>, ExtractError> {
        let Some(caps) = self.locator.captures(text) else {
            return Ok(None);
        };

        let value = match self.post {
            PostProcess::SignedAmount => {
                let raw = caps
                    .name("amount")
                    .or_else(|| caps.get(0))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                let digits: String = raw.chars().filter(|c| *c != ',').collect();
                let magnitude: i64 = digits.parse().map_err(|_| ExtractError::InvalidAmount {
                    field: self.name.clone(),
                    raw: raw.to_string(),
                })?;
                let negative = caps.name("sign").is_some_and(|m| m.as_str() == "-");
                FieldValue::Amount(if negative { -magnitude } else { magnitude })
            }
            PostProcess::TrimmedText => {
                let raw = caps
                    .name("text")
                    .or_else(|| caps.get(0))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                FieldValue::Text(raw.trim().to_string())
            }
        };

        Ok(Some(value))
    }
}

#[derive(Debug, Clone, Default)]
pub struct FigureGrammar {
    fields: Vec<FieldSpec>,
}

impl FigureGrammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net income, operating income and summary.
    pub fn standard() -> Self {
        STANDARD_GRAMMAR.clone()
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Runs every field independently. Fields that are not found are absent from the map.
    pub fn extract(&self, text: &str) -> Result<HashMap<String, FieldValue>, ExtractError> {
        let mut found = HashMap::new();
        for field in &self.fields {
            if let Some(value) = field.apply(text)? {
                tracing::trace!("Field '{}' -> {:?}", field.name, value);
                found.insert(field.name.clone(), value);
            }
        }
        Ok(found)
    }
}

/// Figures reported for one company and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFigures {
    pub net_income: i64,
    pub operating_income: i64,
    pub summary: Option<String>,
}

impl ExtractedFigures {
    pub fn from_fields(fields: &HashMap<String, FieldValue>) -> Result<Self, ExtractError> {
        Ok(Self {
            net_income: required_amount(fields, NET_INCOME)?,
            operating_income: required_amount(fields, OPERATING_INCOME)?,
            summary: match fields.get(SUMMARY) {
                Some(FieldValue::Text(text)) => Some(text.clone()),
                Some(FieldValue::Amount(n)) => Some(n.to_string()),
                None => None,
            },
        })
    }
}

fn required_amount(fields: &HashMap<String, FieldValue>, name: &str) -> Result<i64, ExtractError> {
    match fields.get(name) {
        Some(FieldValue::Amount(n)) => Ok(*n),
        Some(FieldValue::Text(raw)) => Err(ExtractError::InvalidAmount {
            field: name.to_string(),
            raw: raw.clone(),
        }),
        None => Err(ExtractError::MissingField(name.to_string())),
    }
}

pub struct FigureExtractor {
    grammar: FigureGrammar,
}

impl Default for FigureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FigureExtractor {
    pub fn new() -> Self {
        Self::with_grammar(FigureGrammar::standard())
    }

    pub fn with_grammar(grammar: FigureGrammar) -> Self {
        Self { grammar }
    }

    pub fn extract(&self, text: &str) -> Result<ExtractedFigures, ExtractError> {
        let fields = self.grammar.extract(text)?;
        ExtractedFigures::from_fields(&fields)
    }
}
