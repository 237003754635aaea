use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ReportError;
use crate::ReportResult;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Metadata key holding the free-text portfolio description.
pub const ABOUT_KEY: &str = "about";

/// A named, date-ordered series of periodic fractional returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    name: String,
    dates: Vec<NaiveDate>,
    values: Vec<Rate>,
}

impl ReturnSeries {
    /// Build a series, sorting observations by date.
    ///
    /// Fails when `dates` and `values` differ in length or a date repeats.
    pub fn new(
        name: impl Into<String>,
        dates: Vec<NaiveDate>,
        values: Vec<Rate>,
    ) -> ReportResult<Self> {
        let name = name.into();
        if dates.len() != values.len() {
            return Err(ReportError::InvalidInput {
                field: name,
                reason: format!(
                    "{} dates but {} return values",
                    dates.len(),
                    values.len()
                ),
            });
        }

        let mut paired: Vec<(NaiveDate, Rate)> = dates.into_iter().zip(values).collect();
        paired.sort_by_key(|(d, _)| *d);

        if let Some(pair) = paired.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(ReportError::InvalidInput {
                field: name,
                reason: format!("duplicate date {}", pair[0].0),
            });
        }

        let (dates, values) = paired.into_iter().unzip();
        Ok(Self {
            name,
            dates,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[Rate] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return differential `self - other` over the dates both series share.
    ///
    /// Dates present in only one of the two series are dropped.
    pub fn difference(&self, other: &ReturnSeries) -> ReportResult<ReturnSeries> {
        let mut dates = Vec::with_capacity(self.len().min(other.len()));
        let mut values = Vec::with_capacity(dates.capacity());

        let (mut i, mut j) = (0, 0);
        while i < self.len() && j < other.len() {
            match self.dates[i].cmp(&other.dates[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dates.push(self.dates[i]);
                    let active = self.values[i].checked_sub(other.values[j]).ok_or_else(|| {
                        ReportError::InvalidInput {
                            field: self.name.clone(),
                            reason: format!("active return vs '{}' overflows", other.name),
                        }
                    })?;
                    values.push(active);
                    i += 1;
                    j += 1;
                }
            }
        }

        if dates.is_empty() && !(self.is_empty() && other.is_empty()) {
            return Err(ReportError::InsufficientData(format!(
                "'{}' and '{}' share no dates",
                self.name, other.name
            )));
        }

        Ok(ReturnSeries {
            name: format!("{} - {}", self.name, other.name),
            dates,
            values,
        })
    }
}

/// Free-form string annotations passed through to the report pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.insert(ABOUT_KEY, about);
        self
    }

    pub fn about(&self) -> Option<&str> {
        self.get(ABOUT_KEY)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
