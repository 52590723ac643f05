//! Engine error types.
//!
//! Every failure mode has a named variant. Per-dish data problems are not
//! errors: they are clamped and reported as [`DataIntegrityWarning`]s on the
//! affected record so one bad dish never aborts a batch.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid {param}: '{value}' is not a calendar date (expected YYYY-MM-DD)")]
    InvalidDate { param: &'static str, value: String },

    #[error("Invalid date range: startDate {start} is after endDate {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load dishes: {0}")]
    Load(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// True for malformed request parameters (a 400-equivalent rejection).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidDate { .. } | EngineError::InvalidRange { .. }
        )
    }

    /// The request parameter(s) responsible for a validation failure.
    pub fn offending_params(&self) -> &'static [&'static str] {
        match self {
            EngineError::InvalidDate { param, .. } => match *param {
                "startDate" => &["startDate"],
                "endDate" => &["endDate"],
                _ => &[],
            },
            EngineError::InvalidRange { .. } => &["startDate", "endDate"],
            _ => &[],
        }
    }
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Non-fatal annotation attached to a dish whose cost or sales data had to
/// be clamped before classification.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DataIntegrityWarning {
    NegativeSellingPrice { original: f64 },
    NonFiniteSellingPrice,
    ProfitMarginOutOfRange { original: f64, clamped: f64 },
    NonFiniteProfitMargin,
    PopularityOutOfRange { original: f64, clamped: f64 },
}

impl fmt::Display for DataIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIntegrityWarning::NegativeSellingPrice { original } => {
                write!(f, "negative selling price {:.2} clamped to 0.00", original)
            }
            DataIntegrityWarning::NonFiniteSellingPrice => {
                write!(f, "non-finite selling price treated as 0.00")
            }
            DataIntegrityWarning::ProfitMarginOutOfRange { original, clamped } => {
                write!(f, "profit margin {:.2}% clamped to {:.2}%", original, clamped)
            }
            DataIntegrityWarning::NonFiniteProfitMargin => {
                write!(f, "non-finite profit margin treated as missing")
            }
            DataIntegrityWarning::PopularityOutOfRange { original, clamped } => {
                write!(f, "popularity {:.2}% clamped to {:.2}%", original, clamped)
            }
        }
    }
}
