use crate::types::parameter::QueryType;
use crate::wfs::error::WfsError;
use chrono::{DateTime, Utc};
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FmiError {
    #[error("Argument 'parameter' not provided")]
    MissingParameter,

    #[error("Please provide either a place or an fmisid")]
    MissingLocation,

    #[error("Both place and fmisid provided, only one is allowed")]
    AmbiguousLocation,

    #[error("Unknown {query_type} parameter '{name}', valid values are: {}", valid.join(", "))]
    InvalidParameter {
        name: String,
        query_type: QueryType,
        valid: &'static [&'static str],
    },

    #[error("Unknown query type '{0}', expected one of: observation, forecast")]
    UnknownQueryType(String),

    #[error("Unknown forecast model '{0}', choose harmonie or hirlam")]
    UnknownModel(String),

    #[error("Invalid time selection: {0}")]
    InvalidTimeSelection(&'static str),

    #[error("Failed to parse date '{0}', expected YYYY-MM-DD")]
    DateParsing(String),

    #[error("Time range start {start} is after its end {end}")]
    StartAfterEnd {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error(transparent)]
    Wfs(#[from] WfsError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrame(#[from] PolarsError),
}

impl FmiError {
    /// Whether the error was raised by argument validation, before any request was sent.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, FmiError::Wfs(_) | FmiError::DataFrame(_))
    }
}
