//! FILENAME: analytics-engine/src/error.rs

use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    #[error("Value '{value}' is not numeric: {source}")]
    Parse {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
