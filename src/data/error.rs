//! Errors raised while loading and cleaning the laptop dataset.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse CSV: {0}")]
    Csv(#[source] PolarsError),
    #[error("Missing expected column `{column}`")]
    Schema { column: String },
    #[error("Column `{column}`, row {row}: cannot parse {value:?} as {expected}")]
    Parse {
        column: String,
        row: usize,
        value: String,
        expected: &'static str,
    },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl DataError {
    pub(crate) fn parse(
        column: &str,
        row: usize,
        value: Option<&str>,
        expected: &'static str,
    ) -> Self {
        DataError::Parse {
            column: column.to_string(),
            row,
            value: value.unwrap_or("<missing>").to_string(),
            expected,
        }
    }
}
