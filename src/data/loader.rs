//! CSV Data Loader Module
//! Reads the laptop listing file into a schema-checked raw table using Polars.

use super::{DataError, RawLaptopTable};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file, reading it exactly once.
    ///
    /// The schema is inferred over every row so that a stray non-numeric
    /// cell late in the file keeps its column textual instead of being
    /// nulled out and later mistaken for a missing value.
    pub fn load_csv(file_path: &Path) -> Result<RawLaptopTable, DataError> {
        let file = File::open(file_path).map_err(|source| DataError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_ignore_errors(false)
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(DataError::Csv)?;

        info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );
        debug!("Columns: {:?}", df.get_column_names());

        RawLaptopTable::from_dataframe(df)
    }
}
