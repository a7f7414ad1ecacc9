//! Data Cleaner Module
//! Turns unit-suffixed and partially missing columns into typed numeric ones.

use super::table::{COMPANY, CPU_RATE, INCHES, PRICE, RAM, STORAGE_COLUMNS, TYPE_NAME, UNNAMED};
use super::DataError;
use polars::prelude::*;
use tracing::{debug, info};

/// Handles the fixed set of cleaning rules.
pub(crate) struct DataCleaner;

impl DataCleaner {
    /// Apply every cleaning rule to a raw DataFrame.
    ///
    /// Expects the unit suffixes to still be present; callers go through
    /// `RawLaptopTable::clean`, which consumes the raw table.
    pub(crate) fn clean(mut df: DataFrame) -> Result<DataFrame, DataError> {
        df.drop_in_place(UNNAMED)?;

        let ram = Self::map_text_column(&df, RAM, "positive integer", |cell| {
            cell.and_then(|s| Self::strip_unit(s, "GB").parse::<i64>().ok())
                .filter(|v| *v > 0)
        })?;
        df.with_column(Column::new(RAM.into(), ram))?;

        let cpu_rate = Self::map_text_column(&df, CPU_RATE, "positive float", |cell| {
            cell.and_then(|s| Self::parse_positive(&Self::strip_unit(s, "GHz")))
        })?;
        df.with_column(Column::new(CPU_RATE.into(), cpu_rate))?;

        for name in STORAGE_COLUMNS {
            let values = Self::map_text_column(&df, name, "integer", Self::parse_storage)?;
            df.with_column(Column::new(name.into(), values))?;
        }

        for name in [INCHES, PRICE] {
            let values = Self::map_text_column(&df, name, "positive number", |cell| {
                cell.and_then(Self::parse_positive)
            })?;
            df.with_column(Column::new(name.into(), values))?;
        }

        for name in [COMPANY, TYPE_NAME] {
            let values = Self::map_text_column(&df, name, "non-empty text", |cell| {
                cell.filter(|s| !s.trim().is_empty()).map(str::to_string)
            })?;
            df.with_column(Column::new(name.into(), values))?;
        }

        info!("Cleaned {} rows", df.height());
        debug!("Cleaned schema: {:?}", df.schema());
        Ok(df)
    }

    /// Remove every occurrence of a unit suffix and surrounding whitespace.
    pub(crate) fn strip_unit(cell: &str, unit: &str) -> String {
        cell.replace(unit, "").trim().to_string()
    }

    /// Finite and strictly greater than zero.
    pub(crate) fn parse_positive(cell: &str) -> Option<f64> {
        cell.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Missing storage is zero; present cells must hold a whole number.
    pub(crate) fn parse_storage(cell: Option<&str>) -> Option<i64> {
        let Some(text) = cell.map(str::trim) else {
            return Some(0);
        };
        if text.is_empty() {
            return Some(0);
        }

        if let Ok(v) = text.parse::<i64>() {
            return Some(v);
        }

        // i64::MAX as f64 rounds up to 2^63, hence the exclusive upper bound
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .filter(|v| *v >= i64::MIN as f64 && *v < i64::MAX as f64)
            .map(|v| v as i64)
    }

    /// Read a column as text and convert each cell, failing on the first
    /// cell the converter rejects.
    fn map_text_column<T>(
        df: &DataFrame,
        name: &str,
        expected: &'static str,
        convert: impl Fn(Option<&str>) -> Option<T>,
    ) -> Result<Vec<T>, DataError> {
        let as_text = df.column(name)?.cast(&DataType::String)?;
        let ca = as_text.as_materialized_series().str()?;

        ca.into_iter()
            .enumerate()
            .map(|(row, cell)| {
                convert(cell).ok_or_else(|| DataError::parse(name, row, cell, expected))
            })
            .collect()
    }
}
