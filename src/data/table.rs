//! Laptop Table Module
//! Raw and cleaned table types. A raw table can only be turned into a
//! cleaned one by consuming it, so the suffix stripping runs exactly once.

use super::cleaner::DataCleaner;
use super::DataError;
use polars::prelude::*;

pub const COMPANY: &str = "Company";
pub const TYPE_NAME: &str = "TypeName";
pub const INCHES: &str = "Inches";
pub const RAM: &str = "Ram";
pub const CPU_RATE: &str = "Cpu Rate";
pub const SSD: &str = "SSD";
pub const HDD: &str = "HDD";
pub const FLASH_STORAGE: &str = "Flash Storage";
pub const HYBRID: &str = "Hybrid";
pub const PRICE: &str = "Price_euros";
pub const UNNAMED: &str = "Unnamed: 16";

pub const STORAGE_COLUMNS: [&str; 4] = [SSD, HDD, FLASH_STORAGE, HYBRID];

/// Columns the raw file must carry.
pub const EXPECTED_COLUMNS: [&str; 11] = [
    COMPANY,
    TYPE_NAME,
    INCHES,
    RAM,
    CPU_RATE,
    SSD,
    HDD,
    FLASH_STORAGE,
    HYBRID,
    PRICE,
    UNNAMED,
];

/// Table exactly as read from disk, schema-checked but not yet cleaned.
#[derive(Debug, Clone)]
pub struct RawLaptopTable {
    df: DataFrame,
}

impl RawLaptopTable {
    /// Wrap a DataFrame, failing on the first expected column it lacks.
    pub fn from_dataframe(df: DataFrame) -> Result<Self, DataError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        if let Some(missing) = EXPECTED_COLUMNS
            .iter()
            .find(|expected| !names.iter().any(|n| n == *expected))
        {
            return Err(DataError::Schema {
                column: missing.to_string(),
            });
        }

        Ok(Self { df })
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Normalize unit-suffixed and partial columns into numeric form.
    pub fn clean(self) -> Result<LaptopTable, DataError> {
        let df = DataCleaner::clean(self.df)?;
        Ok(LaptopTable { df })
    }
}

/// Cleaned, read-only table consumed by statistics and charts.
#[derive(Debug, Clone)]
pub struct LaptopTable {
    df: DataFrame,
}

impl LaptopTable {
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn prices(&self) -> Result<Vec<f64>, DataError> {
        self.f64_column(PRICE)
    }

    pub fn inches(&self) -> Result<Vec<f64>, DataError> {
        self.f64_column(INCHES)
    }

    pub fn ram(&self) -> Result<Vec<i64>, DataError> {
        self.i64_column(RAM)
    }

    pub fn companies(&self) -> Result<Vec<String>, DataError> {
        self.str_values(COMPANY)
    }

    pub fn type_names(&self) -> Result<Vec<String>, DataError> {
        self.str_values(TYPE_NAME)
    }

    /// Every numeric column in table order, cast to f64 with nulls kept.
    pub fn numeric_columns(&self) -> Result<Vec<(String, Vec<Option<f64>>)>, DataError> {
        let mut columns = Vec::new();

        for col in self.df.get_columns() {
            if !matches!(
                col.dtype(),
                DataType::Float32
                    | DataType::Float64
                    | DataType::Int8
                    | DataType::Int16
                    | DataType::Int32
                    | DataType::Int64
                    | DataType::UInt8
                    | DataType::UInt16
                    | DataType::UInt32
                    | DataType::UInt64
            ) {
                continue;
            }

            let as_f64 = col.cast(&DataType::Float64)?;
            let values: Vec<Option<f64>> = as_f64.f64()?.into_iter().collect();
            columns.push((col.name().to_string(), values));
        }

        Ok(columns)
    }

    /// Values of a Float64 column.
    pub fn f64_column(&self, column: &str) -> Result<Vec<f64>, DataError> {
        let ca = self.df.column(column)?.f64()?;
        Ok(ca.into_iter().flatten().collect())
    }

    /// Values of an Int64 column.
    pub fn i64_column(&self, column: &str) -> Result<Vec<i64>, DataError> {
        let ca = self.df.column(column)?.i64()?;
        Ok(ca.into_iter().flatten().collect())
    }

    fn str_values(&self, column: &str) -> Result<Vec<String>, DataError> {
        let series = self.df.column(column)?.as_materialized_series();
        Ok(series
            .str()?
            .into_iter()
            .flatten()
            .map(|s| s.to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{raw_table, HEADER};

    #[test]
    fn test_schema_check_reports_missing_column() {
        let df = df!(
            COMPANY => ["Apple"],
            TYPE_NAME => ["Ultrabook"],
        )
        .unwrap();

        match RawLaptopTable::from_dataframe(df) {
            Err(DataError::Schema { column }) => assert_eq!(column, INCHES),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_typed_accessors_after_clean() {
        let raw = raw_table(&[
            "Apple,Ultrabook,13.3,8GB,2.3GHz,128,,,,1339.69,",
            "HP,Notebook,15.6,16GB,2.5GHz,,500,,,575,",
        ]);
        assert!(HEADER.contains(UNNAMED));

        let table = raw.clean().unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.ram().unwrap(), vec![8, 16]);
        assert_eq!(table.prices().unwrap(), vec![1339.69, 575.0]);
        assert_eq!(table.inches().unwrap(), vec![13.3, 15.6]);
        assert_eq!(table.companies().unwrap(), vec!["Apple", "HP"]);
        assert_eq!(table.type_names().unwrap(), vec!["Ultrabook", "Notebook"]);
    }

    #[test]
    fn test_numeric_columns_skip_text() {
        let table = raw_table(&["Dell,Gaming,17.3,32GB,2.8GHz,512,1000,,,2499,"])
            .clean()
            .unwrap();

        let names: Vec<String> = table
            .numeric_columns()
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert!(names.contains(&PRICE.to_string()));
        assert!(names.contains(&RAM.to_string()));
        assert!(names.contains(&CPU_RATE.to_string()));
        assert!(!names.contains(&COMPANY.to_string()));
        assert!(!names.contains(&TYPE_NAME.to_string()));
    }
}
