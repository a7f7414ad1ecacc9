//! Analysis Report Module
//! Bundles every statistic printed for the cleaned table.

use crate::data::{DataError, LaptopTable};
use crate::stats::grouping::{mean_price_by_company, mean_price_by_ram};
use crate::stats::{ColumnSummary, CorrelationMatrix, GroupMean, StatsCalculator};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub row_count: usize,
    pub summaries: Vec<ColumnSummary>,
    pub correlation: CorrelationMatrix,
    pub price_kurtosis: f64,
    pub price_skewness: f64,
    pub mean_price_by_ram: Vec<GroupMean<i64>>,
    pub mean_price_by_company: Vec<GroupMean<String>>,
}

impl AnalysisReport {
    pub fn from_table(table: &LaptopTable) -> Result<Self, DataError> {
        let columns = table.numeric_columns()?;
        let summaries = columns
            .iter()
            .map(|(name, values)| StatsCalculator::describe(name, values))
            .collect();
        let correlation = CorrelationMatrix::from_columns(&columns);

        let prices = table.prices()?;

        Ok(Self {
            row_count: table.height(),
            summaries,
            correlation,
            price_kurtosis: StatsCalculator::kurtosis(&prices),
            price_skewness: StatsCalculator::skewness(&prices),
            mean_price_by_ram: mean_price_by_ram(table)?,
            mean_price_by_company: mean_price_by_company(table)?,
        })
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn write_describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: [(&str, fn(&ColumnSummary) -> f64); 8] = [
            ("count", |s| s.count as f64),
            ("mean", |s| s.mean),
            ("std", |s| s.std),
            ("min", |s| s.min),
            ("25%", |s| s.p25),
            ("50%", |s| s.p50),
            ("75%", |s| s.p75),
            ("max", |s| s.max),
        ];

        let widths: Vec<usize> = self
            .summaries
            .iter()
            .map(|s| s.column.len().max(12))
            .collect();

        write!(f, "{:<6}", "")?;
        for (summary, width) in self.summaries.iter().zip(&widths) {
            write!(f, " {:>width$}", summary.column, width = width)?;
        }
        writeln!(f)?;

        for (label, value) in rows {
            write!(f, "{:<6}", label)?;
            for (summary, width) in self.summaries.iter().zip(&widths) {
                write!(f, " {:>width$.6}", value(summary), width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_correlation(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.correlation.columns;
        let label_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let widths: Vec<usize> = columns.iter().map(|c| c.len().max(9)).collect();

        write!(f, "{:<label_width$}", "", label_width = label_width)?;
        for (name, width) in columns.iter().zip(&widths) {
            write!(f, " {:>width$}", name, width = width)?;
        }
        writeln!(f)?;

        for (name, row) in columns.iter().zip(&self.correlation.values) {
            write!(f, "{:<label_width$}", name, label_width = label_width)?;
            for (r, width) in row.iter().zip(&widths) {
                write!(f, " {:>width$.6}", r, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Descriptive Statistics:")?;
        self.write_describe(f)?;
        writeln!(f)?;
        writeln!(f, "Correlation Matrix:")?;
        self.write_correlation(f)?;
        writeln!(f)?;
        writeln!(f, "Price Kurtosis: {}", self.price_kurtosis)?;
        write!(f, "Price Skewness: {}", self.price_skewness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::cleaned_table;

    fn sample_table() -> LaptopTable {
        cleaned_table(&[
            "Apple,Ultrabook,13.3,8GB,2.3GHz,128,,,,1000,",
            "HP,Notebook,15.6,8GB,2.0GHz,,500,,,2000,",
            "Dell,Gaming,17.3,16GB,2.8GHz,256,1000,,,3000,",
        ])
    }

    #[test]
    fn test_report_price_summary() {
        let report = AnalysisReport::from_table(&sample_table()).unwrap();
        assert_eq!(report.row_count, 3);

        let price = report
            .summaries
            .iter()
            .find(|s| s.column == "Price_euros")
            .unwrap();
        assert_eq!(price.count, 3);
        assert!((price.mean - 2000.0).abs() < 1e-9);
        assert!(report.price_skewness.abs() < 1e-9);
        assert!((report.price_kurtosis + 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_report_has_no_unnamed_column() {
        let report = AnalysisReport::from_table(&sample_table()).unwrap();
        assert!(report
            .correlation
            .columns
            .iter()
            .all(|c| c != "Unnamed: 16"));
    }

    #[test]
    fn test_display_sections() {
        let text = AnalysisReport::from_table(&sample_table())
            .unwrap()
            .to_string();
        assert!(text.contains("Descriptive Statistics:"));
        assert!(text.contains("Correlation Matrix:"));
        assert!(text.contains("Price Kurtosis:"));
        assert!(text.contains("Price Skewness:"));
        assert!(text.contains("Price_euros"));
    }

    #[test]
    fn test_write_json() {
        let report = AnalysisReport::from_table(&sample_table()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["row_count"], 3);
        assert_eq!(value["mean_price_by_company"][0]["key"], "Dell");
    }
}
