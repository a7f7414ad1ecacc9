//! Stats module - descriptive statistics, correlation and grouped means

mod calculator;
mod correlation;
pub mod grouping;

pub use calculator::{ColumnSummary, StatsCalculator};
pub use correlation::CorrelationMatrix;
pub use grouping::GroupMean;
