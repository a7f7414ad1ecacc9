//! Statistics Calculator Module
//! Descriptive statistics and distribution shape measures.

use serde::Serialize;
use statrs::statistics::Statistics;

/// Descriptive statistics for a single numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            column: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            p50: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics, ignoring missing values.
    pub fn describe(column: &str, values: &[Option<f64>]) -> ColumnSummary {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let mut summary = Self::compute_descriptive_stats(&present);
        summary.column = column.to_string();
        summary
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        ColumnSummary {
            column: String::new(),
            count: n,
            mean: Self::mean(values),
            // Sample standard deviation; NaN for a single value
            std: values.iter().std_dev(),
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            p50: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        values.iter().mean()
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Population skewness, `m3 / m2^1.5`.
    pub fn skewness(values: &[f64]) -> f64 {
        let (m2, m3, _) = Self::central_moments(values);
        m3 / m2.powf(1.5)
    }

    /// Excess (Fisher) kurtosis from population moments, `m4 / m2^2 - 3`.
    pub fn kurtosis(values: &[f64]) -> f64 {
        let (m2, _, m4) = Self::central_moments(values);
        m4 / (m2 * m2) - 3.0
    }

    /// Second, third and fourth central moments (divided by n).
    fn central_moments(values: &[f64]) -> (f64, f64, f64) {
        let n = values.len();
        if n == 0 {
            return (f64::NAN, f64::NAN, f64::NAN);
        }

        let mean = Self::mean(values);
        let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
        for x in values {
            let d = x - mean;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }

        let n = n as f64;
        (m2 / n, m3 / n, m4 / n)
    }
}
