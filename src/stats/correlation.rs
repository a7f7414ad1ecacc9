//! Pairwise Pearson correlation over the numeric columns of a table.

use serde::Serialize;

/// Square correlation matrix with row/column labels.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Build the matrix, using only rows where both columns are present.
    pub fn from_columns(columns: &[(String, Vec<Option<f64>>)]) -> Self {
        let names: Vec<String> = columns.iter().map(|(name, _)| name.clone()).collect();
        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];

        for i in 0..n {
            for j in i..n {
                let r = pearson(&columns[i].1, &columns[j].1);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self {
            columns: names,
            values,
        }
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// Pearson correlation over pairwise-complete observations.
///
/// NaN when fewer than two pairs exist or either side has no variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }

    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_perfect_correlation() {
        let x = some(&[1.0, 2.0, 3.0, 4.0]);
        let y = some(&[10.0, 20.0, 30.0, 40.0]);
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);

        let y_neg = some(&[40.0, 30.0, 20.0, 10.0]);
        assert!((pearson(&x, &y_neg) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_is_nan() {
        let x = some(&[1.0, 2.0, 3.0]);
        let y = some(&[5.0, 5.0, 5.0]);
        assert!(pearson(&x, &y).is_nan());
    }

    #[test]
    fn test_pairwise_complete() {
        let x = vec![Some(1.0), None, Some(2.0), Some(3.0)];
        let y = vec![Some(2.0), Some(100.0), Some(4.0), Some(6.0)];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let columns = vec![
            ("Inches".to_string(), some(&[13.3, 15.6, 17.3])),
            ("Price_euros".to_string(), some(&[1300.0, 800.0, 2500.0])),
            ("Ram".to_string(), some(&[8.0, 4.0, 16.0])),
        ];
        let matrix = CorrelationMatrix::from_columns(&columns);

        assert_eq!(matrix.columns.len(), 3);
        let ab = matrix.get("Inches", "Price_euros").unwrap();
        let ba = matrix.get("Price_euros", "Inches").unwrap();
        assert_eq!(ab, ba);
        assert!((matrix.get("Ram", "Ram").unwrap() - 1.0).abs() < 1e-12);
        assert!(matrix.get("Ram", "Weight").is_none());
    }
}
