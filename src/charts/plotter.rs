//! Chart Plotter Module
//! Prepares the data behind each chart from the cleaned table. Nothing here
//! draws; the renderer consumes these structures.

use crate::data::{DataError, LaptopTable};
use crate::stats::grouping::{mean_price_by_company, mean_price_by_ram};
use crate::stats::{GroupMean, StatsCalculator};
use statrs::distribution::{Continuous, Normal};

/// Number of histogram bins for the price distribution
pub const PRICE_BINS: usize = 30;

/// Number of points sampled along the density curve
pub const KDE_POINTS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// A short callout pointing at a data coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation<X> {
    pub text: String,
    pub x: X,
    pub y: f64,
}

/// Histogram of prices with a density curve scaled to bin counts.
#[derive(Debug, Clone)]
pub struct PriceDistribution {
    pub bins: Vec<HistogramBin>,
    pub density: Vec<(f64, f64)>,
    pub peak: Option<Annotation<f64>>,
}

/// Price values for one laptop type.
#[derive(Debug, Clone)]
pub struct TypeDistribution {
    pub label: String,
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct PriceByType {
    pub groups: Vec<TypeDistribution>,
    pub widest: Option<Annotation<usize>>,
}

#[derive(Debug, Clone)]
pub struct PriceVsScreen {
    pub points: Vec<(f64, f64)>,
    pub largest: Option<Annotation<f64>>,
}

/// Bars of mean price, in the order they should be drawn.
#[derive(Debug, Clone)]
pub struct AveragePriceBars {
    pub bars: Vec<(String, f64)>,
    pub highlight: Option<Annotation<usize>>,
}

/// Creates chart data for the five laptop charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Histogram of `Price_euros` with a KDE overlay.
    pub fn price_distribution(table: &LaptopTable) -> Result<PriceDistribution, DataError> {
        let prices = table.prices()?;
        let bins = Self::histogram(&prices, PRICE_BINS);
        let bin_width = bins.first().map(|b| b.end - b.start).unwrap_or(1.0);
        let density = Self::kde_curve(&prices, KDE_POINTS, prices.len() as f64 * bin_width);

        let peak = bins
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.count.cmp(&b.count).then(ib.cmp(ia)))
            .map(|(_, bin)| Annotation {
                text: "Peak Frequency".to_string(),
                x: (bin.start + bin.end) / 2.0,
                y: bin.count as f64,
            });

        Ok(PriceDistribution {
            bins,
            density,
            peak,
        })
    }

    /// Prices grouped by `TypeName` in order of first appearance.
    pub fn price_by_type(table: &LaptopTable) -> Result<PriceByType, DataError> {
        let groups: Vec<TypeDistribution> =
            Self::group_in_order(&table.type_names()?, &table.prices()?)
                .into_iter()
                .map(|(label, prices)| TypeDistribution { label, prices })
                .collect();

        let widest = groups
            .iter()
            .enumerate()
            .map(|(i, g)| (i, Self::iqr(&g.prices), g))
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _, g)| Annotation {
                text: "Highest Price Variation".to_string(),
                x: i,
                y: g.prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            });

        Ok(PriceByType { groups, widest })
    }

    /// One point per row: `Inches` against `Price_euros`.
    pub fn price_vs_screen_size(table: &LaptopTable) -> Result<PriceVsScreen, DataError> {
        let points: Vec<(f64, f64)> = table
            .inches()?
            .into_iter()
            .zip(table.prices()?)
            .collect();

        let largest = points
            .iter()
            .copied()
            .max_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            })
            .map(|(x, y)| Annotation {
                text: "Largest Screen Size".to_string(),
                x,
                y,
            });

        Ok(PriceVsScreen { points, largest })
    }

    /// Mean price per RAM size, ascending RAM.
    pub fn average_price_by_ram(table: &LaptopTable) -> Result<AveragePriceBars, DataError> {
        let groups = mean_price_by_ram(table)?;
        let bars = Self::bars(groups, |ram| ram.to_string());

        let highlight = bars.len().checked_sub(1).map(|last| Annotation {
            text: "High Cost for High RAM".to_string(),
            x: last,
            y: bars[last].1,
        });

        Ok(AveragePriceBars { bars, highlight })
    }

    /// Mean price per brand, most expensive first.
    pub fn average_price_by_brand(table: &LaptopTable) -> Result<AveragePriceBars, DataError> {
        let groups = mean_price_by_company(table)?;
        let bars = Self::bars(groups, |company| company.clone());

        let highlight = bars.first().map(|(_, mean)| Annotation {
            text: "Premium Brand".to_string(),
            x: 0,
            y: *mean,
        });

        Ok(AveragePriceBars { bars, highlight })
    }

    /// Equal-width bins over `[min, max]`; the last bin includes `max`.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        if values.is_empty() || bins == 0 {
            return Vec::new();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (min, max) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let width = (max - min) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + i as f64 * width,
                end: min + (i + 1) as f64 * width,
                count,
            })
            .collect()
    }

    /// Gaussian kernel density over the data range, Scott's bandwidth,
    /// multiplied by `scale`.
    pub fn kde_curve(values: &[f64], points: usize, scale: f64) -> Vec<(f64, f64)> {
        let n = values.len();
        if n < 2 || points < 2 {
            return Vec::new();
        }

        let std = StatsCalculator::compute_descriptive_stats(values).std;
        let bandwidth = std * (n as f64).powf(-0.2);
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Vec::new();
        }

        let Ok(kernel) = Normal::new(0.0, 1.0) else {
            return Vec::new();
        };

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let step = (max - min) / (points - 1) as f64;

        (0..points)
            .map(|i| {
                let x = min + i as f64 * step;
                let sum: f64 = values.iter().map(|v| kernel.pdf((x - v) / bandwidth)).sum();
                (x, scale * sum / (n as f64 * bandwidth))
            })
            .collect()
    }

    /// Group values by label, keeping labels in first-appearance order.
    pub fn group_in_order(labels: &[String], values: &[f64]) -> Vec<(String, Vec<f64>)> {
        let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
        for (label, &value) in labels.iter().zip(values) {
            match groups.iter_mut().find(|(l, _)| l == label) {
                Some((_, group)) => group.push(value),
                None => groups.push((label.clone(), vec![value])),
            }
        }
        groups
    }

    fn iqr(values: &[f64]) -> f64 {
        let summary = StatsCalculator::compute_descriptive_stats(values);
        summary.p75 - summary.p25
    }

    fn bars<K>(groups: Vec<GroupMean<K>>, label: impl Fn(&K) -> String) -> Vec<(String, f64)> {
        groups.iter().map(|g| (label(&g.key), g.mean)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::cleaned_table;

    fn sample_table() -> LaptopTable {
        cleaned_table(&[
            "Apple,Ultrabook,13.3,8GB,2.3GHz,128,,,,1339.69,",
            "HP,Notebook,15.6,8GB,2.0GHz,,500,,,575,",
            "Dell,Gaming,17.3,16GB,2.8GHz,256,1000,,,2499,",
            "HP,Notebook,14.0,4GB,1.6GHz,,500,,,400,",
            "Apple,Ultrabook,15.4,16GB,2.9GHz,512,,,,2858,",
        ])
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [1.0, 2.0, 2.5, 3.0, 10.0];
        let bins = ChartPlotter::histogram(&values, 3);

        assert_eq!(bins.len(), 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].start, 1.0);
        assert_eq!(bins[2].end, 10.0);
        // The maximum lands in the last bin rather than past it
        assert_eq!(bins[2].count, 1);
    }

    #[test]
    fn test_histogram_constant_values() {
        let bins = ChartPlotter::histogram(&[5.0, 5.0], 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert!(bins[0].start < 5.0 && bins[3].end > 5.0);
    }

    #[test]
    fn test_kde_is_non_negative_and_peaks_inside() {
        let values = [1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 5.0];
        let curve = ChartPlotter::kde_curve(&values, 41, 1.0);

        assert_eq!(curve.len(), 41);
        assert!(curve.iter().all(|(_, y)| *y >= 0.0));
        let (peak_x, _) = curve
            .iter()
            .copied()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .unwrap();
        assert!((peak_x - 3.0).abs() < 0.5);
    }

    #[test]
    fn test_kde_needs_spread() {
        assert!(ChartPlotter::kde_curve(&[7.0, 7.0, 7.0], 10, 1.0).is_empty());
        assert!(ChartPlotter::kde_curve(&[7.0], 10, 1.0).is_empty());
    }

    #[test]
    fn test_price_distribution_peak() {
        let dist = ChartPlotter::price_distribution(&sample_table()).unwrap();
        assert_eq!(dist.bins.len(), PRICE_BINS);
        assert_eq!(dist.density.len(), KDE_POINTS);
        assert_eq!(dist.peak.unwrap().y, 1.0);
    }

    #[test]
    fn test_price_by_type_first_appearance() {
        let by_type = ChartPlotter::price_by_type(&sample_table()).unwrap();
        let labels: Vec<&str> = by_type.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Ultrabook", "Notebook", "Gaming"]);
        assert_eq!(by_type.groups[0].prices, vec![1339.69, 2858.0]);

        let widest = by_type.widest.unwrap();
        assert_eq!(widest.x, 0);
        assert_eq!(widest.y, 2858.0);
    }

    #[test]
    fn test_scatter_one_point_per_row() {
        let scatter = ChartPlotter::price_vs_screen_size(&sample_table()).unwrap();
        assert_eq!(scatter.points.len(), 5);
        assert_eq!(scatter.points[0], (13.3, 1339.69));

        let largest = scatter.largest.unwrap();
        assert_eq!(largest.x, 17.3);
        assert_eq!(largest.y, 2499.0);
    }

    #[test]
    fn test_ram_bars() {
        let ram = ChartPlotter::average_price_by_ram(&sample_table()).unwrap();
        let labels: Vec<&str> = ram.bars.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["4", "8", "16"]);
        assert_eq!(ram.highlight.unwrap().x, 2);
    }

    #[test]
    fn test_brand_bars_descending() {
        let brand = ChartPlotter::average_price_by_brand(&sample_table()).unwrap();
        let labels: Vec<&str> = brand.bars.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Dell", "Apple", "HP"]);
        assert!(brand.bars.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}
