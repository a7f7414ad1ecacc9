//! Static Chart Renderer
//! Draws the five laptop charts to PNG files with plotters.
//!
//! Charts, in render order:
//! 1. Price distribution: histogram + density curve
//! 2. Price by type: box plot per laptop type
//! 3. Price vs screen size: scatter
//! 4. Average price by RAM: vertical bars
//! 5. Average price by brand: horizontal bars, most expensive on top

use super::plotter::{
    AveragePriceBars, ChartPlotter, PriceByType, PriceDistribution, PriceVsScreen,
};
use crate::data::{DataError, LaptopTable};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const PRICE_DISTRIBUTION: &str = "price_distribution";
pub const PRICE_BY_TYPE: &str = "price_by_type";
pub const PRICE_VS_SCREEN_SIZE: &str = "price_vs_screen_size";
pub const AVG_PRICE_BY_RAM: &str = "avg_price_by_ram";
pub const AVG_PRICE_BY_BRAND: &str = "avg_price_by_brand";

/// Ten-colour categorical palette
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4), // Blue
    RGBColor(0xff, 0x7f, 0x0e), // Orange
    RGBColor(0x2c, 0xa0, 0x2c), // Green
    RGBColor(0xd6, 0x27, 0x28), // Red
    RGBColor(0x94, 0x67, 0xbd), // Purple
    RGBColor(0x8c, 0x56, 0x4b), // Brown
    RGBColor(0xe3, 0x77, 0xc2), // Pink
    RGBColor(0x7f, 0x7f, 0x7f), // Gray
    RGBColor(0xbc, 0xbd, 0x22), // Olive
    RGBColor(0x17, 0xbe, 0xcf), // Cyan
];

const FONT: &str = "sans-serif";
const WIDE: (u32, u32) = (1000, 600);
const TALL: (u32, u32) = (1200, 800);

type DrawResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to prepare {chart}: {source}")]
    Data {
        chart: &'static str,
        #[source]
        source: DataError,
    },
    #[error("Failed to draw {chart}: {message}")]
    Draw { chart: &'static str, message: String },
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render all five charts into `output_dir`, returning the written paths
    /// in render order.
    pub fn render_all(table: &LaptopTable, output_dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
        std::fs::create_dir_all(output_dir).map_err(|source| RenderError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        if table.height() == 0 {
            warn!("No rows to chart, skipping rendering");
            return Ok(Vec::new());
        }

        let steps: [(&'static str, fn(&LaptopTable, &Path) -> Result<(), RenderError>); 5] = [
            (PRICE_DISTRIBUTION, Self::render_price_distribution),
            (PRICE_BY_TYPE, Self::render_price_by_type),
            (PRICE_VS_SCREEN_SIZE, Self::render_price_vs_screen_size),
            (AVG_PRICE_BY_RAM, Self::render_avg_price_by_ram),
            (AVG_PRICE_BY_BRAND, Self::render_avg_price_by_brand),
        ];

        let mut written = Vec::with_capacity(steps.len());
        for (name, render) in steps {
            let path = Self::chart_path(output_dir, name);
            render(table, &path)?;
            info!("Rendered {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    pub fn chart_path(output_dir: &Path, chart: &str) -> PathBuf {
        output_dir.join(format!("{}.png", chart))
    }

    pub fn render_price_distribution(table: &LaptopTable, path: &Path) -> Result<(), RenderError> {
        let data = ChartPlotter::price_distribution(table)
            .map_err(|e| data_error(PRICE_DISTRIBUTION, e))?;
        debug!("{} bins, {} density points", data.bins.len(), data.density.len());
        Self::draw_price_distribution(&data, path).map_err(|e| draw_error(PRICE_DISTRIBUTION, e))
    }

    pub fn render_price_by_type(table: &LaptopTable, path: &Path) -> Result<(), RenderError> {
        let data = ChartPlotter::price_by_type(table).map_err(|e| data_error(PRICE_BY_TYPE, e))?;
        debug!("{} laptop types", data.groups.len());
        Self::draw_price_by_type(&data, path).map_err(|e| draw_error(PRICE_BY_TYPE, e))
    }

    pub fn render_price_vs_screen_size(
        table: &LaptopTable,
        path: &Path,
    ) -> Result<(), RenderError> {
        let data = ChartPlotter::price_vs_screen_size(table)
            .map_err(|e| data_error(PRICE_VS_SCREEN_SIZE, e))?;
        Self::draw_price_vs_screen_size(&data, path)
            .map_err(|e| draw_error(PRICE_VS_SCREEN_SIZE, e))
    }

    pub fn render_avg_price_by_ram(table: &LaptopTable, path: &Path) -> Result<(), RenderError> {
        let data = ChartPlotter::average_price_by_ram(table)
            .map_err(|e| data_error(AVG_PRICE_BY_RAM, e))?;
        Self::draw_avg_price_by_ram(&data, path).map_err(|e| draw_error(AVG_PRICE_BY_RAM, e))
    }

    pub fn render_avg_price_by_brand(table: &LaptopTable, path: &Path) -> Result<(), RenderError> {
        let data = ChartPlotter::average_price_by_brand(table)
            .map_err(|e| data_error(AVG_PRICE_BY_BRAND, e))?;
        Self::draw_avg_price_by_brand(&data, path).map_err(|e| draw_error(AVG_PRICE_BY_BRAND, e))
    }

    fn draw_price_distribution(data: &PriceDistribution, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, WIDE).into_drawing_area();
        root.fill(&WHITE)?;

        let x_min = data.bins.first().map(|b| b.start).unwrap_or(0.0);
        let x_max = data.bins.last().map(|b| b.end).unwrap_or(1.0);
        let max_count = data.bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;
        let max_density = data.density.iter().map(|(_, y)| *y).fold(0.0, f64::max);
        let y_max = max_count.max(max_density).max(1.0) * 1.15;

        let mut chart = Self::builder(&root, "Distribution of Laptop Prices")
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Price in Euros")
            .y_desc("Frequency")
            .draw()?;

        let color = PALETTE[0];
        chart.draw_series(data.bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.count as f64)],
                color.mix(0.6).filled(),
            )
        }))?;
        chart.draw_series(data.bins.iter().map(|bin| {
            Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], BLACK.stroke_width(1))
        }))?;
        chart.draw_series(LineSeries::new(data.density.iter().copied(), color.stroke_width(2)))?;

        if let Some(peak) = &data.peak {
            let offset = (x_max - x_min) * 0.08;
            let label_at = (peak.x + offset, peak.y + y_max * 0.05);
            chart.draw_series(std::iter::once(PathElement::new(
                vec![label_at, (peak.x, peak.y)],
                BLACK,
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                peak.text.clone(),
                label_at,
                (FONT, 16, FontStyle::Bold),
            )))?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_price_by_type(data: &PriceByType, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, TALL).into_drawing_area();
        root.fill(&WHITE)?;

        let n = data.groups.len() as i32;
        let labels: Vec<&str> = data.groups.iter().map(|g| g.label.as_str()).collect();
        let label_of = |v: &SegmentValue<i32>| segment_label(&labels, v);
        let y_max = data
            .groups
            .iter()
            .flat_map(|g| g.prices.iter().copied())
            .fold(1.0, f64::max)
            * 1.15;

        let mut chart = Self::builder(&root, "Price Distribution by Laptop Type")
            .build_cartesian_2d((0..n).into_segmented(), 0f32..y_max as f32)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(data.groups.len().max(1))
            .x_label_formatter(&label_of)
            .x_desc("Laptop Type")
            .y_desc("Price in Euros")
            .draw()?;

        chart.draw_series(data.groups.iter().enumerate().map(|(i, group)| {
            let quartiles = Quartiles::new(&group.prices[..]);
            Boxplot::new_vertical(SegmentValue::CenterOf(i as i32), &quartiles)
                .width(40)
                .whisker_width(0.5)
                .style(PALETTE[i % PALETTE.len()].stroke_width(2))
        }))?;

        if let Some(widest) = &data.widest {
            chart.draw_series(std::iter::once(Text::new(
                widest.text.clone(),
                (
                    SegmentValue::CenterOf(widest.x as i32),
                    (widest.y + y_max * 0.04) as f32,
                ),
                (FONT, 16, FontStyle::Bold),
            )))?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_price_vs_screen_size(data: &PriceVsScreen, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, WIDE).into_drawing_area();
        root.fill(&WHITE)?;

        let (x_min, x_max) = data
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (x, _)| {
                (lo.min(*x), hi.max(*x))
            });
        let (x_min, x_max) = if x_min.is_finite() {
            (x_min - 0.5, x_max + 0.5)
        } else {
            (0.0, 1.0)
        };
        let y_max = data.points.iter().map(|(_, y)| *y).fold(1.0, f64::max) * 1.2;

        let mut chart = Self::builder(&root, "Price vs Screen Size (Inches)")
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Screen Size (Inches)")
            .y_desc("Price in Euros")
            .draw()?;

        let color = PALETTE[2];
        chart.draw_series(
            data.points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, color.mix(0.7).filled())),
        )?;

        if let Some(largest) = &data.largest {
            let label_at = (largest.x - (x_max - x_min) * 0.15, largest.y + y_max * 0.08);
            chart.draw_series(std::iter::once(PathElement::new(
                vec![label_at, (largest.x, largest.y)],
                BLACK,
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                largest.text.clone(),
                label_at,
                (FONT, 16, FontStyle::Bold),
            )))?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_avg_price_by_ram(data: &AveragePriceBars, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, WIDE).into_drawing_area();
        root.fill(&WHITE)?;

        let n = data.bars.len() as i32;
        let y_max = data.bars.iter().map(|(_, m)| *m).fold(1.0, f64::max) * 1.2;
        let labels: Vec<&str> = data.bars.iter().map(|(label, _)| label.as_str()).collect();
        let label_of = |v: &SegmentValue<i32>| segment_label(&labels, v);

        let mut chart = Self::builder(&root, "Average Price by RAM Size")
            .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(data.bars.len().max(1))
            .x_label_formatter(&label_of)
            .x_desc("RAM (GB)")
            .y_desc("Average Price in Euros")
            .draw()?;

        chart.draw_series(data.bars.iter().enumerate().map(|(i, (_, mean))| {
            let i = i as i32;
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *mean)],
                PALETTE[i as usize % PALETTE.len()].filled(),
            );
            bar.set_margin(0, 0, 6, 6);
            bar
        }))?;

        if let Some(highlight) = &data.highlight {
            chart.draw_series(std::iter::once(Text::new(
                highlight.text.clone(),
                (
                    SegmentValue::CenterOf(highlight.x as i32),
                    highlight.y + y_max * 0.05,
                ),
                (FONT, 16, FontStyle::Bold),
            )))?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_avg_price_by_brand(data: &AveragePriceBars, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, TALL).into_drawing_area();
        root.fill(&WHITE)?;

        // Row 0 is the bottom of the chart, so the first bar goes on the top row
        let n = data.bars.len() as i32;
        let row_of = |i: usize| n - 1 - i as i32;
        let x_max = data.bars.iter().map(|(_, m)| *m).fold(1.0, f64::max) * 1.2;
        let label_of = |v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(row) | SegmentValue::Exact(row) => data
                .bars
                .get((n - 1 - *row) as usize)
                .map(|(label, _)| label.clone())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        };

        let mut chart = Self::builder(&root, "Average Price by Laptop Brand")
            .y_label_area_size(110)
            .build_cartesian_2d(0f64..x_max, (0..n).into_segmented())?;
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(data.bars.len().max(1))
            .y_label_formatter(&label_of)
            .x_desc("Average Price in Euros")
            .y_desc("Brand")
            .draw()?;

        chart.draw_series(data.bars.iter().enumerate().map(|(i, (_, mean))| {
            let row = row_of(i);
            let mut bar = Rectangle::new(
                [(0.0, SegmentValue::Exact(row)), (*mean, SegmentValue::Exact(row + 1))],
                PALETTE[i % PALETTE.len()].filled(),
            );
            bar.set_margin(4, 4, 0, 0);
            bar
        }))?;

        if let Some(highlight) = &data.highlight {
            chart.draw_series(std::iter::once(Text::new(
                highlight.text.clone(),
                (highlight.y * 0.6, SegmentValue::CenterOf(row_of(highlight.x))),
                (FONT, 16, FontStyle::Bold),
            )))?;
        }

        root.present()?;
        Ok(())
    }

    fn builder<'a, DB: DrawingBackend>(
        root: &'a DrawingArea<DB, Shift>,
        title: &str,
    ) -> ChartBuilder<'a, 'static, DB> {
        let mut builder = ChartBuilder::on(root);
        builder
            .caption(title, (FONT, 26, FontStyle::Bold))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70);
        builder
    }
}

/// Category name for a segment centre on an index axis.
fn segment_label(labels: &[&str], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| labels.get(i))
            .map(|label| label.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn data_error(chart: &'static str, source: DataError) -> RenderError {
    RenderError::Data { chart, source }
}

fn draw_error(chart: &'static str, error: Box<dyn std::error::Error>) -> RenderError {
    RenderError::Draw {
        chart,
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_paths() {
        let dir = Path::new("charts");
        assert_eq!(
            StaticChartRenderer::chart_path(dir, PRICE_BY_TYPE),
            PathBuf::from("charts/price_by_type.png")
        );
    }

    #[test]
    fn test_segment_labels() {
        let labels = ["4", "8"];
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(1)), "8");
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(5)), "");
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(-1)), "");
        assert_eq!(segment_label(&labels, &SegmentValue::Exact(0)), "");
        assert_eq!(segment_label(&labels, &SegmentValue::Last), "");
    }

    #[test]
    fn test_type_axis_labels_follow_group_order() {
        let table = crate::data::fixtures::cleaned_table(&[
            "HP,Notebook,15.6,8GB,2.5GHz,256,,,,600,",
            "Apple,Ultrabook,13.3,8GB,2.3GHz,128,,,,1339.69,",
            "MSI,Gaming,17.3,16GB,2.8GHz,512,1000,,,1899,",
        ]);
        let data = ChartPlotter::price_by_type(&table).unwrap();
        let labels: Vec<&str> = data.groups.iter().map(|g| g.label.as_str()).collect();

        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(0)), "Notebook");
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(2)), "Gaming");
        let widest = data.widest.unwrap();
        assert!(!segment_label(&labels, &SegmentValue::CenterOf(widest.x as i32)).is_empty());
    }

    #[test]
    fn test_output_dir_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let table = crate::data::fixtures::cleaned_table(&[
            "Apple,Ultrabook,13.3,8GB,2.3GHz,128,,,,1339.69,",
        ]);

        // A regular file cannot be used as the output directory
        match StaticChartRenderer::render_all(&table, &file.path().join("charts")) {
            Err(RenderError::OutputDir { .. }) => {}
            other => panic!("expected output dir error, got {:?}", other),
        }
    }
}
