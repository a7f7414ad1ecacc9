//! Charts module - Chart data preparation and rendering

mod plotter;
mod renderer;

pub use renderer::StaticChartRenderer;
