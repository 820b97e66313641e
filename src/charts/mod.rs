//! Charts module - Chart specifications, builders and renderers

mod builder;
mod plotter;
mod renderer;
pub mod spec;

pub use builder::ChartBuilder;
pub use plotter::{ChartPlotter, ChartState};
pub use renderer::PlotlyRenderer;
pub use spec::ChartSpec;
