//! Charts module - chart specs and rendering

mod plotter;
mod renderer;
mod spec;

pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use spec::{ChartKind, ChartSpec};
