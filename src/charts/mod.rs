//! Charts module - line chart rendering

mod plotter;

pub use plotter::{ChartPlotter, MEDIAN_COLOR};
