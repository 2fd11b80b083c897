//! Stats module - summary statistics over normalized tables

mod calculator;

pub use calculator::{column_values, date_value_points, median_of_column, StatsError};
