//! Date range module - preset resolution and range validation

mod resolver;

pub use resolver::{history_floor, resolve, resolve_preset, DateRange, Preset};
