//! Source Cache Module
//! Process-lifetime memoization of raw tables, keyed by source identifier.

use polars::prelude::DataFrame;
use std::collections::HashMap;
use std::sync::Mutex;

/// Unbounded compute-once cache of raw DataFrames. Repeated loads of the same
/// source within a session reuse the stored table instead of re-fetching.
/// Cloning a DataFrame only clones column pointers, so `get` stays cheap.
#[derive(Default)]
pub struct SourceCache {
    tables: Mutex<HashMap<String, DataFrame>>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<DataFrame> {
        self.tables
            .lock()
            .ok()
            .and_then(|tables| tables.get(key).cloned())
    }

    pub fn put(&self, key: &str, df: DataFrame) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.insert(key.to_string(), df);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tables
            .lock()
            .map(|tables| tables.contains_key(key))
            .unwrap_or(false)
    }
}
