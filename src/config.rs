//! Dashboard configuration - which datasets to render and where their CSVs
//! live. Ships with the three built-in sources; an optional JSON file given
//! as the first CLI argument overrides the list.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One plotted line within a dataset chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Source column holding the values.
    pub column: String,
    /// Label shown in the chart legend.
    pub label: String,
}

/// A remotely hosted CSV dataset and how to chart it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Cache key, also used to address the dataset internally.
    pub key: String,
    /// Section title above the chart.
    pub title: String,
    /// Google Drive file id of the CSV.
    pub file_id: String,
    /// Columns that must be coerced to numbers for this dataset.
    pub numeric_columns: Vec<String>,
    /// Lines to plot.
    pub series: Vec<SeriesConfig>,
    /// When set, a median reference line over this column is drawn.
    #[serde(default)]
    pub median_column: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub datasets: Vec<DatasetConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            datasets: vec![
                DatasetConfig {
                    key: "subscriptions".to_string(),
                    title: "Subscriptions".to_string(),
                    file_id: "1QO4YoBn3oJ3wes3ka0xIl1OJyY3V6VyB".to_string(),
                    numeric_columns: vec!["total".to_string()],
                    series: vec![SeriesConfig {
                        column: "total".to_string(),
                        label: "Users at start".to_string(),
                    }],
                    median_column: None,
                },
                DatasetConfig {
                    key: "trials".to_string(),
                    title: "Trials".to_string(),
                    file_id: "1AsIIcj-2lYQWXHfPoMWsdtA46nqUbduH".to_string(),
                    numeric_columns: vec!["active".to_string()],
                    series: vec![SeriesConfig {
                        column: "active".to_string(),
                        label: "Trials".to_string(),
                    }],
                    median_column: Some("active".to_string()),
                },
                DatasetConfig {
                    key: "students".to_string(),
                    title: "Students".to_string(),
                    file_id: "1gJTkWUssnOKKlBSIxk6rQETuEaFTA9EL".to_string(),
                    numeric_columns: vec!["total".to_string()],
                    series: vec![SeriesConfig {
                        column: "total".to_string(),
                        label: "Students".to_string(),
                    }],
                    median_column: None,
                },
            ],
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise the built-in dataset list.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_three_datasets() {
        let config = DashboardConfig::default();
        let keys: Vec<&str> = config.datasets.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["subscriptions", "trials", "students"]);
    }

    #[test]
    fn only_trials_gets_a_median_line() {
        let config = DashboardConfig::default();
        for dataset in &config.datasets {
            assert_eq!(dataset.median_column.is_some(), dataset.key == "trials");
        }
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = DashboardConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: DashboardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.datasets.len(), config.datasets.len());
        assert_eq!(parsed.datasets[1].median_column, Some("active".to_string()));
    }
}
