//! Dataset Pipeline Module
//! Composes cached raw tables, the normalizer and the stats layer into
//! chart-ready data, one independent result per dataset.

use crate::config::DatasetConfig;
use crate::data::{self, NormalizerError, SourceCache};
use crate::daterange::DateRange;
use crate::stats::{self, StatsError};
use chrono::NaiveDate;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Source not loaded yet")]
    NotLoaded,
    #[error(transparent)]
    Normalize(#[from] NormalizerError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Chart-ready view of one dataset over the selected range.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetChart {
    pub key: String,
    pub title: String,
    pub series: Vec<ChartSeries>,
    /// Median reference value, when the dataset asks for one.
    pub median: Option<f64>,
}

/// Build the chart for a single dataset from its cached raw table.
pub fn build_chart(
    cache: &SourceCache,
    dataset: &DatasetConfig,
    range: &DateRange,
) -> Result<DatasetChart, PipelineError> {
    let raw = cache.get(&dataset.key).ok_or(PipelineError::NotLoaded)?;
    let table = data::normalize(&raw, &dataset.numeric_columns, range)?;

    let mut series = Vec::with_capacity(dataset.series.len());
    for line in &dataset.series {
        series.push(ChartSeries {
            label: line.label.clone(),
            points: stats::date_value_points(&table, &line.column)?,
        });
    }

    let median = match &dataset.median_column {
        Some(column) => Some(stats::median_of_column(&table, column)?),
        None => None,
    };

    Ok(DatasetChart {
        key: dataset.key.clone(),
        title: dataset.title.clone(),
        series,
        median,
    })
}

/// Rebuild all dataset charts for a range. Datasets are processed in
/// parallel and fail independently; callers render whatever succeeded.
pub fn build_charts(
    cache: &SourceCache,
    datasets: &[DatasetConfig],
    range: &DateRange,
) -> Vec<(String, Result<DatasetChart, PipelineError>)> {
    datasets
        .par_iter()
        .map(|dataset| (dataset.key.clone(), build_chart(cache, dataset, range)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeriesConfig;
    use polars::df;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn trials_dataset() -> DatasetConfig {
        DatasetConfig {
            key: "trials".to_string(),
            title: "Trials".to_string(),
            file_id: "unused".to_string(),
            numeric_columns: vec!["active".to_string()],
            series: vec![SeriesConfig {
                column: "active".to_string(),
                label: "Trials".to_string(),
            }],
            median_column: Some("active".to_string()),
        }
    }

    fn students_dataset() -> DatasetConfig {
        DatasetConfig {
            key: "students".to_string(),
            title: "Students".to_string(),
            file_id: "unused".to_string(),
            numeric_columns: vec!["total".to_string()],
            series: vec![SeriesConfig {
                column: "total".to_string(),
                label: "Students".to_string(),
            }],
            median_column: None,
        }
    }

    #[test]
    fn chart_carries_filtered_points_and_median() {
        let cache = SourceCache::new();
        cache.put(
            "trials",
            df!(
                "date" => ["2024-01-01", "bad", "2024-01-15"],
                "active" => ["10", "5", "20"],
            )
            .unwrap(),
        );
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31));

        let chart = build_chart(&cache, &trials_dataset(), &range).unwrap();
        assert_eq!(chart.series.len(), 1);
        assert_eq!(
            chart.series[0].points,
            vec![(d(2024, 1, 1), 10.0), (d(2024, 1, 15), 20.0)]
        );
        assert_eq!(chart.median, Some(15.0));
    }

    #[test]
    fn empty_filtered_range_gives_zero_median() {
        let cache = SourceCache::new();
        cache.put(
            "trials",
            df!("date" => ["2023-06-01"], "active" => [4i64]).unwrap(),
        );
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31));

        let chart = build_chart(&cache, &trials_dataset(), &range).unwrap();
        assert!(chart.series[0].points.is_empty());
        assert_eq!(chart.median, Some(0.0));
    }

    #[test]
    fn one_failing_dataset_does_not_block_the_others() {
        let cache = SourceCache::new();
        // trials never fetched; students malformed; a healthy one alongside.
        cache.put("students", df!("date" => ["2024-01-10"]).unwrap());

        let mut healthy = students_dataset();
        healthy.key = "subscriptions".to_string();
        cache.put(
            "subscriptions",
            df!("date" => ["2024-01-10"], "total" => [3i64]).unwrap(),
        );

        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31));
        let results = build_charts(
            &cache,
            &[trials_dataset(), students_dataset(), healthy],
            &range,
        );

        let by_key: std::collections::HashMap<_, _> = results.into_iter().collect();
        assert!(matches!(
            by_key.get("trials"),
            Some(Err(PipelineError::NotLoaded))
        ));
        assert!(matches!(
            by_key.get("students"),
            Some(Err(PipelineError::Normalize(_)))
        ));
        let chart = by_key["subscriptions"].as_ref().unwrap();
        assert_eq!(chart.series[0].points, vec![(d(2024, 1, 10), 3.0)]);
    }
}
