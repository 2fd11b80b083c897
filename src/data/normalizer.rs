//! Time-Series Normalizer Module
//! Turns a raw table into a clean, sorted, range-filtered one ready for
//! plotting: `date` parsed, declared metric columns coerced to f64.

use crate::daterange::DateRange;
use chrono::NaiveDate;
use polars::prelude::*;
use thiserror::Error;

/// Calendar-date format of the `date` column in every source.
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Table has no '{0}' column")]
    MissingColumn(String),
}

/// Normalize a raw table against a date range.
///
/// Policy, row by row:
/// - a `date` cell that does not parse as `%Y-%m-%d` drops the whole row;
/// - a declared numeric cell that does not coerce becomes `0.0`, the row stays;
/// - surviving rows are sorted ascending by date and filtered to
///   `[range.start, range.end]`, inclusive on both ends.
///
/// The input is never mutated; the result is a fresh DataFrame with a
/// Date-typed `date` column and one f64 column per declared metric. A missing
/// `date` or declared metric column is a hard error.
pub fn normalize(
    df: &DataFrame,
    numeric_cols: &[String],
    range: &DateRange,
) -> Result<DataFrame, NormalizerError> {
    let date_col = df
        .column("date")
        .map_err(|_| NormalizerError::MissingColumn("date".to_string()))?;
    let date_str = date_col.cast(&DataType::String)?;
    let date_ca = date_str.str()?;

    // Non-strict casts: unparseable cells become null, coerced to 0.0 below.
    let mut metric_cas: Vec<Float64Chunked> = Vec::with_capacity(numeric_cols.len());
    for name in numeric_cols {
        let col = df
            .column(name)
            .map_err(|_| NormalizerError::MissingColumn(name.clone()))?;
        metric_cas.push(col.cast(&DataType::Float64)?.f64()?.clone());
    }

    let mut rows: Vec<(NaiveDate, Vec<f64>)> = Vec::with_capacity(df.height());
    let mut dropped = 0usize;
    for i in 0..df.height() {
        let parsed = date_ca
            .get(i)
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok());
        let Some(date) = parsed else {
            dropped += 1;
            continue;
        };
        if !range.contains(date) {
            continue;
        }
        let values = metric_cas
            .iter()
            .map(|ca| ca.get(i).unwrap_or(0.0))
            .collect();
        rows.push((date, values));
    }
    if dropped > 0 {
        tracing::debug!(dropped, "rows with unparseable dates excluded");
    }

    rows.sort_by_key(|(date, _)| *date);

    let dates = DateChunked::from_naive_date(
        "date".into(),
        rows.iter().map(|(date, _)| *date),
    );
    let mut columns = vec![dates.into_series().into_column()];
    for (idx, name) in numeric_cols.iter().enumerate() {
        let values: Vec<f64> = rows.iter().map(|(_, row)| row[idx]).collect();
        columns.push(Column::new(name.as_str().into(), values));
    }

    Ok(DataFrame::new(columns)?)
}
