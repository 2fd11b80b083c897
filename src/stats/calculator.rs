//! Statistics Calculator Module
//! Extracts plot series from normalized tables and computes the median
//! reference value.

use chrono::NaiveDate;
use polars::prelude::*;
use statrs::statistics::{Data, Median};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Table has no '{0}' column")]
    MissingColumn(String),
}

/// Pull the f64 values of a metric column, skipping nulls.
pub fn column_values(df: &DataFrame, column: &str) -> Result<Vec<f64>, StatsError> {
    let col = df
        .column(column)
        .map_err(|_| StatsError::MissingColumn(column.to_string()))?;
    Ok(col.f64()?.into_iter().flatten().collect())
}

/// Zip the `date` column with a metric column into chart-ready points.
pub fn date_value_points(
    df: &DataFrame,
    column: &str,
) -> Result<Vec<(NaiveDate, f64)>, StatsError> {
    let dates = df
        .column("date")
        .map_err(|_| StatsError::MissingColumn("date".to_string()))?
        .date()?
        .as_date_iter();
    let values = df
        .column(column)
        .map_err(|_| StatsError::MissingColumn(column.to_string()))?
        .f64()?;

    Ok(dates
        .zip(values.into_iter())
        .filter_map(|(date, value)| Some((date?, value?)))
        .collect())
}

/// Median of a metric column over the (already filtered) table.
/// An empty table yields `0.0` by policy, not an error.
pub fn median_of_column(df: &DataFrame, column: &str) -> Result<f64, StatsError> {
    let values = column_values(df, column)?;
    if values.is_empty() {
        return Ok(0.0);
    }
    Ok(Data::new(values).median())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn median_of_odd_sample() {
        let df = df!("active" => [10.0, 20.0, 15.0]).unwrap();
        assert_eq!(median_of_column(&df, "active").unwrap(), 15.0);
    }

    #[test]
    fn median_of_even_sample_interpolates() {
        let df = df!("active" => [10.0, 20.0]).unwrap();
        assert_eq!(median_of_column(&df, "active").unwrap(), 15.0);
    }

    #[test]
    fn median_of_empty_table_is_zero() {
        let df = df!("active" => Vec::<f64>::new()).unwrap();
        assert_eq!(median_of_column(&df, "active").unwrap(), 0.0);
    }

    #[test]
    fn median_of_missing_column_is_an_error() {
        let df = df!("total" => [1.0]).unwrap();
        assert!(matches!(
            median_of_column(&df, "active").unwrap_err(),
            StatsError::MissingColumn(_)
        ));
    }

    #[test]
    fn points_pair_dates_with_values() {
        use crate::daterange::DateRange;
        use chrono::NaiveDate;

        let raw = df!(
            "date" => ["2024-01-01", "2024-01-15"],
            "active" => ["10", "20"],
        )
        .unwrap();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        let table = crate::data::normalize(&raw, &["active".to_string()], &range).unwrap();

        let points = date_value_points(&table, "active").unwrap();
        assert_eq!(
            points,
            vec![
                (NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 10.0),
                (NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), 20.0),
            ]
        );
    }
}
