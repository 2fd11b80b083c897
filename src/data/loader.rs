//! CSV Data Loader Module
//! Parses fetched CSV bytes into a Polars DataFrame.

use polars::prelude::*;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Source has no '{0}' column")]
    MissingColumn(String),
    #[error("Source is empty")]
    NoData,
}

/// Parse raw CSV bytes into a DataFrame.
///
/// The table must carry a `date` column; anything else is a hard error for
/// this source. Individually malformed rows are the normalizer's business.
pub fn read_csv_bytes(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    if df.height() == 0 && df.width() == 0 {
        return Err(LoaderError::NoData);
    }
    if df.column("date").is_err() {
        return Err(LoaderError::MissingColumn("date".to_string()));
    }

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_csv() {
        let bytes = b"date,total\n2024-01-01,10\n2024-01-02,12\n".to_vec();
        let df = read_csv_bytes(bytes).unwrap();
        assert_eq!(df.height(), 2);
        assert!(df.column("date").is_ok());
        assert!(df.column("total").is_ok());
    }

    #[test]
    fn rejects_table_without_date_column() {
        let bytes = b"day,total\n2024-01-01,10\n".to_vec();
        let err = read_csv_bytes(bytes).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(col) if col == "date"));
    }

    #[test]
    fn rejects_empty_input() {
        let err = read_csv_bytes(Vec::new()).unwrap_err();
        assert!(matches!(err, LoaderError::CsvError(_) | LoaderError::NoData));
    }
}
