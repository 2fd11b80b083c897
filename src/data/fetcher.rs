//! Remote CSV Fetcher Module
//! Downloads raw CSV bytes from Google Drive by file id.

use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;

/// Request timeout for a single download.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch CSV: {0}")]
    Http(#[from] reqwest::Error),
}

/// Blocking HTTP client for the CSV sources. Intended to run on a background
/// thread, never on the UI thread.
pub struct CsvFetcher {
    client: Client,
}

impl CsvFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client })
    }

    /// Download the CSV behind a Google Drive file id and return its bytes.
    pub fn fetch(&self, file_id: &str) -> Result<Vec<u8>, FetchError> {
        let url = drive_export_url(file_id);
        tracing::info!(file_id, "fetching csv source");
        let response = self.client.get(&url).send()?.error_for_status()?;
        let bytes = response.bytes()?;
        tracing::debug!(file_id, len = bytes.len(), "csv source downloaded");
        Ok(bytes.to_vec())
    }
}

/// Direct-download URL for a publicly shared Drive file.
fn drive_export_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={file_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_url_embeds_file_id() {
        assert_eq!(
            drive_export_url("abc123"),
            "https://drive.google.com/uc?export=download&id=abc123"
        );
    }
}
