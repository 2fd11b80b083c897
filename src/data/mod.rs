//! Data module - remote CSV fetching, caching and normalization

mod cache;
mod fetcher;
mod loader;
mod normalizer;

pub use cache::SourceCache;
pub use fetcher::{CsvFetcher, FetchError};
pub use loader::{read_csv_bytes, LoaderError};
pub use normalizer::{normalize, NormalizerError};
