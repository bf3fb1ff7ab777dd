//! Page fetching for the command-line transport.

pub mod fetch;

pub use fetch::{FetchError, FetchResult, PageFetcher};
