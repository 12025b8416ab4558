pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod postprocess;
pub mod store;
pub mod table;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::config::Config;
pub use crate::error::{FetchError, ScrapeError, StoreError};
pub use crate::fetch::{fetch_html, read_html};
pub use crate::pipeline::{extract_report, run, RunOptions};
pub use crate::postprocess::{key_rows, strip_percentages, KeyedRow};
pub use crate::store::{Dataset, Store};
pub use crate::table::{extract_headers, extract_rows, locate_table, reconcile_headers, HeaderMap};
