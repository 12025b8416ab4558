use std::path::PathBuf;
use thiserror::Error;

/// Failures while pulling the performance table out of a report page.
///
/// Every variant is fatal for the run. Most of them carry the markup that was
/// being searched so the caller can dump it for diagnosis.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Invalid CSS selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Cannot find anchor \"{selector}\" for the performance table - has the HTML changed?")]
    AnchorNotFound { selector: String, document: String },

    #[error("Cannot find a table inside \"{selector}\"")]
    TableNotFound { selector: String, fragment: String },

    #[error("Cannot find thead in performance table")]
    HeaderSectionMissing { table: String },

    #[error("Cannot find header cells in thead")]
    NoHeaderCells { thead: String },

    #[error("Cannot find expected header \"{column}\"")]
    ColumnMissing { column: String, headers: Vec<String> },

    #[error(
        "Not enough cells to get header \"{column}\" with column number {index} (row has {cells})"
    )]
    RowTooShort {
        column: String,
        index: usize,
        cells: usize,
        row: String,
    },
}

impl ScrapeError {
    /// The markup or header list that explains the failure, if any.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            ScrapeError::InvalidSelector { .. } => None,
            ScrapeError::AnchorNotFound { document, .. } => Some(document.clone()),
            ScrapeError::TableNotFound { fragment, .. } => Some(fragment.clone()),
            ScrapeError::HeaderSectionMissing { table } => Some(table.clone()),
            ScrapeError::NoHeaderCells { thead } => Some(thead.clone()),
            ScrapeError::ColumnMissing { headers, .. } => Some(format!("{:#?}", headers)),
            ScrapeError::RowTooShort { row, .. } => Some(row.clone()),
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read {path}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("key \"{0}\" already exists in existing data. Script has already run?")]
    DuplicateDate(String),

    #[error("Could not read data file \"{}\"", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Data file \"{}\" is not valid JSON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize dataset")]
    Serialize(#[from] serde_json::Error),

    #[error("Could not move \"{}\" to backup \"{}\"", from.display(), to.display())]
    Backup {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write to file \"{}\" - check permissions.", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
