use thiserror::Error;

/// Errors surfaced by the data store
///
/// Loads never error by design — a bad file degrades to an empty table
/// with a diagnostic. Saves report the failed path so callers can tell
/// the user exactly which file did not flush.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to save {path}: {source}")]
    Save {
        path: String,
        source: staybook_table::TableError,
    },

    #[error("Unsupported file extension: {path}")]
    UnsupportedFormat { path: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
