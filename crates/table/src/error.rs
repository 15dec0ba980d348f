use thiserror::Error;

/// Errors that can occur during table operations
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column not found: {name}")]
    ColumnNotFound { name: String },

    #[error("Workbook has no worksheets: {path}")]
    EmptyWorkbook { path: String },

    #[error("Spreadsheet error: {0}")]
    Xlsx(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
