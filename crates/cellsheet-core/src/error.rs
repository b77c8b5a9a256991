//! Error types for Cellsheet core.

use cellsheet_engine::engine::{CycleError, FormatError};
use thiserror::Error;

/// Errors that abort a spreadsheet operation, leaving the sheet unchanged.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid cell name: {0:?}")]
    InvalidName(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Invalid formula: {0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    CircularDependency(#[from] CycleError),

    #[error("Duplicate cell {0}")]
    DuplicateCell(String),

    #[error("Failed to load cell {cell}: {source}")]
    Load {
        cell: String,
        #[source]
        source: Box<SheetError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("No file path set")]
    NoFilePath,
}

pub type Result<T> = std::result::Result<T, SheetError>;
