//! cellsheet-core - UI-agnostic cell store + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::Spreadsheet;
pub use error::{Result, SheetError};

pub use cellsheet_engine::engine::{CellContents, CellName, CellValue, EvalError, Expression};
