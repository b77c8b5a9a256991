//! Storage for the .sheet file format

mod parser;
mod writer;

pub use parser::{CellRecord, parse_sheet, parse_sheet_content};
pub use writer::{write_sheet, write_sheet_content};
