//! Spreadsheet engine API.
//!
//! This module provides the computation core of the spreadsheet:
//!
//! - [`Token`], [`tokenize`] - Lexical analysis of formula text
//! - [`Expression`] - Validated infix formulas, their variables and evaluation
//! - [`CellName`], [`normalize`] - Cell name syntax and canonical case
//! - [`CellContents`], [`CellValue`] - What a cell holds and what it displays
//! - [`DependencyGraph`] - Bidirectional edge index between cells
//! - [`cells_to_recalculate`] - Recalculation order and cycle detection
//! - [`format_number`], [`format_value`] - Format values for display

mod cell;
mod cell_name;
mod deps;
mod error;
mod eval;
mod expression;
mod format;
mod recalc;
mod token;

pub use cell::{CellContents, CellValue, EMPTY_CONTENTS, EMPTY_VALUE};
pub use cell_name::{CellName, is_cell_name, normalize};
pub use deps::DependencyGraph;
pub use error::{CycleError, EvalError, FormatError};
pub use expression::Expression;
pub use format::{format_number, format_value};
pub use recalc::cells_to_recalculate;
pub use token::{Token, is_variable, tokenize};
