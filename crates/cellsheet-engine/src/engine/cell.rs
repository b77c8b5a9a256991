//! Cell contents and values.
//!
//! - [`CellContents`] - what the user entered: text, a number, or a formula
//! - [`CellValue`] - what the cell displays: text, a number, or an evaluation error

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{EvalError, FormatError};
use super::expression::Expression;

/// The user-entered form of a cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellContents {
    Text(String),
    Number(f64),
    Formula(Expression),
}

/// The derived form of a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Error(EvalError),
}

/// Contents of a cell that was never set.
pub static EMPTY_CONTENTS: CellContents = CellContents::Text(String::new());

/// Value of a cell that was never set.
pub static EMPTY_VALUE: CellValue = CellValue::Text(String::new());

impl CellContents {
    /// Classify raw input.
    /// - Empty string -> None (the cell is removed)
    /// - Parses as a finite number -> Number
    /// - Starts with '=' -> Formula (the rest, variables normalized and checked with `is_valid_name`)
    /// - Otherwise -> Text, verbatim
    pub fn from_input<V>(input: &str, is_valid_name: V) -> Result<Option<CellContents>, FormatError>
    where
        V: Fn(&str) -> bool,
    {
        if input.is_empty() {
            return Ok(None);
        }

        if let Ok(n) = input.trim().parse::<f64>() {
            if n.is_finite() {
                return Ok(Some(CellContents::Number(n)));
            }
        }

        if let Some(formula) = input.strip_prefix('=') {
            let expr = Expression::parse_with(formula, super::cell_name::normalize, is_valid_name)?;
            return Ok(Some(CellContents::Formula(expr)));
        }

        Ok(Some(CellContents::Text(input.to_string())))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContents::Text(s) if s.is_empty())
    }

    /// Get the contents as the user would re-enter them.
    pub fn to_input_string(&self) -> String {
        match self {
            CellContents::Text(s) => s.clone(),
            CellContents::Number(n) => n.to_string(),
            CellContents::Formula(expr) => format!("={}", expr.render()),
        }
    }

    pub fn as_formula(&self) -> Option<&Expression> {
        match self {
            CellContents::Formula(expr) => Some(expr),
            _ => None,
        }
    }
}

impl fmt::Display for CellContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_input_string())
    }
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }
}

impl From<Result<f64, EvalError>> for CellValue {
    fn from(result: Result<f64, EvalError>) -> Self {
        match result {
            Ok(n) => CellValue::Number(n),
            Err(e) => CellValue::Error(e),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Error(_) => f.write_str("#ERR!"),
        }
    }
}
