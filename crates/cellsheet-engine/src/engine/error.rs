//! Error types produced by the engine.

use thiserror::Error;

/// A formula that is lexically or grammatically invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("formula contains no tokens")]
    Empty,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("invalid number literal: {0}")]
    InvalidNumber(String),

    #[error("cannot have {prev} followed by {next}")]
    Adjacency { prev: String, next: String },

    #[error("too many closing parentheses")]
    UnbalancedClose,

    #[error("unclosed parentheses ({0} left open)")]
    UnbalancedOpen(usize),

    #[error("first token must be a number, variable, or opening parenthesis, found {0}")]
    BadFirstToken(String),

    #[error("last token must be a number, variable, or closing parenthesis, found {0}")]
    BadLastToken(String),

    #[error("variable {original} normalizes to {normalized}, which is not a variable")]
    BadNormalization { original: String, normalized: String },

    #[error("variable {0} is not allowed here")]
    InvalidVariable(String),
}

/// A failure while evaluating a well-formed expression.
///
/// Stored as a cell value, so it is cheap to clone and compare.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("undefined variable: {0}")]
    UndefinedVariable(String),
}

/// Applying an edit would make a cell depend on itself.
///
/// `path` starts at the edited cell and ends at the cell that closes the loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("circular dependency: {}", path.join(" -> "))]
pub struct CycleError {
    pub path: Vec<String>,
}

impl CycleError {
    /// The cell whose edit was rejected.
    pub fn cell(&self) -> &str {
        self.path.first().map(String::as_str).unwrap_or_default()
    }
}
