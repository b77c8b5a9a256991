use crate::error::{Result, SheetError};
use cellsheet_engine::engine::{CellContents, CellName, CellValue, DependencyGraph};
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A non-empty cell: what was entered and what it evaluates to.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    pub(crate) contents: CellContents,
    pub(crate) value: CellValue,
}

impl Cell {
    /// Text and numbers are their own value; formulas start out pending
    /// and are filled in by recalculation.
    pub(crate) fn new(contents: CellContents) -> Cell {
        let value = match &contents {
            CellContents::Text(s) => CellValue::Text(s.clone()),
            CellContents::Number(n) => CellValue::Number(*n),
            CellContents::Formula(_) => CellValue::Text(String::new()),
        };
        Cell { contents, value }
    }
}

/// UI-agnostic spreadsheet state.
///
/// Owns the cell table and the dependency graph. Every mutation goes through
/// [`Spreadsheet::set_contents`] (or a load), which keeps cached values
/// consistent with formulas.
#[derive(Clone, Debug, Default)]
pub struct Spreadsheet {
    /// Non-empty cells keyed by normalized name
    pub(crate) cells: HashMap<String, Cell>,
    /// Edge `(a, b)` means the formula in `a` references `b`
    pub(crate) graph: DependencyGraph,
    /// Extra constraint on normalized names, on top of cell-name syntax
    pub(crate) validator: Option<Regex>,
    /// Where the sheet was last loaded from or saved to
    pub(crate) file_path: Option<PathBuf>,
    /// Whether the sheet changed since it was last saved or loaded
    pub(crate) changed: bool,
}

impl Spreadsheet {
    /// Create an empty spreadsheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty spreadsheet whose cell names must also match `validator`.
    ///
    /// The regex is applied to the upper-cased name with `is_match`, so anchor
    /// it if it has to cover the whole name.
    pub fn with_validator(validator: Regex) -> Self {
        Spreadsheet {
            validator: Some(validator),
            ..Self::default()
        }
    }

    /// Whether the sheet changed since it was last saved or loaded.
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether a normalized name passes the embedding validator.
    pub(crate) fn accepts(&self, normalized: &str) -> bool {
        self.validator
            .as_ref()
            .is_none_or(|re| re.is_match(normalized))
    }

    /// Check and normalize a raw cell name.
    pub(crate) fn cell_name(&self, raw: &str) -> Result<CellName> {
        CellName::parse(raw)
            .filter(|name| self.accepts(name.as_str()))
            .ok_or_else(|| SheetError::InvalidName(raw.to_string()))
    }
}
