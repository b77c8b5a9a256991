//! Cell name syntax and normalization.
//!
//! A cell name is one or more letters followed by a digit run without a
//! leading zero (`A1`, `bc12`). Names are case-insensitive; the canonical form
//! is upper case. [`CellName::parse`] is the single place where raw names are
//! checked and normalized.
//!
//! # Examples
//!
//! ```
//! use cellsheet_engine::engine::CellName;
//!
//! let name = CellName::parse("b3").unwrap();
//! assert_eq!(name.as_str(), "B3");
//! assert_eq!(name.coords(), Some((1, 2)));
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::OnceLock;

fn cell_name_re() -> &'static Regex {
    static CELL_NAME_RE: OnceLock<Regex> = OnceLock::new();
    CELL_NAME_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[1-9][0-9]*)$")
            .expect("cell name regex must compile")
    })
}

/// Returns true if `name` has cell-name syntax (case-insensitive).
pub fn is_cell_name(name: &str) -> bool {
    cell_name_re().is_match(name)
}

/// Canonical case for cell and variable names.
pub fn normalize(name: &str) -> String {
    name.to_ascii_uppercase()
}

/// A syntactically valid, normalized cell name.
#[derive(Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellName(String);

impl CellName {
    /// Check and normalize a raw name. Returns None if the syntax is wrong.
    pub fn parse(raw: &str) -> Option<CellName> {
        if is_cell_name(raw) {
            Some(CellName(normalize(raw)))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Zero-based (column, row) of this name, or None if it does not fit in `usize`.
    pub fn coords(&self) -> Option<(usize, usize)> {
        let caps = cell_name_re().captures(&self.0)?;

        let mut col_acc = 0usize;
        for c in caps["letters"].bytes() {
            let digit = (c - b'A') as usize + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        let col = col_acc.checked_sub(1)?;
        let row = caps["numbers"].parse::<usize>().ok()?.checked_sub(1)?;

        Some((col, row))
    }

    /// Convert column index to letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }

    /// Build a name from zero-based coordinates.
    pub fn from_coords(col: usize, row: usize) -> CellName {
        CellName(format!("{}{}", Self::col_to_letters(col), row as u128 + 1))
    }
}

impl fmt::Display for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CellName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CellName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for CellName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid cell name: {}", s))
    }
}

impl TryFrom<String> for CellName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellName> for String {
    fn from(name: CellName) -> Self {
        name.0
    }
}
