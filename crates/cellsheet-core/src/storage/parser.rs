//! Parser for .sheet file format
//!
//! One `NAME: CONTENTS` record per line. Blank lines and lines starting with
//! `#` are skipped. Contents are a bare number, `=` followed by a formula, or
//! text in double quotes with `\"`, `\\` and `\n` escapes. An empty value
//! clears the cell.

use crate::error::{Result, SheetError};
use std::fs;
use std::path::Path;

/// One stored cell, before its name or formula has been checked.
#[derive(Clone, Debug, PartialEq)]
pub struct CellRecord {
    /// 1-based line number in the source
    pub line: usize,
    pub name: String,
    /// Contents as they would be typed into the cell; `None` when the line
    /// has no `:` separator.
    pub contents: Option<String>,
}

/// Parse a .sheet file into records
pub fn parse_sheet(path: &Path) -> Result<Vec<CellRecord>> {
    let content = fs::read_to_string(path)?;
    parse_sheet_content(&content)
}

/// Parse .sheet content from a string
pub fn parse_sheet_content(content: &str) -> Result<Vec<CellRecord>> {
    let mut records = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((name, value)) = line.split_once(':') else {
            records.push(CellRecord {
                line: line_num,
                name: line.to_string(),
                contents: None,
            });
            continue;
        };

        records.push(CellRecord {
            line: line_num,
            name: name.trim().to_string(),
            contents: Some(parse_cell_value(value, line_num)?),
        });
    }

    Ok(records)
}

/// Turn a stored value back into cell input
fn parse_cell_value(value: &str, line_num: usize) -> Result<String> {
    let value = value.trim();

    if value.is_empty() || value.starts_with('=') {
        return Ok(value.to_string());
    }

    if let Some(quoted) = value.strip_prefix('"') {
        let Some(text) = quoted.strip_suffix('"') else {
            return Err(SheetError::Parse {
                line: line_num,
                message: format!("Unterminated text: {}", value),
            });
        };
        return unescape_text(text).ok_or_else(|| SheetError::Parse {
            line: line_num,
            message: format!("Unescaped quote or trailing backslash in text: {}", value),
        });
    }

    if value.parse::<f64>().is_ok_and(f64::is_finite) {
        return Ok(value.to_string());
    }

    Err(SheetError::Parse {
        line: line_num,
        message: format!("Invalid value: {}. Use quotes for text.", value),
    })
}

/// Undo text escaping. `None` if the text has a bare `"` or ends in a lone
/// backslash, either of which means the closing quote was not where it looks.
fn unescape_text(input: &str) -> Option<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => return None,
            '\\' => match chars.next()? {
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                'n' => out.push('\n'),
                next => {
                    out.push('\\');
                    out.push(next);
                }
            },
            _ => out.push(ch),
        }
    }
    Some(out)
}
