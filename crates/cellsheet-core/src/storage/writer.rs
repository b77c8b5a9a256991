//! Writer for .sheet file format

use crate::document::Spreadsheet;
use crate::error::Result;
use cellsheet_engine::engine::CellContents;
use std::fs;
use std::path::Path;

/// Write a spreadsheet to a .sheet file
pub fn write_sheet(path: &Path, sheet: &Spreadsheet) -> Result<()> {
    let content = write_sheet_content(sheet);
    fs::write(path, content)?;
    Ok(())
}

/// Write a spreadsheet to a .sheet format string
pub fn write_sheet_content(sheet: &Spreadsheet) -> String {
    let mut lines = vec!["# Cellsheet Spreadsheet".to_string()];

    for name in sheet.names_by_position() {
        let Ok(contents) = sheet.get_contents(name) else {
            continue;
        };
        let value_str = match contents {
            CellContents::Number(n) => n.to_string(),
            CellContents::Text(s) => format!("\"{}\"", escape_text(s)),
            CellContents::Formula(expr) => format!("={}", expr),
        };
        lines.push(format!("{}: {}", name, value_str));
    }

    lines.join("\n") + "\n"
}

fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}
