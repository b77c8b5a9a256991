use super::Spreadsheet;
use crate::error::{Result, SheetError};
use crate::storage::{parse_sheet, write_sheet};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

impl Spreadsheet {
    /// Open a .sheet file into a new spreadsheet.
    pub fn open(path: &Path) -> Result<Spreadsheet> {
        let mut sheet = Spreadsheet::new();
        sheet.load_file(path)?;
        Ok(sheet)
    }

    /// Replace the whole sheet with `entries`, each a cell name and its
    /// contents as they would be typed.
    ///
    /// The entries are replayed into a fresh sheet with the same name
    /// validator. If any entry fails, nothing changes and the error names the
    /// offending cell.
    pub fn load<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        let mut fresh = Spreadsheet {
            validator: self.validator.clone(),
            ..Spreadsheet::default()
        };
        let mut seen = HashSet::new();

        for (name, contents) in entries {
            fresh
                .load_entry(&name, contents, &mut seen)
                .map_err(|source| {
                    log::warn!("load rejected at {}: {}", name, source);
                    SheetError::Load {
                        cell: name.clone(),
                        source: Box::new(source),
                    }
                })?;
        }

        fresh.file_path = self.file_path.take();
        fresh.changed = false;
        log::debug!("loaded {} cells", fresh.len());
        *self = fresh;
        Ok(())
    }

    fn load_entry(
        &mut self,
        name: &str,
        contents: Option<String>,
        seen: &mut HashSet<String>,
    ) -> Result<()> {
        let contents = contents.ok_or(SheetError::MissingArgument("cell contents"))?;
        let key = self.cell_name(name)?;
        if !seen.insert(key.as_str().to_string()) {
            return Err(SheetError::DuplicateCell(key.to_string()));
        }
        self.set_contents(key.as_str(), &contents)?;
        Ok(())
    }

    /// Every non-empty cell as `(name, contents)`, contents written the way
    /// they would be typed back in.
    pub fn entries(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.cells
            .iter()
            .map(|(name, cell)| (name.clone(), cell.contents.to_input_string()))
    }

    /// Load from file
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let records = parse_sheet(path)?;
        self.load(records.into_iter().map(|r| (r.name, r.contents)))?;
        self.file_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Save to `path` and remember it as the current file.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        write_sheet(path, self)?;
        self.file_path = Some(path.to_path_buf());
        self.changed = false;
        log::debug!("saved {} cells to {}", self.len(), path.display());
        Ok(())
    }

    /// Save to current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = self.file_path.clone() else {
            return Err(SheetError::NoFilePath);
        };
        self.save(&path)?;
        Ok(path)
    }
}
