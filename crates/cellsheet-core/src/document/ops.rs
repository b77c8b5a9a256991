use super::Spreadsheet;
use super::state::Cell;
use crate::error::Result;
use cellsheet_engine::engine::{
    CellContents, CellName, CellValue, EMPTY_CONTENTS, EMPTY_VALUE, cells_to_recalculate, is_cell_name,
};

impl Spreadsheet {
    /// Set the contents of a cell from raw input.
    ///
    /// Numbers become numeric cells, text starting with `=` becomes a formula,
    /// anything else is text; the empty string clears the cell. Returns the
    /// cell plus every cell that transitively depends on it, in the order their
    /// values were recomputed (each after the cells it reads).
    ///
    /// An invalid name, a malformed formula or a circular reference fails the
    /// call and leaves the sheet exactly as it was.
    pub fn set_contents(&mut self, name: &str, input: &str) -> Result<Vec<String>> {
        let name = self.cell_name(name)?;
        let contents = CellContents::from_input(input, |var| {
            is_cell_name(var) && self.accepts(var)
        })?;
        let name = name.as_str();

        let previous: Vec<String> = self.graph.dependents_of(name).map(String::from).collect();
        let references = contents
            .as_ref()
            .and_then(CellContents::as_formula)
            .map(|expr| expr.variables())
            .unwrap_or_default();
        self.graph.replace_dependents(name, references);

        let order = match cells_to_recalculate(&self.graph, name) {
            Ok(order) => order,
            Err(cycle) => {
                log::warn!("rejected edit of {}: {}", name, cycle);
                self.graph.replace_dependents(name, previous);
                return Err(cycle.into());
            }
        };

        match contents {
            Some(contents) => {
                self.cells.insert(name.to_string(), Cell::new(contents));
            }
            None => {
                self.cells.remove(name);
            }
        }
        self.changed = true;

        log::debug!("set {} = {:?}, recalculating {:?}", name, input, order);
        self.recalculate(&order);
        Ok(order)
    }

    /// The contents of a cell; an empty cell reads back as empty text.
    pub fn get_contents(&self, name: &str) -> Result<&CellContents> {
        let name = self.cell_name(name)?;
        Ok(self
            .cells
            .get(name.as_str())
            .map_or(&EMPTY_CONTENTS, |cell| &cell.contents))
    }

    /// The value of a cell; an empty cell has the empty text value.
    pub fn get_value(&self, name: &str) -> Result<&CellValue> {
        let name = self.cell_name(name)?;
        Ok(self
            .cells
            .get(name.as_str())
            .map_or(&EMPTY_VALUE, |cell| &cell.value))
    }

    /// Names of all non-empty cells, in no particular order.
    pub fn names_of_nonempty_cells(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.keys().map(String::as_str)
    }

    /// Names of all non-empty cells ordered by row, then column.
    pub fn names_by_position(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names_of_nonempty_cells().collect();
        names.sort_by_key(|name| {
            let position = CellName::parse(name)
                .and_then(|n| n.coords())
                .map_or((usize::MAX, usize::MAX), |(col, row)| (row, col));
            (position, *name)
        });
        names
    }

    /// Cells whose formulas reference `name` directly.
    pub fn direct_dependents(&self, name: &str) -> Result<Vec<String>> {
        let name = self.cell_name(name)?;
        Ok(self
            .graph
            .dependees_of(name.as_str())
            .map(String::from)
            .collect())
    }
}
