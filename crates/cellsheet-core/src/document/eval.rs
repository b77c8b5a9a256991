use super::Spreadsheet;
use cellsheet_engine::engine::CellValue;

impl Spreadsheet {
    /// Recompute formula values along `order`.
    ///
    /// `order` must list every cell after the cells it reads, as produced by
    /// `cells_to_recalculate`. Text and number cells already hold their value.
    pub(crate) fn recalculate(&mut self, order: &[String]) {
        for name in order {
            let Some(expr) = self
                .cells
                .get(name)
                .and_then(|cell| cell.contents.as_formula())
            else {
                continue;
            };

            let value = CellValue::from(expr.evaluate(|var| self.number_of(var)));
            log::trace!("{} = {:?}", name, value);

            if let Some(cell) = self.cells.get_mut(name) {
                cell.value = value;
            }
        }
    }

    /// The numeric value of a cell, if it has one.
    fn number_of(&self, name: &str) -> Option<f64> {
        self.cells.get(name).and_then(|cell| cell.value.as_number())
    }
}
