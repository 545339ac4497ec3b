//! Minimal grid access used by the fill passes.
//!
//! [`XlsxBook`] is the on-disk grid the facade edits in place; [`XlsxSheet`]
//! is an in-memory grid.

use fillsheet_io_xlsx::{SpecCellFormat, XlsxBook, XlsxSheet};

/// Cell-level access to one worksheet, 1-based rows and columns.
///
/// Row 0 and column 0 read as blank and are never written.
pub trait SheetGrid {
    /// Highest used row number.
    fn row_count(&self) -> u32;

    /// Cell text, `None` when blank.
    fn cell(&self, row: u32, col: u32) -> Option<String>;

    /// Replace the cell value; `None` clears it.
    fn set_cell(&mut self, row: u32, col: u32, value: Option<String>);

    /// Apply `format` to the cell style.
    fn set_style(&mut self, row: u32, col: u32, format: &SpecCellFormat);
}

impl SheetGrid for XlsxSheet {
    fn row_count(&self) -> u32 {
        XlsxSheet::row_count(self)
    }

    fn cell(&self, row: u32, col: u32) -> Option<String> {
        self.cell_text(row, col)
    }

    fn set_cell(&mut self, row: u32, col: u32, value: Option<String>) {
        XlsxSheet::set_cell(self, row, col, value);
    }

    fn set_style(&mut self, row: u32, col: u32, format: &SpecCellFormat) {
        self.set_format(row, col, format.clone());
    }
}

impl SheetGrid for XlsxBook {
    fn row_count(&self) -> u32 {
        XlsxBook::row_count(self)
    }

    fn cell(&self, row: u32, col: u32) -> Option<String> {
        self.cell_text(row, col)
    }

    fn set_cell(&mut self, row: u32, col: u32, value: Option<String>) {
        self.set_cell_text(row, col, value);
    }

    fn set_style(&mut self, row: u32, col: u32, format: &SpecCellFormat) {
        self.set_cell_format(row, col, format);
    }
}
