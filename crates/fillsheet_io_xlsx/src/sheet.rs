//! In-memory sheet and document model.
//!
//! [`XlsxDocument::save`] authors a new workbook from scratch. Editing an
//! existing file goes through [`crate::book::XlsxBook`] instead.
//!
//! Rows and columns are 1-based throughout, matching spreadsheet addressing.
//! Conversion to rust_xlsxwriter's 0-based indices happens only in
//! [`crate::writer`].

use std::collections::BTreeMap;
use std::path::Path;

use crate::conf::C_SHEET_NAME_DEFAULT;
use crate::spec::{EnumCellValue, SpecCell, SpecCellFormat, SpecXlsxReport, XlsxIoError};
use crate::writer::XlsxWriter;

////////////////////////////////////////////////////////////////////////////////
// #region Sheet

/// Sparse cell store for one worksheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XlsxSheet {
    name: String,
    dict_cells: BTreeMap<(u32, u32), SpecCell>,
    n_rows: u32,
}

impl XlsxSheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dict_cells: BTreeMap::new(),
            n_rows: 0,
        }
    }

    /// Build a sheet from text rows, starting at row 1 column 1.
    ///
    /// Empty strings become blank cells.
    pub fn from_rows<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let mut sheet = Self::new(name);
        for (n_idx_row, row) in rows.into_iter().enumerate() {
            for (n_idx_col, value) in row.into_iter().enumerate() {
                let c_value = value.as_ref();
                if c_value.is_empty() {
                    continue;
                }
                sheet.set_cell(n_idx_row as u32 + 1, n_idx_col as u32 + 1, c_value);
            }
        }
        sheet
    }

    /// Sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Highest row number holding a value or format (0 for an empty sheet).
    pub fn row_count(&self) -> u32 {
        self.n_rows
    }

    /// Stored cell, if any.
    pub fn cell(&self, row: u32, col: u32) -> Option<&SpecCell> {
        self.dict_cells.get(&(row, col))
    }

    /// Cell value, [`EnumCellValue::None`] for missing cells.
    pub fn cell_value(&self, row: u32, col: u32) -> &EnumCellValue {
        static NONE: EnumCellValue = EnumCellValue::None;
        self.cell(row, col).map_or(&NONE, |cell| &cell.value)
    }

    /// Cell rendered as text, `None` when blank.
    pub fn cell_text(&self, row: u32, col: u32) -> Option<String> {
        self.cell_value(row, col).to_text()
    }

    /// Explicit cell format, if any.
    pub fn cell_format(&self, row: u32, col: u32) -> Option<&SpecCellFormat> {
        self.cell(row, col).and_then(|cell| cell.format.as_ref())
    }

    /// Set a cell value. Row/column 0 are ignored.
    ///
    /// Blank values drop the cell unless it still carries a format.
    pub fn set_cell(&mut self, row: u32, col: u32, value: impl Into<EnumCellValue>) {
        if row == 0 || col == 0 {
            return;
        }
        let value = value.into();
        if value.is_blank() {
            if let Some(cell) = self.dict_cells.get_mut(&(row, col)) {
                cell.value = EnumCellValue::None;
                if cell.format.is_none() {
                    self.dict_cells.remove(&(row, col));
                }
            }
            return;
        }
        self.dict_cells.entry((row, col)).or_default().value = value;
        self.n_rows = self.n_rows.max(row);
    }

    /// Replace the explicit format of a cell. Row/column 0 are ignored.
    pub fn set_format(&mut self, row: u32, col: u32, format: SpecCellFormat) {
        if row == 0 || col == 0 {
            return;
        }
        self.dict_cells.entry((row, col)).or_default().format = Some(format);
        self.n_rows = self.n_rows.max(row);
    }

    /// Iterate stored cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, &SpecCell)> {
        self.dict_cells
            .iter()
            .map(|((row, col), cell)| (*row, *col, cell))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Document

/// Ordered worksheets of one workbook; the first sheet is the active one.
#[derive(Debug, Clone, PartialEq)]
pub struct XlsxDocument {
    l_sheets: Vec<XlsxSheet>,
}

impl Default for XlsxDocument {
    fn default() -> Self {
        Self::from_sheets(Vec::new())
    }
}

impl XlsxDocument {
    /// Wrap sheets into a document. An empty list yields one blank sheet.
    pub fn from_sheets(sheets: Vec<XlsxSheet>) -> Self {
        let l_sheets = if sheets.is_empty() {
            vec![XlsxSheet::new(C_SHEET_NAME_DEFAULT)]
        } else {
            sheets
        };
        Self { l_sheets }
    }

    /// Write all sheets to `path`, replacing the file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<SpecXlsxReport, XlsxIoError> {
        let mut writer = XlsxWriter::new(path.as_ref().to_path_buf());
        for sheet in &self.l_sheets {
            writer.write_sheet(sheet)?;
        }
        writer.close()?;
        Ok(writer.report())
    }

    /// Active (first) sheet.
    pub fn active(&self) -> &XlsxSheet {
        &self.l_sheets[0]
    }

    /// Mutable active (first) sheet.
    pub fn active_mut(&mut self) -> &mut XlsxSheet {
        &mut self.l_sheets[0]
    }

    /// All sheets in workbook order.
    pub fn sheets(&self) -> &[XlsxSheet] {
        &self.l_sheets
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
