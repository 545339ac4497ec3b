//! In-place workbook editing backed by umya-spreadsheet.
//!
//! An [`XlsxBook`] loads the whole package, so saving it keeps everything
//! the passes never touch: other sheets, styles, number formats, formulas,
//! merged ranges and column widths.

use std::path::{Path, PathBuf};

use tracing::debug;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::spec::{SpecCellFormat, XlsxIoError};
use crate::util::{apply_umya_format, validate_xlsx_path};

/// Workbook opened for editing. All cell access targets the active sheet.
pub struct XlsxBook {
    path_file: PathBuf,
    book: Spreadsheet,
}

impl XlsxBook {
    /// Open an existing `.xlsx` file.
    ///
    /// Errors: [`XlsxIoError::InvalidExtension`], [`XlsxIoError::FileNotFound`]
    /// (checked in that order), or [`XlsxIoError::Read`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, XlsxIoError> {
        let path_file = path.as_ref().to_path_buf();
        validate_xlsx_path(&path_file)?;

        let book = umya_spreadsheet::reader::xlsx::read(&path_file).map_err(|e| {
            XlsxIoError::Read {
                path: path_file.clone(),
                message: e.to_string(),
            }
        })?;
        let slf = Self { path_file, book };
        debug!(
            path = %slf.path_file.display(),
            sheet = slf.sheet_name(),
            rows = slf.row_count(),
            "opened workbook"
        );
        Ok(slf)
    }

    /// Source path.
    pub fn path(&self) -> &Path {
        &self.path_file
    }

    /// Write the workbook back to its source path.
    pub fn save(&self) -> Result<(), XlsxIoError> {
        self.save_as(&self.path_file)
    }

    /// Write the workbook to `path`.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<(), XlsxIoError> {
        umya_spreadsheet::writer::xlsx::write(&self.book, path.as_ref())
            .map_err(|e| XlsxIoError::Write(e.to_string()))?;
        debug!(path = %path.as_ref().display(), "saved workbook");
        Ok(())
    }

    /// Name of the active sheet.
    pub fn sheet_name(&self) -> &str {
        self.active().get_name()
    }

    /// Highest used row of the active sheet (0 when empty).
    pub fn row_count(&self) -> u32 {
        self.active().get_highest_row()
    }

    /// Cell text (formula cells give their cached result), `None` when blank.
    pub fn cell_text(&self, row: u32, col: u32) -> Option<String> {
        if row == 0 || col == 0 {
            return None;
        }
        self.active()
            .get_cell((col, row))
            .map(|cell| cell.get_value().to_string())
            .filter(|c_value| !c_value.is_empty())
    }

    /// Store `value` as text, or blank the cell for `None`. Styles are kept.
    pub fn set_cell_text(&mut self, row: u32, col: u32, value: Option<String>) {
        if row == 0 || col == 0 {
            return;
        }
        let sheet = self.active_mut();
        match value {
            Some(c_value) => {
                sheet.get_cell_mut((col, row)).set_value_string(c_value);
            }
            None => {
                if sheet.get_cell((col, row)).is_some() {
                    sheet.get_cell_mut((col, row)).set_blank();
                }
            }
        }
    }

    /// Overlay `format` onto the cell's existing style.
    pub fn set_cell_format(&mut self, row: u32, col: u32, format: &SpecCellFormat) {
        if row == 0 || col == 0 {
            return;
        }
        apply_umya_format(
            self.active_mut().get_cell_mut((col, row)).get_style_mut(),
            format,
        );
    }

    fn active(&self) -> &Worksheet {
        self.book.get_active_sheet()
    }

    fn active_mut(&mut self) -> &mut Worksheet {
        self.book.get_active_sheet_mut()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::{Format, Workbook};
    use tempfile::TempDir;

    use super::*;

    /// Header in row 1, a product row in row 2 with a dated column G and a
    /// formula column H, and a second sheet.
    fn derive_source_workbook() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path_file = dir.path().join("Descr.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Products").expect("name");
        for (n_col, c_header) in ["ID", "MANUFACTURER", "PRODUCT", "COLOUR", "DESCR1", "DESCR2", "ADDED", "DOUBLE"]
            .iter()
            .enumerate()
        {
            worksheet.write_string(0, n_col as u16, *c_header).expect("header");
        }
        worksheet.write_number(1, 0, 21.0).expect("id");
        worksheet.write_string(1, 1, "Converse").expect("manufacturer");
        worksheet
            .write_number_with_format(1, 6, 45352.0, &Format::new().set_num_format("yyyy-mm-dd"))
            .expect("date");
        worksheet.write_formula(1, 7, "=A2*2").expect("formula");
        worksheet.set_column_width(5, 60).expect("width");
        workbook
            .add_worksheet()
            .set_name("Notes")
            .expect("notes")
            .write_string(0, 0, "keep me")
            .expect("note");
        workbook.save(&path_file).expect("save fixture");

        (dir, path_file)
    }

    #[test]
    fn test_open_validates_path() {
        assert!(matches!(
            XlsxBook::open("SomeFile"),
            Err(XlsxIoError::InvalidExtension(_))
        ));
        assert!(matches!(
            XlsxBook::open("SomeFile.xlsx"),
            Err(XlsxIoError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_read_and_edit_active_sheet() {
        let (_dir, path_file) = derive_source_workbook();
        let mut book = XlsxBook::open(&path_file).unwrap();

        assert_eq!(book.sheet_name(), "Products");
        assert_eq!(book.row_count(), 2);
        assert_eq!(book.cell_text(1, 2).as_deref(), Some("MANUFACTURER"));
        assert_eq!(book.cell_text(2, 1).as_deref(), Some("21"));
        assert_eq!(book.cell_text(2, 5), None);
        assert_eq!(book.cell_text(0, 1), None);

        book.set_cell_text(2, 5, Some("Converse; note".to_string()));
        book.set_cell_text(2, 2, None);
        book.set_cell_text(2, 9, None);

        assert_eq!(book.cell_text(2, 5).as_deref(), Some("Converse; note"));
        assert_eq!(book.cell_text(2, 2), None);
        assert_eq!(book.cell_text(2, 9), None);
    }

    #[test]
    fn test_save_keeps_untouched_dates_formulas_and_sheets() {
        let (_dir, path_file) = derive_source_workbook();
        let mut book = XlsxBook::open(&path_file).unwrap();
        book.set_cell_text(2, 6, Some("The Hi from Converse".to_string()));
        book.set_cell_format(
            2,
            6,
            &SpecCellFormat {
                font_name: Some("Calibri".to_string()),
                font_size: Some(8),
                align: Some("left".to_string()),
                text_wrap: Some(true),
            },
        );
        book.save().unwrap();

        let book_loaded = XlsxBook::open(&path_file).unwrap();
        let sheet = book_loaded.active();

        let cell_date = sheet.get_cell((7, 2)).expect("date cell");
        assert_eq!(cell_date.get_value().to_string(), "45352");
        assert_eq!(
            cell_date
                .get_style()
                .get_number_format()
                .map(|fmt| fmt.get_format_code().to_string()),
            Some("yyyy-mm-dd".to_string())
        );

        let cell_formula = sheet.get_cell((8, 2)).expect("formula cell");
        assert!(cell_formula.is_formula());
        assert_eq!(cell_formula.get_formula().trim_start_matches('='), "A2*2");

        let cell_desc = sheet.get_cell((6, 2)).expect("description cell");
        assert_eq!(cell_desc.get_value().to_string(), "The Hi from Converse");
        assert!(
            cell_desc
                .get_style()
                .get_alignment()
                .expect("alignment")
                .get_wrap_text()
                .to_owned()
        );

        assert_eq!(
            book_loaded
                .book
                .get_sheet_by_name("Notes")
                .and_then(|notes| notes.get_cell((1, 1)))
                .map(|cell| cell.get_value().to_string())
                .as_deref(),
            Some("keep me")
        );
    }
}
