//! XLSX writer kernel that serializes [`XlsxSheet`] values into a workbook.

use std::collections::BTreeSet;
use std::path::PathBuf;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::sheet::XlsxSheet;
use crate::spec::{EnumCellValue, SpecXlsxReport, XlsxIoError};
use crate::util::{
    cast_col_num, cast_row_num, derive_rust_xlsx_format, derive_xlsx_error, sanitize_sheet_name,
};

/// Stateful workbook writer.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    set_sheet_names_existing: BTreeSet<String>,
    report: SpecXlsxReport,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: PathBuf) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            set_sheet_names_existing: BTreeSet::new(),
            report: SpecXlsxReport::default(),
            if_closed: false,
        }
    }

    /// Return snapshot of the write report.
    pub fn report(&self) -> SpecXlsxReport {
        self.report.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxIoError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(derive_xlsx_error)?;
        self.if_closed = true;
        debug!(
            path = %self.path_file_out.display(),
            sheets = self.report.sheets.len(),
            cells = self.report.cnt_cells,
            "saved workbook"
        );
        Ok(())
    }

    /// Append one worksheet with all its values and formats.
    pub fn write_sheet(&mut self, sheet: &XlsxSheet) -> Result<(), XlsxIoError> {
        if self.if_closed {
            return Err(XlsxIoError::Write("Cannot write after close().".to_string()));
        }

        let c_sheet_name = sanitize_sheet_name(sheet.name(), "_");
        if c_sheet_name != sheet.name() {
            self.report.warn(format!(
                "Sheet name {:?} sanitized to {c_sheet_name:?}.",
                sheet.name()
            ));
        }
        let sheet_name_unique = self.derive_unique_sheet_name(&c_sheet_name);

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name_unique)
            .map_err(derive_xlsx_error)?;

        let mut n_cells = 0u64;
        for (row, col, cell) in sheet.iter_cells() {
            let format = cell.format.as_ref().map(derive_rust_xlsx_format);
            write_cell_with_format(worksheet, row, col, &cell.value, format.as_ref())?;
            n_cells += 1;
        }

        self.report.cnt_cells += n_cells;
        self.report.sheets.push(sheet_name_unique);
        Ok(())
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                self.report
                    .warn(format!("Duplicate sheet name {name:?} renamed to {candidate:?}."));
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row: u32,
    col: u32,
    value: &EnumCellValue,
    format: Option<&Format>,
) -> Result<(), XlsxIoError> {
    if row as usize > N_NROWS_EXCEL_MAX || col as usize > N_NCOLS_EXCEL_MAX {
        return Err(XlsxIoError::Write(format!(
            "cell ({row},{col}) exceeds Excel limits ({N_NROWS_EXCEL_MAX} rows, {N_NCOLS_EXCEL_MAX} columns)"
        )));
    }
    let n_row = cast_row_num(row)?;
    let n_col = cast_col_num(col)?;

    match (value, format) {
        (EnumCellValue::None, Some(format)) => {
            worksheet
                .write_blank(n_row, n_col, format)
                .map_err(derive_xlsx_error)?;
        }
        (EnumCellValue::None, None) => {}
        (EnumCellValue::String(val), Some(format)) => {
            worksheet
                .write_string_with_format(n_row, n_col, val, format)
                .map_err(derive_xlsx_error)?;
        }
        (EnumCellValue::String(val), None) => {
            worksheet
                .write_string(n_row, n_col, val)
                .map_err(derive_xlsx_error)?;
        }
        (EnumCellValue::Number(val), Some(format)) => {
            worksheet
                .write_number_with_format(n_row, n_col, *val, format)
                .map_err(derive_xlsx_error)?;
        }
        (EnumCellValue::Number(val), None) => {
            worksheet
                .write_number(n_row, n_col, *val)
                .map_err(derive_xlsx_error)?;
        }
        (EnumCellValue::Boolean(val), Some(format)) => {
            worksheet
                .write_boolean_with_format(n_row, n_col, *val, format)
                .map_err(derive_xlsx_error)?;
        }
        (EnumCellValue::Boolean(val), None) => {
            worksheet
                .write_boolean(n_row, n_col, *val)
                .map_err(derive_xlsx_error)?;
        }
    }
    Ok(())
}
