//! `FillSheet`: file-level configuration and pass orchestration.

use std::path::{Path, PathBuf};

use fillsheet_io_xlsx::{XlsxBook, validate_xlsx_path};
use tracing::info;

use crate::columns::{find_manufacturer_column, locate_manufacturer_column};
use crate::conf::C_FILE_DEFAULT;
use crate::fill::{full_fill_grid, half_fill_grid};
use crate::report::ReportFill;
use crate::rows::resolve_row_range;
use crate::spec::{FillSheetError, SpecColumnSet, SpecRowRange};

/// A catalog workbook configured for filling.
///
/// Construction validates the file, resolves the row range and locates the
/// seed column. Each pass re-opens the file, fills the active sheet in memory
/// and saves once at the end; a failing pass leaves the file untouched.
/// Cells the pass does not write keep their values, formulas and styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillSheet {
    path_file: PathBuf,
    rows: SpecRowRange,
    seed: u32,
    max_rows: u32,
}

impl FillSheet {
    /// Configure `file` with an optional `START:END` row range.
    ///
    /// Errors:
    /// - [`FillSheetError::Format`]: not an `.xlsx` path, or malformed `rows`.
    /// - [`FillSheetError::NotFound`]: file missing, or no `MANUFACTURER` header.
    /// - [`FillSheetError::Range`]: resolved start after end.
    pub fn new(file: impl AsRef<Path>, rows: Option<&str>) -> Result<Self, FillSheetError> {
        let path_file = file.as_ref().to_path_buf();
        validate_xlsx_path(&path_file)?;

        let book = XlsxBook::open(&path_file)?;
        let max_rows = book.row_count();
        let rows = resolve_row_range(rows, max_rows)?;
        let seed = locate_manufacturer_column(&book)?;

        info!(
            file = %path_file.display(),
            max_rows,
            start = rows.start(),
            end = rows.end(),
            seed,
            "configured workbook"
        );
        Ok(Self {
            path_file,
            rows,
            seed,
            max_rows,
        })
    }

    /// Workbook used when no file is given.
    pub fn default_file() -> &'static Path {
        Path::new(C_FILE_DEFAULT)
    }

    /// Configure the default workbook, `Descr.xlsx` in the working directory.
    pub fn with_default_file(rows: Option<&str>) -> Result<Self, FillSheetError> {
        Self::new(Self::default_file(), rows)
    }

    /// Replace the row range. On error the previous range is kept.
    pub fn config_rows(&mut self, spec: &str) -> Result<(), FillSheetError> {
        self.rows = resolve_row_range(Some(spec), self.max_rows)?;
        Ok(())
    }

    /// Workbook path.
    pub fn file(&self) -> &Path {
        &self.path_file
    }

    /// Rows processed by the passes.
    pub fn rows(&self) -> SpecRowRange {
        self.rows
    }

    /// Manufacturer column index (1-based).
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Row count of the active sheet at configuration time.
    pub fn max_rows(&self) -> u32 {
        self.max_rows
    }

    /// The five logical columns derived from [`Self::seed`].
    pub fn columns(&self) -> SpecColumnSet {
        SpecColumnSet::from_seed(self.seed)
    }

    /// Run the Half-Fill pass and save the workbook.
    pub fn half_fill(&self) -> Result<ReportFill, FillSheetError> {
        self.run_pass(half_fill_grid::<XlsxBook>)
    }

    /// Run the Full-Fill pass and save the workbook.
    pub fn full_fill(&self) -> Result<ReportFill, FillSheetError> {
        self.run_pass(full_fill_grid::<XlsxBook>)
    }

    fn run_pass<F>(&self, pass: F) -> Result<ReportFill, FillSheetError>
    where
        F: FnOnce(&mut XlsxBook, SpecRowRange, SpecColumnSet) -> Result<ReportFill, FillSheetError>,
    {
        let mut book = XlsxBook::open(&self.path_file)?;
        let report = pass(&mut book, self.rows, self.columns())?;
        book.save()?;
        info!(file = %self.path_file.display(), "{report}");
        Ok(report)
    }

    /// Row count of the active sheet of `file`.
    pub fn get_number_of_rows(file: impl AsRef<Path>) -> Result<u32, FillSheetError> {
        Ok(XlsxBook::open(file)?.row_count())
    }

    /// Manufacturer column index of the active sheet of `file`, if present.
    pub fn get_manufacturer_column_index(
        file: impl AsRef<Path>,
    ) -> Result<Option<u32>, FillSheetError> {
        Ok(find_manufacturer_column(&XlsxBook::open(file)?))
    }
}
