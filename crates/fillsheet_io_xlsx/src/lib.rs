//! `fillsheet_io_xlsx` v1:
//! Rust-side XLSX document backend for `fillsheet`.
//!
//! Module layout:
//! - `conf`   : constants and default presets
//! - `spec`   : cell/format models and errors
//! - `util`   : pure helper functions
//! - `book`   : umya-spreadsheet-backed in-place workbook editing
//! - `sheet`  : in-memory sheet and document model
//! - `writer` : rust_xlsxwriter-backed writer kernel
pub mod book;
pub mod conf;
pub mod sheet;
pub mod spec;
pub mod util;
pub mod writer;

pub use book::XlsxBook;
pub use conf::{
    C_EXT_XLSX, C_SHEET_NAME_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX,
    N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
pub use sheet::{XlsxDocument, XlsxSheet};
pub use spec::{EnumCellValue, SpecCell, SpecCellFormat, SpecXlsxReport, XlsxIoError};
pub use util::{sanitize_sheet_name, validate_xlsx_path};
pub use writer::XlsxWriter;
