//! Stateless helper utilities used by the reader and writer kernels.

use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, XlsxError};
use umya_spreadsheet::{HorizontalAlignmentValues, Style};

use crate::conf::{C_EXT_XLSX, N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::{SpecCellFormat, XlsxIoError};

////////////////////////////////////////////////////////////////////////////////
// #region PathValidation

/// Check the extension first, then existence.
pub fn validate_xlsx_path(path: &Path) -> Result<(), XlsxIoError> {
    let c_path = path.to_string_lossy().to_ascii_lowercase();
    if !c_path.ends_with(C_EXT_XLSX) {
        return Err(XlsxIoError::InvalidExtension(path.to_path_buf()));
    }
    if !path.exists() {
        return Err(XlsxIoError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FormatConversion

/// Build a rust_xlsxwriter [`Format`] from a cell format.
pub fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

/// Overlay a cell format onto an existing umya-spreadsheet [`Style`].
///
/// Properties left as `None` keep whatever the workbook already has.
pub fn apply_umya_format(style: &mut Style, spec: &SpecCellFormat) {
    if let Some(val) = &spec.font_name {
        style.get_font_mut().set_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        style.get_font_mut().set_size(val as f64);
    }
    if let Some(val) = &spec.align
        && let Some(align) = derive_umya_horizontal_alignment(val)
    {
        style.get_alignment_mut().set_horizontal(align);
    }
    if spec.text_wrap.unwrap_or(false) {
        style.get_alignment_mut().set_wrap_text(true);
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    match align.trim().to_ascii_lowercase().as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "fill" => Some(FormatAlign::Fill),
        "justify" => Some(FormatAlign::Justify),
        _ => None,
    }
}

fn derive_umya_horizontal_alignment(align: &str) -> Option<HorizontalAlignmentValues> {
    match align.trim().to_ascii_lowercase().as_str() {
        "general" => Some(HorizontalAlignmentValues::General),
        "left" => Some(HorizontalAlignmentValues::Left),
        "center" => Some(HorizontalAlignmentValues::Center),
        "right" => Some(HorizontalAlignmentValues::Right),
        "fill" => Some(HorizontalAlignmentValues::Fill),
        "justify" => Some(HorizontalAlignmentValues::Justify),
        _ => None,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region IndexCasting

/// Convert a 1-based row number into rust_xlsxwriter's 0-based row index.
pub fn cast_row_num(row: u32) -> Result<u32, XlsxIoError> {
    row.checked_sub(1)
        .ok_or_else(|| XlsxIoError::Write(format!("row number must be >= 1, got {row}")))
}

/// Convert a 1-based column number into rust_xlsxwriter's 0-based column index.
pub fn cast_col_num(col: u32) -> Result<u16, XlsxIoError> {
    let n_idx = col
        .checked_sub(1)
        .ok_or_else(|| XlsxIoError::Write(format!("column number must be >= 1, got {col}")))?;
    u16::try_from(n_idx).map_err(|_| XlsxIoError::Write(format!("column index overflow: {col}")))
}

pub(crate) fn derive_xlsx_error(err: XlsxError) -> XlsxIoError {
    XlsxIoError::Write(err.to_string())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
