//! Shared XLSX cell, format and report models.

use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormat

/// Cell format options. `None` leaves the property as the workbook has it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Horizontal alignment (`general`, `left`, `center`, `right`, `fill`, `justify`).
    pub align: Option<String>,
    /// Text wrap.
    pub text_wrap: Option<bool>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Cell

/// Normalized cell value held by the in-memory sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Numeric value (dates are kept as their serial number).
    Number(f64),
    /// Boolean value.
    Boolean(bool),
}

impl EnumCellValue {
    /// `true` for [`EnumCellValue::None`] and for empty text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::None => true,
            Self::String(s) => s.is_empty(),
            Self::Number(_) | Self::Boolean(_) => false,
        }
    }

    /// Render the value as cell text, `None` when blank.
    ///
    /// Whole numbers are printed without a fractional part.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::String(s) if s.is_empty() => None,
            Self::String(s) => Some(s.clone()),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            Self::Boolean(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        }
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Option<String>> for EnumCellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::None, Self::String)
    }
}

/// One stored cell: value plus optional explicit format.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCell {
    /// Cell value.
    pub value: EnumCellValue,
    /// Format applied when the sheet is written back.
    pub format: Option<SpecCellFormat>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Report

/// Per-save report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheet names actually emitted, in workbook order.
    pub sheets: Vec<String>,
    /// Number of non-blank or formatted cells written.
    pub cnt_cells: u64,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Backend failures while opening or saving a document.
#[derive(Debug, thiserror::Error)]
pub enum XlsxIoError {
    /// Path does not carry the `.xlsx` extension.
    #[error("INVALID FILE: must be a valid Excel file ending in .xlsx: {}", .0.display())]
    InvalidExtension(PathBuf),
    /// Path does not exist.
    #[error("FILE DOES NOT EXIST: {}", .0.display())]
    FileNotFound(PathBuf),
    /// umya-spreadsheet could not parse the workbook.
    #[error("failed to read {}: {message}", path.display())]
    Read {
        /// Source workbook path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },
    /// A cell was rejected or the workbook could not be saved.
    #[error("xlsx write error: {0}")]
    Write(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_to_text() {
        assert_eq!(EnumCellValue::None.to_text(), None);
        assert_eq!(EnumCellValue::from("").to_text(), None);
        assert_eq!(EnumCellValue::from("Teak").to_text().as_deref(), Some("Teak"));
        assert_eq!(EnumCellValue::Number(42.0).to_text().as_deref(), Some("42"));
        assert_eq!(EnumCellValue::Number(2.5).to_text().as_deref(), Some("2.5"));
        assert_eq!(EnumCellValue::Boolean(true).to_text().as_deref(), Some("TRUE"));
        assert!(EnumCellValue::from(None).is_blank());
    }
}
