//! Constants, control codes and format presets.

use fillsheet_io_xlsx::SpecCellFormat;

/// Workbook used when no file is given.
pub const C_FILE_DEFAULT: &str = "Descr.xlsx";

/// Header row holding the column labels.
pub const N_ROW_HEADER: u32 = 1;
/// First data row when a range leaves START empty.
pub const N_ROW_START_DEFAULT: u32 = 2;

/// Header label of the seed column.
pub const C_HEADER_MANUFACTURER: &str = "MANUFACTURER";
/// First header column searched for [`C_HEADER_MANUFACTURER`].
pub const N_COL_SEARCH_FIRST: u32 = 2;
/// Last header column searched for [`C_HEADER_MANUFACTURER`] (inclusive).
pub const N_COL_SEARCH_LAST: u32 = 9;

/// Leave the row untouched.
pub const C_CODE_SKIP: &str = "SKIP";
/// Forget the last product so the next row is treated as fresh.
pub const C_CODE_RESET: &str = "RESET";
/// Keep the plain phrasing; no clause swap.
pub const C_CODE_EZPZ: &str = "EZPZ";

/// Number of phases in the repeat cycle.
pub const N_REPEAT_CYCLE_LEN: u32 = 4;

/// Format applied to every generated description cell.
pub fn derive_description_format() -> SpecCellFormat {
    SpecCellFormat {
        font_name: Some("Calibri".to_string()),
        font_size: Some(8),
        align: Some("left".to_string()),
        text_wrap: Some(true),
    }
}
