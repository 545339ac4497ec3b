//! Seed column discovery in the header row.

use crate::conf::{C_HEADER_MANUFACTURER, N_COL_SEARCH_FIRST, N_COL_SEARCH_LAST, N_ROW_HEADER};
use crate::grid::SheetGrid;
use crate::spec::{FillSheetError, SpecColumnSet};

/// First header column (2..=9) whose text is exactly `MANUFACTURER`.
pub fn find_manufacturer_column<G: SheetGrid + ?Sized>(grid: &G) -> Option<u32> {
    (N_COL_SEARCH_FIRST..=N_COL_SEARCH_LAST)
        .find(|col| grid.cell(N_ROW_HEADER, *col).as_deref() == Some(C_HEADER_MANUFACTURER))
}

/// Like [`find_manufacturer_column`], failing with [`FillSheetError::NotFound`].
pub fn locate_manufacturer_column<G: SheetGrid + ?Sized>(grid: &G) -> Result<u32, FillSheetError> {
    find_manufacturer_column(grid).ok_or_else(|| {
        FillSheetError::NotFound("MANUFACTURER COLUMN'S INDEX NOT FOUND".to_string())
    })
}

/// Locate the seed column and lay out all five logical columns.
pub fn locate_columns<G: SheetGrid + ?Sized>(grid: &G) -> Result<SpecColumnSet, FillSheetError> {
    locate_manufacturer_column(grid).map(SpecColumnSet::from_seed)
}
