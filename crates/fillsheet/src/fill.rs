//! Half-Fill and Full-Fill passes over a [`SheetGrid`].
//!
//! Both passes visit `rows` once, in increasing order, and mutate the grid in
//! place. Persisting the grid is left to the caller (see
//! [`crate::sheet::FillSheet`]), so a pass that fails midway never reaches
//! the save.

use std::collections::VecDeque;

use tracing::debug;

use crate::clause::{
    extract_featuring_tail, render_boilerplate, render_opening, rephrase_offered_by,
    rephrase_offers, replace_colour, swap_clauses,
};
use crate::conf::{
    C_CODE_EZPZ, C_CODE_RESET, C_CODE_SKIP, N_REPEAT_CYCLE_LEN, derive_description_format,
};
use crate::grid::SheetGrid;
use crate::report::{EnumFillPass, ReportFill, ReportFillBuilder};
use crate::spec::{
    ClauseError, FillSheetError, SpecColumnSet, SpecRepetitionState, SpecRowRange,
};

////////////////////////////////////////////////////////////////////////////////
// #region HalfFill

/// Merge stray secondary text into the primary column and write the
/// boilerplate phrase into the secondary column.
///
/// A row whose product equals the product of the row directly above it gets
/// no boilerplate. The first row of `rows` is compared with the row before it,
/// whatever that row holds.
pub fn half_fill_grid<G: SheetGrid + ?Sized>(
    grid: &mut G,
    rows: SpecRowRange,
    columns: SpecColumnSet,
) -> Result<ReportFill, FillSheetError> {
    let fmt_description = derive_description_format();
    let mut builder = ReportFillBuilder::new(EnumFillPass::Half);

    for n_row in rows.iter() {
        builder.add_scanned();

        if let Some(c_desc2) = grid.cell(n_row, columns.description2) {
            let c_desc1 = grid.cell(n_row, columns.description1).unwrap_or_default();
            grid.set_cell(
                n_row,
                columns.description1,
                Some(format!("{c_desc1}; {c_desc2}")),
            );
            grid.set_cell(n_row, columns.description2, None);
            builder.add_merged();
        }

        let c_product = grid.cell(n_row, columns.product);
        if c_product == grid.cell(n_row.saturating_sub(1), columns.product) {
            debug!(row = n_row, "duplicate of previous row, no boilerplate");
            builder.add_duplicate();
            continue;
        }

        let c_text = render_boilerplate(
            &grid.cell(n_row, columns.manufacturer).unwrap_or_default(),
            &c_product.unwrap_or_default(),
            &grid.cell(n_row, columns.colour).unwrap_or_default(),
        );
        grid.set_style(n_row, columns.description2, &fmt_description);
        grid.set_cell(n_row, columns.description2, Some(c_text));
        builder.add_written();
    }

    Ok(builder.build())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Lookback

/// Text of one visited row, as it stands after the pass handled it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecRowSnapshot {
    /// Row number.
    pub row: u32,
    /// Colour cell.
    pub colour: Option<String>,
    /// Primary description cell.
    pub description1: Option<String>,
    /// Secondary description cell.
    pub description2: Option<String>,
}

impl SpecRowSnapshot {
    fn read<G: SheetGrid + ?Sized>(grid: &G, row: u32, columns: SpecColumnSet) -> Self {
        Self {
            row,
            colour: grid.cell(row, columns.colour),
            description1: grid.cell(row, columns.description1),
            description2: grid.cell(row, columns.description2),
        }
    }

    fn has_code(&self, code: &str) -> bool {
        [&self.description1, &self.description2]
            .into_iter()
            .flatten()
            .any(|c_text| c_text.contains(code))
    }
}

/// Ring buffer of the most recently visited rows.
///
/// Holds [`N_REPEAT_CYCLE_LEN`] rows, which covers every offset the repeat
/// cycle looks back (1, 2 and 4 rows).
#[derive(Debug, Clone, Default)]
pub struct RowLookback {
    l_rows: VecDeque<SpecRowSnapshot>,
}

impl RowLookback {
    /// Record a visited row, evicting the oldest one when full.
    pub fn push(&mut self, snapshot: SpecRowSnapshot) {
        if self.l_rows.len() == N_REPEAT_CYCLE_LEN as usize {
            self.l_rows.pop_front();
        }
        self.l_rows.push_back(snapshot);
    }

    /// Snapshot of `row`, if still buffered.
    pub fn get(&self, row: u32) -> Option<&SpecRowSnapshot> {
        self.l_rows.iter().rev().find(|snapshot| snapshot.row == row)
    }

    /// Number of buffered rows.
    pub fn len(&self) -> usize {
        self.l_rows.len()
    }

    /// `true` when nothing has been buffered yet.
    pub fn is_empty(&self) -> bool {
        self.l_rows.is_empty()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FullFill

/// Generate full descriptions in the primary column.
///
/// Per row: `SKIP` leaves it untouched, `RESET` forgets the last product,
/// a repeat of the last product is derived from an earlier row with the
/// colour substituted, and anything else gets a fresh description built from
/// the secondary column's `featuring` tail. The featuring and sports clauses
/// of a fresh description are swapped unless the primary column is exactly
/// `EZPZ`.
pub fn full_fill_grid<G: SheetGrid + ?Sized>(
    grid: &mut G,
    rows: SpecRowRange,
    columns: SpecColumnSet,
) -> Result<ReportFill, FillSheetError> {
    let fmt_description = derive_description_format();
    let mut state = SpecRepetitionState::default();
    let mut lookback = RowLookback::default();
    let mut builder = ReportFillBuilder::new(EnumFillPass::Full);

    for n_row in rows.iter() {
        builder.add_scanned();
        let mut snapshot = SpecRowSnapshot::read(grid, n_row, columns);

        if snapshot.has_code(C_CODE_SKIP) {
            debug!(row = n_row, "SKIP code, row left untouched");
            builder.add_skipped();
            lookback.push(snapshot);
            continue;
        }

        if snapshot.has_code(C_CODE_RESET) {
            debug!(row = n_row, "RESET code, repetition state cleared");
            state.reset();
            builder.add_reset();
            lookback.push(snapshot);
            continue;
        }

        let c_product = grid.cell(n_row, columns.product);
        let (c_desc1, c_desc2) = if state.is_repeat(c_product.as_deref()) {
            let n_phase = state.repeat_count % N_REPEAT_CYCLE_LEN;
            let (c_desc1, c_desc2) =
                derive_repeat_descriptions(grid, columns, &lookback, &state, &snapshot, n_phase);
            state.repeat_count = if n_phase == N_REPEAT_CYCLE_LEN - 1 {
                0
            } else {
                state.repeat_count + 1
            };
            debug!(row = n_row, phase = n_phase, "repeated product");
            builder.add_repeat();
            (c_desc1, Some(c_desc2))
        } else {
            let c_manufacturer = grid.cell(n_row, columns.manufacturer);
            let c_colour = snapshot.colour.clone();
            let c_desc1 = derive_fresh_description(
                c_manufacturer.as_deref().unwrap_or_default(),
                c_product.as_deref().unwrap_or_default(),
                c_colour.as_deref().unwrap_or_default(),
                &snapshot,
            )
            .map_err(|e| e.at_row(n_row))?;
            state.capture(c_manufacturer, c_product, c_colour);
            debug!(row = n_row, "fresh product");
            (c_desc1, None)
        };

        grid.set_style(n_row, columns.description1, &fmt_description);
        grid.set_cell(n_row, columns.description1, Some(c_desc1.clone()));
        snapshot.description1 = Some(c_desc1);
        if let Some(c_desc2) = c_desc2 {
            grid.set_style(n_row, columns.description2, &fmt_description);
            grid.set_cell(n_row, columns.description2, Some(c_desc2.clone()));
            snapshot.description2 = Some(c_desc2);
        }
        builder.add_written();
        lookback.push(snapshot);
    }

    Ok(builder.build())
}

/// Opening phrase plus the secondary column's featuring tail, clauses swapped
/// unless the primary column holds the `EZPZ` code.
fn derive_fresh_description(
    manufacturer: &str,
    product: &str,
    colour: &str,
    snapshot: &SpecRowSnapshot,
) -> Result<String, ClauseError> {
    let c_tail = extract_featuring_tail(snapshot.description2.as_deref().unwrap_or_default())?;
    let c_desc = format!("{}{c_tail}", render_opening(manufacturer, product, colour));
    if snapshot.description1.as_deref() == Some(C_CODE_EZPZ) {
        return Ok(c_desc);
    }
    swap_clauses(&c_desc)
}

/// Phase 0/2: swap the previous row's columns. Phase 1: rephrase the row two
/// back. Phase 3: copy the row four back.
///
/// The colour of the last fresh product is replaced by the current row's
/// colour; text that no longer holds that colour keeps its own.
fn derive_repeat_descriptions<G: SheetGrid + ?Sized>(
    grid: &G,
    columns: SpecColumnSet,
    lookback: &RowLookback,
    state: &SpecRepetitionState,
    current: &SpecRowSnapshot,
    phase: u32,
) -> (String, String) {
    let n_offset = match phase {
        0 | 2 => 1,
        1 => 2,
        _ => 4,
    };
    let n_row_source = current.row.saturating_sub(n_offset);
    let source = lookback
        .get(n_row_source)
        .cloned()
        .unwrap_or_else(|| SpecRowSnapshot::read(grid, n_row_source, columns));

    let c_colour_old = state.last_colour.as_deref().unwrap_or_default();
    let c_colour_new = current.colour.as_deref().unwrap_or_default();
    let c_src1 = source.description1.as_deref().unwrap_or_default();
    let c_src2 = source.description2.as_deref().unwrap_or_default();

    let (c_desc1, c_desc2) = match phase {
        0 | 2 => (c_src2.to_string(), c_src1.to_string()),
        1 => {
            let c_manufacturer = state.last_manufacturer.as_deref().unwrap_or_default();
            let c_product = state.last_product.as_deref().unwrap_or_default();
            (
                rephrase_offers(c_src1, c_manufacturer),
                rephrase_offered_by(c_src2, c_manufacturer, c_product),
            )
        }
        _ => (c_src1.to_string(), c_src2.to_string()),
    };

    (
        replace_colour(&c_desc1, c_colour_old, c_colour_new),
        replace_colour(&c_desc2, c_colour_old, c_colour_new),
    )
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use fillsheet_io_xlsx::XlsxSheet;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rows::resolve_row_range;

    const C_BOILER_CK: &str =
        "The Limited Edition Trunks from Calvin Klein comes in Camo Print Black colour, featuring";

    /// Header plus data rows laid out as ID, MANUFACTURER, PRODUCT, COLOUR,
    /// DESCR1, DESCR2 (seed column 2).
    fn derive_sheet(data: &[[&str; 5]]) -> (XlsxSheet, SpecColumnSet) {
        let mut l_rows = vec![vec![
            "ID",
            "MANUFACTURER",
            "PRODUCT",
            "COLOUR",
            "DESCR1",
            "DESCR2",
        ]];
        for row in data {
            let mut l_row = vec!["P"];
            l_row.extend_from_slice(row);
            l_rows.push(l_row);
        }
        (XlsxSheet::from_rows("Sheet1", l_rows), SpecColumnSet::from_seed(2))
    }

    fn derive_all_rows(sheet: &XlsxSheet) -> SpecRowRange {
        resolve_row_range(None, sheet.row_count()).expect("rows")
    }

    #[test]
    fn test_half_fill_writes_boilerplate() {
        let (mut sheet, columns) = derive_sheet(&[[
            "Calvin Klein",
            "Limited Edition Trunks",
            "Camo Print Black",
            "",
            "",
        ]]);
        let rows = derive_all_rows(&sheet);

        let report = half_fill_grid(&mut sheet, rows, columns).unwrap();

        assert_eq!(sheet.cell_text(2, 6).as_deref(), Some(C_BOILER_CK));
        assert_eq!(sheet.cell_text(2, 5), None);
        assert_eq!(report.cnt_written, 1);
        assert_eq!(sheet.cell_format(2, 6), Some(&derive_description_format()));
    }

    #[test]
    fn test_half_fill_merges_stray_text_then_skips_duplicates() {
        let (mut sheet, columns) = derive_sheet(&[
            ["Converse", "Hi", "Teak", "", ""],
            ["Converse", "Hi", "Black", "Existing", "stray note"],
            ["Converse", "Lo", "White", "", "other"],
        ]);
        let rows = derive_all_rows(&sheet);

        let report = half_fill_grid(&mut sheet, rows, columns).unwrap();

        assert_eq!(sheet.cell_text(3, 5).as_deref(), Some("Existing; stray note"));
        assert_eq!(sheet.cell_text(3, 6), None);
        assert_eq!(sheet.cell_text(4, 5).as_deref(), Some("; other"));
        assert_eq!(
            sheet.cell_text(4, 6).as_deref(),
            Some("The Lo from Converse comes in White colour, featuring")
        );
        assert_eq!(report.cnt_merged, 2);
        assert_eq!(report.cnt_duplicates, 1);
        assert_eq!(report.cnt_written, 2);
    }

    #[test]
    fn test_half_fill_rerun_is_stable() {
        let (mut sheet, columns) = derive_sheet(&[
            ["Converse", "Hi", "Teak", "", ""],
            ["Converse", "Hi", "Black", "", ""],
        ]);
        let rows = derive_all_rows(&sheet);

        half_fill_grid(&mut sheet, rows, columns).unwrap();
        let c_first = sheet.cell_text(2, 6);
        half_fill_grid(&mut sheet, rows, columns).unwrap();

        assert_eq!(sheet.cell_text(2, 6), c_first);
        assert_eq!(sheet.cell_text(3, 6), None);
    }

    #[test]
    fn test_half_fill_compares_first_row_with_row_above() {
        let (mut sheet, columns) = derive_sheet(&[
            ["Converse", "Hi", "Teak", "", ""],
            ["Converse", "Hi", "Black", "", ""],
        ]);
        let rows = resolve_row_range(Some("3:"), sheet.row_count()).unwrap();

        let report = half_fill_grid(&mut sheet, rows, columns).unwrap();

        assert_eq!(report.cnt_duplicates, 1);
        assert_eq!(sheet.cell_text(3, 6), None);
    }

    #[test]
    fn test_full_fill_swaps_clauses() {
        let c_desc2 = format!("{C_BOILER_CK} THESE FEATURES. This item also sports THESE PROPERTIES.");
        let (mut sheet, columns) = derive_sheet(&[[
            "Calvin Klein",
            "Limited Edition Trunks",
            "Camo Print Black",
            "",
            c_desc2.as_str(),
        ]]);
        let rows = derive_all_rows(&sheet);

        full_fill_grid(&mut sheet, rows, columns).unwrap();

        assert_eq!(
            sheet.cell_text(2, 5).as_deref(),
            Some(
                "From Calvin Klein comes the Limited Edition Trunks in Camo Print Black colour, \
                 featuring THESE PROPERTIES. This item also sports THESE FEATURES."
            )
        );
        assert_eq!(sheet.cell_text(2, 6).as_deref(), Some(c_desc2.as_str()));
    }

    #[test]
    fn test_full_fill_ezpz_keeps_plain_phrasing() {
        let (mut sheet, columns) = derive_sheet(&[[
            "Converse",
            "CT All Star Hi Leather Trainers",
            "Teak/Black/Driftwood",
            "EZPZ",
            "The CT All Star Hi Leather Trainers from Converse comes in Teak/Black/Driftwood \
             colour, featuring THESE FEATURES. Note: Blah blah.",
        ]]);
        let rows = derive_all_rows(&sheet);

        full_fill_grid(&mut sheet, rows, columns).unwrap();

        assert_eq!(
            sheet.cell_text(2, 5).as_deref(),
            Some(
                "From Converse comes the CT All Star Hi Leather Trainers in Teak/Black/Driftwood \
                 colour, featuring THESE FEATURES. Note: Blah blah."
            )
        );
    }

    #[test]
    fn test_full_fill_skip_leaves_row_unchanged() {
        let (mut sheet, columns) = derive_sheet(&[
            ["Converse", "Hi", "Teak", "SKIP", "featuring nothing"],
            ["Converse", "Lo", "Teak", "", "please SKIP me"],
        ]);
        let rows = derive_all_rows(&sheet);
        let sheet_before = sheet.clone();

        let report = full_fill_grid(&mut sheet, rows, columns).unwrap();

        assert_eq!(sheet, sheet_before);
        assert_eq!(report.cnt_skipped, 2);
    }

    #[test]
    fn test_full_fill_missing_featuring_names_row() {
        let (mut sheet, columns) = derive_sheet(&[
            ["Converse", "Hi", "Teak", "EZPZ", "featuring A."],
            ["Converse", "Lo", "Teak", "", "no tail here"],
        ]);
        let rows = derive_all_rows(&sheet);

        let err = full_fill_grid(&mut sheet, rows, columns).unwrap_err();
        assert!(matches!(err, FillSheetError::ClauseNotFound { row: 3, .. }));
        assert!(err.to_string().contains("In row 3"));
    }

    #[test]
    fn test_full_fill_missing_sports_clause_fails() {
        let (mut sheet, columns) = derive_sheet(&[[
            "Converse",
            "Hi",
            "Teak",
            "",
            "featuring THESE FEATURES. Note: Blah blah.",
        ]]);
        let rows = derive_all_rows(&sheet);

        assert!(matches!(
            full_fill_grid(&mut sheet, rows, columns),
            Err(FillSheetError::ClauseNotFound { row: 2, .. })
        ));
    }

    #[test]
    fn test_full_fill_empty_subclause_fails() {
        let (mut sheet, columns) = derive_sheet(&[[
            "Converse",
            "Hi",
            "Teak",
            "",
            "featuring . It sports B.",
        ]]);
        let rows = derive_all_rows(&sheet);

        assert!(matches!(
            full_fill_grid(&mut sheet, rows, columns),
            Err(FillSheetError::EmptySubclause { row: 2, .. })
        ));
    }

    #[test]
    fn test_full_fill_repeat_cycle() {
        let c_tail = "featuring mesh. It sports a sole.";
        let c_boiler = |c_colour: &str| {
            format!("The Hi from Converse comes in {c_colour} colour, {c_tail}")
        };
        let l_colours = ["Teak", "Black", "White", "Red", "Blue", "Green"];
        let l_desc2: Vec<String> = l_colours.iter().map(|&c| c_boiler(c)).collect();
        let l_data: Vec<[&str; 5]> = l_colours
            .iter()
            .zip(&l_desc2)
            .map(|(c_colour, c_desc2)| ["Converse", "Hi", *c_colour, "", c_desc2.as_str()])
            .collect();
        let (mut sheet, columns) = derive_sheet(&l_data);
        let rows = derive_all_rows(&sheet);

        let report = full_fill_grid(&mut sheet, rows, columns).unwrap();
        assert_eq!(report.cnt_repeats, 5);

        let c_fresh1 = "From Converse comes the Hi in Teak colour, featuring a sole. It sports mesh.";
        let c_fresh2 = "The Hi from Converse comes in Teak colour, featuring mesh. It sports a sole.";
        assert_eq!(sheet.cell_text(2, 5).as_deref(), Some(c_fresh1));
        assert_eq!(sheet.cell_text(2, 6).as_deref(), Some(c_fresh2));

        // phase 0: previous row's columns swapped
        assert_eq!(
            sheet.cell_text(3, 5).as_deref(),
            Some("The Hi from Converse comes in Black colour, featuring mesh. It sports a sole.")
        );
        assert_eq!(
            sheet.cell_text(3, 6).as_deref(),
            Some("From Converse comes the Hi in Black colour, featuring a sole. It sports mesh.")
        );

        // phase 1: row two back, rephrased
        assert_eq!(
            sheet.cell_text(4, 5).as_deref(),
            Some("Converse offers the Hi in White colour, featuring a sole. It sports mesh.")
        );
        assert_eq!(
            sheet.cell_text(4, 6).as_deref(),
            Some("Offered by Converse, the Hi comes in White colour, featuring mesh. It sports a sole.")
        );

        // phase 2: previous row's columns swapped; the row above already lost
        // the fresh colour, so White stays
        assert_eq!(
            sheet.cell_text(5, 5).as_deref(),
            Some("Offered by Converse, the Hi comes in White colour, featuring mesh. It sports a sole.")
        );
        assert_eq!(
            sheet.cell_text(5, 6).as_deref(),
            Some("Converse offers the Hi in White colour, featuring a sole. It sports mesh.")
        );

        // phase 3: copy of row four back, then the cycle restarts
        assert_eq!(
            sheet.cell_text(6, 5).as_deref(),
            Some("From Converse comes the Hi in Blue colour, featuring a sole. It sports mesh.")
        );
        assert_eq!(
            sheet.cell_text(6, 6).as_deref(),
            Some("The Hi from Converse comes in Blue colour, featuring mesh. It sports a sole.")
        );
        assert_eq!(
            sheet.cell_text(7, 5).as_deref(),
            Some("The Hi from Converse comes in Blue colour, featuring mesh. It sports a sole.")
        );
    }

    #[test]
    fn test_full_fill_reset_forces_fresh_row() {
        let (mut sheet, columns) = derive_sheet(&[
            ["Converse", "Hi", "Teak", "EZPZ", "featuring mesh. Note."],
            ["Converse", "Hi", "Black", "RESET", ""],
            ["Converse", "Hi", "White", "EZPZ", "featuring suede. Note."],
        ]);
        let rows = derive_all_rows(&sheet);

        let report = full_fill_grid(&mut sheet, rows, columns).unwrap();

        assert_eq!(report.cnt_resets, 1);
        assert_eq!(report.cnt_repeats, 0);
        assert_eq!(sheet.cell_text(3, 5).as_deref(), Some("RESET"));
        assert_eq!(
            sheet.cell_text(4, 5).as_deref(),
            Some("From Converse comes the Hi in White colour, featuring suede. Note.")
        );
    }

    #[test]
    fn test_row_lookback_keeps_last_four_rows() {
        let mut lookback = RowLookback::default();
        assert!(lookback.is_empty());
        for n_row in 2..=7 {
            lookback.push(SpecRowSnapshot {
                row: n_row,
                ..Default::default()
            });
        }

        assert_eq!(lookback.len(), 4);
        assert!(lookback.get(3).is_none());
        assert_eq!(lookback.get(4).map(|s| s.row), Some(4));
        assert_eq!(lookback.get(7).map(|s| s.row), Some(7));
    }
}
