//! Row-range resolution from `START:END` specifiers.

use std::sync::LazyLock;

use regex::Regex;

use crate::conf::N_ROW_START_DEFAULT;
use crate::spec::{FillSheetError, SpecRowRange};

static RGX_ROW_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]*):([0-9]*)$").expect("row range pattern"));

/// Resolve a range specifier against the sheet's row count.
///
/// - `None`: rows `2..=total_rows`.
/// - `"A:B"`: empty `A` means 2, empty `B` means `total_rows`; a numeric `B`
///   past `total_rows` is clamped.
///
/// Fails with [`FillSheetError::Format`] on malformed input and
/// [`FillSheetError::Range`] when the resolved start is 0 or exceeds the end.
pub fn resolve_row_range(
    spec: Option<&str>,
    total_rows: u32,
) -> Result<SpecRowRange, FillSheetError> {
    let (n_start, n_end) = match spec {
        None => (N_ROW_START_DEFAULT, total_rows),
        Some(c_spec) => {
            let caps = RGX_ROW_RANGE.captures(c_spec).ok_or_else(|| {
                FillSheetError::Format(format!(
                    "INVALID TYPE FOR ROWS: Must be empty or of the form \"START:END\", got {c_spec:?}"
                ))
            })?;
            let n_start = match parse_row_number(&caps[1])? {
                Some(n) => n,
                None => N_ROW_START_DEFAULT,
            };
            let n_end = match parse_row_number(&caps[2])? {
                Some(n) => n.min(total_rows),
                None => total_rows,
            };
            (n_start, n_end)
        }
    };

    if n_start == 0 || n_start > n_end {
        return Err(FillSheetError::Range {
            start: n_start,
            end: n_end,
        });
    }
    Ok(SpecRowRange {
        start: n_start,
        end: n_end,
    })
}

fn parse_row_number(digits: &str) -> Result<Option<u32>, FillSheetError> {
    if digits.is_empty() {
        return Ok(None);
    }
    digits
        .parse::<u32>()
        .map(Some)
        .map_err(|e| FillSheetError::Format(format!("INVALID ROW NUMBER {digits:?}: {e}")))
}
