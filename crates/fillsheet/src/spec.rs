//! Row/column models, repetition state and top-level error types.

use std::fmt;
use std::ops::RangeInclusive;

use fillsheet_io_xlsx::XlsxIoError;

////////////////////////////////////////////////////////////////////////////////
// #region RowsAndColumns

/// Inclusive, 1-based range of rows processed by a pass.
///
/// Built through [`crate::rows::resolve_row_range`], which enforces
/// `1 <= start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecRowRange {
    pub(crate) start: u32,
    pub(crate) end: u32,
}

impl SpecRowRange {
    /// First row (inclusive).
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last row (inclusive).
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Iterate row numbers in increasing order.
    pub fn iter(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// The five logical columns, all derived from the seed (manufacturer) column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecColumnSet {
    /// Manufacturer column (the seed).
    pub manufacturer: u32,
    /// Product name column.
    pub product: u32,
    /// Colour column.
    pub colour: u32,
    /// Primary (full) description column.
    pub description1: u32,
    /// Secondary description column.
    pub description2: u32,
}

impl SpecColumnSet {
    /// Lay out the columns as `seed, seed+1, .., seed+4`.
    pub fn from_seed(seed: u32) -> Self {
        Self {
            manufacturer: seed,
            product: seed + 1,
            colour: seed + 2,
            description1: seed + 3,
            description2: seed + 4,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RepetitionState

/// Running state of one Full-Fill pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecRepetitionState {
    /// Manufacturer of the last fresh product.
    pub last_manufacturer: Option<String>,
    /// Last fresh product; `None` after a reset.
    pub last_product: Option<String>,
    /// Colour of the last fresh product.
    pub last_colour: Option<String>,
    /// Position in the repeat cycle, `0..N_REPEAT_CYCLE_LEN`.
    pub repeat_count: u32,
}

impl SpecRepetitionState {
    /// `true` when `product` continues the current run.
    pub fn is_repeat(&self, product: Option<&str>) -> bool {
        match (product, self.last_product.as_deref()) {
            (Some(c_product), Some(c_last)) => c_product == c_last,
            _ => false,
        }
    }

    /// Start a new run from a fresh row.
    pub fn capture(
        &mut self,
        manufacturer: Option<String>,
        product: Option<String>,
        colour: Option<String>,
    ) {
        self.last_manufacturer = manufacturer;
        self.last_product = product;
        self.last_colour = colour;
        self.repeat_count = 0;
    }

    /// Forget the last product (RESET code).
    pub fn reset(&mut self) {
        self.last_product = None;
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Clauses

/// Textual patterns the Full-Fill pass depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumClause {
    /// `featuring` up to the end of the secondary description.
    FeaturingTail,
    /// Text between `featuring ` and the next period.
    Featuring,
    /// Text between `sport`/`sports` and the final period.
    Sports,
}

impl fmt::Display for EnumClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FeaturingTail => write!(f, "\"FEATURING\" CLAUSE"),
            Self::Featuring => write!(f, "FEATURING CLAUSE"),
            Self::Sports => write!(f, "SPORTS CLAUSE"),
        }
    }
}

/// Row-agnostic clause parsing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClauseError {
    /// Pattern did not match.
    #[error("{0} NOT FOUND")]
    Missing(EnumClause),
    /// Pattern matched with an empty capture.
    #[error("{0} EMPTY")]
    Empty(EnumClause),
    /// Featuring and sports clauses share text, so they cannot be swapped.
    #[error("FEATURING AND SPORTS CLAUSES OVERLAP")]
    Overlapping,
}

impl ClauseError {
    /// Attach the offending row number.
    pub fn at_row(self, row: u32) -> FillSheetError {
        match self {
            Self::Missing(clause) => FillSheetError::ClauseNotFound {
                row,
                clause: clause.to_string(),
            },
            Self::Overlapping => FillSheetError::ClauseNotFound {
                row,
                clause: "DISTINCT FEATURING AND SPORTS CLAUSES".to_string(),
            },
            Self::Empty(clause) => FillSheetError::EmptySubclause {
                row,
                clause: clause.to_string(),
            },
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Top-level failures of configuration and fill passes.
#[derive(Debug, thiserror::Error)]
pub enum FillSheetError {
    /// Bad file extension or malformed row range.
    #[error("{0}")]
    Format(String),
    /// Missing file or missing header column.
    #[error("{0}")]
    NotFound(String),
    /// Resolved start row lies after the end row (or is 0).
    #[error("INVALID VALUE FOR ROWS: START must be between 1 and END (got {start}:{end})")]
    Range {
        /// Resolved start row.
        start: u32,
        /// Resolved end row.
        end: u32,
    },
    /// Expected textual pattern absent.
    #[error("{clause} NOT FOUND: In row {row}")]
    ClauseNotFound {
        /// Offending row.
        row: u32,
        /// Which clause was searched for.
        clause: String,
    },
    /// Pattern matched but the captured text is empty.
    #[error("SUB-CLAUSE EMPTY ({clause}): In row {row}")]
    EmptySubclause {
        /// Offending row.
        row: u32,
        /// Which clause was empty.
        clause: String,
    },
    /// Backend read/write failure.
    #[error(transparent)]
    Xlsx(XlsxIoError),
}

impl From<XlsxIoError> for FillSheetError {
    fn from(err: XlsxIoError) -> Self {
        match err {
            XlsxIoError::InvalidExtension(_) => Self::Format(err.to_string()),
            XlsxIoError::FileNotFound(_) => Self::NotFound(err.to_string()),
            other => Self::Xlsx(other),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_column_set_from_seed() {
        let columns = SpecColumnSet::from_seed(4);
        assert_eq!(
            (
                columns.manufacturer,
                columns.product,
                columns.colour,
                columns.description1,
                columns.description2
            ),
            (4, 5, 6, 7, 8)
        );
    }

    #[test]
    fn test_repetition_state_requires_known_product() {
        let mut state = SpecRepetitionState::default();
        assert!(!state.is_repeat(None));
        assert!(!state.is_repeat(Some("Trunks")));

        state.capture(None, Some("Trunks".to_string()), None);
        assert!(state.is_repeat(Some("Trunks")));
        assert!(!state.is_repeat(Some("Boxers")));

        state.reset();
        assert!(!state.is_repeat(Some("Trunks")));
    }

    #[test]
    fn test_clause_error_names_row() {
        let err = ClauseError::Missing(EnumClause::Sports).at_row(7);
        assert!(matches!(err, FillSheetError::ClauseNotFound { row: 7, .. }));
        assert_eq!(err.to_string(), "SPORTS CLAUSE NOT FOUND: In row 7");

        let err = ClauseError::Empty(EnumClause::Featuring).at_row(3);
        assert!(err.to_string().ends_with("In row 3"));
    }

    #[test]
    fn test_backend_errors_map_to_taxonomy() {
        let err: FillSheetError = XlsxIoError::InvalidExtension(PathBuf::from("SomeFile")).into();
        assert!(matches!(err, FillSheetError::Format(_)));

        let err: FillSheetError = XlsxIoError::FileNotFound(PathBuf::from("SomeFile.xlsx")).into();
        assert!(matches!(err, FillSheetError::NotFound(_)));

        let err: FillSheetError = XlsxIoError::Write("disk full".to_string()).into();
        assert!(matches!(err, FillSheetError::Xlsx(_)));
    }
}
