//! `fillsheet` v1:
//! Product-description filler for catalog workbooks.
//!
//! Module layout:
//! - `conf`    : constants, control codes and format presets
//! - `spec`    : row range, column set, repetition state and errors
//! - `grid`    : cell access trait the passes run against
//! - `rows`    : `START:END` row-range resolution
//! - `columns` : seed column discovery
//! - `clause`  : description templates and clause parsers
//! - `report`  : per-pass counters
//! - `fill`    : Half-Fill and Full-Fill passes
//! - `sheet`   : `FillSheet` file facade
pub mod clause;
pub mod columns;
pub mod conf;
pub mod fill;
pub mod grid;
pub mod report;
pub mod rows;
pub mod sheet;
pub mod spec;

pub use columns::{find_manufacturer_column, locate_columns, locate_manufacturer_column};
pub use conf::{C_CODE_EZPZ, C_CODE_RESET, C_CODE_SKIP, C_FILE_DEFAULT, derive_description_format};
pub use fill::{full_fill_grid, half_fill_grid};
pub use grid::SheetGrid;
pub use report::{EnumFillPass, ReportFill, ReportFillBuilder};
pub use rows::resolve_row_range;
pub use sheet::FillSheet;
pub use spec::{
    ClauseError, EnumClause, FillSheetError, SpecColumnSet, SpecRepetitionState, SpecRowRange,
};
