//! Fill report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

/// Which pass produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumFillPass {
    /// Boilerplate generation in the secondary column.
    #[default]
    Half,
    /// Full description generation in the primary column.
    Full,
}

impl EnumFillPass {
    fn tag(self) -> &'static str {
        match self {
            Self::Half => "[HALF_FILL]",
            Self::Full => "[FULL_FILL]",
        }
    }
}

/// Aggregate counters for one fill pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportFill {
    /// Pass that produced the counters.
    pub pass: EnumFillPass,
    /// Rows visited.
    pub cnt_scanned: u64,
    /// Rows whose generated description was written.
    pub cnt_written: u64,
    /// Rows whose stray secondary text was merged into the primary column.
    pub cnt_merged: u64,
    /// Rows skipped as a duplicate of the previous row (Half-Fill).
    pub cnt_duplicates: u64,
    /// Rows left untouched by a SKIP code.
    pub cnt_skipped: u64,
    /// Rows carrying a RESET code.
    pub cnt_resets: u64,
    /// Rows derived from earlier rows of the same product (Full-Fill).
    pub cnt_repeats: u64,
}

impl ReportFill {
    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_written".to_string(), self.cnt_written);
        dict_counts.insert("cnt_merged".to_string(), self.cnt_merged);
        dict_counts.insert("cnt_duplicates".to_string(), self.cnt_duplicates);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts.insert("cnt_resets".to_string(), self.cnt_resets);
        dict_counts.insert("cnt_repeats".to_string(), self.cnt_repeats);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} scanned={} written={} merged={} duplicates={} skipped={} resets={} repeats={}",
            self.cnt_scanned,
            self.cnt_written,
            self.cnt_merged,
            self.cnt_duplicates,
            self.cnt_skipped,
            self.cnt_resets,
            self.cnt_repeats
        )
    }
}

impl fmt::Display for ReportFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(self.pass.tag()))
    }
}

/// Mutable accumulator for fill statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportFillBuilder {
    report: ReportFill,
}

impl ReportFillBuilder {
    /// Start counting for `pass`.
    pub fn new(pass: EnumFillPass) -> Self {
        Self {
            report: ReportFill {
                pass,
                ..Default::default()
            },
        }
    }

    /// Increment scanned count by one.
    pub fn add_scanned(&mut self) {
        self.report.cnt_scanned += 1;
    }

    /// Increment written count by one.
    pub fn add_written(&mut self) {
        self.report.cnt_written += 1;
    }

    /// Increment merged count by one.
    pub fn add_merged(&mut self) {
        self.report.cnt_merged += 1;
    }

    /// Increment duplicate count by one.
    pub fn add_duplicate(&mut self) {
        self.report.cnt_duplicates += 1;
    }

    /// Increment skipped count by one.
    pub fn add_skipped(&mut self) {
        self.report.cnt_skipped += 1;
    }

    /// Increment reset count by one.
    pub fn add_reset(&mut self) {
        self.report.cnt_resets += 1;
    }

    /// Increment repeat count by one.
    pub fn add_repeat(&mut self) {
        self.report.cnt_repeats += 1;
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportFill {
        self.report
    }
}
