//! Configuration options for report generation.

use serde::{Deserialize, Serialize};

/// Default name of the station-bearing field in input sheets.
pub const DEFAULT_STATION_FIELD: &str = "STATION";

/// How division member lists are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportMode {
    /// Every division in the mapping, with its full declared member list.
    /// Members without matching rows get a zero count.
    #[default]
    MappingDriven,
    /// Only stations observed in the input, classified into divisions.
    /// Unmatched stations land in the "Other" division.
    ClassifyObserved,
}

/// How division groups are rendered into a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Two columns per division, merged header, sub-header and Total row.
    #[default]
    TotalsGrid,
    /// Three columns per division (member, count, spacer) under a single
    /// styled header row.
    GroupedHeader,
}

impl LayoutMode {
    pub fn columns_per_block(self) -> usize {
        match self {
            Self::TotalsGrid => 2,
            Self::GroupedHeader => 3,
        }
    }

    /// Number of rows above the member rows.
    pub fn header_rows(self) -> usize {
        match self {
            Self::TotalsGrid => 2,
            Self::GroupedHeader => 1,
        }
    }
}

/// What to do with a sheet that has no station column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SheetErrorPolicy {
    /// Fail the whole run on the first offending sheet.
    #[default]
    Abort,
    /// Drop the sheet from the output and keep going.
    SkipSheet,
}

/// Options controlling a report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    pub report_mode: ReportMode,
    pub layout_mode: LayoutMode,
    /// Header name of the station column (matched case-insensitively).
    pub station_field: String,
    pub sheet_policy: SheetErrorPolicy,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            report_mode: ReportMode::default(),
            layout_mode: LayoutMode::default(),
            station_field: DEFAULT_STATION_FIELD.to_string(),
            sheet_policy: SheetErrorPolicy::default(),
        }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report_mode(mut self, mode: ReportMode) -> Self {
        self.report_mode = mode;
        self
    }

    pub fn with_layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = mode;
        self
    }

    pub fn with_station_field(mut self, field: impl Into<String>) -> Self {
        self.station_field = field.into();
        self
    }

    pub fn with_sheet_policy(mut self, policy: SheetErrorPolicy) -> Self {
        self.sheet_policy = policy;
        self
    }
}
