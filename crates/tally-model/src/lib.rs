//! Data model for division toolkit tally reports.
//!
//! Input side: [`Workbook`] / [`Sheet`] / [`Record`]. Intermediate:
//! [`StationCounts`], [`MappingTable`], [`DivisionGroup`]. Output:
//! [`OutputGrid`] plus the option enums that select how it is built.

pub mod error;
pub mod grid;
pub mod group;
pub mod mapping;
pub mod options;
pub mod record;
pub mod station;

pub use error::{ModelError, Result};
pub use grid::{Cell, CellStyle, ColumnWidth, MergeRegion, OutputGrid, StyledCell};
pub use group::{DivisionGroup, MemberCount, OTHER_DIVISION};
pub use mapping::{DivisionEntry, MappingTable};
pub use options::{
    DEFAULT_STATION_FIELD, LayoutMode, ReportMode, ReportOptions, SheetErrorPolicy,
};
pub use record::{
    FALLBACK_SHEET_NAME, FieldValue, MAX_SHEET_NAME_CHARS, Record, Sheet, Workbook,
    worksheet_name,
};
pub use station::{StationCount, StationCounts};
