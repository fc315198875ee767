//! Aggregation and layout engine for division toolkit reports.
//!
//! One sheet flows through three stages:
//!
//! 1. [`count_stations`]: distinct trimmed station value -> occurrences
//! 2. [`aggregate`]: counts + mapping table -> sorted division groups
//! 3. [`layout`]: groups -> rectangular [`OutputGrid`] with header merges,
//!    style markers and column width hints
//!
//! [`process_workbook`] runs the stages for every sheet, in order.
//!
//! [`OutputGrid`]: tally_model::OutputGrid

mod aggregate;
mod counter;
mod error;
mod layout;
mod pipeline;

pub use aggregate::{Aggregation, aggregate, aggregate_mapping_driven, aggregate_observed};
pub use counter::{count_stations, locate_station_field};
pub use error::{CoreError, Result};
pub use layout::{COUNT_LABEL, DIVISION_HEADER_STYLE, OFFICE_LABEL, TOTAL_LABEL, layout};
pub use pipeline::{SheetReport, SkippedSheet, WorkbookReport, process_sheet, process_workbook};
