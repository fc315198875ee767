//! Input loading for toolkit tally reports.
//!
//! # Features
//!
//! - **Spreadsheets**: xlsx, xlsm, xlsb, xls and ods via calamine, every
//!   sheet in workbook order
//! - **CSV**: a single sheet named after the file stem
//!
//! The first non-empty row of each sheet is its header row.

mod csv_reader;
mod error;
mod excel;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use csv_reader::read_csv_sheet;
pub use excel::read_excel_sheets;
pub use source::{SourceFormat, read_workbook};
