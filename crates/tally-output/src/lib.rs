//! Report output for toolkit tally runs.
//!
//! # Features
//!
//! - **xlsx**: one worksheet per sheet report with header merges, bold
//!   division headers and column widths
//! - **CSV**: one file per sheet report
//! - **Naming**: `processed_<input stem>` output names
//!
//! Files are written to a temp path and renamed into place.

mod atomic;
mod csv_writer;
mod error;
mod naming;
mod xlsx;

// === Error Types ===
pub use error::{OutputError, Result};

// === Writers ===
pub use csv_writer::{grid_to_csv, write_csv_reports};
pub use xlsx::{write_grid, write_xlsx};

// === Naming ===
pub use naming::{OUTPUT_PREFIX, processed_file_name, processed_stem};
