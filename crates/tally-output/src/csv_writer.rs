//! Per-sheet CSV output.

use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use tally_core::SheetReport;
use tally_model::OutputGrid;
use tracing::info;

use crate::atomic::write_files_atomic;
use crate::error::{OutputError, Result};
use crate::naming::{dedupe_names, sanitize_component};

/// Writes each report's grid to its own CSV file in `dir`.
///
/// A single report is written to `<stem>.csv`; several reports to
/// `<stem>_<sheet>.csv`, with `_2`, `_3`, ... appended when two sheet names
/// map to the same file name. Either every file is written or none is.
/// Returns the written paths in report order.
pub fn write_csv_reports(reports: &[SheetReport], dir: &Path, stem: &str) -> Result<Vec<PathBuf>> {
    if reports.is_empty() {
        return Err(OutputError::NoReports);
    }

    let names = if reports.len() == 1 {
        vec![stem.to_string()]
    } else {
        dedupe_names(
            reports
                .iter()
                .map(|report| format!("{stem}_{}", sanitize_component(&report.sheet_name))),
            usize::MAX,
        )
    };

    let mut rendered = Vec::with_capacity(reports.len());
    for (report, name) in reports.iter().zip(names) {
        let bytes = grid_to_csv(&report.grid).map_err(|source| OutputError::Csv {
            sheet: report.sheet_name.clone(),
            source,
        })?;
        rendered.push((dir.join(format!("{name}.csv")), bytes));
    }

    write_files_atomic(&rendered)?;
    let written: Vec<PathBuf> = rendered.into_iter().map(|(path, _)| path).collect();
    for path in &written {
        info!(path = %path.display(), "wrote CSV");
    }
    Ok(written)
}

/// Serializes a grid as CSV text. Merged regions show their text in the
/// anchor cell only.
pub fn grid_to_csv(grid: &OutputGrid) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in grid.text_rows() {
        writer.write_record(&row)?;
    }
    writer
        .into_inner()
        .map_err(|error| csv::Error::from(error.into_error()))
}
