//! One `process` run: read the input, build the reports, write the output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tally_core::{WorkbookReport, process_workbook};
use tally_ingest::read_workbook;
use tally_model::{MappingTable, ReportOptions};
use tally_output::{processed_file_name, processed_stem, write_csv_reports, write_xlsx};
use tracing::{debug, info, info_span};

use crate::logging::redact_value;

/// Report file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One workbook, one worksheet per input sheet.
    #[default]
    Xlsx,
    /// One CSV file per input sheet.
    Csv,
}

#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub input: PathBuf,
    /// Defaults to the input's directory.
    pub output_dir: Option<PathBuf>,
    pub format: OutputFormat,
    /// Build and summarize the reports without writing files.
    pub dry_run: bool,
    pub options: ReportOptions,
}

impl ProcessRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: None,
            format: OutputFormat::default(),
            dry_run: false,
            options: ReportOptions::default(),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            self.input
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        })
    }
}

#[derive(Debug)]
pub struct ProcessOutcome {
    pub input: PathBuf,
    pub report: WorkbookReport,
    /// Written files; empty on a dry run.
    pub outputs: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Runs `request` against `mapping`.
///
/// Nothing is written unless every sheet was processed.
pub fn process_file(request: &ProcessRequest, mapping: &MappingTable) -> Result<ProcessOutcome> {
    let span = info_span!("process", input = %request.input.display());
    let _guard = span.enter();

    let workbook = read_workbook(&request.input)
        .with_context(|| format!("read {}", request.input.display()))?;
    let report = process_workbook(&workbook, mapping, &request.options)
        .with_context(|| format!("process {}", workbook.source_name))?;

    for sheet in &report.sheets {
        for station in &sheet.unmatched {
            debug!(
                sheet = %sheet.sheet_name,
                station = redact_value(&station.station),
                count = station.count,
                "unmatched station"
            );
        }
    }

    let outputs = if request.dry_run {
        info!("dry run, no files written");
        Vec::new()
    } else {
        write_outputs(request, &report)?
    };

    Ok(ProcessOutcome {
        input: request.input.clone(),
        report,
        outputs,
        dry_run: request.dry_run,
    })
}

fn write_outputs(request: &ProcessRequest, report: &WorkbookReport) -> Result<Vec<PathBuf>> {
    let dir = request.output_dir();
    match request.format {
        OutputFormat::Xlsx => {
            let path = dir.join(processed_file_name(&request.input, "xlsx"));
            write_xlsx(&report.sheets, &path)
                .with_context(|| format!("write {}", path.display()))?;
            Ok(vec![path])
        }
        OutputFormat::Csv => {
            let stem = processed_stem(&request.input);
            write_csv_reports(&report.sheets, &dir, &stem)
                .with_context(|| format!("write CSV output to {}", dir.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_defaults_to_input_parent() {
        let request = ProcessRequest::new("/data/in/march.xlsx");
        assert_eq!(request.output_dir(), PathBuf::from("/data/in"));

        let request = ProcessRequest::new("march.xlsx");
        assert_eq!(request.output_dir(), PathBuf::from("."));
    }
}
