//! Per-sheet and per-workbook report runs.

use std::time::Instant;

use tally_model::{
    DivisionGroup, MappingTable, OutputGrid, ReportOptions, Sheet, SheetErrorPolicy, StationCount,
    Workbook,
};
use tracing::{info, info_span, warn};

use crate::aggregate::aggregate;
use crate::counter::count_stations;
use crate::error::{CoreError, Result};
use crate::layout::layout;

/// Output of one sheet run.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetReport {
    pub sheet_name: String,
    pub records: usize,
    /// Sum of all station occurrences counted in the sheet.
    pub station_total: u64,
    pub groups: Vec<DivisionGroup>,
    pub unmatched: Vec<StationCount>,
    pub grid: OutputGrid,
}

/// A sheet dropped under [`SheetErrorPolicy::SkipSheet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSheet {
    pub sheet_name: String,
    pub reason: String,
}

/// Output of a whole workbook run, sheets in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookReport {
    pub source_name: String,
    pub sheets: Vec<SheetReport>,
    pub skipped: Vec<SkippedSheet>,
}

impl WorkbookReport {
    pub fn unmatched_count(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.unmatched.len()).sum()
    }
}

/// Counts, aggregates and lays out one sheet.
pub fn process_sheet(
    sheet: &Sheet,
    table: &MappingTable,
    options: &ReportOptions,
) -> Result<SheetReport> {
    let counts = count_stations(sheet, &options.station_field)?;
    let aggregation = aggregate(&counts, table, options.report_mode);
    let grid = layout(&aggregation.groups, options.layout_mode);
    grid.validate()?;

    if !aggregation.unmatched.is_empty() {
        warn!(
            sheet = %sheet.name,
            unmatched = aggregation.unmatched.len(),
            "stations not found in division mapping"
        );
    }

    Ok(SheetReport {
        sheet_name: sheet.name.clone(),
        records: sheet.records.len(),
        station_total: counts.total(),
        groups: aggregation.groups,
        unmatched: aggregation.unmatched,
        grid,
    })
}

/// Runs every sheet of `workbook` in order.
///
/// `table` should be a snapshot taken before the call; it is only read.
/// Under [`SheetErrorPolicy::Abort`] the first sheet without a station column
/// fails the run and no report is returned.
pub fn process_workbook(
    workbook: &Workbook,
    table: &MappingTable,
    options: &ReportOptions,
) -> Result<WorkbookReport> {
    if workbook.is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let span = info_span!("workbook", source = %workbook.source_name);
    let _guard = span.enter();
    let start = Instant::now();

    let mut report = WorkbookReport {
        source_name: workbook.source_name.clone(),
        ..WorkbookReport::default()
    };

    for sheet in &workbook.sheets {
        let sheet_span = info_span!("sheet", sheet = %sheet.name);
        match sheet_span.in_scope(|| process_sheet(sheet, table, options)) {
            Ok(sheet_report) => {
                info!(
                    sheet = %sheet.name,
                    records = sheet_report.records,
                    divisions = sheet_report.groups.len(),
                    rows = sheet_report.grid.height(),
                    "sheet processed"
                );
                report.sheets.push(sheet_report);
            }
            Err(error @ CoreError::MissingColumn { .. })
                if options.sheet_policy == SheetErrorPolicy::SkipSheet =>
            {
                warn!(sheet = %sheet.name, %error, "skipping sheet");
                report.skipped.push(SkippedSheet {
                    sheet_name: sheet.name.clone(),
                    reason: error.to_string(),
                });
            }
            Err(error) => return Err(error),
        }
    }

    if report.sheets.is_empty() {
        return Err(CoreError::EmptyInput);
    }

    info!(
        sheets = report.sheets.len(),
        skipped = report.skipped.len(),
        duration_ms = start.elapsed().as_millis(),
        "workbook processed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use tally_model::{FieldValue, ReportMode};

    use super::*;

    fn station_sheet(name: &str, stations: &[&str]) -> Sheet {
        Sheet::from_rows(
            name,
            vec!["STATION".to_string()],
            stations
                .iter()
                .map(|s| vec![FieldValue::from(*s)])
                .collect(),
        )
    }

    fn table() -> MappingTable {
        MappingTable::from_pairs([("North", vec!["A"])]).unwrap()
    }

    #[test]
    fn empty_workbook_is_empty_input() {
        let workbook = Workbook::new("in.xlsx", Vec::new());
        let result = process_workbook(&workbook, &table(), &ReportOptions::default());
        assert!(matches!(result, Err(CoreError::EmptyInput)));
    }

    #[test]
    fn abort_policy_fails_on_first_missing_column() {
        let bad = Sheet::from_rows("Bad", vec!["OFFICE".to_string()], vec![]);
        let workbook = Workbook::new("in.xlsx", vec![station_sheet("Good", &["A"]), bad]);
        let result = process_workbook(&workbook, &table(), &ReportOptions::default());
        match result {
            Err(CoreError::MissingColumn { sheet, .. }) => assert_eq!(sheet, "Bad"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn skip_policy_drops_bad_sheet() {
        let bad = Sheet::from_rows("Bad", vec!["OFFICE".to_string()], vec![]);
        let workbook = Workbook::new(
            "in.xlsx",
            vec![bad, station_sheet("Good", &["A", "A", "B"])],
        );
        let options = ReportOptions::default().with_sheet_policy(SheetErrorPolicy::SkipSheet);
        let report = process_workbook(&workbook, &table(), &options).unwrap();
        assert_eq!(report.sheets.len(), 1);
        assert_eq!(report.sheets[0].sheet_name, "Good");
        assert_eq!(report.sheets[0].station_total, 3);
        assert_eq!(report.unmatched_count(), 1);
        assert_eq!(report.skipped[0].sheet_name, "Bad");
    }

    #[test]
    fn skip_policy_with_no_usable_sheet_is_empty_input() {
        let bad = Sheet::from_rows("Bad", vec!["OFFICE".to_string()], vec![]);
        let workbook = Workbook::new("in.xlsx", vec![bad]);
        let options = ReportOptions::default().with_sheet_policy(SheetErrorPolicy::SkipSheet);
        let result = process_workbook(&workbook, &table(), &options);
        assert!(matches!(result, Err(CoreError::EmptyInput)));
    }

    #[test]
    fn sheet_order_and_names_preserved() {
        let workbook = Workbook::new(
            "in.xlsx",
            vec![station_sheet("March", &["A"]), station_sheet("April", &[])],
        );
        let options = ReportOptions::default().with_report_mode(ReportMode::ClassifyObserved);
        let report = process_workbook(&workbook, &table(), &options).unwrap();
        let names: Vec<&str> = report.sheets.iter().map(|s| s.sheet_name.as_str()).collect();
        assert_eq!(names, vec!["March", "April"]);
        assert!(report.sheets[1].groups.is_empty());
    }
}
