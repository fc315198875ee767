use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tally_core::WorkbookReport;
use tally_map::MappingSource;
use tally_model::MappingTable;

use tally_cli::process::ProcessOutcome;

pub fn print_summary(outcome: &ProcessOutcome) {
    println!("Input: {}", outcome.input.display());
    if outcome.dry_run {
        println!("Dry run: no files written");
    }
    for path in &outcome.outputs {
        println!("Output: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Records"),
        header_cell("Stations"),
        header_cell("Divisions"),
        header_cell("Rows"),
        header_cell("Unmatched"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in summary_rows(&outcome.report) {
        let unmatched = row.unmatched;
        table.add_row(vec![
            Cell::new(row.sheet)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(row.records),
            Cell::new(row.stations),
            Cell::new(row.divisions),
            Cell::new(row.rows),
            count_cell(unmatched, Color::Yellow),
        ]);
    }
    println!("{table}");

    print_unmatched(&outcome.report);
    if !outcome.report.skipped.is_empty() {
        eprintln!("Skipped sheets:");
        for skipped in &outcome.report.skipped {
            eprintln!("- {}: {}", skipped.sheet_name, skipped.reason);
        }
    }
}

pub fn print_mapping(mapping: &MappingTable, source: MappingSource) {
    println!("Mapping: {}", source_label(source));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Division"),
        header_cell("Members"),
        header_cell("Stations"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for division in mapping.iter() {
        table.add_row(vec![
            Cell::new(&division.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(division.members.len()),
            Cell::new(division.members.join(", ")),
        ]);
    }
    println!("{table}");
}

/// One summary line per processed sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SummaryRow {
    sheet: String,
    records: usize,
    stations: u64,
    divisions: usize,
    rows: usize,
    unmatched: usize,
}

fn summary_rows(report: &WorkbookReport) -> Vec<SummaryRow> {
    report
        .sheets
        .iter()
        .map(|sheet| SummaryRow {
            sheet: sheet.sheet_name.clone(),
            records: sheet.records,
            stations: sheet.station_total,
            divisions: sheet.groups.len(),
            rows: sheet.grid.height(),
            unmatched: sheet.unmatched.len(),
        })
        .collect()
}

fn print_unmatched(report: &WorkbookReport) {
    if report.unmatched_count() == 0 {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Unmatched station"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for sheet in &report.sheets {
        for station in &sheet.unmatched {
            table.add_row(vec![
                Cell::new(&sheet.sheet_name),
                Cell::new(&station.station).fg(Color::Yellow),
                Cell::new(station.count),
            ]);
        }
    }
    println!("{table}");
}

fn source_label(source: MappingSource) -> &'static str {
    match source {
        MappingSource::Default => "bundled default",
        MappingSource::Stored => "stored",
        MappingSource::User => "user supplied",
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::DarkGrey)
    } else {
        Cell::new(count).fg(color)
    }
}

#[cfg(test)]
mod tests {
    use tally_core::process_workbook;
    use tally_model::{FieldValue, ReportOptions, Sheet, Workbook};

    use super::*;

    #[test]
    fn rows_follow_sheet_order() {
        let sheet = |name: &str, stations: &[&str]| {
            Sheet::from_rows(
                name,
                vec!["STATION".to_string()],
                stations
                    .iter()
                    .map(|s| vec![FieldValue::from(*s)])
                    .collect(),
            )
        };
        let workbook = Workbook::new(
            "toolkits.xlsx",
            vec![
                sheet("March", &["Alpha", "Alpha", "Zed"]),
                sheet("April", &[]),
            ],
        );
        let table = tally_map::parse_mapping_text(r#"{"North": ["Alpha", "Beta"]}"#).unwrap();
        let report = process_workbook(&workbook, &table, &ReportOptions::default()).unwrap();

        let rendered: Vec<String> = summary_rows(&report)
            .iter()
            .map(|row| {
                format!(
                    "{} records={} stations={} divisions={} rows={} unmatched={}",
                    row.sheet, row.records, row.stations, row.divisions, row.rows, row.unmatched
                )
            })
            .collect();
        insta::assert_snapshot!(rendered.join("\n"), @r"
        March records=3 stations=3 divisions=1 rows=5 unmatched=1
        April records=0 stations=0 divisions=1 rows=5 unmatched=0
        ");
    }
}
