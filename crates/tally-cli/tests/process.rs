//! End-to-end runs through `process_file` on files in a temp directory.

use std::fs;
use std::path::Path;

use tally_cli::process::{OutputFormat, ProcessRequest, process_file};
use tally_model::{LayoutMode, MappingTable, ReportOptions, SheetErrorPolicy};
use tempfile::tempdir;

fn mapping() -> MappingTable {
    tally_map::parse_mapping_text(r#"{"Div1":["Alpha","Beta"],"Div2":["Gamma"]}"#).unwrap()
}

fn write_input(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn csv_input_to_csv_output() {
    let dir = tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "march.csv",
        "ID,STATION\n1,Alpha\n2,beta\n3,Alpha\n4,Gamma\n",
    );
    let mut request = ProcessRequest::new(&input);
    request.format = OutputFormat::Csv;

    let outcome = process_file(&request, &mapping()).unwrap();
    assert_eq!(outcome.outputs, vec![dir.path().join("processed_march.csv")]);

    let text = fs::read_to_string(&outcome.outputs[0]).unwrap();
    insta::assert_snapshot!(text, @r"
    Div1,,Div2,
    Office,No. of Toolkits,Office,No. of Toolkits
    Alpha,2,Gamma,1
    Beta,1,,
    Total,3,Total,1
    ");
}

#[test]
fn xlsx_output_lands_in_output_dir() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "march.csv", "STATION\nAlpha\n");
    let out = dir.path().join("reports");
    let mut request = ProcessRequest::new(&input);
    request.output_dir = Some(out.clone());
    request.options = ReportOptions::default().with_layout_mode(LayoutMode::GroupedHeader);

    let outcome = process_file(&request, &mapping()).unwrap();
    let expected = out.join("processed_march.xlsx");
    assert_eq!(outcome.outputs, vec![expected.clone()]);
    assert!(expected.is_file());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "march.csv", "STATION\nAlpha\nZed\n");
    let mut request = ProcessRequest::new(&input);
    request.dry_run = true;

    let outcome = process_file(&request, &mapping()).unwrap();
    assert!(outcome.outputs.is_empty());
    assert_eq!(outcome.report.unmatched_count(), 1);
    assert!(!dir.path().join("processed_march.xlsx").exists());
}

#[test]
fn missing_station_column_fails_without_output() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "march.csv", "OFFICE\nAlpha\n");
    let request = ProcessRequest::new(&input);

    let error = process_file(&request, &mapping()).unwrap_err();
    assert!(format!("{error:#}").contains("has no 'STATION' column"));
    assert!(!dir.path().join("processed_march.xlsx").exists());
}

#[test]
fn skip_policy_still_fails_when_nothing_usable() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "march.csv", "OFFICE\nAlpha\n");
    let mut request = ProcessRequest::new(&input);
    request.options = ReportOptions::default().with_sheet_policy(SheetErrorPolicy::SkipSheet);

    assert!(process_file(&request, &mapping()).is_err());
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempdir().unwrap();
    let request = ProcessRequest::new(dir.path().join("absent.xlsx"));
    let error = process_file(&request, &mapping()).unwrap_err();
    assert!(format!("{error:#}").contains("input file not found"));
}
