//! CSV input: one file is one sheet named after the file stem.

use std::path::Path;

use csv::ReaderBuilder;
use tally_model::{FALLBACK_SHEET_NAME, FieldValue, Sheet, worksheet_name};

use crate::error::{IngestError, Result};

/// Reads a CSV file with a header row into a single sheet.
pub fn read_csv_sheet(path: &Path) -> Result<Sheet> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(to_field_value).collect());
    }

    Ok(Sheet::from_rows(sheet_name_for(path), headers, rows))
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').to_string()
}

fn to_field_value(raw: &str) -> FieldValue {
    if raw.trim().is_empty() {
        FieldValue::Blank
    } else {
        FieldValue::Text(raw.to_string())
    }
}

/// The file stem, made valid as a worksheet name.
fn sheet_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| worksheet_name(&stem.to_string_lossy()))
        .unwrap_or_else(|| FALLBACK_SHEET_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header_strips_bom() {
        assert_eq!(normalize_header("\u{feff}STATION"), "STATION");
        assert_eq!(normalize_header(" STATION "), " STATION ");
    }

    #[test]
    fn test_sheet_name_from_long_stem() {
        let path = Path::new("/data/toolkit_entries_march_2026_final_v2.csv");
        assert_eq!(sheet_name_for(path), "toolkit_entries_march_2026_fina");
        assert_eq!(sheet_name_for(Path::new("march.csv")), "march");
    }

    #[test]
    fn test_blank_values() {
        assert_eq!(to_field_value("  "), FieldValue::Blank);
        assert_eq!(to_field_value(" A "), FieldValue::Text(" A ".to_string()));
    }
}
