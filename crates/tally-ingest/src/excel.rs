//! Spreadsheet input via calamine (xlsx, xlsm, xlsb, xls, ods).

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tally_model::{FieldValue, Sheet};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Reads every sheet of a spreadsheet file, in workbook order.
///
/// The first row with any non-empty cell is the header row. Rows after it
/// become records; rows with no content are skipped.
pub fn read_excel_sheets(path: &Path) -> Result<Vec<Sheet>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| IngestError::SheetRead {
                path: path.to_path_buf(),
                sheet: name.clone(),
                message: e.to_string(),
            })?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(to_field_value).collect::<Vec<_>>())
            .filter(|row| row.iter().any(|value| !value.is_blank()));

        let headers: Vec<String> = rows
            .next()
            .map(|header| header.iter().map(FieldValue::to_text).collect())
            .unwrap_or_default();
        let body: Vec<Vec<FieldValue>> = rows.collect();

        debug!(
            sheet = %name,
            columns = headers.len(),
            rows = body.len(),
            "read sheet"
        );
        sheets.push(Sheet::from_rows(name, headers, body));
    }
    Ok(sheets)
}

fn to_field_value(cell: &Data) -> FieldValue {
    match cell {
        Data::Empty => FieldValue::Blank,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            FieldValue::Text(text.clone())
        }
        Data::Float(value) => FieldValue::Number(*value),
        Data::Int(value) => FieldValue::Number(*value as f64),
        Data::Bool(value) => FieldValue::Bool(*value),
        Data::DateTime(value) => FieldValue::Number(value.as_f64()),
        Data::Error(error) => FieldValue::Text(error.to_string()),
    }
}
