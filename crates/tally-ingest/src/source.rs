//! Input format detection and workbook loading.

use std::path::Path;

use tally_model::Workbook;
use tracing::{debug, info};

use crate::csv_reader::read_csv_sheet;
use crate::error::{IngestError, Result};
use crate::excel::read_excel_sheets;

/// Input container kind, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Any spreadsheet calamine can open.
    Spreadsheet,
    /// A single delimited text sheet.
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Spreadsheet),
            "csv" => Ok(Self::Csv),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Loads every sheet of `path` into a [`Workbook`].
///
/// The workbook's source name is the input file name.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let format = SourceFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "reading input");

    let sheets = match format {
        SourceFormat::Spreadsheet => read_excel_sheets(path)?,
        SourceFormat::Csv => vec![read_csv_sheet(path)?],
    };
    if sheets.is_empty() {
        return Err(IngestError::NoSheets {
            path: path.to_path_buf(),
        });
    }

    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!(
        source = %source_name,
        sheets = sheets.len(),
        records = sheets.iter().map(|s| s.records.len()).sum::<usize>(),
        "input loaded"
    );
    Ok(Workbook::new(source_name, sheets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a/March.XLSX")).unwrap(),
            SourceFormat::Spreadsheet
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("dump.csv")).unwrap(),
            SourceFormat::Csv
        );
        assert!(matches!(
            SourceFormat::from_path(Path::new("notes.txt")),
            Err(IngestError::UnsupportedFormat { extension, .. }) if extension == "txt"
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_workbook(Path::new("/nonexistent/input.xlsx")),
            Err(IngestError::FileNotFound { .. })
        ));
    }
}
