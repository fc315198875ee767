//! Workbook output via rust_xlsxwriter.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tally_core::SheetReport;
use tally_model::{Cell, CellStyle, MAX_SHEET_NAME_CHARS, OutputGrid, worksheet_name};
use tracing::{debug, info, warn};

use crate::atomic::write_files_atomic;
use crate::error::{OutputError, Result};
use crate::naming::dedupe_names;

/// Writes one worksheet per report, in order, to `path`.
///
/// Worksheets are named after the report's sheet, made valid (see
/// [`worksheet_name`]) and unique. The file is only created once every
/// sheet has been rendered.
pub fn write_xlsx(reports: &[SheetReport], path: &Path) -> Result<()> {
    if reports.is_empty() {
        return Err(OutputError::NoReports);
    }

    let mut workbook = Workbook::new();
    for (report, name) in reports.iter().zip(worksheet_names(reports)) {
        if name != report.sheet_name {
            warn!(sheet = %report.sheet_name, worksheet = %name, "renamed worksheet");
        }
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&name)?;
        write_grid(worksheet, &report.grid)?;
        debug!(
            sheet = %name,
            rows = report.grid.height(),
            columns = report.grid.width(),
            "rendered worksheet"
        );
    }

    let bytes = workbook.save_to_buffer()?;
    write_files_atomic(&[(path.to_path_buf(), bytes)])?;
    info!(path = %path.display(), sheets = reports.len(), "wrote workbook");
    Ok(())
}

/// Renders `grid` into `worksheet` starting at A1.
pub fn write_grid(worksheet: &mut Worksheet, grid: &OutputGrid) -> Result<()> {
    for (col, width) in grid.column_widths.iter().enumerate() {
        worksheet.set_column_width(col_index(col), width.characters())?;
    }

    for merge in &grid.merges {
        let text = grid
            .cell(merge.row, merge.first_col)
            .map(Cell::to_string)
            .unwrap_or_default();
        let format = grid
            .style_at(merge.row, merge.first_col)
            .map(to_format)
            .unwrap_or_else(Format::new);
        worksheet.merge_range(
            row_index(merge.row),
            col_index(merge.first_col),
            row_index(merge.row),
            col_index(merge.last_col),
            &text,
            &format,
        )?;
    }

    for (row, cells) in grid.rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if grid.merge_at(row, col).is_some() {
                continue;
            }
            let (r, c) = (row_index(row), col_index(col));
            match (cell, grid.style_at(row, col)) {
                (Cell::Empty, _) => {}
                (Cell::Text(text), Some(style)) => {
                    worksheet.write_string_with_format(r, c, text, &to_format(style))?;
                }
                (Cell::Text(text), None) => {
                    worksheet.write_string(r, c, text)?;
                }
                (Cell::Number(value), Some(style)) => {
                    worksheet.write_number_with_format(r, c, *value as f64, &to_format(style))?;
                }
                (Cell::Number(value), None) => {
                    worksheet.write_number(r, c, *value as f64)?;
                }
            }
        }
    }
    Ok(())
}

/// Valid, case-insensitively unique worksheet names in report order.
fn worksheet_names(reports: &[SheetReport]) -> Vec<String> {
    dedupe_names(
        reports.iter().map(|report| worksheet_name(&report.sheet_name)),
        MAX_SHEET_NAME_CHARS,
    )
}

fn to_format(style: CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if let Some(size) = style.font_size {
        format = format.set_font_size(size);
    }
    format
}

// Out-of-range indices saturate; the writer rejects them.
fn row_index(row: usize) -> u32 {
    u32::try_from(row).unwrap_or(u32::MAX)
}

fn col_index(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}
