//! Station occurrence counting for one sheet.

use tally_model::{Sheet, StationCounts};
use tracing::debug;

use crate::error::{CoreError, Result};

/// Finds the station column: the first field whose trimmed name equals
/// `hint` ignoring case.
///
/// Header names are used when the sheet carries a header row; otherwise the
/// field names of the first record are scanned.
pub fn locate_station_field<'a>(sheet: &'a Sheet, hint: &str) -> Option<&'a str> {
    let wanted = hint.trim().to_lowercase();
    let matches = |name: &&'a str| name.trim().to_lowercase() == wanted;
    if sheet.headers.is_empty() {
        sheet
            .records
            .first()
            .and_then(|record| record.field_names().find(matches))
    } else {
        sheet.headers.iter().map(String::as_str).find(matches)
    }
}

/// Counts occurrences of each distinct trimmed station value in `sheet`.
///
/// Blank station cells are skipped. Keys are case-sensitive; folding is left
/// to classification.
pub fn count_stations(sheet: &Sheet, hint: &str) -> Result<StationCounts> {
    let field = locate_station_field(sheet, hint).ok_or_else(|| CoreError::MissingColumn {
        sheet: sheet.name.clone(),
        column: hint.trim().to_string(),
    })?;

    let mut counts = StationCounts::new();
    let mut skipped = 0usize;
    for record in &sheet.records {
        let Some(value) = record.get(field) else {
            skipped += 1;
            continue;
        };
        if value.is_blank() {
            skipped += 1;
            continue;
        }
        let text = value.to_text();
        let station = text.trim();
        if station.is_empty() {
            skipped += 1;
            continue;
        }
        counts.increment(station);
    }

    debug!(
        sheet = %sheet.name,
        field,
        records = sheet.records.len(),
        stations = counts.len(),
        skipped,
        "counted stations"
    );
    Ok(counts)
}
