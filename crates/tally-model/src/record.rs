//! Input records as handed over by the workbook reader.

use serde::{Deserialize, Serialize};

/// A scalar cell value from an input sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Blank,
}

impl FieldValue {
    /// Returns true for `Blank` and for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Blank => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    /// Coerces the value to its display string.
    ///
    /// Integral numbers are rendered without a fractional part so that a
    /// station code stored as `101.0` counts the same as the text `101`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(value) => format_number(*value),
            Self::Bool(true) => "TRUE".to_string(),
            Self::Bool(false) => "FALSE".to_string(),
            Self::Blank => String::new(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One input row: field names in sheet column order with their values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    /// Exact-name lookup. Returns the first field with this name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

/// A named sheet of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    /// Header row as read from the source. Empty when the source had none.
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            headers,
            records,
        }
    }

    /// Builds a sheet from a header row and positional rows.
    ///
    /// Rows shorter than the header are padded with `Blank`; extra trailing
    /// cells are dropped.
    pub fn from_rows(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<FieldValue>>,
    ) -> Self {
        let records = rows
            .into_iter()
            .map(|row| {
                let mut values = row.into_iter();
                let mut record = Record::new();
                for header in &headers {
                    record.push(header.clone(), values.next().unwrap_or(FieldValue::Blank));
                }
                record
            })
            .collect();
        Self::new(name, headers, records)
    }
}

/// All sheets of one input file, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// File name of the source, used to derive the output name.
    pub source_name: String,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(source_name: impl Into<String>, sheets: Vec<Sheet>) -> Self {
        Self {
            source_name: source_name.into(),
            sheets,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Longest worksheet name spreadsheet applications accept.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

/// Sheet name used when nothing usable is left of the source name.
pub const FALLBACK_SHEET_NAME: &str = "Sheet1";

/// Turns `raw` into a name a spreadsheet accepts as a worksheet name.
///
/// `[ ] : * ? / \` become `_`, leading and trailing apostrophes are
/// dropped and the result is cut to [`MAX_SHEET_NAME_CHARS`] characters.
pub fn worksheet_name(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let truncated: String = cleaned
        .trim_matches('\'')
        .chars()
        .take(MAX_SHEET_NAME_CHARS)
        .collect();
    let name = truncated.trim_end_matches('\'').trim_end();
    if name.is_empty() {
        FALLBACK_SHEET_NAME.to_string()
    } else {
        name.to_string()
    }
}
