//! Mapping text parsing and the bundled default table.

use tally_model::MappingTable;

use crate::error::{MapError, Result};

const DEFAULT_MAPPING_JSON: &str = include_str!("../data/default_mapping.json");

/// Parses user-supplied mapping text.
///
/// The text must be a JSON object whose keys are division names and whose
/// values are arrays of member name strings. Division order is kept as
/// written.
pub fn parse_mapping_text(text: &str) -> Result<MappingTable> {
    if text.trim().is_empty() {
        return Err(MapError::invalid("mapping text is empty"));
    }
    serde_json::from_str(text).map_err(|err| MapError::invalid(err.to_string()))
}

/// Renders a table as pretty-printed JSON, the same shape `parse_mapping_text`
/// accepts.
pub fn mapping_to_json(table: &MappingTable) -> Result<String> {
    serde_json::to_string_pretty(table).map_err(MapError::Serialize)
}

/// The table shipped with the tool, used until a user mapping is stored.
pub fn default_mapping() -> MappingTable {
    // The bundled file is checked by `default_mapping_parses`.
    parse_mapping_text(DEFAULT_MAPPING_JSON).unwrap_or_default()
}

/// Normalized comparison key: trimmed and lowercased.
pub fn fold_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_parses() {
        let table = parse_mapping_text(DEFAULT_MAPPING_JSON).expect("bundled mapping");
        assert!(!table.is_empty());
        assert_eq!(table, default_mapping());
    }

    #[test]
    fn empty_text_rejected() {
        let err = parse_mapping_text("   ").unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn syntax_error_rejected() {
        let err = parse_mapping_text(r#"{"North": ["A",}"#).unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn json_round_trips_through_text() {
        let table = parse_mapping_text(r#"{"B": ["x"], "A": ["y", "z"]}"#).unwrap();
        let text = mapping_to_json(&table).unwrap();
        assert_eq!(parse_mapping_text(&text).unwrap(), table);
    }

    #[test]
    fn fold_key_trims_and_lowercases() {
        assert_eq!(fold_key("  NYC "), "nyc");
    }
}
