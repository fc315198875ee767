//! Station to division classification.
//!
//! Matching is case-insensitive on trimmed names. When a station is declared
//! under more than one division, the division that comes first in the
//! table's order wins. Stations with no match fall back to
//! [`OTHER_DIVISION`].

use std::collections::HashMap;

use tally_model::{MappingTable, OTHER_DIVISION};

use crate::parse::fold_key;

/// Returns the division owning `station`, or `"Other"`.
pub fn classify<'a>(station: &str, table: &'a MappingTable) -> &'a str {
    let key = fold_key(station);
    table
        .iter()
        .find(|entry| entry.members.iter().any(|member| fold_key(member) == key))
        .map_or(OTHER_DIVISION, |entry| entry.name.as_str())
}

/// A pre-indexed classifier for classifying many stations against one table.
///
/// Gives the same answers as [`classify`].
#[derive(Debug, Clone)]
pub struct DivisionClassifier<'a> {
    index: HashMap<String, Match<'a>>,
}

#[derive(Debug, Clone, Copy)]
struct Match<'a> {
    division: &'a str,
    member: &'a str,
}

impl<'a> DivisionClassifier<'a> {
    pub fn new(table: &'a MappingTable) -> Self {
        let mut index = HashMap::new();
        for entry in table.iter() {
            for member in &entry.members {
                index.entry(fold_key(member)).or_insert(Match {
                    division: entry.name.as_str(),
                    member: member.as_str(),
                });
            }
        }
        Self { index }
    }

    pub fn classify(&self, station: &str) -> &'a str {
        self.index
            .get(&fold_key(station))
            .map_or(OTHER_DIVISION, |found| found.division)
    }

    /// Division and declared member spelling for a station, if mapped.
    pub fn lookup(&self, station: &str) -> Option<(&'a str, &'a str)> {
        self.index
            .get(&fold_key(station))
            .map(|found| (found.division, found.member))
    }
}
