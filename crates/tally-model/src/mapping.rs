//! Division to member association consulted by the classifier.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionEntry {
    pub name: String,
    pub members: Vec<String>,
}

/// Ordered division table.
///
/// Division order is significant: when a station is declared under several
/// divisions, the first division in table order owns it. The JSON form is an
/// object of `division -> [member, ...]`; key order is preserved on both
/// read and write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    divisions: Vec<DivisionEntry>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(division, members)` pairs.
    ///
    /// A repeated division name replaces the earlier member list but keeps
    /// its original position.
    pub fn from_pairs<I, N, M, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, M)>,
        N: Into<String>,
        M: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, members) in pairs {
            table.insert(name, members.into_iter().map(Into::into).collect())?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, name: impl Into<String>, members: Vec<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyDivisionName);
        }
        match self.divisions.iter_mut().find(|entry| entry.name == name) {
            Some(existing) => existing.members = members,
            None => self.divisions.push(DivisionEntry { name, members }),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.divisions
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.members.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DivisionEntry> {
        self.divisions.iter()
    }

    pub fn division_names(&self) -> impl Iterator<Item = &str> {
        self.divisions.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.divisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }

    /// Total number of declared members, duplicates included.
    pub fn member_count(&self) -> usize {
        self.divisions.iter().map(|entry| entry.members.len()).sum()
    }
}

impl Serialize for MappingTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.divisions.len()))?;
        for entry in &self.divisions {
            map.serialize_entry(&entry.name, &entry.members)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MappingTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(MappingTableVisitor)
    }
}

struct MappingTableVisitor;

impl<'de> Visitor<'de> for MappingTableVisitor {
    type Value = MappingTable;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping division names to arrays of member names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut table = MappingTable::new();
        while let Some((name, members)) = access.next_entry::<String, Vec<String>>()? {
            table.insert(name, members).map_err(serde::de::Error::custom)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_division_keeps_position() {
        let table = MappingTable::from_pairs([
            ("North", vec!["A"]),
            ("South", vec!["B"]),
            ("North", vec!["C"]),
        ])
        .unwrap();
        let names: Vec<&str> = table.division_names().collect();
        assert_eq!(names, vec!["North", "South"]);
        assert_eq!(table.get("North"), Some(&["C".to_string()][..]));
    }

    #[test]
    fn blank_division_name_rejected() {
        let result = MappingTable::from_pairs([("  ", vec!["A"])]);
        assert_eq!(result.unwrap_err(), ModelError::EmptyDivisionName);
    }
}
