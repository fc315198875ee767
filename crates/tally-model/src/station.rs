use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationCount {
    pub station: String,
    pub count: u64,
}

/// Occurrence counts keyed by exact (trimmed, case-sensitive) station name.
///
/// Iteration follows first-seen order, which is the order later
/// case-insensitive lookups resolve ties in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationCounts {
    entries: Vec<StationCount>,
    index: HashMap<String, usize>,
}

impl StationCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `station`.
    pub fn increment(&mut self, station: &str) {
        self.add(station, 1);
    }

    /// Adds `count` occurrences. A zero count is ignored so that every
    /// stored entry keeps `count >= 1`.
    pub fn add(&mut self, station: &str, count: u64) {
        if count == 0 {
            return;
        }
        match self.index.get(station) {
            Some(&position) => self.entries[position].count += count,
            None => {
                self.index.insert(station.to_string(), self.entries.len());
                self.entries.push(StationCount {
                    station: station.to_string(),
                    count,
                });
            }
        }
    }

    pub fn get(&self, station: &str) -> Option<u64> {
        self.index
            .get(station)
            .map(|&position| self.entries[position].count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.count).sum()
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for StationCounts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (station, count) in iter {
            counts.add(station.as_ref(), count);
        }
        counts
    }
}

impl<'a> IntoIterator for &'a StationCounts {
    type Item = &'a StationCount;
    type IntoIter = std::slice::Iter<'a, StationCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
