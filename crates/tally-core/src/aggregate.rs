//! Grouping of station counts into sorted division member lists.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use tally_map::{DivisionClassifier, fold_key};
use tally_model::{
    DivisionGroup, MappingTable, MemberCount, OTHER_DIVISION, ReportMode, StationCount,
    StationCounts,
};
use tracing::debug;

/// Aggregated groups for one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Division groups in column-block order (ascending division name).
    pub groups: Vec<DivisionGroup>,
    /// Observed stations that match no declared member. In mapping-driven
    /// mode these are absent from `groups`; in classify-observed mode they
    /// are also reported under the "Other" division.
    pub unmatched: Vec<StationCount>,
}

impl Aggregation {
    /// Length of the longest member list.
    pub fn max_members(&self) -> usize {
        self.groups.iter().map(DivisionGroup::len).max().unwrap_or(0)
    }
}

pub fn aggregate(counts: &StationCounts, table: &MappingTable, mode: ReportMode) -> Aggregation {
    match mode {
        ReportMode::MappingDriven => aggregate_mapping_driven(counts, table),
        ReportMode::ClassifyObserved => aggregate_observed(counts, table),
    }
}

/// Every division in `table` with its full declared member list.
///
/// Members are deduplicated ignoring case (first declared spelling kept) and
/// get the count of the first station in `counts` order that matches them
/// ignoring case, or 0. Case-variant station keys are not summed: with
/// counts `{ABC: 2, abc: 1}` member `Abc` gets 2.
pub fn aggregate_mapping_driven(counts: &StationCounts, table: &MappingTable) -> Aggregation {
    let mut folded_counts: HashMap<String, u64> = HashMap::with_capacity(counts.len());
    for entry in counts {
        folded_counts
            .entry(fold_key(&entry.station))
            .or_insert(entry.count);
    }

    let mut declared: HashSet<String> = HashSet::with_capacity(table.member_count());
    let mut groups = Vec::with_capacity(table.len());
    for division in table.iter() {
        let mut seen = HashSet::new();
        let mut members = Vec::with_capacity(division.members.len());
        for member in &division.members {
            let name = member.trim();
            if name.is_empty() {
                continue;
            }
            let key = fold_key(name);
            if !seen.insert(key.clone()) {
                continue;
            }
            let count = folded_counts.get(&key).copied().unwrap_or(0);
            members.push(MemberCount::new(name, count));
            declared.insert(key);
        }
        sort_members(&mut members);
        groups.push(DivisionGroup::new(division.name.clone(), members));
    }
    sort_groups(&mut groups);

    let unmatched: Vec<StationCount> = counts
        .iter()
        .filter(|entry| !declared.contains(&fold_key(&entry.station)))
        .cloned()
        .collect();

    debug!(
        divisions = groups.len(),
        unmatched = unmatched.len(),
        "aggregated mapping-driven groups"
    );
    Aggregation { groups, unmatched }
}

/// Only observed stations, each placed in the division that owns it.
///
/// Stations without an owner go to "Other". Member names are the observed
/// spellings. Divisions without observed stations are omitted.
pub fn aggregate_observed(counts: &StationCounts, table: &MappingTable) -> Aggregation {
    let classifier = DivisionClassifier::new(table);
    let mut by_division: BTreeMap<&str, Vec<MemberCount>> = BTreeMap::new();
    let mut unmatched = Vec::new();

    for entry in counts.iter().filter(|entry| entry.count > 0) {
        let division = match classifier.lookup(&entry.station) {
            Some((division, _)) => division,
            None => {
                unmatched.push(entry.clone());
                OTHER_DIVISION
            }
        };
        by_division
            .entry(division)
            .or_default()
            .push(MemberCount::new(entry.station.clone(), entry.count));
    }

    let groups: Vec<DivisionGroup> = by_division
        .into_iter()
        .map(|(division, mut members)| {
            sort_members(&mut members);
            DivisionGroup::new(division, members)
        })
        .collect();

    debug!(
        divisions = groups.len(),
        unmatched = unmatched.len(),
        "aggregated observed groups"
    );
    Aggregation { groups, unmatched }
}

/// Ascending by lowercase-folded name; original spelling breaks ties.
fn sort_members(members: &mut [MemberCount]) {
    members.sort_by(|left, right| compare_folded(&left.member, &right.member));
}

fn compare_folded(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

fn sort_groups(groups: &mut [DivisionGroup]) {
    groups.sort_by(|left, right| left.division.cmp(&right.division));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(json: &str) -> MappingTable {
        tally_map::parse_mapping_text(json).unwrap()
    }

    fn members(group: &DivisionGroup) -> Vec<(&str, u64)> {
        group
            .members
            .iter()
            .map(|m| (m.member.as_str(), m.count))
            .collect()
    }

    #[test]
    fn every_declared_division_is_emitted() {
        let table = table(r#"{"South": ["C"], "North": ["B", "A"]}"#);
        let counts: StationCounts = [("A", 2)].into_iter().collect();
        let result = aggregate_mapping_driven(&counts, &table);

        assert_eq!(result.groups.len(), 2);
        assert_eq!(result.groups[0].division, "North");
        assert_eq!(members(&result.groups[0]), vec![("A", 2), ("B", 0)]);
        assert_eq!(result.groups[1].division, "South");
        assert_eq!(members(&result.groups[1]), vec![("C", 0)]);
        assert_eq!(result.groups[0].subtotal(), 2);
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn members_deduplicated_ignoring_case() {
        let table = table(r#"{"North": ["Beta", "alpha", "BETA", " Alpha "]}"#);
        let result = aggregate_mapping_driven(&StationCounts::new(), &table);
        assert_eq!(members(&result.groups[0]), vec![("alpha", 0), ("Beta", 0)]);
    }

    #[test]
    fn case_variant_counts_take_first_seen() {
        let table = table(r#"{"North": ["Abc"]}"#);
        let counts: StationCounts = [("ABC", 2), ("abc", 5)].into_iter().collect();
        let result = aggregate_mapping_driven(&counts, &table);
        assert_eq!(members(&result.groups[0]), vec![("Abc", 2)]);
    }

    #[test]
    fn unmatched_stations_reported_in_mapping_mode() {
        let table = table(r#"{"North": ["A"]}"#);
        let counts: StationCounts = [("A", 1), ("Zed", 3)].into_iter().collect();
        let result = aggregate_mapping_driven(&counts, &table);
        assert_eq!(result.unmatched.len(), 1);
        assert_eq!(result.unmatched[0].station, "Zed");
        assert_eq!(result.groups[0].subtotal(), 1);
    }

    #[test]
    fn observed_mode_groups_and_falls_back_to_other() {
        let table = table(r#"{"North": ["Alpha"], "East": ["Gamma"], "Empty": ["Nope"]}"#);
        let counts: StationCounts = [("gamma", 1), ("Alpha", 2), ("Zed", 4), ("beta", 1)]
            .into_iter()
            .collect();
        let result = aggregate_observed(&counts, &table);

        let divisions: Vec<&str> = result.groups.iter().map(|g| g.division.as_str()).collect();
        assert_eq!(divisions, vec!["East", "North", OTHER_DIVISION]);
        assert_eq!(members(&result.groups[0]), vec![("gamma", 1)]);
        assert_eq!(members(&result.groups[2]), vec![("beta", 1), ("Zed", 4)]);
        let unmatched: Vec<&str> = result.unmatched.iter().map(|s| s.station.as_str()).collect();
        assert_eq!(unmatched, vec!["Zed", "beta"]);
    }

    #[test]
    fn folded_sort_breaks_ties_by_spelling() {
        let mut list = vec![
            MemberCount::new("abc", 1),
            MemberCount::new("ABC", 1),
            MemberCount::new("Abd", 1),
        ];
        sort_members(&mut list);
        let names: Vec<&str> = list.iter().map(|m| m.member.as_str()).collect();
        assert_eq!(names, vec!["ABC", "abc", "Abd"]);
    }
}
