//! Property tests for counting, aggregation and layout.

use proptest::prelude::*;

use tally_core::{CoreError, aggregate, count_stations, layout};
use tally_model::{
    Cell, FieldValue, LayoutMode, MappingTable, ReportMode, Sheet, StationCounts,
};

fn arb_table() -> impl Strategy<Value = MappingTable> {
    prop::collection::vec(
        (
            "[A-Z][a-z]{0,4}",
            prop::collection::vec("[A-Ca-c]{1,2}", 0..6),
        ),
        0..5,
    )
    .prop_map(|pairs| MappingTable::from_pairs(pairs).expect("non-empty names"))
}

fn arb_counts() -> impl Strategy<Value = StationCounts> {
    prop::collection::vec(("[A-Da-d]{1,2}", 1u64..20), 0..12)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn arb_report_mode() -> impl Strategy<Value = ReportMode> {
    prop_oneof![
        Just(ReportMode::MappingDriven),
        Just(ReportMode::ClassifyObserved),
    ]
}

fn arb_layout_mode() -> impl Strategy<Value = LayoutMode> {
    prop_oneof![Just(LayoutMode::TotalsGrid), Just(LayoutMode::GroupedHeader)]
}

proptest! {
    #[test]
    fn missing_station_column_always_fails(
        headers in prop::collection::vec("[A-Z]{1,6}", 0..5),
    ) {
        let headers: Vec<String> = headers
            .into_iter()
            .filter(|h| !h.eq_ignore_ascii_case("station"))
            .collect();
        let sheet = Sheet::from_rows("Sheet1", headers, vec![]);
        let result = count_stations(&sheet, "STATION");
        prop_assert!(
            matches!(result, Err(CoreError::MissingColumn { .. })),
            "expected MissingColumn"
        );
    }

    #[test]
    fn count_sum_equals_non_blank_entries(
        values in prop::collection::vec(prop_oneof!["[ ]{0,2}", " ?[A-Ca-c]{1,3} ?"], 0..40),
        spacing in "[ ]{0,2}",
    ) {
        let header = format!("{spacing}station{spacing}");
        let expected = values.iter().filter(|v| !v.trim().is_empty()).count() as u64;
        let rows = values.iter().map(|v| vec![FieldValue::from(v.as_str())]).collect();
        let sheet = Sheet::from_rows("Sheet1", vec![header], rows);
        let counts = count_stations(&sheet, "STATION").unwrap();
        prop_assert_eq!(counts.total(), expected);
    }

    #[test]
    fn mapping_driven_emits_each_division_once(table in arb_table(), counts in arb_counts()) {
        let result = aggregate(&counts, &table, ReportMode::MappingDriven);
        let mut emitted: Vec<&str> = result.groups.iter().map(|g| g.division.as_str()).collect();
        let mut declared: Vec<&str> = table.division_names().collect();
        declared.sort_unstable();
        prop_assert_eq!(&emitted, &declared);
        emitted.dedup();
        prop_assert_eq!(emitted.len(), table.len());
    }

    #[test]
    fn members_unique_and_sorted(
        table in arb_table(),
        counts in arb_counts(),
        mode in arb_report_mode(),
    ) {
        let result = aggregate(&counts, &table, mode);
        for group in &result.groups {
            for pair in group.members.windows(2) {
                let left = pair[0].member.to_lowercase();
                let right = pair[1].member.to_lowercase();
                prop_assert!(left <= right);
                prop_assert_ne!(&pair[0].member, &pair[1].member);
            }
        }
    }

    #[test]
    fn grid_is_rectangular_padded_and_totalled(
        table in arb_table(),
        counts in arb_counts(),
        report_mode in arb_report_mode(),
        layout_mode in arb_layout_mode(),
    ) {
        let result = aggregate(&counts, &table, report_mode);
        let grid = layout(&result.groups, layout_mode);
        let block = layout_mode.columns_per_block();
        let width = result.groups.len() * block;
        let max_rows = result.max_members();

        prop_assert_eq!(grid.width(), width);
        for row in &grid.rows {
            prop_assert_eq!(row.len(), width);
        }

        let data_start = layout_mode.header_rows();
        for (index, group) in result.groups.iter().enumerate() {
            let col = index * block;
            for row in 0..max_rows {
                let member_cell = &grid.rows[data_start + row][col];
                let count_cell = &grid.rows[data_start + row][col + 1];
                if row < group.len() {
                    prop_assert_eq!(member_cell, &Cell::text(group.members[row].member.as_str()));
                    prop_assert_eq!(count_cell, &Cell::Number(group.members[row].count));
                } else {
                    prop_assert!(member_cell.is_empty() && count_cell.is_empty());
                }
            }
            if layout_mode == LayoutMode::TotalsGrid {
                let totals = grid.rows.last().unwrap();
                prop_assert_eq!(&totals[col + 1], &Cell::Number(group.subtotal()));
            }
        }

        let expected_height = match layout_mode {
            LayoutMode::TotalsGrid if !result.groups.is_empty() => 3 + max_rows,
            LayoutMode::TotalsGrid => 2,
            LayoutMode::GroupedHeader => 1 + max_rows,
        };
        prop_assert_eq!(grid.height(), expected_height);
    }

    #[test]
    fn aggregation_and_layout_are_idempotent(
        table in arb_table(),
        counts in arb_counts(),
        report_mode in arb_report_mode(),
        layout_mode in arb_layout_mode(),
    ) {
        let first = layout(&aggregate(&counts, &table, report_mode).groups, layout_mode);
        let second = layout(&aggregate(&counts, &table, report_mode).groups, layout_mode);
        prop_assert_eq!(first, second);
    }
}
