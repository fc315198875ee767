//! Grid layout: division groups side by side as column blocks.
//!
//! Block `d` occupies columns `d * width .. (d + 1) * width`, where `width`
//! is [`LayoutMode::columns_per_block`]. Row `r` of the data section holds
//! the `r`-th member of each division, or blanks when a division is shorter
//! than the tallest one.

use tally_model::{
    Cell, CellStyle, ColumnWidth, DivisionGroup, LayoutMode, MergeRegion, OutputGrid, StyledCell,
};

pub const OFFICE_LABEL: &str = "Office";
pub const COUNT_LABEL: &str = "No. of Toolkits";
pub const TOTAL_LABEL: &str = "Total";

/// Style of division-name cells in grouped-header layout.
pub const DIVISION_HEADER_STYLE: CellStyle = CellStyle {
    bold: true,
    font_size: Some(14.0),
};

pub fn layout(groups: &[DivisionGroup], mode: LayoutMode) -> OutputGrid {
    let block = mode.columns_per_block();
    let width = groups.len() * block;
    let max_rows = groups.iter().map(DivisionGroup::len).max().unwrap_or(0);

    let mut grid = OutputGrid {
        column_widths: column_widths(groups.len(), mode),
        ..OutputGrid::default()
    };

    let mut header = vec![Cell::Empty; width];
    for (index, group) in groups.iter().enumerate() {
        let col = index * block;
        header[col] = Cell::text(group.division.as_str());
        match mode {
            LayoutMode::TotalsGrid => grid.merges.push(MergeRegion {
                row: 0,
                first_col: col,
                last_col: col + 1,
            }),
            LayoutMode::GroupedHeader => grid.styles.push(StyledCell {
                row: 0,
                col,
                style: DIVISION_HEADER_STYLE,
            }),
        }
    }
    grid.rows.push(header);

    if mode == LayoutMode::TotalsGrid {
        let mut sub_header = Vec::with_capacity(width);
        for _ in groups {
            sub_header.push(Cell::text(OFFICE_LABEL));
            sub_header.push(Cell::text(COUNT_LABEL));
        }
        grid.rows.push(sub_header);
    }

    for row in 0..max_rows {
        let mut cells = vec![Cell::Empty; width];
        for (index, group) in groups.iter().enumerate() {
            if let Some(member) = group.members.get(row) {
                let col = index * block;
                cells[col] = Cell::text(member.member.as_str());
                cells[col + 1] = Cell::Number(member.count);
            }
        }
        grid.rows.push(cells);
    }

    if mode == LayoutMode::TotalsGrid && !groups.is_empty() {
        let mut totals = Vec::with_capacity(width);
        for group in groups {
            totals.push(Cell::text(TOTAL_LABEL));
            totals.push(Cell::Number(group.subtotal()));
        }
        grid.rows.push(totals);
    }

    grid
}

fn column_widths(divisions: usize, mode: LayoutMode) -> Vec<ColumnWidth> {
    let block: &[ColumnWidth] = match mode {
        LayoutMode::TotalsGrid => &[ColumnWidth::Wide, ColumnWidth::Narrow],
        LayoutMode::GroupedHeader => &[ColumnWidth::Wide, ColumnWidth::Narrow, ColumnWidth::Narrow],
    };
    block.iter().copied().cycle().take(divisions * block.len()).collect()
}
