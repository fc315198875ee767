//! Renderer-agnostic description of an output table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(u64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Horizontal span of header cells rendered as one merged cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRegion {
    pub row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

impl MergeRegion {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row == self.row && (self.first_col..=self.last_col).contains(&col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    pub bold: bool,
    pub font_size: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyledCell {
    pub row: usize,
    pub col: usize,
    pub style: CellStyle,
}

/// Column width hint. Member columns are wide, count columns narrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnWidth {
    Wide,
    Narrow,
}

impl ColumnWidth {
    /// Width in characters.
    pub fn characters(self) -> f64 {
        match self {
            Self::Wide => 25.0,
            Self::Narrow => 15.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputGrid {
    pub rows: Vec<Vec<Cell>>,
    pub merges: Vec<MergeRegion>,
    pub styles: Vec<StyledCell>,
    pub column_widths: Vec<ColumnWidth>,
}

impl OutputGrid {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Column count, taken from the width hints so that a grid with zero
    /// divisions still reports width 0.
    pub fn width(&self) -> usize {
        self.column_widths.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    pub fn style_at(&self, row: usize, col: usize) -> Option<CellStyle> {
        self.styles
            .iter()
            .find(|styled| styled.row == row && styled.col == col)
            .map(|styled| styled.style)
    }

    pub fn merge_at(&self, row: usize, col: usize) -> Option<&MergeRegion> {
        self.merges.iter().find(|merge| merge.contains(row, col))
    }

    /// Checks that every row has exactly `width()` cells.
    pub fn validate(&self) -> Result<()> {
        let expected = self.width();
        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(ModelError::RaggedRow {
                    row,
                    expected,
                    actual: cells.len(),
                });
            }
        }
        Ok(())
    }

    /// All cells rendered as display strings.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|cells| cells.iter().map(ToString::to_string).collect())
            .collect()
    }
}
