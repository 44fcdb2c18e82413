//! Pivot of levels into a grade x scale grid
//!
//! Columns are the sorted union of every scale present; cells are sparse,
//! so a missing pair stays `None` (rendered blank, never zero).

use crate::amount::{Amount, NumberFormat};
use crate::grade::Grade;
use crate::ids::LevelId;
use crate::level::Level;
use crate::scale::Scale;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    /// Back-reference to the originating level
    pub level: LevelId,
    /// Row label
    pub grade: Grade,
    /// One entry per grid column
    pub cells: Vec<Option<Amount>>,
}

impl GridRow {
    /// Cells as display text, blank where absent
    #[must_use]
    pub fn formatted(&self, format: &NumberFormat) -> Vec<String> {
        self.cells
            .iter()
            .map(|cell| cell.map(|amount| format.format(amount)).unwrap_or_default())
            .collect()
    }
}

/// Dense grid projection of a matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixGrid {
    /// Column headers, ascending
    pub columns: Vec<Scale>,
    /// Rows in level order
    pub rows: Vec<GridRow>,
}

impl MatrixGrid {
    /// Cell lookup by level and scale
    #[must_use]
    pub fn cell(&self, level: &LevelId, scale: Scale) -> Option<Amount> {
        let col = self.columns.binary_search(&scale).ok()?;
        self.row(level).and_then(|row| row.cells[col])
    }

    /// Row for a level
    #[must_use]
    pub fn row(&self, level: &LevelId) -> Option<&GridRow> {
        self.rows.iter().find(|row| &row.level == level)
    }

    /// All cells as display text
    #[must_use]
    pub fn formatted_cells(&self, format: &NumberFormat) -> Vec<Vec<String>> {
        self.rows.iter().map(|row| row.formatted(format)).collect()
    }
}

/// Renderer output
///
/// `NoData` is distinct from a grid with zero columns: it means there were
/// no levels at all and the presentation layer should show a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RenderedMatrix {
    /// No levels
    #[default]
    NoData,
    /// Populated grid
    Grid(MatrixGrid),
}

impl RenderedMatrix {
    /// Check for the placeholder state
    #[inline]
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// Grid, if any
    #[inline]
    #[must_use]
    pub fn grid(&self) -> Option<&MatrixGrid> {
        match self {
            Self::Grid(grid) => Some(grid),
            Self::NoData => None,
        }
    }

    /// Column headers (empty for `NoData`)
    #[must_use]
    pub fn columns(&self) -> &[Scale] {
        match self {
            Self::Grid(grid) => &grid.columns,
            Self::NoData => &[],
        }
    }

    /// Rows (empty for `NoData`)
    #[must_use]
    pub fn rows(&self) -> &[GridRow] {
        match self {
            Self::Grid(grid) => &grid.rows,
            Self::NoData => &[],
        }
    }
}

/// Stable sort by grade sort key
///
/// Labels sharing a key (including every digit-less label, key 0) keep
/// their relative order.
pub fn sort_levels(levels: &mut [Level]) {
    levels.sort_by_key(|level| level.grade.sort_key());
}

/// Pivot levels into a grid, keeping their order
#[must_use]
pub fn pivot(levels: &[Level]) -> RenderedMatrix {
    if levels.is_empty() {
        return RenderedMatrix::NoData;
    }

    let columns: Vec<Scale> = levels
        .iter()
        .flat_map(|level| level.pairs.iter().map(|p| p.scale))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rows = levels
        .iter()
        .map(|level| {
            let by_scale: BTreeMap<Scale, Amount> = level.pair_map();
            GridRow {
                level: level.id.clone(),
                grade: level.grade.clone(),
                cells: columns.iter().map(|scale| by_scale.get(scale).copied()).collect(),
            }
        })
        .collect();

    RenderedMatrix::Grid(MatrixGrid { columns, rows })
}
