//! Output grid of resolved seed ids.

use crate::grid::Grid;
use privy_core::{Cell, SeedId, OPEN};

/// Per-cell region assignment, same shape as the [`Grid`] it came from.
///
/// Uses the grid's raw encoding: `0` means unresolved or unreachable, a
/// negative value is a wall passed through from the input, and a
/// positive value is the id of the seed that owns the cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionGrid {
    rows: u32,
    cols: u32,
    values: Vec<i32>,
}

impl RegionGrid {
    /// An all-unresolved region grid shaped like `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            values: vec![OPEN; grid.cell_count()],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Raw value at `cell`, or `None` when out of bounds.
    pub fn get(&self, cell: Cell) -> Option<i32> {
        let in_bounds = cell.row >= 0
            && cell.col >= 0
            && (cell.row as u32) < self.rows
            && (cell.col as u32) < self.cols;
        in_bounds.then(|| self.values[cell.row as usize * self.cols as usize + cell.col as usize])
    }

    /// Owning seed at `cell`, if it resolved to one.
    pub fn seed_at(&self, cell: Cell) -> Option<SeedId> {
        self.get(cell).and_then(SeedId::from_raw)
    }

    /// Raw value at flat index `idx`.
    pub fn get_at(&self, idx: usize) -> i32 {
        self.values[idx]
    }

    /// Overwrite the raw value at flat index `idx`.
    pub fn set_at(&mut self, idx: usize, raw: i32) {
        self.values[idx] = raw;
    }

    /// Raw values in row-major order.
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    /// Mutable raw values in row-major order.
    pub fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.values
    }

    /// Number of cells owned by `id`.
    pub fn count_of(&self, id: SeedId) -> usize {
        let raw = id.to_raw();
        self.values.iter().filter(|&&v| v == raw).count()
    }

    /// Copy out as a row-major matrix.
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.values
            .chunks(self.cols as usize)
            .map(<[i32]>::to_vec)
            .collect()
    }
}
