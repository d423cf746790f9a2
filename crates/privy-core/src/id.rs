//! Strongly-typed identifiers and the [`Cell`] coordinate.

use std::fmt;

/// Identifies a seed (a bathroom) within one grid.
///
/// Seed ids are assigned externally and encoded in the grid as positive
/// integers. Zero and negative values are reserved for open cells and
/// walls, so a `SeedId` is never constructed from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeedId(pub u32);

impl SeedId {
    /// Largest id the grid encoding can hold.
    pub const MAX: SeedId = SeedId(i32::MAX as u32);

    /// Convert a raw grid value into a seed id.
    ///
    /// Returns `None` for zero (open) and negative (wall) values.
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().filter(|&v| v > 0).map(Self)
    }

    /// The raw grid encoding of this id.
    ///
    /// Ids above [`SeedId::MAX`] cannot be represented in the grid
    /// encoding and saturate; [`SeedId::from_raw`] never produces them and
    /// seed validation rejects them.
    pub fn to_raw(self) -> i32 {
        i32::try_from(self.0).unwrap_or(i32::MAX)
    }
}

impl fmt::Display for SeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SeedId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// A cell position in a rectangular grid: `(row, col)`.
///
/// Coordinates are signed so that neighbour offsets and jittered sample
/// positions can step outside the grid before being bounds-checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Row index, top to bottom.
    pub row: i32,
    /// Column index, left to right.
    pub col: i32,
}

impl Cell {
    /// Construct a cell from a row and column.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell displaced by `(dr, dc)`, saturating at the `i32` range.
    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row.saturating_add(dr),
            col: self.col.saturating_add(dc),
        }
    }

    /// Straight-line (Euclidean) distance to `other`.
    pub fn euclidean(self, other: Cell) -> f64 {
        let dr = f64::from(self.row - other.row);
        let dc = f64::from(self.col - other.col);
        (dr * dr + dc * dc).sqrt()
    }

    /// Squared Euclidean distance, exact in integers.
    pub fn euclidean_sq(self, other: Cell) -> i64 {
        let dr = i64::from(self.row - other.row);
        let dc = i64::from(self.col - other.col);
        dr * dr + dc * dc
    }

    /// Manhattan (L1) distance to `other`.
    pub fn manhattan(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}
