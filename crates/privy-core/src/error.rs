//! Error types for Privy region maps.
//!
//! Organized by subsystem: grid construction and addressing
//! ([`GridError`]) and region assignment ([`RegionError`]). Every variant
//! is structural and detected before or at the start of a computation.
//! An unreachable pair of cells is a normal result, never an error.

use crate::id::{Cell, SeedId};
use std::error::Error;
use std::fmt;

/// Errors from grid construction and cell addressing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Rows of the input matrix have unequal length (shape error).
    Ragged {
        /// Index of the first offending row.
        row: usize,
        /// Length of row 0.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The grid has zero rows or zero columns (shape error).
    Empty,
    /// A dimension does not fit the `i32` coordinate space.
    DimensionTooLarge {
        /// Which dimension overflowed.
        name: &'static str,
        /// The offending value.
        value: usize,
    },
    /// A cell lies outside the grid (bounds error).
    CellOutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// Grid height.
        rows: u32,
        /// Grid width.
        cols: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} columns, expected {expected} (grid must be rectangular)"
            ),
            Self::Empty => write!(f, "grid must have at least one row and one column"),
            Self::DimensionTooLarge { name, value } => {
                write!(f, "{name} = {value} exceeds i32::MAX")
            }
            Self::CellOutOfBounds { cell, rows, cols } => {
                write!(f, "cell {cell} out of bounds: [0, {rows}) x [0, {cols})")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from seed extraction and region assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionError {
    /// The grid itself is malformed or a seed lies outside it.
    Grid(GridError),
    /// No seed was found or supplied; regions are undefined without one.
    NoSeeds,
    /// Two seeds share an id.
    DuplicateSeedId {
        /// The repeated id.
        id: SeedId,
        /// Location of the first occurrence.
        first: Cell,
        /// Location of the repeat.
        second: Cell,
    },
    /// Two seeds share a cell.
    DuplicateSeedCell {
        /// The shared cell.
        cell: Cell,
    },
    /// A supplied seed id is above [`SeedId::MAX`] and has no grid encoding.
    SeedIdTooLarge {
        /// The oversized id.
        id: SeedId,
    },
    /// A supplied seed sits on a wall.
    SeedOnWall {
        /// The misplaced seed's id.
        id: SeedId,
        /// The wall cell.
        cell: Cell,
    },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::NoSeeds => write!(f, "no seeds: region assignment needs at least one seed"),
            Self::DuplicateSeedId { id, first, second } => {
                write!(f, "seed id {id} appears at both {first} and {second}")
            }
            Self::DuplicateSeedCell { cell } => write!(f, "more than one seed at {cell}"),
            Self::SeedIdTooLarge { id } => {
                write!(f, "seed id {id} exceeds the largest grid value {}", SeedId::MAX)
            }
            Self::SeedOnWall { id, cell } => write!(f, "seed {id} sits on a wall at {cell}"),
        }
    }
}

impl Error for RegionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for RegionError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
