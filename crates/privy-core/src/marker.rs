//! Cell markers and seeds.
//!
//! The raw `i32` encoding is shared with the map store and any external
//! collaborator: `0` is open floor, any negative value is a wall, and a
//! positive value is the id of the seed occupying that cell.

use crate::id::{Cell, SeedId};

/// Raw value of an open cell, and of an unresolved cell in a region grid.
pub const OPEN: i32 = 0;

/// Canonical raw wall value. Any negative value is treated as a wall.
pub const WALL: i32 = -1;

/// Decoded meaning of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Walkable floor.
    Open,
    /// Impassable obstacle.
    Wall,
    /// Walkable cell holding a seed.
    Seed(SeedId),
}

impl Marker {
    /// Decode a raw grid value.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            OPEN => Self::Open,
            r if r < 0 => Self::Wall,
            r => SeedId::from_raw(r).map_or(Self::Open, Self::Seed),
        }
    }

    /// Encode as a raw grid value. Walls encode as [`WALL`].
    pub fn to_raw(self) -> i32 {
        match self {
            Self::Open => OPEN,
            Self::Wall => WALL,
            Self::Seed(id) => id.to_raw(),
        }
    }

    /// Whether a path may step onto this cell.
    pub fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// A labeled target cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed {
    /// Externally assigned id, unique within one grid.
    pub id: SeedId,
    /// Where the seed sits.
    pub cell: Cell,
}

impl Seed {
    /// Construct a seed.
    pub fn new(id: impl Into<SeedId>, cell: impl Into<Cell>) -> Self {
        Self {
            id: id.into(),
            cell: cell.into(),
        }
    }
}
