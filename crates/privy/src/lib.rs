//! Privy: walkable-nearest region maps.
//!
//! Given an obstacle grid with labeled seed cells (bathrooms), assign every
//! walkable cell to the seed with the shortest walk, not the shortest
//! straight line. This is the top-level facade crate that re-exports the
//! public API from all Privy sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use privy::prelude::*;
//!
//! // Two seeds separated by a wall with a gap on the right.
//! let grid = Grid::from_rows(&[
//!     vec![1,  0,  0,  0],
//!     vec![-1, -1, -1, 0],
//!     vec![2,  0,  0,  0],
//! ]).unwrap();
//! let seeds = find_seeds(&grid).unwrap();
//!
//! let regions =
//!     compute_regions_seeded(&grid, seeds.as_slice(), &RegionConfig::default(), 42).unwrap();
//! assert_eq!(regions.seed_at(Cell::new(0, 1)), Some(SeedId(1)));
//! assert_eq!(regions.seed_at(Cell::new(2, 1)), Some(SeedId(2)));
//! assert_eq!(regions.get(Cell::new(1, 0)), Some(-1));
//!
//! let d = path_distance(&grid, Cell::new(0, 0), Cell::new(2, 0)).unwrap();
//! assert_eq!(d, PathDistance::Steps(8));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `privy-core` | `Cell`, `SeedId`, `Marker`, `Seed`, error types |
//! | [`space`] | `privy-space` | `Grid` and `RegionGrid` |
//! | [`regions`] | `privy-regions` | Path oracle, sampling, region fill |
//! | [`store`] | `privy-store` | Flat-file store of named maps |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`privy-core`).
pub use privy_core as types;

/// Obstacle and region grids (`privy-space`).
pub use privy_space as space;

/// Region assignment (`privy-regions`).
///
/// Entry points are [`regions::compute_regions`] and
/// [`regions::compute_regions_from_rows`]; [`regions::path_distance`] is
/// the underlying shortest-walk oracle.
pub use privy_regions as regions;

/// Stored bathroom maps (`privy-store`).
pub use privy_store as store;

/// Common imports for typical Privy usage.
///
/// ```rust
/// use privy::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use privy_core::{Cell, Marker, Seed, SeedId, OPEN, WALL};

    // Errors
    pub use privy_core::{GridError, RegionError};
    pub use privy_regions::ConfigError;
    pub use privy_store::StoreError;

    // Grids
    pub use privy_space::{Grid, RegionGrid};

    // Regions
    pub use privy_regions::{
        compute_regions, compute_regions_from_rows, compute_regions_seeded,
        compute_regions_with_stats, find_seeds, path_distance, shortest_path, ConsensusPolicy,
        FillStats, PathDistance, RegionConfig, SampleTarget, SeedIndex,
    };

    // Store
    pub use privy_store::{BathroomMap, MapStore, StoredMap};
}
