//! Spatial data structures for Privy region maps.
//!
//! This crate defines the [`Grid`] obstacle map that every path query
//! and region computation reads, and the [`RegionGrid`] those
//! computations produce. Both store cells flat in row-major order and
//! share the raw `i32` marker encoding from `privy-core`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;
pub mod region_grid;

#[cfg(test)]
pub(crate) mod compliance;

pub use grid::{Grid, OFFSETS_4};
pub use region_grid::RegionGrid;
