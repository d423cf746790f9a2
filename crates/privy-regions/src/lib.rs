//! Walkable-nearest region assignment for Privy region maps.
//!
//! Assigns every walkable cell of an obstacle [`Grid`](privy_space::Grid)
//! to the seed it can reach in the fewest 4-connected steps, a discrete
//! Voronoi diagram over the walk graph rather than the plane.
//!
//! # Pipeline (each call)
//!
//! 1. [`SeedIndex`]: validate seeds (or [`find_seeds`] in the grid)
//! 2. [`generate_samples`]: pick cells near seeds and across the grid
//! 3. exact resolution of each sample: [`shortlist()`] of candidate seeds,
//!    one [`PathSearch`] query per candidate
//! 4. one row-major scan: adopt the neighbours' id when they agree
//!    ([`ConsensusPolicy`]), otherwise resolve exactly
//! 5. every seed stamps its own id into its cell, in parallel with the
//!    `parallel` feature
//!
//! Sample cells are random, so results depend on the RNG; a fixed seed
//! ([`compute_regions_seeded`]) gives a fixed result.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod components;
pub mod config;
pub mod engine;
mod finalize;
pub mod path;
pub mod sampling;
pub mod seeds;
pub mod shortlist;

pub use config::{ConfigError, ConsensusPolicy, RegionConfig, RegionConfigBuilder, SampleTarget};
pub use engine::{
    compute_regions, compute_regions_from_rows, compute_regions_seeded,
    compute_regions_with_stats, FillStats, RegionReport,
};
pub use path::{path_distance, shortest_path, PathDistance, PathSearch};
pub use sampling::generate_samples;
pub use seeds::{find_seeds, SeedIndex};
pub use shortlist::{shortlist, Shortlist, DEFAULT_SHORTLIST_K};
