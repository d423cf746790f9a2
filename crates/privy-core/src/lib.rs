//! Core types and error taxonomy for Privy region maps.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: grid
//! coordinates, seed identifiers, the bit-exact cell marker encoding,
//! and the error enums surfaced by grid construction and region
//! assignment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod marker;

pub use error::{GridError, RegionError};
pub use id::{Cell, SeedId};
pub use marker::{Marker, Seed, OPEN, WALL};
