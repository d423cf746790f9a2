//! Flat-file store of named Privy bathroom maps.
//!
//! A [`MapStore`] keeps every submitted [`BathroomMap`] in one JSON array
//! on disk, tagged with a random nine-digit id and an insertion time.
//! Maps flagged to expire drop out of [`MapStore::list_live`] (and out of
//! the file) once older than the store's ttl.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod map_store;
pub mod model;

pub use error::StoreError;
pub use map_store::{MapStore, DEFAULT_TTL, MAP_ID_RANGE};
pub use model::{Bathroom, BathroomMap, Coordinates, MapSummary, StoredMap};
