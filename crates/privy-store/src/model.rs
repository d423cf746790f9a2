//! Wire types for stored bathroom maps.
//!
//! Field names follow the JSON the map editor sends and reads back
//! (`menstrualProducts`, `ID`), and `time` is an RFC 3339 timestamp, so
//! files stay compatible with it.

use chrono::{DateTime, Utc};
use privy_core::{RegionError, SeedId};
use privy_regions::{compute_regions_from_rows, RegionConfig};
use privy_space::RegionGrid;
use serde::{Deserialize, Serialize};

/// A geographic corner of a map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// One bathroom; `id` is the seed marker it occupies in the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bathroom {
    /// Seed id, positive.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Free-form gender label as entered (`"M"`, `"F"`, ...).
    pub gender: String,
    /// Wheelchair accessible.
    pub accessible: bool,
    /// Menstrual products available.
    #[serde(rename = "menstrualProducts")]
    pub menstrual_products: bool,
}

impl Bathroom {
    /// The seed this bathroom is drawn as.
    pub fn seed_id(&self) -> SeedId {
        SeedId(self.id)
    }
}

/// A map as submitted: obstacle grid plus bathroom metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BathroomMap {
    /// Map name.
    pub name: String,
    /// Geographic corners.
    pub coordinates: Vec<Coordinates>,
    /// Raw marker rows: `0` open, negative wall, positive bathroom id.
    pub grid: Vec<Vec<i32>>,
    /// Bathroom details keyed by their grid ids.
    pub bathrooms: Vec<Bathroom>,
}

impl BathroomMap {
    /// Bathroom whose seed id is `id`.
    pub fn bathroom(&self, id: SeedId) -> Option<&Bathroom> {
        self.bathrooms.iter().find(|b| b.id == id.0)
    }
}

/// A map as persisted, with its id and expiry bookkeeping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredMap {
    /// The submitted map.
    #[serde(flatten)]
    pub map: BathroomMap,
    /// Nine-digit public id.
    #[serde(rename = "ID")]
    pub id: u32,
    /// Insertion time. Read from any RFC 3339 offset, written as UTC.
    pub time: DateTime<Utc>,
    /// Expires once older than the store's ttl when set.
    pub delete: bool,
}

impl StoredMap {
    /// Listing entry for this map.
    pub fn summary(&self) -> MapSummary {
        MapSummary {
            name: self.map.name.clone(),
            id: self.id,
        }
    }

    /// Run region assignment over the stored grid.
    ///
    /// # Errors
    ///
    /// Any error of [`compute_regions_from_rows`], e.g. a ragged grid or
    /// one without bathrooms.
    pub fn regions(&self, config: &RegionConfig, seed: u64) -> Result<RegionGrid, RegionError> {
        compute_regions_from_rows(&self.map.grid, config, seed)
    }
}

/// Name and id of a live map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSummary {
    /// Map name.
    pub name: String,
    /// Nine-digit public id.
    #[serde(rename = "ID")]
    pub id: u32,
}
