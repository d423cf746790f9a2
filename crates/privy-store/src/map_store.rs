//! Flat JSON file of stored maps.
//!
//! The whole file is one JSON array of [`StoredMap`]. Every mutation reads
//! it, edits the array, and replaces the file by writing a temporary
//! sibling and renaming it over the original. There is no locking: two
//! processes writing at once can lose an update.

use crate::error::StoreError;
use crate::model::{BathroomMap, MapSummary, StoredMap};
use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use std::fs;
use std::io::{self, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Public map ids are nine-digit numbers.
pub const MAP_ID_RANGE: Range<u32> = 100_000_000..1_000_000_000;

/// Default age after which an expiring map is pruned.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Handle to a map file. Cheap to construct; touches disk only per call.
#[derive(Clone, Debug)]
pub struct MapStore {
    path: PathBuf,
    ttl: Duration,
}

impl MapStore {
    /// Store backed by the file at `path` (created on first insert).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Override how long expiring maps stay listed.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Expiry age.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store `map` stamped with the current time.
    pub fn insert<R: Rng + ?Sized>(
        &self,
        map: BathroomMap,
        rng: &mut R,
    ) -> Result<StoredMap, StoreError> {
        self.insert_at(map, SystemTime::now(), rng)
    }

    /// Store `map` as if inserted at `now`, with a fresh id and expiry set.
    pub fn insert_at<R: Rng + ?Sized>(
        &self,
        map: BathroomMap,
        now: SystemTime,
        rng: &mut R,
    ) -> Result<StoredMap, StoreError> {
        let mut maps = self.load()?;
        let id = loop {
            let candidate = rng.random_range(MAP_ID_RANGE);
            if maps.iter().all(|m| m.id != candidate) {
                break candidate;
            }
        };
        let stored = StoredMap {
            map,
            id,
            time: DateTime::<Utc>::from(now),
            delete: true,
        };
        maps.push(stored.clone());
        self.save(&maps)?;
        debug!(id, name = %stored.map.name, total = maps.len(), "map stored");
        Ok(stored)
    }

    /// Summaries of maps still live now, pruning expired ones from disk.
    pub fn list_live(&self) -> Result<Vec<MapSummary>, StoreError> {
        self.list_live_at(SystemTime::now())
    }

    /// Summaries of maps live at `now`; expired entries are removed from
    /// the file.
    pub fn list_live_at(&self, now: SystemTime) -> Result<Vec<MapSummary>, StoreError> {
        let maps = self.load()?;
        let before = maps.len();
        let now = DateTime::<Utc>::from(now);
        let ttl = TimeDelta::from_std(self.ttl).unwrap_or(TimeDelta::MAX);
        let live: Vec<StoredMap> = maps
            .into_iter()
            .filter(|m| !(m.delete && now.signed_duration_since(m.time) > ttl))
            .collect();
        self.save(&live)?;
        debug!(pruned = before - live.len(), live = live.len(), "listed maps");
        Ok(live.iter().map(StoredMap::summary).collect())
    }

    /// The stored map with `id`, expired or not.
    pub fn get(&self, id: u32) -> Result<StoredMap, StoreError> {
        self.load()?
            .into_iter()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound { id })
    }

    /// Every stored map, in insertion order. A missing file is empty.
    pub fn load(&self) -> Result<Vec<StoredMap>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, maps: &[StoredMap]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(maps).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, &json)?;
        debug!(path = %self.path.display(), maps = maps.len(), "store rewritten");
        Ok(())
    }
}

/// Write `contents` to a temporary sibling of `path`, then rename it over
/// `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| StoreError::Io { path, source }
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };
    fs::create_dir_all(parent).map_err(io_err(parent))?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".privy.tmp.{}.{}.{}",
        file_name.to_string_lossy(),
        std::process::id(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(io_err(&tmp_path))?;
    file.write_all(contents).map_err(io_err(&tmp_path))?;
    drop(file);

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}
