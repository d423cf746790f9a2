//! Seed extraction and validation.

use indexmap::IndexMap;
use privy_core::{Cell, Marker, RegionError, Seed, SeedId};
use privy_space::Grid;

/// Validated, ordered set of seeds for one grid.
///
/// Seeds keep the order they were found or supplied in; that order breaks
/// every distance tie downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedIndex {
    seeds: Vec<Seed>,
    by_id: IndexMap<SeedId, usize>,
    by_cell: IndexMap<Cell, usize>,
}

impl SeedIndex {
    fn with_capacity(n: usize) -> Self {
        Self {
            seeds: Vec::with_capacity(n),
            by_id: IndexMap::with_capacity(n),
            by_cell: IndexMap::with_capacity(n),
        }
    }

    /// Validate a caller-supplied seed list against `grid`.
    ///
    /// # Errors
    ///
    /// - [`RegionError::NoSeeds`] if `seeds` is empty
    /// - [`RegionError::SeedIdTooLarge`] if an id exceeds [`SeedId::MAX`]
    /// - [`RegionError::Grid`] if a seed lies outside the grid
    /// - [`RegionError::SeedOnWall`] if a seed sits on a wall
    /// - [`RegionError::DuplicateSeedCell`] if two seeds share a cell
    /// - [`RegionError::DuplicateSeedId`] if two seeds share an id
    pub fn from_seeds(seeds: &[Seed], grid: &Grid) -> Result<Self, RegionError> {
        if seeds.is_empty() {
            return Err(RegionError::NoSeeds);
        }
        let mut index = Self::with_capacity(seeds.len());
        for seed in seeds {
            if seed.id > SeedId::MAX {
                return Err(RegionError::SeedIdTooLarge { id: seed.id });
            }
            let idx = grid.check_bounds(seed.cell)?;
            if grid.is_wall_at(idx) {
                return Err(RegionError::SeedOnWall {
                    id: seed.id,
                    cell: seed.cell,
                });
            }
            if index.by_cell.contains_key(&seed.cell) {
                return Err(RegionError::DuplicateSeedCell { cell: seed.cell });
            }
            index.push(*seed)?;
        }
        Ok(index)
    }

    fn push(&mut self, seed: Seed) -> Result<(), RegionError> {
        if let Some(&pos) = self.by_id.get(&seed.id) {
            return Err(RegionError::DuplicateSeedId {
                id: seed.id,
                first: self.seeds[pos].cell,
                second: seed.cell,
            });
        }
        self.by_id.insert(seed.id, self.seeds.len());
        self.by_cell.insert(seed.cell, self.seeds.len());
        self.seeds.push(seed);
        Ok(())
    }

    /// Seeds in order.
    pub fn as_slice(&self) -> &[Seed] {
        &self.seeds
    }

    /// Number of seeds.
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// Always `false` for a constructed index.
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Iterate seeds in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Seed> {
        self.seeds.iter()
    }

    /// Seed with the given id.
    pub fn get(&self, id: SeedId) -> Option<&Seed> {
        self.by_id.get(&id).map(|&pos| &self.seeds[pos])
    }

    /// Position of `id` in seed order.
    pub fn position(&self, id: SeedId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Seed located at `cell`.
    pub fn at(&self, cell: Cell) -> Option<&Seed> {
        self.by_cell.get(&cell).map(|&pos| &self.seeds[pos])
    }
}

impl<'a> IntoIterator for &'a SeedIndex {
    type Item = &'a Seed;
    type IntoIter = std::slice::Iter<'a, Seed>;

    fn into_iter(self) -> Self::IntoIter {
        self.seeds.iter()
    }
}

/// Collect every seed marker in `grid`, row-major.
///
/// # Errors
///
/// [`RegionError::NoSeeds`] if the grid holds no positive marker,
/// [`RegionError::DuplicateSeedId`] if an id appears in two cells.
///
/// # Examples
///
/// ```
/// use privy_core::{Cell, SeedId};
/// use privy_regions::find_seeds;
/// use privy_space::Grid;
///
/// let grid = Grid::from_rows(&[vec![0, 4], vec![-1, 2]]).unwrap();
/// let seeds = find_seeds(&grid).unwrap();
/// let ids: Vec<SeedId> = seeds.iter().map(|s| s.id).collect();
/// assert_eq!(ids, vec![SeedId(4), SeedId(2)]);
/// assert_eq!(seeds.get(SeedId(2)).unwrap().cell, Cell::new(1, 1));
/// ```
pub fn find_seeds(grid: &Grid) -> Result<SeedIndex, RegionError> {
    let mut index = SeedIndex::with_capacity(0);
    for (idx, &raw) in grid.as_slice().iter().enumerate() {
        if let Marker::Seed(id) = Marker::from_raw(raw) {
            index.push(Seed {
                id,
                cell: grid.cell_at(idx),
            })?;
        }
    }
    if index.is_empty() {
        return Err(RegionError::NoSeeds);
    }
    Ok(index)
}
