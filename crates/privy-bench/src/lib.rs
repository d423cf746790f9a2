//! Benchmark profiles for Privy region maps.
//!
//! - [`reference_profile`]: 100x100 grid (10K cells), 8 seeds, 20% walls
//! - [`stress_profile`]: 316x316 grid (~100K cells), 32 seeds, 20% walls
//! - [`init_seed_positions`]: deterministic collision-free seed placement

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use privy_core::{Seed, WALL};
use privy_space::Grid;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A grid with its seeds, ready for `compute_regions`.
#[derive(Clone, Debug)]
pub struct BenchMap {
    /// Obstacle grid. Seed cells are open, not marked.
    pub grid: Grid,
    /// Seeds with ids `1..=n`.
    pub seeds: Vec<Seed>,
}

/// 100x100 grid, 8 seeds, 20% walls.
pub fn reference_profile(seed: u64) -> BenchMap {
    random_map(100, 100, 8, 0.2, seed)
}

/// 316x316 grid, 32 seeds, 20% walls.
pub fn stress_profile(seed: u64) -> BenchMap {
    random_map(316, 316, 32, 0.2, seed)
}

/// Random wall layout with `n_seeds` seeds on open cells.
///
/// Each cell is a wall with probability `wall_density`; seed cells are
/// forced open afterwards.
///
/// # Panics
///
/// If `rows` or `cols` is zero, or `n_seeds` exceeds the cell count.
pub fn random_map(rows: usize, cols: usize, n_seeds: u32, wall_density: f64, seed: u64) -> BenchMap {
    let cell_count = rows * cols;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cells: Vec<i32> = (0..cell_count)
        .map(|_| if rng.random_bool(wall_density) { WALL } else { 0 })
        .collect();

    let positions = init_seed_positions(cell_count, n_seeds, seed);
    let mut seeds = Vec::with_capacity(positions.len());
    for &(id, idx) in &positions {
        cells[idx] = 0;
        let row = (idx / cols) as i32;
        let col = (idx % cols) as i32;
        seeds.push(Seed::new(id, (row, col)));
    }

    let grid = Grid::from_flat(rows, cols, cells).expect("benchmark dimensions are valid");
    BenchMap { grid, seeds }
}

/// Deterministic, distinct seed positions.
///
/// Draws `n` flat indices without replacement from a generator keyed by
/// `seed`. Returns `(seed_id, flat_index)` pairs with ids `1..=n`, in
/// draw order.
///
/// # Panics
///
/// If `n` exceeds `cell_count`.
pub fn init_seed_positions(cell_count: usize, n: u32, seed: u64) -> Vec<(u32, usize)> {
    let wanted = n as usize;
    assert!(
        wanted <= cell_count,
        "{n} seeds do not fit in {cell_count} cells"
    );
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5EED_5EED_5EED_5EED);
    index::sample(&mut rng, cell_count, wanted)
        .into_iter()
        .zip(1..)
        .map(|(idx, id)| (id, idx))
        .collect()
}
