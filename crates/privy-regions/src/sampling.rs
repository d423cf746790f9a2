//! Sample cells resolved exactly before the propagation scan.
//!
//! Two populations: cells jittered around a random seed, which pin down
//! region boundaries close to seeds, and cells drawn uniformly over the
//! grid. Each population gets at most twice its target in attempts, so the
//! result may hold fewer cells than requested on small or crowded grids.

use crate::config::RegionConfig;
use crate::seeds::SeedIndex;
use indexmap::IndexSet;
use privy_core::Cell;
use privy_space::Grid;
use rand::Rng;

/// Draw sample cells in the order they were accepted.
///
/// Never returns a seed cell, an out-of-bounds cell, or the same cell
/// twice. Walls may be sampled; the engine resolves them to the wall
/// value.
pub fn generate_samples<R: Rng + ?Sized>(
    grid: &Grid,
    seeds: &SeedIndex,
    config: &RegionConfig,
    rng: &mut R,
) -> Vec<Cell> {
    let seed_cells: IndexSet<usize> = seeds
        .iter()
        .filter_map(|s| grid.index(s.cell))
        .collect();
    let (near_target, uniform_target) = config.sample_split(grid.cell_count(), seed_cells.len());
    let mut chosen: IndexSet<usize> = IndexSet::with_capacity(near_target + uniform_target);

    let jitter = i32::try_from(config.max_jitter()).unwrap_or(i32::MAX);
    let seed_list = seeds.as_slice();
    let mut accepted = 0;
    for _ in 0..near_target.saturating_mul(2) {
        if accepted == near_target || seed_list.is_empty() {
            break;
        }
        let seed = &seed_list[rng.random_range(0..seed_list.len())];
        let dr = rng.random_range(-jitter..=jitter);
        let dc = rng.random_range(-jitter..=jitter);
        let Some(idx) = grid.index(seed.cell.offset(dr, dc)) else {
            continue;
        };
        if !seed_cells.contains(&idx) && chosen.insert(idx) {
            accepted += 1;
        }
    }

    let cell_count = grid.cell_count();
    let mut accepted = 0;
    for _ in 0..uniform_target.saturating_mul(2) {
        if accepted == uniform_target {
            break;
        }
        let idx = rng.random_range(0..cell_count);
        if !seed_cells.contains(&idx) && chosen.insert(idx) {
            accepted += 1;
        }
    }

    chosen.into_iter().map(|idx| grid.cell_at(idx)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SampleTarget;
    use crate::seeds::find_seeds;
    use privy_test_utils::fixtures;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(count: usize, near: f64) -> RegionConfig {
        RegionConfig::builder()
            .samples(SampleTarget::Count(count))
            .near_seed_fraction(near)
            .build()
            .unwrap()
    }

    #[test]
    fn respects_target_and_excludes_seeds() {
        let grid = fixtures::corridors();
        let seeds = find_seeds(&grid).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let samples = generate_samples(&grid, &seeds, &config(20, 0.5), &mut rng);
        assert!(samples.len() <= 20);
        assert!(!samples.is_empty());
        for cell in &samples {
            assert!(grid.contains(*cell));
            assert!(seeds.at(*cell).is_none(), "seed cell {cell} sampled");
        }
    }

    #[test]
    fn near_seed_samples_stay_within_jitter() {
        let grid = fixtures::open_grid(40, 40);
        let seeds = SeedIndex::from_seeds(&[privy_core::Seed::new(1, (20, 20))], &grid).unwrap();
        let cfg = RegionConfig::builder()
            .samples(SampleTarget::Count(10))
            .near_seed_fraction(1.0)
            .max_jitter(2)
            .build()
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let samples = generate_samples(&grid, &seeds, &cfg, &mut rng);
        for cell in samples {
            assert!((cell.row - 20).abs() <= 2 && (cell.col - 20).abs() <= 2);
        }
    }

    #[test]
    fn deterministic_for_fixed_rng() {
        let grid = fixtures::corridors();
        let seeds = find_seeds(&grid).unwrap();
        let cfg = config(15, 0.4);
        let a = generate_samples(&grid, &seeds, &cfg, &mut ChaCha8Rng::seed_from_u64(3));
        let b = generate_samples(&grid, &seeds, &cfg, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn tiny_grid_undershoots() {
        // Only one non-seed cell exists; asking for 50 yields at most 1.
        let grid = Grid::from_rows(&[vec![1, 0]]).unwrap();
        let seeds = find_seeds(&grid).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let samples = generate_samples(&grid, &seeds, &config(50, 0.5), &mut rng);
        assert!(samples.len() <= 1);
        assert!(samples.iter().all(|c| *c == Cell::new(0, 1)));
    }

    #[test]
    fn unbounded_count_is_capped_by_grid() {
        let grid = fixtures::open_grid(2, 2);
        let seeds = SeedIndex::from_seeds(&[privy_core::Seed::new(1, (0, 0))], &grid).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let samples = generate_samples(&grid, &seeds, &config(usize::MAX, 0.5), &mut rng);
        assert!(samples.len() <= 3);
        assert!(!samples.contains(&Cell::new(0, 0)));
    }

    proptest! {
        #[test]
        fn samples_are_distinct(seed in any::<u64>(), count in 1usize..60) {
            let grid = fixtures::corridors();
            let seeds = find_seeds(&grid).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let samples = generate_samples(&grid, &seeds, &config(count, 0.5), &mut rng);
            let unique: IndexSet<Cell> = samples.iter().copied().collect();
            prop_assert_eq!(unique.len(), samples.len());
            prop_assert!(samples.len() <= count);
        }
    }
}
