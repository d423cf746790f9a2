//! Region fill: stamp seeds, resolve samples exactly, propagate in one
//! row-major pass, finalize.
//!
//! Exact resolution runs A* from a cell to each shortlisted seed and keeps
//! the closest reachable one. Propagation copies the id that the cell's
//! already-resolved neighbours agree on, so only cells on or near region
//! boundaries pay for path queries. The pass visits every cell exactly
//! once and each decision reads only cells resolved earlier, which makes
//! the scan order part of the result; it is strictly sequential.

use crate::components::Components;
use crate::config::RegionConfig;
use crate::finalize::finalize;
use crate::path::{PathDistance, PathSearch};
use crate::sampling::generate_samples;
use crate::seeds::{find_seeds, SeedIndex};
use crate::shortlist::shortlist;
use privy_core::{Cell, RegionError, Seed, SeedId, OPEN};
use privy_space::{Grid, RegionGrid};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use tracing::{debug, debug_span, trace};

/// Counters for one region computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Sample cells resolved exactly before the scan.
    pub sampled: usize,
    /// Scan cells that took their neighbours' consensus id.
    pub propagated: usize,
    /// Scan cells that fell back to exact resolution.
    pub exact: usize,
    /// Walkable cells left at `0` because no seed is reachable.
    pub unreachable: usize,
    /// Wall cells passed through.
    pub walls: usize,
    /// A* searches issued.
    pub path_queries: u64,
}

/// A region grid together with the counters that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionReport {
    /// The assignment.
    pub regions: RegionGrid,
    /// How it was reached.
    pub stats: FillStats,
}

struct RegionFill<'a> {
    grid: &'a Grid,
    seeds: &'a SeedIndex,
    config: &'a RegionConfig,
    components: Components,
    search: PathSearch,
    regions: RegionGrid,
    resolved: Vec<bool>,
    stats: FillStats,
}

impl<'a> RegionFill<'a> {
    fn new(grid: &'a Grid, seeds: &'a SeedIndex, config: &'a RegionConfig) -> Self {
        Self {
            grid,
            seeds,
            config,
            components: Components::label(grid, seeds),
            search: PathSearch::for_grid(grid),
            regions: RegionGrid::for_grid(grid),
            resolved: vec![false; grid.cell_count()],
            stats: FillStats::default(),
        }
    }

    fn stamp_seeds(&mut self) {
        for seed in self.seeds {
            if let Some(idx) = self.grid.index(seed.cell) {
                self.regions.set_at(idx, seed.id.to_raw());
                self.resolved[idx] = true;
            }
        }
    }

    fn resolve_samples(&mut self, samples: &[Cell]) {
        for &cell in samples {
            let Some(idx) = self.grid.index(cell) else {
                continue;
            };
            if self.resolved[idx] {
                continue;
            }
            if self.grid.is_wall_at(idx) {
                self.pass_wall(idx);
                continue;
            }
            self.resolve_exact(idx, &[]);
            self.stats.sampled += 1;
        }
    }

    fn scan(&mut self) {
        for idx in 0..self.grid.cell_count() {
            if self.resolved[idx] {
                continue;
            }
            if self.grid.is_wall_at(idx) {
                self.pass_wall(idx);
                continue;
            }

            let mut tally: SmallVec<[(SeedId, usize); 4]> = SmallVec::new();
            let mut voters = 0;
            for nb in self.grid.passable_neighbours(idx) {
                if !self.resolved[nb] {
                    continue;
                }
                voters += 1;
                if let Some(id) = SeedId::from_raw(self.regions.get_at(nb)) {
                    match tally.iter_mut().find(|(t, _)| *t == id) {
                        Some((_, votes)) => *votes += 1,
                        None => tally.push((id, 1)),
                    }
                }
            }

            let leader = tally
                .iter()
                .fold(None, |best: Option<(SeedId, usize)>, &(id, votes)| match best {
                    Some((_, top)) if top >= votes => best,
                    _ => Some((id, votes)),
                });
            match leader {
                Some((id, votes)) if self.config.consensus().accepts(votes, voters) => {
                    self.regions.set_at(idx, id.to_raw());
                    self.resolved[idx] = true;
                    self.stats.propagated += 1;
                }
                _ => {
                    let ids: SmallVec<[SeedId; 4]> = tally.iter().map(|&(id, _)| id).collect();
                    self.resolve_exact(idx, &ids);
                    self.stats.exact += 1;
                }
            }
        }
    }

    fn pass_wall(&mut self, idx: usize) {
        self.regions.set_at(idx, self.grid.raw_at(idx));
        self.resolved[idx] = true;
        self.stats.walls += 1;
    }

    /// Assign walkable `idx` the closest reachable seed, or `0` when none is.
    fn resolve_exact(&mut self, idx: usize, neighbour_ids: &[SeedId]) {
        self.resolved[idx] = true;

        let component = self.components.of(idx);
        if self.components.seeds_near(idx).is_empty() {
            self.regions.set_at(idx, OPEN);
            self.stats.unreachable += 1;
            trace!(cell = %self.grid.cell_at(idx), "no seed in component");
            return;
        }

        let point = self.grid.cell_at(idx);
        let candidates = shortlist(point, self.seeds, neighbour_ids, self.config.shortlist_k());
        let mut best: Option<(u32, SeedId)> = None;
        for seed in candidates {
            let Some(target) = self.grid.index(seed.cell) else {
                continue;
            };
            if self.components.of(target) != component {
                continue;
            }
            if let PathDistance::Steps(d) = self.search.distance_at(self.grid, idx, target) {
                if best.is_none_or(|(top, _)| d < top) {
                    best = Some((d, seed.id));
                }
            }
        }

        if best.is_none() && self.config.exhaustive_fallback() {
            let all = self.seeds.as_slice();
            for &pos in self.components.seeds_near(idx) {
                let seed = &all[pos];
                let Some(target) = self.grid.index(seed.cell) else {
                    continue;
                };
                if let PathDistance::Steps(d) = self.search.distance_at(self.grid, idx, target) {
                    if best.is_none_or(|(top, _)| d < top) {
                        best = Some((d, seed.id));
                    }
                }
            }
        }

        match best {
            Some((steps, id)) => {
                trace!(cell = %point, seed = %id, steps, "exact");
                self.regions.set_at(idx, id.to_raw());
            }
            None => {
                trace!(cell = %point, "no shortlisted seed reachable");
                self.regions.set_at(idx, OPEN);
                self.stats.unreachable += 1;
            }
        }
    }

    fn finish(mut self) -> RegionReport {
        finalize(&mut self.regions, self.grid, self.seeds);
        self.stats.path_queries = self.search.queries();
        RegionReport {
            regions: self.regions,
            stats: self.stats,
        }
    }
}

/// Assign every walkable cell of `grid` to its walk-nearest seed.
///
/// Output cells hold the owning seed's id, the input's wall value for
/// walls, or `0` for walkable cells with no reachable seed (or, rarely,
/// none among the shortlisted candidates when the component-wide fallback
/// is disabled).
///
/// # Errors
///
/// Any [`SeedIndex::from_seeds`] validation failure, notably
/// [`RegionError::NoSeeds`] for an empty seed list.
pub fn compute_regions<R: Rng + ?Sized>(
    grid: &Grid,
    seeds: &[Seed],
    config: &RegionConfig,
    rng: &mut R,
) -> Result<RegionGrid, RegionError> {
    compute_regions_with_stats(grid, seeds, config, rng).map(|report| report.regions)
}

/// Like [`compute_regions`], also returning [`FillStats`].
pub fn compute_regions_with_stats<R: Rng + ?Sized>(
    grid: &Grid,
    seeds: &[Seed],
    config: &RegionConfig,
    rng: &mut R,
) -> Result<RegionReport, RegionError> {
    let index = SeedIndex::from_seeds(seeds, grid)?;
    Ok(run(grid, &index, config, rng))
}

/// Like [`compute_regions`], driven by `ChaCha8Rng::seed_from_u64(seed)`.
pub fn compute_regions_seeded(
    grid: &Grid,
    seeds: &[Seed],
    config: &RegionConfig,
    seed: u64,
) -> Result<RegionGrid, RegionError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    compute_regions(grid, seeds, config, &mut rng)
}

/// Matrix in, matrix out: validate shape, extract seed markers, compute.
///
/// # Errors
///
/// [`RegionError::Grid`] for a ragged or empty matrix, plus any
/// [`find_seeds`] error.
///
/// # Examples
///
/// ```
/// use privy_regions::{compute_regions_from_rows, RegionConfig};
///
/// let rows = vec![
///     vec![7, 0, 0, 0],
///     vec![0, 0, 0, 0],
///     vec![0, 0, 0, 0],
///     vec![0, 0, 0, 0],
/// ];
/// let regions = compute_regions_from_rows(&rows, &RegionConfig::default(), 42).unwrap();
/// assert!(regions.as_slice().iter().all(|&v| v == 7));
/// ```
pub fn compute_regions_from_rows<R: AsRef<[i32]>>(
    rows: &[R],
    config: &RegionConfig,
    seed: u64,
) -> Result<RegionGrid, RegionError> {
    let grid = Grid::from_rows(rows)?;
    let index = find_seeds(&grid)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(run(&grid, &index, config, &mut rng).regions)
}

fn run<R: Rng + ?Sized>(
    grid: &Grid,
    seeds: &SeedIndex,
    config: &RegionConfig,
    rng: &mut R,
) -> RegionReport {
    let _span = debug_span!(
        "compute_regions",
        rows = grid.rows(),
        cols = grid.cols(),
        seeds = seeds.len()
    )
    .entered();

    let mut fill = RegionFill::new(grid, seeds, config);
    debug!(components = fill.components.count(), "labelled components");
    fill.stamp_seeds();

    let samples = generate_samples(grid, seeds, config, rng);
    fill.resolve_samples(&samples);
    debug!(
        requested = config.samples().resolve(grid.cell_count()),
        resolved = fill.stats.sampled,
        "samples resolved"
    );

    fill.scan();
    let report = fill.finish();
    debug!(
        propagated = report.stats.propagated,
        exact = report.stats.exact,
        unreachable = report.stats.unreachable,
        path_queries = report.stats.path_queries,
        "scan complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConsensusPolicy, SampleTarget};
    use privy_core::GridError;
    use privy_test_utils::{fixtures, reference_regions};

    fn cfg() -> RegionConfig {
        RegionConfig::default()
    }

    // ── Scenarios ──────────────────────────────────────────────

    #[test]
    fn single_seed_floods_open_grid() {
        let grid = fixtures::open_grid(4, 4);
        let regions =
            compute_regions_seeded(&grid, &[Seed::new(7, (0, 0))], &cfg(), 1).unwrap();
        assert!(regions.as_slice().iter().all(|&v| v == 7));
    }

    #[test]
    fn wall_row_blocks_leakage() {
        let grid = fixtures::split_by_wall_row();
        let seeds = find_seeds(&grid).unwrap();
        let regions = compute_regions_seeded(&grid, seeds.as_slice(), &cfg(), 5).unwrap();
        let rows = regions.to_rows();
        assert!(rows[..2].iter().flatten().all(|&v| v == 1));
        assert!(rows[2].iter().all(|&v| v == -1));
        assert!(rows[3..].iter().flatten().all(|&v| v == 2));
    }

    #[test]
    fn empty_seed_list_is_error() {
        let grid = fixtures::open_grid(2, 2);
        assert_eq!(
            compute_regions_seeded(&grid, &[], &cfg(), 0),
            Err(RegionError::NoSeeds)
        );
    }

    #[test]
    fn ragged_rows_are_shape_error() {
        let rows = vec![vec![1, 0, 0], vec![0, 0]];
        assert_eq!(
            compute_regions_from_rows(&rows, &cfg(), 0),
            Err(RegionError::Grid(GridError::Ragged {
                row: 1,
                expected: 3,
                found: 2,
            }))
        );
    }

    #[test]
    fn custom_wall_values_pass_through() {
        let rows = vec![vec![3, -7, 0], vec![0, -2, 0], vec![0, 0, 0]];
        let regions = compute_regions_from_rows(&rows, &cfg(), 9).unwrap();
        assert_eq!(regions.get(Cell::new(0, 1)), Some(-7));
        assert_eq!(regions.get(Cell::new(1, 1)), Some(-2));
        assert_eq!(regions.get(Cell::new(0, 2)), Some(3));
    }

    #[test]
    fn sealed_pocket_stays_zero() {
        let rows = vec![vec![5, 0, -1, 0], vec![0, 0, -1, 0]];
        let report = compute_regions_with_stats(
            &Grid::from_rows(&rows).unwrap(),
            &[Seed::new(5, (0, 0))],
            &cfg(),
            &mut ChaCha8Rng::seed_from_u64(2),
        )
        .unwrap();
        assert_eq!(report.regions.get(Cell::new(0, 3)), Some(0));
        assert_eq!(report.regions.get(Cell::new(1, 3)), Some(0));
        assert_eq!(report.regions.get(Cell::new(1, 1)), Some(5));
        assert_eq!(report.stats.unreachable, 2);
        assert_eq!(report.stats.walls, 2);
    }

    #[test]
    fn seeds_outside_grid_markers_are_stamped() {
        // Supplied seeds need not be marked in the grid.
        let grid = fixtures::open_grid(3, 3);
        let seeds = [Seed::new(4, (0, 0)), Seed::new(9, (2, 2))];
        let regions = compute_regions_seeded(&grid, &seeds, &cfg(), 3).unwrap();
        assert_eq!(regions.seed_at(Cell::new(0, 0)), Some(SeedId(4)));
        assert_eq!(regions.seed_at(Cell::new(2, 2)), Some(SeedId(9)));
        assert!(regions.as_slice().iter().all(|&v| v == 4 || v == 9));
    }

    // ── Fallback ───────────────────────────────────────────────

    /// The only straight-line-near seed sits behind a wall; the reachable
    /// seed is far away.
    fn shadowed_grid() -> (Grid, Vec<Seed>) {
        let mut rows = vec![vec![0; 12]; 3];
        rows[1] = vec![-1; 12];
        let grid = Grid::from_rows(&rows).unwrap();
        let seeds = vec![Seed::new(1, (2, 0)), Seed::new(2, (0, 11))];
        (grid, seeds)
    }

    #[test]
    fn fallback_reaches_distant_seed() {
        let (grid, seeds) = shadowed_grid();
        let config = RegionConfig::builder().shortlist_k(1).build().unwrap();
        let regions = compute_regions_seeded(&grid, &seeds, &config, 0).unwrap();
        assert!(regions.to_rows()[0].iter().all(|&v| v == 2));
        assert!(regions.to_rows()[2].iter().all(|&v| v == 1));
    }

    #[test]
    fn without_fallback_shadowed_cells_stay_zero() {
        let (grid, seeds) = shadowed_grid();
        let config = RegionConfig::builder()
            .shortlist_k(1)
            .exhaustive_fallback(false)
            .samples(SampleTarget::Count(1))
            .near_seed_fraction(0.0)
            .build()
            .unwrap();
        let regions = compute_regions_seeded(&grid, &seeds, &config, 0).unwrap();
        // Columns 0..6 of the top row are straight-line nearer to the
        // walled-off seed 1.
        let top = &regions.to_rows()[0];
        assert!(top.iter().all(|&v| v == 0 || v == 2));
        assert_eq!(top[11], 2);
    }

    // ── Stats ──────────────────────────────────────────────────

    #[test]
    fn stats_account_for_every_cell() {
        let grid = fixtures::corridors();
        let seeds = find_seeds(&grid).unwrap();
        let report = compute_regions_with_stats(
            &grid,
            seeds.as_slice(),
            &cfg(),
            &mut ChaCha8Rng::seed_from_u64(17),
        )
        .unwrap();
        let s = report.stats;
        assert_eq!(
            s.sampled + s.propagated + s.exact + s.walls + seeds.len(),
            grid.cell_count()
        );
        assert_eq!(s.walls, grid.as_slice().iter().filter(|&&v| v < 0).count());
        assert!(s.path_queries > 0);
        assert_eq!(s.unreachable, 0);
    }

    #[test]
    fn majority_policy_still_covers_reachable_cells() {
        let grid = fixtures::corridors();
        let seeds = find_seeds(&grid).unwrap();
        let majority = RegionConfig::builder()
            .consensus(ConsensusPolicy::StrictMajority)
            .build()
            .unwrap();
        let regions = compute_regions_seeded(&grid, seeds.as_slice(), &majority, 4).unwrap();
        for (idx, &v) in regions.as_slice().iter().enumerate() {
            if grid.is_passable_at(idx) {
                assert!(seeds.get(SeedId(v as u32)).is_some(), "cell {}", grid.cell_at(idx));
            } else {
                assert_eq!(v, grid.raw_at(idx));
            }
        }
    }

    // ── Reference comparison ───────────────────────────────────

    #[test]
    fn reachable_cells_match_reference_reachability() {
        let grid = fixtures::corridors();
        let seeds = find_seeds(&grid).unwrap();
        let regions = compute_regions_seeded(&grid, seeds.as_slice(), &cfg(), 8).unwrap();
        let reference = reference_regions(&grid, seeds.as_slice());
        for (idx, (&got, &want)) in regions.as_slice().iter().zip(&reference).enumerate() {
            assert_eq!(got > 0, want > 0, "cell {}", grid.cell_at(idx));
            assert_eq!(got < 0, want < 0);
        }
    }
}
