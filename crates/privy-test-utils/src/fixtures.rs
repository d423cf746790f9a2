//! Fixture grids and proptest strategies.
//!
//! - [`open_grid`]: no walls, no seed markers.
//! - [`split_by_wall_row`]: 5x5, full wall row 2, seed 1 above, seed 2 below.
//! - [`corridors`]: 10x10 map of vertical corridors with five seeds.

use std::ops::Range;

use privy_core::{Cell, Seed, WALL};
use privy_space::Grid;
use proptest::prelude::*;

pub fn open_grid(rows: usize, cols: usize) -> Grid {
    Grid::filled(rows, cols, 0).expect("fixture dimensions are valid")
}

pub fn split_by_wall_row() -> Grid {
    Grid::from_rows(&[
        [0, 0, 1, 0, 0],
        [0, 0, 0, 0, 0],
        [-1, -1, -1, -1, -1],
        [0, 0, 0, 0, 0],
        [0, 0, 2, 0, 0],
    ])
    .expect("fixture is rectangular")
}

/// Seeds 12, 47, 23, 16, 45 (row-major) among walls in columns 1, 3, 5.
pub fn corridors() -> Grid {
    Grid::from_rows(&[
        [0, -1, 0, 0, 0, 0, -1, 0, 12, 0],
        [47, -1, 0, -1, 0, -1, 0, 0, 0, 0],
        [0, -1, 0, -1, 0, -1, 0, 0, 0, 0],
        [0, -1, 0, -1, 23, -1, 0, 0, 0, 0],
        [0, -1, 0, -1, 0, -1, 16, 0, 0, 0],
        [0, -1, 0, -1, 0, -1, 0, 0, 0, 0],
        [0, -1, 0, -1, 0, -1, 0, 0, 0, 0],
        [0, 0, 0, -1, 0, -1, 0, 0, 45, 0],
        [0, -1, 0, -1, 0, -1, 0, 0, 0, 0],
        [0, 0, 0, -1, 0, 0, 0, 0, 0, 0],
    ])
    .expect("fixture is rectangular")
}

/// Random wall layout (about one cell in four is a wall), no seed markers.
pub fn arb_grid(rows: Range<usize>, cols: Range<usize>) -> impl Strategy<Value = Grid> {
    (rows, cols).prop_flat_map(|(r, c)| {
        proptest::collection::vec(prop_oneof![3 => Just(0), 1 => Just(WALL)], r * c)
            .prop_map(move |cells| Grid::from_flat(r, c, cells).expect("shape matches"))
    })
}

/// A random grid with two in-bounds cells (walls allowed).
pub fn arb_grid_and_cells(
    rows: Range<usize>,
    cols: Range<usize>,
) -> impl Strategy<Value = (Grid, Cell, Cell)> {
    arb_grid(rows, cols).prop_flat_map(|grid| {
        let n = grid.cell_count();
        (Just(grid), 0..n, 0..n).prop_map(|(grid, a, b)| {
            let (ca, cb) = (grid.cell_at(a), grid.cell_at(b));
            (grid, ca, cb)
        })
    })
}

/// A random grid with 1..=4 seeds on distinct walkable cells, ids 1..
///
/// Seed cells are forced open so every generated case is valid input.
pub fn arb_seeded_grid(
    rows: Range<usize>,
    cols: Range<usize>,
) -> impl Strategy<Value = (Grid, Vec<Seed>)> {
    arb_grid(rows, cols).prop_flat_map(|grid| {
        let n = grid.cell_count();
        let picks = proptest::sample::subsequence((0..n).collect::<Vec<_>>(), 1..=n.min(4));
        (Just(grid), picks).prop_map(|(grid, picks)| {
            let mut cells = grid.as_slice().to_vec();
            let mut seeds = Vec::with_capacity(picks.len());
            for (i, idx) in picks.into_iter().enumerate() {
                cells[idx] = 0;
                seeds.push(Seed::new(i as u32 + 1, grid.cell_at(idx)));
            }
            let opened = Grid::from_flat(grid.rows() as usize, grid.cols() as usize, cells)
                .expect("shape matches");
            (opened, seeds)
        })
    })
}

/// Like [`arb_seeded_grid`] with the seed ids also written into the grid.
pub fn arb_marked_grid(
    rows: Range<usize>,
    cols: Range<usize>,
) -> impl Strategy<Value = Grid> {
    arb_seeded_grid(rows, cols).prop_map(|(grid, seeds)| {
        let mut cells = grid.as_slice().to_vec();
        for seed in &seeds {
            if let Some(idx) = grid.index(seed.cell) {
                cells[idx] = seed.id.to_raw();
            }
        }
        Grid::from_flat(grid.rows() as usize, grid.cols() as usize, cells)
            .expect("shape matches")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_have_expected_shape() {
        assert_eq!(open_grid(3, 7).cell_count(), 21);
        assert_eq!(split_by_wall_row().rows(), 5);
        let g = corridors();
        assert_eq!((g.rows(), g.cols()), (10, 10));
        assert_eq!(g.raw(Cell::new(7, 8)), Some(45));
    }

    proptest! {
        #[test]
        fn seeded_grid_seeds_are_open(
            (grid, seeds) in arb_seeded_grid(1..6, 1..6),
        ) {
            prop_assert!(!seeds.is_empty());
            for seed in &seeds {
                prop_assert_eq!(grid.raw(seed.cell), Some(0));
            }
        }
    }
}
