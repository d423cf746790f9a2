//! Grid compliance test helpers.
//!
//! These functions verify that a [`Grid`] satisfies the addressing and
//! neighbourhood invariants the region engine relies on.

use crate::grid::Grid;
use std::collections::HashSet;

/// Assert that `cell_at(index(c)) == c` for every cell.
pub fn assert_index_round_trip(grid: &Grid) {
    for (i, cell) in grid.cells().enumerate() {
        assert_eq!(grid.index(cell), Some(i), "index({cell}) != {i}");
        assert_eq!(grid.cell_at(i), cell, "cell_at({i}) != {cell}");
    }
}

/// Assert that `b in neighbours(a)` implies `a in neighbours(b)`.
pub fn assert_neighbours_symmetric(grid: &Grid) {
    for a in 0..grid.cell_count() {
        for b in grid.neighbours(a) {
            assert!(
                grid.neighbours(b).contains(&a),
                "neighbour symmetry violated: {b} in N({a}) but {a} not in N({b})"
            );
        }
    }
}

/// Assert that no cell is its own neighbour.
pub fn assert_no_self_loops(grid: &Grid) {
    for a in 0..grid.cell_count() {
        assert!(!grid.neighbours(a).contains(&a), "cell {a} is its own neighbour");
    }
}

/// Assert that `cells()` is row-major, complete, and duplicate-free.
pub fn assert_cells_row_major(grid: &Grid) {
    let cells: Vec<_> = grid.cells().collect();
    assert_eq!(cells.len(), grid.cell_count());
    let unique: HashSet<_> = cells.iter().collect();
    assert_eq!(unique.len(), grid.cell_count(), "cells() has duplicates");
    let mut sorted = cells.clone();
    sorted.sort();
    assert_eq!(cells, sorted, "cells() is not row-major");
}

/// Run all compliance checks on a grid.
pub fn run_full_compliance(grid: &Grid) {
    assert_index_round_trip(grid);
    assert_neighbours_symmetric(grid);
    assert_no_self_loops(grid);
    assert_cells_row_major(grid);
}
