//! Test utilities for Privy development.
//!
//! Provides fixture grids ([`fixtures`]) and brute-force breadth-first
//! references ([`bfs_distances`], [`reference_regions`]) that the
//! region engine's output is checked against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::VecDeque;

use privy_core::{Seed, OPEN};
use privy_space::Grid;

/// Walk distance from `from` to every cell, by plain BFS.
///
/// `None` for walls, unreachable cells, and everything when `from` is a
/// wall or out of bounds.
pub fn bfs_distances(grid: &Grid, from: privy_core::Cell) -> Vec<Option<u32>> {
    let mut dist = vec![None; grid.cell_count()];
    let Some(start) = grid.index(from) else {
        return dist;
    };
    if grid.is_wall_at(start) {
        return dist;
    }
    dist[start] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(idx) = queue.pop_front() {
        let next = dist[idx].map(|d| d + 1);
        for nb in grid.passable_neighbours(idx) {
            if dist[nb].is_none() {
                dist[nb] = next;
                queue.push_back(nb);
            }
        }
    }
    dist
}

/// Exact walk-nearest assignment by multi-source BFS.
///
/// Raw encoding as the engine produces it: seed id, wall value, or `0`.
/// Ties go to the seed listed first.
pub fn reference_regions(grid: &Grid, seeds: &[Seed]) -> Vec<i32> {
    let mut out: Vec<i32> = grid
        .as_slice()
        .iter()
        .map(|&raw| if raw < 0 { raw } else { OPEN })
        .collect();
    let mut seen = vec![false; grid.cell_count()];
    let mut queue = VecDeque::new();
    for seed in seeds {
        if let Some(idx) = grid.index(seed.cell) {
            if !seen[idx] && !grid.is_wall_at(idx) {
                seen[idx] = true;
                out[idx] = seed.id.to_raw();
                queue.push_back(idx);
            }
        }
    }
    while let Some(idx) = queue.pop_front() {
        for nb in grid.passable_neighbours(idx) {
            if !seen[nb] {
                seen[nb] = true;
                out[nb] = out[idx];
                queue.push_back(nb);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use privy_core::Cell;

    #[test]
    fn bfs_detours_around_wall() {
        let grid = fixtures::corridors();
        let dist = bfs_distances(&grid, Cell::new(0, 0));
        // Column 1 is walled from row 0 to row 6; the gap is at row 7.
        assert_eq!(dist[grid.index(Cell::new(0, 2)).unwrap()], Some(16));
        assert_eq!(dist[grid.index(Cell::new(0, 1)).unwrap()], None);
    }

    #[test]
    fn reference_splits_on_wall_row() {
        let grid = fixtures::split_by_wall_row();
        let seeds = [Seed::new(1, (0, 2)), Seed::new(2, (4, 2))];
        let out = reference_regions(&grid, &seeds);
        assert!(out[..10].iter().all(|&v| v == 1));
        assert!(out[10..15].iter().all(|&v| v == -1));
        assert!(out[15..].iter().all(|&v| v == 2));
    }
}
