//! Connected components of the walk graph.

use crate::seeds::SeedIndex;
use privy_space::Grid;
use std::collections::VecDeque;

const NO_COMPONENT: u32 = u32::MAX;

/// Component label per cell, computed once by BFS flood fill.
///
/// Walls carry no label. Component ids are dense, numbered in row-major
/// order of each component's first cell.
#[derive(Clone, Debug)]
pub(crate) struct Components {
    labels: Vec<u32>,
    /// Positions (in seed order) of the seeds inside each component.
    seeds_in: Vec<Vec<usize>>,
}

impl Components {
    pub(crate) fn label(grid: &Grid, seeds: &SeedIndex) -> Self {
        let n = grid.cell_count();
        let mut labels = vec![NO_COMPONENT; n];
        let mut next = 0u32;
        let mut queue = VecDeque::new();

        for start in 0..n {
            if labels[start] != NO_COMPONENT || grid.is_wall_at(start) {
                continue;
            }
            labels[start] = next;
            queue.push_back(start);
            while let Some(idx) = queue.pop_front() {
                for nb in grid.passable_neighbours(idx) {
                    if labels[nb] == NO_COMPONENT {
                        labels[nb] = next;
                        queue.push_back(nb);
                    }
                }
            }
            next += 1;
        }

        let mut seeds_in = vec![Vec::new(); next as usize];
        for (pos, seed) in seeds.iter().enumerate() {
            if let Some(idx) = grid.index(seed.cell) {
                if let Some(c) = Self::get(&labels, idx) {
                    seeds_in[c as usize].push(pos);
                }
            }
        }
        Self { labels, seeds_in }
    }

    fn get(labels: &[u32], idx: usize) -> Option<u32> {
        let c = labels[idx];
        (c != NO_COMPONENT).then_some(c)
    }

    /// Component of the cell at `idx`, `None` for walls.
    pub(crate) fn of(&self, idx: usize) -> Option<u32> {
        Self::get(&self.labels, idx)
    }

    /// Seed positions inside the component of `idx`.
    pub(crate) fn seeds_near(&self, idx: usize) -> &[usize] {
        match self.of(idx) {
            Some(c) => &self.seeds_in[c as usize],
            None => &[],
        }
    }

    /// Number of components.
    pub(crate) fn count(&self) -> usize {
        self.seeds_in.len()
    }
}
