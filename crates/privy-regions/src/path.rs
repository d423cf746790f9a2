//! Shortest walkable path between two cells (A* search).
//!
//! The walk graph has one node per passable cell (open or seed) and a
//! unit-cost edge between 4-connected neighbours. Search is ordered by
//! `f = g + h` with `h` the Euclidean distance to the target, which never
//! exceeds the remaining step count on a 4-connected grid. Entries with
//! equal `f` pop in insertion order, so results and expansion order are
//! deterministic.
//!
//! [`PathSearch`] owns flat `rows * cols` scratch arrays (best cost,
//! closed flag, predecessor) and reuses them across queries on the same
//! grid; [`path_distance`] and [`shortest_path`] are one-shot wrappers.

use privy_core::{Cell, GridError};
use privy_space::Grid;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Result of a distance query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathDistance {
    /// The shortest walk takes this many unit steps.
    Steps(u32),
    /// No walk connects the two cells.
    Unreachable,
}

impl PathDistance {
    /// Step count, if reachable.
    pub fn steps(self) -> Option<u32> {
        match self {
            Self::Steps(n) => Some(n),
            Self::Unreachable => None,
        }
    }

    /// Whether a walk exists.
    pub fn is_reachable(self) -> bool {
        matches!(self, Self::Steps(_))
    }
}

const UNSEEN: u32 = u32::MAX;
const NO_PARENT: usize = usize::MAX;

/// One frontier entry, ordered by score then insertion sequence.
///
/// `Ord` is reversed so that `BinaryHeap` (a max-heap) pops the lowest
/// score first, and among equal scores the earliest pushed.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    f: f64,
    seq: u64,
    g: u32,
    idx: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

/// Reusable A* scratch space for one grid.
#[derive(Debug, Default)]
pub struct PathSearch {
    best: Vec<u32>,
    closed: Vec<bool>,
    parent: Vec<usize>,
    touched: Vec<usize>,
    heap: BinaryHeap<Frontier>,
    queries: u64,
}

impl PathSearch {
    /// Scratch space sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        let n = grid.cell_count();
        Self {
            best: vec![UNSEEN; n],
            closed: vec![false; n],
            parent: vec![NO_PARENT; n],
            touched: Vec::new(),
            heap: BinaryHeap::new(),
            queries: 0,
        }
    }

    /// Number of searches run so far (trivial and wall queries excluded).
    pub fn queries(&self) -> u64 {
        self.queries
    }

    /// Shortest walk length from `a` to `b`.
    ///
    /// Returns `Ok(PathDistance::Unreachable)` when either endpoint is a
    /// wall or no walk exists, and `Err(GridError::CellOutOfBounds)` when
    /// either endpoint lies outside the grid.
    pub fn distance(&mut self, grid: &Grid, a: Cell, b: Cell) -> Result<PathDistance, GridError> {
        let from = grid.check_bounds(a)?;
        let to = grid.check_bounds(b)?;
        Ok(match self.search(grid, from, to) {
            Some(steps) => PathDistance::Steps(steps),
            None => PathDistance::Unreachable,
        })
    }

    /// Cells of one shortest walk from `a` to `b`, both endpoints included.
    ///
    /// `Ok(None)` when unreachable. The returned route has
    /// `distance + 1` cells.
    pub fn route(&mut self, grid: &Grid, a: Cell, b: Cell) -> Result<Option<Vec<Cell>>, GridError> {
        let from = grid.check_bounds(a)?;
        let to = grid.check_bounds(b)?;
        if self.search(grid, from, to).is_none() {
            return Ok(None);
        }
        if from == to {
            return Ok(Some(vec![a]));
        }
        let mut route = vec![b];
        let mut at = to;
        while at != from {
            at = self.parent[at];
            route.push(grid.cell_at(at));
        }
        route.reverse();
        Ok(Some(route))
    }

    /// Distance by flat index. Caller guarantees both are in bounds.
    pub(crate) fn distance_at(&mut self, grid: &Grid, from: usize, to: usize) -> PathDistance {
        match self.search(grid, from, to) {
            Some(steps) => PathDistance::Steps(steps),
            None => PathDistance::Unreachable,
        }
    }

    fn search(&mut self, grid: &Grid, from: usize, to: usize) -> Option<u32> {
        if grid.is_wall_at(from) || grid.is_wall_at(to) {
            return None;
        }
        if from == to {
            return Some(0);
        }
        self.prepare(grid.cell_count());
        self.queries += 1;

        let target = grid.cell_at(to);
        let mut seq = 0u64;
        self.visit(from, 0, NO_PARENT);
        self.heap.push(Frontier {
            f: grid.cell_at(from).euclidean(target),
            seq,
            g: 0,
            idx: from,
        });

        while let Some(Frontier { g, idx, .. }) = self.heap.pop() {
            if self.closed[idx] || g != self.best[idx] {
                continue;
            }
            if idx == to {
                return Some(g);
            }
            self.closed[idx] = true;

            let next_g = g + 1;
            for nb in grid.passable_neighbours(idx) {
                if next_g < self.best[nb] {
                    self.closed[nb] = false;
                    self.visit(nb, next_g, idx);
                    seq += 1;
                    self.heap.push(Frontier {
                        f: f64::from(next_g) + grid.cell_at(nb).euclidean(target),
                        seq,
                        g: next_g,
                        idx: nb,
                    });
                }
            }
        }
        None
    }

    fn visit(&mut self, idx: usize, g: u32, parent: usize) {
        if self.best[idx] == UNSEEN {
            self.touched.push(idx);
        }
        self.best[idx] = g;
        self.parent[idx] = parent;
    }

    /// Reset only the entries the previous search wrote.
    fn prepare(&mut self, cell_count: usize) {
        if self.best.len() != cell_count {
            self.best = vec![UNSEEN; cell_count];
            self.closed = vec![false; cell_count];
            self.parent = vec![NO_PARENT; cell_count];
            self.touched.clear();
        } else {
            for &i in &self.touched {
                self.best[i] = UNSEEN;
                self.closed[i] = false;
                self.parent[i] = NO_PARENT;
            }
            self.touched.clear();
        }
        self.heap.clear();
    }
}

/// Shortest walk length between `a` and `b` on `grid`.
///
/// # Examples
///
/// ```
/// use privy_core::Cell;
/// use privy_regions::{path_distance, PathDistance};
/// use privy_space::Grid;
///
/// // A wall column forces a detour through the bottom row.
/// let grid = Grid::from_rows(&[
///     vec![0, -1, 0],
///     vec![0, -1, 0],
///     vec![0,  0, 0],
/// ]).unwrap();
/// let d = path_distance(&grid, Cell::new(0, 0), Cell::new(0, 2)).unwrap();
/// assert_eq!(d, PathDistance::Steps(6));
/// ```
pub fn path_distance(grid: &Grid, a: Cell, b: Cell) -> Result<PathDistance, GridError> {
    PathSearch::for_grid(grid).distance(grid, a, b)
}

/// One shortest walk from `a` to `b`, endpoints included.
pub fn shortest_path(grid: &Grid, a: Cell, b: Cell) -> Result<Option<Vec<Cell>>, GridError> {
    PathSearch::for_grid(grid).route(grid, a, b)
}
