//! Rectangular obstacle grid with 4-connected neighbourhood (N/S/W/E).

use privy_core::{Cell, GridError, Marker};
use smallvec::SmallVec;

/// Neighbour offsets in the fixed order north, south, west, east.
pub const OFFSETS_4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A rectangular grid of raw cell markers.
///
/// Cells are stored flat in row-major order and addressed by
/// `row * cols + col`. Neighbours are the four cardinal directions;
/// out-of-bounds neighbours are omitted, so corners have two and edges
/// three. Walls are still reported as neighbours by
/// [`neighbours`](Self::neighbours); callers filter on passability.
///
/// # Examples
///
/// ```
/// use privy_core::{Cell, Marker, SeedId};
/// use privy_space::Grid;
///
/// let grid = Grid::from_rows(&[vec![0, -1, 12], vec![0, 0, 0]]).unwrap();
/// assert_eq!(grid.cell_count(), 6);
/// assert_eq!(grid.marker(Cell::new(0, 1)), Some(Marker::Wall));
/// assert_eq!(grid.marker(Cell::new(0, 2)), Some(Marker::Seed(SeedId(12))));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<i32>,
}

impl Grid {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: usize = i32::MAX as usize;

    /// Build a grid from a row-major matrix of raw markers.
    ///
    /// Returns `Err(GridError::Empty)` for zero rows or a zero-length
    /// first row, and `Err(GridError::Ragged)` naming the first row whose
    /// length differs from row 0.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        let expected = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.is_empty() || expected == 0 {
            return Err(GridError::Empty);
        }
        for (i, row) in rows.iter().enumerate() {
            let found = row.as_ref().len();
            if found != expected {
                return Err(GridError::Ragged {
                    row: i,
                    expected,
                    found,
                });
            }
        }
        let cells: Vec<i32> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::from_flat(rows.len(), expected, cells)
    }

    /// Build a grid from flat row-major storage.
    pub fn from_flat(rows: usize, cols: usize, cells: Vec<i32>) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if rows > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "rows",
                value: rows,
            });
        }
        if cols > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "cols",
                value: cols,
            });
        }
        if cells.len() != rows * cols {
            return Err(GridError::Ragged {
                row: cells.len() / cols,
                expected: cols,
                found: cells.len() % cols,
            });
        }
        Ok(Self {
            rows: rows as u32,
            cols: cols as u32,
            cells,
        })
    }

    /// A `rows x cols` grid with every cell set to `raw`.
    pub fn filled(rows: usize, cols: usize, raw: i32) -> Result<Self, GridError> {
        Self::from_flat(rows, cols, vec![raw; rows.saturating_mul(cols)])
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `cell` lies inside the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as u32) < self.rows
            && (cell.col as u32) < self.cols
    }

    /// Flat index of `cell`, or `None` when out of bounds.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.row as usize * self.cols as usize + cell.col as usize)
    }

    /// Flat index of `cell`, or a bounds error naming it.
    pub fn check_bounds(&self, cell: Cell) -> Result<usize, GridError> {
        self.index(cell).ok_or(GridError::CellOutOfBounds {
            cell,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Cell at flat index `idx`. `idx` must be below [`cell_count`](Self::cell_count).
    pub fn cell_at(&self, idx: usize) -> Cell {
        let cols = self.cols as usize;
        Cell::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Raw marker value at `cell`.
    pub fn raw(&self, cell: Cell) -> Option<i32> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Raw marker value at flat index `idx`.
    pub fn raw_at(&self, idx: usize) -> i32 {
        self.cells[idx]
    }

    /// Decoded marker at `cell`.
    pub fn marker(&self, cell: Cell) -> Option<Marker> {
        self.raw(cell).map(Marker::from_raw)
    }

    /// Decoded marker at flat index `idx`.
    pub fn marker_at(&self, idx: usize) -> Marker {
        Marker::from_raw(self.cells[idx])
    }

    /// Whether the cell at `idx` is walkable (open or seed).
    pub fn is_passable_at(&self, idx: usize) -> bool {
        self.cells[idx] >= 0
    }

    /// Whether the cell at `idx` is a wall.
    pub fn is_wall_at(&self, idx: usize) -> bool {
        self.cells[idx] < 0
    }

    /// Flat indices of the in-bounds 4-connected neighbours of `idx`,
    /// in north, south, west, east order.
    pub fn neighbours(&self, idx: usize) -> SmallVec<[usize; 4]> {
        let here = self.cell_at(idx);
        let mut result = SmallVec::new();
        for (dr, dc) in OFFSETS_4 {
            if let Some(nb) = self.index(here.offset(dr, dc)) {
                result.push(nb);
            }
        }
        result
    }

    /// Like [`neighbours`](Self::neighbours) but omitting walls.
    pub fn passable_neighbours(&self, idx: usize) -> SmallVec<[usize; 4]> {
        let mut nbs = self.neighbours(idx);
        nbs.retain(|nb| self.is_passable_at(*nb));
        nbs
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cells.len()).map(move |i| self.cell_at(i))
    }

    /// Raw markers in row-major order.
    pub fn as_slice(&self) -> &[i32] {
        &self.cells
    }

    /// Copy out as a row-major matrix.
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.cells
            .chunks(self.cols as usize)
            .map(<[i32]>::to_vec)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use privy_core::{SeedId, WALL};
    use proptest::prelude::*;

    fn c(r: i32, col: i32) -> Cell {
        Cell::new(r, col)
    }

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn from_rows_rejects_ragged() {
        let err = Grid::from_rows(&[vec![0, 0, 0], vec![0, 0], vec![0, 0, 0]]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn from_rows_rejects_empty() {
        let none: [Vec<i32>; 0] = [];
        assert_eq!(Grid::from_rows(&none), Err(GridError::Empty));
        assert_eq!(Grid::from_rows(&[Vec::<i32>::new()]), Err(GridError::Empty));
    }

    #[test]
    fn from_flat_rejects_length_mismatch() {
        assert!(matches!(
            Grid::from_flat(2, 3, vec![0; 5]),
            Err(GridError::Ragged { .. })
        ));
    }

    #[test]
    fn to_rows_round_trips() {
        let rows = vec![vec![0, -1, 12], vec![47, 0, -3]];
        let grid = Grid::from_rows(&rows).unwrap();
        assert_eq!(grid.to_rows(), rows);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
    }

    // ── Addressing tests ────────────────────────────────────────

    #[test]
    fn index_and_cell_at_agree() {
        let grid = Grid::filled(3, 5, 0).unwrap();
        assert_eq!(grid.index(c(1, 2)), Some(7));
        assert_eq!(grid.cell_at(7), c(1, 2));
        assert_eq!(grid.index(c(3, 0)), None);
        assert_eq!(grid.index(c(0, -1)), None);
    }

    #[test]
    fn check_bounds_reports_cell() {
        let grid = Grid::filled(4, 4, 0).unwrap();
        assert_eq!(
            grid.check_bounds(c(4, 1)),
            Err(GridError::CellOutOfBounds {
                cell: c(4, 1),
                rows: 4,
                cols: 4,
            })
        );
    }

    #[test]
    fn markers_decode() {
        let grid = Grid::from_rows(&[vec![0, WALL, 9]]).unwrap();
        assert_eq!(grid.marker(c(0, 0)), Some(Marker::Open));
        assert_eq!(grid.marker(c(0, 1)), Some(Marker::Wall));
        assert_eq!(grid.marker(c(0, 2)), Some(Marker::Seed(SeedId(9))));
        assert!(grid.is_wall_at(1));
        assert!(grid.is_passable_at(2));
    }

    // ── Neighbour tests ─────────────────────────────────────────

    #[test]
    fn neighbours_interior() {
        let grid = Grid::filled(5, 5, 0).unwrap();
        let centre = grid.index(c(2, 2)).unwrap();
        let n = grid.neighbours(centre);
        assert_eq!(
            n.as_slice(),
            &[
                grid.index(c(1, 2)).unwrap(), // north
                grid.index(c(3, 2)).unwrap(), // south
                grid.index(c(2, 1)).unwrap(), // west
                grid.index(c(2, 3)).unwrap(), // east
            ]
        );
    }

    #[test]
    fn neighbours_corner_and_edge() {
        let grid = Grid::filled(5, 5, 0).unwrap();
        assert_eq!(grid.neighbours(0).len(), 2);
        assert_eq!(grid.neighbours(grid.index(c(0, 2)).unwrap()).len(), 3);
    }

    #[test]
    fn passable_neighbours_skip_walls() {
        let grid = Grid::from_rows(&[vec![0, -1], vec![0, 0]]).unwrap();
        assert_eq!(grid.passable_neighbours(0).as_slice(), &[2]);
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        let grid = Grid::filled(1, 1, 0).unwrap();
        assert!(grid.neighbours(0).is_empty());
    }

    // ── Compliance ──────────────────────────────────────────────

    #[test]
    fn compliance_square() {
        compliance::run_full_compliance(&Grid::filled(6, 6, 0).unwrap());
    }

    #[test]
    fn compliance_wide() {
        compliance::run_full_compliance(&Grid::filled(2, 9, 0).unwrap());
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn neighbours_symmetric(rows in 1usize..10, cols in 1usize..10, seed in 0usize..100) {
            let grid = Grid::filled(rows, cols, 0).unwrap();
            let idx = seed % grid.cell_count();
            for nb in grid.neighbours(idx) {
                prop_assert!(
                    grid.neighbours(nb).contains(&idx),
                    "neighbour symmetry violated: {} in N({}) but not vice versa",
                    nb, idx,
                );
            }
        }

        #[test]
        fn neighbours_are_unit_steps(rows in 1usize..10, cols in 1usize..10, seed in 0usize..100) {
            let grid = Grid::filled(rows, cols, 0).unwrap();
            let idx = seed % grid.cell_count();
            let here = grid.cell_at(idx);
            for nb in grid.neighbours(idx) {
                prop_assert_eq!(here.manhattan(grid.cell_at(nb)), 1);
            }
        }
    }
}
