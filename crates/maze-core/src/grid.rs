//! The [`Grid`] type — a square, row-major collection of [`Cell`]s.
//!
//! The grid owns cell construction and the adjacency relation. Adjacency is
//! cached per cell by [`compute_neighbors`](Grid::compute_neighbors) and must
//! be recomputed after barriers change.

use rand::Rng;

use crate::cell::{Cell, CellState};
use crate::geom::Pos;

/// A `rows × rows` grid of cells with coordinates dense from 0.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid of the given dimension, every cell `Free`.
    /// Negative dimensions produce an empty grid.
    pub fn new(rows: i32) -> Self {
        let rows = rows.max(0);
        Self {
            rows,
            cells: build_cells(rows),
        }
    }

    /// Square dimension.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of cells (`rows × rows`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.rows
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.rows as usize + p.col as usize)
    }

    /// Position of the cell at flat index `idx`.
    #[inline]
    pub fn pos(&self, idx: usize) -> Pos {
        let w = self.rows.max(1) as usize;
        Pos::new((idx / w) as i32, (idx % w) as i32)
    }

    pub fn cell(&self, p: Pos) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, p: Pos) -> Option<&mut Cell> {
        self.index(p).map(move |i| &mut self.cells[i])
    }

    /// State of the cell at `p`, `None` if out of bounds.
    pub fn state(&self, p: Pos) -> Option<CellState> {
        self.cell(p).map(Cell::state)
    }

    /// Set the state at `p`. No-op if `p` is outside the grid.
    pub fn set_state(&mut self, p: Pos, state: CellState) {
        if let Some(c) = self.cell_mut(p) {
            c.set_state(state);
        }
    }

    /// Whether `p` is in bounds and not a barrier.
    #[inline]
    pub fn is_passable(&self, p: Pos) -> bool {
        self.cell(p).is_some_and(|c| !c.is_barrier())
    }

    /// Compute the passable orthogonal neighbours of `p` from the current
    /// barrier layout, in up, down, left, right order.
    pub fn neighbors_of(&self, p: Pos) -> Vec<Pos> {
        if !self.contains(p) {
            return Vec::new();
        }
        p.neighbors_4()
            .into_iter()
            .filter(|&n| self.is_passable(n))
            .collect()
    }

    /// Refresh every cell's cached neighbour list from the current barriers.
    pub fn compute_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let nbs = self.neighbors_of(self.pos(i));
            self.cells[i].neighbors = nbs;
        }
    }

    /// Discard all cells and build fresh `Free` ones of the same dimension.
    pub fn reset(&mut self) {
        self.cells = build_cells(self.rows);
    }

    /// Turn every Open, Closed and Path cell back into `Free`, keeping
    /// Start, End and Barrier markings. Returns the number of cells changed.
    pub fn clear_search(&mut self) -> usize {
        let mut n = 0;
        for c in self.cells.iter_mut().filter(|c| c.state().is_search_mark()) {
            c.mark_free();
            n += 1;
        }
        n
    }

    /// Turn each `Free` cell into a barrier with probability `density`,
    /// skipping cells for which `keep` returns `true`. Returns the number of
    /// barriers placed. A density that is not finite places none.
    pub fn scatter_barriers<R: Rng>(
        &mut self,
        rng: &mut R,
        density: f64,
        keep: impl Fn(Pos) -> bool,
    ) -> usize {
        if !density.is_finite() {
            return 0;
        }
        let density = density.clamp(0.0, 1.0);
        let mut n = 0;
        for c in self.cells.iter_mut() {
            if !c.is_free() || keep(c.pos()) {
                continue;
            }
            if rng.random_bool(density) {
                c.mark_barrier();
                n += 1;
            }
        }
        n
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state() == state).count()
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

fn build_cells(rows: i32) -> Vec<Cell> {
    let mut cells = Vec::with_capacity((rows as usize) * (rows as usize));
    for row in 0..rows {
        for col in 0..rows {
            cells.push(Cell::new(Pos::new(row, col)));
        }
    }
    cells
}
