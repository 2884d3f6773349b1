//! The [`Cell`] type — one grid position with its search state.

use crate::geom::Pos;

/// What a cell currently represents. Exactly one state is active at a time.
///
/// The core never attaches colours or glyphs to a state; front-ends map each
/// variant to their own representation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Free,
    Barrier,
    Start,
    End,
    /// Discovered and waiting in the frontier.
    Open,
    /// Expanded.
    Closed,
    /// Part of the reconstructed route.
    Path,
}

impl CellState {
    /// Whether the state was produced by a search run (Open, Closed, Path).
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }
}

/// A single grid cell.
///
/// `neighbors` is a snapshot taken by [`Grid::compute_neighbors`]; editing
/// barriers does not refresh it.
///
/// [`Grid::compute_neighbors`]: crate::Grid::compute_neighbors
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Pos,
    state: CellState,
    pub(crate) neighbors: Vec<Pos>,
}

impl Cell {
    /// Create a free cell with no cached neighbours.
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            state: CellState::Free,
            neighbors: Vec::new(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    /// Set the state unconditionally.
    #[inline]
    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    /// Cached passable neighbours, in up, down, left, right order.
    #[inline]
    pub fn neighbors(&self) -> &[Pos] {
        &self.neighbors
    }

    // --- mutators ---

    #[inline]
    pub fn mark_free(&mut self) {
        self.state = CellState::Free;
    }

    #[inline]
    pub fn mark_barrier(&mut self) {
        self.state = CellState::Barrier;
    }

    #[inline]
    pub fn mark_start(&mut self) {
        self.state = CellState::Start;
    }

    #[inline]
    pub fn mark_end(&mut self) {
        self.state = CellState::End;
    }

    #[inline]
    pub fn mark_open(&mut self) {
        self.state = CellState::Open;
    }

    #[inline]
    pub fn mark_closed(&mut self) {
        self.state = CellState::Closed;
    }

    #[inline]
    pub fn mark_path(&mut self) {
        self.state = CellState::Path;
    }

    // --- queries ---

    #[inline]
    pub fn is_free(&self) -> bool {
        self.state == CellState::Free
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == CellState::Open
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == CellState::Closed
    }

    #[inline]
    pub fn is_path(&self) -> bool {
        self.state == CellState::Path
    }
}
