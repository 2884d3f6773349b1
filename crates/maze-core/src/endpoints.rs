//! Start/end bookkeeping for interactive editing.
//!
//! Start and End are tracked here by identity rather than read back from
//! cell states, so a reset can never confuse one with the other.

use crate::geom::Pos;
use crate::grid::Grid;

/// The designated start and end cells of a grid, each optionally unset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoints {
    start: Option<Pos>,
    end: Option<Pos>,
}

/// What [`Endpoints::place`] did with a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placed {
    Start,
    End,
    Barrier,
    /// The cell was out of bounds or is already the start or end.
    Nothing,
}

impl Endpoints {
    pub const fn new() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Endpoints with both cells set; does not touch any grid.
    pub const fn with(start: Pos, end: Pos) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    /// Whether both endpoints are set.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Primary action on `p`: the first free click sets the start, the next
    /// sets the end, later ones place barriers. The start and end cells are
    /// never overwritten.
    pub fn place(&mut self, grid: &mut Grid, p: Pos) -> Placed {
        let Some(cell) = grid.cell_mut(p) else {
            return Placed::Nothing;
        };
        let is_start = self.start == Some(p);
        let is_end = self.end == Some(p);

        if self.start.is_none() && !is_end {
            self.start = Some(p);
            cell.mark_start();
            Placed::Start
        } else if self.end.is_none() && !is_start {
            self.end = Some(p);
            cell.mark_end();
            Placed::End
        } else if !is_start && !is_end {
            cell.mark_barrier();
            Placed::Barrier
        } else {
            Placed::Nothing
        }
    }

    /// Secondary action on `p`: reset the cell to `Free` and unset it if it
    /// was the start or end. Returns `false` when `p` is out of bounds.
    pub fn erase(&mut self, grid: &mut Grid, p: Pos) -> bool {
        let Some(cell) = grid.cell_mut(p) else {
            return false;
        };
        cell.mark_free();
        if self.start == Some(p) {
            self.start = None;
        } else if self.end == Some(p) {
            self.end = None;
        }
        true
    }

    /// Forget both endpoints. Cell states are left alone.
    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Re-mark the start and end cells, e.g. after
    /// [`Grid::clear_search`] or a cancelled run left them marked Open.
    pub fn restore(&self, grid: &mut Grid) {
        if let Some(c) = self.start.and_then(|p| grid.cell_mut(p)) {
            c.mark_start();
        }
        if let Some(c) = self.end.and_then(|p| grid.cell_mut(p)) {
            c.mark_end();
        }
    }
}
