use maze_core::{Grid, Pos};

/// Estimate of the remaining distance between two positions.
/// Must never overestimate the true cost (admissible).
pub trait Heuristic {
    fn estimate(&self, from: Pos, to: Pos) -> i32;
}

impl<F: Fn(Pos, Pos) -> i32> Heuristic for F {
    #[inline]
    fn estimate(&self, from: Pos, to: Pos) -> i32 {
        self(from, to)
    }
}

/// Called after every expansion step and every reconstruction step, with
/// the grid in its current state. This is where a front-end redraws.
pub trait Observer {
    fn observe(&mut self, grid: &Grid);
}

impl<F: FnMut(&Grid)> Observer for F {
    #[inline]
    fn observe(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// Polled once per loop iteration; returning `true` stops the run.
pub trait CancelCheck {
    fn should_cancel(&mut self) -> bool;
}

impl<F: FnMut() -> bool> CancelCheck for F {
    #[inline]
    fn should_cancel(&mut self) -> bool {
        self()
    }
}
