use maze_core::Pos;

use crate::traits::Heuristic;

/// Manhattan (L1) distance between two positions.
///
/// Admissible and consistent for unit-cost 4-directional movement.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    a.manhattan(b)
}

/// The default heuristic: [`manhattan`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Pos, to: Pos) -> i32 {
        manhattan(from, to)
    }
}
