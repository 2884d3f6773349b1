use std::fmt;

use maze_core::Pos;

/// Errors raised by [`search`](crate::search) and the [`Frontier`](crate::Frontier).
///
/// Finding no route is not an error; see [`Outcome::Exhausted`](crate::Outcome::Exhausted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start is unset (`None`) or outside the grid.
    InvalidStart(Option<Pos>),
    /// The end is unset (`None`), outside the grid, or equal to the start.
    InvalidEnd(Option<Pos>),
    /// `pop_min` was called on an empty frontier.
    PopOnEmptyFrontier,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStart(None) => write!(f, "search: start is not set"),
            Self::InvalidStart(Some(p)) => write!(f, "search: start {p} is outside the grid"),
            Self::InvalidEnd(None) => write!(f, "search: end is not set"),
            Self::InvalidEnd(Some(p)) => {
                write!(f, "search: end {p} is outside the grid or equal to the start")
            }
            Self::PopOnEmptyFrontier => write!(f, "frontier: pop on empty frontier"),
        }
    }
}

impl std::error::Error for SearchError {}
