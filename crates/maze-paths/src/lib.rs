//! A* shortest-path search for the maze solver.
//!
//! The engine works on a [`maze_core::Grid`] whose neighbour lists have been
//! computed with [`Grid::compute_neighbors`](maze_core::Grid::compute_neighbors).
//! Every step costs 1 and movement is orthogonal only.
//!
//! - [`search`] runs one search between the [`Endpoints`](maze_core::Endpoints)
//!   of a grid.
//! - [`PathSearch`] is the reusable engine; it keeps its cost tables between
//!   runs and invalidates them lazily.
//! - [`Frontier`] is the priority queue with FIFO tie-breaking.
//!
//! The caller observes progress through an [`Observer`] invoked after each
//! expansion and each reconstruction step, and can stop a run through a
//! [`CancelCheck`] polled once per iteration.

mod distance;
mod error;
mod frontier;
mod search;
mod traits;

pub use distance::{Manhattan, manhattan};
pub use error::SearchError;
pub use frontier::{Frontier, FrontierEntry};
pub use search::{Outcome, PathSearch, Route, SearchStats, UNREACHABLE, search};
pub use traits::{CancelCheck, Heuristic, Observer};
