//! **maze-core** — the grid model behind the maze solver.
//!
//! This crate provides the data the search engine works on: [`Pos`]
//! coordinates, [`Cell`]s with a closed [`CellState`], the square [`Grid`]
//! with its cached adjacency, the [`Endpoints`] editor used by front-ends to
//! place start/end/barriers, and a cooperative [`CancelToken`].

pub mod cancel;
pub mod cell;
pub mod endpoints;
pub mod geom;
pub mod grid;

pub use cancel::CancelToken;
pub use cell::{Cell, CellState};
pub use endpoints::{Endpoints, Placed};
pub use geom::Pos;
pub use grid::Grid;
