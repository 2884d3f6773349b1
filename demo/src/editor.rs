//! The editor model: grid, endpoints and the search engine, free of any
//! terminal concerns.

use rand::SeedableRng;
use rand::rngs::StdRng;

use maze_core::{Endpoints, Grid, Placed};
use maze_crossterm::Action;
use maze_paths::{CancelCheck, Observer, Outcome, PathSearch, SearchError};

/// What the event loop should do after an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Run an animated search.
    Solve,
    Quit,
}

pub struct Editor {
    grid: Grid,
    endpoints: Endpoints,
    engine: PathSearch,
    rng: StdRng,
    density: f64,
    status: String,
}

pub const HELP: &str = "left: start/end/wall  right: erase  space: solve  r: random  c: clear  q: quit";

impl Editor {
    pub fn new(rows: i32, density: f64, seed: u64) -> Self {
        Self {
            grid: Grid::new(rows),
            endpoints: Endpoints::new(),
            engine: PathSearch::new(),
            rng: StdRng::seed_from_u64(seed),
            density,
            status: HELP.to_string(),
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Apply one editing action.
    pub fn update(&mut self, action: Action) -> Flow {
        match action {
            Action::Place(p) => {
                let placed = self.endpoints.place(&mut self.grid, p);
                if placed != Placed::Nothing {
                    log::debug!("editor: {placed:?} at {p}");
                }
                Flow::Continue
            }
            Action::Erase(p) => {
                self.endpoints.erase(&mut self.grid, p);
                Flow::Continue
            }
            Action::Clear => {
                self.grid.reset();
                self.endpoints.clear();
                self.status = HELP.to_string();
                Flow::Continue
            }
            Action::Scatter => {
                self.grid.clear_search();
                let ep = self.endpoints;
                let n = self.grid.scatter_barriers(&mut self.rng, self.density, |p| {
                    ep.start() == Some(p) || ep.end() == Some(p)
                });
                self.status = format!("placed {n} barriers");
                Flow::Continue
            }
            Action::Solve => Flow::Solve,
            Action::Quit => Flow::Quit,
        }
    }

    /// Clear the previous run's markings, refresh adjacency and search.
    /// The status line is updated with the result.
    pub fn solve<O: Observer, C: CancelCheck>(
        &mut self,
        observer: O,
        cancel: C,
    ) -> Result<Outcome, SearchError> {
        self.grid.clear_search();
        self.endpoints.restore(&mut self.grid);
        self.grid.compute_neighbors();

        let result = match (self.endpoints.start(), self.endpoints.end()) {
            (None, _) => Err(SearchError::InvalidStart(None)),
            (_, None) => Err(SearchError::InvalidEnd(None)),
            (Some(start), Some(end)) => self.engine.run(&mut self.grid, start, end, observer, cancel),
        };

        self.status = match &result {
            Ok(Outcome::Found(route)) => format!(
                "route of {} steps, {} cells expanded",
                route.cost,
                self.engine.stats().expanded
            ),
            Ok(Outcome::Exhausted) => "no route: the end is walled off".to_string(),
            Ok(Outcome::Cancelled) => "search aborted".to_string(),
            Err(SearchError::InvalidStart(None)) => "place a start first".to_string(),
            Err(SearchError::InvalidEnd(None)) => "place an end first".to_string(),
            Err(e) => e.to_string(),
        };
        if let Err(e) = &result {
            log::warn!("editor: {e}");
        }
        result
    }
}
