//! The A* engine and path reconstruction.

use maze_core::{Endpoints, Grid, Pos};

use crate::distance::Manhattan;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::traits::{CancelCheck, Heuristic, Observer};

/// Sentinel cost meaning "not reached in the last run".
pub const UNREACHABLE: i32 = i32::MAX;

/// A shortest route, ordered start → end and including both endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub path: Vec<Pos>,
    /// Number of steps, equal to the end's g-score.
    pub cost: i32,
}

impl Route {
    /// Number of steps between consecutive cells.
    #[inline]
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Found(Route),
    /// The frontier emptied without reaching the end.
    Exhausted,
    /// The cancel check fired before the run finished.
    Cancelled,
}

impl Outcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Found(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::Exhausted => "exhausted",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Counters for the last run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells whose neighbours were scanned.
    pub expanded: usize,
    /// Frontier pushes, the start included.
    pub pushed: usize,
    /// Improvements to cells that were already pending; their frontier
    /// entry keeps the priority it was queued with.
    pub improved: usize,
}

// ---------------------------------------------------------------------------
// Per-cell cost tables
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Node {
    g: i32,
    f: i32,
    parent: usize,
    generation: u32,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: usize::MAX,
            generation: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// PathSearch
// ---------------------------------------------------------------------------

/// Reusable A* engine.
///
/// The g/f tables and predecessor links live in a flat node array indexed
/// like the grid. Each run bumps a generation counter instead of clearing
/// the array, so entries from an older run read as unreached. The tables of
/// the last run stay queryable through [`g_score`](Self::g_score),
/// [`f_score`](Self::f_score) and [`predecessor`](Self::predecessor).
///
/// The frontier has no decrease-key. A cell is pushed only when it is not
/// already pending. When a pending cell finds a cheaper route its tables are
/// updated in place and its entry keeps the old priority; once popped it is
/// expanded with the current g-score.
pub struct PathSearch<H = Manhattan> {
    heuristic: H,
    nodes: Vec<Node>,
    generation: u32,
    rows: i32,
    frontier: Frontier,
    stats: SearchStats,
    // scratch copy of the current cell's neighbour list
    nbuf: Vec<Pos>,
}

impl Default for PathSearch<Manhattan> {
    fn default() -> Self {
        Self::new()
    }
}

impl PathSearch<Manhattan> {
    /// Create an engine using the Manhattan heuristic.
    pub fn new() -> Self {
        Self::with_heuristic(Manhattan)
    }
}

impl<H: Heuristic> PathSearch<H> {
    /// Create an engine using a custom admissible heuristic.
    pub fn with_heuristic(heuristic: H) -> Self {
        Self {
            heuristic,
            nodes: Vec::new(),
            generation: 0,
            rows: 0,
            frontier: Frontier::new(),
            stats: SearchStats::default(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Run A* from `start` to `end` over the cached neighbour lists of `grid`.
    ///
    /// Newly discovered cells are marked Open, expanded cells other than the
    /// start are marked Closed, and on success the cells strictly between
    /// start and end are marked Path and the end is re-marked End. After a
    /// cancelled run the Open/Closed markings are left as they were.
    pub fn run<O: Observer, C: CancelCheck>(
        &mut self,
        grid: &mut Grid,
        start: Pos,
        end: Pos,
        mut observer: O,
        mut cancel: C,
    ) -> Result<Outcome, SearchError> {
        let start_idx = grid.index(start).ok_or(SearchError::InvalidStart(Some(start)))?;
        let goal_idx = grid.index(end).ok_or(SearchError::InvalidEnd(Some(end)))?;
        if start_idx == goal_idx {
            return Err(SearchError::InvalidEnd(Some(end)));
        }

        self.prepare(grid);
        let cur_gen = self.generation;
        let rows = grid.rows();
        log::debug!("astar: {start} -> {end} on a {rows}x{rows} grid");

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.f = self.heuristic.estimate(start, end);
            node.parent = usize::MAX;
            node.generation = cur_gen;
        }
        self.frontier.push(self.nodes[start_idx].f, start);
        self.stats.pushed += 1;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let result = 'search: {
            while !self.frontier.is_empty() {
                if cancel.should_cancel() {
                    break 'search Ok(Outcome::Cancelled);
                }

                let entry = match self.frontier.pop_min() {
                    Ok(e) => e,
                    Err(e) => break 'search Err(e),
                };
                let Some(ci) = grid.index(entry.pos) else {
                    continue;
                };

                if ci == goal_idx {
                    let route = self.reconstruct(grid, start_idx, goal_idx, &mut observer);
                    if let Some(c) = grid.cell_mut(end) {
                        c.mark_end();
                    }
                    break 'search Ok(Outcome::Found(route));
                }

                self.stats.expanded += 1;
                let current_g = self.nodes[ci].g;
                log::trace!(
                    "astar: expand {} g={} f={}",
                    entry.pos,
                    current_g,
                    self.nodes[ci].f
                );

                nbuf.clear();
                if let Some(c) = grid.cell(entry.pos) {
                    nbuf.extend_from_slice(c.neighbors());
                }

                for &np in nbuf.iter() {
                    let Some(ni) = grid.index(np) else {
                        continue;
                    };
                    let tentative_g = current_g + 1;

                    let n = &mut self.nodes[ni];
                    if n.generation == cur_gen {
                        if tentative_g >= n.g {
                            continue;
                        }
                    } else {
                        n.generation = cur_gen;
                    }

                    n.g = tentative_g;
                    n.f = tentative_g + self.heuristic.estimate(np, end);
                    n.parent = ci;
                    let f = n.f;

                    if self.frontier.contains(np) {
                        self.stats.improved += 1;
                        continue;
                    }
                    self.frontier.push(f, np);
                    self.stats.pushed += 1;
                    if let Some(c) = grid.cell_mut(np) {
                        c.mark_open();
                    }
                }

                observer.observe(grid);

                if ci != start_idx {
                    if let Some(c) = grid.cell_mut(entry.pos) {
                        c.mark_closed();
                    }
                }
            }
            Ok(Outcome::Exhausted)
        };

        self.nbuf = nbuf;

        if let Ok(outcome) = &result {
            log::debug!(
                "astar: {} after {} expansions ({} pushed, {} improved in place)",
                outcome.label(),
                self.stats.expanded,
                self.stats.pushed,
                self.stats.improved
            );
        }
        result
    }

    /// Walk the predecessor links back from the end, marking each cell
    /// between the endpoints as Path and notifying the observer per step.
    fn reconstruct<O: Observer>(
        &self,
        grid: &mut Grid,
        start_idx: usize,
        goal_idx: usize,
        observer: &mut O,
    ) -> Route {
        let mut path = vec![grid.pos(goal_idx)];
        let mut ci = goal_idx;
        while self.nodes[ci].parent != usize::MAX {
            ci = self.nodes[ci].parent;
            let p = grid.pos(ci);
            if ci != start_idx {
                if let Some(c) = grid.cell_mut(p) {
                    c.mark_path();
                }
            }
            path.push(p);
            observer.observe(grid);
        }
        path.reverse();
        Route {
            path,
            cost: self.nodes[goal_idx].g,
        }
    }

    /// Size the node array for `grid` and invalidate the previous run.
    fn prepare(&mut self, grid: &Grid) {
        let len = grid.len();
        if self.nodes.len() < len {
            self.nodes.clear();
            self.nodes.resize(len, Node::default());
            self.generation = 0;
        }
        self.rows = grid.rows();

        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }

        self.frontier.clear();
        self.stats = SearchStats::default();
    }

    fn node(&self, p: Pos) -> Option<&Node> {
        if p.row < 0 || p.col < 0 || p.row >= self.rows || p.col >= self.rows {
            return None;
        }
        let n = self.nodes.get(p.row as usize * self.rows as usize + p.col as usize)?;
        (n.generation == self.generation && self.generation != 0).then_some(n)
    }

    /// g-score of `p` from the last run, or [`UNREACHABLE`].
    pub fn g_score(&self, p: Pos) -> i32 {
        self.node(p).map_or(UNREACHABLE, |n| n.g)
    }

    /// f-score of `p` from the last run, or [`UNREACHABLE`].
    pub fn f_score(&self, p: Pos) -> i32 {
        self.node(p).map_or(UNREACHABLE, |n| n.f)
    }

    /// The cell `p` was reached from in the last run.
    pub fn predecessor(&self, p: Pos) -> Option<Pos> {
        let n = self.node(p)?;
        if n.parent == usize::MAX {
            return None;
        }
        let w = self.rows as usize;
        Some(Pos::new((n.parent / w) as i32, (n.parent % w) as i32))
    }

    /// Counters of the last run.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Search between the endpoints of a grid with the Manhattan heuristic.
///
/// Fails with [`SearchError::InvalidStart`] / [`SearchError::InvalidEnd`]
/// when an endpoint is unset, out of bounds, or both are the same cell; the
/// grid is untouched in that case.
pub fn search<O: Observer, C: CancelCheck>(
    grid: &mut Grid,
    endpoints: &Endpoints,
    observer: O,
    cancel: C,
) -> Result<Outcome, SearchError> {
    let start = endpoints.start().ok_or(SearchError::InvalidStart(None))?;
    let end = endpoints.end().ok_or(SearchError::InvalidEnd(None))?;
    PathSearch::new().run(grid, start, end, observer, cancel)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use maze_core::{CancelToken, CellState};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::distance::manhattan;

    fn never() -> bool {
        false
    }

    fn grid_with(rows: i32, barriers: &[(i32, i32)]) -> Grid {
        let mut g = Grid::new(rows);
        for &(r, c) in barriers {
            g.set_state(Pos::new(r, c), CellState::Barrier);
        }
        g.compute_neighbors();
        g
    }

    fn solve(grid: &mut Grid, start: Pos, end: Pos) -> Outcome {
        PathSearch::new()
            .run(grid, start, end, |_: &Grid| {}, never)
            .unwrap()
    }

    /// Breadth-first distance over the live barrier layout.
    fn bfs(grid: &Grid, start: Pos, end: Pos) -> Option<i32> {
        let mut dist = vec![UNREACHABLE; grid.len()];
        let mut queue = VecDeque::new();
        dist[grid.index(start)?] = 0;
        queue.push_back(start);
        while let Some(p) = queue.pop_front() {
            let d = dist[grid.index(p)?];
            if p == end {
                return Some(d);
            }
            for n in grid.neighbors_of(p) {
                let ni = grid.index(n)?;
                if dist[ni] == UNREACHABLE {
                    dist[ni] = d + 1;
                    queue.push_back(n);
                }
            }
        }
        None
    }

    fn random_grid(rng: &mut StdRng, rows: i32, density: f64) -> (Grid, Pos, Pos) {
        let mut g = Grid::new(rows);
        let start = Pos::new(rng.random_range(0..rows), rng.random_range(0..rows));
        let mut end = start;
        while end == start {
            end = Pos::new(rng.random_range(0..rows), rng.random_range(0..rows));
        }
        g.scatter_barriers(rng, density, |p| p == start || p == end);
        g.compute_neighbors();
        (g, start, end)
    }

    fn assert_valid_route(grid: &Grid, route: &Route, start: Pos, end: Pos) {
        assert_eq!(route.path.first(), Some(&start));
        assert_eq!(route.path.last(), Some(&end));
        assert_eq!(route.steps() as i32, route.cost);
        for w in route.path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a step", w[0], w[1]);
        }
        for &p in &route.path {
            assert!(!grid.cell(p).unwrap().is_barrier());
        }
    }

    // -----------------------------------------------------------------------
    // Concrete scenarios
    // -----------------------------------------------------------------------

    #[test]
    fn empty_five_by_five_corner_to_corner() {
        let mut g = grid_with(5, &[]);
        let (s, e) = (Pos::new(0, 0), Pos::new(4, 4));
        let outcome = solve(&mut g, s, e);
        let route = outcome.route().unwrap();
        assert_eq!(route.cost, 8);
        assert_eq!(route.path.len(), 9);
        assert_valid_route(&g, route, s, e);
    }

    #[test]
    fn blocked_column_is_exhausted() {
        let mut g = grid_with(3, &[(0, 1), (1, 1), (2, 1)]);
        let outcome = solve(&mut g, Pos::new(0, 0), Pos::new(0, 2));
        assert_eq!(outcome, Outcome::Exhausted);
        // Only the start's side was explored.
        assert_eq!(g.state(Pos::new(0, 2)), Some(CellState::Free));
    }

    #[test]
    fn walled_in_start_is_exhausted() {
        let mut g = grid_with(5, &[(1, 2), (3, 2), (2, 1), (2, 3)]);
        let mut calls = 0;
        let outcome = PathSearch::new()
            .run(&mut g, Pos::new(2, 2), Pos::new(0, 0), |_: &Grid| calls += 1, never)
            .unwrap();
        assert_eq!(outcome, Outcome::Exhausted);
        // Only the start itself was expanded.
        assert_eq!(calls, 1);
    }

    #[test]
    fn single_cell_start_equals_end() {
        let mut g = grid_with(1, &[]);
        let p = Pos::new(0, 0);
        let err = PathSearch::new()
            .run(&mut g, p, p, |_: &Grid| {}, never)
            .unwrap_err();
        assert_eq!(err, SearchError::InvalidEnd(Some(p)));
        assert_eq!(g.state(p), Some(CellState::Free));
    }

    #[test]
    fn invalid_endpoints() {
        let mut g = grid_with(3, &[]);
        let mut ps = PathSearch::new();
        assert_eq!(
            ps.run(&mut g, Pos::new(3, 0), Pos::new(0, 0), |_: &Grid| {}, never),
            Err(SearchError::InvalidStart(Some(Pos::new(3, 0))))
        );
        assert_eq!(
            ps.run(&mut g, Pos::new(0, 0), Pos::new(0, -1), |_: &Grid| {}, never),
            Err(SearchError::InvalidEnd(Some(Pos::new(0, -1))))
        );

        let mut ep = Endpoints::new();
        assert_eq!(
            search(&mut g, &ep, |_: &Grid| {}, never),
            Err(SearchError::InvalidStart(None))
        );
        ep.place(&mut g, Pos::new(0, 0));
        assert_eq!(
            search(&mut g, &ep, |_: &Grid| {}, never),
            Err(SearchError::InvalidEnd(None))
        );
        assert_eq!(g.count(CellState::Open), 0);
    }

    #[test]
    fn ties_break_first_in_first_out() {
        let mut g = grid_with(3, &[]);
        let ep = Endpoints::with(Pos::new(0, 0), Pos::new(2, 2));
        ep.restore(&mut g);

        let mut calls = 0;
        let outcome = search(&mut g, &ep, |_: &Grid| calls += 1, never).unwrap();
        let route = outcome.route().unwrap();
        assert_eq!(
            route.path,
            vec![
                Pos::new(0, 0),
                Pos::new(1, 0),
                Pos::new(2, 0),
                Pos::new(2, 1),
                Pos::new(2, 2)
            ]
        );
        // 8 expansions plus 4 reconstruction steps.
        assert_eq!(calls, 12);

        assert_eq!(g.state(Pos::new(0, 0)), Some(CellState::Start));
        assert_eq!(g.state(Pos::new(2, 2)), Some(CellState::End));
        assert_eq!(g.count(CellState::Path), 3);
        assert_eq!(g.count(CellState::Closed), 4);
        assert_eq!(g.count(CellState::Open), 0);
    }

    #[test]
    fn pending_cells_keep_their_entry() {
        let mut g = grid_with(6, &[
            (1, 3),
            (1, 4),
            (1, 5),
            (3, 2),
            (3, 4),
            (4, 4),
            (5, 0),
            (5, 1),
        ]);
        let (s, e) = (Pos::new(5, 5), Pos::new(0, 5));
        let mut ps = PathSearch::new();
        let outcome = ps.run(&mut g, s, e, |_: &Grid| {}, never).unwrap();
        let route = outcome.route().unwrap();
        assert_eq!(route.cost, 11);
        assert_eq!(Some(route.cost), bfs(&g, s, e));
        assert_valid_route(&g, route, s, e);
        assert_eq!(ps.stats().improved, 1);
        assert_eq!(ps.stats().expanded, 17);
        assert_eq!(ps.stats().pushed, 22);
    }

    #[test]
    fn improved_pending_cell_is_not_pushed_again() {
        let mut g = grid_with(7, &[
            (1, 2),
            (1, 4),
            (1, 5),
            (2, 0),
            (3, 3),
            (3, 4),
            (4, 1),
            (4, 2),
            (4, 3),
            (5, 1),
            (5, 2),
            (5, 4),
            (6, 1),
            (6, 2),
            (6, 4),
        ]);
        let (s, e) = (Pos::new(0, 2), Pos::new(4, 4));
        let mut ps = PathSearch::new();
        let mut calls = 0;
        let outcome = ps.run(&mut g, s, e, |_: &Grid| calls += 1, never).unwrap();
        let route = outcome.route().unwrap();
        assert_eq!(route.cost, 8);
        assert_valid_route(&g, route, s, e);

        // One entry per discovered cell, the start included.
        let discovered = g.iter().filter(|c| ps.g_score(c.pos()) != UNREACHABLE).count();
        assert_eq!(ps.stats().pushed, discovered);
        assert_eq!(discovered, 24);
        assert_eq!(ps.stats().improved, 1);
        assert_eq!(ps.stats().expanded, 14);
        assert_eq!(calls, 14 + route.steps());

        assert_eq!(g.count(CellState::Open), 9);
        assert_eq!(g.count(CellState::Closed), 6);
        assert_eq!(g.count(CellState::Path), 7);
    }

    #[test]
    fn cost_tables_are_queryable_after_a_run() {
        let mut g = grid_with(5, &[]);
        let (s, e) = (Pos::new(0, 0), Pos::new(4, 4));
        let mut ps = PathSearch::new();
        let outcome = ps.run(&mut g, s, e, |_: &Grid| {}, never).unwrap();
        let route = outcome.route().unwrap();

        assert_eq!(ps.g_score(s), 0);
        assert_eq!(ps.f_score(s), 8);
        assert_eq!(ps.g_score(e), route.cost);
        assert_eq!(ps.predecessor(s), None);
        assert_eq!(ps.predecessor(e), Some(route.path[route.path.len() - 2]));
        assert_eq!(ps.g_score(Pos::new(9, 9)), UNREACHABLE);

        // A fresh run invalidates the previous tables.
        ps.run(&mut g, Pos::new(4, 4), Pos::new(4, 3), |_: &Grid| {}, never)
            .unwrap();
        assert_eq!(ps.g_score(s), UNREACHABLE);
        assert_eq!(ps.g_score(Pos::new(4, 4)), 0);
    }

    #[test]
    fn engine_reuse_across_grid_sizes() {
        let mut ps = PathSearch::new();
        let mut small = grid_with(3, &[]);
        let mut big = grid_with(8, &[]);
        let a = ps.run(&mut small, Pos::new(0, 0), Pos::new(2, 2), |_: &Grid| {}, never);
        let b = ps.run(&mut big, Pos::new(7, 0), Pos::new(0, 7), |_: &Grid| {}, never);
        let c = ps.run(&mut small, Pos::new(2, 0), Pos::new(0, 2), |_: &Grid| {}, never);
        assert_eq!(a.unwrap().route().unwrap().cost, 4);
        assert_eq!(b.unwrap().route().unwrap().cost, 14);
        assert_eq!(c.unwrap().route().unwrap().cost, 4);
    }

    // -----------------------------------------------------------------------
    // Cancellation
    // -----------------------------------------------------------------------

    #[test]
    fn cancel_before_first_pop() {
        let mut g = grid_with(5, &[]);
        let tok = CancelToken::new();
        tok.cancel();
        let outcome = PathSearch::new()
            .run(&mut g, Pos::new(0, 0), Pos::new(4, 4), |_: &Grid| {}, || {
                tok.is_cancelled()
            })
            .unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(g.count(CellState::Free), 25);
    }

    #[test]
    fn cancel_mid_run_leaves_markings() {
        let mut g = grid_with(10, &[]);
        let ep = Endpoints::with(Pos::new(0, 0), Pos::new(9, 9));
        ep.restore(&mut g);

        let tok = CancelToken::new();
        let mut polls = 0;
        let mut observed = 0;
        let outcome = search(
            &mut g,
            &ep,
            |_: &Grid| {
                observed += 1;
                if observed == 3 {
                    tok.cancel();
                }
            },
            || {
                polls += 1;
                tok.is_cancelled()
            },
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(observed, 3);
        assert_eq!(polls, 4);
        assert!(g.count(CellState::Open) > 0);
        assert_eq!(g.count(CellState::Closed), 2);
        assert_eq!(g.count(CellState::Path), 0);
        assert_eq!(g.state(Pos::new(0, 0)), Some(CellState::Start));
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    #[test]
    fn barrier_free_cost_is_manhattan() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let (mut g, s, e) = random_grid(&mut rng, 9, 0.0);
            let outcome = solve(&mut g, s, e);
            let route = outcome.route().unwrap();
            assert_eq!(route.cost, manhattan(s, e));
            assert_valid_route(&g, route, s, e);
        }
    }

    #[test]
    fn matches_bfs_oracle() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..300 {
            let rows = rng.random_range(2..9);
            let (mut g, s, e) = random_grid(&mut rng, rows, 0.3);
            let expected = bfs(&g, s, e);
            let mut ps = PathSearch::new();
            match ps.run(&mut g, s, e, |_: &Grid| {}, never).unwrap() {
                Outcome::Found(route) => {
                    assert_eq!(Some(route.cost), expected);
                    assert_eq!(ps.g_score(e), route.cost);
                    assert_valid_route(&g, &route, s, e);
                }
                Outcome::Exhausted => assert_eq!(expected, None),
                Outcome::Cancelled => unreachable!(),
            }
        }
    }

    #[test]
    fn inconsistent_heuristic_finds_a_valid_route() {
        // Admissible but not consistent: some cells pretend to be closer.
        // Pending cells are not re-queued, so the route may be longer than
        // the shortest one but never shorter, and never missed.
        let h = |a: Pos, b: Pos| {
            if (a.row * 7 + a.col * 3) % 4 == 0 {
                0
            } else {
                manhattan(a, b)
            }
        };
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let (mut g, s, e) = random_grid(&mut rng, 7, 0.25);
            let expected = bfs(&g, s, e);
            let outcome = PathSearch::with_heuristic(h)
                .run(&mut g, s, e, |_: &Grid| {}, never)
                .unwrap();
            match (outcome.route(), expected) {
                (Some(route), Some(best)) => {
                    assert!(route.cost >= best);
                    assert_valid_route(&g, route, s, e);
                }
                (None, None) => {}
                (got, want) => panic!("got {got:?}, want {want:?}"),
            }
        }
    }

    #[test]
    fn zero_heuristic_agrees_with_manhattan() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let (g, s, e) = random_grid(&mut rng, 8, 0.3);
            let a = solve(&mut g.clone(), s, e);
            let b = PathSearch::with_heuristic(|_: Pos, _: Pos| 0)
                .run(&mut g.clone(), s, e, |_: &Grid| {}, never)
                .unwrap();
            assert_eq!(a.route().map(|r| r.cost), b.route().map(|r| r.cost));
        }
    }

    #[test]
    fn adding_a_barrier_never_shortens() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let (mut g, s, e) = random_grid(&mut rng, 8, 0.2);
            let before = solve(&mut g, s, e).route().map(|r| r.cost);
            g.clear_search();

            let extra = Pos::new(rng.random_range(0..8), rng.random_range(0..8));
            if extra != s && extra != e {
                g.set_state(extra, CellState::Barrier);
            }
            g.compute_neighbors();
            let after = solve(&mut g, s, e).route().map(|r| r.cost);

            match (before, after) {
                (Some(b), Some(a)) => assert!(a >= b),
                (None, Some(_)) => panic!("a barrier opened a route"),
                _ => {}
            }
        }
    }

    #[test]
    fn neighbor_caches_must_be_recomputed() {
        let mut g = grid_with(3, &[(0, 1), (1, 1)]);
        let (s, e) = (Pos::new(0, 0), Pos::new(0, 2));
        assert_eq!(solve(&mut g, s, e).route().unwrap().cost, 6);
        g.clear_search();

        // Close the last gap without recomputing: the old adjacency is used.
        g.set_state(Pos::new(2, 1), CellState::Barrier);
        assert!(solve(&mut g, s, e).is_found());
        g.clear_search();
        g.set_state(Pos::new(2, 1), CellState::Barrier);

        g.compute_neighbors();
        assert_eq!(solve(&mut g, s, e), Outcome::Exhausted);
        g.clear_search();

        // Reopen the top gap.
        g.set_state(Pos::new(0, 1), CellState::Free);
        g.compute_neighbors();
        assert_eq!(solve(&mut g, s, e).route().unwrap().cost, 2);
    }

    #[test]
    fn repeated_search_is_identical() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..30 {
            let (mut g, s, e) = random_grid(&mut rng, 10, 0.3);
            let ep = Endpoints::with(s, e);
            ep.restore(&mut g);

            let first = search(&mut g, &ep, |_: &Grid| {}, never).unwrap();
            let marked: Vec<_> = g.iter().map(|c| c.state()).collect();

            g.clear_search();
            ep.restore(&mut g);
            let second = search(&mut g, &ep, |_: &Grid| {}, never).unwrap();

            assert_eq!(first, second);
            assert!(g.iter().map(|c| c.state()).eq(marked));
        }
    }

    #[test]
    fn observer_sees_every_step() {
        let mut g = grid_with(6, &[(2, 0), (2, 1), (2, 2), (2, 3)]);
        let (s, e) = (Pos::new(0, 0), Pos::new(5, 0));
        let mut ps = PathSearch::new();
        let mut calls = 0;
        let mut path_marks = Vec::new();
        let outcome = ps
            .run(
                &mut g,
                s,
                e,
                |g: &Grid| {
                    calls += 1;
                    path_marks.push(g.count(CellState::Path));
                },
                never,
            )
            .unwrap();
        let route = outcome.route().unwrap();
        assert_eq!(calls, ps.stats().expanded + route.steps());

        // During reconstruction the Path count grows by one per step, except
        // for the final step onto the start.
        let tail = &path_marks[path_marks.len() - route.steps()..];
        let inner = route.path.len() - 2;
        assert_eq!(tail.last(), Some(&inner));
        assert!(tail.windows(2).all(|w| w[1] >= w[0]));
    }
}
