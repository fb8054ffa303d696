use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::Board;
use crate::color::{ColorId, EMPTY};
use crate::grid::Grid;
use crate::heuristic;
use crate::logic;
use crate::logic::Completion;
use crate::propagate;
use crate::reach;

/// How a [`GridSolver`] explores the space of partial colorings.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SearchStrategy {
    /// Forced-move propagation before the search, connectivity forward-checking on every
    /// assignment, retirement of finished colors, and most-constrained-first ordering.
    Propagating,
    /// No propagation, no forward-checking, and randomized variable and value ordering.
    /// Much weaker; kept as a baseline to measure the pruned search against.
    Naive {
        /// Seed for the generator behind all random choices, so runs are reproducible.
        seed: u64,
    },
}

/// Configuration accepted by [`Board::solve_with`](crate::Board::solve_with).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SolverConfig {
    /// The search variant to run.
    pub strategy: SearchStrategy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { strategy: SearchStrategy::Propagating }
    }
}

/// Read-only measurements from one solver run, for benchmarking and diagnostics.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchReport {
    /// Recursive expansions performed. A board settled at the root, whether solved or
    /// refuted, reports zero.
    pub steps: u64,
    /// Wall time spent inside the solver, forced-move propagation included.
    pub elapsed: Duration,
}

/// Reasons a [`GridSolver`] may fail.
#[derive(Debug)]
pub enum SolverFailure {
    /// The search exhausted every candidate assignment without completing the board.
    Unsatisfiable,
}

enum Selector {
    MostConstrained,
    Random(SmallRng),
}

/// Depth-first search over cell colorings of one board.
///
/// Use [`Self::solve`] to attempt to find a solution.
///
/// The working grid starts as a copy of the board's starting layout. Each recursion level
/// first classifies the grid: solved grids are accepted, fully-assigned-but-broken grids
/// are rejected without further branching. Otherwise one unassigned cell is chosen and its
/// candidate colors are tried in order; every trial assignment must pass the local degree
/// rules (plus, for the propagating strategy, the connectivity forward-check) before the
/// search descends, and is undone when the descent fails.
///
/// A snapshot of the whole grid is recorded for every trial assignment. Re-reaching a
/// recorded configuration through a different assignment order skips it: a configuration
/// that could not be extended to a solution the first time cannot be the second time
/// either, so the memo only ever removes repeated work.
pub(crate) struct GridSolver<'a> {
    board: &'a Board,
    palette: Vec<ColorId>,
    selector: Selector,
    forward_check: bool,
    propagate: bool,
    visited: HashSet<Vec<u8>>,
    steps: u64,
    elapsed: Duration,
}

impl<'a> GridSolver<'a> {
    pub(crate) fn new(board: &'a Board, config: SolverConfig) -> Self {
        let (selector, forward_check, propagate) = match config.strategy {
            SearchStrategy::Propagating => (Selector::MostConstrained, true, true),
            SearchStrategy::Naive { seed } => (Selector::Random(SmallRng::seed_from_u64(seed)), false, false),
        };

        Self {
            board,
            palette: board.sources.iter().map(|source| source.color.get()).collect(),
            selector,
            forward_check,
            propagate,
            visited: HashSet::new(),
            steps: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Run the search and return the completed grid, or [`SolverFailure::Unsatisfiable`]
    /// if no coloring works.
    pub(crate) fn solve(&mut self) -> Result<Grid, SolverFailure> {
        let timer = Instant::now();
        let mut state = self.board.start.clone();

        if self.propagate {
            propagate::forced_closure(&mut state, &self.board.sources);
        }

        let solved = self.backtrack(&mut state);
        self.elapsed = timer.elapsed();

        match solved {
            true => Ok(state),
            false => Err(SolverFailure::Unsatisfiable),
        }
    }

    pub(crate) fn report(&self) -> SearchReport {
        SearchReport { steps: self.steps, elapsed: self.elapsed }
    }

    fn backtrack(&mut self, state: &mut Grid) -> bool {
        match logic::completion(state, &self.board.start) {
            Completion::Solved => return true,
            Completion::DeadEnd => return false,
            Completion::Incomplete => {}
        }

        let candidate = match &mut self.selector {
            Selector::MostConstrained => {
                let done = reach::completed_colors(state, &self.board.sources);
                heuristic::select_most_constrained(state, &self.palette, &done)
            }
            Selector::Random(rng) => heuristic::select_random(state, &self.palette, rng),
        };
        let candidate = match candidate {
            Some(candidate) => candidate,
            None => return false,
        };

        debug_assert_eq!(self.board.start.get(candidate.location), EMPTY);

        for color in candidate.colors {
            state.set(candidate.location, color);

            if self.visited.insert(state.snapshot())
                && logic::is_consistent(state, &self.board.start, &self.board.sources, self.forward_check)
            {
                self.steps += 1;
                if self.backtrack(state) {
                    // the winning assignment stays in place
                    return true;
                }
            }

            state.set(candidate.location, EMPTY);
        }

        false
    }
}
