use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::builder::{BoardBuilder, BuilderInvalidReason};
use crate::color::{ColorSource, EMPTY};
use crate::grid::Grid;
use crate::location::{Dimension, Location};
use crate::logic;
use crate::logic::Completion;
use crate::solver::{GridSolver, SearchReport, SolverConfig, SolverFailure};

/// A rectangular flow board.
///
/// Build one with [`BoardBuilder`] or parse the usual one-row-per-line text form via
/// [`FromStr`], then call [`solve()`](Self::solve) to replace its open cells with
/// completed flows.
#[derive(Debug)]
pub struct Board {
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) start: Grid,
    pub(crate) state: Grid,
    pub(crate) sources: Vec<ColorSource>,
    pub(crate) displays: Vec<char>,
}

impl Board {
    /// Solve this board with the default configuration, deferring to a [`GridSolver`] and
    /// mutating and returning `self` accordingly.
    pub fn solve(self) -> Result<Self, SolverFailure> {
        self.solve_with(SolverConfig::default()).0
    }

    /// Solve this board as configured by `config`, also reporting search metrics.
    ///
    /// The report is meaningful whether or not a solution exists, so it rides alongside
    /// the result instead of inside it.
    pub fn solve_with(mut self, config: SolverConfig) -> (Result<Self, SolverFailure>, SearchReport) {
        let mut solver = GridSolver::new(&self, config);
        let outcome = solver.solve();
        let report = solver.report();

        match outcome {
            Ok(solution) => {
                self.state = solution;
                (Ok(self), report)
            }
            Err(failure) => (Err(failure), report),
        }
    }

    /// Whether every flow is complete and every cell is covered.
    pub fn is_solved(&self) -> bool {
        logic::completion(&self.state, &self.start) == Completion::Solved
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.dims.1.get() * (self.dims.0.get() + 1));

        for y in 0..self.dims.1.get() {
            for x in 0..self.dims.0.get() {
                let location = Location(x, y);

                out.push(match self.state.get(location) {
                    EMPTY => '.',
                    color => {
                        let display = self.displays[usize::from(color)];
                        match self.start.get(location) {
                            EMPTY => display.to_ascii_lowercase(),
                            _ => display.to_ascii_uppercase(),
                        }
                    }
                });
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}

impl FromStr for Board {
    type Err = Vec<BuilderInvalidReason>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let builder = BoardBuilder::from_text(s);
        builder.build().map_err(|reasons| reasons.to_vec())
    }
}
