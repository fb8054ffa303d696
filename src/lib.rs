#![warn(missing_docs)]

//! # `fuchsine`
//!
//! A solver for [Numberlink](https://en.wikipedia.org/wiki/Numberlink) puzzles as posited in the mobile game Flow Free.
//! Begin by building a board object with a [`BoardBuilder`], or parse the common textual form (one row per line,
//! `.` or `_` for open cells) via [`FromStr`](std::str::FromStr).
//! Then call [`solve()`](Board::solve), consuming the board and yielding a solved version of the board.
//!
//! # Internals
//! This crate searches over cell colorings directly with a pruned recursive backtracker, rather than reducing
//! the board to Boolean satisfiability or exact cover.
//! The rules become local degree constraints: a cell where a flow ends touches its own color exactly once, and
//! every other colored cell touches its own color exactly twice.
//!
//! The engine keeps the starting layout and a working grid. Before branching it closes out every forced
//! extension, since a flow head with a single open neighbor has only one way forward. Each search step then
//! branches on the unassigned cell with the fewest live candidate colors, trying locally frequent colors first.
//! A candidate assignment survives only if the whole grid still passes the degree rules and every color's
//! endpoints remain joinable through open territory, checked by breadth-first reachability; colors whose flows
//! are finished are retired from candidate lists outright. A visited-state memo, keyed on full-grid snapshots,
//! prunes configurations re-reached in a different assignment order.
//!
//! For comparison, the same driver can run unpruned with seeded random ordering ([`SearchStrategy::Naive`]),
//! which is dramatically slower on anything beyond toy boards.

pub use board::Board;
pub use builder::{BoardBuilder, BuilderInvalidReason};
pub use location::Location;
pub use solver::{SearchReport, SearchStrategy, SolverConfig, SolverFailure};

pub(crate) mod board;
mod tests;
pub(crate) mod builder;
pub(crate) mod color;
pub(crate) mod grid;
pub(crate) mod heuristic;
pub(crate) mod location;
pub(crate) mod logic;
pub(crate) mod propagate;
pub(crate) mod reach;
pub(crate) mod solver;
