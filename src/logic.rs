use itertools::Itertools;

use crate::color::{ColorSource, EMPTY};
use crate::grid::Grid;
use crate::reach;

/// Verdict of the completeness check on a working grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Completion {
    /// Some cell is still unassigned.
    Incomplete,
    /// Every cell is assigned but some degree rule is broken; no further assignment can
    /// repair this, so the search must back out.
    DeadEnd,
    /// Every cell is assigned and every degree rule holds.
    Solved,
}

/// Classify `state` as solved, a dead end, or still in progress.
///
/// In a solved grid every path cell touches exactly two neighbors of its own color and
/// every terminus touches exactly one.
pub(crate) fn completion(state: &Grid, start: &Grid) -> Completion {
    if !state.is_fully_assigned() {
        return Completion::Incomplete;
    }

    for (location, color) in state.iter() {
        let same = state.neighbor_colors(location).into_iter().filter(|&c| c == color).count();
        let expected = match start.get(location) {
            EMPTY => 2,
            _ => 1,
        };

        if same != expected {
            return Completion::DeadEnd;
        }
    }

    Completion::Solved
}

/// Check every cell of `state` against the local degree rules, then, if `forward_check` is
/// set, confirm each color's endpoints can still be joined (see [`reach::can_connect`]).
///
/// The local rules per cell:
/// - an assigned cell with no open neighbor must touch its own color at least once;
/// - an assigned path cell may touch its own color at most twice, a terminus at most once;
/// - an unassigned cell with no open neighbor fails when its neighbors are pairwise
///   distinct (no color has two ways in) or when any color appears among them more than
///   twice.
pub(crate) fn is_consistent(state: &Grid, start: &Grid, sources: &[ColorSource], forward_check: bool) -> bool {
    for (location, color) in state.iter() {
        let (open, taken) = state.split_neighbors(location);

        if color != EMPTY {
            let same = taken.iter().filter(|&&c| c == color).count();
            if open.is_empty() && same == 0 {
                return false;
            }

            // a terminus anchors one connection, a path cell passes through on two
            let limit = match start.get(location) {
                EMPTY => 2,
                _ => 1,
            };
            if same > limit {
                return false;
            }
        } else if open.is_empty() {
            let counts = taken.iter().copied().counts();
            if counts.len() == taken.len() {
                return false;
            }
            if counts.values().any(|&count| count > 2) {
                return false;
            }
        }
    }

    !forward_check || sources.iter().all(|source| reach::can_connect(state, source))
}
