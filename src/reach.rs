use std::collections::{HashSet, VecDeque};

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::color::{ColorId, ColorSource, EMPTY};
use crate::grid::Grid;

/// Whether `source`'s endpoints can still be joined through `state`.
///
/// Breadth-first from one endpoint toward the other. Unassigned neighbors are always fair
/// game; neighbors already carrying the color are entered only from a frontier cell that
/// touches that color among its assigned neighbors, so committed stretches of the flow are
/// traversed rather than hopped onto from open territory. The goal itself is an assigned
/// cell of the color, so reaching any cell next to it ends the search.
///
/// This over-approximates reachability, which is the safe direction for pruning: a `true`
/// may still die later in the search, but a `false` is final.
pub(crate) fn can_connect(state: &Grid, source: &ColorSource) -> bool {
    let UnorderedPair(start, goal) = source.endpoints;
    let color = source.color.get();

    let mut frontier = VecDeque::from([start]);
    let mut seen = HashSet::from([start]);

    while let Some(cell) = frontier.pop_front() {
        if cell == goal {
            return true;
        }

        let (_, taken) = state.split_neighbors(cell);
        let touches = taken.contains(&color);

        for neighbor in state.neighbor_locations(cell) {
            if seen.contains(&neighbor) {
                continue;
            }

            let value = state.get(neighbor);
            if (touches && value == color) || value == EMPTY {
                seen.insert(neighbor);
                frontier.push_back(neighbor);
            }
        }
    }

    false
}

/// Whether `source`'s endpoints are already joined by a contiguous run of its own color.
///
/// Once this holds for a color it keeps holding as the rest of the grid fills in, since
/// nothing on the connecting run is ever reassigned without backtracking through it.
pub(crate) fn is_connected(state: &Grid, source: &ColorSource) -> bool {
    let UnorderedPair(start, goal) = source.endpoints;
    let color = source.color.get();

    let mut frontier = VecDeque::from([start]);
    let mut seen = HashSet::from([start]);

    while let Some(cell) = frontier.pop_front() {
        if cell == goal {
            return true;
        }

        for neighbor in state.neighbor_locations(cell) {
            if state.get(neighbor) == color && seen.insert(neighbor) {
                frontier.push_back(neighbor);
            }
        }
    }

    false
}

/// Colors whose flows are finished. The heuristic stops offering these.
pub(crate) fn completed_colors(state: &Grid, sources: &[ColorSource]) -> Vec<ColorId> {
    sources.iter()
        .filter(|source| is_connected(state, source))
        .map(|source| source.color.get())
        .collect_vec()
}
