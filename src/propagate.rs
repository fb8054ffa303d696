use std::collections::VecDeque;

use crate::color::ColorSource;
use crate::grid::Grid;
use crate::location::Location;

/// Extend every flow whose head has exactly one way forward, repeating until nothing moves.
///
/// Each extension is the only way any solution can serve that head, so running this before
/// the search never discards a solution. The worklist keeps the closure iterative; a long
/// corridor forces one cell per pass instead of one recursion per cell.
pub(crate) fn forced_closure(state: &mut Grid, sources: &[ColorSource]) {
    let mut worklist = VecDeque::new();

    for source in sources {
        for endpoint in [source.endpoints.0, source.endpoints.1] {
            extend_single(state, endpoint, &mut worklist);
        }
    }

    while let Some(head) = worklist.pop_front() {
        extend_single(state, head, &mut worklist);
    }
}

/// If `from` has exactly one unassigned neighbor and its own color is not already doubled
/// up around it, claim that neighbor and queue it for the same check.
fn extend_single(state: &mut Grid, from: Location, worklist: &mut VecDeque<Location>) {
    let color = state.get(from);
    let (open, taken) = state.split_neighbors(from);

    if let [sole] = open.as_slice() {
        if taken.iter().filter(|&&c| c == color).count() > 1 {
            return;
        }

        state.set(*sole, color);
        worklist.push_back(*sole);
    }
}
