use itertools::Itertools;
use rand::Rng;

use crate::color::ColorId;
use crate::grid::Grid;
use crate::location::Location;

/// One cell to branch on next, with its candidate colors in trial order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Candidate {
    pub(crate) location: Location,
    pub(crate) colors: Vec<ColorId>,
}

/// Pick the unassigned cell with the fewest live candidate colors.
///
/// Cells with no assigned neighbor carry no information yet and are passed over. A cell's
/// candidates open with the colors already around it, most frequent first (higher color id
/// breaking ties), followed by the rest of the palette when the cell still has an open
/// side; colors listed in `done` have finished their flow and are dropped. Ties on list
/// length go to the earliest cell in row-major order.
///
/// Returns [`None`] when no cell qualifies, which the search treats as a dead end.
pub(crate) fn select_most_constrained(state: &Grid, palette: &[ColorId], done: &[ColorId]) -> Option<Candidate> {
    let mut eligible = Vec::new();

    for location in state.unassigned() {
        let (open, taken) = state.split_neighbors(location);
        if taken.is_empty() {
            continue;
        }

        let mut colors = taken.iter().copied().counts().into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)))
            .map(|(color, _)| color)
            .collect_vec();

        if !open.is_empty() {
            for &value in palette {
                if !colors.contains(&value) {
                    colors.push(value);
                }
            }
        }

        colors.retain(|color| !done.contains(color));
        eligible.push(Candidate { location, colors });
    }

    // stable, so the first cell in row-major order wins ties
    eligible.sort_by_key(|candidate| candidate.colors.len());
    eligible.into_iter().next()
}

/// Pick uniformly among unassigned cells that have at least one assigned neighbor.
///
/// Candidates are the cell's assigned neighbor colors in ascending order, with the rest of
/// the palette spliced in at random positions when the cell still has an open side. No
/// frequency ordering, no retirement of finished colors: this is the unpruned baseline the
/// propagating search is measured against.
pub(crate) fn select_random<R: Rng>(state: &Grid, palette: &[ColorId], rng: &mut R) -> Option<Candidate> {
    let mut eligible = Vec::new();

    for location in state.unassigned() {
        let (open, taken) = state.split_neighbors(location);
        if taken.is_empty() {
            continue;
        }

        let mut colors = taken.iter().copied().unique().sorted().collect_vec();
        if !open.is_empty() {
            for &value in palette {
                if !colors.contains(&value) {
                    colors.insert(rng.gen_range(0..colors.len()), value);
                }
            }
        }

        eligible.push(Candidate { location, colors });
    }

    if eligible.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..eligible.len());
    Some(eligible.swap_remove(index))
}
