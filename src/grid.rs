use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;

use crate::color::{ColorId, EMPTY};
use crate::location::{Dimension, Location};

/// The four steps available from a cell of a rectangular board.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub(crate) enum Step {
    Up,
    Down,
    Left,
    Right,
}

impl Step {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// Steps off the top or left edge wrap around [`usize`], so the result fails a later bounds check.
    pub(crate) fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }
}

/// A rectangular field of cell colors, row-major.
///
/// Boards carry two of these: the immutable starting layout, where only termini are colored,
/// and the working state the solver fills in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    cells: Array2<ColorId>,
}

impl Grid {
    pub(crate) fn empty(dims: (Dimension, Dimension)) -> Self {
        Self { cells: Array2::from_elem((dims.1.get(), dims.0.get()), EMPTY) }
    }

    pub(crate) fn get(&self, location: Location) -> ColorId {
        self.cells[location.as_index()]
    }

    pub(crate) fn try_get(&self, location: Location) -> Option<ColorId> {
        self.cells.get(location.as_index()).copied()
    }

    pub(crate) fn set(&mut self, location: Location, color: ColorId) {
        self.cells[location.as_index()] = color;
    }

    pub(crate) fn contains(&self, location: Location) -> bool {
        self.cells.get(location.as_index()).is_some()
    }

    /// Colors of every in-bounds neighbor of `location`, assigned or not.
    pub(crate) fn neighbor_colors(&self, location: Location) -> Vec<ColorId> {
        Step::VARIANTS.iter()
            .filter_map(|step| self.try_get(step.attempt_from(location)))
            .collect_vec()
    }

    /// In-bounds neighbors of `location`, split into unassigned locations and assigned colors.
    ///
    /// The assigned side keeps one entry per neighbor, not per distinct color, so callers
    /// can count path degree.
    pub(crate) fn split_neighbors(&self, location: Location) -> (Vec<Location>, Vec<ColorId>) {
        let mut open = Vec::with_capacity(Step::VARIANTS.len());
        let mut taken = Vec::with_capacity(Step::VARIANTS.len());

        for step in Step::VARIANTS {
            let neighbor = step.attempt_from(location);
            match self.try_get(neighbor) {
                Some(EMPTY) => open.push(neighbor),
                Some(color) => taken.push(color),
                None => {}
            }
        }

        (open, taken)
    }

    /// All in-bounds neighbor locations of `location`, regardless of contents.
    pub(crate) fn neighbor_locations(&self, location: Location) -> Vec<Location> {
        Step::VARIANTS.iter()
            .map(|step| step.attempt_from(location))
            .filter(|neighbor| self.contains(*neighbor))
            .collect_vec()
    }

    /// Visit every cell in row-major order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (Location, ColorId)> + '_ {
        self.cells.indexed_iter().map(|(index, &color)| (Location::from(index), color))
    }

    /// Locations of unassigned cells, in row-major order.
    pub(crate) fn unassigned(&self) -> impl Iterator<Item = Location> + '_ {
        self.iter().filter(|&(_, color)| color == EMPTY).map(|(location, _)| location)
    }

    pub(crate) fn is_fully_assigned(&self) -> bool {
        self.cells.iter().all(|&color| color != EMPTY)
    }

    /// Stable row-major byte encoding of the whole grid.
    ///
    /// Distinct grids encode to distinct byte strings, which the search relies on when it
    /// uses snapshots as visited-state keys.
    pub(crate) fn snapshot(&self) -> Vec<u8> {
        self.cells.iter().copied().collect_vec()
    }
}
