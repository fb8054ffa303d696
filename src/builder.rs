use std::num::NonZero;

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::color::{ColorId, ColorSource};
use crate::grid::Grid;
use crate::location::{Dimension, Location};

/// Characters accepted as "no color here" in the textual puzzle form.
pub(crate) const EMPTY_MARKERS: [char; 2] = ['_', '.'];

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A terminus was placed outside the bounds specified by `dims` on a builder.
    FeatureOutOfBounds,
    /// The rows of a textual puzzle do not all have the same length.
    NonRectangular,
    /// A color symbol in a textual puzzle appears other than exactly twice.
    TerminusCount,
    /// A terminus was placed on a cell that already holds one.
    TerminusOverlap,
    /// A display character repeats an earlier color or collides with an empty-cell marker.
    DisplayCollision,
    /// More colors were added than distinct cell values exist to tell them apart.
    PaletteOverflow,
}

/// A builder for the rectangular boards found in Numberlink puzzles and Flow Free.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at
/// some point.
#[derive(Clone)]
pub struct BoardBuilder {
    // width, height
    dims: (Dimension, Dimension),
    termini: Vec<(char, UnorderedPair<Location>)>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
    }
}

impl BoardBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            termini: Vec::new(),
            invalid_reasons: Vec::new(),
        }
    }

    /// Read a puzzle from its textual form: one row per line, `_` or `.` marking an open
    /// cell, any other character appearing at the two endpoints of its color.
    ///
    /// Colors are numbered in order of first appearance, scanning row by row. Ragged rows,
    /// empty input, or a symbol appearing other than exactly twice leave the builder in an
    /// invalid state with the corresponding [`BuilderInvalidReason`].
    pub fn from_text(text: &str) -> Self {
        let rows = text.lines().collect_vec();
        let dims = (
            NonZero::new(rows.first().map_or(0, |row| row.chars().count())),
            NonZero::new(rows.len()),
        );

        let (width, height) = match dims {
            (Some(width), Some(height)) => (width, height),
            _ => {
                let mut builder = Self::default();
                builder.invalid_reasons.push(BuilderInvalidReason::NonRectangular);
                return builder;
            }
        };

        let mut builder = Self::with_dims((width, height));
        let mut pairs: Vec<(char, Vec<Location>)> = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width.get() {
                builder.invalid_reasons.push(BuilderInvalidReason::NonRectangular);
                return builder;
            }

            for (x, symbol) in row.chars().enumerate() {
                if EMPTY_MARKERS.contains(&symbol) {
                    continue;
                }

                match pairs.iter_mut().find(|(display, _)| *display == symbol) {
                    Some((_, locations)) => locations.push(Location(x, y)),
                    None => pairs.push((symbol, vec![Location(x, y)])),
                }
            }
        }

        for (display, locations) in pairs {
            if !builder.invalid_reasons.is_empty() {
                break;
            }

            match locations.as_slice() {
                [a, b] => {
                    builder.add_termini(display, (*a, *b));
                }
                _ => builder.invalid_reasons.push(BuilderInvalidReason::TerminusCount),
            }
        }

        builder
    }

    /// Add termini or "flow endpoints". The order in which `locations` are specified does not matter.
    ///
    /// May invalidate the builder: [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds)
    /// if either location is out of bounds, [`TerminusOverlap`](BuilderInvalidReason::TerminusOverlap)
    /// if either location already holds a terminus, [`DisplayCollision`](BuilderInvalidReason::DisplayCollision)
    /// if `display` repeats an earlier color up to ASCII case or is an empty-cell marker,
    /// [`PaletteOverflow`](BuilderInvalidReason::PaletteOverflow) if no color id is left.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_termini(&mut self, display: char, locations: (Location, Location)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for location in [locations.0, locations.1] {
            if location.0 >= self.dims.0.get() || location.1 >= self.dims.1.get() {
                self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
                return self;
            }
        }

        if locations.0 == locations.1
            || self.termini.iter().any(|(_, pair)| {
                [pair.0, pair.1].contains(&locations.0) || [pair.0, pair.1].contains(&locations.1)
            })
        {
            self.invalid_reasons.push(BuilderInvalidReason::TerminusOverlap);
            return self;
        }

        // case-insensitive: termini render uppercase and path cells lowercase
        if EMPTY_MARKERS.contains(&display)
            || self.termini.iter().any(|(existing, _)| existing.eq_ignore_ascii_case(&display))
        {
            self.invalid_reasons.push(BuilderInvalidReason::DisplayCollision);
            return self;
        }

        if self.termini.len() >= usize::from(ColorId::MAX) {
            self.invalid_reasons.push(BuilderInvalidReason::PaletteOverflow);
            return self;
        }

        self.termini.push((display, UnorderedPair::from(locations)));
        self
    }

    /// Remove the most recently added pair of termini.
    ///
    /// If the builder is in an invalid state or no termini are present, this function does nothing.
    pub fn pop_termini(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.termini.pop();
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let mut start = Grid::empty(self.dims);
        let mut sources = Vec::with_capacity(self.termini.len());
        let mut displays = Vec::with_capacity(self.termini.len() + 1);
        // color 0 is the unassigned value and displays as the empty marker
        displays.push('.');

        for (index, (display, endpoints)) in self.termini.iter().enumerate() {
            // real color ids start at 1
            let color = NonZero::new((index + 1) as ColorId).unwrap();

            displays.push(*display);
            start.set(endpoints.0, color.get());
            start.set(endpoints.1, color.get());
            sources.push(ColorSource { color, endpoints: *endpoints });
        }

        Ok(Board {
            dims: self.dims,
            state: start.clone(),
            start,
            sources,
            displays,
        })
    }
}
