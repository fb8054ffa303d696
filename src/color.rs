use std::num::NonZero;

use unordered_pair::UnorderedPair;

use crate::location::Location;

/// A color identifier as stored in grid cells.
///
/// `0` ([`EMPTY`]) marks an unassigned cell; real colors are numbered from 1 in the order
/// their termini were added. A single byte per cell keeps full-grid snapshots compact,
/// which matters because snapshots double as visited-state keys during search.
pub(crate) type ColorId = u8;

/// The cell value of an unassigned cell.
pub(crate) const EMPTY: ColorId = 0;

/// One color and the two cells its flow must join.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct ColorSource {
    pub(crate) color: NonZero<ColorId>,
    pub(crate) endpoints: UnorderedPair<Location>,
}
