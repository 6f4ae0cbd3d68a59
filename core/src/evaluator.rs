//! Crossing detection for one boundary.

use tidemark_types::Dimensions;

use crate::registry::BoundaryEntry;

/// Whether the side recorded on `entry` is stale for `dims`.
///
/// An entry recorded beyond the boundary has crossed once the dimension drops
/// below the threshold; an entry recorded under it has crossed once the
/// dimension is no longer below. Seeding uses `>` while this uses `<`, so a
/// dimension exactly on the threshold seeds as "under" but evaluates as
/// "beyond".
#[must_use]
pub fn has_crossed(entry: &BoundaryEntry, dims: Dimensions) -> bool {
    let current = dims.along(entry.axis());
    entry.past_boundary() == (current < entry.boundary())
}
