//! Pairwise interaction test between structures
//!
//! Two structures interact when their footprints share a cell or when the
//! range of either one reaches the footprint of the other. Boundaries are
//! closed: a range cell landing exactly on a footprint cell counts.
//!
//! The predicate is symmetric and has no kind-specific exemptions. A
//! structure always interacts with itself; callers exclude self-pairs.

use crate::structure::Structure;

/// Whether `a` and `b` overlap or are within each other's zone of effect
pub fn interacts(a: &Structure, b: &Structure) -> bool {
    let (a_foot, b_foot) = (a.footprint(), b.footprint());
    if a_foot.intersects(&b_foot) {
        return true;
    }

    let (a_range, b_range) = (a.range(), b.range());
    if !a_range.bounds().intersects(&b_range.bounds()) {
        return false;
    }

    a_range.intersects(&b_foot) || b_range.intersects(&a_foot)
}

/// Whether the footprints of `a` and `b` share any cell
pub fn overlaps(a: &Structure, b: &Structure) -> bool {
    a.footprint().intersects(&b.footprint())
}
