//! Multi-index splices over ordered sequences.
//!
//! Each operation takes an [`IndexSet`] of target positions. Because the set
//! is ordered, the outcome never depends on the order the caller listed the
//! positions in.
//!
//! - [`remove_at`] positions refer to the sequence *before* removal.
//! - [`insert_at`] positions are the slots the new elements occupy *after*
//!   insertion, paired in ascending order with the elements.
//! - [`replace_at`] positions are paired in ascending order with the
//!   replacement elements; the length does not change.
//!
//! Every mutating operation has a `check_*` twin that validates the same
//! precondition without touching the sequence.

use crate::error::SpliceError;
use crate::index::IndexSet;
use crate::logging::targets;

/// Validates a removal of `positions` from a sequence of length `len`.
pub fn check_remove(len: usize, positions: &IndexSet) -> Result<(), SpliceError> {
    match positions.last() {
        Some(position) if position >= len => Err(SpliceError::OutOfBounds { position, len }),
        _ => Ok(()),
    }
}

/// Validates an insertion of `count` elements at `positions` into a sequence
/// of length `len`.
///
/// The k-th position (ascending, zero-based) may be at most `len + k`: every
/// element can land at the end of the sequence as it stands after the
/// previous insertions.
pub fn check_insert(len: usize, count: usize, positions: &IndexSet) -> Result<(), SpliceError> {
    if positions.len() != count {
        return Err(SpliceError::CountMismatch {
            positions: positions.len(),
            elements: count,
        });
    }
    for (rank, position) in positions.iter().enumerate() {
        if position > len + rank {
            return Err(SpliceError::OutOfBounds {
                position,
                len: len + rank,
            });
        }
    }
    Ok(())
}

/// Validates a replacement of `count` elements at `positions` in a sequence
/// of length `len`.
pub fn check_replace(len: usize, count: usize, positions: &IndexSet) -> Result<(), SpliceError> {
    if positions.len() != count {
        return Err(SpliceError::CountMismatch {
            positions: positions.len(),
            elements: count,
        });
    }
    check_remove(len, positions)
}

/// Removes the elements at `positions`.
///
/// Positions are processed from the highest down, so earlier removals never
/// shift a position that is still pending. Survivors keep their relative
/// order.
///
/// # Panics
///
/// Panics if any position is out of bounds.
pub fn remove_at<T>(sequence: &mut Vec<T>, positions: &IndexSet) {
    if let Err(err) = check_remove(sequence.len(), positions) {
        panic!("cannot remove elements: {err}");
    }
    tracing::trace!(target: targets::SPLICE, count = positions.len(), "remove_at");
    for position in positions.iter_rev() {
        sequence.remove(position);
    }
}

/// Inserts `elements` so that they end up at `positions`.
///
/// Positions are applied in ascending order, each one relative to the
/// sequence produced by the insertions before it. Reading the result at
/// `positions` yields `elements` in their original order.
///
/// # Panics
///
/// Panics if the counts differ or a position is beyond what
/// [`check_insert`] allows.
pub fn insert_at<T>(sequence: &mut Vec<T>, elements: Vec<T>, positions: &IndexSet) {
    if let Err(err) = check_insert(sequence.len(), elements.len(), positions) {
        panic!("cannot insert elements: {err}");
    }
    tracing::trace!(target: targets::SPLICE, count = positions.len(), "insert_at");
    sequence.reserve(elements.len());
    for (position, element) in positions.iter().zip(elements) {
        sequence.insert(position, element);
    }
}

/// Replaces the elements at `positions` with `elements`, in place.
///
/// # Panics
///
/// Panics if the counts differ or a position is out of bounds.
pub fn replace_at<T>(sequence: &mut [T], elements: Vec<T>, positions: &IndexSet) {
    if let Err(err) = check_replace(sequence.len(), elements.len(), positions) {
        panic!("cannot replace elements: {err}");
    }
    tracing::trace!(target: targets::SPLICE, count = positions.len(), "replace_at");
    for (position, element) in positions.iter().zip(elements) {
        sequence[position] = element;
    }
}
