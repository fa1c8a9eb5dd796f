//! Timestamp alignment
//!
//! Nearest-neighbour and half-open range lookups over ascending timestamp
//! sequences. Every lookup is a binary search; passing an unsorted
//! sequence is a caller bug and yields unspecified (but memory-safe) results.

use bitmicro_core::Timestamp;
use std::ops::Range;

/// Default nearest-match tolerance: with whole-second keys only an exact
/// hit is accepted
pub const DEFAULT_SENSITIVITY: Timestamp = 1;

/// Position of the entry closest to `target`
///
/// Ties go to the earlier entry. Returns `None` for an empty index or when
/// the closest entry is `sensitivity` seconds or more away.
pub fn nearest(index: &[Timestamp], target: Timestamp, sensitivity: Timestamp) -> Option<usize> {
    if index.is_empty() {
        return None;
    }

    let right = index.partition_point(|&ts| ts < target);
    let best = if right == 0 {
        0
    } else if right == index.len() {
        right - 1
    } else {
        let left = right - 1;
        if target - index[left] <= index[right] - target {
            left
        } else {
            right
        }
    };

    ((index[best] - target).abs() < sensitivity).then_some(best)
}

/// Positions of the entries with `low <= ts < high`
pub fn range(index: &[Timestamp], low: Timestamp, high: Timestamp) -> Range<usize> {
    range_by(index, low, high, |&ts| ts)
}

/// [`range`] over records carrying their own timestamp
pub fn range_by<T>(
    items: &[T],
    low: Timestamp,
    high: Timestamp,
    timestamp: impl Fn(&T) -> Timestamp,
) -> Range<usize> {
    let start = items.partition_point(|item| timestamp(item) < low);
    let end = items.partition_point(|item| timestamp(item) < high);
    start..end.max(start)
}
