//! Bubble-sort step generation.
//!
//! Replays ascending bubble sort with adjacent comparisons against a private
//! scratch copy and records every comparison, exchange and finalised slot.

use crate::events::{EventSequence, SortEvent};

/// Number of comparisons bubble sort performs on `n` values.
pub const fn expected_compares(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Generate the event sequence for sorting `values` in ascending order.
///
/// The input is never modified. Equal neighbours are never swapped, and the
/// output depends only on the relative order of the values.
pub fn generate<T: PartialOrd + Clone>(values: &[T]) -> EventSequence {
    let n = values.len();
    if n == 0 {
        return EventSequence::empty();
    }

    let mut scratch = values.to_vec();
    // Worst case: every comparison swaps, plus one marker per slot.
    let mut events = Vec::with_capacity(2 * expected_compares(n) + n);

    for pass in 0..n - 1 {
        let last = n - pass - 1;
        for i in 0..last {
            events.push(SortEvent::Compare { i, j: i + 1 });
            if scratch[i] > scratch[i + 1] {
                events.push(SortEvent::Swap { i, j: i + 1 });
                scratch.swap(i, i + 1);
            }
        }
        events.push(SortEvent::Sorted { index: last });
    }

    // The single-element remainder is never reached by a pass.
    events.push(SortEvent::Sorted { index: 0 });

    EventSequence::from_trusted(events)
}
