//! Sort events and the immutable event sequence replayed by the player.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};

/// A single visual step of bubble sort.
///
/// Indices refer to positions in the current logical order, never to the
/// original slots of the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SortEvent {
    /// Adjacent positions `i` and `j` are being compared
    Compare { i: usize, j: usize },

    /// Positions `i` and `j` were out of order and exchange places
    Swap { i: usize, j: usize },

    /// Position `index` holds its final value
    Sorted { index: usize },
}

/// Fieldless tag of a [`SortEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Compare,
    Swap,
    Sorted,
}

impl SortEvent {
    /// Get the kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            SortEvent::Compare { .. } => EventKind::Compare,
            SortEvent::Swap { .. } => EventKind::Swap,
            SortEvent::Sorted { .. } => EventKind::Sorted,
        }
    }

    /// Highest index this event touches.
    pub fn max_index(&self) -> usize {
        match *self {
            SortEvent::Compare { j, .. } | SortEvent::Swap { j, .. } => j,
            SortEvent::Sorted { index } => index,
        }
    }
}

impl fmt::Display for SortEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortEvent::Compare { i, j } => write!(f, "compare({i}, {j})"),
            SortEvent::Swap { i, j } => write!(f, "swap({i}, {j})"),
            SortEvent::Sorted { index } => write!(f, "sorted({index})"),
        }
    }
}

/// Per-kind totals of an event sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounts {
    pub compares: usize,
    pub swaps: usize,
    pub sorted: usize,
}

/// Ordered, immutable list of sort events.
///
/// Cloning is cheap; every clone shares the same events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSequence {
    events: Arc<[SortEvent]>,
}

impl EventSequence {
    /// A sequence with no events (the result for an empty array).
    pub fn empty() -> Self {
        Self { events: Arc::from(Vec::<SortEvent>::new()) }
    }

    /// Generate the bubble-sort sequence for `values`.
    pub fn generate<T: PartialOrd + Clone>(values: &[T]) -> Self {
        crate::generator::generate(values)
    }

    /// Build a sequence from hand-written events, checking it against an
    /// array of `len` values.
    pub fn from_events(events: Vec<SortEvent>, len: usize) -> Result<Self> {
        let mut previous: Option<SortEvent> = None;

        for (position, event) in events.iter().enumerate() {
            match *event {
                SortEvent::Compare { i, j } | SortEvent::Swap { i, j } => {
                    if i.checked_add(1) != Some(j) {
                        return Err(Error::NotAdjacent { position, i, j });
                    }
                    if j >= len {
                        return Err(Error::OutOfRange { position, index: j, len });
                    }
                }
                SortEvent::Sorted { index } => {
                    if index >= len {
                        return Err(Error::OutOfRange { position, index, len });
                    }
                }
            }

            if let SortEvent::Swap { i, j } = *event {
                if previous != Some(SortEvent::Compare { i, j }) {
                    return Err(Error::UnpairedSwap { position, i, j });
                }
            }
            previous = Some(*event);
        }

        Ok(Self::from_trusted(events))
    }

    /// Wrap events produced by the generator.
    pub(crate) fn from_trusted(events: Vec<SortEvent>) -> Self {
        Self { events: Arc::from(events) }
    }

    /// Count events of each kind.
    pub fn counts(&self) -> EventCounts {
        self.events.iter().fold(EventCounts::default(), |mut counts, event| {
            match event.kind() {
                EventKind::Compare => counts.compares += 1,
                EventKind::Swap => counts.swaps += 1,
                EventKind::Sorted => counts.sorted += 1,
            }
            counts
        })
    }

    /// Borrow the events as a slice.
    pub fn as_slice(&self) -> &[SortEvent] {
        &self.events
    }
}

impl Default for EventSequence {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for EventSequence {
    type Target = [SortEvent];

    fn deref(&self) -> &[SortEvent] {
        &self.events
    }
}

impl Serialize for EventSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.events.iter())
    }
}
