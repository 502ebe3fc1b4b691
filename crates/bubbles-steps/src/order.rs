//! Logical order model rebuilt from sort events.

use serde::{Deserialize, Serialize};

use crate::events::SortEvent;

/// Values in their current logical order, together with the permutation of
/// original slots and which positions are final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderModel<T> {
    values: Vec<T>,
    order: Vec<usize>,
    sorted: Vec<bool>,
}

impl<T: Clone> OrderModel<T> {
    /// Start from the initial array: identity order, nothing sorted.
    pub fn new(values: Vec<T>) -> Self {
        let len = values.len();
        Self {
            values,
            order: (0..len).collect(),
            sorted: vec![false; len],
        }
    }

    /// Rebuild the model after applying the first `up_to` events to
    /// `initial`. `up_to` past the end replays the whole sequence.
    pub fn replay(initial: &[T], events: &[SortEvent], up_to: usize) -> Self {
        let mut model = Self::new(initial.to_vec());
        for event in events.iter().take(up_to) {
            model.apply(event);
        }
        model
    }

    /// Apply one event.
    ///
    /// # Panics
    ///
    /// Panics if the event touches a position outside the array. Validated
    /// and generated sequences never do.
    pub fn apply(&mut self, event: &SortEvent) {
        let len = self.values.len();
        assert!(
            event.max_index() < len,
            "{event} out of range for {len} values"
        );

        match *event {
            SortEvent::Compare { .. } => {}
            SortEvent::Swap { i, j } => {
                self.values.swap(i, j);
                self.order.swap(i, j);
            }
            SortEvent::Sorted { index } => {
                self.sorted[index] = true;
            }
        }
    }

    /// Current values, position by position.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Original slot of the value now at each position.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Whether each position holds its final value.
    pub fn sorted(&self) -> &[bool] {
        &self.sorted
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the array is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the model, returning the values.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}
