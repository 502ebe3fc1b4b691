//! Bubble Sort Steps
//!
//! Turns an array of values into the deterministic sequence of visual events
//! bubble sort goes through, and rebuilds the logical order at any point of
//! that sequence.
//!
//! # Architecture
//!
//! - **Generator**: replays ascending bubble sort into [`EventSequence`]
//! - **Events**: [`SortEvent`] (compare / swap / sorted), validated sequences
//! - **Order**: [`OrderModel`] applies events to values and a slot permutation
//! - **Values**: random initial arrays and their code-listing form
//!
//! # Usage
//!
//! ```
//! use bubbles_steps::{generate, OrderModel};
//!
//! let values = [5, 3, 8, 1];
//! let events = generate(&values);
//!
//! let model = OrderModel::replay(&values, &events, events.len());
//! assert_eq!(model.values(), &[1, 3, 5, 8]);
//! ```

mod error;
mod events;
mod generator;
mod order;
mod values;

pub use error::{Error, Result};
pub use events::{EventCounts, EventKind, EventSequence, SortEvent};
pub use generator::{expected_compares, generate};
pub use order::OrderModel;
pub use values::{array_literal, ValueSpec, DEFAULT_COUNT, DEFAULT_MAX_VALUE};
