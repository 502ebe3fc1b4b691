//! Error types for bubbles-steps.

use thiserror::Error;

/// Result type for bubbles-steps operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from sequence validation and value generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Compare and swap events only ever touch neighbouring positions.
    #[error("event {position}: positions {i} and {j} are not adjacent")]
    NotAdjacent { position: usize, i: usize, j: usize },

    /// An index past the end of the value array.
    #[error("event {position}: index {index} out of range for {len} values")]
    OutOfRange { position: usize, index: usize, len: usize },

    /// A swap must directly follow the comparison of the same pair.
    #[error("event {position}: swap({i}, {j}) is not preceded by compare({i}, {j})")]
    UnpairedSwap { position: usize, i: usize, j: usize },

    /// Value generation parameters that cannot produce positive values.
    #[error("invalid value range: max_value must be at least 1")]
    EmptyValueRange,
}
