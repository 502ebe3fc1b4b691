//! Initial value arrays and their code-listing form.

use std::fmt::Display;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of values in a run.
pub const DEFAULT_COUNT: usize = 8;

/// Default largest value drawn.
pub const DEFAULT_MAX_VALUE: u32 = 999;

/// How to draw a random initial array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueSpec {
    /// Number of values
    pub count: usize,
    /// Values are drawn from `1..=max_value`
    pub max_value: u32,
}

impl Default for ValueSpec {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            max_value: DEFAULT_MAX_VALUE,
        }
    }
}

impl ValueSpec {
    /// Check that the range can produce positive values.
    pub fn validate(&self) -> Result<()> {
        if self.max_value == 0 {
            return Err(Error::EmptyValueRange);
        }
        Ok(())
    }

    /// Draw `count` values uniformly from `1..=max_value`.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Vec<u32>> {
        self.validate()?;
        Ok((0..self.count)
            .map(|_| rng.gen_range(1..=self.max_value))
            .collect())
    }
}

/// Render values as a C array initialiser, e.g. `int array[] = {5, 3, 8};`.
pub fn array_literal<T: Display>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("int array[] = {{{}}};", items.join(", "))
}
