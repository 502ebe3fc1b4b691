//! Player configuration: pacing, speed and initial values.

use std::time::Duration;

use bubbles_steps::{EventKind, ValueSpec};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::playback::PlaybackSpeed;

/// Delay after each kind of event, in milliseconds at normal speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Pause after a comparison
    pub compare_ms: u64,
    /// Pause after a swap has been applied.
    /// The swap transition itself is awaited separately.
    pub swap_ms: u64,
    /// Pause after a position is marked sorted
    pub sorted_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            compare_ms: 1000,
            swap_ms: 1000,
            sorted_ms: 1000,
        }
    }
}

impl Pacing {
    /// Same delay for every kind of event.
    #[must_use]
    pub fn uniform(ms: u64) -> Self {
        Self {
            compare_ms: ms,
            swap_ms: ms,
            sorted_ms: ms,
        }
    }

    /// Base delay for an event kind at normal speed.
    pub fn base_delay(&self, kind: EventKind) -> Duration {
        let ms = match kind {
            EventKind::Compare => self.compare_ms,
            EventKind::Swap => self.swap_ms,
            EventKind::Sorted => self.sorted_ms,
        };
        Duration::from_millis(ms)
    }

    /// Delay for an event kind at the given speed.
    pub fn delay_for(&self, kind: EventKind, speed: PlaybackSpeed) -> Duration {
        speed.scale(self.base_delay(kind))
    }
}

/// Configuration for a step player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Delays between events
    pub pacing: Pacing,
    /// Speed multiplier for every delay
    pub speed: PlaybackSpeed,
    /// Shape of randomly drawn arrays
    pub values: ValueSpec,
    /// Seed for drawing arrays; entropy when absent
    pub seed: Option<u64>,
}

impl PlayerConfig {
    /// Set the pacing.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the playback speed.
    #[must_use]
    pub fn with_speed(mut self, speed: PlaybackSpeed) -> Self {
        self.speed = speed;
        self
    }

    /// Set the random array shape.
    #[must_use]
    pub fn with_values(mut self, values: ValueSpec) -> Self {
        self.values = values;
        self
    }

    /// Seed the array generator for reproducible runs.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration for values that cannot work.
    pub fn validate(&self) -> Result<()> {
        self.values.validate()?;
        Ok(())
    }

    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Create config from environment variables with defaults.
    ///
    /// Reads `BUBBLES_COMPARE_MS`, `BUBBLES_SWAP_MS`, `BUBBLES_SORTED_MS`,
    /// `BUBBLES_SPEED`, `BUBBLES_COUNT`, `BUBBLES_MAX_VALUE` and `BUBBLES_SEED`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup using the environment
    /// variable names of [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = parse_var(&lookup, "BUBBLES_COMPARE_MS")? {
            config.pacing.compare_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "BUBBLES_SWAP_MS")? {
            config.pacing.swap_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "BUBBLES_SORTED_MS")? {
            config.pacing.sorted_ms = ms;
        }
        if let Some(speed) = parse_var(&lookup, "BUBBLES_SPEED")? {
            config.speed = speed;
        }
        if let Some(count) = parse_var(&lookup, "BUBBLES_COUNT")? {
            config.values.count = count;
        }
        if let Some(max_value) = parse_var(&lookup, "BUBBLES_MAX_VALUE")? {
            config.values.max_value = max_value;
        }
        config.seed = parse_var(&lookup, "BUBBLES_SEED")?;

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}"))),
    }
}
