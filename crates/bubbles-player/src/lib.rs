//! Bubble Sort Step Player
//!
//! Plays the bubble-sort event sequence one event at a time, keeping the
//! authoritative value array and logical order, and calling out to a
//! presentation layer that renders each step.
//!
//! # Architecture
//!
//! - **Playback**: cursor over the event sequence, idle/playing state
//! - **Player**: async single-flight driver with stop and reset
//! - **Presentation**: capabilities the player calls; swap transitions
//!   report completion back
//! - **Tween**: swap transitions as phase data, played by a sequencer
//! - **Config**: per-event pacing, speed, initial array shape
//!
//! # Usage
//!
//! ```
//! use bubbles_player::{PlaybackSpeed, PlayerConfig, Recorder, StepPlayer};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> bubbles_player::Result<()> {
//! let config = PlayerConfig::default().with_speed(PlaybackSpeed::Maximum);
//! let player = StepPlayer::with_values(config, Recorder::new(), vec![5, 3, 8, 1]);
//!
//! player.start().await;
//! player.wait().await?;
//! assert_eq!(player.values().await, vec![1, 3, 5, 8]);
//! assert_eq!(player.listing(), "int array[] = {1, 3, 5, 8};");
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod playback;
mod player;
mod presentation;
mod tween;

pub use config::{Pacing, PlayerConfig};
pub use error::{Error, Result};
pub use playback::{Playback, PlaybackSpeed, PlaybackState, PlaybackStatus};
pub use player::{PlaybackOutcome, PlayerSnapshot, StartOutcome, StepPlayer};
pub use presentation::{Completion, Presentation, PresentationCall, Recorder, Transition};
pub use tween::{
    Easing, RowLayout, SwapPlan, Track, TweenPhase, TweenSequencer, DEFAULT_LIFT, DEFAULT_SPACING,
};

pub use bubbles_steps::{EventKind, EventSequence, SortEvent, ValueSpec};
