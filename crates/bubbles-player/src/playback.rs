//! Playback cursor over a sort event sequence.

use std::time::Duration;

use bubbles_steps::{EventSequence, SortEvent};
use serde::{Deserialize, Serialize};

/// Playback speed multiplier applied to every pacing delay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackSpeed {
    /// 0.25x speed
    Quarter,
    /// 0.5x speed
    Half,
    /// Normal speed (1x)
    #[default]
    Normal,
    /// 2x speed
    Double,
    /// 4x speed
    Quadruple,
    /// 10x speed
    TenX,
    /// No delays between events
    Maximum,
}

impl PlaybackSpeed {
    /// Scale a base delay to this speed.
    pub fn scale(&self, base: Duration) -> Duration {
        match self {
            PlaybackSpeed::Quarter => base * 4,
            PlaybackSpeed::Half => base * 2,
            PlaybackSpeed::Normal => base,
            PlaybackSpeed::Double => base / 2,
            PlaybackSpeed::Quadruple => base / 4,
            PlaybackSpeed::TenX => base / 10,
            PlaybackSpeed::Maximum => Duration::ZERO,
        }
    }
}

impl std::str::FromStr for PlaybackSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quarter" | "0.25" => Ok(PlaybackSpeed::Quarter),
            "half" | "0.5" => Ok(PlaybackSpeed::Half),
            "normal" | "1" => Ok(PlaybackSpeed::Normal),
            "double" | "2" => Ok(PlaybackSpeed::Double),
            "quadruple" | "4" => Ok(PlaybackSpeed::Quadruple),
            "ten_x" | "10" => Ok(PlaybackSpeed::TenX),
            "maximum" | "max" => Ok(PlaybackSpeed::Maximum),
            other => Err(format!("unknown playback speed '{other}'")),
        }
    }
}

/// Current state of playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// No run in progress
    #[default]
    Idle,
    /// A run is dispatching events
    Playing,
}

/// Cursor over an event sequence.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    events: EventSequence,
    cursor: usize,
    state: PlaybackState,
}

impl Playback {
    /// Create an idle cursor at the start of `events`.
    pub fn new(events: EventSequence) -> Self {
        Self {
            events,
            cursor: 0,
            state: PlaybackState::Idle,
        }
    }

    /// Get the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the total number of events.
    pub fn total(&self) -> usize {
        self.events.len()
    }

    /// Get the event sequence.
    pub fn events(&self) -> &EventSequence {
        &self.events
    }

    /// Get the current playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether a run is in progress.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether every event has been dispatched.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }

    /// Enter the playing state from the start of the sequence.
    pub fn begin(&mut self) {
        self.cursor = 0;
        self.state = PlaybackState::Playing;
    }

    /// Return to idle, keeping the cursor where it is.
    pub fn halt(&mut self) {
        self.state = PlaybackState::Idle;
    }

    /// Move the cursor back to the start without changing state.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Get the event at the cursor (if any).
    pub fn current_event(&self) -> Option<SortEvent> {
        self.events.get(self.cursor).copied()
    }

    /// Return the event at the cursor and advance past it.
    pub fn step_forward(&mut self) -> Option<SortEvent> {
        let event = self.current_event()?;
        self.cursor += 1;
        Some(event)
    }

    /// Calculate progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        if self.events.is_empty() {
            0.0
        } else {
            self.cursor as f64 / self.events.len() as f64
        }
    }

    /// Status view at the given speed.
    pub fn status(&self, speed: PlaybackSpeed) -> PlaybackStatus {
        PlaybackStatus {
            cursor: self.cursor,
            total: self.total(),
            state: self.state,
            speed,
            progress: self.progress(),
        }
    }
}

/// Playback status for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub cursor: usize,
    pub total: usize,
    pub state: PlaybackState,
    pub speed: PlaybackSpeed,
    pub progress: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_playback(values: &[u32]) -> Playback {
        Playback::new(EventSequence::generate(values))
    }

    #[test]
    fn playback_starts_idle_at_zero() {
        let playback = make_playback(&[3, 2, 1]);
        assert_eq!(playback.cursor(), 0);
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn step_forward_advances() {
        let mut playback = make_playback(&[2, 1]);
        playback.begin();

        let event = playback.step_forward();
        assert_eq!(event, Some(SortEvent::Compare { i: 0, j: 1 }));
        assert_eq!(playback.cursor(), 1);

        playback.step_forward();
        assert_eq!(playback.cursor(), 2);
    }

    #[test]
    fn step_forward_stops_at_end() {
        let mut playback = make_playback(&[1]);
        playback.begin();

        assert_eq!(playback.step_forward(), Some(SortEvent::Sorted { index: 0 }));
        assert!(playback.is_finished());
        assert_eq!(playback.step_forward(), None);
        assert_eq!(playback.cursor(), 1);
    }

    #[test]
    fn empty_sequence_is_finished_immediately() {
        let mut playback = make_playback(&[]);
        playback.begin();
        assert!(playback.is_finished());
        assert_eq!(playback.progress(), 0.0);
    }

    #[test]
    fn begin_restarts_from_zero() {
        let mut playback = make_playback(&[3, 1, 2]);
        playback.begin();
        playback.step_forward();
        playback.step_forward();
        playback.halt();

        playback.begin();
        assert_eq!(playback.cursor(), 0);
        assert!(playback.is_playing());
    }

    #[test]
    fn progress_calculation() {
        // [2, 1] -> compare, swap, sorted(1), sorted(0)
        let mut playback = make_playback(&[2, 1]);
        assert_eq!(playback.progress(), 0.0);

        playback.step_forward();
        playback.step_forward();
        assert_eq!(playback.progress(), 0.5);

        playback.step_forward();
        playback.step_forward();
        assert_eq!(playback.progress(), 1.0);
    }

    #[test]
    fn speed_scaling() {
        let base = Duration::from_millis(1000);
        assert_eq!(PlaybackSpeed::Normal.scale(base), base);
        assert_eq!(PlaybackSpeed::Double.scale(base), Duration::from_millis(500));
        assert_eq!(PlaybackSpeed::Quarter.scale(base), Duration::from_millis(4000));
        assert_eq!(PlaybackSpeed::Maximum.scale(base), Duration::ZERO);
    }

    #[test]
    fn speed_parsing() {
        assert_eq!("double".parse::<PlaybackSpeed>(), Ok(PlaybackSpeed::Double));
        assert_eq!("TEN_X".parse::<PlaybackSpeed>(), Ok(PlaybackSpeed::TenX));
        assert_eq!("max".parse::<PlaybackSpeed>(), Ok(PlaybackSpeed::Maximum));
        assert!("warp".parse::<PlaybackSpeed>().is_err());
    }

    #[test]
    fn status_conversion() {
        let mut playback = make_playback(&[2, 1]);
        playback.begin();
        playback.step_forward();

        let status = playback.status(PlaybackSpeed::Double);
        assert_eq!(status.cursor, 1);
        assert_eq!(status.total, 4);
        assert_eq!(status.state, PlaybackState::Playing);
        assert_eq!(status.speed, PlaybackSpeed::Double);
        assert_eq!(status.progress, 0.25);

        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains(r#""state":"playing""#));
    }
}
