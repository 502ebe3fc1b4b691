//! Swap transitions as data.
//!
//! A swap is a pair of [`Track`]s, each an ordered list of phases (rise,
//! translate, fall). [`TweenSequencer`] plays any plan and exposes a single
//! [`Transition`] to the player, which never learns how many phases a swap
//! has.

use std::time::Duration;

use glam::Vec3;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::trace;

use crate::presentation::Transition;

/// Spacing between neighbouring boxes in the row.
pub const DEFAULT_SPACING: f32 = 3.5;

/// Height a box is lifted to pass over its neighbour.
pub const DEFAULT_LIFT: f32 = 2.0;

/// Easing curve for a phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    #[default]
    SmoothStep,
    CubicInOut,
}

impl Easing {
    /// Map linear progress `t` in `0..=1` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Movement to `to` over `duration`, starting where the previous phase ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenPhase {
    pub to: Vec3,
    pub duration: Duration,
    pub easing: Easing,
}

impl TweenPhase {
    /// Create a phase with the default easing.
    pub fn new(to: Vec3, duration: Duration) -> Self {
        Self {
            to,
            duration,
            easing: Easing::default(),
        }
    }
}

/// Ordered phases moving one object.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    start: Vec3,
    phases: Vec<TweenPhase>,
}

impl Track {
    /// Track resting at `start`.
    pub fn starting_at(start: Vec3) -> Self {
        Self {
            start,
            phases: Vec::new(),
        }
    }

    /// Append a phase.
    #[must_use]
    pub fn then(mut self, phase: TweenPhase) -> Self {
        self.phases.push(phase);
        self
    }

    /// Stay put for `duration`.
    #[must_use]
    pub fn hold(self, duration: Duration) -> Self {
        let here = self.end();
        self.then(TweenPhase::new(here, duration))
    }

    /// Phases in order.
    pub fn phases(&self) -> &[TweenPhase] {
        &self.phases
    }

    /// Total duration of all phases.
    pub fn duration(&self) -> Duration {
        self.phases.iter().map(|p| p.duration).sum()
    }

    /// Final position.
    pub fn end(&self) -> Vec3 {
        self.phases.last().map_or(self.start, |p| p.to)
    }

    /// Position `elapsed` after the track started; clamps past the end.
    pub fn sample(&self, elapsed: Duration) -> Vec3 {
        let mut from = self.start;
        let mut remaining = elapsed;

        for phase in &self.phases {
            if remaining < phase.duration {
                let t = remaining.as_secs_f32() / phase.duration.as_secs_f32();
                return from.lerp(phase.to, phase.easing.apply(t));
            }
            remaining -= phase.duration;
            from = phase.to;
        }
        self.end()
    }
}

/// Tracks for the two boxes exchanged by a swap.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapPlan {
    pub a: Track,
    pub b: Track,
}

impl SwapPlan {
    /// `a` rises, both cross, `a` falls into `b`'s place. `b` slides
    /// underneath while `a` is lifted.
    pub fn arc(from_a: Vec3, from_b: Vec3, lift: f32, phase: Duration) -> Self {
        let up = Vec3::Y * lift;
        let a = Track::starting_at(from_a)
            .then(TweenPhase::new(from_a + up, phase))
            .then(TweenPhase::new(from_b + up, phase))
            .then(TweenPhase::new(from_b, phase));
        let b = Track::starting_at(from_b)
            .hold(phase)
            .then(TweenPhase::new(from_a, phase))
            .hold(phase);
        Self { a, b }
    }

    /// Plan for exchanging row positions `i` and `j`.
    pub fn for_row(layout: &RowLayout, count: usize, i: usize, j: usize, phase: Duration) -> Self {
        Self::arc(layout.position(i, count), layout.position(j, count), layout.lift, phase)
    }

    /// Time until both tracks have finished.
    pub fn duration(&self) -> Duration {
        self.a.duration().max(self.b.duration())
    }

    /// Positions of both boxes `elapsed` into the swap.
    pub fn sample(&self, elapsed: Duration) -> (Vec3, Vec3) {
        (self.a.sample(elapsed), self.b.sample(elapsed))
    }
}

/// Placement of boxes in a row centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub spacing: f32,
    pub lift: f32,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            lift: DEFAULT_LIFT,
        }
    }
}

impl RowLayout {
    /// Resting position of `index` in a row of `count` boxes.
    pub fn position(&self, index: usize, count: usize) -> Vec3 {
        let start_x = -(count.saturating_sub(1) as f32 * self.spacing) / 2.0;
        Vec3::new(start_x + index as f32 * self.spacing, 0.0, 0.0)
    }
}

/// Plays swap plans frame by frame on the tokio runtime.
#[derive(Debug, Clone, Copy)]
pub struct TweenSequencer {
    frame_interval: Duration,
}

impl Default for TweenSequencer {
    fn default() -> Self {
        // ~60 frames per second
        Self::new(Duration::from_millis(16))
    }
}

impl TweenSequencer {
    /// Create a sequencer emitting a frame every `frame_interval`.
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval: frame_interval.max(Duration::from_millis(1)),
        }
    }

    /// Play `plan`, calling `on_frame` with both positions every frame. The
    /// final frame is exactly the plan's end positions. The returned
    /// transition finishes after the final frame.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(&self, plan: SwapPlan, mut on_frame: F) -> Transition
    where
        F: FnMut(Vec3, Vec3) + Send + 'static,
    {
        let (done, transition) = Transition::pending();
        let frame_interval = self.frame_interval;

        tokio::spawn(async move {
            let total = plan.duration();
            let started = Instant::now();
            let mut ticker = tokio::time::interval(frame_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut frames = 0u32;

            loop {
                ticker.tick().await;
                let elapsed = started.elapsed().min(total);
                let (a, b) = plan.sample(elapsed);
                on_frame(a, b);
                frames += 1;
                if elapsed >= total {
                    break;
                }
            }

            trace!(frames, ?total, "swap tween finished");
            done.complete();
        });

        transition
    }
}
