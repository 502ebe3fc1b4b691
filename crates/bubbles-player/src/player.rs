//! Step player: replays a sort event sequence against the order model,
//! calling out to a presentation and pacing itself between events.
//!
//! # Concurrency
//!
//! One driver task per run, with events played on an inner task so that a
//! panicking presentation still leaves the player idle. Events are strictly
//! serialised: the next event is never dispatched before the previous one's
//! callbacks, swap transition and delay have resolved. The playing flag is the only guard; a second
//! [`start`](StepPlayer::start) while playing is dropped, not queued.
//!
//! Lock order is always state, then presentation.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bubbles_steps::{array_literal, EventSequence, OrderModel, SortEvent};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::config::PlayerConfig;
use crate::error::{Error, Result};
use crate::playback::{Playback, PlaybackStatus};
use crate::presentation::Presentation;

/// Result of a call to [`StepPlayer::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new run began
    Started,
    /// A run was already in progress; nothing changed
    AlreadyPlaying,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackOutcome {
    /// Every event was played
    Completed,
    /// Stopped early with `cursor` events applied
    Stopped { cursor: usize },
}

/// Authoritative view of the player, published after every event and reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Values in current logical order
    pub values: Vec<u32>,
    /// Original slot of the value at each position
    pub order: Vec<usize>,
    /// Positions holding their final value
    pub sorted: Vec<bool>,
    /// Last event applied, if any
    pub last_event: Option<SortEvent>,
    /// Cursor, total and state at the time of the snapshot
    pub status: PlaybackStatus,
}

/// Per-run stop request.
#[derive(Debug, Default)]
struct StopSignal {
    requested: AtomicBool,
    notify: Notify,
}

impl StopSignal {
    fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
        // Stores a permit if the run is not currently waiting.
        self.notify.notify_one();
    }

    fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    async fn requested(&self) {
        if self.is_requested() {
            return;
        }
        self.notify.notified().await;
    }
}

/// Everything the player owns about the current run.
struct PlayerState {
    /// Values the current sequence was generated from
    initial: Vec<u32>,
    model: OrderModel<u32>,
    playback: Playback,
    last_event: Option<SortEvent>,
    rng: StdRng,
    stop: Option<Arc<StopSignal>>,
    task: Option<JoinHandle<Result<PlaybackOutcome>>>,
}

impl PlayerState {
    fn new(values: Vec<u32>, events: EventSequence, rng: StdRng) -> Self {
        Self {
            initial: values.clone(),
            model: OrderModel::new(values),
            playback: Playback::new(events),
            last_event: None,
            rng,
            stop: None,
            task: None,
        }
    }

    fn install(&mut self, values: Vec<u32>, events: EventSequence) {
        self.initial = values.clone();
        self.model = OrderModel::new(values);
        self.playback = Playback::new(events);
        self.last_event = None;
        self.task = None;
    }

    fn rewind(&mut self) {
        self.model = OrderModel::new(self.initial.clone());
        self.playback.rewind();
        self.last_event = None;
    }

    fn snapshot(&self, config: &PlayerConfig) -> PlayerSnapshot {
        PlayerSnapshot {
            values: self.model.values().to_vec(),
            order: self.model.order().to_vec(),
            sorted: self.model.sorted().to_vec(),
            last_event: self.last_event,
            status: self.playback.status(config.speed),
        }
    }
}

struct Shared<P> {
    config: PlayerConfig,
    state: Mutex<PlayerState>,
    presentation: Mutex<P>,
    snapshots: watch::Sender<PlayerSnapshot>,
    /// `true` whenever no run is in progress
    idle: watch::Sender<bool>,
}

impl<P> Shared<P> {
    fn publish(&self, state: &PlayerState) {
        self.snapshots.send_replace(state.snapshot(&self.config));
    }
}

/// Drives a sort event sequence through a [`Presentation`].
///
/// Cheap to clone; clones control the same player.
pub struct StepPlayer<P> {
    shared: Arc<Shared<P>>,
}

impl<P> Clone for StepPlayer<P> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<P: Presentation> StepPlayer<P> {
    /// Create a player over a random array drawn from `config.values`.
    pub fn new(config: PlayerConfig, presentation: P) -> Result<Self> {
        config.validate()?;
        let mut rng = seeded_rng(&config);
        let values = config.values.generate(&mut rng)?;
        let events = EventSequence::generate(&values);
        Ok(Self::assemble(config, presentation, rng, values, events))
    }

    /// Create a player over caller-supplied values.
    pub fn with_values(config: PlayerConfig, presentation: P, values: Vec<u32>) -> Self {
        let rng = seeded_rng(&config);
        let events = EventSequence::generate(&values);
        Self::assemble(config, presentation, rng, values, events)
    }

    /// Create a player replaying a hand-built event sequence.
    pub fn with_events(
        config: PlayerConfig,
        presentation: P,
        values: Vec<u32>,
        events: Vec<SortEvent>,
    ) -> Result<Self> {
        let events = EventSequence::from_events(events, values.len())?;
        let rng = seeded_rng(&config);
        Ok(Self::assemble(config, presentation, rng, values, events))
    }

    fn assemble(
        config: PlayerConfig,
        mut presentation: P,
        rng: StdRng,
        values: Vec<u32>,
        events: EventSequence,
    ) -> Self {
        debug!(len = values.len(), events = events.len(), "player created");
        presentation.on_reset(&values);

        let state = PlayerState::new(values, events, rng);
        let (snapshots, _) = watch::channel(state.snapshot(&config));
        let (idle, _) = watch::channel(true);

        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(state),
                presentation: Mutex::new(presentation),
                snapshots,
                idle,
            }),
        }
    }

    /// Begin playing from the first event.
    ///
    /// Does nothing if a run is already in progress. If an earlier run moved
    /// the cursor, the order model is rewound to the initial values and the
    /// presentation is told through `on_reset` before playing.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(&self) -> StartOutcome {
        let mut state = self.shared.state.lock().await;
        if state.playback.is_playing() {
            debug!("start ignored: playback already running");
            return StartOutcome::AlreadyPlaying;
        }

        if state.playback.cursor() > 0 {
            debug!("rewinding to initial values");
            state.rewind();
            self.shared.presentation.lock().await.on_reset(&state.initial);
        }

        state.playback.begin();
        self.shared.idle.send_replace(false);
        let stop = Arc::new(StopSignal::default());
        state.stop = Some(stop.clone());

        let run = Run {
            shared: self.shared.clone(),
            stop,
        };
        state.task = Some(tokio::spawn(run.drive()));
        self.shared.publish(&state);

        debug!(events = state.playback.total(), "playback started");
        StartOutcome::Started
    }

    /// Stop the current run, abandoning the remaining events, and wait until
    /// the player is idle.
    ///
    /// A swap transition in flight is discarded: the order model keeps the
    /// pair unswapped and the cursor stays on that swap. Returns the outcome
    /// of the last run that has not been waited on, if any. When another
    /// handle is already waiting on the run, that handle receives the
    /// outcome and this returns `None` once the player is idle.
    pub async fn stop(&self) -> Result<Option<PlaybackOutcome>> {
        let task = {
            let mut state = self.shared.state.lock().await;
            if let Some(signal) = state.stop.take() {
                debug!(cursor = state.playback.cursor(), "stop requested");
                signal.request();
            }
            state.task.take()
        };
        self.settle(task).await
    }

    /// Wait for the current run to end on its own.
    ///
    /// Returns `None` if no run has been started since the last wait, stop
    /// or reset, or if another handle already collects the outcome. Either
    /// way the player is idle when this returns.
    pub async fn wait(&self) -> Result<Option<PlaybackOutcome>> {
        let task = self.shared.state.lock().await.task.take();
        self.settle(task).await
    }

    /// Join the run task if we own it, otherwise wait until idle.
    async fn settle(
        &self,
        task: Option<JoinHandle<Result<PlaybackOutcome>>>,
    ) -> Result<Option<PlaybackOutcome>> {
        match task {
            Some(handle) => Ok(Some(handle.await??)),
            None => {
                let mut idle = self.shared.idle.subscribe();
                // The sender lives as long as `self`.
                let _ = idle.wait_for(|idle| *idle).await;
                Ok(None)
            }
        }
    }

    /// Start over with a fresh random array drawn from the configuration.
    pub async fn reset(&self) -> Result<()> {
        let values = {
            let mut state = self.shared.state.lock().await;
            if state.playback.is_playing() {
                warn!("reset rejected: playback is running");
                return Err(Error::ResetWhilePlaying);
            }
            self.shared.config.values.generate(&mut state.rng)?
        };
        self.reset_with(values).await
    }

    /// Start over with `values`.
    ///
    /// Rejected with [`Error::ResetWhilePlaying`] during a run; stop first.
    pub async fn reset_with(&self, values: Vec<u32>) -> Result<()> {
        let mut state = self.shared.state.lock().await;
        if state.playback.is_playing() {
            warn!("reset rejected: playback is running");
            return Err(Error::ResetWhilePlaying);
        }

        let events = EventSequence::generate(&values);
        debug!(len = values.len(), events = events.len(), "reset");
        state.install(values, events);

        self.shared.presentation.lock().await.on_reset(&state.initial);
        self.shared.publish(&state);
        Ok(())
    }

    /// Whether a run is in progress.
    pub async fn is_playing(&self) -> bool {
        self.shared.state.lock().await.playback.is_playing()
    }

    /// Values in current logical order.
    pub async fn values(&self) -> Vec<u32> {
        self.shared.state.lock().await.model.values().to_vec()
    }

    /// Original slot of the value at each position.
    pub async fn order(&self) -> Vec<usize> {
        self.shared.state.lock().await.model.order().to_vec()
    }

    /// Values the current sequence was generated from.
    pub async fn initial_values(&self) -> Vec<u32> {
        self.shared.state.lock().await.initial.clone()
    }

    /// The event sequence being played.
    pub async fn events(&self) -> EventSequence {
        self.shared.state.lock().await.playback.events().clone()
    }

    /// Current playback status.
    pub async fn status(&self) -> PlaybackStatus {
        let state = self.shared.state.lock().await;
        state.playback.status(self.shared.config.speed)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.shared.snapshots.borrow().clone()
    }

    /// Receive a new snapshot whenever the order or cursor changes.
    pub fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.shared.snapshots.subscribe()
    }

    /// Code-listing line for the current values.
    pub fn listing(&self) -> String {
        array_literal(&self.shared.snapshots.borrow().values)
    }

    /// The configuration this player was built with.
    pub fn config(&self) -> &PlayerConfig {
        &self.shared.config
    }
}

fn seeded_rng(config: &PlayerConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// One playback run.
struct Run<P> {
    shared: Arc<Shared<P>>,
    stop: Arc<StopSignal>,
}

impl<P> Clone for Run<P> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            stop: self.stop.clone(),
        }
    }
}

impl<P: Presentation> Run<P> {
    async fn drive(self) -> Result<PlaybackOutcome> {
        // Events play on an inner task; a panicking presentation unwinds that
        // task only and the run still ends idle.
        let result = match tokio::spawn(self.clone().play()).await {
            Ok(result) => result,
            Err(e) => Err(Error::Task(e)),
        };

        let mut state = self.shared.state.lock().await;
        state.playback.halt();
        state.stop = None;

        match &result {
            Ok(PlaybackOutcome::Completed) => {
                info!(events = state.playback.total(), "playback complete");
            }
            Ok(PlaybackOutcome::Stopped { cursor }) => {
                debug!(cursor, "playback stopped");
            }
            Err(e) => {
                warn!(cursor = state.playback.cursor(), "playback failed: {e}");
            }
        }

        self.shared.publish(&state);
        self.shared.idle.send_replace(true);

        if matches!(result, Ok(PlaybackOutcome::Completed)) {
            self.shared.presentation.lock().await.on_complete();
        }
        result
    }

    async fn play(self) -> Result<PlaybackOutcome> {
        let config = &self.shared.config;

        loop {
            if self.stop.is_requested() {
                return Ok(self.stopped().await);
            }

            let event = {
                let state = self.shared.state.lock().await;
                if state.playback.is_finished() {
                    return Ok(PlaybackOutcome::Completed);
                }
                state.playback.events()[state.playback.cursor()]
            };
            trace!(%event, "dispatching");

            match event {
                SortEvent::Compare { i, j } => {
                    self.present(|p| p.on_compare(i, j)).await;
                }
                SortEvent::Swap { i, j } => {
                    let transition = self.present(|p| p.on_swap_start(i, j)).await;
                    match self.interruptible(transition.finished()).await {
                        None => {
                            debug!(i, j, "swap transition discarded");
                            return Ok(self.stopped().await);
                        }
                        Some(false) => {
                            warn!(i, j, "swap transition dropped");
                            return Err(Error::TransitionDropped { i, j });
                        }
                        Some(true) => {}
                    }
                }
                SortEvent::Sorted { index } => {
                    self.present(|p| p.on_sorted(index)).await;
                }
            }

            {
                let mut state = self.shared.state.lock().await;
                state.model.apply(&event);
                state.playback.step_forward();
                state.last_event = Some(event);
                self.shared.publish(&state);
            }

            if let SortEvent::Swap { i, j } = event {
                self.present(|p| p.on_swap_applied(i, j)).await;
            }

            let delay = config.pacing.delay_for(event.kind(), config.speed);
            if self.interruptible(tokio::time::sleep(delay)).await.is_none() {
                return Ok(self.stopped().await);
            }
        }
    }

    async fn present<R>(&self, call: impl FnOnce(&mut P) -> R) -> R {
        let mut presentation = self.shared.presentation.lock().await;
        call(&mut *presentation)
    }

    /// Run `fut` unless a stop arrives first.
    async fn interruptible<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.stop.requested() => None,
            out = fut => Some(out),
        }
    }

    async fn stopped(&self) -> PlaybackOutcome {
        let cursor = self.shared.state.lock().await.playback.cursor();
        PlaybackOutcome::Stopped { cursor }
    }
}
