//! Capabilities the player calls out to while replaying events.
//!
//! The presentation side (scene, UI, terminal, ...) reacts to events but never
//! owns sort state. Its only way back into the player is the completion of a
//! swap [`Transition`].

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;

/// What the player waits on before applying a swap.
#[derive(Debug)]
pub enum Transition {
    /// Apply the swap straight away
    Immediate,
    /// Apply the swap after a fixed delay
    Delay(Duration),
    /// Apply the swap once the paired [`Completion`] fires
    Signal(oneshot::Receiver<()>),
}

impl Transition {
    /// Create a transition resolved by an external completion.
    pub fn pending() -> (Completion, Self) {
        let (tx, rx) = oneshot::channel();
        (Completion(tx), Transition::Signal(rx))
    }

    /// Wait for the transition. `false` if the completion was dropped
    /// without firing.
    pub(crate) async fn finished(self) -> bool {
        match self {
            Transition::Immediate => true,
            Transition::Delay(delay) => {
                tokio::time::sleep(delay).await;
                true
            }
            Transition::Signal(rx) => rx.await.is_ok(),
        }
    }
}

impl From<oneshot::Receiver<()>> for Transition {
    fn from(rx: oneshot::Receiver<()>) -> Self {
        Transition::Signal(rx)
    }
}

/// Completion handle for a [`Transition::Signal`].
#[derive(Debug)]
pub struct Completion(oneshot::Sender<()>);

impl Completion {
    /// Report that the visual transition finished.
    pub fn complete(self) {
        // The player may have stopped and stopped listening.
        let _ = self.0.send(());
    }
}

/// Presentation collaborator driven by the step player.
///
/// Every method defaults to doing nothing so implementors only handle the
/// events they render. Indices are positions in the current logical order.
pub trait Presentation: Send + 'static {
    /// Positions `i` and `j` are being compared.
    fn on_compare(&mut self, _i: usize, _j: usize) {}

    /// Start exchanging the elements at `i` and `j`. The order model is only
    /// updated once the returned transition finishes.
    fn on_swap_start(&mut self, _i: usize, _j: usize) -> Transition {
        Transition::Immediate
    }

    /// The order model now has `i` and `j` exchanged.
    fn on_swap_applied(&mut self, _i: usize, _j: usize) {}

    /// Position `index` holds its final value.
    fn on_sorted(&mut self, _index: usize) {}

    /// A fresh run begins with `values`.
    fn on_reset(&mut self, _values: &[u32]) {}

    /// Every event has been played.
    fn on_complete(&mut self) {}
}

/// One call received by a [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationCall {
    Compare(usize, usize),
    SwapStart(usize, usize),
    SwapApplied(usize, usize),
    Sorted(usize),
    Reset(Vec<u32>),
    Complete,
}

/// Presentation that records every call it receives.
///
/// Clones share the same log, so a clone kept outside the player can inspect
/// what the player did.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<PresentationCall>>>,
    swap_delay: Option<Duration>,
}

impl Recorder {
    /// Create a recorder whose swaps complete immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every swap transition take `delay`.
    #[must_use]
    pub fn with_swap_delay(mut self, delay: Duration) -> Self {
        self.swap_delay = Some(delay);
        self
    }

    /// Snapshot of the calls so far.
    pub fn calls(&self) -> Vec<PresentationCall> {
        self.log().clone()
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        self.log().clear();
    }

    fn record(&self, call: PresentationCall) {
        self.log().push(call);
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Vec<PresentationCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Presentation for Recorder {
    fn on_compare(&mut self, i: usize, j: usize) {
        self.record(PresentationCall::Compare(i, j));
    }

    fn on_swap_start(&mut self, i: usize, j: usize) -> Transition {
        self.record(PresentationCall::SwapStart(i, j));
        match self.swap_delay {
            Some(delay) => Transition::Delay(delay),
            None => Transition::Immediate,
        }
    }

    fn on_swap_applied(&mut self, i: usize, j: usize) {
        self.record(PresentationCall::SwapApplied(i, j));
    }

    fn on_sorted(&mut self, index: usize) {
        self.record(PresentationCall::Sorted(index));
    }

    fn on_reset(&mut self, values: &[u32]) {
        self.record(PresentationCall::Reset(values.to_vec()));
    }

    fn on_complete(&mut self) {
        self.record(PresentationCall::Complete);
    }
}
