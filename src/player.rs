//! Sequence player — walks an encoded cipher sequence, sounding each
//! call in order with fixed pacing, cooperative cancellation, and
//! progress reporting for the UI layer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;

use crate::cipher::SequenceItem;
use crate::sound::cache::SoundSource;
use crate::sound::sink::AudioSink;

/// Wait for each space character. Source variants ranged 400–800 ms;
/// 600 ms is the canonical constant.
pub const PAUSE_MS: u64 = 600;
/// Silence gap after each completed call.
pub const CALL_GAP_MS: u64 = 800;
/// Wait substituted for a call whose audio could not be obtained.
pub const FALLBACK_MS: u64 = 500;
/// Ceiling on a single call; a longer recording is force-stopped so one
/// long file cannot stall the whole sequence.
pub const CALL_TIMEOUT_MS: u64 = 6000;

/// Player lifecycle. `Stopping` covers the window between a stop request
/// and the run loop observing it at its next suspension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Playing,
    Stopping,
}

/// What a play-control press should do in each state. The play button
/// doubles as the stop control, so the transition is a table rather than
/// a flag check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Start,
    RequestStop,
    Ignore,
}

/// Transition table for the shared play/stop control.
pub fn toggle_transition(state: PlayerState) -> ToggleAction {
    match state {
        PlayerState::Idle => ToggleAction::Start,
        PlayerState::Playing => ToggleAction::RequestStop,
        PlayerState::Stopping => ToggleAction::Ignore,
    }
}

/// Notifications emitted to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// An item is about to be processed (highlight hook).
    ItemStarted { index: usize, total: usize },
    /// `done` of `total` items processed. `done == 0` after a stop.
    Progress { done: usize, total: usize },
    Finished,
    Stopped,
}

/// How a `play` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Completed,
    Stopped,
    AlreadyPlaying,
}

type Observer = Box<dyn Fn(PlayerEvent) + Send + Sync>;

/// Plays encoded sequences one item at a time.
///
/// One playback session per instance: a second `play` while running is
/// rejected, and `toggle` turns it into a stop request instead.
pub struct SequencePlayer<R, S> {
    source: Arc<R>,
    sink: Arc<S>,
    state: Mutex<PlayerState>,
    stop_tx: Mutex<Option<watch::Sender<bool>>>,
    observer: Option<Observer>,
}

impl<R: SoundSource, S: AudioSink> SequencePlayer<R, S> {
    pub fn new(source: Arc<R>, sink: Arc<S>) -> Self {
        SequencePlayer {
            source,
            sink,
            state: Mutex::new(PlayerState::Idle),
            stop_tx: Mutex::new(None),
            observer: None,
        }
    }

    /// Register the UI callback receiving player events.
    pub fn with_observer(mut self, observer: impl Fn(PlayerEvent) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> PlayerState {
        *self.state.lock().expect("player state poisoned")
    }

    /// Apply the play/stop control. Returns the action taken; on
    /// `ToggleAction::Start` the caller invokes `play` with its sequence.
    pub fn toggle(&self) -> ToggleAction {
        let action = toggle_transition(self.state());
        if action == ToggleAction::RequestStop {
            self.stop();
        }
        action
    }

    /// Request a halt. Idempotent; a no-op when idle. The run loop
    /// observes the request at its next suspension boundary, silences the
    /// sink, and resets progress to zero.
    pub fn stop(&self) {
        let mut state = self.state.lock().expect("player state poisoned");
        if *state != PlayerState::Playing {
            return;
        }
        *state = PlayerState::Stopping;
        if let Some(tx) = self.stop_tx.lock().expect("stop channel poisoned").as_ref() {
            let _ = tx.send(true);
        }
    }

    /// Walk the sequence in order. Suspends for pauses, plays calls
    /// (bounded by `CALL_TIMEOUT_MS`), substitutes `FALLBACK_MS` of
    /// silence for unobtainable audio, and exits early on `stop`.
    pub async fn play(&self, sequence: &[SequenceItem]) -> PlayOutcome {
        // The stop channel is installed under the state lock so any
        // `stop` that observes `Playing` has a sender to signal.
        let mut rx = {
            let mut state = self.state.lock().expect("player state poisoned");
            if *state != PlayerState::Idle {
                return PlayOutcome::AlreadyPlaying;
            }
            let (tx, rx) = watch::channel(false);
            *self.stop_tx.lock().expect("stop channel poisoned") = Some(tx);
            *state = PlayerState::Playing;
            rx
        };

        let total = sequence.len();
        let mut stopped = false;

        for (index, item) in sequence.iter().enumerate() {
            self.emit(PlayerEvent::ItemStarted { index, total });

            stopped = match item {
                SequenceItem::Pause => self.wait(PAUSE_MS, &mut rx).await,
                SequenceItem::Call { entry } => match self.source.resolve(entry.sound_id).await {
                    Ok(handle) if !*rx.borrow() => {
                        let stopped = self.play_call(handle, &mut rx).await;
                        if stopped {
                            true
                        } else {
                            self.wait(CALL_GAP_MS, &mut rx).await
                        }
                    }
                    // Stop arrived while the fetch was in flight.
                    Ok(_) => true,
                    Err(_) => self.wait(FALLBACK_MS, &mut rx).await,
                },
            };

            if stopped {
                break;
            }
            self.emit(PlayerEvent::Progress {
                done: index + 1,
                total,
            });
        }

        *self.stop_tx.lock().expect("stop channel poisoned") = None;
        *self.state.lock().expect("player state poisoned") = PlayerState::Idle;

        if stopped {
            self.sink.stop_all();
            self.emit(PlayerEvent::Stopped);
            self.emit(PlayerEvent::Progress { done: 0, total });
            PlayOutcome::Stopped
        } else {
            self.emit(PlayerEvent::Finished);
            PlayOutcome::Completed
        }
    }

    /// Sound one call, racing playback completion against the per-call
    /// timeout and the stop request. Returns true if stop won.
    async fn play_call(
        &self,
        handle: Arc<crate::sound::SoundHandle>,
        rx: &mut watch::Receiver<bool>,
    ) -> bool {
        tokio::select! {
            // A rejected start is not fatal; continue without waiting.
            _ = self.sink.play(handle, 1.0) => false,
            _ = sleep(Duration::from_millis(CALL_TIMEOUT_MS)) => {
                self.sink.stop_all();
                false
            }
            _ = rx.wait_for(|&s| s) => true,
        }
    }

    /// Suspend for a fixed duration, abortable by stop. Returns true if
    /// stop arrived first.
    async fn wait(&self, ms: u64, rx: &mut watch::Receiver<bool>) -> bool {
        if *rx.borrow() {
            return true;
        }
        tokio::select! {
            _ = sleep(Duration::from_millis(ms)) => false,
            _ = rx.wait_for(|&s| s) => true,
        }
    }

    fn emit(&self, event: PlayerEvent) {
        if let Some(observer) = &self.observer {
            observer(event);
        }
    }
}
