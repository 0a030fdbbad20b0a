//! Step sequencer and drum machine — the composer's two timers.
//!
//! Both run at the same bpm but independently: stopping the sequencer
//! leaves the drums running and vice versa. Triggered sounds are
//! detached, so hits overlap freely across tracks and steps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::bank::{KeyAction, MELODIC_VOICE_ID, SOUND_BANK, key_action};
use crate::dsp::drum::{self, DrumKind};
use crate::pattern::{PatternGrid, Preset, STEP_COUNT};
use crate::sound::SoundHandle;
use crate::sound::cache::SoundSource;
use crate::sound::sink::AudioSink;

/// Time per step at sixteenth-note resolution: 60000 / bpm / 4 ms.
pub fn step_interval(bpm: u32) -> Duration {
    Duration::from_secs_f64(60.0 / bpm.max(1) as f64 / 4.0)
}

/// Sequencer notifications for the UI layer (step highlight, status).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    Started { bpm: u32 },
    Step { step: usize },
    Stopped,
}

type Observer = Arc<dyn Fn(StepEvent) + Send + Sync>;

/// Timer-driven pattern playback over the composer sound bank.
///
/// Holds the 8×16 grid; a recurring timer walks the step cursor and
/// triggers every set track. Changing bpm requires stop/start.
pub struct StepSequencer<R, S> {
    source: Arc<R>,
    sink: Arc<S>,
    grid: Arc<Mutex<PatternGrid>>,
    rng: Mutex<fastrand::Rng>,
    running: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
    observer: Option<Observer>,
}

impl<R, S> StepSequencer<R, S>
where
    R: SoundSource + 'static,
    S: AudioSink + 'static,
{
    pub fn new(source: Arc<R>, sink: Arc<S>) -> Self {
        StepSequencer {
            source,
            sink,
            grid: Arc::new(Mutex::new(PatternGrid::new())),
            rng: Mutex::new(fastrand::Rng::new()),
            running: Arc::new(AtomicBool::new(false)),
            task: Mutex::new(None),
            observer: None,
        }
    }

    /// Pin the chaos preset's randomness, for reproducible patterns.
    pub fn with_rng_seed(self, seed: u64) -> Self {
        *self.rng.lock().expect("rng poisoned") = fastrand::Rng::with_seed(seed);
        self
    }

    /// Register the UI callback receiving step events.
    pub fn with_observer(mut self, observer: impl Fn(StepEvent) + Send + Sync + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Begin looping at the given bpm. Step 0 triggers immediately; the
    /// cursor then wraps modulo 16 until `stop`. A no-op when already
    /// running — restart to change tempo.
    pub fn start(&self, bpm: u32) -> bool {
        if self.running.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.emit(StepEvent::Started { bpm });

        let grid = self.grid.clone();
        let source = self.source.clone();
        let sink = self.sink.clone();
        let running = self.running.clone();
        let observer = self.observer.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(step_interval(bpm));
            let mut step = 0usize;
            loop {
                interval.tick().await;
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                if let Some(observer) = &observer {
                    observer(StepEvent::Step { step });
                }
                let tracks = grid.lock().expect("grid poisoned").active_tracks(step);
                for track in tracks {
                    spawn_play(source.clone(), sink.clone(), SOUND_BANK[track].sound_id, 1.0);
                }
                step = (step + 1) % STEP_COUNT;
            }
        });
        *self.task.lock().expect("task slot poisoned") = Some(handle);
        true
    }

    /// Halt the loop and silence active sounds. Idempotent. The drum
    /// machine is a separate timer and is not touched.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(handle) = self.task.lock().expect("task slot poisoned").take() {
            handle.abort();
        }
        self.sink.stop_all();
        self.emit(StepEvent::Stopped);
    }

    /// Flip a cell; a newly set cell previews its track's sound once.
    pub fn toggle_cell(&self, track: usize, step: usize) -> bool {
        let now_set = self
            .grid
            .lock()
            .expect("grid poisoned")
            .toggle(track, step);
        if now_set {
            if let Some(sound) = SOUND_BANK.get(track) {
                spawn_play(self.source.clone(), self.sink.clone(), sound.sound_id, 1.0);
            }
        }
        now_set
    }

    /// Clear the grid then load a named preset.
    pub fn load_preset(&self, preset: Preset) {
        let mut rng = self.rng.lock().expect("rng poisoned");
        self.grid
            .lock()
            .expect("grid poisoned")
            .load_preset(preset, &mut rng);
    }

    /// Load a preset by its UI name. Unrecognized names load as chaos.
    pub fn load_preset_named(&self, name: &str) {
        self.load_preset(Preset::from_name(name));
    }

    /// Reset every cell.
    pub fn clear(&self) {
        self.grid.lock().expect("grid poisoned").clear();
    }

    /// Copy of the current grid, for rendering.
    pub fn grid_snapshot(&self) -> PatternGrid {
        self.grid.lock().expect("grid poisoned").clone()
    }

    /// Trigger every set track at the given step, as the timer does.
    pub fn trigger_step(&self, step: usize) {
        let tracks = self
            .grid
            .lock()
            .expect("grid poisoned")
            .active_tracks(step);
        for track in tracks {
            spawn_play(self.source.clone(), self.sink.clone(), SOUND_BANK[track].sound_id, 1.0);
        }
    }

    /// Live keyboard: top row plays bank tracks, home row plays the
    /// melodic voice pitch-shifted. Unmapped keys do nothing.
    pub fn trigger_key(&self, key: char) -> bool {
        match key_action(key) {
            Some(KeyAction::Track(track)) => {
                spawn_play(
                    self.source.clone(),
                    self.sink.clone(),
                    SOUND_BANK[track].sound_id,
                    1.0,
                );
                true
            }
            Some(KeyAction::Pitched(rate)) => {
                spawn_play(self.source.clone(), self.sink.clone(), MELODIC_VOICE_ID, rate);
                true
            }
            None => false,
        }
    }

    /// Warm the cache with every bank sound.
    pub async fn preload_bank(&self) {
        for sound in &SOUND_BANK {
            let _ = self.source.resolve(sound.sound_id).await;
        }
    }

    fn emit(&self, event: StepEvent) {
        if let Some(observer) = &self.observer {
            observer(event);
        }
    }
}

/// Fire-and-forget playback: each triggered sound is independent, so
/// hits overlap instead of cancelling each other.
fn spawn_play<R, S>(source: Arc<R>, sink: Arc<S>, sound_id: &'static str, rate: f64)
where
    R: SoundSource + 'static,
    S: AudioSink + 'static,
{
    tokio::spawn(async move {
        if let Ok(handle) = source.resolve(sound_id).await {
            let _ = sink.play(handle, rate).await;
        }
    });
}

/// The hardcoded rock beat: which synth drums hit on a given step.
pub fn rock_beat(step: usize) -> Vec<DrumKind> {
    let mut hits = Vec::new();
    if step % 4 == 0 || step == 10 {
        hits.push(DrumKind::Kick);
    }
    if step == 4 || step == 12 {
        hits.push(DrumKind::Snare);
    }
    if step % 2 == 0 {
        hits.push(DrumKind::Hihat);
    }
    hits
}

/// Synthesized drum layer on its own fixed-tempo timer.
///
/// Shares a bpm value with the step sequencer at start time but is not
/// synchronized with it and survives the sequencer's stop. Volume is
/// live-adjustable between hits.
pub struct DrumMachine<S> {
    sink: Arc<S>,
    volume: Arc<Mutex<f64>>,
    sample_rate: u32,
    running: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<S: AudioSink + 'static> DrumMachine<S> {
    pub fn new(sink: Arc<S>, sample_rate: u32) -> Self {
        DrumMachine {
            sink,
            volume: Arc::new(Mutex::new(0.5)),
            sample_rate,
            running: Arc::new(AtomicBool::new(false)),
            task: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn volume(&self) -> f64 {
        *self.volume.lock().expect("volume poisoned")
    }

    /// Set the drum layer volume, clamped to [0, 1]. Takes effect on the
    /// next hit.
    pub fn set_volume(&self, volume: f64) {
        *self.volume.lock().expect("volume poisoned") = volume.clamp(0.0, 1.0);
    }

    /// Begin the rock beat at the given bpm. No-op when already running.
    pub fn start(&self, bpm: u32) -> bool {
        if self.running.swap(true, Ordering::SeqCst) {
            return false;
        }

        let sink = self.sink.clone();
        let volume = self.volume.clone();
        let running = self.running.clone();
        let sample_rate = self.sample_rate;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(step_interval(bpm));
            let mut step = 0usize;
            loop {
                interval.tick().await;
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                let vol = *volume.lock().expect("volume poisoned");
                for kind in rock_beat(step) {
                    let samples = drum::render(kind, vol, sample_rate);
                    let handle = Arc::new(SoundHandle::new(
                        format!("synth:{kind:?}"),
                        samples,
                        1,
                        sample_rate,
                    ));
                    let sink = sink.clone();
                    tokio::spawn(async move {
                        let _ = sink.play(handle, 1.0).await;
                    });
                }
                step = (step + 1) % STEP_COUNT;
            }
        });
        *self.task.lock().expect("task slot poisoned") = Some(handle);
        true
    }

    /// Halt the beat. Idempotent; already-sounding hits ring out.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(handle) = self.task.lock().expect("task slot poisoned").take() {
            handle.abort();
        }
    }
}
