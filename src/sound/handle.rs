//! Decoded, playable audio handles.

use std::sync::Arc;
use std::time::Duration;

/// A decoded recording, ready for a sink to play.
///
/// Handles live for the process lifetime inside the sound cache and are
/// shared by reference; playback never mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundHandle {
    /// The recording (or synth voice) this audio belongs to.
    pub sound_id: String,
    /// Interleaved f32 samples at `sample_rate`.
    pub samples: Arc<[f32]>,
    /// 1 = mono, 2 = stereo.
    pub channels: u16,
    pub sample_rate: u32,
}

impl SoundHandle {
    pub fn new(
        sound_id: impl Into<String>,
        samples: Vec<f32>,
        channels: u16,
        sample_rate: u32,
    ) -> Self {
        SoundHandle {
            sound_id: sound_id.into(),
            samples: samples.into(),
            channels,
            sample_rate,
        }
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Playback duration at rate 1.0.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }
}
