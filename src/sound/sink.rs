//! Playback sink seam.
//!
//! The core never talks to an audio device directly; frontends (WebAudio,
//! cpal, test harnesses) implement `AudioSink` and the players drive it.

use std::future::Future;
use std::sync::Arc;

use super::SoundHandle;
use crate::error::PlaybackError;

/// Something that can sound a handle.
pub trait AudioSink: Send + Sync {
    /// Begin playback at the given rate (1.0 = recorded speed). The
    /// returned future resolves when the sound finishes, or immediately
    /// with `PlaybackError::Rejected` if the sink refuses to start it.
    fn play(
        &self,
        handle: Arc<SoundHandle>,
        rate: f64,
    ) -> impl Future<Output = Result<(), PlaybackError>> + Send;

    /// Pause and reset everything this sink currently has sounding.
    /// Sinks without that notion keep the default no-op.
    fn stop_all(&self) {}
}

/// Discards audio, resolving after the handle's nominal duration.
/// Useful for headless runs and timing tests.
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(
        &self,
        handle: Arc<SoundHandle>,
        rate: f64,
    ) -> impl Future<Output = Result<(), PlaybackError>> + Send {
        async move {
            let rate = if rate > 0.0 { rate } else { 1.0 };
            tokio::time::sleep(handle.duration().div_f64(rate)).await;
            Ok(())
        }
    }
}
