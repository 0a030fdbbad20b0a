//! Sound acquisition: download URLs, decoded handles, the fetch cache,
//! and the playback sink seam consumed by the players.

pub mod handle;
pub use handle::SoundHandle;

#[cfg(feature = "playback")]
pub mod cache;
#[cfg(feature = "playback")]
pub mod loader;
#[cfg(feature = "playback")]
pub mod sink;

/// Base URL recordings are served from.
pub const DOWNLOAD_BASE_URL: &str = "https://xeno-canto.org";

/// Download URL for a recording id.
pub fn download_url(sound_id: &str) -> String {
    format!("{DOWNLOAD_BASE_URL}/{sound_id}/download")
}
