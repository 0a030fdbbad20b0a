use std::fmt;

/// Top-level error type for the crate.
#[derive(Debug, Clone)]
pub enum CorvidError {
    UnknownDrum(String),
    Fetch(FetchError),
    Playback(PlaybackError),
}

/// Failure to obtain a playable recording.
///
/// Fetch failures are cached per sound id: every later playback attempt
/// for that id degrades to a fixed fallback delay instead of sound, so
/// these errors are cheap to clone and compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Http { status: u16 },
    Network { message: String },
    Decode { message: String },
}

/// Failure to start playback of an already-resolved sound
/// (e.g. an output device rejecting the stream). Never fatal to a
/// sequence run; the player continues without waiting for the sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    Rejected { message: String },
}

impl fmt::Display for CorvidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorvidError::UnknownDrum(kind) => write!(f, "Unknown drum kind '{kind}'"),
            CorvidError::Fetch(e) => write!(f, "Fetch error: {e}"),
            CorvidError::Playback(e) => write!(f, "Playback error: {e}"),
        }
    }
}

impl std::error::Error for CorvidError {}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http { status } => write!(f, "HTTP {status}"),
            FetchError::Network { message } => write!(f, "Network failure: {message}"),
            FetchError::Decode { message } => write!(f, "Undecodable audio: {message}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::Rejected { message } => write!(f, "Playback rejected: {message}"),
        }
    }
}

impl std::error::Error for PlaybackError {}

impl From<FetchError> for CorvidError {
    fn from(e: FetchError) -> Self {
        CorvidError::Fetch(e)
    }
}

impl From<PlaybackError> for CorvidError {
    fn from(e: PlaybackError) -> Self {
        CorvidError::Playback(e)
    }
}
