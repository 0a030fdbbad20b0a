//! Fetching and decoding remote recordings.
//!
//! Recordings are served as MP3 or WAV; the loader sniffs the container
//! and decodes to f32 PCM. `HttpFetcher` keeps raw downloads in the
//! project cache directory so restarts don't refetch.

use std::future::Future;
use std::io::Cursor;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use super::{SoundHandle, download_url};
use crate::error::FetchError;

/// Obtains the raw bytes of a recording. The seam the cache is generic
/// over, so tests can count or fail fetches deterministically.
pub trait Fetcher: Send + Sync {
    fn fetch(
        &self,
        sound_id: &str,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Fetches recordings over HTTP, with an optional on-disk byte cache.
pub struct HttpFetcher {
    client: reqwest::Client,
    cache_dir: Option<PathBuf>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher {
            client: reqwest::Client::new(),
            cache_dir: None,
        }
    }

    /// Cache downloaded bytes under the per-user project cache directory.
    pub fn with_disk_cache() -> Self {
        let cache_dir = directories::ProjectDirs::from("net", "corvidlab", "corvid-core")
            .map(|dirs| dirs.cache_dir().join("downloads"));
        HttpFetcher {
            client: reqwest::Client::new(),
            cache_dir,
        }
    }

    fn cache_path(&self, sound_id: &str) -> Option<PathBuf> {
        let dir = self.cache_dir.as_ref()?;
        let digest = Sha256::digest(sound_id.as_bytes());
        Some(dir.join(format!("{digest:x}")))
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(
        &self,
        sound_id: &str,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        let url = download_url(sound_id);
        let client = self.client.clone();
        let cache_path = self.cache_path(sound_id);
        async move {
            if let Some(path) = &cache_path {
                if let Ok(bytes) = tokio::fs::read(path).await {
                    return Ok(bytes);
                }
            }

            let response = client.get(&url).send().await.map_err(|e| {
                FetchError::Network {
                    message: e.to_string(),
                }
            })?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Http {
                    status: status.as_u16(),
                });
            }
            let bytes = response
                .bytes()
                .await
                .map_err(|e| FetchError::Network {
                    message: e.to_string(),
                })?
                .to_vec();

            // Best-effort write; a failed cache write is not a fetch failure.
            if let Some(path) = &cache_path {
                if let Some(parent) = path.parent() {
                    let _ = tokio::fs::create_dir_all(parent).await;
                }
                let _ = tokio::fs::write(path, &bytes).await;
            }

            Ok(bytes)
        }
    }
}

/// Decode fetched bytes to a playable handle. RIFF-tagged data goes
/// through the WAV reader, anything else through the MP3 decoder.
pub fn decode(sound_id: &str, bytes: &[u8]) -> Result<SoundHandle, FetchError> {
    if bytes.starts_with(b"RIFF") {
        decode_wav(sound_id, bytes)
    } else {
        decode_mp3(sound_id, bytes)
    }
}

fn decode_wav(sound_id: &str, bytes: &[u8]) -> Result<SoundHandle, FetchError> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).map_err(|e| FetchError::Decode {
        message: e.to_string(),
    })?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| FetchError::Decode {
                message: e.to_string(),
            })?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| FetchError::Decode {
                    message: e.to_string(),
                })?
        }
    };

    Ok(SoundHandle::new(
        sound_id,
        samples,
        spec.channels,
        spec.sample_rate,
    ))
}

fn decode_mp3(sound_id: &str, bytes: &[u8]) -> Result<SoundHandle, FetchError> {
    let mut decoder = minimp3::Decoder::new(Cursor::new(bytes));
    let mut samples: Vec<f32> = Vec::new();
    let mut channels: u16 = 0;
    let mut sample_rate: u32 = 0;

    loop {
        match decoder.next_frame() {
            Ok(frame) => {
                if channels == 0 {
                    channels = frame.channels as u16;
                    sample_rate = frame.sample_rate as u32;
                }
                samples.extend(frame.data.iter().map(|&s| s as f32 / 32768.0));
            }
            Err(minimp3::Error::Eof) => break,
            Err(e) => {
                return Err(FetchError::Decode {
                    message: format!("{e:?}"),
                });
            }
        }
    }

    if samples.is_empty() {
        return Err(FetchError::Decode {
            message: "no decodable audio frames".to_string(),
        });
    }

    Ok(SoundHandle::new(sound_id, samples, channels, sample_rate))
}
