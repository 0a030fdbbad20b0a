//! Process-lifetime sound cache.
//!
//! One fetch+decode per unique sound id, no matter how many callers race
//! on it; failures are cached the same way handles are, so a broken id
//! degrades to a skip instead of hammering the network.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;

use super::SoundHandle;
use super::loader::{Fetcher, decode};
use crate::error::FetchError;

type Slot = Arc<OnceCell<Result<Arc<SoundHandle>, FetchError>>>;

/// Resolves a sound id to a playable handle. The seam the players are
/// generic over; `SoundCache` is the production implementation.
pub trait SoundSource: Send + Sync {
    fn resolve(
        &self,
        sound_id: &str,
    ) -> impl Future<Output = Result<Arc<SoundHandle>, FetchError>> + Send;
}

/// Lazily fetches and retains one decoded handle per sound id.
pub struct SoundCache<F> {
    fetcher: F,
    slots: Mutex<HashMap<String, Slot>>,
}

impl<F: Fetcher> SoundCache<F> {
    pub fn new(fetcher: F) -> Self {
        SoundCache {
            fetcher,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a sound id, fetching and decoding on first use.
    ///
    /// Idempotent: concurrent calls for the same id share one fetch and
    /// observe the same handle (or the same failure).
    pub async fn resolve(&self, sound_id: &str) -> Result<Arc<SoundHandle>, FetchError> {
        let slot = {
            let mut slots = self.slots.lock().expect("slot map poisoned");
            slots.entry(sound_id.to_string()).or_default().clone()
        };

        slot.get_or_init(|| async {
            let bytes = self.fetcher.fetch(sound_id).await?;
            decode(sound_id, &bytes).map(Arc::new)
        })
        .await
        .clone()
    }

    /// Resolve a batch of ids up front, ignoring individual failures
    /// (they stay cached and degrade at playback time).
    pub async fn preload<I>(&self, sound_ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for id in sound_ids {
            let _ = self.resolve(id.as_ref()).await;
        }
    }
}

impl<F: Fetcher> SoundSource for SoundCache<F> {
    fn resolve(
        &self,
        sound_id: &str,
    ) -> impl Future<Output = Result<Arc<SoundHandle>, FetchError>> + Send {
        SoundCache::resolve(self, sound_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a tiny valid WAV, counting fetches per id.
    struct CountingFetcher {
        fetches: AtomicUsize,
        fail: bool,
    }

    impl CountingFetcher {
        fn new(fail: bool) -> Self {
            CountingFetcher {
                fetches: AtomicUsize::new(0),
                fail,
            }
        }

        fn count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    fn tiny_wav() -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for s in [0i16, 1000, -1000, 0] {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    impl Fetcher for CountingFetcher {
        fn fetch(
            &self,
            _sound_id: &str,
        ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let fail = self.fail;
            async move {
                // Yield so concurrent resolvers actually overlap.
                tokio::task::yield_now().await;
                if fail {
                    Err(FetchError::Http { status: 404 })
                } else {
                    Ok(tiny_wav())
                }
            }
        }
    }

    #[tokio::test]
    async fn resolve_fetches_once_per_id() {
        let cache = SoundCache::new(CountingFetcher::new(false));
        let first = cache.resolve("943486").await.unwrap();
        let second = cache.resolve("943486").await.unwrap();
        assert!(Arc::ptr_eq(&first, &second), "both callers share one handle");
        assert_eq!(cache.fetcher.count(), 1);

        cache.resolve("925201").await.unwrap();
        assert_eq!(cache.fetcher.count(), 2);
    }

    #[tokio::test]
    async fn concurrent_resolves_share_one_fetch() {
        let cache = Arc::new(SoundCache::new(CountingFetcher::new(false)));
        let (a, b) = tokio::join!(cache.resolve("943486"), cache.resolve("943486"));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.fetcher.count(), 1, "racing callers must not double-fetch");
    }

    #[tokio::test]
    async fn failures_are_cached() {
        let cache = SoundCache::new(CountingFetcher::new(true));
        let first = cache.resolve("872926").await;
        let second = cache.resolve("872926").await;
        assert_eq!(first, Err(FetchError::Http { status: 404 }));
        assert_eq!(first, second);
        assert_eq!(cache.fetcher.count(), 1, "failed ids are not refetched");
    }

    #[tokio::test]
    async fn preload_warms_every_id() {
        let cache = SoundCache::new(CountingFetcher::new(false));
        cache.preload(["943486", "925201", "943486"]).await;
        assert_eq!(cache.fetcher.count(), 2);
    }
}
