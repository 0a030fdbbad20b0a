//! Seeded white noise source for the snare snap.

/// White noise generator, uniform in [-1, 1].
///
/// Seeded so a rendered drum hit is byte-identical across runs.
#[derive(Debug, Clone)]
pub struct WhiteNoise {
    rng: fastrand::Rng,
}

impl WhiteNoise {
    pub fn with_seed(seed: u64) -> Self {
        WhiteNoise {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn next_sample(&mut self) -> f64 {
        self.rng.f64() * 2.0 - 1.0
    }
}
