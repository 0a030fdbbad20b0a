//! Exponential ramp generator.
//!
//! Equivalent of a WebAudio `exponentialRampToValueAtTime` automation:
//! a value glides geometrically from `from` to `to` over a fixed duration,
//! then holds `to`. Drives both gain decay and the kick's pitch sweep.

/// Per-sample exponential ramp between two positive values.
#[derive(Debug, Clone)]
pub struct ExpRamp {
    value: f64,
    /// Per-sample geometric factor: (to / from)^(1 / total_samples).
    factor: f64,
    target: f64,
    remaining: usize,
}

impl ExpRamp {
    /// Ramp from `from` to `to` over `seconds`. Both endpoints must be
    /// positive; an exponential ramp cannot pass through zero.
    pub fn new(from: f64, to: f64, seconds: f64, sample_rate: f64) -> Self {
        debug_assert!(from > 0.0 && to > 0.0);
        let total = (seconds * sample_rate).max(1.0) as usize;
        ExpRamp {
            value: from,
            factor: (to / from).powf(1.0 / total as f64),
            target: to,
            remaining: total,
        }
    }

    /// Current value, then advance one sample.
    pub fn next_sample(&mut self) -> f64 {
        let out = self.value;
        if self.remaining > 0 {
            self.value *= self.factor;
            self.remaining -= 1;
            if self.remaining == 0 {
                self.value = self.target;
            }
        }
        out
    }

    /// Has the ramp reached its target?
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}
