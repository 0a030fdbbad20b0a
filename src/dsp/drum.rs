//! Synthesized drum voices: kick, snare, hi-hat.
//!
//! Each hit is a short enveloped tone rendered to a mono f32 buffer.
//! `volume` scales amplitude only — duration and frequency trajectory are
//! fixed per kind, so a quiet kick is the loud kick attenuated.

use super::envelope::ExpRamp;
use super::noise::WhiteNoise;
use super::oscillator::{Oscillator, Waveform};

/// Envelopes decay to 1% of their peak by the end of the hit.
const DECAY_FLOOR: f64 = 0.01;

/// Fixed seed for the snare's noise burst, so renders are deterministic.
const SNARE_NOISE_SEED: u64 = 0x2c0a_93a7;

/// The three synthesized drum kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrumKind {
    Kick,
    Snare,
    Hihat,
}

impl DrumKind {
    pub fn from_name(name: &str) -> Option<DrumKind> {
        match name {
            "kick" => Some(DrumKind::Kick),
            "snare" => Some(DrumKind::Snare),
            "hihat" => Some(DrumKind::Hihat),
            _ => None,
        }
    }

    /// Hit duration in seconds.
    pub fn duration(&self) -> f64 {
        match self {
            DrumKind::Kick => 0.5,
            DrumKind::Snare => 0.2,
            DrumKind::Hihat => 0.05,
        }
    }
}

/// Render one drum hit to mono f32 samples. `volume` is clamped to [0, 1].
pub fn render(kind: DrumKind, volume: f64, sample_rate: u32) -> Vec<f32> {
    let volume = volume.clamp(0.0, 1.0);
    let sr = sample_rate as f64;
    let samples = (kind.duration() * sr) as usize;

    match kind {
        DrumKind::Kick => {
            // Low sine with the pitch falling away under the gain.
            let mut osc = Oscillator::new(Waveform::Sine, 150.0, sr);
            let mut pitch = ExpRamp::new(150.0, 0.01, 0.5, sr);
            let mut gain = ExpRamp::new(1.0, DECAY_FLOOR, 0.5, sr);
            (0..samples)
                .map(|_| {
                    osc.frequency = pitch.next_sample();
                    (osc.next_sample() * gain.next_sample() * volume) as f32
                })
                .collect()
        }
        DrumKind::Snare => {
            // Triangle body plus a white-noise snap.
            let mut osc = Oscillator::new(Waveform::Triangle, 100.0, sr);
            let mut tone_gain = ExpRamp::new(1.0, DECAY_FLOOR, 0.2, sr);
            let mut noise = WhiteNoise::with_seed(SNARE_NOISE_SEED);
            let mut noise_gain = ExpRamp::new(1.0, DECAY_FLOOR, 0.2, sr);
            (0..samples)
                .map(|_| {
                    let tone = osc.next_sample() * tone_gain.next_sample() * 0.8;
                    let snap = noise.next_sample() * noise_gain.next_sample() * 0.5;
                    ((tone + snap) * volume) as f32
                })
                .collect()
        }
        DrumKind::Hihat => {
            // Very short high square burst.
            let mut osc = Oscillator::new(Waveform::Square, 800.0, sr);
            let mut gain = ExpRamp::new(1.0, DECAY_FLOOR, 0.05, sr);
            (0..samples)
                .map(|_| (osc.next_sample() * gain.next_sample() * 0.3 * volume) as f32)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_match_kind() {
        let sr = 44100;
        assert_eq!(render(DrumKind::Kick, 1.0, sr).len(), 22050);
        assert_eq!(render(DrumKind::Snare, 1.0, sr).len(), 8820);
        assert_eq!(render(DrumKind::Hihat, 1.0, sr).len(), 2205);
    }

    #[test]
    fn volume_scales_amplitude_only() {
        let loud = render(DrumKind::Kick, 1.0, 44100);
        let half = render(DrumKind::Kick, 0.5, 44100);
        let mute = render(DrumKind::Kick, 0.0, 44100);

        assert_eq!(loud.len(), half.len());
        assert_eq!(loud.len(), mute.len());

        for ((&l, &h), &m) in loud.iter().zip(&half).zip(&mute) {
            assert!((h - l * 0.5).abs() < 1e-6, "half volume should halve samples");
            assert_eq!(m, 0.0, "zero volume should be exact silence");
        }
    }

    #[test]
    fn volume_clamped_to_unit_range() {
        let over = render(DrumKind::Hihat, 3.0, 44100);
        let full = render(DrumKind::Hihat, 1.0, 44100);
        assert_eq!(over, full);
    }

    #[test]
    fn hits_start_loud_and_decay() {
        for kind in [DrumKind::Kick, DrumKind::Snare, DrumKind::Hihat] {
            let samples = render(kind, 1.0, 44100);
            let n = samples.len();
            let head: f32 = samples[..n / 8].iter().map(|s| s.abs()).sum();
            let tail: f32 = samples[n - n / 8..].iter().map(|s| s.abs()).sum();
            assert!(
                head > tail * 4.0,
                "{kind:?} should decay: head energy {head}, tail energy {tail}"
            );
        }
    }

    #[test]
    fn snare_render_is_deterministic() {
        let a = render(DrumKind::Snare, 0.7, 44100);
        let b = render(DrumKind::Snare, 0.7, 44100);
        assert_eq!(a, b);
    }

    #[test]
    fn kind_names_resolve() {
        assert_eq!(DrumKind::from_name("kick"), Some(DrumKind::Kick));
        assert_eq!(DrumKind::from_name("snare"), Some(DrumKind::Snare));
        assert_eq!(DrumKind::from_name("hihat"), Some(DrumKind::Hihat));
        assert_eq!(DrumKind::from_name("cowbell"), None);
    }
}
