//! WAV renderer — encodes a rendered drum hit to a WAV byte buffer.

use super::drum::{self, DrumKind};

// One 16-bit sample per frame.
const BYTES_PER_FRAME: u16 = 2;
const HEADER_LEN: usize = 44;

/// Render one drum hit to a WAV file as bytes (16-bit mono PCM).
pub fn render_drum_wav(kind: DrumKind, volume: f64, sample_rate: u32) -> Vec<u8> {
    let pcm: Vec<i16> = drum::render(kind, volume, sample_rate)
        .into_iter()
        .map(|s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
        .collect();
    encode_wav_mono(&pcm, sample_rate)
}

/// Encode mono i16 PCM into an in-memory WAV file.
fn encode_wav_mono(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * BYTES_PER_FRAME as usize) as u32;
    let mut wav = Vec::with_capacity(HEADER_LEN + data_len as usize);

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // 16-byte fmt chunk: uncompressed PCM, one channel.
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * u32::from(BYTES_PER_FRAME)).to_le_bytes());
    wav.extend_from_slice(&BYTES_PER_FRAME.to_le_bytes());
    wav.extend_from_slice(&(8 * BYTES_PER_FRAME).to_le_bytes());

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    for &sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_valid() {
        let wav = render_drum_wav(DrumKind::Kick, 1.0, 44100);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");

        let sr = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        assert_eq!(sr, 44100);

        let ch = u16::from_le_bytes([wav[22], wav[23]]);
        assert_eq!(ch, 1);

        let byte_rate = u32::from_le_bytes([wav[28], wav[29], wav[30], wav[31]]);
        assert_eq!(byte_rate, 44100 * 2);
        let block_align = u16::from_le_bytes([wav[32], wav[33]]);
        assert_eq!(block_align, 2);
        let bits = u16::from_le_bytes([wav[34], wav[35]]);
        assert_eq!(bits, 16);
    }

    #[test]
    fn wav_size_matches_duration() {
        // 0.05s hi-hat at 44.1kHz = 2205 samples * 2 bytes mono
        let wav = render_drum_wav(DrumKind::Hihat, 1.0, 44100);
        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_size, 2205 * 2);
        assert_eq!(wav.len(), 44 + 2205 * 2);
    }

    #[test]
    fn rendered_wav_is_not_silence() {
        let wav = render_drum_wav(DrumKind::Snare, 0.8, 22050);
        let mut has_nonzero = false;
        for i in (44..wav.len()).step_by(2) {
            if i + 1 < wav.len() {
                let sample = i16::from_le_bytes([wav[i], wav[i + 1]]);
                if sample != 0 {
                    has_nonzero = true;
                    break;
                }
            }
        }
        assert!(has_nonzero, "Rendered WAV should contain non-silent audio");
    }

    #[test]
    fn zero_volume_renders_silence() {
        let wav = render_drum_wav(DrumKind::Kick, 0.0, 22050);
        for i in (44..wav.len()).step_by(2) {
            if i + 1 < wav.len() {
                let sample = i16::from_le_bytes([wav[i], wav[i + 1]]);
                assert_eq!(sample, 0);
            }
        }
    }
}
