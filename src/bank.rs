//! Composer sound bank and live keyboard mappings.
//!
//! The bank is a fixed subset of the cipher table: 8 recordings chosen to
//! cover bass, mid and treble registers, one per sequencer track.

use serde::Serialize;

/// Number of sequencer tracks; one per bank sound.
pub const TRACK_COUNT: usize = 8;

/// Recording used as the melodic voice for pitched keyboard play.
pub const MELODIC_VOICE_ID: &str = "1027362";

/// Rough register of a bank sound, used for grid labelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Register {
    Bass,
    Mid,
    Treble,
}

/// One sound in the composer bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BankSound {
    pub sound_id: &'static str,
    pub name: &'static str,
    pub register: Register,
}

const fn sound(sound_id: &'static str, name: &'static str, register: Register) -> BankSound {
    BankSound {
        sound_id,
        name,
        register,
    }
}

/// The composer sound bank, in track order.
pub const SOUND_BANK: [BankSound; TRACK_COUNT] = [
    sound("1027362", "Raven Call (Bass)", Register::Bass),
    sound("1019144", "Raven Alarm (Kick)", Register::Bass),
    sound("960647", "Rook Call (Low)", Register::Bass),
    sound("943486", "Crow Call", Register::Mid),
    sound("909938", "Crow Begging", Register::Mid),
    sound("1025925", "Jackdaw (Hi-Hat)", Register::Treble),
    sound("1023191", "Magpie (Snare)", Register::Treble),
    sound("1056303", "Jay Call (Perc)", Register::Treble),
];

/// What a live keyboard key triggers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// Play a bank track's sound at normal rate.
    Track(usize),
    /// Play the melodic voice at a pitch-scaled playback rate.
    Pitched(f64),
}

/// Top-row keys q..i trigger bank tracks 0..7.
const TRACK_KEYS: [char; TRACK_COUNT] = ['q', 'w', 'e', 'r', 't', 'y', 'u', 'i'];

/// Home-row keys a..k play a C-major-ish scale as playback rates.
const NOTE_KEYS: [(char, f64); 8] = [
    ('a', 1.0),   // C
    ('s', 1.122), // D
    ('d', 1.26),  // E
    ('f', 1.335), // F
    ('g', 1.498), // G
    ('h', 1.682), // A
    ('j', 1.888), // B
    ('k', 2.0),   // C (octave)
];

/// Resolve a keyboard character to its action, if it is mapped.
pub fn key_action(key: char) -> Option<KeyAction> {
    let key = key.to_ascii_lowercase();
    if let Some(track) = TRACK_KEYS.iter().position(|&k| k == key) {
        return Some(KeyAction::Track(track));
    }
    NOTE_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, rate)| KeyAction::Pitched(rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_has_one_sound_per_track() {
        assert_eq!(SOUND_BANK.len(), TRACK_COUNT);
        for s in &SOUND_BANK {
            assert!(!s.sound_id.is_empty());
        }
    }

    #[test]
    fn track_keys_cover_all_tracks() {
        for (i, key) in TRACK_KEYS.iter().enumerate() {
            assert_eq!(key_action(*key), Some(KeyAction::Track(i)));
        }
    }

    #[test]
    fn note_keys_span_one_octave() {
        assert_eq!(key_action('a'), Some(KeyAction::Pitched(1.0)));
        assert_eq!(key_action('k'), Some(KeyAction::Pitched(2.0)));
    }

    #[test]
    fn key_action_case_insensitive() {
        assert_eq!(key_action('Q'), Some(KeyAction::Track(0)));
        assert_eq!(key_action('G'), Some(KeyAction::Pitched(1.498)));
    }

    #[test]
    fn unmapped_keys_do_nothing() {
        for key in ['z', 'p', '1', ' ', ';'] {
            assert_eq!(key_action(key), None);
        }
    }
}
