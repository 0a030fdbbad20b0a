//! Letter-to-birdcall cipher table and sequence encoding.
//!
//! Every letter A–Z maps to exactly one recorded corvid vocalization.
//! Vowels are Carrion Crow calls; consonants are spread across Raven,
//! Jackdaw, Magpie, Jay and Rook recordings.

use serde::Serialize;

/// One cipher table entry: a letter bound to a recorded bird call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    /// The uppercase letter this entry encodes.
    pub symbol: char,
    /// Source species of the recording.
    pub species: &'static str,
    /// Kind of vocalization ("Call", "Alarm", "Begging").
    pub call_kind: &'static str,
    /// Recording identifier used to fetch the audio.
    pub sound_id: &'static str,
}

const fn entry(
    symbol: char,
    species: &'static str,
    call_kind: &'static str,
    sound_id: &'static str,
) -> SymbolEntry {
    SymbolEntry {
        symbol,
        species,
        call_kind,
        sound_id,
    }
}

/// The full cipher table: 5 vowels + 21 consonants.
pub const CIPHER_MAP: [SymbolEntry; 26] = [
    // Vowels — Carrion Crow
    entry('A', "Carrion Crow", "Call", "943486"),
    entry('E', "Carrion Crow", "Call", "925201"),
    entry('I', "Carrion Crow", "Call", "922803"),
    entry('O', "Carrion Crow", "Begging", "909938"),
    entry('U', "Carrion Crow", "Call", "881570"),
    // Consonants — Northern Raven
    entry('B', "Northern Raven", "Call", "1027362"),
    entry('C', "Northern Raven", "Call", "1026798"),
    entry('D', "Northern Raven", "Alarm", "1019144"),
    entry('F', "Northern Raven", "Call", "1011504"),
    entry('G', "Northern Raven", "Call", "1007182"),
    // Consonants — Western Jackdaw
    entry('H', "Western Jackdaw", "Call", "1025925"),
    entry('J', "Western Jackdaw", "Call", "1025920"),
    entry('K', "Western Jackdaw", "Call", "1024252"),
    entry('L', "Western Jackdaw", "Call", "1024251"),
    // Consonants — Eurasian Magpie
    entry('M', "Eurasian Magpie", "Call", "1025967"),
    entry('N', "Eurasian Magpie", "Call", "1023192"),
    entry('P', "Eurasian Magpie", "Call", "1017982"),
    entry('Q', "Eurasian Magpie", "Call", "1017981"),
    // Consonants — Eurasian Jay
    entry('R', "Eurasian Jay", "Call", "1056303"),
    entry('S', "Eurasian Jay", "Call", "1056301"),
    entry('T', "Eurasian Jay", "Call", "1056300"),
    entry('V', "Eurasian Jay", "Call", "1054348"),
    // Consonants — Rook
    entry('W', "Rook", "Call", "960647"),
    entry('X', "Rook", "Call", "944398"),
    entry('Y', "Rook", "Call", "911573"),
    entry('Z', "Rook", "Call", "872926"),
];

/// Look up the cipher entry for a character. Case-insensitive;
/// any character outside A–Z yields `None`.
pub fn lookup(symbol: char) -> Option<&'static SymbolEntry> {
    let upper = symbol.to_ascii_uppercase();
    CIPHER_MAP.iter().find(|e| e.symbol == upper)
}

/// Iterate the cipher legend in table order.
pub fn entries() -> impl Iterator<Item = &'static SymbolEntry> {
    CIPHER_MAP.iter()
}

/// One item of an encoded sequence: a bird call or a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SequenceItem {
    Call { entry: &'static SymbolEntry },
    Pause,
}

impl SequenceItem {
    /// The sound id to play, if this item carries one.
    pub fn sound_id(&self) -> Option<&'static str> {
        match self {
            SequenceItem::Call { entry } => Some(entry.sound_id),
            SequenceItem::Pause => None,
        }
    }
}

/// Encode input text into a playable sequence.
///
/// Recognized letters become `Call` items, each space character becomes
/// its own `Pause` marker, and every other character is dropped.
pub fn encode(text: &str) -> Vec<SequenceItem> {
    let mut sequence = Vec::new();
    for ch in text.chars() {
        if let Some(entry) = lookup(ch) {
            sequence.push(SequenceItem::Call { entry });
        } else if ch == ' ' {
            sequence.push(SequenceItem::Pause);
        }
    }
    sequence
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_total_over_alphabet() {
        for ch in 'A'..='Z' {
            let entry = lookup(ch).unwrap_or_else(|| panic!("no entry for {ch}"));
            assert_eq!(entry.symbol, ch);
            assert!(!entry.sound_id.is_empty());
        }
    }

    #[test]
    fn lookup_case_insensitive() {
        for ch in 'a'..='z' {
            let lower = lookup(ch).expect("lowercase should resolve");
            let upper = lookup(ch.to_ascii_uppercase()).unwrap();
            assert_eq!(lower, upper);
        }
    }

    #[test]
    fn lookup_rejects_non_letters() {
        for ch in ['0', '9', '!', ' ', 'é', 'ß', '\n'] {
            assert!(lookup(ch).is_none(), "{ch:?} should not resolve");
        }
    }

    #[test]
    fn vowels_are_carrion_crow() {
        for ch in ['A', 'E', 'I', 'O', 'U'] {
            assert_eq!(lookup(ch).unwrap().species, "Carrion Crow");
        }
    }

    #[test]
    fn encode_hi_there() {
        let seq = encode("HI THERE");
        assert_eq!(seq.len(), 9);

        let expected = ['H', 'I'];
        for (item, ch) in seq[..2].iter().zip(expected) {
            match item {
                SequenceItem::Call { entry } => assert_eq!(entry.symbol, ch),
                SequenceItem::Pause => panic!("unexpected pause"),
            }
        }
        assert_eq!(seq[2], SequenceItem::Pause);

        let tail = ['T', 'H', 'E', 'R', 'E'];
        for (item, ch) in seq[3..].iter().zip(tail) {
            match item {
                SequenceItem::Call { entry } => assert_eq!(entry.symbol, ch),
                SequenceItem::Pause => panic!("unexpected pause"),
            }
        }
    }

    #[test]
    fn encode_one_pause_per_space() {
        let seq = encode("A  B");
        assert_eq!(
            seq.iter()
                .filter(|i| matches!(i, SequenceItem::Pause))
                .count(),
            2,
            "each space gets its own pause marker"
        );
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn encode_drops_unrecognized() {
        let seq = encode("H!3I?");
        assert_eq!(seq.len(), 2);
        assert!(seq.iter().all(|i| matches!(i, SequenceItem::Call { .. })));
    }

    #[test]
    fn encode_lowercase_input() {
        let seq = encode("hi");
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[0].sound_id(), Some("1025925"));
    }

    #[test]
    fn sequence_serializes_to_json() {
        let seq = encode("A B");
        let json = serde_json::to_string(&seq).unwrap();
        assert!(json.contains("\"kind\":\"call\""));
        assert!(json.contains("\"kind\":\"pause\""));
        assert!(json.contains("943486"));
    }
}
