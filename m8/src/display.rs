//! Helpers for turning raw bytes into the strings the device shows

/// The placeholder for a byte that has no name in a lookup table, e.g. `UNK (1F)`
pub fn unknown(byte: u8) -> String {
    format!("UNK ({byte:02X})")
}

/// Look a byte up in a table of names, falling back to [`unknown`]
pub fn lookup(table: &[&str], byte: u8) -> String {
    table
        .get(byte as usize)
        .map(|name| (*name).to_owned())
        .unwrap_or_else(|| unknown(byte))
}

/// Two upper-case hex digits
pub fn hex(byte: u8) -> String {
    format!("{byte:02X}")
}

/// A value the device shows as `--` when unset (`0xFF`), hex otherwise
pub fn hex_or_empty(byte: u8) -> String {
    match byte {
        0xFF => "--".to_owned(),
        byte => hex(byte),
    }
}

/// The twelve note names, padded to two characters
pub const NOTE_NAMES: [&str; 12] = [
    "C-", "C#", "D-", "D#", "E-", "F-", "F#", "G-", "G#", "A-", "A#", "B-",
];

/// The byte the device uses for "no note"
pub const NOTE_EMPTY: u8 = 0xFF;

/// The byte the device uses for a note-off
pub const NOTE_OFF: u8 = 0x80;

/// Render a note byte as name + octave, e.g. `C-4` or `A#B`
///
/// Octaves start at 1 and are shown as a single hex digit.
pub fn note_to_str(note: u8) -> String {
    match note {
        NOTE_EMPTY => "---".to_owned(),
        NOTE_OFF => "OFF".to_owned(),
        note if note < NOTE_OFF => {
            format!("{}{:X}", NOTE_NAMES[(note % 12) as usize], note / 12 + 1)
        }
        note => unknown(note),
    }
}

/// Render a key (root note) byte, e.g. `C` or `F#`
pub fn key_to_str(key: u8) -> String {
    NOTE_NAMES[(key % 12) as usize]
        .trim_end_matches('-')
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups() {
        assert_eq!(lookup(&["OFF", "ON"], 1), "ON");
        assert_eq!(lookup(&["OFF", "ON"], 0xFF), "UNK (FF)");
        assert_eq!(lookup(&[], 0x0C), "UNK (0C)");
        assert_eq!(hex_or_empty(0xFF), "--");
        assert_eq!(hex_or_empty(0x0A), "0A");
    }

    #[test]
    fn notes() {
        assert_eq!(note_to_str(0), "C-1");
        assert_eq!(note_to_str(37), "C#4");
        assert_eq!(note_to_str(0x7F), "G-B");
        assert_eq!(note_to_str(NOTE_OFF), "OFF");
        assert_eq!(note_to_str(NOTE_EMPTY), "---");
        assert_eq!(note_to_str(0x90), "UNK (90)");

        assert_eq!(key_to_str(0), "C");
        assert_eq!(key_to_str(13), "C#");
    }
}
