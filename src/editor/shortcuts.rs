// SPDX-License-Identifier: MPL-2.0
//! Keyboard shortcut table for the editor.
//!
//! | Chord                 | Action                      |
//! |-----------------------|-----------------------------|
//! | primary + Z           | undo                        |
//! | primary + Shift + Z   | redo                        |
//! | primary + S           | export with default options |
//! | primary + R           | reset                       |
//!
//! "primary" is Ctrl on Linux/Windows and Cmd on macOS; the input layer
//! decides which physical modifier sets it. Keys match case-insensitively and
//! any chord holding Alt is ignored.

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: char,
    pub primary: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyChord {
    /// A bare key press with no modifiers.
    #[must_use]
    pub fn new(key: char) -> Self {
        Self {
            key,
            primary: false,
            shift: false,
            alt: false,
        }
    }

    /// The key with the primary modifier held.
    #[must_use]
    pub fn primary(key: char) -> Self {
        Self::new(key).with_primary()
    }

    #[must_use]
    pub fn with_primary(mut self) -> Self {
        self.primary = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

/// Editor actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    Undo,
    Redo,
    Export,
    Reset,
}

impl Shortcut {
    /// Looks `chord` up in the shortcut table.
    #[must_use]
    pub fn from_chord(chord: &KeyChord) -> Option<Self> {
        if !chord.primary || chord.alt {
            return None;
        }
        match (chord.key.to_ascii_lowercase(), chord.shift) {
            ('z', false) => Some(Shortcut::Undo),
            ('z', true) => Some(Shortcut::Redo),
            ('s', false) => Some(Shortcut::Export),
            ('r', false) => Some(Shortcut::Reset),
            _ => None,
        }
    }

    /// The canonical chord for this action.
    #[must_use]
    pub fn chord(self) -> KeyChord {
        match self {
            Shortcut::Undo => KeyChord::primary('z'),
            Shortcut::Redo => KeyChord::primary('z').with_shift(),
            Shortcut::Export => KeyChord::primary('s'),
            Shortcut::Reset => KeyChord::primary('r'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches() {
        assert_eq!(Shortcut::from_chord(&KeyChord::primary('z')), Some(Shortcut::Undo));
        assert_eq!(
            Shortcut::from_chord(&KeyChord::primary('z').with_shift()),
            Some(Shortcut::Redo)
        );
        assert_eq!(Shortcut::from_chord(&KeyChord::primary('s')), Some(Shortcut::Export));
        assert_eq!(Shortcut::from_chord(&KeyChord::primary('r')), Some(Shortcut::Reset));
    }

    #[test]
    fn keys_are_case_insensitive() {
        // Shift often reports the uppercase letter
        assert_eq!(
            Shortcut::from_chord(&KeyChord::primary('Z').with_shift()),
            Some(Shortcut::Redo)
        );
        assert_eq!(Shortcut::from_chord(&KeyChord::primary('S')), Some(Shortcut::Export));
    }

    #[test]
    fn chords_without_primary_do_nothing() {
        assert_eq!(Shortcut::from_chord(&KeyChord::new('z')), None);
        assert_eq!(Shortcut::from_chord(&KeyChord::new('s').with_shift()), None);
    }

    #[test]
    fn alt_chords_never_match() {
        assert_eq!(Shortcut::from_chord(&KeyChord::primary('z').with_alt()), None);
        assert_eq!(Shortcut::from_chord(&KeyChord::primary('r').with_alt()), None);
    }

    #[test]
    fn shift_only_distinguishes_undo_and_redo() {
        assert_eq!(Shortcut::from_chord(&KeyChord::primary('s').with_shift()), None);
        assert_eq!(Shortcut::from_chord(&KeyChord::primary('r').with_shift()), None);
        assert_eq!(Shortcut::from_chord(&KeyChord::primary('x')), None);
    }

    #[test]
    fn canonical_chords_round_trip() {
        for shortcut in [Shortcut::Undo, Shortcut::Redo, Shortcut::Export, Shortcut::Reset] {
            assert_eq!(Shortcut::from_chord(&shortcut.chord()), Some(shortcut));
        }
    }
}
