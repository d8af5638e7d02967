//! Dubeolsik (2-set) keyboard layout.
//!
//! Consonants sit on the left hand and vowels on the right. A consonant key
//! gives the same glyph whether it ends up as a lead or a trailing consonant;
//! the composer decides which. Shift produces the five tense consonants and
//! the two ㅒ/ㅖ vowels; every other key is unchanged by shift.

use libhangul_core::Keymap;
use phf::phf_map;

static BASE: phf::Map<char, char> = phf_map! {
    'q' => 'ㅂ', 'w' => 'ㅈ', 'e' => 'ㄷ', 'r' => 'ㄱ', 't' => 'ㅅ',
    'a' => 'ㅁ', 's' => 'ㄴ', 'd' => 'ㅇ', 'f' => 'ㄹ', 'g' => 'ㅎ',
    'z' => 'ㅋ', 'x' => 'ㅌ', 'c' => 'ㅊ', 'v' => 'ㅍ',
    'y' => 'ㅛ', 'u' => 'ㅕ', 'i' => 'ㅑ', 'o' => 'ㅐ', 'p' => 'ㅔ',
    'h' => 'ㅗ', 'j' => 'ㅓ', 'k' => 'ㅏ', 'l' => 'ㅣ',
    'b' => 'ㅠ', 'n' => 'ㅜ', 'm' => 'ㅡ',
};

// Keyed by both cases: some hosts report shift+q as 'q', others as 'Q'.
static SHIFTED: phf::Map<char, char> = phf_map! {
    'Q' => 'ㅃ', 'W' => 'ㅉ', 'E' => 'ㄸ', 'R' => 'ㄲ', 'T' => 'ㅆ',
    'O' => 'ㅒ', 'P' => 'ㅖ',
    'q' => 'ㅃ', 'w' => 'ㅉ', 'e' => 'ㄸ', 'r' => 'ㄲ', 't' => 'ㅆ',
    'o' => 'ㅒ', 'p' => 'ㅖ',
};

/// Standard Korean 2-set layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dubeolsik;

impl Dubeolsik {
    pub fn new() -> Self {
        Self
    }

    /// Number of keys the base layer maps.
    pub fn key_count(&self) -> usize {
        BASE.len()
    }
}

impl Keymap for Dubeolsik {
    /// Shift layer first, then the lower-cased base layer. Caps lock without
    /// shift arrives as an upper-case key and lands on the base layer.
    fn resolve(&self, key: char, shift: bool) -> Option<char> {
        if shift {
            if let Some(&unit) = SHIFTED.get(&key) {
                return Some(unit);
            }
        }
        BASE.get(&key.to_ascii_lowercase()).copied()
    }
}
