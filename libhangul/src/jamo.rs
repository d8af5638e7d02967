//! Hangul jamo tables and syllable block arithmetic.
//!
//! Phonetic units are Hangul compatibility jamo (U+3131..U+3163). A
//! precomposed syllable block encodes its parts algebraically:
//!
//! ```text
//! block = SYLLABLE_BASE + (lead * VOWEL_COUNT + vowel) * TRAILING_COUNT + trailing
//! ```
//!
//! The table positions below are those indices, so they must never be
//! reordered.

/// First precomposed syllable (가).
pub const SYLLABLE_BASE: u32 = 0xAC00;
pub const LEAD_COUNT: usize = 19;
pub const VOWEL_COUNT: usize = 21;
/// Trailing consonants, including the "none" slot at index 0.
pub const TRAILING_COUNT: usize = 28;
/// Number of precomposed syllables.
pub const SYLLABLE_COUNT: usize = LEAD_COUNT * VOWEL_COUNT * TRAILING_COUNT;

/// Lead consonants in encoding order.
pub const LEADS: [char; LEAD_COUNT] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Vowels in encoding order. Contiguous in the compatibility block.
pub const VOWELS: [char; VOWEL_COUNT] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ',
    'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Trailing consonants in encoding order; index 0 is "no trailing consonant".
pub const TRAILINGS: [Option<char>; TRAILING_COUNT] = [
    None,
    Some('ㄱ'),
    Some('ㄲ'),
    Some('ㄳ'),
    Some('ㄴ'),
    Some('ㄵ'),
    Some('ㄶ'),
    Some('ㄷ'),
    Some('ㄹ'),
    Some('ㄺ'),
    Some('ㄻ'),
    Some('ㄼ'),
    Some('ㄽ'),
    Some('ㄾ'),
    Some('ㄿ'),
    Some('ㅀ'),
    Some('ㅁ'),
    Some('ㅂ'),
    Some('ㅄ'),
    Some('ㅅ'),
    Some('ㅆ'),
    Some('ㅇ'),
    Some('ㅈ'),
    Some('ㅊ'),
    Some('ㅋ'),
    Some('ㅌ'),
    Some('ㅍ'),
    Some('ㅎ'),
];

/// (first vowel, second vowel, compound vowel), by vowel index.
pub const COMPOUND_VOWELS: [(usize, usize, usize); 7] = [
    (8, 0, 9),    // ㅗ ㅏ ㅘ
    (8, 1, 10),   // ㅗ ㅐ ㅙ
    (8, 20, 11),  // ㅗ ㅣ ㅚ
    (13, 4, 14),  // ㅜ ㅓ ㅝ
    (13, 5, 15),  // ㅜ ㅔ ㅞ
    (13, 20, 16), // ㅜ ㅣ ㅟ
    (18, 20, 19), // ㅡ ㅣ ㅢ
];

/// (first final, second final, compound final), by trailing index.
pub const COMPOUND_FINALS: [(usize, usize, usize); 11] = [
    (1, 19, 3),   // ㄱ ㅅ ㄳ
    (4, 22, 5),   // ㄴ ㅈ ㄵ
    (4, 27, 6),   // ㄴ ㅎ ㄶ
    (8, 1, 9),    // ㄹ ㄱ ㄺ
    (8, 16, 10),  // ㄹ ㅁ ㄻ
    (8, 17, 11),  // ㄹ ㅂ ㄼ
    (8, 19, 12),  // ㄹ ㅅ ㄽ
    (8, 25, 13),  // ㄹ ㅌ ㄾ
    (8, 26, 14),  // ㄹ ㅍ ㄿ
    (8, 27, 15),  // ㄹ ㅎ ㅀ
    (17, 19, 18), // ㅂ ㅅ ㅄ
];

/// Index of `ch` among lead consonants.
pub fn lead_index(ch: char) -> Option<usize> {
    LEADS.iter().position(|&lead| lead == ch)
}

/// Index of `ch` among vowels.
pub fn vowel_index(ch: char) -> Option<usize> {
    let offset = (ch as u32).checked_sub(VOWELS[0] as u32)? as usize;
    (offset < VOWEL_COUNT).then_some(offset)
}

/// Index of `ch` among trailing consonants (never 0).
pub fn trailing_index(ch: char) -> Option<usize> {
    TRAILINGS.iter().position(|&t| t == Some(ch))
}

/// Lead index of the consonant written by trailing index `trailing`, if that
/// consonant can also start a syllable.
pub fn trailing_as_lead(trailing: usize) -> Option<usize> {
    TRAILINGS.get(trailing).copied().flatten().and_then(lead_index)
}

/// Compound vowel formed by two vowel indices.
pub fn compound_vowel(first: usize, second: usize) -> Option<usize> {
    COMPOUND_VOWELS
        .iter()
        .find(|&&(a, b, _)| a == first && b == second)
        .map(|&(_, _, c)| c)
}

/// Compound final formed by two trailing indices.
pub fn compound_final(first: usize, second: usize) -> Option<usize> {
    COMPOUND_FINALS
        .iter()
        .find(|&&(a, b, _)| a == first && b == second)
        .map(|&(_, _, c)| c)
}

/// Split a compound final into its two trailing indices.
pub fn split_final(compound: usize) -> Option<(usize, usize)> {
    COMPOUND_FINALS
        .iter()
        .find(|&&(_, _, c)| c == compound)
        .map(|&(a, b, _)| (a, b))
}

pub fn is_lead(ch: char) -> bool {
    lead_index(ch).is_some()
}

pub fn is_vowel(ch: char) -> bool {
    vowel_index(ch).is_some()
}

/// Whether `ch` is a standalone phonetic unit (lead, vowel or final).
pub fn is_jamo(ch: char) -> bool {
    is_lead(ch) || is_vowel(ch) || trailing_index(ch).is_some()
}

/// A precomposed syllable block split into table indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Syllable {
    lead: usize,
    vowel: usize,
    trailing: usize,
}

impl Syllable {
    /// Build a block from indices; `None` if any index is out of its table.
    pub fn new(lead: usize, vowel: usize, trailing: usize) -> Option<Self> {
        (lead < LEAD_COUNT && vowel < VOWEL_COUNT && trailing < TRAILING_COUNT).then_some(Self {
            lead,
            vowel,
            trailing,
        })
    }

    /// Decode a precomposed block. Anything outside the syllable range is `None`.
    pub fn from_char(ch: char) -> Option<Self> {
        let offset = (ch as u32).checked_sub(SYLLABLE_BASE)? as usize;
        if offset >= SYLLABLE_COUNT {
            return None;
        }
        Some(Self {
            lead: offset / (VOWEL_COUNT * TRAILING_COUNT),
            vowel: (offset / TRAILING_COUNT) % VOWEL_COUNT,
            trailing: offset % TRAILING_COUNT,
        })
    }

    /// Encode back into a precomposed block.
    pub fn to_char(self) -> char {
        let offset = (self.lead * VOWEL_COUNT + self.vowel) * TRAILING_COUNT + self.trailing;
        // indices are bounded by construction, so the code point is always
        // inside U+AC00..=U+D7A3
        char::from_u32(SYLLABLE_BASE + offset as u32).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    pub fn lead(&self) -> usize {
        self.lead
    }

    pub fn vowel(&self) -> usize {
        self.vowel
    }

    pub fn trailing(&self) -> usize {
        self.trailing
    }

    pub fn has_trailing(&self) -> bool {
        self.trailing != 0
    }

    /// Same block with another trailing index (0 removes it).
    pub fn with_trailing(self, trailing: usize) -> Option<Self> {
        Self::new(self.lead, self.vowel, trailing)
    }

    /// Same block with another vowel index.
    pub fn with_vowel(self, vowel: usize) -> Option<Self> {
        Self::new(self.lead, vowel, self.trailing)
    }

    /// The standalone units of this block, in typing order.
    pub fn units(&self) -> impl Iterator<Item = char> {
        [Some(LEADS[self.lead]), Some(VOWELS[self.vowel]), TRAILINGS[self.trailing]]
            .into_iter()
            .flatten()
    }
}
