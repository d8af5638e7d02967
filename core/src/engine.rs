// core/src/engine.rs
//
// Generic composition backend that works with any composer and keymap.
// Language crates supply the tables; the insert/backspace policy lives here.

use crate::session::{ImeSession, RemovalGranularity, ResetCause};
use crate::text_field::FieldEdit;

/// Longest trailing window `smart_insert` tries to recompose.
pub const MAX_WINDOW: usize = 4;
/// Shortest window worth composing (a lone unit never changes).
pub const MIN_WINDOW: usize = 2;

/// Trait that composers must implement to work with the generic Engine.
///
/// Both operations are pure and total: scalars the composer does not know
/// pass through unchanged.
pub trait Composer {
    /// Fold a run of phonetic units and blocks into the fewest scalars.
    fn compose(&self, units: &[char]) -> Vec<char>;

    /// Split every composed block back into its phonetic units.
    fn decompose(&self, text: &[char]) -> Vec<char>;
}

/// Trait for keyboard layouts mapping a physical key to a phonetic unit.
pub trait Keymap {
    /// Resolve a single-character key. `None` means the key is not a
    /// phonetic key and must pass through.
    fn resolve(&self, key: char, shift: bool) -> Option<char>;
}

/// Composer + keymap pair implementing insertion and removal.
#[derive(Debug, Clone, Default)]
pub struct Engine<C, K> {
    composer: C,
    keymap: K,
}

impl<C: Composer, K: Keymap> Engine<C, K> {
    pub fn new(composer: C, keymap: K) -> Self {
        Self { composer, keymap }
    }

    /// Resolve a key through the keymap.
    pub fn resolve(&self, key: char, shift: bool) -> Option<char> {
        self.keymap.resolve(key, shift)
    }

    pub fn compose(&self, units: &[char]) -> Vec<char> {
        self.composer.compose(units)
    }

    pub fn decompose(&self, text: &[char]) -> Vec<char> {
        self.composer.decompose(text)
    }

    /// Insert `unit` over the selection `start..end` and recompose around it.
    ///
    /// After the insert, the 4, 3 and then 2 scalars ending at the new caret
    /// are composed in turn. The first window whose composition differs from
    /// the raw window is replaced and the caret lands right after the
    /// replacement. If none differs the unit stays standalone.
    ///
    /// Positions are char indices; they are clamped into the text and ordered.
    pub fn smart_insert(&self, text: &str, start: usize, end: usize, unit: char) -> FieldEdit {
        let mut chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let (a, b) = (start.min(len), end.min(len));
        let (start, end) = (a.min(b), a.max(b));

        chars.splice(start..end, std::iter::once(unit));
        let caret = start + 1;

        for window in (MIN_WINDOW..=MAX_WINDOW.min(caret)).rev() {
            let from = caret - window;
            let composed = self.composer.compose(&chars[from..caret]);
            if composed.as_slice() != &chars[from..caret] {
                let new_caret = from + composed.len();
                chars.splice(from..caret, composed);
                return FieldEdit::new(chars.into_iter().collect::<String>(), new_caret);
            }
        }

        FieldEdit::new(chars.into_iter().collect::<String>(), caret)
    }

    /// Remove one step of text from the end of `before` (the text strictly
    /// before a collapsed caret) and return what remains.
    ///
    /// With `Syllable` removal the last scalar goes. With `Jamo` removal the
    /// last scalar is decomposed, its final unit dropped and the rest
    /// recomposed; a scalar that does not decompose is dropped whole and
    /// removal returns to `Syllable`. An empty `before` is left unchanged.
    pub fn backspace(&self, before: &str, session: &mut ImeSession) -> String {
        let mut chars: Vec<char> = before.chars().collect();
        let Some(last) = chars.pop() else {
            return String::new();
        };

        if session.removal() == RemovalGranularity::Jamo {
            let mut units = self.composer.decompose(&[last]);
            if units.len() > 1 {
                units.pop();
                let recomposed = self.composer.compose(&units);
                if recomposed.is_empty() {
                    session.reset_removal(ResetCause::BlockEmptied);
                }
                chars.extend(recomposed);
            } else {
                session.reset_removal(ResetCause::BlockEmptied);
            }
        }

        chars.into_iter().collect()
    }
}
