//! Hangul composition and decomposition.
//!
//! `compose` folds a run of jamo and syllable blocks left to right. At each
//! step the last output scalar (the accumulator) is tried against the next
//! input scalar, in this order:
//!
//! 1. lead + vowel becomes an open block
//! 2. vowel + vowel becomes a compound vowel
//! 3. open block + trailing consonant closes the block
//! 4. open block + vowel extends the block's vowel into a compound
//! 5. closed block + vowel moves the trailing consonant (or the second half
//!    of a compound final) into a new block
//! 6. closed block + trailing consonant forms a compound final
//! 7. otherwise the next scalar is appended as is
//!
//! Lookups that miss fall through to the next rule, so unknown scalars
//! simply end up appended.

use crate::jamo::{self, Syllable, VOWELS};
use libhangul_core::Composer;

/// Outcome of trying one scalar against the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Accumulator becomes this scalar
    Replace(char),
    /// Accumulator becomes the first scalar and the second is appended
    Split(char, char),
    /// No rule applies
    Append,
}

fn step(acc: char, next: char) -> Step {
    let next_vowel = jamo::vowel_index(next);

    if let (Some(lead), Some(vowel)) = (jamo::lead_index(acc), next_vowel) {
        if let Some(block) = Syllable::new(lead, vowel, 0) {
            return Step::Replace(block.to_char());
        }
    }

    if let (Some(first), Some(second)) = (jamo::vowel_index(acc), next_vowel) {
        if let Some(compound) = jamo::compound_vowel(first, second) {
            return Step::Replace(VOWELS[compound]);
        }
    }

    let Some(block) = Syllable::from_char(acc) else {
        return Step::Append;
    };

    if !block.has_trailing() {
        if let Some(closed) = jamo::trailing_index(next).and_then(|t| block.with_trailing(t)) {
            return Step::Replace(closed.to_char());
        }
        if let Some(extended) = next_vowel
            .and_then(|v| jamo::compound_vowel(block.vowel(), v))
            .and_then(|v| block.with_vowel(v))
        {
            return Step::Replace(extended.to_char());
        }
        return Step::Append;
    }

    if let Some(vowel) = next_vowel {
        if let Some(split) = move_trailing(block, vowel) {
            return split;
        }
    }

    if let Some(merged) = jamo::trailing_index(next)
        .and_then(|t| jamo::compound_final(block.trailing(), t))
        .and_then(|t| block.with_trailing(t))
    {
        return Step::Replace(merged.to_char());
    }

    Step::Append
}

/// Rule 5: hand the trailing consonant of `block` to a new block opened by `vowel`.
fn move_trailing(block: Syllable, vowel: usize) -> Option<Step> {
    let (kept, moved) = match jamo::trailing_as_lead(block.trailing()) {
        Some(lead) => (0, lead),
        None => {
            let (first, second) = jamo::split_final(block.trailing())?;
            (first, jamo::trailing_as_lead(second)?)
        }
    };
    let rest = block.with_trailing(kept)?;
    let opened = Syllable::new(moved, vowel, 0)?;
    Some(Step::Split(rest.to_char(), opened.to_char()))
}

/// Korean composer over the fixed jamo tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HangulComposer;

impl HangulComposer {
    pub fn new() -> Self {
        Self
    }
}

impl Composer for HangulComposer {
    fn compose(&self, units: &[char]) -> Vec<char> {
        let mut out: Vec<char> = Vec::with_capacity(units.len());
        for &next in units {
            let Some(acc) = out.last_mut() else {
                out.push(next);
                continue;
            };
            match step(*acc, next) {
                Step::Replace(ch) => *acc = ch,
                Step::Split(rest, opened) => {
                    *acc = rest;
                    out.push(opened);
                }
                Step::Append => out.push(next),
            }
        }
        out
    }

    fn decompose(&self, text: &[char]) -> Vec<char> {
        let mut out = Vec::with_capacity(text.len() * 3);
        for &ch in text {
            match Syllable::from_char(ch) {
                Some(block) => out.extend(block.units()),
                None => out.push(ch),
            }
        }
        out
    }
}

/// Compose a string of jamo and blocks.
pub fn compose_str(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    HangulComposer.compose(&chars).into_iter().collect()
}

/// Decompose every syllable block of a string into jamo.
pub fn decompose_str(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    HangulComposer.decompose(&chars).into_iter().collect()
}
