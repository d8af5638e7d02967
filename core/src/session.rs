//! IME session state.
//!
//! `ImeSession` is the only state carried between keystrokes: whether the
//! engine is composing at all, and how the next backspace removes text.
//! One session belongs to one input surface. It is never persisted and a
//! fresh one is built whenever the owning surface is recreated.

use std::fmt;

/// Whether the engine intercepts keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are resolved and composed
    Active,
    /// Every key passes through to the field untouched
    #[default]
    Inactive,
}

/// How much text a collapsed-caret backspace removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalGranularity {
    /// One whole scalar (a finished syllable block)
    #[default]
    Syllable,
    /// One phonetic unit out of the block being composed
    Jamo,
}

/// Why removal granularity went back to `Syllable`. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetCause {
    SelectionDelete,
    Space,
    NonCharacterKey,
    ModeChange,
    PointerDown,
    BlockEmptied,
    Explicit,
}

impl fmt::Display for ResetCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResetCause::SelectionDelete => "selection delete",
            ResetCause::Space => "space",
            ResetCause::NonCharacterKey => "non-character key",
            ResetCause::ModeChange => "mode change",
            ResetCause::PointerDown => "pointer down",
            ResetCause::BlockEmptied => "block emptied",
            ResetCause::Explicit => "explicit",
        };
        f.write_str(s)
    }
}

/// Mode plus removal granularity for one input surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImeSession {
    mode: InputMode,
    removal: RemovalGranularity,
}

impl ImeSession {
    /// Create an inactive session with syllable removal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session starting in the given mode.
    pub fn with_mode(mode: InputMode) -> Self {
        Self {
            mode,
            removal: RemovalGranularity::Syllable,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode == InputMode::Active
    }

    /// Set the mode. Returns true if it changed; a change also resets removal.
    pub fn set_mode(&mut self, mode: InputMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.reset_removal(ResetCause::ModeChange);
        true
    }

    pub fn removal(&self) -> RemovalGranularity {
        self.removal
    }

    /// Switch to jamo-level removal while a block is being composed.
    pub fn enter_jamo_removal(&mut self) {
        self.removal = RemovalGranularity::Jamo;
    }

    /// Return to whole-syllable removal.
    pub fn reset_removal(&mut self, cause: ResetCause) {
        if self.removal != RemovalGranularity::Syllable {
            tracing::debug!(%cause, "removal granularity reset to syllable");
        }
        self.removal = RemovalGranularity::Syllable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = ImeSession::new();
        assert_eq!(session.mode(), InputMode::Inactive);
        assert!(!session.is_active());
        assert_eq!(session.removal(), RemovalGranularity::Syllable);
    }

    #[test]
    fn test_mode_change_resets_removal() {
        let mut session = ImeSession::with_mode(InputMode::Active);
        session.enter_jamo_removal();
        assert_eq!(session.removal(), RemovalGranularity::Jamo);

        assert!(!session.set_mode(InputMode::Active));
        assert_eq!(session.removal(), RemovalGranularity::Jamo);

        assert!(session.set_mode(InputMode::Inactive));
        assert_eq!(session.removal(), RemovalGranularity::Syllable);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut session = ImeSession::new();
        session.reset_removal(ResetCause::Space);
        session.reset_removal(ResetCause::Space);
        assert_eq!(session.removal(), RemovalGranularity::Syllable);
    }
}
