//! libhangul-core
//!
//! Language-agnostic plumbing shared by phonetic input engines: the text
//! field model, key events, the per-surface session, the composer/keymap
//! seams and the key dispatcher built on them.
//!
//! Public API:
//! - `TextField` / `FieldEdit` - Field snapshot in, field mutation out
//! - `KeyEvent` / `KeyChord` - Host key events and configurable shortcuts
//! - `ImeSession` - Mode and removal granularity for one input surface
//! - `Composer` / `Keymap` - Traits a language crate implements
//! - `Engine` - Smart insert and unit-aware backspace over any composer
//! - `ImeEngine` - Key dispatcher deciding intercept vs pass-through
//! - `Config` - Configuration and feature flags
use serde::{Deserialize, Serialize};

pub mod text_field;
pub use text_field::{FieldEdit, FieldKind, Selection, TextField};

pub mod key_event;
pub use key_event::{Key, KeyChord, KeyEvent, Modifiers, NamedKey};

pub mod session;
pub use session::{ImeSession, InputMode, RemovalGranularity, ResetCause};

pub mod engine;
pub use engine::{Composer, Engine, Keymap};

pub mod ime_engine;
pub use ime_engine::{ImeEngine, KeyResult};

/// Shortcut used when the configured one is missing or malformed.
pub const DEFAULT_TOGGLE_SHORTCUT: &str = "Ctrl+Space";

/// Generic configuration for IME core functionality.
///
/// Language-specific options (keyboard layouts, ...) belong in the language
/// crate's config, which flattens this one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Chord that toggles composition on and off (e.g. "Ctrl+Space")
    pub toggle_shortcut: String,

    /// Start new input surfaces in active mode
    pub start_active: bool,

    /// Reset removal granularity on any pointer press
    pub reset_on_pointer_down: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toggle_shortcut: DEFAULT_TOGGLE_SHORTCUT.to_string(),
            start_active: false,
            reset_on_pointer_down: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Parse the toggle shortcut, falling back to `Ctrl+Space`.
    pub fn toggle_chord(&self) -> KeyChord {
        match KeyChord::parse(&self.toggle_shortcut) {
            Ok(chord) => chord,
            Err(e) => {
                tracing::warn!(
                    shortcut = %self.toggle_shortcut,
                    error = %e,
                    "invalid toggle shortcut, using default"
                );
                Self::default_chord()
            }
        }
    }

    fn default_chord() -> KeyChord {
        let modifiers = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        KeyChord::new(Key::Character(' '), modifiers)
    }
}
