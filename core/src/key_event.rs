//! Key events as delivered by a host text surface.
//!
//! Hosts report keys the way browsers do: a textual identifier that is a
//! single printable character for character keys and a name ("Backspace",
//! "ArrowLeft", ...) for everything else. `Key::from_identifier` converts
//! those identifiers into the typed form the dispatcher works with.

use std::fmt;

/// Non-character keys the dispatcher cares to tell apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Shift,
    Control,
    Alt,
    AltGraph,
    Meta,
    CapsLock,
    /// Any other multi-character identifier (F-keys, media keys, "Process", ...)
    Other(String),
}

impl NamedKey {
    fn from_name(name: &str) -> Self {
        match name {
            "Backspace" => NamedKey::Backspace,
            "Delete" => NamedKey::Delete,
            "Enter" => NamedKey::Enter,
            "Tab" => NamedKey::Tab,
            "Escape" | "Esc" => NamedKey::Escape,
            "ArrowLeft" | "Left" => NamedKey::ArrowLeft,
            "ArrowRight" | "Right" => NamedKey::ArrowRight,
            "ArrowUp" | "Up" => NamedKey::ArrowUp,
            "ArrowDown" | "Down" => NamedKey::ArrowDown,
            "Home" => NamedKey::Home,
            "End" => NamedKey::End,
            "PageUp" => NamedKey::PageUp,
            "PageDown" => NamedKey::PageDown,
            "Shift" => NamedKey::Shift,
            "Control" => NamedKey::Control,
            "Alt" => NamedKey::Alt,
            "AltGraph" => NamedKey::AltGraph,
            "Meta" | "OS" => NamedKey::Meta,
            "CapsLock" => NamedKey::CapsLock,
            other => NamedKey::Other(other.to_string()),
        }
    }

    fn name(&self) -> &str {
        match self {
            NamedKey::Backspace => "Backspace",
            NamedKey::Delete => "Delete",
            NamedKey::Enter => "Enter",
            NamedKey::Tab => "Tab",
            NamedKey::Escape => "Escape",
            NamedKey::ArrowLeft => "ArrowLeft",
            NamedKey::ArrowRight => "ArrowRight",
            NamedKey::ArrowUp => "ArrowUp",
            NamedKey::ArrowDown => "ArrowDown",
            NamedKey::Home => "Home",
            NamedKey::End => "End",
            NamedKey::PageUp => "PageUp",
            NamedKey::PageDown => "PageDown",
            NamedKey::Shift => "Shift",
            NamedKey::Control => "Control",
            NamedKey::Alt => "Alt",
            NamedKey::AltGraph => "AltGraph",
            NamedKey::Meta => "Meta",
            NamedKey::CapsLock => "CapsLock",
            NamedKey::Other(name) => name,
        }
    }
}

/// A key identifier: one printable character, or a named key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character, including space (' ')
    Character(char),
    /// Identifier longer than one character
    Named(NamedKey),
}

impl Key {
    /// Parse a browser-style key identifier.
    ///
    /// Exactly one char becomes `Key::Character`; anything else is a named key.
    /// An empty identifier is treated as an unknown named key.
    pub fn from_identifier(id: &str) -> Self {
        let mut chars = id.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Key::Character(ch),
            _ => Key::Named(NamedKey::from_name(id)),
        }
    }

    /// Whether this is the Shift modifier key itself.
    pub fn is_shift(&self) -> bool {
        matches!(self, Key::Named(NamedKey::Shift))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Character(' ') => f.write_str("Space"),
            Key::Character(ch) => write!(f, "{}", ch),
            Key::Named(named) => f.write_str(named.name()),
        }
    }
}

/// Modifier state carried by a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub alt_graph: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
        alt_graph: false,
    };

    /// Whether these modifiers turn the key into an editor shortcut.
    ///
    /// AltGraph, Ctrl (alone or with Alt) and Meta all qualify. Shift and
    /// Alt on their own do not.
    pub fn is_editor_shortcut(&self) -> bool {
        self.alt_graph || self.ctrl || self.meta
    }
}

/// One keydown delivered to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Auto-repeat from a held key
    pub repeat: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            repeat: false,
        }
    }

    /// Plain character key with no modifiers.
    pub fn char(ch: char) -> Self {
        Self::new(Key::Character(ch))
    }

    /// Named key with no modifiers.
    pub fn named(key: NamedKey) -> Self {
        Self::new(Key::Named(key))
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// A shortcut such as `Ctrl+Space`, parsed from configuration.
///
/// Matching requires every modifier named in the chord to be held; extra
/// modifiers on the event are ignored. Character keys match case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    key: Key,
    modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        let key = match key {
            Key::Character(ch) => Key::Character(ch.to_ascii_lowercase()),
            named => named,
        };
        Self { key, modifiers }
    }

    /// Parse `"Ctrl+Space"`, `"Alt+Shift+k"`, ... Tokens are separated by `+`;
    /// the last token is the key, `Space` naming the space bar.
    pub fn parse(shortcut: &str) -> Result<Self, String> {
        let tokens: Vec<&str> = shortcut.split('+').map(str::trim).collect();
        let Some((key_token, modifier_tokens)) = tokens.split_last() else {
            return Err("empty shortcut".to_string());
        };
        if key_token.is_empty() {
            return Err(format!("shortcut '{}' has no key", shortcut));
        }

        let mut modifiers = Modifiers::NONE;
        for token in modifier_tokens {
            match token.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "meta" | "cmd" | "super" => modifiers.meta = true,
                "altgraph" | "altgr" => modifiers.alt_graph = true,
                other => return Err(format!("unknown modifier '{}' in '{}'", other, shortcut)),
            }
        }

        let key = if key_token.eq_ignore_ascii_case("space") {
            Key::Character(' ')
        } else {
            Key::from_identifier(key_token)
        };
        Ok(Self::new(key, modifiers))
    }

    /// Check whether a key event triggers this chord.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let held = event.modifiers;
        let wanted = self.modifiers;
        let modifiers_ok = (!wanted.ctrl || held.ctrl)
            && (!wanted.alt || held.alt)
            && (!wanted.shift || held.shift)
            && (!wanted.meta || held.meta)
            && (!wanted.alt_graph || held.alt_graph);
        if !modifiers_ok {
            return false;
        }
        match (&self.key, &event.key) {
            (Key::Character(a), Key::Character(b)) => *a == b.to_ascii_lowercase(),
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.modifiers;
        for (held, name) in [
            (m.ctrl, "Ctrl"),
            (m.alt, "Alt"),
            (m.alt_graph, "AltGraph"),
            (m.meta, "Meta"),
            (m.shift, "Shift"),
        ] {
            if held {
                write!(f, "{}+", name)?;
            }
        }
        write!(f, "{}", self.key)
    }
}
