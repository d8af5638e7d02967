//! IME engine with session management and key event dispatch.
//!
//! The `ImeEngine` wraps the backend `Engine` with an `ImeSession` and
//! decides, for every keydown on a field, whether the key is intercepted and
//! what the field should look like afterwards. It never touches the host
//! widget itself: the host applies the returned `FieldEdit`.
//!
//! Decision order for one key:
//!
//! 1. The toggle chord (not auto-repeated) flips the mode and is consumed.
//! 2. Inactive mode, non-text targets and editor shortcuts pass through.
//! 3. Backspace is consumed: range delete, or one removal step before the caret.
//! 4. Space is consumed and inserted literally.
//! 5. Other named keys (except Shift) pass through and reset removal.
//! 6. Characters the keymap resolves are consumed and composed.
//! 7. Everything else passes through untouched.

use crate::engine::{Composer, Engine, Keymap};
use crate::key_event::{Key, KeyChord, KeyEvent, NamedKey};
use crate::session::{ImeSession, InputMode, ResetCause};
use crate::text_field::{FieldEdit, TextField};
use crate::Config;

/// Result of processing a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was consumed by the IME; the host must suppress its default
    /// action and apply the edit, if any
    Handled(Option<FieldEdit>),
    /// Key was not handled (pass through to application)
    NotHandled,
}

impl KeyResult {
    /// Whether the host should prevent the key's default action.
    pub fn intercepted(&self) -> bool {
        matches!(self, KeyResult::Handled(_))
    }

    /// The field mutation to write back, if any.
    pub fn edit(&self) -> Option<&FieldEdit> {
        match self {
            KeyResult::Handled(edit) => edit.as_ref(),
            KeyResult::NotHandled => None,
        }
    }
}

/// Key dispatcher for one input surface.
pub struct ImeEngine<C, K> {
    backend: Engine<C, K>,
    session: ImeSession,
    toggle: KeyChord,
    reset_on_pointer_down: bool,
}

impl<C: Composer, K: Keymap> ImeEngine<C, K> {
    /// Create an IME engine with the default configuration.
    pub fn new(backend: Engine<C, K>) -> Self {
        Self::with_config(backend, &Config::default())
    }

    /// Create an IME engine honoring `config`.
    pub fn with_config(backend: Engine<C, K>, config: &Config) -> Self {
        let mode = if config.start_active {
            InputMode::Active
        } else {
            InputMode::Inactive
        };
        Self {
            backend,
            session: ImeSession::with_mode(mode),
            toggle: config.toggle_chord(),
            reset_on_pointer_down: config.reset_on_pointer_down,
        }
    }

    /// Get a reference to the composition backend.
    pub fn backend(&self) -> &Engine<C, K> {
        &self.backend
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &ImeSession {
        &self.session
    }

    /// The chord that toggles the mode.
    pub fn toggle_chord(&self) -> &KeyChord {
        &self.toggle
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Switch composition on or off. Setting the current mode again is a no-op.
    pub fn set_active(&mut self, active: bool) {
        let mode = if active {
            InputMode::Active
        } else {
            InputMode::Inactive
        };
        if self.session.set_mode(mode) {
            tracing::debug!(?mode, "input mode changed");
        }
    }

    /// Flip between active and inactive.
    pub fn toggle_mode(&mut self) {
        let active = self.is_active();
        self.set_active(!active);
    }

    /// Return removal to whole-syllable granularity.
    pub fn reset(&mut self) {
        self.session.reset_removal(ResetCause::Explicit);
    }

    /// A pointer was pressed somewhere; stale jamo removal must not survive it.
    pub fn pointer_down(&mut self) {
        if self.reset_on_pointer_down {
            self.session.reset_removal(ResetCause::PointerDown);
        }
    }

    /// Process a keydown targeting `field`.
    ///
    /// Returns `KeyResult::Handled` if the IME consumed the key, or
    /// `KeyResult::NotHandled` if it should reach the field unchanged.
    pub fn process_key(&mut self, event: &KeyEvent, field: &TextField) -> KeyResult {
        if !event.repeat && self.toggle.matches(event) {
            self.toggle_mode();
            return KeyResult::Handled(None);
        }

        if !self.session.is_active()
            || !field.kind().accepts_text()
            || event.modifiers.is_editor_shortcut()
        {
            return KeyResult::NotHandled;
        }

        match &event.key {
            Key::Named(NamedKey::Backspace) => KeyResult::Handled(self.backspace(field)),
            Key::Character(' ') => KeyResult::Handled(Some(self.insert_space(field))),
            key if key.is_shift() => KeyResult::NotHandled,
            Key::Named(_) => {
                self.session.reset_removal(ResetCause::NonCharacterKey);
                KeyResult::NotHandled
            }
            Key::Character(ch) => match self.backend.resolve(*ch, event.modifiers.shift) {
                Some(unit) => {
                    let selection = field.selection();
                    let edit =
                        self.backend
                            .smart_insert(field.text(), selection.start, selection.end, unit);
                    self.session.enter_jamo_removal();
                    tracing::trace!(key = %ch, %unit, caret = edit.caret, "composed key");
                    KeyResult::Handled(Some(edit))
                }
                None => KeyResult::NotHandled,
            },
        }
    }

    fn backspace(&mut self, field: &TextField) -> Option<FieldEdit> {
        let selection = field.selection();

        if !selection.is_collapsed() {
            let mut text = field.text_before(selection.start).to_string();
            text.push_str(field.text_after(selection.end));
            self.session.reset_removal(ResetCause::SelectionDelete);
            return Some(FieldEdit::new(text, selection.start));
        }

        if selection.start == 0 {
            return None;
        }

        let before = field.text_before(selection.start);
        let mut text = self.backend.backspace(before, &mut self.session);
        let caret = text.chars().count();
        text.push_str(field.text_after(selection.start));
        tracing::trace!(caret, removal = ?self.session.removal(), "backspace");
        Some(FieldEdit::new(text, caret))
    }

    fn insert_space(&mut self, field: &TextField) -> FieldEdit {
        let selection = field.selection();
        let mut text = field.text_before(selection.start).to_string();
        text.push(' ');
        text.push_str(field.text_after(selection.end));
        self.session.reset_removal(ResetCause::Space);
        FieldEdit::new(text, selection.start + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_event::Modifiers;
    use crate::session::RemovalGranularity;

    // Composer that merges "ab" into 'c' and splits 'c' back.
    struct TestComposer;

    impl Composer for TestComposer {
        fn compose(&self, units: &[char]) -> Vec<char> {
            let mut out: Vec<char> = Vec::new();
            for &next in units {
                if out.last() == Some(&'a') && next == 'b' {
                    out.pop();
                    out.push('c');
                } else {
                    out.push(next);
                }
            }
            out
        }

        fn decompose(&self, text: &[char]) -> Vec<char> {
            text.iter()
                .flat_map(|&ch| if ch == 'c' { vec!['a', 'b'] } else { vec![ch] })
                .collect()
        }
    }

    // Maps 'a' and 'b' (shift: 'A' -> 'b').
    struct TestKeymap;

    impl Keymap for TestKeymap {
        fn resolve(&self, key: char, shift: bool) -> Option<char> {
            match (key, shift) {
                ('A', true) => Some('b'),
                (k, _) if k == 'a' || k == 'b' => Some(k),
                _ => None,
            }
        }
    }

    fn active_ime() -> ImeEngine<TestComposer, TestKeymap> {
        let mut ime = ImeEngine::new(Engine::new(TestComposer, TestKeymap));
        ime.set_active(true);
        ime
    }

    fn press(ime: &mut ImeEngine<TestComposer, TestKeymap>, field: &mut TextField, event: KeyEvent) -> KeyResult {
        let result = ime.process_key(&event, field);
        if let Some(edit) = result.edit() {
            field.apply(edit);
        }
        result
    }

    #[test]
    fn test_new_ime_engine_is_inactive() {
        let ime = ImeEngine::new(Engine::new(TestComposer, TestKeymap));
        assert!(!ime.is_active());
        assert_eq!(ime.session().removal(), RemovalGranularity::Syllable);
        assert_eq!(ime.toggle_chord().to_string(), "Ctrl+Space");
    }

    #[test]
    fn test_inactive_passes_everything_through() {
        let mut ime = ImeEngine::new(Engine::new(TestComposer, TestKeymap));
        let field = TextField::with_text("a");
        for event in [
            KeyEvent::char('a'),
            KeyEvent::char(' '),
            KeyEvent::named(NamedKey::Backspace),
            KeyEvent::named(NamedKey::Enter),
        ] {
            assert_eq!(ime.process_key(&event, &field), KeyResult::NotHandled);
        }
    }

    #[test]
    fn test_character_key_composes_and_enters_jamo_removal() {
        let mut ime = active_ime();
        let mut field = TextField::new();
        assert!(press(&mut ime, &mut field, KeyEvent::char('a')).intercepted());
        assert!(press(&mut ime, &mut field, KeyEvent::char('b')).intercepted());
        assert_eq!(field.text(), "c");
        assert_eq!(ime.session().removal(), RemovalGranularity::Jamo);
    }

    #[test]
    fn test_shift_is_passed_to_keymap() {
        let mut ime = active_ime();
        let mut field = TextField::with_text("a");
        press(&mut ime, &mut field, KeyEvent::char('A').with_shift());
        assert_eq!(field.text(), "c");
    }

    #[test]
    fn test_unmapped_character_passes_through_without_reset() {
        let mut ime = active_ime();
        let mut field = TextField::new();
        press(&mut ime, &mut field, KeyEvent::char('a'));
        let result = press(&mut ime, &mut field, KeyEvent::char('7'));
        assert_eq!(result, KeyResult::NotHandled);
        assert_eq!(ime.session().removal(), RemovalGranularity::Jamo);
    }

    #[test]
    fn test_named_key_resets_removal_but_shift_does_not() {
        let mut ime = active_ime();
        let mut field = TextField::new();
        press(&mut ime, &mut field, KeyEvent::char('a'));

        let result = press(&mut ime, &mut field, KeyEvent::named(NamedKey::Shift));
        assert_eq!(result, KeyResult::NotHandled);
        assert_eq!(ime.session().removal(), RemovalGranularity::Jamo);

        let result = press(&mut ime, &mut field, KeyEvent::named(NamedKey::ArrowLeft));
        assert_eq!(result, KeyResult::NotHandled);
        assert_eq!(ime.session().removal(), RemovalGranularity::Syllable);
    }

    #[test]
    fn test_editor_shortcuts_pass_through_without_state_change() {
        let mut ime = active_ime();
        let mut field = TextField::new();
        press(&mut ime, &mut field, KeyEvent::char('a'));

        let ctrl_alt = Modifiers { ctrl: true, alt: true, ..Modifiers::NONE };
        let meta = Modifiers { meta: true, ..Modifiers::NONE };
        let alt_graph = Modifiers { alt_graph: true, ..Modifiers::NONE };
        for modifiers in [ctrl_alt, meta, alt_graph] {
            let event = KeyEvent::named(NamedKey::Backspace).with_modifiers(modifiers);
            assert_eq!(press(&mut ime, &mut field, event), KeyResult::NotHandled);
        }
        let result = press(&mut ime, &mut field, KeyEvent::char('b').with_ctrl());
        assert_eq!(result, KeyResult::NotHandled);
        assert_eq!(field.text(), "a");
        assert_eq!(ime.session().removal(), RemovalGranularity::Jamo);
    }

    #[test]
    fn test_non_text_target_is_ignored() {
        let mut ime = active_ime();
        let field = TextField::new().with_kind(crate::text_field::FieldKind::Other);
        assert_eq!(ime.process_key(&KeyEvent::char('a'), &field), KeyResult::NotHandled);
    }

    #[test]
    fn test_space_inserts_literally_and_resets() {
        let mut ime = active_ime();
        let mut field = TextField::new();
        press(&mut ime, &mut field, KeyEvent::char('a'));
        let result = press(&mut ime, &mut field, KeyEvent::char(' '));
        assert!(result.intercepted());
        assert_eq!(field.text(), "a ");
        assert_eq!(field.selection().start, 2);
        assert_eq!(ime.session().removal(), RemovalGranularity::Syllable);

        // a following 'b' must not reach across the space
        press(&mut ime, &mut field, KeyEvent::char('b'));
        assert_eq!(field.text(), "a b");
    }

    #[test]
    fn test_space_replaces_selection() {
        let mut ime = active_ime();
        let mut field = TextField::with_text("xyz");
        field.set_selection(0, 2);
        press(&mut ime, &mut field, KeyEvent::char(' '));
        assert_eq!(field.text(), " z");
        assert_eq!(field.selection().start, 1);
    }

    #[test]
    fn test_backspace_peels_then_removes() {
        let mut ime = active_ime();
        let mut field = TextField::new();
        press(&mut ime, &mut field, KeyEvent::char('a'));
        press(&mut ime, &mut field, KeyEvent::char('b'));

        press(&mut ime, &mut field, KeyEvent::named(NamedKey::Backspace));
        assert_eq!(field.text(), "a");
        assert_eq!(ime.session().removal(), RemovalGranularity::Jamo);

        press(&mut ime, &mut field, KeyEvent::named(NamedKey::Backspace));
        assert_eq!(field.text(), "");
        assert_eq!(ime.session().removal(), RemovalGranularity::Syllable);

        let result = press(&mut ime, &mut field, KeyEvent::named(NamedKey::Backspace));
        assert_eq!(result, KeyResult::Handled(None));
        assert_eq!(field.text(), "");
    }

    #[test]
    fn test_backspace_keeps_text_after_caret() {
        let mut ime = active_ime();
        let mut field = TextField::with_text("xcy");
        field.set_caret(2);
        press(&mut ime, &mut field, KeyEvent::named(NamedKey::Backspace));
        assert_eq!(field.text(), "xy");
        assert_eq!(field.selection().start, 1);
    }

    #[test]
    fn test_range_backspace_deletes_selection_and_resets() {
        let mut ime = active_ime();
        let mut field = TextField::new();
        press(&mut ime, &mut field, KeyEvent::char('a'));
        press(&mut ime, &mut field, KeyEvent::char('b'));
        press(&mut ime, &mut field, KeyEvent::char('b'));
        assert_eq!(field.text(), "cb");

        field.set_selection(0, 1);
        press(&mut ime, &mut field, KeyEvent::named(NamedKey::Backspace));
        assert_eq!(field.text(), "b");
        assert_eq!(field.selection().start, 0);
        assert_eq!(ime.session().removal(), RemovalGranularity::Syllable);
    }

    #[test]
    fn test_toggle_chord_flips_mode() {
        let mut ime = ImeEngine::new(Engine::new(TestComposer, TestKeymap));
        let field = TextField::new();
        let chord = KeyEvent::char(' ').with_ctrl();

        assert_eq!(ime.process_key(&chord, &field), KeyResult::Handled(None));
        assert!(ime.is_active());

        // auto-repeat does not toggle; it is an editor shortcut
        assert_eq!(ime.process_key(&chord.clone().repeated(), &field), KeyResult::NotHandled);
        assert!(ime.is_active());

        ime.process_key(&chord, &field);
        assert!(!ime.is_active());
    }

    #[test]
    fn test_mode_switch_and_pointer_down_reset_removal() {
        let mut ime = active_ime();
        let mut field = TextField::new();
        press(&mut ime, &mut field, KeyEvent::char('a'));
        ime.pointer_down();
        assert_eq!(ime.session().removal(), RemovalGranularity::Syllable);

        press(&mut ime, &mut field, KeyEvent::char('a'));
        ime.set_active(false);
        ime.set_active(true);
        assert_eq!(ime.session().removal(), RemovalGranularity::Syllable);
    }

    #[test]
    fn test_pointer_down_reset_can_be_disabled() {
        let config = Config {
            reset_on_pointer_down: false,
            start_active: true,
            ..Config::default()
        };
        let mut ime = ImeEngine::with_config(Engine::new(TestComposer, TestKeymap), &config);
        let mut field = TextField::new();
        press(&mut ime, &mut field, KeyEvent::char('a'));
        ime.pointer_down();
        assert_eq!(ime.session().removal(), RemovalGranularity::Jamo);
    }
}
