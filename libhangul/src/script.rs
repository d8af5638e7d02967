//! Key scripts: a compact text form of keystroke sequences.
//!
//! Plain characters are plain keys. Angle brackets name everything else:
//! `<BS>`, `<Space>`, `<Enter>`, `<Tab>`, `<Esc>`, `<Left>`, `<Right>`,
//! `<Home>`, `<End>`, `<Shift>`, `<S-x>` (shift+x), `<C-x>` (ctrl+x),
//! `<lt>` (a literal `<`), `<Toggle>` (mode toggle) and `<Click>` (pointer
//! press). Used by the CLI and by tests to replay typing against a field.

use crate::engine::HangulIme;
use libhangul_core::{FieldEdit, FieldKind, Key, KeyEvent, NamedKey, TextField};

/// One step of a key script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Press(KeyEvent),
    Toggle,
    PointerDown,
}

/// Parse a key script into actions.
pub fn parse(script: &str) -> Result<Vec<Action>, String> {
    let mut actions = Vec::new();
    let mut rest = script;

    while let Some(ch) = rest.chars().next() {
        if ch != '<' {
            actions.push(Action::Press(KeyEvent::char(ch)));
            rest = &rest[ch.len_utf8()..];
            continue;
        }
        let close = rest
            .find('>')
            .ok_or_else(|| format!("unclosed '<' in key script at '{}'", rest))?;
        actions.push(parse_token(&rest[1..close])?);
        rest = &rest[close + 1..];
    }

    Ok(actions)
}

fn parse_token(token: &str) -> Result<Action, String> {
    if let Some(key) = token.strip_prefix("S-") {
        return single_char(key, token).map(|ch| Action::Press(KeyEvent::char(ch).with_shift()));
    }
    if let Some(key) = token.strip_prefix("C-") {
        return single_char(key, token).map(|ch| Action::Press(KeyEvent::char(ch).with_ctrl()));
    }

    let named = match token.to_ascii_lowercase().as_str() {
        "toggle" => return Ok(Action::Toggle),
        "click" => return Ok(Action::PointerDown),
        "lt" => return Ok(Action::Press(KeyEvent::char('<'))),
        "space" => return Ok(Action::Press(KeyEvent::char(' '))),
        "bs" | "backspace" => NamedKey::Backspace,
        "del" | "delete" => NamedKey::Delete,
        "enter" | "cr" => NamedKey::Enter,
        "tab" => NamedKey::Tab,
        "esc" | "escape" => NamedKey::Escape,
        "left" => NamedKey::ArrowLeft,
        "right" => NamedKey::ArrowRight,
        "up" => NamedKey::ArrowUp,
        "down" => NamedKey::ArrowDown,
        "home" => NamedKey::Home,
        "end" => NamedKey::End,
        "shift" => NamedKey::Shift,
        _ => return Err(format!("unknown key '<{}>'", token)),
    };
    Ok(Action::Press(KeyEvent::named(named)))
}

fn single_char(key: &str, token: &str) -> Result<char, String> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(format!("'<{}>' must name exactly one character", token)),
    }
}

/// Replay `actions` against `field`, playing the host's part for keys the
/// IME passes through.
pub fn replay(ime: &mut HangulIme, field: &mut TextField, actions: &[Action]) {
    for action in actions {
        match action {
            Action::Toggle => ime.toggle_mode(),
            Action::PointerDown => ime.pointer_down(),
            Action::Press(event) => {
                let result = ime.process_key(event, field);
                if result.intercepted() {
                    if let Some(edit) = result.edit() {
                        field.apply(edit);
                    }
                } else {
                    host_default(field, event);
                }
            }
        }
    }
}

/// What a plain text field does with a key nobody intercepted.
fn host_default(field: &mut TextField, event: &KeyEvent) {
    if event.modifiers.is_editor_shortcut() {
        return;
    }
    let selection = field.selection();
    match &event.key {
        Key::Character(ch) => replace_selection(field, &ch.to_string()),
        Key::Named(NamedKey::Enter) if field.kind() == FieldKind::TextArea => {
            replace_selection(field, "\n")
        }
        Key::Named(NamedKey::Backspace) => {
            let start = if selection.is_collapsed() {
                selection.start.saturating_sub(1)
            } else {
                selection.start
            };
            let mut text = field.text_before(start).to_string();
            text.push_str(field.text_after(selection.end));
            field.apply(&FieldEdit::new(text, start));
        }
        Key::Named(NamedKey::ArrowLeft) => {
            field.move_left();
        }
        Key::Named(NamedKey::ArrowRight) => {
            field.move_right();
        }
        Key::Named(NamedKey::Home) => field.move_to_start(),
        Key::Named(NamedKey::End) => field.move_to_end(),
        Key::Named(_) => {}
    }
}

fn replace_selection(field: &mut TextField, insert: &str) {
    let selection = field.selection();
    let mut text = field.text_before(selection.start).to_string();
    text.push_str(insert);
    text.push_str(field.text_after(selection.end));
    field.apply(&FieldEdit::new(text, selection.start + insert.chars().count()));
}

/// Render a field with `|` marking the caret (or `[` `]` around a selection).
pub fn render(field: &TextField) -> String {
    let selection = field.selection();
    if selection.is_collapsed() {
        format!("{}|{}", field.text_before(selection.start), field.text_after(selection.start))
    } else {
        let selected: String = field
            .text()
            .chars()
            .skip(selection.start)
            .take(selection.len())
            .collect();
        format!(
            "{}[{}]{}",
            field.text_before(selection.start),
            selected,
            field.text_after(selection.end)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ime_engine, HangulConfig};

    fn active() -> HangulIme {
        let mut ime = create_ime_engine(&HangulConfig::default());
        ime.set_active(true);
        ime
    }

    fn run(ime: &mut HangulIme, script: &str) -> TextField {
        let mut field = TextField::new();
        replay(ime, &mut field, &parse(script).unwrap());
        field
    }

    #[test]
    fn test_parse_tokens() {
        let actions = parse("r<BS><S-r><Space><lt><Toggle><Click>").unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Press(KeyEvent::char('r')),
                Action::Press(KeyEvent::named(NamedKey::Backspace)),
                Action::Press(KeyEvent::char('r').with_shift()),
                Action::Press(KeyEvent::char(' ')),
                Action::Press(KeyEvent::char('<')),
                Action::Toggle,
                Action::PointerDown,
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("<BS").is_err());
        assert!(parse("<Hyper>").is_err());
        assert!(parse("<S-ab>").is_err());
    }

    #[test]
    fn test_replay_types_hangul() {
        let mut ime = active();
        let field = run(&mut ime, "dkssudgktpdy");
        assert_eq!(field.text(), "안녕하세요");
    }

    #[test]
    fn test_replay_inactive_types_latin() {
        let mut ime = create_ime_engine(&HangulConfig::default());
        let field = run(&mut ime, "gksrmf<Toggle>gksrmf");
        assert_eq!(field.text(), "gksrmf한글");
    }

    #[test]
    fn test_replay_arrow_keys_move_caret() {
        let mut ime = active();
        let field = run(&mut ime, "rk<Left>sk");
        assert_eq!(field.text(), "나가");
        assert_eq!(render(&field), "나|가");
    }

    #[test]
    fn test_render_selection() {
        let mut field = TextField::with_text("한글");
        field.set_selection(0, 1);
        assert_eq!(render(&field), "[한]글");
    }
}
