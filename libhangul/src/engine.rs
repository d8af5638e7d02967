//! Factory for ready-to-use Hangul IME engines.

use crate::composer::HangulComposer;
use crate::config::{HangulConfig, Layout};
use crate::keymap::Dubeolsik;
use libhangul_core::{Engine, ImeEngine};

/// Composition backend with the Korean tables and 2-set layout.
pub type HangulEngine = Engine<HangulComposer, Dubeolsik>;

/// Key dispatcher for one Korean input surface.
pub type HangulIme = ImeEngine<HangulComposer, Dubeolsik>;

/// Build the composition backend for `layout`.
pub fn create_engine(layout: Layout) -> HangulEngine {
    match layout {
        Layout::Dubeolsik => Engine::new(HangulComposer::new(), Dubeolsik::new()),
    }
}

/// Create a key dispatcher configured by `config`.
///
/// Each input surface should own its own dispatcher: removal state from
/// one field means nothing in another.
pub fn create_ime_engine(config: &HangulConfig) -> HangulIme {
    tracing::debug!(
        layout = ?config.layout,
        toggle = %config.base().toggle_shortcut,
        "creating hangul ime engine"
    );
    ImeEngine::with_config(create_engine(config.layout), config.base())
}
