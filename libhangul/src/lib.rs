//! # libhangul
//!
//! Korean (Hangul) 2-set input composition built on libhangul-core.
//!
//! Keys resolve to compatibility jamo through the `Dubeolsik` layout, and
//! `HangulComposer` folds jamo into precomposed syllable blocks. The
//! dispatcher from core applies both to a text field one keystroke at a
//! time, and backspace undoes one jamo at a time while a block is being
//! typed.
//!
//! ```rust
//! use libhangul::{create_ime_engine, HangulConfig, KeyEvent, TextField};
//!
//! let mut ime = create_ime_engine(&HangulConfig::default());
//! ime.set_active(true);
//!
//! let mut field = TextField::new();
//! for key in ['g', 'k', 's'] {
//!     if let Some(edit) = ime.process_key(&KeyEvent::char(key), &field).edit() {
//!         field.apply(edit);
//!     }
//! }
//! assert_eq!(field.text(), "한");
//! ```

pub mod composer;
pub mod config;
pub mod engine;
pub mod jamo;
pub mod keymap;
pub mod script;

// Re-export IME components from core
pub use libhangul_core::*;

pub use composer::{compose_str, decompose_str, HangulComposer};
pub use config::{HangulConfig, Layout};
pub use engine::{create_engine, create_ime_engine, HangulEngine, HangulIme};
pub use jamo::Syllable;
pub use keymap::Dubeolsik;
