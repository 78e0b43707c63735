//! Terminal input module.
//!
//! Independent of any UI framework: maps `crossterm` key events onto
//! [`crate::types::GameAction`]. There is no auto-repeat handling here; the
//! terminal's own key repeat drives held keys.

pub mod map;

pub use tui_fragtris_types as types;

pub use map::{handle_key_event, should_quit};
