//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. The game has
//! no gravity and no auto-repeat handling: one key press is one move.

pub mod map;

pub use hatetris_types as types;

pub use map::{handle_key_event, should_quit};
