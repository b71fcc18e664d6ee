//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides
//! a key-repeat handler for held movement keys, usable in terminals with or
//! without key-release events.

pub mod handler;
pub mod map;

pub use neo_tetris_types as types;

pub use handler::{InputHandler, RepeatKey};
pub use map::{handle_key_event, should_quit, should_restart};
