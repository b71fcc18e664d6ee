//! Terminal presentation for the engine.
//!
//! Renders a [`core::GameSnapshot`] into a simple framebuffer and flushes it
//! with crossterm. The view is pure and testable; only [`TerminalRenderer`]
//! performs I/O.

pub mod effects;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use neo_tetris_core as core;
pub use neo_tetris_types as types;

pub use effects::{Effects, Notice};
pub use fb::{CellStyle, FrameBuffer, Glyph};
pub use game_view::{GameView, Viewport};
pub use renderer::{
    encode_changes_into, encode_enter_into, encode_exit_into, encode_full_into, TerminalRenderer,
};
