//! NeoTetris (workspace facade crate).
//!
//! Re-exports the member crates as `neo_tetris::{core,input,term,types}` and
//! holds the runner's configuration and logging setup.

pub mod config;
pub mod logger;

pub use neo_tetris_core as core;
pub use neo_tetris_input as input;
pub use neo_tetris_term as term;
pub use neo_tetris_types as types;

pub use config::Config;
