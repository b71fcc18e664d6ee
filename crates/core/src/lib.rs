//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the piece catalog and the game engine. It has no
//! dependencies on rendering, terminals or timers: an external driver feeds it
//! commands and elapsed time, and polls its state.
//!
//! # Module Structure
//!
//! - [`pieces`]: Tetromino shapes, clockwise matrix rotation and wall kick tables
//! - [`rng`]: Seeded uniform random piece selection
//! - [`board`]: 10x20 grid with collision detection and line clearing
//! - [`spin`]: T-spin classification by corner occupancy
//! - [`scoring`]: Line clear and spin points, level and speed progression
//! - [`game_state`]: The engine state machine
//! - [`snapshot`]: Read-only copy of the state for renderers
//!
//! # Example
//!
//! ```
//! use neo_tetris_core::GameState;
//! use neo_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // The dropped piece is on the board and a new one is falling.
//! assert_eq!(game.board().cells().iter().filter(|c| c.is_some()).count(), 4);
//! assert!(game.current().is_some());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. Gravity starts at 1000ms per row at level 1 and speeds
//! up by 100ms per level down to 100ms.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod spin;

pub use neo_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::GameState;
pub use pieces::{kick_offsets, spawn_shape, Piece, Shape};
pub use rng::PieceRng;
pub use scoring::{calculate_score, ScoreResult};
pub use snapshot::GameSnapshot;
