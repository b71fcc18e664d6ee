use crate::pieces::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, INITIAL_DROP_INTERVAL_MS};

pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Read-only copy of everything a renderer polls each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub current: Option<Piece>,
    pub ghost: Option<Piece>,
    pub next: Option<Piece>,
    pub held: Option<Piece>,
    pub can_hold: bool,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            ghost: None,
            next: None,
            held: None,
            can_hold: true,
            paused: false,
            game_over: false,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: INITIAL_DROP_INTERVAL_MS,
        }
    }
}
