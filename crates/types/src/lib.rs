//! Shared types module - data structures and constants used by every crate
//!
//! All types here are plain data with no external dependencies, so the engine,
//! the input layer and the terminal view can agree on them without pulling in
//! each other.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! Pieces may sit partially above the board (negative `y`) while spawning.
//!
//! # Speed Progression
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_INTERVAL_MS` | 1000 | Gravity at level 1 |
//! | `LEVEL_SPEED_STEP_MS` | 100 | Interval reduction per level |
//! | `MIN_DROP_INTERVAL_MS` | 100 | Gravity floor |
//! | `LINES_PER_LEVEL` | 10 | Lines needed to advance one level |
//!
//! # Examples
//!
//! ```
//! use neo_tetris_types::{PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.name(), "T");
//! assert_eq!(PieceKind::T.color(), Rgb::new(0xff, 0x00, 0xff));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed frame interval used by the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const INITIAL_DROP_INTERVAL_MS: u32 = 1000;

/// Gravity never gets faster than this
pub const MIN_DROP_INTERVAL_MS: u32 = 100;

/// Drop interval reduction per level above 1
pub const LEVEL_SPEED_STEP_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Key-repeat delay before auto-repeat starts
pub const DEFAULT_DAS_MS: u32 = 150;

/// Key-repeat interval once auto-repeat is running
pub const DEFAULT_ARR_MS: u32 = 50;

/// Line clear scoring table, indexed by lines cleared, multiplied by level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

pub const T_SPIN_SINGLE_BONUS: u32 = 800;
pub const T_SPIN_DOUBLE_BONUS: u32 = 1200;
pub const T_SPIN_TRIPLE_BONUS: u32 = 1600;

/// Mini T-spin single; a mini double adds `T_SPIN_MINI_DOUBLE_EXTRA` on top.
pub const T_SPIN_MINI_BONUS: u32 = 100;
pub const T_SPIN_MINI_DOUBLE_EXTRA: u32 = 400;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven tetromino piece kinds
///
/// Each kind has a fixed color:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Magenta
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Single-letter type name
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Fixed display color
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(0x00, 0xff, 0xff),
            PieceKind::O => Rgb::new(0xff, 0xff, 0x00),
            PieceKind::T => Rgb::new(0xff, 0x00, 0xff),
            PieceKind::S => Rgb::new(0x00, 0xff, 0x00),
            PieceKind::Z => Rgb::new(0xff, 0x00, 0x00),
            PieceKind::J => Rgb::new(0x00, 0x00, 0xff),
            PieceKind::L => Rgb::new(0xff, 0x88, 0x00),
        }
    }
}

/// Commands accepted by the engine
///
/// The input layer only ever produces discrete commands; held keys are turned
/// into repeated commands before they reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Stash the current piece (once per piece)
    Hold,
    /// Toggle pause state
    Pause,
}

/// T-spin classification of the most recent lock
///
/// - **None**: Not a spin
/// - **Mini**: Kicked rotation, 3+ corners filled, exactly one front corner filled
/// - **Regular**: Kicked rotation, 3+ corners filled, both front corners filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinKind {
    #[default]
    None,
    Mini,
    Regular,
}

/// Event emitted by the engine for the renderer to animate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Rows removed by a line clear, as indices into the board before the
    /// clear, bottom to top.
    LinesCleared { rows: Vec<usize> },
    /// Spin or TETRIS banner with the points it earned.
    Notification { label: &'static str, points: u32 },
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked cell, colored by the piece that filled it
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_constants_match_progression_rules() {
        assert_eq!(INITIAL_DROP_INTERVAL_MS, 1000);
        assert_eq!(MIN_DROP_INTERVAL_MS, 100);
        assert_eq!(LEVEL_SPEED_STEP_MS, 100);
        assert_eq!(LINES_PER_LEVEL, 10);
        assert_eq!(DEFAULT_DAS_MS, 150);
        assert_eq!(DEFAULT_ARR_MS, 50);
    }

    #[test]
    fn piece_colors_are_distinct() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(a.color(), b.color(), "{:?} and {:?} share a color", a, b);
            }
        }
    }
}
