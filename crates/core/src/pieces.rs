//! Pieces module - tetromino shapes, rotation and wall kick tables
//!
//! Shapes are stored as minimal bounding occupancy matrices. Rotation is a pure
//! matrix transform, so a piece's orientation is carried entirely by its shape.

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest bounding box dimension of any tetromino
const MAX_DIM: usize = 4;

/// Occupancy matrix of a piece, `rows × cols`, row-major.
///
/// Cells outside `rows × cols` are always empty, so the derived equality
/// compares shapes exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_DIM]; MAX_DIM],
}

impl Shape {
    /// Build a shape from a row-major 0/1 matrix.
    ///
    /// Panics if the matrix is empty, ragged, or larger than 4×4.
    pub fn from_rows<const C: usize>(rows: &[[u8; C]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_DIM, "bad row count");
        assert!(C > 0 && C <= MAX_DIM, "bad column count");

        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = v != 0;
            }
        }
        Self {
            rows: rows.len() as u8,
            cols: C as u8,
            cells,
        }
    }

    /// Number of rows (height)
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of columns (width)
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// (width, height) of the bounding box
    pub fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }

    /// Occupancy at (row, col); out-of-range reads as empty.
    pub fn filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Occupied cells as (col, row) offsets from the top-left anchor.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Rotate 90° clockwise: an `R×C` matrix becomes `C×R` with
    /// `result[c][R-1-r] = source[r][c]`.
    pub fn rotate_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        for r in 0..rows {
            for c in 0..cols {
                cells[c][rows - 1 - r] = self.cells[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

/// Spawn shape for a piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[[1, 1, 1, 1]]),
        PieceKind::O => Shape::from_rows(&[[1, 1], [1, 1]]),
        PieceKind::T => Shape::from_rows(&[[0, 1, 0], [1, 1, 1]]),
        PieceKind::S => Shape::from_rows(&[[0, 1, 1], [1, 1, 0]]),
        PieceKind::Z => Shape::from_rows(&[[1, 1, 0], [0, 1, 1]]),
        PieceKind::J => Shape::from_rows(&[[1, 0, 0], [1, 1, 1]]),
        PieceKind::L => Shape::from_rows(&[[0, 0, 1], [1, 1, 1]]),
    }
}

/// A piece instance: kind, current shape and top-left anchor.
///
/// `y` may be negative while the piece spawns above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Fresh piece in spawn orientation at the origin
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: spawn_shape(kind),
            x: 0,
            y: 0,
        }
    }

    /// Column that horizontally centers this piece's current shape
    pub fn centered_x(&self) -> i8 {
        (BOARD_WIDTH / 2) as i8 - (self.shape.cols() / 2) as i8
    }

    /// Occupied cells in board coordinates
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Kick offsets (dx, dy) tried in order when a rotation collides.
pub fn kick_offsets(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::I => &I_KICKS,
        PieceKind::O => &O_KICKS,
        _ => &DEFAULT_KICKS,
    }
}

/// I piece kicks
const I_KICKS: [(i8, i8); 5] = [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)];

/// O piece never kicks
const O_KICKS: [(i8, i8); 1] = [(0, 0)];

/// J, L, S, T and Z kicks
const DEFAULT_KICKS: [(i8, i8); 5] = [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)];
