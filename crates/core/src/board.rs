//! Board module - the locked-cell grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that filled it. Uses a flat array for cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::pieces::{Piece, Shape};
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one clear
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Whether `shape` anchored at (x, y) collides.
    ///
    /// A cell collides when it lies left or right of the board, at or below the
    /// floor, or on an occupied cell. Cells above the board (y < 0) never
    /// collide with anything but the side walls.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.cells().any(|(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return true;
            }
            py >= 0 && self.is_occupied(px, py)
        })
    }

    /// Write every occupied cell of `piece` into the board.
    ///
    /// Cells outside the board (including those above it) are dropped.
    pub fn lock_piece(&mut self, piece: &Piece) {
        for (px, py) in piece.board_cells() {
            self.set(px, py, Some(piece.kind));
        }
    }

    /// Remove every full row, shifting the rows above down and filling the top
    /// with empty rows.
    ///
    /// Returns the removed row indices as they were before the clear, bottom to
    /// top. Uses a two-pointer pass with zero allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Whatever is left above the write pointer becomes empty rows.
        self.cells[..write_y * width].fill(None);

        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row `y` as a slice, or None if out of bounds
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Fill row `y` completely, except for the listed columns.
    ///
    /// Handy for building test positions and benchmarks.
    pub fn fill_row_except(&mut self, y: i8, holes: &[i8], cell: Cell) {
        for x in 0..BOARD_WIDTH as i8 {
            let value = if holes.contains(&x) { None } else { cell };
            self.set(x, y, value);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::spawn_shape;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_collides_with_walls_and_floor() {
        let board = Board::new();
        let o = spawn_shape(PieceKind::O);

        assert!(!board.collides(&o, 0, 0));
        assert!(!board.collides(&o, 8, 18));
        assert!(board.collides(&o, -1, 0));
        assert!(board.collides(&o, 9, 0));
        assert!(board.collides(&o, 0, 19));
    }

    #[test]
    fn test_cells_above_board_do_not_collide() {
        let mut board = Board::new();
        board.fill_row_except(0, &[], Some(PieceKind::Z));
        let i = spawn_shape(PieceKind::I).rotate_cw();

        // Vertical I spanning rows -4..-1 sits fully above the board.
        assert!(!board.collides(&i, 4, -4));
        // One row lower it reaches the filled row 0.
        assert!(board.collides(&i, 4, -3));
    }

    #[test]
    fn test_lock_piece_drops_cells_above_board() {
        let mut board = Board::new();
        let mut piece = Piece::new(PieceKind::T);
        piece.x = 4;
        piece.y = -1;

        board.lock_piece(&piece);

        // Only the bottom row of the T (y = 0) lands on the board.
        let filled = board.cells().iter().filter(|c| c.is_some()).count();
        assert_eq!(filled, 3);
        assert!(board.is_occupied(4, 0));
        assert!(board.is_occupied(6, 0));
    }

    #[test]
    fn test_clear_full_rows_reports_pre_clear_indices() {
        let mut board = Board::new();
        board.fill_row_except(19, &[], Some(PieceKind::I));
        board.fill_row_except(18, &[3], Some(PieceKind::I));
        board.fill_row_except(17, &[], Some(PieceKind::I));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);

        // The partial row fell to the bottom, the rest is empty.
        assert!(!board.is_occupied(3, 19));
        assert!(board.is_occupied(0, 19));
        assert!(board.row(18).unwrap().iter().all(|c| c.is_none()));
    }
}
