//! Spin detection - classify a T-piece lock by corner occupancy
//!
//! The four diagonal corners of the piece's 3x3 box are examined around
//! `(x + 1, y + 1)`. Which two corners count as "front" is inferred from the
//! rotated occupancy pattern rather than from a tracked orientation.

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{PieceKind, SpinKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Corner order: top-left, top-right, bottom-left, bottom-right.
const CORNERS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Whether a corner cell counts as filled.
///
/// Side walls and the floor count as filled; cells above the board are empty.
pub fn corner_filled(board: &Board, x: i8, y: i8) -> bool {
    if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
        return true;
    }
    if y < 0 {
        return false;
    }
    board.is_occupied(x, y)
}

/// Indices (into the corner order) of the two front corners for this shape.
pub fn front_corners(piece: &Piece) -> [usize; 2] {
    let shape = &piece.shape;
    if shape.filled(0, 1) {
        [2, 3]
    } else if shape.filled(2, 1) {
        [0, 1]
    } else if shape.filled(1, 0) {
        [1, 3]
    } else {
        [0, 2]
    }
}

/// Classify a lock of `piece` against the board as it is before the lock.
///
/// Only a T piece whose last rotation needed a kick can spin. Three or more
/// filled corners are required; both front corners make a regular spin, a
/// single front corner makes a mini.
pub fn detect(board: &Board, piece: &Piece, last_rotation_was_kick: bool) -> SpinKind {
    if piece.kind != PieceKind::T || !last_rotation_was_kick {
        return SpinKind::None;
    }

    let cx = piece.x + 1;
    let cy = piece.y + 1;
    let front = front_corners(piece);

    let mut filled = 0;
    let mut front_filled = 0;
    for (i, &(dx, dy)) in CORNERS.iter().enumerate() {
        if corner_filled(board, cx + dx, cy + dy) {
            filled += 1;
            if front.contains(&i) {
                front_filled += 1;
            }
        }
    }

    if filled < 3 {
        return SpinKind::None;
    }
    match front_filled {
        2 => SpinKind::Regular,
        1 => SpinKind::Mini,
        _ => SpinKind::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Shape;

    fn t_at(shape: Shape, x: i8, y: i8) -> Piece {
        Piece {
            kind: PieceKind::T,
            shape,
            x,
            y,
        }
    }

    #[test]
    fn test_corner_filled_rules() {
        let mut board = Board::new();
        board.set(3, 5, Some(PieceKind::O));

        assert!(corner_filled(&board, -1, 5));
        assert!(corner_filled(&board, 10, 5));
        assert!(corner_filled(&board, 4, 20));
        assert!(!corner_filled(&board, 4, -1));
        assert!(corner_filled(&board, 3, 5));
        assert!(!corner_filled(&board, 4, 5));
    }

    #[test]
    fn test_front_corners_follow_heuristic() {
        let spawn = Shape::from_rows(&[[0, 1, 0], [1, 1, 1]]);
        let right = spawn.rotate_cw();
        let down = right.rotate_cw();
        let left = down.rotate_cw();

        assert_eq!(front_corners(&t_at(spawn, 0, 0)), [2, 3]);
        assert_eq!(front_corners(&t_at(right, 0, 0)), [1, 3]);
        assert_eq!(front_corners(&t_at(down, 0, 0)), [2, 3]);
        assert_eq!(front_corners(&t_at(left, 0, 0)), [2, 3]);
    }

    #[test]
    fn test_requires_kick() {
        let board = Board::new();
        let piece = t_at(Shape::from_rows(&[[0, 1, 0], [1, 1, 1]]), 0, 18);
        // Floor and left wall give 3 filled corners, but no kick happened.
        assert_eq!(detect(&board, &piece, false), SpinKind::None);
    }

    #[test]
    fn test_non_t_never_spins() {
        let board = Board::new();
        let mut piece = Piece::new(PieceKind::S);
        piece.y = 18;
        assert_eq!(detect(&board, &piece, true), SpinKind::None);
    }

    #[test]
    fn test_regular_spin_with_both_front_corners() {
        let mut board = Board::new();
        // Center (5, 18); bottom corners come from the floor row 19.
        board.set(4, 19, Some(PieceKind::I));
        board.set(6, 19, Some(PieceKind::I));
        board.set(4, 17, Some(PieceKind::I));
        let piece = t_at(Shape::from_rows(&[[0, 1], [1, 1], [0, 1]]), 4, 17);

        assert_eq!(detect(&board, &piece, true), SpinKind::Regular);
    }

    #[test]
    fn test_mini_spin_with_one_front_corner() {
        let mut board = Board::new();
        let piece = t_at(Shape::from_rows(&[[0, 1], [1, 1], [0, 1]]), 4, 17);
        // Both top corners plus one of the two front (bottom) corners.
        board.set(4, 17, Some(PieceKind::I));
        board.set(6, 17, Some(PieceKind::I));
        board.set(4, 19, Some(PieceKind::I));

        assert_eq!(detect(&board, &piece, true), SpinKind::Mini);
    }

    #[test]
    fn test_two_corners_is_not_a_spin() {
        let mut board = Board::new();
        board.set(4, 19, Some(PieceKind::I));
        board.set(6, 19, Some(PieceKind::I));
        let piece = t_at(Shape::from_rows(&[[0, 1], [1, 1], [0, 1]]), 4, 17);

        assert_eq!(detect(&board, &piece, true), SpinKind::None);
    }
}
