//! Board tests - grid access, collision and line clearing

use neo_tetris::core::{Board, Piece, Shape};
use neo_tetris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.cells().len(), 200);
    assert!(board.cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert_eq!(board.get(9, 19), Some(None));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert!(!board.is_occupied(5, 10));

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
}

#[test]
fn test_collision_with_walls_and_floor() {
    let board = Board::new();
    let i = Shape::from_rows(&[[1, 1, 1, 1]]);

    assert!(!board.collides(&i, 0, 0));
    assert!(!board.collides(&i, 6, 19));
    assert!(board.collides(&i, -1, 0), "left wall");
    assert!(board.collides(&i, 7, 0), "right wall");
    assert!(board.collides(&i, 0, 20), "floor");
}

#[test]
fn test_cells_above_board_only_hit_walls() {
    let board = Board::new();
    let o = Shape::from_rows(&[[1, 1], [1, 1]]);

    assert!(!board.collides(&o, 4, -1));
    assert!(!board.collides(&o, 4, -5));
    assert!(board.collides(&o, -1, -3));
}

#[test]
fn test_collision_with_locked_cells() {
    let mut board = Board::new();
    board.set(4, 19, Some(PieceKind::Z));
    let t = Shape::from_rows(&[[0, 1, 0], [1, 1, 1]]);

    assert!(board.collides(&t, 3, 18));
    assert!(!board.collides(&t, 3, 17));
    assert!(!board.collides(&t, 5, 18));
}

#[test]
fn test_lock_piece_drops_cells_above_board() {
    let mut board = Board::new();
    let piece = Piece {
        kind: PieceKind::T,
        shape: Shape::from_rows(&[[0, 1, 0], [1, 1, 1]]),
        x: 3,
        y: -1,
    };
    board.lock_piece(&piece);

    let filled: Vec<(i8, i8)> = (0..BOARD_HEIGHT as i8)
        .flat_map(|y| (0..BOARD_WIDTH as i8).map(move |x| (x, y)))
        .filter(|&(x, y)| board.is_occupied(x, y))
        .collect();
    assert_eq!(filled, vec![(3, 0), (4, 0), (5, 0)]);
    assert_eq!(board.get(4, 0), Some(Some(PieceKind::T)));
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut board = Board::new();
    board.fill_row_except(19, &[], Some(PieceKind::I));
    board.fill_row_except(18, &[0], Some(PieceKind::J));
    board.fill_row_except(17, &[], Some(PieceKind::L));
    board.set(2, 16, Some(PieceKind::O));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19, 17]);

    // Old row 18 lands on the floor, old row 16 directly above it.
    assert_eq!(board.get(0, 19), Some(None));
    assert_eq!(board.get(1, 19), Some(Some(PieceKind::J)));
    assert_eq!(board.get(2, 18), Some(Some(PieceKind::O)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 10);
}

#[test]
fn test_clear_four_rows() {
    let mut board = Board::new();
    for y in 16..20 {
        board.fill_row_except(y, &[], Some(PieceKind::I));
    }
    board.set(7, 15, Some(PieceKind::S));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19, 18, 17, 16]);
    assert_eq!(board.get(7, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
}

#[test]
fn test_clear_without_full_rows_is_noop() {
    let mut board = Board::new();
    board.fill_row_except(19, &[9], Some(PieceKind::T));
    let before = board.clone();

    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_row_access() {
    let mut board = Board::new();
    board.fill_row_except(5, &[1, 3], Some(PieceKind::Z));

    let row = board.row(5).unwrap();
    assert_eq!(row.len(), BOARD_WIDTH as usize);
    assert_eq!(row[1], None);
    assert_eq!(row[2], Some(PieceKind::Z));
    assert!(board.row(BOARD_HEIGHT as usize).is_none());
}
