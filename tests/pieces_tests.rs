//! Shape rotation and wall-kick tests

use emoji_tetris::core::resolver::{drop_distance, try_move, try_rotate};
use emoji_tetris::core::{Board, Piece, ShapeMatrix};
use emoji_tetris::types::{Block, ShapeKind, SkinToken};

fn vertical_i(x: i8, y: i8) -> Piece {
    let mut piece = Piece::new(ShapeKind::I, SkinToken(0), false);
    piece.matrix = piece.matrix.rotated_cw();
    piece.x = x;
    piece.y = y;
    piece
}

#[test]
fn test_spawn_matrices() {
    let rows: Vec<String> = ShapeMatrix::spawn(ShapeKind::T).rows().collect();
    assert_eq!(rows, vec![".#.", "###", "..."]);
    let rows: Vec<String> = ShapeMatrix::spawn(ShapeKind::O).rows().collect();
    assert_eq!(rows, vec!["##", "##"]);
    for kind in ShapeKind::ALL {
        assert_eq!(ShapeMatrix::spawn(kind).filled().count(), 4, "{kind:?}");
    }
}

#[test]
fn test_rotation_transform() {
    // rotated[x][n-1-y] = m[y][x]
    let rows: Vec<String> = ShapeMatrix::spawn(ShapeKind::J).rotated_cw().rows().collect();
    assert_eq!(rows, vec![".##", ".#.", ".#."]);
}

#[test]
fn test_four_rotations_restore_matrix() {
    let board = Board::new();
    for kind in ShapeKind::ALL {
        let mut piece = Piece::new(kind, SkinToken(0), false);
        piece.y = 8;
        let original = piece;
        for _ in 0..4 {
            assert_eq!(try_rotate(&board, &mut piece), Some(0), "{kind:?}");
        }
        assert_eq!(piece, original, "{kind:?}");
    }
}

#[test]
fn test_kick_left_off_right_wall() {
    let board = Board::new();
    // Column 9; turning flat needs columns 7..=10.
    let mut piece = vertical_i(7, 5);
    assert_eq!(try_rotate(&board, &mut piece), Some(-1));
    assert_eq!(piece.x, 6);
    assert!(piece.cells().all(|(x, _)| (6..=9).contains(&x)));
}

#[test]
fn test_rotation_rejected_when_no_kick_fits() {
    let board = Board::new();
    // Column 0; the flat I needs columns -2..=1, and neither kick reaches 0..=3.
    let mut piece = vertical_i(-2, 5);
    let before = piece;
    assert_eq!(try_rotate(&board, &mut piece), None);
    assert_eq!(piece, before);
}

#[test]
fn test_blocked_move_leaves_piece() {
    let mut board = Board::new();
    let mut piece = Piece::new(ShapeKind::O, SkinToken(0), false);
    let block = Some(Block {
        token: SkinToken(1),
        wildcard: false,
    });
    board.set(piece.x - 1, 0, block);

    let before = piece;
    assert!(!try_move(&board, &mut piece, -1, 0));
    assert_eq!(piece, before);
    assert!(try_move(&board, &mut piece, 1, 0));
    assert_eq!(piece.x, before.x + 1);
}

#[test]
fn test_drop_distance_on_empty_board() {
    let board = Board::new();
    let piece = Piece::new(ShapeKind::O, SkinToken(0), false);
    assert_eq!(drop_distance(&board, &piece), 18);
}
