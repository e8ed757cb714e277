//! Resolver module - collision tests, movement, and rotation with kicks
//!
//! Rotation uses a fixed three-position kick sequence instead of a kick
//! table: the rotated matrix is tried in place, then one column left, then
//! one column right. If all three collide the piece keeps its old matrix.

use crate::board::Board;
use crate::piece::Piece;

/// Horizontal offsets tried, in order, after a rotation.
pub const KICK_OFFSETS: [i8; 3] = [0, -1, 1];

/// Whether any occupied cell of `piece` hits a wall, the floor, or a locked block.
pub fn collides(board: &Board, piece: &Piece) -> bool {
    piece.cells().any(|(x, y)| board.is_cell_occupied(x, y))
}

/// Shift the piece by (dx, dy) if the target is free.
///
/// On collision the piece is left untouched and `false` is returned; the
/// caller decides whether a failed downward move locks.
pub fn try_move(board: &Board, piece: &mut Piece, dx: i8, dy: i8) -> bool {
    let moved = piece.shifted(dx, dy);
    if collides(board, &moved) {
        return false;
    }
    *piece = moved;
    true
}

/// Rotate clockwise, kicking through [`KICK_OFFSETS`].
///
/// Returns the applied horizontal offset, or `None` if the rotation was
/// rejected (piece unchanged).
pub fn try_rotate(board: &Board, piece: &mut Piece) -> Option<i8> {
    let rotated = Piece {
        matrix: piece.matrix.rotated_cw(),
        ..*piece
    };
    for dx in KICK_OFFSETS {
        let candidate = rotated.shifted(dx, 0);
        if !collides(board, &candidate) {
            *piece = candidate;
            return Some(dx);
        }
    }
    None
}

/// Number of rows the piece can fall before it rests.
pub fn drop_distance(board: &Board, piece: &Piece) -> u8 {
    let mut distance = 0u8;
    while !collides(board, &piece.shifted(0, distance as i8 + 1)) {
        distance += 1;
    }
    distance
}
