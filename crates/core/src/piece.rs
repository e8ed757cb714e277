//! Active piece: a shape matrix anchored on the board with a skin token.

use crate::shapes::ShapeMatrix;
use crate::types::{ShapeKind, SkinToken, BOARD_WIDTH};

/// A falling (or queued, or held) piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    /// Current orientation.
    pub matrix: ShapeMatrix,
    pub token: SkinToken,
    pub wildcard: bool,
    /// Board column of the matrix's left edge.
    pub x: i8,
    /// Board row of the matrix's top edge.
    pub y: i8,
}

impl Piece {
    /// Create a piece in spawn orientation at the spawn anchor.
    pub fn new(kind: ShapeKind, token: SkinToken, wildcard: bool) -> Self {
        let mut piece = Self {
            kind,
            matrix: ShapeMatrix::spawn(kind),
            token,
            wildcard,
            x: 0,
            y: 0,
        };
        piece.reset_position();
        piece
    }

    /// Move to the spawn anchor: horizontally centered, row 0.
    ///
    /// The current orientation is kept.
    pub fn reset_position(&mut self) {
        self.x = spawn_x(self.matrix.size());
        self.y = 0;
    }

    /// Board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Copy of this piece shifted by (dx, dy).
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Spawn column for a matrix of the given width.
pub fn spawn_x(matrix_width: u8) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (matrix_width / 2) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_anchor_is_centered() {
        assert_eq!(Piece::new(ShapeKind::I, SkinToken(0), false).x, 3);
        assert_eq!(Piece::new(ShapeKind::O, SkinToken(0), false).x, 4);
        assert_eq!(Piece::new(ShapeKind::T, SkinToken(0), false).x, 4);
        assert_eq!(Piece::new(ShapeKind::T, SkinToken(0), false).y, 0);
    }

    #[test]
    fn cells_are_offset_by_anchor() {
        let piece = Piece::new(ShapeKind::O, SkinToken(2), false).shifted(1, 5);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(5, 5), (6, 5), (5, 6), (6, 6)]);
    }
}
