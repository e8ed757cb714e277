//! Shapes module - tetromino catalog and matrix rotation
//!
//! Each shape is an `n x n` boolean matrix (n = 2, 3 or 4) in its spawn
//! orientation. Rotation is a plain 90° clockwise matrix transform applied to
//! every shape, O and I included:
//!
//! ```text
//! rotated[x][n - 1 - y] = matrix[y][x]
//! ```

use crate::types::ShapeKind;

/// Largest matrix side used by the catalog (the I piece).
pub const MAX_MATRIX_SIZE: usize = 4;

/// Square occupancy matrix for one orientation of a shape.
///
/// Indexed as `cells[row][column]`; only the top-left `size x size`
/// corner is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: u8,
    cells: [[bool; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE],
}

impl ShapeMatrix {
    /// Build a matrix from rows of `0`/`1`.
    fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = v != 0;
            }
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// Spawn (rotation-0) orientation of a shape kind.
    pub fn spawn(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::I => Self::from_rows([
                [0, 0, 0, 0],
                [1, 1, 1, 1],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ]),
            ShapeKind::O => Self::from_rows([[1, 1], [1, 1]]),
            ShapeKind::T => Self::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
            ShapeKind::S => Self::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
            ShapeKind::Z => Self::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
            ShapeKind::J => Self::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
            ShapeKind::L => Self::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the cell at matrix column `x`, row `y` is occupied.
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.size as usize && y < self.size as usize && self.cells[y][x]
    }

    /// Occupied cells as (column, row) offsets, row-major.
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |y| {
            (0..n)
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Rotate 90° clockwise.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        for y in 0..n {
            for x in 0..n {
                cells[x][n - 1 - y] = self.cells[y][x];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Rows of the matrix as strings of `#` and `.` (for previews and tests).
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        let n = self.size as usize;
        (0..n).map(move |y| {
            (0..n)
                .map(|x| if self.cells[y][x] { '#' } else { '.' })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(m: &ShapeMatrix) -> Vec<String> {
        m.rows().collect()
    }

    #[test]
    fn every_shape_has_four_cells() {
        for kind in ShapeKind::ALL {
            let m = ShapeMatrix::spawn(kind);
            assert_eq!(m.filled().count(), 4, "{kind:?}");
            assert_eq!(m.size(), kind.matrix_size());
        }
    }

    #[test]
    fn t_rotates_clockwise() {
        let t = ShapeMatrix::spawn(ShapeKind::T).rotated_cw();
        assert_eq!(render(&t), vec![".#.", ".##", ".#."]);
    }

    #[test]
    fn i_rotates_into_column_two() {
        let i = ShapeMatrix::spawn(ShapeKind::I).rotated_cw();
        assert_eq!(render(&i), vec!["..#.", "..#.", "..#.", "..#."]);
    }

    #[test]
    fn o_is_rotation_invariant() {
        let o = ShapeMatrix::spawn(ShapeKind::O);
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn four_rotations_are_identity() {
        for kind in ShapeKind::ALL {
            let m = ShapeMatrix::spawn(kind);
            let back = m.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, m, "{kind:?}");
        }
    }

    #[test]
    fn filled_is_row_major() {
        let j = ShapeMatrix::spawn(ShapeKind::J);
        let cells: Vec<_> = j.filled().collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 1), (2, 1)]);
    }
}
