use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::shapes::ShapeMatrix;
use crate::types::{
    Cell, GameStatus, ShapeKind, SkinToken, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_DEPTH,
};

pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// A piece as the renderer sees it: shape, orientation, and skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub matrix: ShapeMatrix,
    pub token: SkinToken,
    pub wildcard: bool,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            token: value.token,
            wildcard: value.wildcard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub piece: PieceSnapshot,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            piece: value.into(),
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Board coordinates of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.piece
            .matrix
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Everything a renderer needs for one frame.
///
/// `active` is `None` before the first spawn and after game over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderSnapshot {
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceSnapshot>,
    pub next: ArrayVec<PieceSnapshot, PREVIEW_DEPTH>,
    pub can_hold: bool,
    pub status: GameStatus,
    pub soft_dropping: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub high_score: u32,
    pub drop_interval_ms: u32,
}

impl RenderSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.hold = None;
        self.next.clear();
        self.can_hold = true;
        self.status = GameStatus::Idle;
        self.soft_dropping = false;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.high_score = 0;
        self.drop_interval_ms = 0;
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }
}

impl Default for RenderSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            next: ArrayVec::new(),
            can_hold: true,
            status: GameStatus::Idle,
            soft_dropping: false,
            score: 0,
            level: 1,
            lines: 0,
            high_score: 0,
            drop_interval_ms: 0,
        };
        s.clear();
        s
    }
}
