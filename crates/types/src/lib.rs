//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, input dispatch, rendering, persistence).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn row**: 0, horizontally centered on the shape matrix
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 100 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Hard floor for gravity |
//! | `SOFT_DROP_INTERVAL_MS` | 50 | Gravity while soft dropping |
//! | `MAX_FRAME_DELTA_MS` | 100 | Longer frames are treated as stalls |
//! | `NOMINAL_FRAME_MS` | 16.67 | Frame cap on constrained devices |
//! | `SLOW_MOTION_MS` | 1000 | Slow-motion window after a 4-line clear |
//!
//! # Auto-Repeat Timing
//!
//! | Direction | Initial delay | Interval |
//! |-----------|---------------|----------|
//! | left / right | 200ms | 100ms |
//! | down | 100ms | 50ms |
//!
//! # Examples
//!
//! ```
//! use emoji_tetris_types::{GameAction, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//! assert_eq!(kind.matrix_size(), 3);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of upcoming pieces kept in the spawn queue
pub const QUEUE_DEPTH: usize = 4;

/// Number of upcoming pieces exposed to renderers
pub const PREVIEW_DEPTH: usize = 3;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level gained
pub const DROP_INTERVAL_STEP_MS: u32 = 100;

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Drop interval while soft drop is held
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Frames longer than this are skipped instead of simulated
pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

/// Nominal frame duration used to cap deltas on constrained devices
pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;

/// Slow-motion window requested by a 4-line clear
pub const SLOW_MOTION_MS: u32 = 1000;

/// Time multiplier applied while slow motion is active
pub const SLOW_MOTION_FACTOR: f64 = 0.3;

/// Minimum lines in one lock that counts as a completed round
pub const ROUND_COMPLETE_MIN_LINES: usize = 2;

/// Hard drop points per cell dropped
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Soft drop points per forced step
pub const SOFT_DROP_POINTS_PER_STEP: u32 = 1;

/// Every Nth generated piece may become a wildcard
pub const WILDCARD_PERIOD: u64 = 7;

/// Probability that an eligible piece becomes a wildcard
pub const WILDCARD_CHANCE: f64 = 0.3;

/// Horizontal auto-repeat initial delay
pub const HORIZONTAL_REPEAT_DELAY_MS: u32 = 200;

/// Horizontal auto-repeat interval
pub const HORIZONTAL_REPEAT_INTERVAL_MS: u32 = 100;

/// Downward auto-repeat initial delay
pub const DOWN_REPEAT_DELAY_MS: u32 = 100;

/// Downward auto-repeat interval
pub const DOWN_REPEAT_INTERVAL_MS: u32 = 50;

/// Line clear scoring table
///
/// Base points for clearing N lines in one lock:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by the current level (1-based).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];


/// The seven tetromino shape kinds
///
/// Shape identity never changes during a piece's life; only the
/// orientation of its matrix does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// All kinds in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use emoji_tetris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
        }
    }

    /// Side length of the square matrix holding this shape
    pub fn matrix_size(&self) -> u8 {
        match self {
            ShapeKind::I => 4,
            ShapeKind::O => 2,
            _ => 3,
        }
    }
}

/// Opaque identifier of a visual skin (an index into the skin catalog).
///
/// The simulation never interprets the token; renderers resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SkinToken(pub u16);

impl SkinToken {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A locked block on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub token: SkinToken,
    /// Rendered with a cycling skin; has no effect on the simulation.
    pub wildcard: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Block)`: Cell filled with a locked block
pub type Cell = Option<Block>;

/// Lifecycle state of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
        }
    }
}

/// Discrete actions produced by input adapters
///
/// Each action is delivered with press/release semantics (see [`ActionEdge`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left (auto-repeats while held)
    MoveLeft,
    /// Move piece one cell right (auto-repeats while held)
    MoveRight,
    /// Move piece one cell down (auto-repeats while held)
    MoveDown,
    /// Begin continuous soft drop
    SoftDropStart,
    /// End continuous soft drop
    SoftDropStop,
    /// Instantly drop piece to lowest valid position
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Swap active piece with the hold slot
    Hold,
    /// Toggle pause state
    Pause,
    /// Restart the game
    Restart,
}

impl GameAction {
    pub const ALL: [GameAction; 10] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::MoveDown,
        GameAction::SoftDropStart,
        GameAction::SoftDropStop,
        GameAction::HardDrop,
        GameAction::Rotate,
        GameAction::Hold,
        GameAction::Pause,
        GameAction::Restart,
    ];

    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use emoji_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("softdropstart"), Some(GameAction::SoftDropStart));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "softdropstart" => Some(GameAction::SoftDropStart),
            "softdropstop" => Some(GameAction::SoftDropStop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropStop => "softDropStop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }

    /// Whether holding this action triggers auto-repeat
    pub fn repeats(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::MoveDown
        )
    }
}

/// Press/release edge delivered with an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionEdge {
    Press,
    Release,
}
