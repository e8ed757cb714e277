//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block simulation: board, shapes, piece
//! generation, collision, scoring, the session state machine, and the
//! fixed-step loop. It has **no dependencies** on terminals, files, or
//! audio, making it:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is covered by unit tests
//! - **Portable**: any host that can supply timestamps can drive it
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with occupancy tests and atomic row removal
//! - [`shapes`]: the seven shape matrices and clockwise rotation
//! - [`piece`]: a shape matrix anchored on the board with a skin token
//! - [`skins`]: the catalog of opaque skin labels (never empty)
//! - [`spawner`]: random shapes, recency-aware skins, wildcards, the queue
//! - [`resolver`]: collision, movement, and rotation with a 0/-1/+1 kick
//! - [`scoring`]: line-clear points, levels, and gravity speed
//! - [`events`]: observer trait and recorded events
//! - [`game_state`]: [`GameSession`], the lifecycle state machine
//! - [`game_loop`]: [`FixedStepLoop`], frame-time to gravity-step conversion
//! - [`snapshot`]: [`RenderSnapshot`] for renderers
//!
//! # Example
//!
//! ```
//! use emoji_tetris_core::{GameSession, SessionConfig, SkinCatalog};
//! use emoji_tetris_types::{GameAction, GameStatus};
//!
//! let mut game = GameSession::new(
//!     SessionConfig { seed: 12345, high_score: 0 },
//!     SkinCatalog::builtin(),
//! );
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.status(), GameStatus::Playing);
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Gravity starts at 1000ms per row and speeds up by 100ms per level down to
//! 100ms. Soft drop uses a fixed 50ms interval. Call
//! [`FixedStepLoop::frame`](game_loop::FixedStepLoop::frame) every rendered
//! frame with a monotonic timestamp.

pub mod board;
pub mod events;
pub mod game_loop;
pub mod game_state;
pub mod piece;
pub mod resolver;
pub mod scoring;
pub mod shapes;
pub mod skins;
pub mod snapshot;
pub mod spawner;

pub use emoji_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use events::{EventLog, GameEvent, GameObserver, SoundCue};
pub use game_loop::{FixedStepLoop, FrameOutcome, LoopConfig};
pub use game_state::{GameSession, SessionConfig, SlowMotionRequest};
pub use piece::Piece;
pub use resolver::{collides, try_move, try_rotate};
pub use scoring::{drop_interval_for_level, level_for_lines, line_clear_points, Scoring};
pub use shapes::ShapeMatrix;
pub use skins::{SkinCatalog, DEFAULT_SKINS, MAX_SKINS};
pub use snapshot::{ActiveSnapshot, PieceSnapshot, RenderSnapshot};
pub use spawner::{PieceQueue, Spawner};
