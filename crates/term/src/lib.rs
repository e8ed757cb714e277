//! Terminal renderer for the emoji block game.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders into a simple framebuffer that is diffed and flushed to a
//! crossterm backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw emoji skins as two-column glyphs without tearing them apart
//! - Avoid redrawing static screens every frame

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use emoji_tetris_core as core;
pub use emoji_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{skin_glyph, wildcard_token, AnchorY, GameView, SkinGlyph, Viewport};
pub use render_throttle::{snapshot_fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
