//! Input crate (engine-facing).
//!
//! Maps `crossterm` key events into [`GameAction`](crate::types::GameAction)
//! press/release edges and turns held keys into auto-repeated actions. The
//! dispatcher works for terminals with and without key-release events.

pub mod dispatcher;
pub mod map;

pub use emoji_tetris_types as types;

pub use dispatcher::{ActionDispatcher, ActionSink, DispatcherConfig, RepeatTiming};
pub use map::{action_for_key, handle_key_event, should_quit};
