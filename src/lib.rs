//! Emoji Tetris (workspace facade crate).
//!
//! This package exposes `emoji_tetris::{core,input,settings,term,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub mod config;

pub use emoji_tetris_core as core;
pub use emoji_tetris_input as input;
pub use emoji_tetris_settings as settings;
pub use emoji_tetris_term as term;
pub use emoji_tetris_types as types;

pub use config::AppConfig;
