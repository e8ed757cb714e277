//! Persistence for the emoji block game: player settings, asset manifests,
//! and a high-score recorder.
//!
//! Everything here does file I/O and returns `anyhow::Result`; the core
//! crate stays free of it.

pub mod manifest;
pub mod recorder;
pub mod settings;

pub use emoji_tetris_core as core;
pub use emoji_tetris_types as types;

pub use manifest::{SkinEntry, SkinManifest, SoundEntry, SoundManifest};
pub use recorder::HighScoreRecorder;
pub use settings::{Settings, SettingsStore};
