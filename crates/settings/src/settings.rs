//! Persistent player settings stored as a JSON file.
//!
//! Unknown keys are ignored and missing keys take their defaults, so files
//! written by older versions keep loading. The legacy `youtube*` key names
//! are accepted as aliases for the music fields.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Per-sound volume percentage used when a sound has no override.
pub const DEFAULT_SOUND_PERCENT: u32 = 100;

/// Highest per-sound percentage (2x amplification).
pub const MAX_SOUND_PERCENT: u32 = 200;

/// Highest channel volume.
pub const MAX_VOLUME: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(alias = "youtubeVolume")]
    pub music_volume: u32,
    #[serde(alias = "youtubeMuted")]
    pub music_muted: bool,
    pub effects_volume: u32,
    pub effects_muted: bool,
    /// Background media location; empty when unset.
    #[serde(alias = "youtubeUrl")]
    pub media_url: String,
    pub high_score: u32,
    /// Per-sound volume percentages keyed by sound name.
    pub sound_volumes: BTreeMap<String, u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 50,
            music_muted: false,
            effects_volume: 50,
            effects_muted: false,
            media_url: String::new(),
            high_score: 0,
            sound_volumes: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Clamp volumes into their valid ranges.
    pub fn sanitized(mut self) -> Self {
        self.music_volume = self.music_volume.min(MAX_VOLUME);
        self.effects_volume = self.effects_volume.min(MAX_VOLUME);
        for pct in self.sound_volumes.values_mut() {
            *pct = (*pct).min(MAX_SOUND_PERCENT);
        }
        self
    }

    /// Volume percentage configured for `name`.
    pub fn sound_percent(&self, name: &str) -> u32 {
        self.sound_volumes
            .get(name)
            .copied()
            .unwrap_or(DEFAULT_SOUND_PERCENT)
    }

    /// Set the per-sound percentage. Setting it back to the default removes
    /// the override.
    pub fn set_sound_percent(&mut self, name: &str, percent: u32) {
        let percent = percent.min(MAX_SOUND_PERCENT);
        if percent == DEFAULT_SOUND_PERCENT {
            self.sound_volumes.remove(name);
        } else {
            self.sound_volumes.insert(name.to_string(), percent);
        }
    }

    pub fn reset_sound_volumes(&mut self) {
        self.sound_volumes.clear();
    }

    /// Playback gain for a sound effect: effects volume times the sound's
    /// own percentage. 0.0 while effects are muted; at most 2.0.
    pub fn effective_sound_volume(&self, name: &str) -> f32 {
        if self.effects_muted {
            return 0.0;
        }
        let channel = self.effects_volume.min(MAX_VOLUME) as f32 / 100.0;
        let own = self.sound_percent(name).min(MAX_SOUND_PERCENT) as f32 / 100.0;
        channel * own
    }

    /// Music gain in `0.0..=1.0`.
    pub fn effective_music_volume(&self) -> f32 {
        if self.music_muted {
            0.0
        } else {
            self.music_volume.min(MAX_VOLUME) as f32 / 100.0
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_CONFIG_HOME/emoji-tetris/settings.json`, falling back to
    /// `~/.config` and then the working directory.
    pub fn default_path() -> PathBuf {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("emoji-tetris");
        path.push("settings.json");
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings. A missing file yields defaults; an unreadable or
    /// corrupt one is logged and also yields defaults.
    pub fn load(&self) -> Settings {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no settings at {}, using defaults", self.path.display());
                return Settings::default();
            }
            Err(err) => {
                log::warn!("failed to read {}: {err}", self.path.display());
                return Settings::default();
            }
        };
        match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => {
                log::info!("settings loaded from {}", self.path.display());
                settings.sanitized()
            }
            Err(err) => {
                log::warn!("corrupt settings in {}: {err}", self.path.display());
                Settings::default()
            }
        }
    }

    /// Write settings as pretty JSON. The file is replaced atomically.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }
        let text = serde_json::to_string_pretty(settings).context("serialize settings")?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, text).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }

    /// Load, modify, and save in one step.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) -> Result<Settings> {
        let mut settings = self.load();
        f(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}
