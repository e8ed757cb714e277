//! Runtime configuration of the terminal host, read from the environment.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::settings::SettingsStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Settings file (`EMOJI_TETRIS_SETTINGS`).
    pub settings_path: PathBuf,
    /// Custom skin manifest (`EMOJI_TETRIS_SKINS`).
    pub skins_manifest: Option<PathBuf>,
    /// Sound manifest (`EMOJI_TETRIS_SOUNDS`).
    pub sounds_manifest: Option<PathBuf>,
    /// Fixed piece seed (`EMOJI_TETRIS_SEED`); random when unset.
    pub seed: Option<u64>,
    /// Constrained device mode (`EMOJI_TETRIS_LOW_POWER`).
    pub low_power: bool,
    /// Log file (`EMOJI_TETRIS_LOG_PATH`); logging is off when unset.
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings_path: SettingsStore::default_path(),
            skins_manifest: None,
            sounds_manifest: None,
            seed: None,
            low_power: false,
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = get("EMOJI_TETRIS_SEED")
            .map(|s| {
                s.parse::<u64>()
                    .with_context(|| format!("EMOJI_TETRIS_SEED is not a number: {s:?}"))
            })
            .transpose()?;

        let low_power = get("EMOJI_TETRIS_LOW_POWER")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            settings_path: get("EMOJI_TETRIS_SETTINGS")
                .map(PathBuf::from)
                .unwrap_or_else(SettingsStore::default_path),
            skins_manifest: get("EMOJI_TETRIS_SKINS").map(PathBuf::from),
            sounds_manifest: get("EMOJI_TETRIS_SOUNDS").map(PathBuf::from),
            seed,
            low_power,
            log_path: get("EMOJI_TETRIS_LOG_PATH").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("EMOJI_TETRIS_SETTINGS", "/tmp/s.json"),
            ("EMOJI_TETRIS_SKINS", "emojis/manifest.json"),
            ("EMOJI_TETRIS_SOUNDS", "sounds/manifest.json"),
            ("EMOJI_TETRIS_SEED", " 42 "),
            ("EMOJI_TETRIS_LOW_POWER", "TRUE"),
            ("EMOJI_TETRIS_LOG_PATH", "game.log"),
        ]))
        .unwrap();
        assert_eq!(cfg.settings_path, PathBuf::from("/tmp/s.json"));
        assert_eq!(cfg.skins_manifest, Some(PathBuf::from("emojis/manifest.json")));
        assert_eq!(cfg.sounds_manifest, Some(PathBuf::from("sounds/manifest.json")));
        assert_eq!(cfg.seed, Some(42));
        assert!(cfg.low_power);
        assert_eq!(cfg.log_path, Some(PathBuf::from("game.log")));
    }

    #[test]
    fn blank_values_are_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[("EMOJI_TETRIS_LOG_PATH", "  ")])).unwrap();
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn bad_seed_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[("EMOJI_TETRIS_SEED", "abc")])).unwrap_err();
        assert!(format!("{err:#}").contains("EMOJI_TETRIS_SEED"));
    }
}
