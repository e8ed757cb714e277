//! Asset manifests for custom skins and sounds.
//!
//! Manifests are JSON files produced by the asset fetcher. Only the fields
//! the game uses are modelled; everything else is ignored.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use emoji_tetris_core::SkinCatalog;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkinEntry {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub url: Option<String>,
    /// Catalog position; entries without one keep their file order.
    #[serde(default)]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkinManifest {
    #[serde(default)]
    pub emojis: Vec<SkinEntry>,
}

impl SkinManifest {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse skin manifest")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Skin names ordered by catalog index.
    pub fn labels(&self) -> Vec<&str> {
        let mut entries: Vec<(u32, usize, &SkinEntry)> = self
            .emojis
            .iter()
            .enumerate()
            .map(|(pos, e)| (e.index.unwrap_or(pos as u32), pos, e))
            .collect();
        entries.sort_by_key(|&(index, pos, _)| (index, pos));
        entries.into_iter().map(|(_, _, e)| e.name.as_str()).collect()
    }

    /// Build a catalog. An empty manifest yields the built-in skins.
    pub fn to_catalog(&self) -> SkinCatalog {
        SkinCatalog::new(self.labels())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoundEntry {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub emoji: Option<String>,
    /// Source volume in `0.0..=1.0`.
    #[serde(default = "default_sound_volume")]
    pub volume: f32,
    #[serde(default)]
    pub index: Option<u32>,
}

fn default_sound_volume() -> f32 {
    1.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SoundManifest {
    #[serde(default)]
    pub sounds: Vec<SoundEntry>,
}

impl SoundManifest {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse sound manifest")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sounds.iter().map(|s| s.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&SoundEntry> {
        self.sounds.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skins_ordered_by_index() {
        let m = SkinManifest::from_json(
            r#"{
                "emojis": [
                    {"id": "1", "name": "blob", "filename": "blob_1.png", "animated": false, "index": 2},
                    {"id": "2", "name": "cat", "filename": "cat_2.gif", "animated": true, "index": 0},
                    {"id": "3", "name": "dog", "filename": "dog_3.png", "animated": false, "index": 1}
                ],
                "guildName": "ignored"
            }"#,
        )
        .unwrap();
        assert_eq!(m.labels(), vec!["cat", "dog", "blob"]);

        let catalog = m.to_catalog();
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_builtin());
    }

    #[test]
    fn missing_index_keeps_file_order() {
        let m = SkinManifest::from_json(r#"{"emojis": [{"name": "b"}, {"name": "a"}]}"#).unwrap();
        assert_eq!(m.labels(), vec!["b", "a"]);
    }

    #[test]
    fn empty_manifest_falls_back() {
        let m = SkinManifest::from_json(r#"{"emojis": []}"#).unwrap();
        assert!(m.to_catalog().is_builtin());
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(SkinManifest::from_json("[").is_err());
        assert!(SoundManifest::from_json("{\"sounds\": 3}").is_err());
    }

    #[test]
    fn sound_lookup() {
        let m = SoundManifest::from_json(
            r#"{"sounds": [
                {"id": "9", "name": "boing", "filename": "boing_9.ogg", "emoji": null, "volume": 0.5, "index": 0},
                {"name": "clack"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.names().collect::<Vec<_>>(), vec!["boing", "clack"]);
        assert_eq!(m.get("boing").map(|s| s.volume), Some(0.5));
        assert_eq!(m.get("clack").map(|s| s.volume), Some(1.0));
        assert!(m.get("missing").is_none());
    }
}
