//! Skin catalog: the ordered set of visual tokens pieces can wear.
//!
//! Labels are opaque to the simulation. The catalog is never empty; an empty
//! input falls back to the built-in emoji set.

use crate::types::SkinToken;

/// Built-in skins used until (or unless) custom assets are available.
pub const DEFAULT_SKINS: [&str; 7] = ["🔴", "🟠", "🟡", "🟢", "🔵", "🟣", "🟤"];

/// Largest catalog a [`SkinToken`] can address.
pub const MAX_SKINS: usize = u16::MAX as usize + 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinCatalog {
    labels: Vec<String>,
    fallback: bool,
}

impl SkinCatalog {
    /// Build a catalog from labels. Blank labels are dropped; if nothing is
    /// left the built-in set is used. Labels past [`MAX_SKINS`] are ignored.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels
            .into_iter()
            .map(Into::into)
            .filter(|l: &String| !l.trim().is_empty())
            .collect();
        if labels.len() > MAX_SKINS {
            log::warn!(
                "skin catalog has {} entries, keeping the first {MAX_SKINS}",
                labels.len()
            );
            labels.truncate(MAX_SKINS);
        }
        if labels.is_empty() {
            log::warn!("skin catalog is empty, using built-in skins");
            return Self::builtin();
        }
        Self {
            labels,
            fallback: false,
        }
    }

    pub fn builtin() -> Self {
        Self {
            labels: DEFAULT_SKINS.iter().map(|s| s.to_string()).collect(),
            fallback: true,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// True when the built-in set is in use.
    pub fn is_builtin(&self) -> bool {
        self.fallback
    }

    /// Label for a token. Tokens from an older, larger catalog wrap around.
    pub fn label(&self, token: SkinToken) -> &str {
        &self.labels[token.index() % self.labels.len()]
    }

    pub fn tokens(&self) -> impl Iterator<Item = SkinToken> {
        // len <= MAX_SKINS, so every index fits in a u16.
        (0..self.labels.len()).map(|i| SkinToken(i as u16))
    }
}

impl Default for SkinCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_falls_back_to_builtin() {
        let catalog = SkinCatalog::new(Vec::<String>::new());
        assert!(catalog.is_builtin());
        assert_eq!(catalog.len(), DEFAULT_SKINS.len());
    }

    #[test]
    fn blank_labels_are_dropped() {
        let catalog = SkinCatalog::new(["  ", "party_parrot", ""]);
        assert!(!catalog.is_builtin());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.label(SkinToken(0)), "party_parrot");
    }

    #[test]
    fn oversized_catalog_is_capped_at_token_range() {
        let catalog = SkinCatalog::new((0..MAX_SKINS + 10).map(|i| format!("skin_{i}")));
        assert_eq!(catalog.len(), MAX_SKINS);
        assert_eq!(catalog.tokens().count(), MAX_SKINS);
        assert_eq!(catalog.tokens().last(), Some(SkinToken(u16::MAX)));
        assert_eq!(catalog.label(SkinToken(u16::MAX)), format!("skin_{}", u16::MAX));
    }

    #[test]
    fn full_token_range_yields_every_token() {
        let catalog = SkinCatalog::new((0..MAX_SKINS).map(|i| format!("skin_{i}")));
        assert_eq!(catalog.tokens().count(), catalog.len());
    }

    #[test]
    fn out_of_range_tokens_wrap() {
        let catalog = SkinCatalog::new(["a", "b", "c"]);
        assert_eq!(catalog.label(SkinToken(4)), "b");
    }
}
