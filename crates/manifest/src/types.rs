//! Manifest record shapes.
//!
//! Every entry is a map keyed by language code; the client picks one
//! language at construction and reads only that sub-record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Localized display data for one solar node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedNode {
    /// Display name, e.g. `"Kala-azar"`.
    pub name: String,
    /// Planet/system the node belongs to, e.g. `"Eris"`.
    pub system: String,
}

/// Per-language display data for a solar node id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeEntry {
    locales: BTreeMap<String, LocalizedNode>,
}

impl NodeEntry {
    /// Build an entry from `(language, localized)` pairs.
    pub fn new(locales: impl IntoIterator<Item = (String, LocalizedNode)>) -> Self {
        Self {
            locales: locales.into_iter().collect(),
        }
    }

    /// Localized node data for `language`, if that locale is present.
    pub fn localized(&self, language: &str) -> Option<&LocalizedNode> {
        self.locales.get(language)
    }
}

/// Localized display data for one tradable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedItem {
    /// Generic display name.
    pub name: String,
    /// Full item name as shown in trade UIs (includes variant suffixes).
    pub item_name: String,
}

/// Per-language display data for an item id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemEntry {
    locales: BTreeMap<String, LocalizedItem>,
}

impl ItemEntry {
    /// Build an entry from `(language, localized)` pairs.
    pub fn new(locales: impl IntoIterator<Item = (String, LocalizedItem)>) -> Self {
        Self {
            locales: locales.into_iter().collect(),
        }
    }

    /// Localized item data for `language`, if that locale is present.
    pub fn localized(&self, language: &str) -> Option<&LocalizedItem> {
        self.locales.get(language)
    }
}

/// Localized name for one Nightwave challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedChallenge {
    /// Display name of the challenge.
    pub name: String,
}

/// Metadata for one Nightwave challenge id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeEntry {
    /// Standing awarded on completion.
    pub standing: i64,
    /// Per-language challenge names.
    #[serde(flatten)]
    locales: BTreeMap<String, LocalizedChallenge>,
}

impl ChallengeEntry {
    /// Build an entry from a standing value and `(language, name)` pairs.
    pub fn new(
        standing: i64,
        locales: impl IntoIterator<Item = (String, LocalizedChallenge)>,
    ) -> Self {
        Self {
            standing,
            locales: locales.into_iter().collect(),
        }
    }

    /// Localized challenge name for `language`, if present.
    pub fn localized(&self, language: &str) -> Option<&LocalizedChallenge> {
        self.locales.get(language)
    }
}

/// Nightwave section of the manifest: the season the data was built
/// against plus its challenge table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightwaveManifest {
    /// Affiliation tag of the season this data describes. `None` until
    /// the manifest has seen a season at all.
    #[serde(rename = "affiliationTag", default)]
    pub affiliation_tag: Option<String>,
    /// Challenge id → metadata.
    #[serde(default)]
    pub challenges: BTreeMap<String, ChallengeEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_entry_deserializes_as_language_map() {
        let entry: NodeEntry = serde_json::from_str(
            r#"{"en": {"name": "Kala-azar", "system": "Eris"},
                "de": {"name": "Kala-azar", "system": "Eris"}}"#,
        )
        .unwrap();
        assert_eq!(entry.localized("en").unwrap().system, "Eris");
        assert!(entry.localized("fr").is_none());
    }

    #[test]
    fn challenge_entry_flattens_locales_next_to_standing() {
        let entry: ChallengeEntry = serde_json::from_str(
            r#"{"standing": 4500, "en": {"name": "Polarized"}}"#,
        )
        .unwrap();
        assert_eq!(entry.standing, 4500);
        assert_eq!(entry.localized("en").unwrap().name, "Polarized");
    }
}
