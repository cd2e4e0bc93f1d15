//! Pre-warmed in-memory manifest implementation.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::lookup::ManifestLookup;
use crate::types::{ChallengeEntry, ItemEntry, NightwaveManifest, NodeEntry};

/// The full manifest dataset, as loaded from disk or produced by a
/// refresh source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestData {
    /// Solar node id → per-language display data.
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeEntry>,
    /// Item id → per-language display data.
    #[serde(default)]
    pub items: BTreeMap<String, ItemEntry>,
    /// Nightwave season tag + challenge table.
    #[serde(default)]
    pub nightwave: NightwaveManifest,
}

/// Errors from loading or refreshing manifest data.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest file {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest file is not valid JSON for [`ManifestData`].
    #[error("failed to parse manifest file {path}: {source}")]
    Parse {
        /// Path that was attempted.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A refresh source failed to produce new data.
    #[error("manifest refresh failed: {0}")]
    Refresh(String),
}

/// Callback that produces a fresh [`ManifestData`] snapshot.
pub type RefreshFn = Box<dyn FnMut() -> Result<ManifestData, ManifestError> + Send>;

/// [`ManifestLookup`] over an in-memory [`ManifestData`] snapshot.
///
/// How the snapshot is produced is the caller's concern: load it from a
/// JSON file with [`from_file`](Self::from_file), construct it in code,
/// or attach a refresh source with [`with_refresh`](Self::with_refresh)
/// so that [`update`](ManifestLookup::update) can replace the snapshot
/// on demand. Without a refresh source, `update` is a logged no-op.
pub struct StaticManifest {
    data: ManifestData,
    refresh: Option<RefreshFn>,
}

impl StaticManifest {
    /// Wrap an already-built dataset.
    pub fn new(data: ManifestData) -> Self {
        Self {
            data,
            refresh: None,
        }
    }

    /// Load the dataset from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let data = serde_json::from_str(&text).map_err(|source| ManifestError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(data))
    }

    /// Attach a refresh source invoked by [`ManifestLookup::update`].
    pub fn with_refresh(mut self, refresh: RefreshFn) -> Self {
        self.refresh = Some(refresh);
        self
    }

    /// The current dataset snapshot.
    pub fn data(&self) -> &ManifestData {
        &self.data
    }
}

impl ManifestLookup for StaticManifest {
    fn node(&self, id: &str) -> Option<&NodeEntry> {
        self.data.nodes.get(id)
    }

    fn item(&self, game_ref: &str) -> Option<&ItemEntry> {
        self.data.items.get(game_ref)
    }

    fn nightwave_challenge(&self, id: &str) -> Option<&ChallengeEntry> {
        self.data.nightwave.challenges.get(id)
    }

    fn nightwave_affiliation_tag(&self) -> Option<&str> {
        self.data.nightwave.affiliation_tag.as_deref()
    }

    fn update(&mut self) -> Result<(), ManifestError> {
        match self.refresh.as_mut() {
            Some(refresh) => {
                self.data = refresh()?;
                tracing::info!(
                    nodes = self.data.nodes.len(),
                    items = self.data.items.len(),
                    challenges = self.data.nightwave.challenges.len(),
                    "Manifest data refreshed",
                );
                Ok(())
            }
            None => {
                tracing::debug!("Manifest update requested but no refresh source is attached");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocalizedNode;
    use assert_matches::assert_matches;

    fn sample_data() -> ManifestData {
        let mut data = ManifestData::default();
        data.nodes.insert(
            "SolNode36".into(),
            NodeEntry::new([(
                "en".into(),
                LocalizedNode {
                    name: "Marduk".into(),
                    system: "Void".into(),
                },
            )]),
        );
        data
    }

    #[test]
    fn lookups_read_the_snapshot() {
        let manifest = StaticManifest::new(sample_data());
        let node = manifest.node("SolNode36").unwrap();
        assert_eq!(node.localized("en").unwrap().name, "Marduk");
        assert!(manifest.node("SolNode999").is_none());
        assert!(manifest.nightwave_affiliation_tag().is_none());
    }

    #[test]
    fn update_without_refresh_source_is_a_no_op() {
        let mut manifest = StaticManifest::new(sample_data());
        manifest.update().unwrap();
        assert!(manifest.node("SolNode36").is_some());
    }

    #[test]
    fn update_replaces_the_snapshot_via_refresh_source() {
        let mut manifest = StaticManifest::new(ManifestData::default())
            .with_refresh(Box::new(|| Ok(sample_data())));
        assert!(manifest.node("SolNode36").is_none());
        manifest.update().unwrap();
        assert!(manifest.node("SolNode36").is_some());
    }

    #[test]
    fn update_propagates_refresh_failure() {
        let mut manifest = StaticManifest::new(ManifestData::default())
            .with_refresh(Box::new(|| Err(ManifestError::Refresh("export down".into()))));
        assert_matches!(manifest.update(), Err(ManifestError::Refresh(_)));
    }

    #[test]
    fn manifest_data_parses_from_json() {
        let data: ManifestData = serde_json::from_str(
            r#"{
                "nodes": {"SolNode1": {"en": {"name": "Galatea", "system": "Neptune"}}},
                "items": {"/Lotus/Types/Prisma": {"en": {"name": "Prisma", "item_name": "Prisma Gorgon"}}},
                "nightwave": {
                    "affiliationTag": "RadioLegionIntermission13Syndicate",
                    "challenges": {"/Lotus/Challenge/Daily": {"standing": 1000, "en": {"name": "Polarized"}}}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(data.nodes.len(), 1);
        assert_eq!(
            data.nightwave.affiliation_tag.as_deref(),
            Some("RadioLegionIntermission13Syndicate")
        );
        assert_eq!(
            data.nightwave.challenges["/Lotus/Challenge/Daily"].standing,
            1000
        );
    }
}
