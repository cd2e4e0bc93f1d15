//! The lookup seam between the world-state client and manifest data.

use crate::static_manifest::ManifestError;
use crate::types::{ChallengeEntry, ItemEntry, NodeEntry};

/// Id → localized-display-data lookups backed by a (semi-)static
/// manifest dataset.
///
/// Implementations are expected to be pre-warmed: every method is a
/// synchronous in-memory read. [`update`](Self::update) is the one
/// exception — it asks the implementation to refresh its own cached
/// data, which the client triggers when the feed's Nightwave season no
/// longer matches [`nightwave_affiliation_tag`](Self::nightwave_affiliation_tag).
pub trait ManifestLookup {
    /// Display data for a solar node id, or `None` if unresolved.
    fn node(&self, id: &str) -> Option<&NodeEntry>;

    /// Display data for an item id, or `None` if unresolved.
    fn item(&self, game_ref: &str) -> Option<&ItemEntry>;

    /// Metadata for a Nightwave challenge id, or `None` if unresolved.
    fn nightwave_challenge(&self, id: &str) -> Option<&ChallengeEntry>;

    /// Affiliation tag of the Nightwave season the cached data was
    /// built against, or `None` if no season data is cached.
    fn nightwave_affiliation_tag(&self) -> Option<&str>;

    /// Refresh the cached data on demand.
    fn update(&mut self) -> Result<(), ManifestError>;
}
