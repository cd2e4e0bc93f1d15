//! The world-state client and its per-feature extraction operations.
//!
//! Each operation reads specific top-level keys of the fetched
//! document, normalizes millisecond timestamps to whole seconds,
//! substitutes internal identifiers with manifest lookups, and returns
//! a plain structured record.
//!
//! # Fetch policy
//!
//! The feed is fetched per feature, not on a uniform schedule:
//!
//! | Operation                      | Fetch policy                           |
//! |--------------------------------|----------------------------------------|
//! | [`baro`](WorldStateClient::baro), [`archon`](WorldStateClient::archon), [`nightwave`](WorldStateClient::nightwave) | only if no document was ever loaded |
//! | [`varzia`](WorldStateClient::varzia) | if no document, or the cached window expired |
//! | [`sortie`](WorldStateClient::sortie) | cached result reused until its own expiry |
//! | [`fissures`](WorldStateClient::fissures), [`void_storms`](WorldStateClient::void_storms), [`daily_deals`](WorldStateClient::daily_deals) | every call (high-churn collections) |
//!
//! The policies differ on purpose; callers relying on freshness should
//! pick the operation accordingly.

use std::collections::BTreeMap;

use orbiter_core::settings::{Settings, SettingsError};
use orbiter_core::types::{EpochSeconds, PricePair};
use orbiter_manifest::ManifestLookup;
use serde::Serialize;
use serde_json::{json, Value};

use crate::cache::CacheEntry;
use crate::document;
use crate::error::WorldStateError;
use crate::source::WorldStateSource;

/// Baro Ki'Teer's current visit: where, when, and what he sells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaroInventory {
    /// Arrival time, epoch seconds.
    pub arrival: EpochSeconds,
    /// Departure time, epoch seconds.
    pub expiry: EpochSeconds,
    /// Relay node name, or the raw node id if unresolved.
    pub node: String,
    /// System/planet of the node, or `"Unknown"` if unresolved.
    pub system: String,
    /// Resolved item display name → prices.
    pub items: BTreeMap<String, PricePair>,
}

/// Varzia's current Prime Resurgence rotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarziaInventory {
    /// Rotation start, epoch seconds.
    pub start: EpochSeconds,
    /// Rotation end, epoch seconds.
    pub end: EpochSeconds,
    /// Resolved item display name → prices. Items whose id has no
    /// manifest match are skipped.
    pub items: BTreeMap<String, PricePair>,
}

/// The current sortie: window, boss, and mission list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sortie {
    /// Sortie start, epoch seconds.
    pub start: EpochSeconds,
    /// Sortie end, epoch seconds.
    pub end: EpochSeconds,
    /// Boss name as given by the feed.
    pub boss: String,
    /// Raw mission records with `node` resolved in place.
    pub missions: Vec<Value>,
}

/// The current archon hunt: window, archon, and mission list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchonHunt {
    /// Hunt start, epoch seconds.
    pub start: EpochSeconds,
    /// Hunt end, epoch seconds.
    pub end: EpochSeconds,
    /// Archon name as given by the feed.
    pub boss: String,
    /// Raw mission records with `node` resolved in place.
    pub missions: Vec<Value>,
}

/// In-memory feed state accumulated by one client instance.
///
/// Lifecycles: `document` is replaced wholesale on every fetch and
/// lives until the next one; `sortie` lives until the sortie's own
/// in-game end; `varzia` records the rotation window so the next call
/// can decide whether a refetch is due. Nothing here is persisted.
#[derive(Debug, Default)]
struct FeedState {
    document: Option<Value>,
    sortie: Option<CacheEntry<Sortie>>,
    varzia: Option<CacheEntry<VarziaInventory>>,
}

/// Client over a [`WorldStateSource`] and a [`ManifestLookup`].
///
/// Synchronous and single-threaded: every operation takes `&mut self`
/// and blocks on the transport when a fetch is due. Not designed for
/// concurrent access; use one instance per logical thread of control.
pub struct WorldStateClient<S, M> {
    source: S,
    manifest: M,
    language: String,
    state: FeedState,
}

impl<S, M> WorldStateClient<S, M>
where
    S: WorldStateSource,
    M: ManifestLookup,
{
    /// Build a client with an explicit language code (e.g. `"en"`).
    ///
    /// The language selects which localized sub-field is read from
    /// manifest records. The manifest is expected to be pre-warmed.
    pub fn new(source: S, manifest: M, language: impl Into<String>) -> Self {
        Self {
            source,
            manifest,
            language: language.into(),
            state: FeedState::default(),
        }
    }

    /// Build a client reading the language from the local settings
    /// file (`setting.json`, `language` field).
    pub fn from_settings(source: S, manifest: M) -> Result<Self, SettingsError> {
        let settings = Settings::load()?;
        Ok(Self::new(source, manifest, settings.language))
    }

    /// The language code this client resolves display names with.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The injected manifest collaborator.
    pub fn manifest(&self) -> &M {
        &self.manifest
    }

    /// Baro Ki'Teer's current visit.
    ///
    /// Fetches only if no document has ever been loaded. Items with no
    /// manifest match keep their raw id as the display name; an
    /// unresolved relay node falls back to the raw id with system
    /// `"Unknown"`.
    pub fn baro(&mut self) -> Result<BaroInventory, WorldStateError> {
        let record = document::first(self.document(false)?, "VoidTraders")?.clone();

        let arrival = document::timestamp(document::get(&record, "Activation")?)?;
        let expiry = document::timestamp(document::get(&record, "Expiry")?)?;

        let node_id = document::str_field(&record, "Node")?;
        let (node, system) = match self
            .manifest
            .node(node_id)
            .and_then(|entry| entry.localized(&self.language))
        {
            Some(localized) => (localized.name.clone(), localized.system.clone()),
            None => (node_id.to_string(), "Unknown".to_string()),
        };

        // `Manifest` is absent between visits; treat that as an empty
        // inventory rather than an error.
        let offers = record
            .get("Manifest")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut items = BTreeMap::new();
        for offer in &offers {
            let item_id = document::str_field(offer, "ItemType")?;
            let name = match self
                .manifest
                .item(item_id)
                .and_then(|entry| entry.localized(&self.language))
            {
                Some(localized) => localized.item_name.clone(),
                None => item_id.to_string(),
            };
            items.insert(name, serde_json::from_value::<PricePair>(offer.clone())?);
        }

        tracing::debug!(node = %node, item_count = items.len(), "Extracted Baro inventory");
        Ok(BaroInventory {
            arrival,
            expiry,
            node,
            system,
            items,
        })
    }

    /// Varzia's current Prime Resurgence rotation.
    ///
    /// Fetches if no document has been loaded, or if the previously
    /// extracted rotation's end has already passed. Item ids are
    /// rewritten by replacing `"/StoreItems/"` with `"/"` before
    /// lookup; ids with no manifest match are silently skipped.
    pub fn varzia(&mut self) -> Result<VarziaInventory, WorldStateError> {
        let now = Self::now();
        let stale = match &self.state.varzia {
            Some(entry) => !entry.is_fresh(now),
            None => false,
        };

        let record = document::first(self.document(stale)?, "PrimeVaultTraders")?.clone();

        let start = document::timestamp(document::get(&record, "Activation")?)?;
        let end = document::timestamp(document::get(&record, "Expiry")?)?;

        let mut items = BTreeMap::new();
        for offer in document::array_field(&record, "Manifest")? {
            let item_id = document::str_field(&offer, "ItemType")?;
            let game_ref = item_id.replace("/StoreItems/", "/");
            let Some(localized) = self
                .manifest
                .item(&game_ref)
                .and_then(|entry| entry.localized(&self.language))
            else {
                continue;
            };
            items.insert(
                localized.item_name.clone(),
                serde_json::from_value::<PricePair>(offer.clone())?,
            );
        }

        let inventory = VarziaInventory { start, end, items };
        self.state.varzia = Some(CacheEntry::new(inventory.clone(), Some(end)));
        tracing::debug!(item_count = inventory.items.len(), end, "Extracted Varzia rotation");
        Ok(inventory)
    }

    /// The current sortie.
    ///
    /// Returns the cached record without refetching while a document
    /// exists and the cached sortie has not reached its own end;
    /// otherwise fetches fresh and rebuilds the cache. Mission `node`
    /// ids are resolved in place.
    pub fn sortie(&mut self) -> Result<Sortie, WorldStateError> {
        if self.state.document.is_some() {
            if let Some(entry) = &self.state.sortie {
                if entry.is_fresh(Self::now()) {
                    tracing::debug!(end = ?entry.valid_until, "Returning cached sortie");
                    return Ok(entry.value.clone());
                }
            }
        }

        let record = document::first(self.document(true)?, "Sorties")?.clone();

        let start = document::timestamp(document::get(&record, "Activation")?)?;
        let end = document::timestamp(document::get(&record, "Expiry")?)?;
        let boss = document::str_field(&record, "Boss")?.to_string();

        let mut missions = document::array_field(&record, "Variants")?;
        for mission in &mut missions {
            self.resolve_mission_node(mission, "node")?;
        }

        let sortie = Sortie {
            start,
            end,
            boss,
            missions,
        };
        self.state.sortie = Some(CacheEntry::new(sortie.clone(), Some(end)));
        Ok(sortie)
    }

    /// The current archon hunt.
    ///
    /// Fetches only if no document has ever been loaded. Mission
    /// `node` ids are resolved in place.
    pub fn archon(&mut self) -> Result<ArchonHunt, WorldStateError> {
        let record = document::first(self.document(false)?, "LiteSorties")?.clone();

        let start = document::timestamp(document::get(&record, "Activation")?)?;
        let end = document::timestamp(document::get(&record, "Expiry")?)?;
        let boss = document::str_field(&record, "Boss")?.to_string();

        let mut missions = document::array_field(&record, "Missions")?;
        for mission in &mut missions {
            self.resolve_mission_node(mission, "node")?;
        }

        Ok(ArchonHunt {
            start,
            end,
            boss,
            missions,
        })
    }

    /// Currently active void fissure missions.
    ///
    /// Always fetches fresh; the fissure list churns continuously.
    pub fn fissures(&mut self) -> Result<Vec<Value>, WorldStateError> {
        self.mission_feed("ActiveMissions")
    }

    /// Currently active void storm missions.
    ///
    /// Always fetches fresh, same as [`fissures`](Self::fissures).
    pub fn void_storms(&mut self) -> Result<Vec<Value>, WorldStateError> {
        self.mission_feed("VoidStorms")
    }

    /// Darvo's current daily deal record with both timestamps
    /// normalized to seconds.
    ///
    /// Always fetches fresh; `AmountSold` changes continuously.
    pub fn daily_deals(&mut self) -> Result<Value, WorldStateError> {
        let mut record = document::get(self.document(true)?, "DailyDeals")?.clone();
        document::normalize_timestamp(&mut record, "Activation")?;
        document::normalize_timestamp(&mut record, "Expiry")?;
        Ok(record)
    }

    /// The current Nightwave season, or `None` if the feed carries no
    /// season info (between seasons).
    ///
    /// Operates on whatever document is in memory, fetching only if
    /// none was ever loaded. If the document's `AffiliationTag`
    /// differs from the manifest's cached tag, the manifest is asked
    /// to [`update`](ManifestLookup::update) itself before challenges
    /// are resolved. Challenges with no manifest match get the
    /// `"Unknown"`/`"Unknown"` name/standing pair.
    pub fn nightwave(&mut self) -> Result<Option<Value>, WorldStateError> {
        let mut season = match self.document(false)?.get("SeasonInfo") {
            Some(season) => season.clone(),
            None => return Ok(None),
        };

        document::normalize_timestamp(&mut season, "Activation")?;
        document::normalize_timestamp(&mut season, "Expiry")?;

        let tag = document::str_field(&season, "AffiliationTag")?.to_string();
        if self.manifest.nightwave_affiliation_tag() != Some(tag.as_str()) {
            tracing::info!(affiliation_tag = %tag, "Season changed; refreshing manifest");
            self.manifest.update()?;
        }

        let mut challenges = document::array_field(&season, "ActiveChallenges")?;
        for challenge in &mut challenges {
            document::remove_key(challenge, "_id")?;
            document::normalize_timestamp(challenge, "Activation")?;
            document::normalize_timestamp(challenge, "Expiry")?;

            let id = document::str_field(challenge, "Challenge")?.to_string();
            let resolved = self.manifest.nightwave_challenge(&id).and_then(|entry| {
                entry
                    .localized(&self.language)
                    .map(|localized| (localized.name.clone(), entry.standing))
            });
            let map = challenge
                .as_object_mut()
                .ok_or_else(|| WorldStateError::shape("ActiveChallenges[] (expected object)"))?;
            match resolved {
                Some((name, standing)) => {
                    map.insert("name".to_string(), Value::from(name));
                    map.insert("standing".to_string(), Value::from(standing));
                }
                None => {
                    map.insert("name".to_string(), Value::from("Unknown"));
                    map.insert("standing".to_string(), Value::from("Unknown"));
                }
            }
        }

        let map = season
            .as_object_mut()
            .ok_or_else(|| WorldStateError::shape("SeasonInfo (expected object)"))?;
        map.insert("ActiveChallenges".to_string(), Value::from(challenges));
        map.remove("Params")
            .ok_or_else(|| WorldStateError::missing_key("Params"))?;
        map.remove("Phase")
            .ok_or_else(|| WorldStateError::missing_key("Phase"))?;
        map.remove("Season")
            .ok_or_else(|| WorldStateError::missing_key("Season"))?;

        Ok(Some(season))
    }

    // ---- private helpers ----

    /// Current wall-clock time in epoch seconds.
    fn now() -> EpochSeconds {
        chrono::Utc::now().timestamp()
    }

    /// The in-memory document, fetching when `refetch` is set or none
    /// was ever loaded.
    fn document(&mut self, refetch: bool) -> Result<&Value, WorldStateError> {
        if refetch || self.state.document.is_none() {
            let doc = self.source.fetch()?;
            self.state.document = Some(doc);
        }
        Ok(self.state.document.as_ref().expect("document was just set"))
    }

    /// Always-fresh extraction shared by fissures and void storms:
    /// normalize timestamps, resolve the node, strip internal fields.
    fn mission_feed(&mut self, collection: &'static str) -> Result<Vec<Value>, WorldStateError> {
        let mut missions = document::array_field(self.document(true)?, collection)?;
        for mission in &mut missions {
            document::normalize_timestamp(mission, "Activation")?;
            document::normalize_timestamp(mission, "Expiry")?;
            self.resolve_mission_node(mission, "Node")?;
            document::remove_key(mission, "_id")?;
            document::remove_key(mission, "Region")?;
            document::remove_key(mission, "Seed")?;
        }
        tracing::debug!(collection, count = missions.len(), "Extracted mission feed");
        Ok(missions)
    }

    /// Replace the node id at `mission[key]` with its localized
    /// `{name, system}` object; an unresolved id stays as-is.
    fn resolve_mission_node(&self, mission: &mut Value, key: &str) -> Result<(), WorldStateError> {
        let node_id = document::str_field(mission, key)?;
        let Some(localized) = self
            .manifest
            .node(node_id)
            .and_then(|entry| entry.localized(&self.language))
        else {
            return Ok(());
        };
        let resolved = json!({
            "name": localized.name,
            "system": localized.system,
        });
        let map = mission
            .as_object_mut()
            .ok_or_else(|| WorldStateError::shape("mission (expected object)"))?;
        map.insert(key.to_string(), resolved);
        Ok(())
    }
}
