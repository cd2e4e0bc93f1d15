//! Client for the Warframe world-state feed.
//!
//! Fetches the live world-state JSON document and extracts per-feature
//! structured records (trader inventories, sorties, fissures, Nightwave
//! season data), translating internal identifiers to localized display
//! names via an injected [`orbiter_manifest::ManifestLookup`].
//!
//! The client is synchronous and single-threaded by design: one
//! instance per logical thread of control, no locking. Callers that
//! need concurrency must serialize access themselves.

pub mod cache;
pub mod client;
pub mod document;
pub mod error;
pub mod source;

pub use client::{ArchonHunt, BaroInventory, Sortie, VarziaInventory, WorldStateClient};
pub use error::WorldStateError;
pub use source::{HttpWorldStateSource, WorldStateSource, WORLD_STATE_URL};
