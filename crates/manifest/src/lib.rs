//! Static-manifest lookup for the Orbiter world-state client.
//!
//! The world-state feed identifies everything by internal path-like ids
//! (`/Lotus/Types/...`, solar node codes, challenge ids). This crate
//! models the reference dataset that maps those ids to localized
//! display data, exposes the [`ManifestLookup`] trait the client is
//! written against, and provides [`StaticManifest`], a pre-warmed
//! in-memory implementation loadable from JSON.

pub mod lookup;
pub mod static_manifest;
pub mod types;

pub use lookup::ManifestLookup;
pub use static_manifest::{ManifestData, ManifestError, RefreshFn, StaticManifest};
pub use types::{
    ChallengeEntry, ItemEntry, LocalizedChallenge, LocalizedItem, LocalizedNode,
    NightwaveManifest, NodeEntry,
};
