//! Error taxonomy for world-state operations.
//!
//! Transport failures and unexpected document shapes abort the whole
//! call; there are no partial results and no retries. Unresolved
//! manifest identifiers are NOT errors — each extractor handles those
//! locally with a fallback ("Unknown") or by skipping the entry.

use orbiter_manifest::ManifestError;

/// Errors from fetching or extracting world-state data.
#[derive(Debug, thiserror::Error)]
pub enum WorldStateError {
    /// The HTTP request itself failed (network, DNS, TLS, decode).
    #[error("world-state request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed returned a non-2xx status code.
    #[error("world-state feed error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The document lacks a key an extractor expected.
    #[error("world-state document missing expected key `{key}`")]
    MissingKey {
        /// The key that was absent.
        key: String,
    },

    /// A value in the document has an unexpected shape (wrong JSON
    /// type, empty collection, unparseable timestamp).
    #[error("unexpected world-state document shape at {context}")]
    Shape {
        /// Where in the document the mismatch was found.
        context: String,
    },

    /// A record could not be decoded into its output shape.
    #[error("failed to decode world-state record: {0}")]
    Decode(#[from] serde_json::Error),

    /// The manifest collaborator failed to refresh itself.
    #[error("manifest refresh failed during extraction: {0}")]
    Manifest(#[from] ManifestError),
}

impl WorldStateError {
    /// Convenience constructor for [`WorldStateError::MissingKey`].
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Convenience constructor for [`WorldStateError::Shape`].
    pub fn shape(context: impl Into<String>) -> Self {
        Self::Shape {
            context: context.into(),
        }
    }
}
