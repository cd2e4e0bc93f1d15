//! Transport seam for the world-state feed.
//!
//! [`WorldStateSource`] is the one place the client touches the
//! network. Production code uses [`HttpWorldStateSource`] (a blocking
//! `reqwest` GET against the live feed); tests substitute canned
//! documents and fetch counters.

use crate::error::WorldStateError;

/// Live world-state feed endpoint.
pub const WORLD_STATE_URL: &str = "https://content.warframe.com/dynamic/worldState.php";

/// Produces a fresh world-state document on demand.
///
/// A fetch blocks the calling thread until the document is available
/// or the transport fails. Implementations must not cache: the client
/// decides when a fetch happens.
pub trait WorldStateSource {
    /// Retrieve the current world-state document.
    fn fetch(&self) -> Result<serde_json::Value, WorldStateError>;
}

/// Blocking HTTP source for the live feed.
pub struct HttpWorldStateSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpWorldStateSource {
    /// Source targeting the live feed at [`WORLD_STATE_URL`].
    pub fn new() -> Self {
        Self::with_url(WORLD_STATE_URL)
    }

    /// Source targeting an explicit URL (mirror or test server).
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url: url.into(),
        }
    }

    /// Source reusing an existing [`reqwest::blocking::Client`]
    /// (useful for connection pooling across clients).
    pub fn with_client(client: reqwest::blocking::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// The URL this source fetches from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpWorldStateSource {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldStateSource for HttpWorldStateSource {
    fn fetch(&self) -> Result<serde_json::Value, WorldStateError> {
        let response = self.client.get(&self.url).send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(WorldStateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let document: serde_json::Value = response.json()?;
        tracing::debug!(url = %self.url, "Fetched world-state document");
        Ok(document)
    }
}
