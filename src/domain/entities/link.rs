//! Link entity representing a short key mapping.

use serde::{Deserialize, Serialize};

/// A short key pointing at a destination URL plus the caption ("contexto")
/// rendered on the redirect page.
///
/// The serialized form is also the on-disk record of the JSON file backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub key: String,
    pub url: String,
    #[serde(default)]
    pub contexto: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(key: impl Into<String>, url: impl Into<String>, contexto: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
            contexto: contexto.into(),
        }
    }

    /// Returns true when the link carries a caption worth rendering.
    pub fn has_caption(&self) -> bool {
        !self.contexto.is_empty()
    }
}
