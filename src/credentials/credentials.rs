use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::constants::DEFAULT_API_URL;

/// API key and endpoint for the Fish Audio TTS API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("", default_api_url())
    }
}

// The key never shows up in logs or instrumented spans.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<empty>"
        } else {
            "<redacted>"
        };

        f.debug_struct("Credentials")
            .field("api_key", &api_key)
            .field("api_url", &self.api_url)
            .finish()
    }
}
