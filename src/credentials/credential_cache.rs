use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::credentials::Credentials;
use crate::errors::Result;

/// Flat JSON file holding the last credentials used for a conversion.
#[derive(Debug, Clone)]
pub struct CredentialCache {
    path: PathBuf,
}

impl CredentialCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached credentials.
    ///
    /// A missing file is the first-run case and yields the defaults. An
    /// unreadable or malformed file also yields the defaults.
    #[tracing::instrument]
    pub async fn load(&self) -> Credentials {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No credential cache yet");
                return Credentials::default();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Cannot read credential cache");
                return Credentials::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(credentials) => credentials,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Malformed credential cache");
                Credentials::default()
            }
        }
    }

    /// Overwrite the cache file with `credentials`.
    #[tracing::instrument]
    pub async fn save(&self, credentials: &Credentials) -> Result<()> {
        let content = serde_json::to_string(credentials)?;
        tokio::fs::write(&self.path, content).await?;
        debug!(path = %self.path.display(), "Saved credential cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::constants::DEFAULT_API_URL;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let cache = CredentialCache::new(dir.path().join("token_cache.json"));

        let credentials = cache.load().await;
        assert_eq!(credentials.api_key, "");
        assert_eq!(credentials.api_url, DEFAULT_API_URL);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let cache = CredentialCache::new(dir.path().join("token_cache.json"));

        cache
            .save(&Credentials::new("key-1", "https://tts.example.com/v1/tts"))
            .await
            .unwrap();
        cache
            .save(&Credentials::new("key-2", "https://tts.example.com/v2/tts"))
            .await
            .unwrap();

        let credentials = cache.load().await;
        assert_eq!(
            credentials,
            Credentials::new("key-2", "https://tts.example.com/v2/tts")
        );
    }

    #[tokio::test]
    async fn test_saved_file_is_flat_json_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token_cache.json");
        let cache = CredentialCache::new(&path);

        cache
            .save(&Credentials::new("abc", "https://example.com"))
            .await
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"api_key": "abc", "api_url": "https://example.com"})
        );
    }

    #[tokio::test]
    async fn test_load_malformed_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token_cache.json");
        std::fs::write(&path, "{not json").unwrap();

        let credentials = CredentialCache::new(&path).load().await;
        assert_eq!(credentials, Credentials::default());
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let cache = CredentialCache::new(dir.path().join("missing").join("token_cache.json"));

        let result = cache.save(&Credentials::new("abc", "https://example.com")).await;
        assert!(matches!(result, Err(crate::errors::FishTTSError::Io(_))));
    }
}
