/// Custom error types for the fish-tts client
#[derive(Debug, thiserror::Error)]
pub enum FishTTSError {
    #[error("Please enter your API key.")]
    MissingApiKey,

    #[error("Please enter the API URL.")]
    MissingApiUrl,

    #[error("Error: {status} - {body}")]
    RemoteRejected { status: u16, body: String },

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MessagePack encoding error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    #[error("MessagePack decoding error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Coarse classification of [`FishTTSError`] for callers that branch on the
/// failure class rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CredentialMissing,
    RemoteRejected,
    ValidationFailed,
    IoFailed,
}

impl FishTTSError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn remote_rejected(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteRejected {
            status,
            body: body.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingApiKey | Self::MissingApiUrl => ErrorKind::CredentialMissing,
            Self::RemoteRejected { .. } => ErrorKind::RemoteRejected,
            Self::Validation(_) | Self::MsgPackEncode(_) | Self::MsgPackDecode(_) => {
                ErrorKind::ValidationFailed
            }
            // A bad config file or log filter is a local setup failure, not a
            // malformed request.
            Self::Io(_) | Self::Http(_) | Self::Json(_) | Self::Config(_) | Self::Toml(_) => {
                ErrorKind::IoFailed
            }
        }
    }

    /// Whether the error is meant to be shown to the user as a plain message
    /// instead of aborting the operation.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::CredentialMissing | ErrorKind::RemoteRejected
        )
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FishTTSError>;

/// Input validation functions
pub mod validation {
    use super::*;

    /// Check the pre-flight credential condition. The key is checked first.
    pub fn validate_credentials(api_key: &str, api_url: &str) -> Result<()> {
        if api_key.is_empty() {
            return Err(FishTTSError::MissingApiKey);
        }

        if api_url.is_empty() {
            return Err(FishTTSError::MissingApiUrl);
        }

        Ok(())
    }

    pub fn validate_chunk_length(chunk_length: u16) -> Result<()> {
        if !(constants::MIN_CHUNK_LENGTH..=constants::MAX_CHUNK_LENGTH).contains(&chunk_length) {
            return Err(FishTTSError::validation(format!(
                "chunk_length must be between {} and {} (got {})",
                constants::MIN_CHUNK_LENGTH,
                constants::MAX_CHUNK_LENGTH,
                chunk_length
            )));
        }

        Ok(())
    }
}

/// Constants used throughout the application
pub mod constants {
    // Configuration constants
    pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
    pub const DEFAULT_CREDENTIAL_FILE: &str = "token_cache.json";
    pub const DEFAULT_CACHE_DIR: &str = "cache";
    pub const DEFAULT_LOG_FILTER: &str = "info";

    // API constants
    pub const DEFAULT_API_URL: &str = "https://api.fish.audio/v1/tts";
    pub const MSGPACK_CONTENT_TYPE: &str = "application/msgpack";

    // Request constants
    pub const MIN_CHUNK_LENGTH: u16 = 100;
    pub const MAX_CHUNK_LENGTH: u16 = 300;
    pub const DEFAULT_CHUNK_LENGTH: u16 = 200;
    pub const DEFAULT_MP3_BITRATE: u16 = 128;

    // Output file constants
    pub const TEMP_FILE_PREFIX: &str = "fish-tts-";
    pub const ARCHIVE_FILE_PREFIX: &str = "generate_voice_";
    pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
    pub const MAX_ARCHIVE_DISAMBIGUATOR: u32 = 999;

    // Messages
    pub const CONVERSION_SUCCEEDED: &str = "Text-to-speech conversion completed successfully!";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_messages() {
        assert_eq!(
            FishTTSError::MissingApiKey.to_string(),
            "Please enter your API key."
        );
        assert_eq!(
            FishTTSError::MissingApiUrl.to_string(),
            "Please enter the API URL."
        );
        assert_eq!(
            FishTTSError::MissingApiKey.kind(),
            ErrorKind::CredentialMissing
        );
        assert!(FishTTSError::MissingApiUrl.is_user_facing());
    }

    #[test]
    fn test_remote_rejected_error() {
        let error = FishTTSError::remote_rejected(403, "forbidden");
        assert!(matches!(
            error,
            FishTTSError::RemoteRejected { status: 403, .. }
        ));
        assert_eq!(error.to_string(), "Error: 403 - forbidden");
        assert_eq!(error.kind(), ErrorKind::RemoteRejected);
        assert!(error.is_user_facing());
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            FishTTSError::validation("bad").kind(),
            ErrorKind::ValidationFailed
        );

        let io_error = FishTTSError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(io_error.kind(), ErrorKind::IoFailed);
        assert!(!io_error.is_user_facing());
    }

    #[test]
    fn test_config_errors_are_not_request_validation() {
        assert_eq!(FishTTSError::config("bad filter").kind(), ErrorKind::IoFailed);

        let toml_error = toml::from_str::<toml::Value>("cache_dir = [").unwrap_err();
        assert_eq!(FishTTSError::from(toml_error).kind(), ErrorKind::IoFailed);
    }

    mod validation_tests {
        use super::super::constants;
        use super::super::validation::*;
        use super::super::FishTTSError;

        #[test]
        fn test_validate_credentials() {
            assert!(validate_credentials("key", "https://example.com").is_ok());
            assert!(matches!(
                validate_credentials("", "https://example.com"),
                Err(FishTTSError::MissingApiKey)
            ));
            assert!(matches!(
                validate_credentials("key", ""),
                Err(FishTTSError::MissingApiUrl)
            ));
            // Key is reported before URL
            assert!(matches!(
                validate_credentials("", ""),
                Err(FishTTSError::MissingApiKey)
            ));
        }

        #[test]
        fn test_validate_chunk_length_bounds() {
            assert!(validate_chunk_length(constants::MIN_CHUNK_LENGTH).is_ok());
            assert!(validate_chunk_length(constants::DEFAULT_CHUNK_LENGTH).is_ok());
            assert!(validate_chunk_length(constants::MAX_CHUNK_LENGTH).is_ok());
            assert!(validate_chunk_length(constants::MIN_CHUNK_LENGTH - 1).is_err());
            assert!(validate_chunk_length(constants::MAX_CHUNK_LENGTH + 1).is_err());
        }
    }
}
