use std::path::PathBuf;

use tracing::info;

use super::{
    archiver::{ArchivedOutput, OutputArchiver},
    fish_audio::fish_audio::FishAudio,
    request_builder::{build_request, SpeechInput},
};
use crate::{
    credentials::{credential_cache::CredentialCache, credentials::Credentials},
    errors::{constants::CONVERSION_SUCCEEDED, validation, Result},
};

/// One text-to-speech conversion as entered by the user.
#[derive(Debug, Clone)]
pub struct ConversionInput {
    pub credentials: Credentials,
    pub speech: SpeechInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    /// Temp file holding the audio, handed back for playback.
    pub audio_path: PathBuf,
    pub archived: ArchivedOutput,
}

impl ConversionOutput {
    pub fn message(&self) -> String {
        format!("{} Saved as {}", CONVERSION_SUCCEEDED, self.archived.file_name)
    }
}

/// Runs conversions end to end: credential check, credential cache,
/// request build, dispatch, archive.
#[derive(Debug)]
pub struct TTS {
    credential_cache: CredentialCache,
    client: FishAudio,
    archiver: OutputArchiver,
}

impl TTS {
    pub fn new(
        credential_cache: CredentialCache,
        client: FishAudio,
        archiver: OutputArchiver,
    ) -> Self {
        Self {
            credential_cache,
            client,
            archiver,
        }
    }

    pub fn credential_cache(&self) -> &CredentialCache {
        &self.credential_cache
    }

    #[tracing::instrument(skip(self))]
    pub async fn convert(&self, input: ConversionInput) -> Result<ConversionOutput> {
        let ConversionInput {
            credentials,
            speech,
        } = input;

        validation::validate_credentials(&credentials.api_key, &credentials.api_url)?;
        self.credential_cache.save(&credentials).await?;

        let request = build_request(speech).await?;
        let audio_path = self.client.synthesize(&credentials, &request).await?;
        let archived = self.archiver.archive(&audio_path, request.format()).await?;

        info!(
            audio_path = %audio_path.display(),
            archived = %archived.file_name,
            "Conversion finished"
        );

        Ok(ConversionOutput {
            audio_path,
            archived,
        })
    }
}
