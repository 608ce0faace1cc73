use std::path::PathBuf;

use tracing::debug;

use super::fish_audio::structs::{
    reference_audio::ReferenceAudio, synthesis_options::SynthesisOptions,
    tts_request::TTSRequest,
};
use crate::errors::Result;

/// What the user asked to be spoken.
#[derive(Debug, Clone, Default)]
pub struct SpeechInput {
    pub text: String,
    pub reference_audio: Option<PathBuf>,
    pub reference_text: String,
    pub options: SynthesisOptions,
}

impl SpeechInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_reference(
        mut self,
        audio_path: impl Into<PathBuf>,
        text: impl Into<String>,
    ) -> Self {
        self.reference_audio = Some(audio_path.into());
        self.reference_text = text.into();
        self
    }

    pub fn with_options(mut self, options: SynthesisOptions) -> Self {
        self.options = options;
        self
    }
}

/// Build the request for `input`, reading the reference audio fully into
/// memory when one is given.
#[tracing::instrument(skip(input), fields(has_reference = input.reference_audio.is_some()))]
pub async fn build_request(input: SpeechInput) -> Result<TTSRequest> {
    let mut builder = TTSRequest::builder(input.text).options(input.options);

    if let Some(path) = input.reference_audio {
        let audio = tokio::fs::read(&path).await?;
        debug!(path = %path.display(), bytes = audio.len(), "Loaded reference audio");
        builder = builder.reference(ReferenceAudio::new(audio, input.reference_text));
    }

    builder.build()
}
