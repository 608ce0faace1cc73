use serde::{Deserialize, Serialize};

use super::{
    audio_format::AudioFormat, latency::Latency, mp3_bitrate::Mp3Bitrate,
    reference_audio::ReferenceAudio, synthesis_options::SynthesisOptions,
};
use crate::errors::{constants::DEFAULT_CHUNK_LENGTH, validation, FishTTSError, Result};

/// Body of a Fish Audio `/v1/tts` request.
///
/// Only constructed through [`TTSRequestBuilder::build`], which also runs
/// when a request is decoded, so every value in hand satisfies the field
/// constraints.
///
/// Example:
/// ```rust
/// use fish_tts::tts::fish_audio::structs::tts_request::TTSRequest;
///
/// let request = TTSRequest::builder("Hello").chunk_length(150).build().unwrap();
/// assert_eq!(request.chunk_length(), 150);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "TTSRequestBuilder")]
pub struct TTSRequest {
    text: String,
    chunk_length: u16,
    format: AudioFormat,
    mp3_bitrate: Mp3Bitrate,
    references: Vec<ReferenceAudio>,
    reference_id: Option<String>,
    normalize: bool,
    latency: Latency,
}

impl TTSRequest {
    pub fn builder(text: impl Into<String>) -> TTSRequestBuilder {
        TTSRequestBuilder::new(text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chunk_length(&self) -> u16 {
        self.chunk_length
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn mp3_bitrate(&self) -> Mp3Bitrate {
        self.mp3_bitrate
    }

    pub fn references(&self) -> &[ReferenceAudio] {
        &self.references
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.reference_id.as_deref()
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Encode as a MessagePack map keyed by field name.
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct TTSRequestBuilder {
    text: String,
    #[serde(default = "default_chunk_length")]
    chunk_length: u16,
    #[serde(default)]
    format: AudioFormat,
    #[serde(default)]
    mp3_bitrate: Mp3Bitrate,
    #[serde(default)]
    references: Vec<ReferenceAudio>,
    #[serde(default)]
    reference_id: Option<String>,
    #[serde(default = "default_normalize")]
    normalize: bool,
    #[serde(default)]
    latency: Latency,
}

fn default_chunk_length() -> u16 {
    DEFAULT_CHUNK_LENGTH
}

fn default_normalize() -> bool {
    true
}

impl TTSRequestBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        let options = SynthesisOptions::default();
        Self {
            text: text.into(),
            chunk_length: options.chunk_length,
            format: options.format,
            mp3_bitrate: options.mp3_bitrate,
            references: Vec::new(),
            reference_id: options.reference_id,
            normalize: options.normalize,
            latency: options.latency,
        }
    }

    /// Apply every field of `options`, replacing earlier settings.
    pub fn options(mut self, options: SynthesisOptions) -> Self {
        self.chunk_length = options.chunk_length;
        self.format = options.format;
        self.mp3_bitrate = options.mp3_bitrate;
        self.reference_id = options.reference_id;
        self.normalize = options.normalize;
        self.latency = options.latency;
        self
    }

    pub fn chunk_length(mut self, chunk_length: u16) -> Self {
        self.chunk_length = chunk_length;
        self
    }

    pub fn format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    pub fn mp3_bitrate(mut self, mp3_bitrate: Mp3Bitrate) -> Self {
        self.mp3_bitrate = mp3_bitrate;
        self
    }

    /// Append a reference. Order is kept on the wire.
    pub fn reference(mut self, reference: ReferenceAudio) -> Self {
        self.references.push(reference);
        self
    }

    pub fn reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn build(self) -> Result<TTSRequest> {
        validation::validate_chunk_length(self.chunk_length)?;

        Ok(TTSRequest {
            text: self.text,
            chunk_length: self.chunk_length,
            format: self.format,
            mp3_bitrate: self.mp3_bitrate,
            references: self.references,
            reference_id: self.reference_id,
            normalize: self.normalize,
            latency: self.latency,
        })
    }
}

impl TryFrom<TTSRequestBuilder> for TTSRequest {
    type Error = FishTTSError;

    fn try_from(builder: TTSRequestBuilder) -> Result<Self> {
        builder.build()
    }
}
