use super::{audio_format::AudioFormat, latency::Latency, mp3_bitrate::Mp3Bitrate};
use crate::errors::constants::DEFAULT_CHUNK_LENGTH;

/// Request knobs other than the text and references.
///
/// Example:
/// ```rust
/// use fish_tts::tts::fish_audio::structs::{
///     audio_format::AudioFormat, synthesis_options::SynthesisOptions,
/// };
///
/// let options = SynthesisOptions {
///     format: AudioFormat::Wav,
///     ..Default::default()
/// };
/// assert_eq!(options.chunk_length, 200);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthesisOptions {
    pub chunk_length: u16,
    pub format: AudioFormat,
    pub mp3_bitrate: Mp3Bitrate,
    pub reference_id: Option<String>,
    pub normalize: bool,
    pub latency: Latency,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            chunk_length: DEFAULT_CHUNK_LENGTH,
            format: AudioFormat::default(),
            mp3_bitrate: Mp3Bitrate::default(),
            reference_id: None,
            normalize: true,
            latency: Latency::default(),
        }
    }
}
