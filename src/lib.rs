// Public API for the fish-tts library

pub mod config;
pub mod credentials;
pub mod errors;
pub mod trace;
pub mod tts;

// Re-export commonly used types
pub use config::Config;
pub use credentials::{credential_cache::CredentialCache, credentials::Credentials};
pub use errors::{ErrorKind, FishTTSError, Result};
pub use tts::{
    archiver::{ArchivedOutput, OutputArchiver},
    fish_audio::{
        fish_audio::FishAudio,
        structs::{
            audio_format::AudioFormat, latency::Latency, mp3_bitrate::Mp3Bitrate,
            reference_audio::ReferenceAudio, synthesis_options::SynthesisOptions,
            tts_request::TTSRequest,
        },
    },
    request_builder::SpeechInput,
    tts::{ConversionInput, ConversionOutput, TTS},
};
