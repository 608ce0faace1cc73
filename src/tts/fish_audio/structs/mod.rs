pub mod audio_format;
pub mod latency;
pub mod mp3_bitrate;
pub mod reference_audio;
pub mod synthesis_options;
pub mod tts_request;
