pub mod archiver;
pub mod fish_audio;
pub mod request_builder;
pub mod tts;
