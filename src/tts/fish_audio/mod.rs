pub mod fish_audio;
pub mod structs;
