use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::FishTTSError;

/// Output encoding negotiated with the API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AudioFormat {
    Wav,
    Pcm,
    #[default]
    Mp3,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Pcm => "pcm",
            Self::Mp3 => "mp3",
        }
    }

    /// File extension for audio received in this format.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = FishTTSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wav" => Ok(Self::Wav),
            "pcm" => Ok(Self::Pcm),
            "mp3" => Ok(Self::Mp3),
            other => Err(FishTTSError::validation(format!(
                "format must be one of wav, pcm, mp3 (got {})",
                other
            ))),
        }
    }
}

impl From<AudioFormat> for String {
    fn from(value: AudioFormat) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for AudioFormat {
    type Error = FishTTSError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
