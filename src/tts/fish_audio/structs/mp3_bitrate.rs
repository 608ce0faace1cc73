use serde::{Deserialize, Serialize};

use crate::errors::FishTTSError;

/// MP3 bitrate in kbps. Sent on the wire as a plain integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Mp3Bitrate {
    Kbps64,
    #[default]
    Kbps128,
    Kbps192,
}

impl Mp3Bitrate {
    pub fn kbps(&self) -> u16 {
        match self {
            Self::Kbps64 => 64,
            Self::Kbps128 => 128,
            Self::Kbps192 => 192,
        }
    }
}

impl From<Mp3Bitrate> for u16 {
    fn from(bitrate: Mp3Bitrate) -> Self {
        bitrate.kbps()
    }
}

impl TryFrom<u16> for Mp3Bitrate {
    type Error = FishTTSError;

    fn try_from(kbps: u16) -> Result<Self, Self::Error> {
        match kbps {
            64 => Ok(Self::Kbps64),
            128 => Ok(Self::Kbps128),
            192 => Ok(Self::Kbps192),
            other => Err(FishTTSError::validation(format!(
                "mp3_bitrate must be one of 64, 128, 192 (got {})",
                other
            ))),
        }
    }
}
