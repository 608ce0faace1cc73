use std::fmt;

use serde::{Deserialize, Serialize};

/// Audio sample plus transcript used by the API as voice cloning context.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceAudio {
    #[serde(with = "serde_bytes")]
    pub audio: Vec<u8>,
    pub text: String,
}

impl ReferenceAudio {
    pub fn new(audio: Vec<u8>, text: impl Into<String>) -> Self {
        Self {
            audio,
            text: text.into(),
        }
    }
}

impl fmt::Debug for ReferenceAudio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceAudio")
            .field("audio_len", &self.audio.len())
            .field("text", &self.text)
            .finish()
    }
}
