use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::FishTTSError;

/// Server-side quality/speed trade-off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Latency {
    #[default]
    Normal,
    Balanced,
}

impl fmt::Display for Latency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Balanced => f.write_str("balanced"),
        }
    }
}

impl FromStr for Latency {
    type Err = FishTTSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "balanced" => Ok(Self::Balanced),
            other => Err(FishTTSError::validation(format!(
                "latency must be normal or balanced (got {})",
                other
            ))),
        }
    }
}

impl From<Latency> for String {
    fn from(value: Latency) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Latency {
    type Error = FishTTSError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
