use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Input channel screened by one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Face photo.
    Face,
    /// Limb-motion CSV.
    Arm,
    /// Speech recording.
    Speech,
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Face, Modality::Arm, Modality::Speech];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Face => "face",
            Self::Arm => "arm",
            Self::Speech => "speech",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown modality {s:?} (expected face, arm or speech)"))
    }
}
