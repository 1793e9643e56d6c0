use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The four kinds of corpus contribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionKind {
    Audio,
    Video,
    Text,
    Image,
}

impl ContributionKind {
    /// Every kind, in display order.
    pub const ALL: [ContributionKind; 4] = [Self::Audio, Self::Video, Self::Text, Self::Image];

    /// Lowercase tag used in exports and session scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Text => "text",
            Self::Image => "image",
        }
    }

    /// Capitalised label for tables.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::Text => "Text",
            Self::Image => "Image",
        }
    }
}

impl fmt::Display for ContributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContributionKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "audio" => Ok(Self::Audio),
            "video" => Ok(Self::Video),
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            other => Err(TypeError::UnknownKind(other.to_string())),
        }
    }
}
