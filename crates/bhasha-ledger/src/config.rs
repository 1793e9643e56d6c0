use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Contributor name stamped on records until the session sets one.
pub const DEFAULT_CONTRIBUTOR: &str = "Language Contributor";

/// Replacement contributor name in anonymized exports.
pub const ANONYMOUS_CONTRIBUTOR: &str = "Anonymous";

/// Per-contributor quotas that progress ratios are measured against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goals {
    /// Combined audio and video hours.
    pub audio_video_hours: f64,
    /// Combined text and image records.
    pub text_image_records: u64,
    /// Video hours on their own.
    pub video_hours: f64,
    /// Image records on their own.
    pub image_records: u64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            audio_video_hours: 80.0,
            text_image_records: 800,
            video_hours: 40.0,
            image_records: 400,
        }
    }
}

/// Configuration for a session's ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Initial contributor name.
    pub contributor: String,
    pub goals: Goals,
    /// Contributor value written into anonymized exports.
    pub anonymous_placeholder: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            contributor: DEFAULT_CONTRIBUTOR.into(),
            goals: Goals::default(),
            anonymous_placeholder: ANONYMOUS_CONTRIBUTOR.into(),
        }
    }
}

impl LedgerConfig {
    /// Goals must be positive; the placeholder must not be empty.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let goals = &self.goals;
        if !(goals.audio_video_hours > 0.0) {
            return Err(LedgerError::InvalidConfig(format!(
                "goals.audio_video_hours must be positive, got {}",
                goals.audio_video_hours
            )));
        }
        if !(goals.video_hours > 0.0) {
            return Err(LedgerError::InvalidConfig(format!(
                "goals.video_hours must be positive, got {}",
                goals.video_hours
            )));
        }
        if goals.text_image_records == 0 {
            return Err(LedgerError::InvalidConfig(
                "goals.text_image_records must be positive".into(),
            ));
        }
        if goals.image_records == 0 {
            return Err(LedgerError::InvalidConfig(
                "goals.image_records must be positive".into(),
            ));
        }
        if self.anonymous_placeholder.trim().is_empty() {
            return Err(LedgerError::InvalidConfig(
                "anonymous_placeholder must not be empty".into(),
            ));
        }
        Ok(())
    }
}
