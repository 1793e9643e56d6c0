//! Unvalidated contribution input, one variant per kind.
//!
//! Drafts carry exactly what a contributor typed or picked. Identifiers,
//! timestamps, the contributor name, and derived fields are assigned by the
//! ledger at submission.

use serde::{Deserialize, Deserializer, Serialize};

use crate::kind::ContributionKind;

/// Kind-tagged draft. Session scripts use `{"kind": "audio", ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContributionDraft {
    Audio(AudioDraft),
    Video(VideoDraft),
    Text(TextDraft),
    Image(ImageDraft),
}

impl ContributionDraft {
    pub fn kind(&self) -> ContributionKind {
        match self {
            Self::Audio(_) => ContributionKind::Audio,
            Self::Video(_) => ContributionKind::Video,
            Self::Text(_) => ContributionKind::Text,
            Self::Image(_) => ContributionKind::Image,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioDraft {
    pub language: String,
    pub category: String,
    /// Falls back to `"Custom recording"` when absent.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Bucket label such as `"5-10 minutes"`. Missing or unknown labels
    /// resolve to the table default.
    #[serde(default)]
    pub duration: String,
    pub quality: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDraft {
    pub language: String,
    pub video_type: String,
    /// Falls back to `"Custom video"` when absent.
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub duration: String,
    pub setting: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDraft {
    pub text_type: String,
    pub source_language: String,
    pub target_language: String,
    pub source_text: String,
    pub target_text: String,
    pub difficulty: String,
    #[serde(default)]
    pub context: Option<String>,
    pub region: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDraft {
    pub category: String,
    /// Language of the description.
    pub language: String,
    pub description: String,
    #[serde(default)]
    pub cultural_significance: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// A list, or one comma-separated string as typed into the form.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub filename: String,
    /// Size of the uploaded image in bytes.
    pub file_size: u64,
}

/// Split a comma-separated tag field. Blank entries are dropped.
pub fn parse_tags(input: &str) -> Vec<String> {
    clean_tags(input.split(','))
}

/// Trim tags and drop blank ones, keeping order.
pub fn clean_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| {
            let tag = tag.as_ref().trim();
            (!tag.is_empty()).then(|| tag.to_string())
        })
        .collect()
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        Joined(String),
        List(Vec<String>),
    }

    Ok(match Tags::deserialize(deserializer)? {
        Tags::Joined(joined) => parse_tags(&joined),
        Tags::List(list) => clean_tags(list),
    })
}
