use serde::{Deserialize, Serialize};

use crate::draft::{clean_tags, AudioDraft, ContributionDraft, ImageDraft, TextDraft, VideoDraft};
use crate::duration::{AudioDuration, DurationBucket, VideoDuration};
use crate::id::ContributionId;
use crate::kind::ContributionKind;
use crate::temporal::SubmissionStamp;

const DEFAULT_AUDIO_PROMPT: &str = "Custom recording";
const DEFAULT_VIDEO_PROMPT: &str = "Custom video";

/// A submitted contribution.
///
/// Created only by a ledger at submission time and never modified after.
/// Duration hours and word counts are derived from the stored bucket and
/// target text on access, so they cannot disagree with them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: ContributionId,
    pub submitted_at: SubmissionStamp,
    pub contributor: String,
    pub body: ContributionBody,
}

impl Contribution {
    pub fn kind(&self) -> ContributionKind {
        self.body.kind()
    }

    /// Language of the contribution. For text pairs this is the target
    /// language.
    pub fn language(&self) -> &str {
        match &self.body {
            ContributionBody::Audio(a) => &a.language,
            ContributionBody::Video(v) => &v.language,
            ContributionBody::Text(t) => &t.target_language,
            ContributionBody::Image(i) => &i.language,
        }
    }

    /// Duration in hundredths of an hour; zero for untimed kinds.
    pub fn duration_centihours(&self) -> u32 {
        match &self.body {
            ContributionBody::Audio(a) => a.duration.centihours(),
            ContributionBody::Video(v) => v.duration.centihours(),
            ContributionBody::Text(_) | ContributionBody::Image(_) => 0,
        }
    }

    pub fn duration_hours(&self) -> Option<f64> {
        match &self.body {
            ContributionBody::Audio(a) => Some(a.duration_hours()),
            ContributionBody::Video(v) => Some(v.duration_hours()),
            ContributionBody::Text(_) | ContributionBody::Image(_) => None,
        }
    }

    pub fn word_count(&self) -> Option<usize> {
        match &self.body {
            ContributionBody::Text(t) => Some(t.word_count()),
            _ => None,
        }
    }

    /// Category-like label: audio category, video type, text type, or
    /// image category.
    pub fn details(&self) -> &str {
        match &self.body {
            ContributionBody::Audio(a) => &a.category,
            ContributionBody::Video(v) => &v.video_type,
            ContributionBody::Text(t) => &t.text_type,
            ContributionBody::Image(i) => &i.category,
        }
    }
}

/// Kind-specific payload of a contribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContributionBody {
    Audio(AudioRecord),
    Video(VideoRecord),
    Text(TextRecord),
    Image(ImageRecord),
}

impl ContributionBody {
    pub fn kind(&self) -> ContributionKind {
        match self {
            Self::Audio(_) => ContributionKind::Audio,
            Self::Video(_) => ContributionKind::Video,
            Self::Text(_) => ContributionKind::Text,
            Self::Image(_) => ContributionKind::Image,
        }
    }

    /// Build the stored payload from a draft.
    ///
    /// Returns the unrecognised duration label alongside the body when the
    /// default bucket had to be applied.
    pub fn from_draft(draft: ContributionDraft) -> (Self, Option<String>) {
        match draft {
            ContributionDraft::Audio(d) => {
                let (record, fallback) = AudioRecord::from_draft(d);
                (Self::Audio(record), fallback)
            }
            ContributionDraft::Video(d) => {
                let (record, fallback) = VideoRecord::from_draft(d);
                (Self::Video(record), fallback)
            }
            ContributionDraft::Text(d) => (Self::Text(TextRecord::from(d)), None),
            ContributionDraft::Image(d) => (Self::Image(ImageRecord::from(d)), None),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioRecord {
    pub language: String,
    pub category: String,
    pub prompt: String,
    pub duration: AudioDuration,
    pub quality: String,
}

impl AudioRecord {
    fn from_draft(draft: AudioDraft) -> (Self, Option<String>) {
        let resolved = AudioDuration::resolve(&draft.duration);
        let record = Self {
            language: draft.language,
            category: draft.category,
            prompt: non_blank(draft.prompt).unwrap_or_else(|| DEFAULT_AUDIO_PROMPT.into()),
            duration: resolved.bucket,
            quality: draft.quality,
        };
        (record, resolved.fallback_from)
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration.hours()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub language: String,
    pub video_type: String,
    pub prompt: String,
    pub duration: VideoDuration,
    pub setting: String,
}

impl VideoRecord {
    fn from_draft(draft: VideoDraft) -> (Self, Option<String>) {
        let resolved = VideoDuration::resolve(&draft.duration);
        let record = Self {
            language: draft.language,
            video_type: draft.video_type,
            prompt: non_blank(draft.prompt).unwrap_or_else(|| DEFAULT_VIDEO_PROMPT.into()),
            duration: resolved.bucket,
            setting: draft.setting,
        };
        (record, resolved.fallback_from)
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration.hours()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    pub text_type: String,
    pub source_language: String,
    pub target_language: String,
    pub source_text: String,
    pub target_text: String,
    pub difficulty: String,
    pub context: Option<String>,
    pub region: String,
}

impl TextRecord {
    /// Whitespace-delimited tokens in the target text.
    pub fn word_count(&self) -> usize {
        self.target_text.split_whitespace().count()
    }
}

impl From<TextDraft> for TextRecord {
    fn from(draft: TextDraft) -> Self {
        Self {
            text_type: draft.text_type,
            source_language: draft.source_language,
            target_language: draft.target_language,
            source_text: draft.source_text,
            target_text: draft.target_text,
            difficulty: draft.difficulty,
            context: non_blank(draft.context),
            region: draft.region,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub category: String,
    pub language: String,
    pub description: String,
    pub cultural_significance: Option<String>,
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub filename: String,
    pub file_size: u64,
}

impl From<ImageDraft> for ImageRecord {
    fn from(draft: ImageDraft) -> Self {
        Self {
            category: draft.category,
            language: draft.language,
            description: draft.description,
            cultural_significance: non_blank(draft.cultural_significance),
            location: non_blank(draft.location),
            tags: clean_tags(draft.tags),
            filename: draft.filename,
            file_size: draft.file_size,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
