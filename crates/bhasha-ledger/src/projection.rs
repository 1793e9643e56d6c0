use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use bhasha_types::{Contribution, ContributionKind};
use serde::Serialize;

use crate::config::Goals;
use crate::error::LedgerError;
use crate::traits::LedgerReader;

/// Group key for contributions whose key is missing or blank.
pub const UNKNOWN_GROUP: &str = "Unknown";

const TEXT_ENTHUSIAST_RECORDS: u64 = 50;
const AUDIO_MASTER_CENTIHOURS: u64 = 10 * 100;
const MULTILINGUAL_LANGUAGES: usize = 3;

/// Totals and progress for one session.
///
/// Totals are never capped; only the progress ratios are clamped to
/// `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub contributor: String,
    pub total_records: u64,
    pub audio_records: u64,
    pub video_records: u64,
    pub text_records: u64,
    pub image_records: u64,
    pub audio_hours: f64,
    pub video_hours: f64,
    pub audio_video_hours: f64,
    pub text_image_records: u64,
    pub total_words: u64,
    pub languages: usize,
    pub audio_video_progress: f64,
    pub text_image_progress: f64,
    pub video_progress: f64,
    pub image_progress: f64,
    /// Mean of the audio+video and text+image progress ratios.
    pub overall_progress: f64,
}

/// Milestones shown on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Achievement {
    FirstAudio,
    FirstVideo,
    FirstText,
    FirstImage,
    TextEnthusiast,
    AudioMaster,
    Multilingual,
}

impl Achievement {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstAudio => "First Audio Recording",
            Self::FirstVideo => "First Video Recording",
            Self::FirstText => "First Text Contribution",
            Self::FirstImage => "First Image Contribution",
            Self::TextEnthusiast => "Text Enthusiast (50+ records)",
            Self::AudioMaster => "Audio Master (10+ hours)",
            Self::Multilingual => "Multilingual Contributor",
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the contribution table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContributionRow {
    pub short_id: String,
    pub kind: ContributionKind,
    pub language: String,
    pub timestamp: String,
    pub details: String,
}

impl From<&Contribution> for ContributionRow {
    fn from(contribution: &Contribution) -> Self {
        Self {
            short_id: contribution.id.short_id(),
            kind: contribution.kind(),
            language: group_key(Some(contribution.language())),
            timestamp: contribution.submitted_at.to_minute_string(),
            details: contribution.details().to_string(),
        }
    }
}

/// `total / goal` clamped to `[0, 1]`. A non-positive goal counts as met.
pub fn progress_ratio(total: f64, goal: f64) -> f64 {
    if !(goal > 0.0) {
        return 1.0;
    }
    (total / goal).clamp(0.0, 1.0)
}

/// Deterministic projection builders.
pub struct ProjectionBuilder;

impl ProjectionBuilder {
    pub fn summary<R: LedgerReader>(
        reader: &R,
        goals: &Goals,
    ) -> Result<LedgerSummary, LedgerError> {
        let snapshot = reader.snapshot()?;
        let counters = snapshot.counters;

        let audio_video_progress =
            progress_ratio(counters.audio_video_hours(), goals.audio_video_hours);
        let text_image_progress = progress_ratio(
            counters.text_image_records() as f64,
            goals.text_image_records as f64,
        );

        Ok(LedgerSummary {
            contributor: snapshot.contributor,
            total_records: counters.total_records(),
            audio_records: counters.audio_records,
            video_records: counters.video_records,
            text_records: counters.text_records,
            image_records: counters.image_records,
            audio_hours: counters.audio_hours(),
            video_hours: counters.video_hours(),
            audio_video_hours: counters.audio_video_hours(),
            text_image_records: counters.text_image_records(),
            total_words: counters.text_words,
            languages: distinct_languages(&snapshot.contributions),
            audio_video_progress,
            text_image_progress,
            video_progress: progress_ratio(counters.video_hours(), goals.video_hours),
            image_progress: progress_ratio(
                counters.image_records as f64,
                goals.image_records as f64,
            ),
            overall_progress: (audio_video_progress + text_image_progress) / 2.0,
        })
    }

    /// Stable grouping. Ledger order is kept inside each group; missing or
    /// blank keys land in [`UNKNOWN_GROUP`].
    pub fn group_by<R, F>(
        reader: &R,
        key_fn: F,
    ) -> Result<BTreeMap<String, Vec<Contribution>>, LedgerError>
    where
        R: LedgerReader,
        F: Fn(&Contribution) -> Option<String>,
    {
        let mut groups: BTreeMap<String, Vec<Contribution>> = BTreeMap::new();
        for contribution in reader.contributions()? {
            let key = group_key(key_fn(&contribution).as_deref());
            groups.entry(key).or_default().push(contribution);
        }
        Ok(groups)
    }

    pub fn group_by_kind<R: LedgerReader>(
        reader: &R,
    ) -> Result<BTreeMap<ContributionKind, Vec<Contribution>>, LedgerError> {
        let mut groups: BTreeMap<ContributionKind, Vec<Contribution>> = BTreeMap::new();
        for contribution in reader.contributions()? {
            groups.entry(contribution.kind()).or_default().push(contribution);
        }
        Ok(groups)
    }

    pub fn group_by_language<R: LedgerReader>(
        reader: &R,
    ) -> Result<BTreeMap<String, Vec<Contribution>>, LedgerError> {
        Self::group_by(reader, |c| Some(c.language().to_string()))
    }

    /// Record count per language.
    pub fn language_breakdown<R: LedgerReader>(
        reader: &R,
    ) -> Result<BTreeMap<String, usize>, LedgerError> {
        Ok(Self::group_by_language(reader)?
            .into_iter()
            .map(|(language, records)| (language, records.len()))
            .collect())
    }

    /// The last `limit` contributions, newest first.
    pub fn recent<R: LedgerReader>(
        reader: &R,
        limit: usize,
    ) -> Result<Vec<Contribution>, LedgerError> {
        Ok(reader
            .contributions()?
            .into_iter()
            .rev()
            .take(limit)
            .collect())
    }

    pub fn rows<R: LedgerReader>(reader: &R) -> Result<Vec<ContributionRow>, LedgerError> {
        Ok(reader
            .contributions()?
            .iter()
            .map(ContributionRow::from)
            .collect())
    }

    pub fn achievements<R: LedgerReader>(reader: &R) -> Result<Vec<Achievement>, LedgerError> {
        let snapshot = reader.snapshot()?;
        let counters = snapshot.counters;
        let mut unlocked = Vec::new();

        if counters.audio_centihours > 0 {
            unlocked.push(Achievement::FirstAudio);
        }
        if counters.video_centihours > 0 {
            unlocked.push(Achievement::FirstVideo);
        }
        if counters.text_records > 0 {
            unlocked.push(Achievement::FirstText);
        }
        if counters.image_records > 0 {
            unlocked.push(Achievement::FirstImage);
        }
        if counters.text_records >= TEXT_ENTHUSIAST_RECORDS {
            unlocked.push(Achievement::TextEnthusiast);
        }
        if counters.audio_centihours + counters.video_centihours >= AUDIO_MASTER_CENTIHOURS {
            unlocked.push(Achievement::AudioMaster);
        }
        if distinct_languages(&snapshot.contributions) >= MULTILINGUAL_LANGUAGES {
            unlocked.push(Achievement::Multilingual);
        }

        Ok(unlocked)
    }
}

fn group_key(key: Option<&str>) -> String {
    match key.map(str::trim) {
        Some(k) if !k.is_empty() => k.to_string(),
        _ => UNKNOWN_GROUP.to_string(),
    }
}

fn distinct_languages(contributions: &[Contribution]) -> usize {
    contributions
        .iter()
        .map(|c| c.language().trim())
        .filter(|language| !language.is_empty())
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use bhasha_types::{AudioDraft, ContributionDraft, ImageDraft, TextDraft, VideoDraft};
    use proptest::prelude::*;

    use super::*;
    use crate::memory::InMemoryLedger;
    use crate::traits::LedgerWriter;

    fn audio(language: &str, duration: &str) -> ContributionDraft {
        ContributionDraft::Audio(AudioDraft {
            language: language.into(),
            category: "Stories & Literature".into(),
            prompt: Some("Tell a folk tale from your region".into()),
            duration: duration.into(),
            quality: "High (Studio)".into(),
        })
    }

    fn video(language: &str, duration: &str) -> ContributionDraft {
        ContributionDraft::Video(VideoDraft {
            language: language.into(),
            video_type: "Art & Craft Tutorials".into(),
            prompt: None,
            duration: duration.into(),
            setting: "Educational Setup".into(),
        })
    }

    fn text(target_language: &str) -> ContributionDraft {
        ContributionDraft::Text(TextDraft {
            text_type: "Conversational Data".into(),
            source_language: "English".into(),
            target_language: target_language.into(),
            source_text: "How much does this cost, please?".into(),
            target_text: "idhu evvalavu vilai, thayavu seidhu?".into(),
            difficulty: "Basic/Everyday".into(),
            context: Some("Market bargaining".into()),
            region: "Southern".into(),
        })
    }

    fn image(language: &str) -> ContributionDraft {
        ContributionDraft::Image(ImageDraft {
            category: "Landscapes & Places".into(),
            language: language.into(),
            description: "Backwaters at dusk with a houseboat moored by palms".into(),
            cultural_significance: None,
            location: None,
            tags: vec![],
            filename: "kerala.jpg".into(),
            file_size: 10,
        })
    }

    #[test]
    fn summary_of_empty_ledger() {
        let ledger = InMemoryLedger::default();
        let summary = ledger.summary().unwrap();
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.audio_video_progress, 0.0);
        assert_eq!(summary.text_image_progress, 0.0);
        assert_eq!(summary.overall_progress, 0.0);
        assert_eq!(summary.contributor, "Language Contributor");
    }

    #[test]
    fn summary_combines_kinds() {
        let ledger = InMemoryLedger::default();
        ledger.submit(audio("Hindi", "10+ minutes")).unwrap();
        ledger.submit(video("Hindi", "20+ minutes")).unwrap();
        ledger.submit(text("Tamil")).unwrap();
        ledger.submit(image("Malayalam")).unwrap();

        let summary = ledger.summary().unwrap();
        assert_eq!(summary.audio_hours, 0.25);
        assert_eq!(summary.video_hours, 0.42);
        assert_eq!(summary.audio_video_hours, 0.67);
        assert_eq!(summary.text_image_records, 2);
        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.total_words, 5);
        assert_eq!(summary.languages, 3);
        assert_eq!(summary.text_image_progress, 2.0 / 800.0);
        assert_eq!(summary.image_progress, 1.0 / 400.0);
    }

    #[test]
    fn progress_is_clamped_but_totals_are_not() {
        let mut config = crate::config::LedgerConfig::default();
        config.goals.text_image_records = 2;
        config.goals.audio_video_hours = 0.1;
        let ledger = InMemoryLedger::new(config);
        for _ in 0..5 {
            ledger.submit(image("Hindi")).unwrap();
        }
        ledger.submit(audio("Hindi", "10+ minutes")).unwrap();

        let summary = ledger.summary().unwrap();
        assert_eq!(summary.text_image_records, 5);
        assert_eq!(summary.text_image_progress, 1.0);
        assert_eq!(summary.audio_hours, 0.25);
        assert_eq!(summary.audio_video_progress, 1.0);
        assert_eq!(summary.overall_progress, 1.0);
    }

    #[test]
    fn group_by_kind_keeps_ledger_order() {
        let ledger = InMemoryLedger::default();
        let r1 = ledger.submit(audio("Hindi", "2-3 minutes")).unwrap();
        let r2 = ledger.submit(text("Tamil")).unwrap();
        let r3 = ledger.submit(text("Telugu")).unwrap();

        let groups = ledger.group_by_kind().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&ContributionKind::Audio], vec![r1]);
        assert_eq!(groups[&ContributionKind::Text], vec![r2, r3]);
    }

    #[test]
    fn missing_keys_group_under_unknown() {
        let ledger = InMemoryLedger::default();
        ledger.submit(audio("", "2-3 minutes")).unwrap();
        ledger.submit(audio("Kannada", "2-3 minutes")).unwrap();
        ledger.submit(image("  ")).unwrap();

        let breakdown = ProjectionBuilder::language_breakdown(&ledger).unwrap();
        assert_eq!(breakdown.get(UNKNOWN_GROUP), Some(&2));
        assert_eq!(breakdown.get("Kannada"), Some(&1));

        let by_location = ledger
            .group_by(|c| match &c.body {
                bhasha_types::ContributionBody::Image(i) => i.location.clone(),
                _ => None,
            })
            .unwrap();
        assert_eq!(by_location.keys().collect::<Vec<_>>(), vec![UNKNOWN_GROUP]);
        assert_eq!(by_location[UNKNOWN_GROUP].len(), 3);
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let ledger = InMemoryLedger::default();
        let ids: Vec<_> = (0..12)
            .map(|_| ledger.submit(audio("Hindi", "2-3 minutes")).unwrap().id)
            .collect();

        let recent = ProjectionBuilder::recent(&ledger, 10).unwrap();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].id, ids[11]);
        assert_eq!(recent[9].id, ids[2]);
    }

    #[test]
    fn rows_show_short_id_and_details() {
        let ledger = InMemoryLedger::default();
        let stored = ledger.submit(video("Odia", "5-10 minutes")).unwrap();
        let rows = ProjectionBuilder::rows(&ledger).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].short_id, stored.id.short_id());
        assert_eq!(rows[0].kind, ContributionKind::Video);
        assert_eq!(rows[0].details, "Art & Craft Tutorials");
        assert_eq!(rows[0].timestamp.len(), "YYYY-MM-DD HH:MM".len());
    }

    #[test]
    fn achievements_unlock_at_thresholds() {
        let ledger = InMemoryLedger::default();
        assert!(ProjectionBuilder::achievements(&ledger).unwrap().is_empty());

        ledger.submit(audio("Hindi", "2-3 minutes")).unwrap();
        ledger.submit(text("Tamil")).unwrap();
        assert_eq!(
            ProjectionBuilder::achievements(&ledger).unwrap(),
            vec![Achievement::FirstAudio, Achievement::FirstText]
        );

        ledger.submit(image("Bengali")).unwrap();
        for _ in 0..24 {
            ledger.submit(video("Hindi", "20+ minutes")).unwrap();
        }
        // 0.04 + 24 * 0.42 = 10.12 hours
        let unlocked = ProjectionBuilder::achievements(&ledger).unwrap();
        assert!(unlocked.contains(&Achievement::AudioMaster));
        assert!(unlocked.contains(&Achievement::Multilingual));
        assert!(unlocked.contains(&Achievement::FirstVideo));
        assert!(!unlocked.contains(&Achievement::TextEnthusiast));

        for _ in 0..49 {
            ledger.submit(text("Tamil")).unwrap();
        }
        assert!(ProjectionBuilder::achievements(&ledger)
            .unwrap()
            .contains(&Achievement::TextEnthusiast));
    }

    #[test]
    fn progress_ratio_edges() {
        assert_eq!(progress_ratio(0.0, 80.0), 0.0);
        assert_eq!(progress_ratio(40.0, 80.0), 0.5);
        assert_eq!(progress_ratio(1e9, 80.0), 1.0);
        assert_eq!(progress_ratio(5.0, 0.0), 1.0);
    }

    proptest! {
        #[test]
        fn progress_ratio_is_always_in_unit_interval(
            total in 0.0f64..1e12,
            goal in prop_oneof![Just(80.0f64), Just(800.0f64), 0.0f64..1e6],
        ) {
            let ratio = progress_ratio(total, goal);
            prop_assert!((0.0..=1.0).contains(&ratio));
        }
    }
}
