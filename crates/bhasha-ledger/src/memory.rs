use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use bhasha_types::{
    Contribution, ContributionBody, ContributionDraft, ContributionId, ContributionKind,
    SubmissionStamp,
};
use tracing::{debug, warn};

use crate::config::LedgerConfig;
use crate::counters::Counters;
use crate::error::LedgerError;
use crate::export::{ExportFilter, ExportProjection, ExportRecord};
use crate::projection::{LedgerSummary, ProjectionBuilder};
use crate::traits::{LedgerReader, LedgerSnapshot, LedgerWriter};
use crate::validation::DraftValidator;

/// Session-owned, append-only contribution ledger.
///
/// Records keep insertion order and are never updated or removed. All state
/// sits behind one lock, so a submission is appended and counted in a
/// single critical section.
pub struct InMemoryLedger {
    config: LedgerConfig,
    inner: RwLock<LedgerState>,
}

struct LedgerState {
    contributions: Vec<Contribution>,
    index: HashMap<ContributionId, usize>,
    counters: Counters,
    contributor: String,
}

impl InMemoryLedger {
    pub fn new(config: LedgerConfig) -> Self {
        let state = LedgerState {
            contributions: Vec::new(),
            index: HashMap::new(),
            counters: Counters::default(),
            contributor: config.contributor.clone(),
        };
        Self {
            config,
            inner: RwLock::new(state),
        }
    }

    /// Totals and progress against the configured goals.
    pub fn summary(&self) -> Result<LedgerSummary, LedgerError> {
        ProjectionBuilder::summary(self, &self.config.goals)
    }

    /// Group contributions by an arbitrary key.
    pub fn group_by<F>(&self, key_fn: F) -> Result<BTreeMap<String, Vec<Contribution>>, LedgerError>
    where
        F: Fn(&Contribution) -> Option<String>,
    {
        ProjectionBuilder::group_by(self, key_fn)
    }

    pub fn group_by_kind(
        &self,
    ) -> Result<BTreeMap<ContributionKind, Vec<Contribution>>, LedgerError> {
        ProjectionBuilder::group_by_kind(self)
    }

    /// Export projection of the current records. A filter without its own
    /// placeholder anonymizes with the configured one.
    pub fn export(&self, filter: &ExportFilter) -> Result<Vec<ExportRecord>, LedgerError> {
        if filter.placeholder.is_some() {
            return ExportProjection::build(self, filter);
        }
        let filter = filter
            .clone()
            .placeholder(self.config.anonymous_placeholder.clone());
        ExportProjection::build(self, &filter)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl LedgerState {
    fn fresh_id(&self) -> ContributionId {
        loop {
            let id = ContributionId::new();
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    fn append(&mut self, contribution: Contribution) {
        self.counters.record(&contribution);
        self.index
            .insert(contribution.id, self.contributions.len());
        self.contributions.push(contribution);
    }
}

impl LedgerWriter for InMemoryLedger {
    fn submit(&self, draft: ContributionDraft) -> Result<Contribution, LedgerError> {
        let kind = draft.kind();
        if let Err(error) = DraftValidator::validate(&draft) {
            debug!(%kind, fields = ?error.fields(), "draft rejected");
            return Err(error.into());
        }

        let (body, fallback) = ContributionBody::from_draft(draft);
        if let Some(label) = fallback {
            warn!(%kind, label = %label, "unrecognised duration bucket; applied table default");
        }

        let mut state = self.write()?;
        let contribution = Contribution {
            id: state.fresh_id(),
            submitted_at: SubmissionStamp::next_after(
                state.contributions.last().map(|c| &c.submitted_at),
            ),
            contributor: state.contributor.clone(),
            body,
        };
        state.append(contribution.clone());

        debug!(
            id = %contribution.id,
            %kind,
            seq = state.contributions.len(),
            "contribution appended"
        );
        Ok(contribution)
    }

    fn set_contributor(&self, name: &str) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        state.contributor = name.to_string();
        Ok(())
    }
}

impl LedgerReader for InMemoryLedger {
    fn contributions(&self) -> Result<Vec<Contribution>, LedgerError> {
        Ok(self.read()?.contributions.clone())
    }

    fn get(&self, id: &ContributionId) -> Result<Option<Contribution>, LedgerError> {
        let state = self.read()?;
        Ok(state
            .index
            .get(id)
            .and_then(|&index| state.contributions.get(index))
            .cloned())
    }

    fn contribution_count(&self) -> Result<usize, LedgerError> {
        Ok(self.read()?.contributions.len())
    }

    fn counters(&self) -> Result<Counters, LedgerError> {
        Ok(self.read()?.counters)
    }

    fn contributor(&self) -> Result<String, LedgerError> {
        Ok(self.read()?.contributor.clone())
    }

    fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        let state = self.read()?;
        Ok(LedgerSnapshot {
            contributions: state.contributions.clone(),
            counters: state.counters,
            contributor: state.contributor.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use bhasha_types::{AudioDraft, ImageDraft, TextDraft, VideoDraft};
    use proptest::prelude::*;

    use super::*;
    use crate::counters::CounterAudit;

    fn audio(duration: &str) -> ContributionDraft {
        ContributionDraft::Audio(AudioDraft {
            language: "Tamil".into(),
            category: "Common Phrases".into(),
            prompt: Some("Introduce yourself and your background".into()),
            duration: duration.into(),
            quality: "High (Studio)".into(),
        })
    }

    fn video(duration: &str) -> ContributionDraft {
        ContributionDraft::Video(VideoDraft {
            language: "Gujarati".into(),
            video_type: "Cultural Performances".into(),
            prompt: None,
            duration: duration.into(),
            setting: "Cultural Location".into(),
        })
    }

    fn text(source: &str, target: &str) -> ContributionDraft {
        ContributionDraft::Text(TextDraft {
            text_type: "Translation Pairs".into(),
            source_language: "English".into(),
            target_language: "Tamil".into(),
            source_text: source.into(),
            target_text: target.into(),
            difficulty: "Basic/Everyday".into(),
            context: None,
            region: "Standard".into(),
        })
    }

    fn image(description: &str) -> ContributionDraft {
        ContributionDraft::Image(ImageDraft {
            category: "Festivals & Celebrations".into(),
            language: "Bengali".into(),
            description: description.into(),
            cultural_significance: None,
            location: Some("Kolkata".into()),
            tags: vec!["festival".into(), "durga puja".into()],
            filename: "pandal.webp".into(),
            file_size: 48_213,
        })
    }

    #[test]
    fn text_submission_scenario() {
        let ledger = InMemoryLedger::default();
        let source = "Where is the bus stop????";
        let target = "perundhu niruththam enge?";
        assert_eq!(source.chars().count(), 25);
        assert_eq!(target.chars().count(), 25);

        let stored = ledger.submit(text(source, target)).unwrap();

        assert_eq!(ledger.contribution_count().unwrap(), 1);
        assert_eq!(ledger.counters().unwrap().text_records, 1);
        assert_eq!(stored.language(), "Tamil");
        assert_eq!(stored.word_count(), Some(3));
    }

    #[test]
    fn audio_submission_adds_exact_hours() {
        let ledger = InMemoryLedger::default();
        let before = ledger.summary().unwrap().audio_hours;
        let stored = ledger.submit(audio("5-10 minutes")).unwrap();
        let after = ledger.summary().unwrap().audio_hours;

        assert_eq!(stored.duration_hours(), Some(0.12));
        assert_eq!(before, 0.0);
        assert_eq!(after, 0.12);
    }

    #[test]
    fn short_image_description_is_rejected_without_side_effects() {
        let ledger = InMemoryLedger::default();
        let error = ledger.submit(image("Nice photo")).unwrap_err();

        match error {
            LedgerError::Validation(v) => assert_eq!(v.fields(), vec!["description"]),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(ledger.counters().unwrap().image_records, 0);
        assert_eq!(ledger.contribution_count().unwrap(), 0);
    }

    #[test]
    fn unknown_video_bucket_uses_default() {
        let ledger = InMemoryLedger::default();
        let stored = ledger.submit(video("an afternoon")).unwrap();
        assert_eq!(stored.duration_hours(), Some(0.12));
        assert_eq!(ledger.counters().unwrap().video_centihours, 12);
    }

    #[test]
    fn missing_duration_uses_table_default() {
        let drafts: Vec<ContributionDraft> = serde_json::from_str(
            r#"[
                {"kind": "audio", "language": "Hindi", "category": "News Reading",
                 "quality": "High (Studio)"},
                {"kind": "video", "language": "Telugu", "video_type": "Storytelling",
                 "setting": "Indoor"}
            ]"#,
        )
        .unwrap();

        let ledger = InMemoryLedger::default();
        let stored: Vec<_> = drafts
            .into_iter()
            .map(|draft| ledger.submit(draft).unwrap())
            .collect();

        assert_eq!(stored[0].duration_hours(), Some(0.04));
        assert_eq!(stored[1].duration_hours(), Some(0.12));
        let counters = ledger.counters().unwrap();
        assert_eq!(counters.audio_centihours, 4);
        assert_eq!(counters.video_centihours, 12);
    }

    #[test]
    fn insertion_order_and_stamps_are_monotonic() {
        let ledger = InMemoryLedger::default();
        let a = ledger.submit(audio("2-3 minutes")).unwrap();
        let b = ledger.submit(video("20+ minutes")).unwrap();
        let c = ledger.submit(audio("10+ minutes")).unwrap();

        let ids: Vec<_> = ledger
            .contributions()
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
        assert!(a.submitted_at < b.submitted_at);
        assert!(b.submitted_at < c.submitted_at);
    }

    #[test]
    fn contributor_applies_to_later_records_only() {
        let ledger = InMemoryLedger::default();
        let first = ledger.submit(audio("3-5 minutes")).unwrap();
        ledger.set_contributor("Meenakshi").unwrap();
        let second = ledger.submit(audio("3-5 minutes")).unwrap();

        assert_eq!(first.contributor, "Language Contributor");
        assert_eq!(second.contributor, "Meenakshi");
        assert_eq!(
            ledger.get(&first.id).unwrap().unwrap().contributor,
            "Language Contributor"
        );
        assert_eq!(ledger.contributor().unwrap(), "Meenakshi");
    }

    #[test]
    fn get_finds_by_id() {
        let ledger = InMemoryLedger::default();
        let stored = ledger.submit(audio("2-3 minutes")).unwrap();
        assert_eq!(ledger.get(&stored.id).unwrap(), Some(stored));
        assert_eq!(ledger.get(&ContributionId::new()).unwrap(), None);
    }

    #[test]
    fn counter_audit_detects_drift() {
        let ledger = InMemoryLedger::default();
        ledger.submit(audio("5-10 minutes")).unwrap();
        CounterAudit::verify(&ledger).unwrap();

        {
            let mut guard = ledger.inner.write().unwrap();
            guard.counters.audio_centihours += 1;
        }

        let error = CounterAudit::verify(&ledger).unwrap_err();
        assert_eq!(
            error,
            LedgerError::CounterDrift {
                counter: "audio_centihours",
                running: 13,
                recomputed: 12,
            }
        );
    }

    fn arb_draft() -> impl Strategy<Value = ContributionDraft> {
        let durations = prop::sample::select(vec![
            "2-3 minutes",
            "3-5 minutes",
            "5-10 minutes",
            "10+ minutes",
            "10-15 minutes",
            "20+ minutes",
            "unknown",
        ]);
        prop_oneof![
            durations.clone().prop_map(audio),
            durations.prop_map(video),
            ("[a-z ]{0,40}", "[a-z ]{0,40}").prop_map(|(s, t)| text(&s, &t)),
            "[a-z ]{0,50}".prop_map(|d| image(&d)),
        ]
    }

    proptest! {
        #[test]
        fn submissions_keep_ids_unique_and_counters_exact(
            drafts in prop::collection::vec(arb_draft(), 0..40)
        ) {
            let ledger = InMemoryLedger::default();
            let mut seen = HashSet::new();

            for draft in drafts {
                let before = ledger.contribution_count().unwrap();
                match ledger.submit(draft) {
                    Ok(stored) => {
                        prop_assert!(seen.insert(stored.id));
                        prop_assert_eq!(ledger.contribution_count().unwrap(), before + 1);
                    }
                    Err(LedgerError::Validation(_)) => {
                        prop_assert_eq!(ledger.contribution_count().unwrap(), before);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {other:?}"),
                }
            }

            let verified = CounterAudit::verify(&ledger).unwrap();
            let records = ledger.contributions().unwrap();
            let audio_centihours: u64 = records
                .iter()
                .filter(|c| c.kind() == ContributionKind::Audio)
                .map(|c| u64::from(c.duration_centihours()))
                .sum();
            prop_assert_eq!(verified.audio_centihours, audio_centihours);
            prop_assert_eq!(
                verified.text_records as usize,
                records.iter().filter(|c| c.kind() == ContributionKind::Text).count()
            );
        }

        #[test]
        fn text_validation_matches_length_rule(
            source in "[a-z]{0,30}",
            target in "[a-z]{0,30}",
        ) {
            let ledger = InMemoryLedger::default();
            let result = ledger.submit(text(&source, &target));
            let long_enough = source.chars().count() >= 20 && target.chars().count() >= 20;
            prop_assert_eq!(result.is_ok(), long_enough);
            prop_assert_eq!(ledger.contribution_count().unwrap(), usize::from(long_enough));
        }

        #[test]
        fn image_validation_matches_length_rule(description in "[a-z ]{0,50}") {
            let ledger = InMemoryLedger::default();
            let result = ledger.submit(image(&description));
            let long_enough = description.chars().count() >= 30;
            prop_assert_eq!(result.is_ok(), long_enough);
            prop_assert_eq!(ledger.counters().unwrap().image_records, u64::from(long_enough));
        }
    }
}
