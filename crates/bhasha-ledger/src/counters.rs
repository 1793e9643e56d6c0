use bhasha_types::{Contribution, ContributionKind};
use serde::Serialize;

use crate::error::LedgerError;
use crate::traits::LedgerReader;

/// Running per-kind totals.
///
/// Hours are kept in centi-hours so that a running total and a fresh
/// recount always agree exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub audio_centihours: u64,
    pub video_centihours: u64,
    pub audio_records: u64,
    pub video_records: u64,
    pub text_records: u64,
    pub image_records: u64,
    /// Sum of target-text word counts over text records.
    pub text_words: u64,
}

impl Counters {
    /// Fold one contribution into the totals.
    pub fn record(&mut self, contribution: &Contribution) {
        let centihours = u64::from(contribution.duration_centihours());
        match contribution.kind() {
            ContributionKind::Audio => {
                self.audio_records += 1;
                self.audio_centihours += centihours;
            }
            ContributionKind::Video => {
                self.video_records += 1;
                self.video_centihours += centihours;
            }
            ContributionKind::Text => {
                self.text_records += 1;
                self.text_words += contribution.word_count().unwrap_or(0) as u64;
            }
            ContributionKind::Image => {
                self.image_records += 1;
            }
        }
    }

    /// Totals recomputed from scratch.
    pub fn recount<'a>(contributions: impl IntoIterator<Item = &'a Contribution>) -> Self {
        let mut counters = Self::default();
        for contribution in contributions {
            counters.record(contribution);
        }
        counters
    }

    pub fn audio_hours(&self) -> f64 {
        centihours_to_hours(self.audio_centihours)
    }

    pub fn video_hours(&self) -> f64 {
        centihours_to_hours(self.video_centihours)
    }

    pub fn audio_video_hours(&self) -> f64 {
        centihours_to_hours(self.audio_centihours + self.video_centihours)
    }

    pub fn text_image_records(&self) -> u64 {
        self.text_records + self.image_records
    }

    pub fn total_records(&self) -> u64 {
        self.audio_records + self.video_records + self.text_records + self.image_records
    }

    fn fields(&self) -> [(&'static str, u64); 7] {
        [
            ("audio_centihours", self.audio_centihours),
            ("video_centihours", self.video_centihours),
            ("audio_records", self.audio_records),
            ("video_records", self.video_records),
            ("text_records", self.text_records),
            ("image_records", self.image_records),
            ("text_words", self.text_words),
        ]
    }
}

fn centihours_to_hours(centihours: u64) -> f64 {
    centihours as f64 / 100.0
}

/// Checks running totals against a recount of the records.
pub struct CounterAudit;

impl CounterAudit {
    /// Returns the verified counters, or the first counter that drifted.
    pub fn verify<R: LedgerReader>(reader: &R) -> Result<Counters, LedgerError> {
        let snapshot = reader.snapshot()?;
        let recomputed = Counters::recount(&snapshot.contributions);

        for ((counter, running), (_, fresh)) in snapshot
            .counters
            .fields()
            .into_iter()
            .zip(recomputed.fields())
        {
            if running != fresh {
                return Err(LedgerError::CounterDrift {
                    counter,
                    running,
                    recomputed: fresh,
                });
            }
        }

        Ok(recomputed)
    }
}
