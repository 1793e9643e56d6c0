//! Export projections.
//!
//! An export is a filtered, optionally anonymized and pruned copy of the
//! ledger, flattened to ordered field lists ready for CSV or JSON
//! rendering. Building one never touches the ledger.

use std::collections::BTreeSet;

use bhasha_types::{Contribution, ContributionBody, ContributionKind, DurationBucket};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::config::ANONYMOUS_CONTRIBUTOR;
use crate::error::LedgerError;
use crate::traits::LedgerReader;

/// Fields kept when metadata is excluded.
pub const ESSENTIAL_FIELDS: [&str; 4] = ["id", "type", "language", "timestamp"];

/// Export options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportFilter {
    /// Kinds to include. Empty means every kind.
    pub kinds: BTreeSet<ContributionKind>,
    /// When `false`, records are pruned to [`ESSENTIAL_FIELDS`].
    pub include_metadata: bool,
    /// Replace the contributor name with `placeholder`.
    pub anonymize: bool,
    /// Anonymous contributor name. A ledger fills in its configured
    /// placeholder when this is `None`.
    pub placeholder: Option<String>,
}

impl Default for ExportFilter {
    fn default() -> Self {
        Self {
            kinds: ContributionKind::ALL.into_iter().collect(),
            include_metadata: true,
            anonymize: false,
            placeholder: None,
        }
    }
}

impl ExportFilter {
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = ContributionKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    pub fn include_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    pub fn anonymize(mut self, anonymize: bool) -> Self {
        self.anonymize = anonymize;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn admits(&self, kind: ContributionKind) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&kind)
    }
}

/// A flat export row with fields in canonical order.
///
/// Optional fields that are absent on the source record are omitted, so
/// rows of different kinds carry different field sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRecord {
    fields: Vec<(&'static str, Value)>,
}

impl ExportRecord {
    /// Full projection of one contribution.
    pub fn from_contribution(contribution: &Contribution) -> Self {
        let mut fields: Vec<(&'static str, Value)> = vec![
            ("id", Value::from(contribution.id.to_string())),
            ("type", Value::from(contribution.kind().as_str())),
            ("language", Value::from(contribution.language())),
        ];

        match &contribution.body {
            ContributionBody::Audio(a) => {
                fields.push(("category", Value::from(a.category.as_str())));
                fields.push(("prompt", Value::from(a.prompt.as_str())));
                fields.push(("duration", Value::from(a.duration.label())));
                fields.push(("duration_hours", Value::from(a.duration_hours())));
                fields.push(("quality", Value::from(a.quality.as_str())));
            }
            ContributionBody::Video(v) => {
                fields.push(("video_type", Value::from(v.video_type.as_str())));
                fields.push(("prompt", Value::from(v.prompt.as_str())));
                fields.push(("duration", Value::from(v.duration.label())));
                fields.push(("duration_hours", Value::from(v.duration_hours())));
                fields.push(("setting", Value::from(v.setting.as_str())));
            }
            ContributionBody::Text(t) => {
                fields.push(("text_type", Value::from(t.text_type.as_str())));
                fields.push(("source_language", Value::from(t.source_language.as_str())));
                fields.push(("target_language", Value::from(t.target_language.as_str())));
                fields.push(("source_text", Value::from(t.source_text.as_str())));
                fields.push(("target_text", Value::from(t.target_text.as_str())));
                fields.push(("difficulty", Value::from(t.difficulty.as_str())));
                if let Some(context) = &t.context {
                    fields.push(("context", Value::from(context.as_str())));
                }
                fields.push(("region", Value::from(t.region.as_str())));
                fields.push(("word_count", Value::from(t.word_count())));
            }
            ContributionBody::Image(i) => {
                fields.push(("category", Value::from(i.category.as_str())));
                fields.push(("description", Value::from(i.description.as_str())));
                if let Some(significance) = &i.cultural_significance {
                    fields.push(("cultural_significance", Value::from(significance.as_str())));
                }
                if let Some(location) = &i.location {
                    fields.push(("location", Value::from(location.as_str())));
                }
                fields.push((
                    "tags",
                    Value::Array(i.tags.iter().map(|t| Value::from(t.as_str())).collect()),
                ));
                fields.push(("filename", Value::from(i.filename.as_str())));
                fields.push(("file_size", Value::from(i.file_size)));
            }
        }

        fields.push(("timestamp", Value::from(contribution.submitted_at.to_rfc3339())));
        fields.push(("contributor", Value::from(contribution.contributor.as_str())));

        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn fields(&self) -> &[(&'static str, Value)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn anonymize(&mut self, placeholder: &str) {
        for (name, value) in &mut self.fields {
            if *name == "contributor" {
                *value = Value::from(placeholder);
            }
        }
    }

    fn prune_to_essentials(&mut self) {
        self.fields
            .retain(|(name, _)| ESSENTIAL_FIELDS.contains(name));
    }
}

impl Serialize for ExportRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Builds export projections.
pub struct ExportProjection;

impl ExportProjection {
    pub fn build<R: LedgerReader>(
        reader: &R,
        filter: &ExportFilter,
    ) -> Result<Vec<ExportRecord>, LedgerError> {
        Ok(Self::project(&reader.contributions()?, filter))
    }

    /// Pure projection over an already-read slice of contributions.
    pub fn project(contributions: &[Contribution], filter: &ExportFilter) -> Vec<ExportRecord> {
        contributions
            .iter()
            .filter(|c| filter.admits(c.kind()))
            .map(|c| {
                let mut record = ExportRecord::from_contribution(c);
                if filter.anonymize {
                    record.anonymize(
                        filter.placeholder.as_deref().unwrap_or(ANONYMOUS_CONTRIBUTOR),
                    );
                }
                if !filter.include_metadata {
                    record.prune_to_essentials();
                }
                record
            })
            .collect()
    }
}
