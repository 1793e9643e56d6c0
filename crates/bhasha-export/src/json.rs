use bhasha_ledger::ExportRecord;

use crate::error::ExportResult;

/// Render records as a pretty-printed JSON array.
pub fn render_json(records: &[ExportRecord]) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use bhasha_ledger::{ExportFilter, InMemoryLedger, LedgerWriter};
    use bhasha_types::{ContributionDraft, ImageDraft};
    use serde_json::Value;

    use super::*;

    #[test]
    fn tags_stay_nested_arrays() {
        let ledger = InMemoryLedger::default();
        ledger
            .submit(ContributionDraft::Image(ImageDraft {
                category: "Documents & Text".into(),
                language: "Tamil".into(),
                description: "Palm-leaf manuscript with Grantha script margins".into(),
                cultural_significance: Some("Temple archive".into()),
                location: None,
                tags: vec!["manuscript".into(), "grantha".into()],
                filename: "olai.jpg".into(),
                file_size: 90_000,
            }))
            .unwrap();

        let records = ledger.export(&ExportFilter::default()).unwrap();
        let json = render_json(&records).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();

        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["tags"], serde_json::json!(["manuscript", "grantha"]));
        assert_eq!(rows[0]["file_size"], 90_000);
        assert_eq!(rows[0]["type"], "image");
        assert!(rows[0].get("location").is_none());
    }

    #[test]
    fn empty_export_is_empty_array() {
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }
}
