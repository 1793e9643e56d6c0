use bhasha_types::ContributionDraft;

use crate::error::{FieldViolation, ValidationError};

/// Minimum length of each side of a text pair, in characters.
pub const MIN_TEXT_CHARS: usize = 20;

/// Minimum length of an image description, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 30;

/// Submission rules applied before anything touches the ledger.
///
/// Lengths are counted in Unicode scalar values, so Indic scripts are not
/// penalised for multi-byte encodings. Audio and video drafts always pass;
/// unknown duration labels are mapped to a default bucket instead.
pub struct DraftValidator;

impl DraftValidator {
    pub fn validate(draft: &ContributionDraft) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        match draft {
            ContributionDraft::Text(text) => {
                check_min_chars(&mut violations, "source_text", &text.source_text, MIN_TEXT_CHARS);
                check_min_chars(&mut violations, "target_text", &text.target_text, MIN_TEXT_CHARS);
            }
            ContributionDraft::Image(image) => {
                check_min_chars(
                    &mut violations,
                    "description",
                    &image.description,
                    MIN_DESCRIPTION_CHARS,
                );
            }
            ContributionDraft::Audio(_) | ContributionDraft::Video(_) => {}
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                kind: draft.kind(),
                violations,
            })
        }
    }
}

fn check_min_chars(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    value: &str,
    min_chars: usize,
) {
    let actual_chars = value.chars().count();
    if actual_chars < min_chars {
        violations.push(FieldViolation {
            field,
            min_chars,
            actual_chars,
        });
    }
}

#[cfg(test)]
mod tests {
    use bhasha_types::{AudioDraft, ContributionKind, ImageDraft, TextDraft};

    use super::*;

    fn text(source: &str, target: &str) -> ContributionDraft {
        ContributionDraft::Text(TextDraft {
            text_type: "Translation Pairs".into(),
            source_language: "English".into(),
            target_language: "Hindi".into(),
            source_text: source.into(),
            target_text: target.into(),
            difficulty: "Intermediate".into(),
            context: None,
            region: "Northern".into(),
        })
    }

    fn image(description: &str) -> ContributionDraft {
        ContributionDraft::Image(ImageDraft {
            category: "Cultural Heritage".into(),
            language: "Marathi".into(),
            description: description.into(),
            cultural_significance: None,
            location: None,
            tags: vec![],
            filename: "fort.png".into(),
            file_size: 1,
        })
    }

    #[test]
    fn text_at_exact_minimum_passes() {
        let twenty = "a".repeat(MIN_TEXT_CHARS);
        DraftValidator::validate(&text(&twenty, &twenty)).unwrap();
    }

    #[test]
    fn short_text_lists_violated_fields() {
        let ok = "a".repeat(MIN_TEXT_CHARS);
        let error = DraftValidator::validate(&text(&ok, "too short")).unwrap_err();
        assert_eq!(error.kind, ContributionKind::Text);
        assert_eq!(error.fields(), vec!["target_text"]);

        let error = DraftValidator::validate(&text("", "")).unwrap_err();
        assert_eq!(error.fields(), vec!["source_text", "target_text"]);
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // 20 Devanagari characters, far more than 20 bytes.
        let hindi = "नमस्ते".repeat(4).chars().take(20).collect::<String>();
        assert_eq!(hindi.chars().count(), 20);
        DraftValidator::validate(&text(&hindi, &hindi)).unwrap();

        let short = "नमस्ते";
        assert!(short.len() > short.chars().count());
        assert!(DraftValidator::validate(&text(short, &hindi)).is_err());
    }

    #[test]
    fn image_description_minimum() {
        DraftValidator::validate(&image(&"d".repeat(MIN_DESCRIPTION_CHARS))).unwrap();
        let error = DraftValidator::validate(&image("0123456789")).unwrap_err();
        assert_eq!(error.violations[0].actual_chars, 10);
        assert_eq!(error.violations[0].min_chars, 30);
    }

    #[test]
    fn audio_with_unknown_bucket_is_not_an_error() {
        let draft = ContributionDraft::Audio(AudioDraft {
            language: "Bengali".into(),
            category: "Songs & Poetry".into(),
            prompt: None,
            duration: "half an hour".into(),
            quality: "Basic (Normal)".into(),
        });
        DraftValidator::validate(&draft).unwrap();
    }
}
