use chrono::{DateTime, TimeZone};

use crate::format::ExportFormat;

/// Filename prefix expected by the corpus upload service.
pub const DEFAULT_PREFIX: &str = "indic_language_corpus";

/// `<prefix>_<YYYYMMDD_HHMMSS>.<ext>` for the given wall-clock time.
pub fn export_filename<Tz>(prefix: &str, at: &DateTime<Tz>, format: ExportFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{prefix}_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}
