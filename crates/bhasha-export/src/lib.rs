//! Export file rendering for the Bhasha corpus ledger.
//!
//! Turns export projections into CSV or JSON documents named for upload
//! to the external corpus service.

pub mod config;
pub mod csv;
pub mod error;
pub mod filename;
pub mod format;
pub mod json;
pub mod writer;

pub use config::ExportConfig;
pub use error::{ExportError, ExportResult};
pub use filename::{export_filename, DEFAULT_PREFIX};
pub use format::ExportFormat;
pub use writer::{ExportFile, ExportWriter};

use bhasha_ledger::ExportRecord;

/// Render records in the given format.
pub fn render(records: &[ExportRecord], format: ExportFormat) -> ExportResult<String> {
    match format {
        ExportFormat::Csv => Ok(csv::render_csv(records)),
        ExportFormat::Json => json::render_json(records),
    }
}
