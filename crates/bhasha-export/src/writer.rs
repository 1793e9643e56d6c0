use std::fs;
use std::path::{Path, PathBuf};

use bhasha_ledger::ExportRecord;
use chrono::{DateTime, Local, TimeZone};
use tracing::info;

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};
use crate::filename::export_filename;
use crate::format::ExportFormat;

/// Result of writing an export file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub record_count: usize,
    pub bytes: usize,
}

/// Writes export documents into the configured directory.
pub struct ExportWriter {
    config: ExportConfig,
}

impl ExportWriter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Write using the local wall clock for the filename.
    pub fn write_now(
        &self,
        records: &[ExportRecord],
        format: ExportFormat,
    ) -> ExportResult<ExportFile> {
        self.write_at(records, format, &Local::now())
    }

    pub fn write_at<Tz>(
        &self,
        records: &[ExportRecord],
        format: ExportFormat,
        at: &DateTime<Tz>,
    ) -> ExportResult<ExportFile>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let document = crate::render(records, format)?;
        let path = self
            .config
            .directory
            .join(export_filename(&self.config.prefix, at, format));

        create_parent(&path)?;
        fs::write(&path, document.as_bytes()).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        info!(
            path = %path.display(),
            %format,
            records = records.len(),
            bytes = document.len(),
            "export written"
        );

        Ok(ExportFile {
            path,
            format,
            record_count: records.len(),
            bytes: document.len(),
        })
    }
}

fn create_parent(path: &Path) -> ExportResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ExportError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
