use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::filename::DEFAULT_PREFIX;
use crate::format::ExportFormat;

/// Where and how export files are written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: PathBuf,
    pub prefix: String,
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            prefix: DEFAULT_PREFIX.into(),
            format: ExportFormat::Csv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ExportConfig::default();
        assert_eq!(c.directory, PathBuf::from("."));
        assert_eq!(c.prefix, "indic_language_corpus");
        assert_eq!(c.format, ExportFormat::Csv);
    }
}
