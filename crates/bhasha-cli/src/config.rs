use std::path::Path;

use anyhow::Context;
use bhasha_export::ExportConfig;
use bhasha_ledger::LedgerConfig;
use serde::{Deserialize, Serialize};

/// Settings for one `bhasha` session, read from TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ledger: LedgerConfig,
    pub export: ExportConfig,
    /// Rows shown under "recent contributions".
    pub recent_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig::default(),
            export: ExportConfig::default(),
            recent_limit: 10,
        }
    }
}

impl SessionConfig {
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(source).context("invalid session config")?;
        config.ledger.validate()?;
        Ok(config)
    }

    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&source).with_context(|| format!("loading config {}", path.display()))
    }
}
