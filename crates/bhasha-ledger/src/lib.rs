//! Contribution ledger for the Bhasha corpus.
//!
//! This crate provides:
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - `InMemoryLedger`, the session-owned ordered ledger
//! - Draft validation (minimum text and description lengths)
//! - Running aggregate counters and their recount audit
//! - Projection builders (summary, grouping, recent, achievements)
//! - Export projections (kind filter, anonymization, metadata pruning)

pub mod config;
pub mod counters;
pub mod error;
pub mod export;
pub mod memory;
pub mod projection;
pub mod traits;
pub mod validation;

pub use config::{Goals, LedgerConfig, ANONYMOUS_CONTRIBUTOR, DEFAULT_CONTRIBUTOR};
pub use counters::{CounterAudit, Counters};
pub use error::{FieldViolation, LedgerError, ValidationError};
pub use export::{ExportFilter, ExportProjection, ExportRecord, ESSENTIAL_FIELDS};
pub use memory::InMemoryLedger;
pub use projection::{
    progress_ratio, Achievement, ContributionRow, LedgerSummary, ProjectionBuilder, UNKNOWN_GROUP,
};
pub use traits::{LedgerReader, LedgerSnapshot, LedgerWriter};
pub use validation::{DraftValidator, MIN_DESCRIPTION_CHARS, MIN_TEXT_CHARS};
