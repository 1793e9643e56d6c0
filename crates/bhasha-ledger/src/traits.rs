use bhasha_types::{Contribution, ContributionDraft, ContributionId};

use crate::counters::Counters;
use crate::error::LedgerError;

/// Write boundary for ledger submissions.
pub trait LedgerWriter: Send + Sync {
    /// Validate a draft, stamp it, and append it.
    fn submit(&self, draft: ContributionDraft) -> Result<Contribution, LedgerError>;

    /// Change the contributor name applied to later submissions.
    fn set_contributor(&self, name: &str) -> Result<(), LedgerError>;
}

/// Read boundary for ledger queries and projections.
pub trait LedgerReader: Send + Sync {
    /// All contributions in insertion order.
    fn contributions(&self) -> Result<Vec<Contribution>, LedgerError>;

    fn get(&self, id: &ContributionId) -> Result<Option<Contribution>, LedgerError>;

    fn contribution_count(&self) -> Result<usize, LedgerError>;

    /// Running totals maintained on submit.
    fn counters(&self) -> Result<Counters, LedgerError>;

    fn contributor(&self) -> Result<String, LedgerError>;

    /// Records, counters, and contributor read under one lock.
    fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError>;
}

/// Consistent point-in-time view of a ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub contributions: Vec<Contribution>,
    pub counters: Counters,
    pub contributor: String,
}
