use std::fmt;

use bhasha_types::ContributionKind;
use serde::Serialize;

/// A single field that failed a minimum-length rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub min_chars: usize,
    pub actual_chars: usize,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} needs at least {} characters (got {})",
            self.field, self.min_chars, self.actual_chars
        )
    }
}

/// A draft was rejected. The ledger is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} contribution rejected: {}", join_violations(.violations))]
pub struct ValidationError {
    pub kind: ContributionKind,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Names of the violated fields, in check order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("counter drift in {counter}: running total {running}, recomputed {recomputed}")]
    CounterDrift {
        counter: &'static str,
        running: u64,
        recomputed: u64,
    },

    #[error("invalid ledger configuration: {0}")]
    InvalidConfig(String),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}
