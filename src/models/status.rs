use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

/// Terminal state of one event occurrence, as recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStatus {
    Sent,
    Skipped,
    Failed,
}

/// Delivery-ledger state for one event occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    NotFound,
    Processing,
    Sent,
    Failed,
}

impl Display for DispatchStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DispatchStatus::Sent => write!(f, "sent"),
            DispatchStatus::Skipped => write!(f, "skipped"),
            DispatchStatus::Failed => write!(f, "failed"),
        }
    }
}
