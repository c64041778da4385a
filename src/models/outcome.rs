use serde::Serialize;

use crate::models::decision::SkipReason;
use crate::phone::Destination;

/// Terminal result of processing one event occurrence. Built once, after any
/// retries have been folded in, and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryOutcome {
    pub sent: bool,
    pub to: Option<String>,
    pub message_id: Option<String>,
    pub skipped_reason: Option<String>,
    pub error: Option<ErrorKind>,
}

impl DeliveryOutcome {
    pub fn sent(to: &Destination, message_id: String) -> Self {
        Self {
            sent: true,
            to: Some(to.as_str().to_string()),
            message_id: Some(message_id),
            skipped_reason: None,
            error: None,
        }
    }

    pub fn skipped(reason: SkipReason) -> Self {
        Self {
            sent: false,
            to: None,
            message_id: None,
            skipped_reason: Some(reason.as_str().to_string()),
            error: None,
        }
    }

    pub fn failed(error: ErrorKind, to: Option<&Destination>) -> Self {
        Self {
            sent: false,
            to: to.map(|d| d.as_str().to_string()),
            message_id: None,
            skipped_reason: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    TemplateNotFound,
    ProviderRejected,
    DeliveryFailed,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::TemplateNotFound => write!(f, "template not found"),
            ErrorKind::ProviderRejected => write!(f, "provider rejected the message"),
            ErrorKind::DeliveryFailed => write!(f, "delivery failed after retries"),
        }
    }
}
