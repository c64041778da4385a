use serde::Serialize;

use crate::template::TemplateId;

/// Outcome of the decision engine for one event. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationDecision {
    Send { template: TemplateId },
    Skip { reason: SkipReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    StatusNotNotifiable,
    NoDestination,
    QuoteWithoutPrice,
    ChannelDisabled,
    DuplicateOccurrence,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::StatusNotNotifiable => "status does not trigger notification",
            SkipReason::NoDestination => "no destination",
            SkipReason::QuoteWithoutPrice => "quote status without price",
            SkipReason::ChannelDisabled => "channel disabled by policy",
            SkipReason::DuplicateOccurrence => "duplicate event occurrence",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
