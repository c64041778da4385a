use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::status::DispatchStatus;

/// One entry for the append-only activity log. Created per terminal outcome,
/// exactly once per event occurrence.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub occurrence_id: Uuid,
    pub order_id: i64,
    pub event_kind: String,
    pub template_code: Option<String>,
    pub status: DispatchStatus,
    pub destination: Option<String>,
    pub message_id: Option<String>,
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(
        occurrence_id: Uuid,
        order_id: i64,
        event_kind: String,
        status: DispatchStatus,
    ) -> Self {
        Self {
            occurrence_id,
            order_id,
            event_kind,
            template_code: None,
            status,
            destination: None,
            message_id: None,
            detail: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_template(mut self, template_code: String) -> Self {
        self.template_code = Some(template_code);
        self
    }

    pub fn with_destination(mut self, destination: String) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_message_id(mut self, message_id: String) -> Self {
        self.message_id = Some(message_id);
        self
    }

    pub fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }
}
