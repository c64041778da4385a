use anyhow::{Error, Result};
use async_trait::async_trait;
use tracing::info;

use crate::models::audit::AuditRecord;

/// Append-only activity log boundary. Fire-and-forget from the dispatcher's
/// perspective: append failures are logged by the caller, never retried, and
/// never fail the event.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, record: AuditRecord) -> Result<(), Error>;
}

/// Sink that emits audit records to the structured log. Deployments that
/// persist the activity trail implement `AuditSink` over their store.
#[derive(Debug, Clone, Default)]
pub struct LogAuditSink;

#[async_trait]
impl AuditSink for LogAuditSink {
    async fn append(&self, record: AuditRecord) -> Result<(), Error> {
        info!(
            occurrence_id = %record.occurrence_id,
            order_id = record.order_id,
            event_kind = %record.event_kind,
            status = %record.status,
            template_code = record.template_code.as_deref().unwrap_or(""),
            destination = record.destination.as_deref().unwrap_or(""),
            message_id = record.message_id.as_deref().unwrap_or(""),
            detail = record.detail.as_deref().unwrap_or(""),
            "Notification outcome recorded"
        );
        Ok(())
    }
}
