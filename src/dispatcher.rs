use tracing::{error, info, warn};

use crate::{
    clients::{
        audit::AuditSink,
        gateway::{GatewayError, MessagingGateway},
        policy::PolicyStore,
    },
    config::Config,
    decision::decide,
    ledger::DeliveryLedger,
    models::{
        audit::AuditRecord,
        decision::{NotificationDecision, SkipReason},
        event::EventEnvelope,
        outcome::{DeliveryOutcome, ErrorKind},
        retry::RetryConfig,
        status::{AttemptStatus, DispatchStatus},
    },
    phone::{Destination, PhoneRules, normalize},
    template::{TemplateId, render},
    utils::retry_with_backoff,
};

/// Orchestrates one event occurrence end to end: dedup check, decision,
/// render, destination normalization, delivery under the retry policy, and
/// exactly one audit append per occurrence. Each event is an independent
/// unit of work; a `Dispatcher` is safe to share across concurrent events.
pub struct Dispatcher<G, P, A> {
    gateway: G,
    policies: P,
    audit: A,
    ledger: DeliveryLedger,
    phone_rules: PhoneRules,
    retry: RetryConfig,
}

impl<G, P, A> Dispatcher<G, P, A>
where
    G: MessagingGateway,
    P: PolicyStore,
    A: AuditSink,
{
    pub fn new(gateway: G, policies: P, audit: A, config: &Config) -> Self {
        Self {
            gateway,
            policies,
            audit,
            ledger: DeliveryLedger::new(config.attempt_ttl()),
            phone_rules: config.phone_rules(),
            retry: config.retry_config(),
        }
    }

    pub async fn dispatch(&self, envelope: &EventEnvelope) -> DeliveryOutcome {
        match self.ledger.check(envelope.occurrence_id) {
            AttemptStatus::Sent => {
                info!(
                    occurrence_id = %envelope.occurrence_id,
                    "Occurrence already delivered, skipping"
                );
                return DeliveryOutcome::skipped(SkipReason::DuplicateOccurrence);
            }
            AttemptStatus::Processing => {
                info!(
                    occurrence_id = %envelope.occurrence_id,
                    "Occurrence is being processed elsewhere, skipping"
                );
                return DeliveryOutcome::skipped(SkipReason::DuplicateOccurrence);
            }
            _ => {}
        }

        let template = match decide(&envelope.event, &self.policies).await {
            NotificationDecision::Send { template } => template,
            NotificationDecision::Skip { reason } => {
                info!(
                    event_kind = envelope.event.kind(),
                    order_id = envelope.event.order_id(),
                    reason = %reason,
                    "Notification skipped"
                );
                let outcome = DeliveryOutcome::skipped(reason);
                self.append_audit(envelope, None, &outcome, None).await;
                return outcome;
            }
        };

        // decide() only clears events that carry a destination.
        let raw_phone = match envelope.event.client_phone() {
            Some(phone) => phone,
            None => {
                let outcome = DeliveryOutcome::skipped(SkipReason::NoDestination);
                self.append_audit(envelope, Some(template), &outcome, None).await;
                return outcome;
            }
        };

        self.ledger.mark_processing(envelope.occurrence_id);

        let rendered = match render(&envelope.event) {
            Ok(rendered) => rendered,
            Err(e) => {
                error!(
                    event_kind = envelope.event.kind(),
                    order_id = envelope.event.order_id(),
                    error = %e,
                    "No usable template for event, finalizing as failed"
                );
                self.ledger.mark_failed(envelope.occurrence_id);
                let outcome = DeliveryOutcome::failed(ErrorKind::TemplateNotFound, None);
                self.append_audit(envelope, Some(template), &outcome, Some(e.to_string()))
                    .await;
                return outcome;
            }
        };

        let destination = normalize(raw_phone, &self.phone_rules);
        let outcome = self.deliver(&destination, &rendered.body).await;

        if outcome.sent {
            self.ledger.mark_sent(envelope.occurrence_id);
        } else {
            self.ledger.mark_failed(envelope.occurrence_id);
        }

        self.append_audit(envelope, Some(rendered.template), &outcome, None)
            .await;
        outcome
    }

    /// The delivery step: exactly one logical send, with transient failures
    /// retried under the bounded backoff policy and a permanent rejection
    /// resolving the step immediately. Retries wrap only the provider call;
    /// decision and rendering are never re-executed.
    async fn deliver(&self, destination: &Destination, body: &str) -> DeliveryOutcome {
        let attempt = retry_with_backoff(&self.retry, || async move {
            match self.gateway.send(destination.as_str(), body).await {
                Ok(receipt) => Ok(Ok(receipt)),
                // Terminal refusal resolves the step so it is not retried.
                Err(GatewayError::Rejected(detail)) => Ok(Err(detail)),
                Err(GatewayError::Transient(detail)) => Err(detail),
            }
        })
        .await;

        match attempt {
            Ok(Ok(receipt)) => DeliveryOutcome::sent(destination, receipt.id),
            Ok(Err(detail)) => {
                warn!(
                    destination = %destination,
                    detail = %detail,
                    "Gateway rejected the message, not retrying"
                );
                DeliveryOutcome::failed(ErrorKind::ProviderRejected, Some(destination))
            }
            Err(detail) => {
                warn!(
                    destination = %destination,
                    detail = %detail,
                    "Delivery failed after exhausting retries"
                );
                DeliveryOutcome::failed(ErrorKind::DeliveryFailed, Some(destination))
            }
        }
    }

    async fn append_audit(
        &self,
        envelope: &EventEnvelope,
        template: Option<TemplateId>,
        outcome: &DeliveryOutcome,
        detail: Option<String>,
    ) {
        let status = if outcome.sent {
            DispatchStatus::Sent
        } else if outcome.skipped_reason.is_some() {
            DispatchStatus::Skipped
        } else {
            DispatchStatus::Failed
        };

        let mut record = AuditRecord::new(
            envelope.occurrence_id,
            envelope.event.order_id(),
            envelope.event.kind().to_string(),
            status,
        );
        if let Some(template) = template {
            record = record.with_template(template.code().to_string());
        }
        if let Some(to) = &outcome.to {
            record = record.with_destination(to.clone());
        }
        if let Some(message_id) = &outcome.message_id {
            record = record.with_message_id(message_id.clone());
        }
        let detail = detail
            .or_else(|| outcome.skipped_reason.clone())
            .or_else(|| outcome.error.map(|e| e.to_string()));
        if let Some(detail) = detail {
            record = record.with_detail(detail);
        }

        if let Err(e) = self.audit.append(record).await {
            warn!(
                error = %e,
                occurrence_id = %envelope.occurrence_id,
                "Failed to append audit record"
            );
        }
    }
}
