use tracing::debug;

use crate::{
    clients::policy::{Channel, PolicyStore, auto_send_enabled},
    models::{
        decision::{NotificationDecision, SkipReason},
        event::Event,
    },
    template::TemplateId,
};

/// Decides whether an event warrants a customer notification and, if so,
/// which template to use. Check order is significant: structural and
/// data-completeness checks come before policy, so a Skip always carries the
/// most specific reason.
pub async fn decide<P>(event: &Event, policies: &P) -> NotificationDecision
where
    P: PolicyStore + ?Sized,
{
    let decision = match event {
        Event::OrderStatusChanged {
            new_status, price, ..
        } => {
            let Some(template) = TemplateId::for_status(*new_status) else {
                return skip(SkipReason::StatusNotNotifiable);
            };

            if event.client_phone().is_none() {
                return skip(SkipReason::NoDestination);
            }

            if template == TemplateId::OrderQuoted && price.is_none() {
                // A price confirmation with no price must never go out.
                return skip(SkipReason::QuoteWithoutPrice);
            }

            if !auto_send_enabled(policies, Channel::WhatsApp, new_status.as_str()).await {
                return skip(SkipReason::ChannelDisabled);
            }

            NotificationDecision::Send { template }
        }
        Event::PaymentRegistered { .. } => {
            if event.client_phone().is_none() {
                return skip(SkipReason::NoDestination);
            }

            if !auto_send_enabled(policies, Channel::WhatsApp, "payment").await {
                return skip(SkipReason::ChannelDisabled);
            }

            NotificationDecision::Send {
                template: TemplateId::PaymentReceived,
            }
        }
    };

    debug!(event_kind = event.kind(), "Event cleared for sending");
    decision
}

fn skip(reason: SkipReason) -> NotificationDecision {
    NotificationDecision::Skip { reason }
}
