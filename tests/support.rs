use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU32, Ordering},
};

use anyhow::{Error, Result};
use async_trait::async_trait;
use dispatch_service::{
    clients::{
        audit::AuditSink,
        gateway::{GatewayError, MessagingGateway},
    },
    config::Config,
    models::{
        audit::AuditRecord,
        event::{Event, EventEnvelope, OrderStatus},
        gateway::GatewayReceipt,
    },
};
use rust_decimal::Decimal;

/// Gateway double with a shared call counter and a scripted failure mode.
pub struct FakeGateway {
    pub calls: Arc<AtomicU32>,
    mode: FakeGatewayMode,
}

#[derive(Clone, Copy)]
enum FakeGatewayMode {
    Succeed,
    /// Emit this many transient failures before succeeding.
    TransientFailures(u32),
    Reject,
}

impl FakeGateway {
    pub fn succeeding(calls: Arc<AtomicU32>) -> Self {
        Self {
            calls,
            mode: FakeGatewayMode::Succeed,
        }
    }

    pub fn with_transient_failures(calls: Arc<AtomicU32>, failures: u32) -> Self {
        Self {
            calls,
            mode: FakeGatewayMode::TransientFailures(failures),
        }
    }

    pub fn rejecting(calls: Arc<AtomicU32>) -> Self {
        Self {
            calls,
            mode: FakeGatewayMode::Reject,
        }
    }
}

#[async_trait]
impl MessagingGateway for FakeGateway {
    async fn send(&self, _destination: &str, _body: &str) -> Result<GatewayReceipt, GatewayError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        match self.mode {
            FakeGatewayMode::Succeed => Ok(GatewayReceipt {
                id: format!("msg-{}", call + 1),
            }),
            FakeGatewayMode::TransientFailures(failures) => {
                if call < failures {
                    Err(GatewayError::Transient("simulated outage".to_string()))
                } else {
                    Ok(GatewayReceipt {
                        id: format!("msg-{}", call + 1),
                    })
                }
            }
            FakeGatewayMode::Reject => Err(GatewayError::Rejected(
                "simulated invalid destination".to_string(),
            )),
        }
    }
}

/// Audit sink double that records every appended entry.
pub struct RecordingAuditSink {
    pub records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl RecordingAuditSink {
    pub fn new(records: Arc<Mutex<Vec<AuditRecord>>>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn append(&self, record: AuditRecord) -> Result<(), Error> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

pub fn test_config(gateway_base_url: &str) -> Config {
    Config {
        gateway_base_url: gateway_base_url.to_string(),
        gateway_api_token: "test-token".to_string(),
        gateway_timeout_seconds: 5,
        attempt_ttl_seconds: 3600,
        max_retry_attempts: 3,
        initial_retry_delay_ms: 10,
        max_retry_delay_ms: 50,
        retry_backoff_multiplier: 2,
        phone_messaging_country_code: "549".to_string(),
        phone_bare_country_code: "54".to_string(),
        phone_mobile_prefixes: vec!["15".to_string()],
        phone_default_area_codes: vec!["11".to_string()],
        phone_max_local_length: 10,
    }
}

pub fn status_event(
    new_status: OrderStatus,
    client_phone: Option<&str>,
    price: Option<Decimal>,
) -> Event {
    Event::OrderStatusChanged {
        order_id: 42,
        new_status,
        client_phone: client_phone.map(|p| p.to_string()),
        client_name: "Marta".to_string(),
        service_type: "banners".to_string(),
        price,
    }
}

pub fn payment_event(
    client_phone: Option<&str>,
    amount: Decimal,
    remaining: Decimal,
    is_paid_in_full: bool,
) -> Event {
    Event::PaymentRegistered {
        order_id: 42,
        client_phone: client_phone.map(|p| p.to_string()),
        client_name: "Marta".to_string(),
        amount,
        remaining,
        is_paid_in_full,
    }
}

pub fn envelope(event: Event) -> EventEnvelope {
    EventEnvelope::new(event)
}
