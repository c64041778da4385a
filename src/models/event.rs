use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain events the dispatcher reacts to. Produced upstream at-least-once;
/// duplicate occurrences are deduplicated at the delivery step, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    OrderStatusChanged {
        order_id: i64,
        new_status: OrderStatus,
        client_phone: Option<String>,
        client_name: String,
        service_type: String,
        price: Option<Decimal>,
    },
    PaymentRegistered {
        order_id: i64,
        client_phone: Option<String>,
        client_name: String,
        amount: Decimal,
        remaining: Decimal,
        is_paid_in_full: bool,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::OrderStatusChanged { .. } => "order_status_changed",
            Event::PaymentRegistered { .. } => "payment_registered",
        }
    }

    pub fn order_id(&self) -> i64 {
        match self {
            Event::OrderStatusChanged { order_id, .. } => *order_id,
            Event::PaymentRegistered { order_id, .. } => *order_id,
        }
    }

    /// Raw destination as entered by the shop staff, if any.
    pub fn client_phone(&self) -> Option<&str> {
        let phone = match self {
            Event::OrderStatusChanged { client_phone, .. } => client_phone,
            Event::PaymentRegistered { client_phone, .. } => client_phone,
        };
        phone.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// Full order lifecycle of the shop. Only a subset triggers notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Received,
    Quoted,
    InProgress,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::Quoted => "quoted",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One intake occurrence of an event. The occurrence id is what the delivery
/// ledger deduplicates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub occurrence_id: Uuid,
    pub received_at: DateTime<Utc>,
    pub event: Event,
}

impl EventEnvelope {
    pub fn new(event: Event) -> Self {
        Self {
            occurrence_id: Uuid::new_v4(),
            received_at: Utc::now(),
            event,
        }
    }
}
