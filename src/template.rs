use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::event::{Event, OrderStatus};

/// The fixed set of customer-facing messages the dispatcher can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    OrderReady,
    OrderQuoted,
    OrderInProgress,
    PaymentReceived,
}

impl TemplateId {
    /// Template for an order-status transition, if that status notifies.
    pub fn for_status(status: OrderStatus) -> Option<TemplateId> {
        match status {
            OrderStatus::Ready => Some(TemplateId::OrderReady),
            OrderStatus::Quoted => Some(TemplateId::OrderQuoted),
            OrderStatus::InProgress => Some(TemplateId::OrderInProgress),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TemplateId::OrderReady => "order_ready",
            TemplateId::OrderQuoted => "order_quoted",
            TemplateId::OrderInProgress => "order_in_progress",
            TemplateId::PaymentReceived => "payment_received",
        }
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("no template for order status '{0}'")]
    NotFound(OrderStatus),
    #[error("quote template requires a price")]
    MissingPrice,
}

#[derive(Debug, Clone)]
pub struct RenderedMessage {
    pub template: TemplateId,
    pub body: String,
}

/// Renders the message body for an event. Pure; total over the known
/// (event, status) combinations. An order status outside the notifiable set
/// is a configuration defect surfaced as `NotFound`, never guessed around.
pub fn render(event: &Event) -> Result<RenderedMessage, TemplateError> {
    match event {
        Event::OrderStatusChanged {
            new_status,
            client_name,
            service_type,
            price,
            ..
        } => {
            let label = service_label(service_type);
            match new_status {
                OrderStatus::Ready => Ok(RenderedMessage {
                    template: TemplateId::OrderReady,
                    body: format!(
                        "¡Hola {client_name}! Tu pedido de {label} ya está listo para retirar. Te esperamos en el local."
                    ),
                }),
                OrderStatus::Quoted => {
                    let price = price.as_ref().ok_or(TemplateError::MissingPrice)?;
                    Ok(RenderedMessage {
                        template: TemplateId::OrderQuoted,
                        body: format!(
                            "Hola {client_name}, el presupuesto de {label} es de ${}. Avisanos si querés que avancemos.",
                            format_amount(price)
                        ),
                    })
                }
                OrderStatus::InProgress => Ok(RenderedMessage {
                    template: TemplateId::OrderInProgress,
                    body: format!(
                        "Hola {client_name}, tu pedido de {label} ya está en producción. Te avisamos apenas esté listo."
                    ),
                }),
                other => Err(TemplateError::NotFound(*other)),
            }
        }
        Event::PaymentRegistered {
            client_name,
            amount,
            remaining,
            is_paid_in_full,
            ..
        } => {
            let mut body = format!(
                "Hola {client_name}, registramos tu pago de ${}.",
                format_amount(amount)
            );
            if *is_paid_in_full {
                body.push_str(" ¡Tu pedido quedó saldado, gracias!");
            } else if *remaining > Decimal::ZERO {
                body.push_str(&format!(
                    " Saldo pendiente: ${}.",
                    format_amount(remaining)
                ));
            }
            Ok(RenderedMessage {
                template: TemplateId::PaymentReceived,
                body,
            })
        }
    }
}

/// Customer-facing label for a catalog service code.
pub fn service_label(service_type: &str) -> String {
    let label = service_type.trim().replace('_', " ").to_lowercase();
    if label.is_empty() {
        "tu pedido".to_string()
    } else {
        label
    }
}

/// es-AR grouping: '.' as thousands separator, ',' as decimal separator.
/// Formats the exact decimal it is given; no re-scaling or rounding.
pub fn format_amount(value: &Decimal) -> String {
    let text = value.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped},{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
