use serde::{Deserialize, Serialize};

/// Wire payload for the messaging gateway's send endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
    pub to: String,
    pub body: String,
}

/// Provider acknowledgement for an accepted message.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayReceipt {
    pub id: String,
}
