use std::collections::HashMap;

use async_trait::async_trait;

/// Read side of the external settings store. Keys follow the
/// `<channel>.auto.<status>` scheme (e.g. `whatsapp.auto.ready`). An absent
/// key is not an error; it resolves to the compiled default table.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    WhatsApp,
    Email,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::WhatsApp => "whatsapp",
            Channel::Email => "email",
        }
    }
}

/// Whether auto-send is enabled for `channel` on the given status key.
/// A stored value counts as enabled only when it reads "true" or "1".
pub async fn auto_send_enabled<P>(store: &P, channel: Channel, status: &str) -> bool
where
    P: PolicyStore + ?Sized,
{
    let key = format!("{}.auto.{}", channel.as_str(), status);

    match store.get(&key).await {
        Some(value) => matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1"),
        None => default_for(&key),
    }
}

/// Compiled defaults, used whenever the settings store has no value.
pub fn default_for(key: &str) -> bool {
    match key {
        "whatsapp.auto.ready" => true,
        "whatsapp.auto.quoted" => true,
        "whatsapp.auto.in_progress" => false,
        "whatsapp.auto.payment" => true,
        // Email auto-send ships disabled until the channel is wired up.
        _ => false,
    }
}

/// Settings snapshot backed by a plain map. Production loads it from the
/// settings table; tests build it inline.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPolicyStore {
    entries: HashMap<String, String>,
}

impl InMemoryPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl PolicyStore for InMemoryPolicyStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
