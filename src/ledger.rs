use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use uuid::Uuid;

use crate::models::status::AttemptStatus;

/// In-process record of delivery attempts per event occurrence. This is what
/// makes the delivery step idempotent: a re-dispatched occurrence that is
/// already `Processing` or `Sent` makes no further provider call. Entries
/// expire after `ttl`; pruning happens lazily on writes.
#[derive(Debug)]
pub struct DeliveryLedger {
    entries: Mutex<HashMap<Uuid, (AttemptStatus, Instant)>>,
    ttl: Duration,
}

impl DeliveryLedger {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn check(&self, occurrence_id: Uuid) -> AttemptStatus {
        let entries = self.lock();
        match entries.get(&occurrence_id) {
            Some((status, recorded_at)) if recorded_at.elapsed() < self.ttl => *status,
            _ => AttemptStatus::NotFound,
        }
    }

    pub fn mark_processing(&self, occurrence_id: Uuid) {
        self.set(occurrence_id, AttemptStatus::Processing);
    }

    pub fn mark_sent(&self, occurrence_id: Uuid) {
        self.set(occurrence_id, AttemptStatus::Sent);
    }

    pub fn mark_failed(&self, occurrence_id: Uuid) {
        self.set(occurrence_id, AttemptStatus::Failed);
    }

    fn set(&self, occurrence_id: Uuid, status: AttemptStatus) {
        let mut entries = self.lock();
        entries.retain(|_, (_, recorded_at)| recorded_at.elapsed() < self.ttl);
        entries.insert(occurrence_id, (status, Instant::now()));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, (AttemptStatus, Instant)>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
