use chrono_tz::Tz;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{error, info};

use crate::error::FetchError;
use crate::models::slot::{Slot, Suggestion};
use crate::scheduling::categorizer::Buckets;
use crate::scheduling::fetcher::SlotSource;
use crate::scheduling::rotator::Rotator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    Pending,
    Ready,
    Failed,
}

/// Point-in-time view used by the readiness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub readiness: Readiness,
    pub morning: usize,
    pub midday: usize,
    pub afternoon: usize,
    pub cursor: usize,
}

struct Inner {
    buckets: Buckets,
    rotator: Rotator,
    readiness: Readiness,
}

/// Buckets, suggestion cursor and readiness for one service instance.
pub struct SchedulerState {
    inner: Mutex<Inner>,
}

impl SchedulerState {
    pub fn new(slot_zone: Tz, display_zone: Tz) -> Self {
        SchedulerState {
            inner: Mutex::new(Inner {
                buckets: Buckets::default(),
                rotator: Rotator::new(slot_zone, display_zone),
                readiness: Readiness::Pending,
            }),
        }
    }

    // Every critical section leaves Inner consistent, so a poisoned lock is
    // still usable.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches once from `source` and categorizes the result.
    ///
    /// On failure the buckets stay as they were and the state is marked
    /// [`Readiness::Failed`]; nothing retries.
    pub async fn initialize<S: SlotSource>(&self, source: &S) -> Result<usize, FetchError> {
        match source.fetch_available_slots().await {
            Ok(slots) => {
                let count = slots.len();
                self.load(slots);
                info!("Slots categorized by time of day.");
                Ok(count)
            }
            Err(e) => {
                error!("Failed to initialize slots: {}", e);
                self.lock().readiness = Readiness::Failed;
                Err(e)
            }
        }
    }

    pub fn load(&self, slots: Vec<Slot>) {
        let mut inner = self.lock();
        inner.buckets.categorize(slots);
        inner.readiness = Readiness::Ready;
    }

    /// Current suggestions; the cursor moves on only if there were any.
    pub fn next_suggestions(&self) -> Vec<Suggestion> {
        let mut guard = self.lock();
        let Inner {
            buckets, rotator, ..
        } = &mut *guard;
        rotator.next(buckets)
    }

    pub fn reset(&self) {
        self.lock().rotator.reset();
    }

    pub fn snapshot(&self) -> Snapshot {
        let inner = self.lock();
        Snapshot {
            readiness: inner.readiness,
            morning: inner.buckets.morning.len(),
            midday: inner.buckets.midday.len(),
            afternoon: inner.buckets.afternoon.len(),
            cursor: inner.rotator.cursor(),
        }
    }
}
