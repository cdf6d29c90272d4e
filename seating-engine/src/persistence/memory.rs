//! In-memory store and guest directory
//!
//! Used when embedding the engine without a backend, and by tests.
//! Failures can be injected to exercise the autosave retry path.

use super::{GuestDirectory, PersistenceError, PersistenceResult, PlanStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{AssignmentRef, Guest};
use shared::plan::{PlanDocument, PlanPatch};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Consume one unit of injected failure, if any is left
fn take_failure(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPlanStore {
    documents: Arc<RwLock<HashMap<String, PlanDocument>>>,
    saves: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored document
    pub fn insert(&self, document: PlanDocument) {
        self.documents
            .write()
            .insert(document.plan_id.clone(), document);
    }

    pub fn document(&self, plan_id: &str) -> Option<PlanDocument> {
        self.documents.read().get(plan_id).cloned()
    }

    /// Successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make the next `count` saves fail
    pub fn fail_next_saves(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl PlanStore for MemoryPlanStore {
    async fn load_plan(&self, plan_id: &str) -> PersistenceResult<PlanDocument> {
        self.document(plan_id)
            .ok_or_else(|| PersistenceError::PlanNotFound(plan_id.to_string()))
    }

    async fn save_plan(&self, plan_id: &str, patch: PlanPatch) -> PersistenceResult<()> {
        if take_failure(&self.failures) {
            return Err(PersistenceError::Unavailable("injected failure".to_string()));
        }
        self.documents
            .write()
            .entry(plan_id.to_string())
            .or_insert_with(|| PlanDocument::new(plan_id))
            .merge(patch);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryGuestDirectory {
    guests: Arc<RwLock<HashMap<String, BTreeMap<i64, Guest>>>>,
    writes: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
}

impl MemoryGuestDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guests(plan_id: &str, guests: impl IntoIterator<Item = Guest>) -> Self {
        let directory = Self::new();
        directory.guests.write().insert(
            plan_id.to_string(),
            guests.into_iter().map(|g| (g.id, g)).collect(),
        );
        directory
    }

    pub fn guest(&self, plan_id: &str, guest_id: i64) -> Option<Guest> {
        self.guests
            .read()
            .get(plan_id)
            .and_then(|guests| guests.get(&guest_id))
            .cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_next_writes(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl GuestDirectory for MemoryGuestDirectory {
    async fn load_guests(&self, plan_id: &str) -> PersistenceResult<Vec<Guest>> {
        Ok(self
            .guests
            .read()
            .get(plan_id)
            .map(|guests| guests.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn write_assignment(
        &self,
        plan_id: &str,
        guest_id: i64,
        assignment: AssignmentRef,
    ) -> PersistenceResult<()> {
        if take_failure(&self.failures) {
            return Err(PersistenceError::Unavailable("injected failure".to_string()));
        }
        let mut guests = self.guests.write();
        let guest = guests
            .get_mut(plan_id)
            .and_then(|guests| guests.get_mut(&guest_id))
            .ok_or_else(|| PersistenceError::Storage(format!("guest {guest_id} not found")))?;
        guest.table_id = assignment.table_id;
        guest.seat_id = assignment.seat_id;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
