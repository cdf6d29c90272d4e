//! Per-table edit locks for collaborative editing
//!
//! A [`LockTable`] is shared by every editor of one plan; each editor's
//! session owns a [`LockManager`] bound to its identity. A table has at
//! most one non-expired lock. Expired locks are treated as free and are
//! overwritten on the next acquisition.

use crate::plan::error::{PlanError, PlanResult};
use parking_lot::RwLock;
use shared::models::{EditorIdentity, LockEvent, LockResourceType, ResourceLock};
use shared::util::now_millis;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Lock event channel capacity
const LOCK_CHANNEL_CAPACITY: usize = 1024;

/// Millisecond clock; swapped out in tests
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Lock state shared between collaborators
#[derive(Clone)]
pub struct LockTable {
    locks: Arc<RwLock<HashMap<i64, ResourceLock>>>,
    event_tx: broadcast::Sender<LockEvent>,
}

impl std::fmt::Debug for LockTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockTable")
            .field("locks", &self.locks.read().len())
            .field("event_tx", &"<broadcast::Sender>")
            .finish()
    }
}

impl Default for LockTable {
    fn default() -> Self {
        Self::new()
    }
}

impl LockTable {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(LOCK_CHANNEL_CAPACITY);
        Self {
            locks: Arc::new(RwLock::new(HashMap::new())),
            event_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LockEvent> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: LockEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::trace!("Lock event dropped: no active receivers");
        }
    }
}

/// One editor's view of the shared lock table
#[derive(Clone)]
pub struct LockManager {
    table: LockTable,
    editor: EditorIdentity,
    ttl_ms: i64,
    clock: Clock,
}

impl std::fmt::Debug for LockManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockManager")
            .field("editor", &self.editor)
            .field("ttl_ms", &self.ttl_ms)
            .finish()
    }
}

impl LockManager {
    pub fn new(table: LockTable, editor: EditorIdentity, ttl_ms: i64) -> Self {
        Self {
            table,
            editor,
            ttl_ms,
            clock: Arc::new(now_millis),
        }
    }

    /// Replace the wall clock (tests drive TTL expiry with it)
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn editor(&self) -> &EditorIdentity {
        &self.editor
    }

    pub fn table(&self) -> &LockTable {
        &self.table
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LockEvent> {
        self.table.subscribe()
    }

    fn now(&self) -> i64 {
        (self.clock)()
    }

    /// Acquire or renew the lock on a table
    ///
    /// Returns `false` (and broadcasts `lock-denied`) when another editor
    /// holds a live lock.
    pub fn ensure_lock(&self, resource_id: i64) -> bool {
        let now = self.now();
        let mut locks = self.table.locks.write();

        match locks.get_mut(&resource_id) {
            Some(lock) if !lock.is_expired(now) && !lock.is_owned_by(&self.editor.id) => {
                let owner_name = lock.owner.name.clone();
                drop(locks);
                tracing::warn!(
                    resource_id,
                    requester = %self.editor.id,
                    owner = %owner_name,
                    "Lock denied"
                );
                self.table.emit(LockEvent::LockDenied {
                    resource_type: LockResourceType::Table,
                    resource_id,
                    requester_id: self.editor.id.clone(),
                    owner_name,
                });
                false
            }
            Some(lock) if !lock.is_expired(now) => {
                lock.refreshed_at = now;
                lock.ttl_ms = self.ttl_ms;
                true
            }
            _ => {
                locks.insert(
                    resource_id,
                    ResourceLock {
                        resource_type: LockResourceType::Table,
                        resource_id,
                        owner: self.editor.clone(),
                        acquired_at: now,
                        refreshed_at: now,
                        ttl_ms: self.ttl_ms,
                    },
                );
                drop(locks);
                tracing::debug!(resource_id, owner = %self.editor.id, "Lock acquired");
                self.table.emit(LockEvent::LockAcquired {
                    resource_type: LockResourceType::Table,
                    resource_id,
                    owner_id: self.editor.id.clone(),
                    owner_name: self.editor.name.clone(),
                });
                true
            }
        }
    }

    /// Acquire every lock, checking all of them before taking any
    pub fn ensure_locks(&self, resource_ids: &[i64]) -> PlanResult<()> {
        self.check(resource_ids)?;
        for &resource_id in resource_ids {
            if !self.ensure_lock(resource_id) {
                return Err(self.conflict(resource_id));
            }
        }
        Ok(())
    }

    /// Verify no foreign live lock blocks the tables; never mutates
    pub fn check(&self, resource_ids: &[i64]) -> PlanResult<()> {
        let now = self.now();
        let locks = self.table.locks.read();
        for resource_id in resource_ids {
            if let Some(lock) = locks.get(resource_id)
                && !lock.is_expired(now)
                && !lock.is_owned_by(&self.editor.id)
            {
                return Err(PlanError::LockConflict {
                    resource_id: *resource_id,
                    owner_name: lock.owner.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Reject and broadcast `lock-denied` for a blocked table
    pub fn deny(&self, resource_id: i64) -> PlanError {
        let error = self.conflict(resource_id);
        if let PlanError::LockConflict { owner_name, .. } = &error {
            self.table.emit(LockEvent::LockDenied {
                resource_type: LockResourceType::Table,
                resource_id,
                requester_id: self.editor.id.clone(),
                owner_name: owner_name.clone(),
            });
        }
        error
    }

    fn conflict(&self, resource_id: i64) -> PlanError {
        let owner_name = self
            .holder(resource_id)
            .map(|lock| lock.owner.name)
            .unwrap_or_default();
        PlanError::LockConflict {
            resource_id,
            owner_name,
        }
    }

    /// Release this editor's locks except `keep`; returns the released ids
    pub fn release_locks_except(&self, keep: &[i64]) -> Vec<i64> {
        let mut released = Vec::new();
        {
            let mut locks = self.table.locks.write();
            locks.retain(|id, lock| {
                let drop_it = lock.is_owned_by(&self.editor.id) && !keep.contains(id);
                if drop_it {
                    released.push(*id);
                }
                !drop_it
            });
        }
        released.sort_unstable();
        for &resource_id in &released {
            self.table.emit(LockEvent::LockReleased {
                resource_type: LockResourceType::Table,
                resource_id,
                owner_id: self.editor.id.clone(),
            });
        }
        if !released.is_empty() {
            tracing::debug!(owner = %self.editor.id, count = released.len(), "Locks released");
        }
        released
    }

    pub fn release_all(&self) -> Vec<i64> {
        self.release_locks_except(&[])
    }

    /// Live lock on a table, if any
    pub fn holder(&self, resource_id: i64) -> Option<ResourceLock> {
        let now = self.now();
        self.table
            .locks
            .read()
            .get(&resource_id)
            .filter(|lock| !lock.is_expired(now))
            .cloned()
    }

    /// Whether this editor holds a live lock on the table
    pub fn owns(&self, resource_id: i64) -> bool {
        self.holder(resource_id)
            .is_some_and(|lock| lock.is_owned_by(&self.editor.id))
    }

    /// All live locks, ordered by resource id
    pub fn active_locks(&self) -> Vec<ResourceLock> {
        let now = self.now();
        let mut list: Vec<ResourceLock> = self
            .table
            .locks
            .read()
            .values()
            .filter(|lock| !lock.is_expired(now))
            .cloned()
            .collect();
        list.sort_by_key(|lock| lock.resource_id);
        list
    }

    /// Drop expired entries; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.now();
        let mut locks = self.table.locks.write();
        let before = locks.len();
        locks.retain(|_, lock| !lock.is_expired(now));
        before - locks.len()
    }
}
