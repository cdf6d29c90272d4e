//! Debounced autosave worker
//!
//! The session never awaits persistence. It pushes snapshots and assignment
//! changes into an [`AutosaveHandle`]; the worker task coalesces snapshots
//! per (plan, mode) and saves each after a quiet period. Assignment
//! write-backs are forwarded immediately.
//!
//! Sync status is published through a `watch` channel:
//! `idle → pending → synced`, or `error` while a save is waiting to retry.

use super::{GuestDirectory, PlanStore};
use crate::core::PlannerConfig;
use serde::{Deserialize, Serialize};
use shared::models::{AssignmentRef, PlanMode};
use shared::plan::{PlanPatch, PlanSnapshot};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Persistence state surfaced to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Idle,
    Pending,
    Synced,
    Error,
}

enum AutosaveMessage {
    Snapshot {
        plan_id: String,
        snapshot: PlanSnapshot,
    },
    Assignment {
        plan_id: String,
        guest_id: i64,
        assignment: AssignmentRef,
    },
    Flush(oneshot::Sender<()>),
}

/// Sending side held by a plan session
#[derive(Clone)]
pub struct AutosaveHandle {
    tx: mpsc::UnboundedSender<AutosaveMessage>,
    status: watch::Receiver<SyncStatus>,
}

impl std::fmt::Debug for AutosaveHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutosaveHandle")
            .field("status", &*self.status.borrow())
            .finish()
    }
}

impl AutosaveHandle {
    /// Queue a snapshot; replaces any unsaved snapshot of the same mode
    pub fn notify_snapshot(&self, plan_id: &str, snapshot: PlanSnapshot) {
        let message = AutosaveMessage::Snapshot {
            plan_id: plan_id.to_string(),
            snapshot,
        };
        if self.tx.send(message).is_err() {
            tracing::warn!(plan_id = %plan_id, "Autosave worker stopped, snapshot dropped");
        }
    }

    /// Forward a guest's new assignment to the guest directory
    pub fn notify_assignment(&self, plan_id: &str, guest_id: i64, assignment: AssignmentRef) {
        let message = AutosaveMessage::Assignment {
            plan_id: plan_id.to_string(),
            guest_id,
            assignment,
        };
        if self.tx.send(message).is_err() {
            tracing::warn!(
                plan_id = %plan_id,
                guest_id = guest_id,
                "Autosave worker stopped, assignment write-back dropped"
            );
        }
    }

    /// Save everything pending now and wait for the attempt to finish
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(AutosaveMessage::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }

    pub fn status(&self) -> SyncStatus {
        *self.status.borrow()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
        self.status.clone()
    }
}

struct PendingSave {
    snapshot: PlanSnapshot,
    due: Instant,
    /// Failed attempts so far
    attempts: u32,
}

/// Background task owning the store adapters
pub struct AutosaveWorker {
    store: Arc<dyn PlanStore>,
    directory: Option<Arc<dyn GuestDirectory>>,
    debounce: Duration,
    retry_base: Duration,
    retry_max: Duration,
    rx: mpsc::UnboundedReceiver<AutosaveMessage>,
    status_tx: watch::Sender<SyncStatus>,
    pending: HashMap<(String, PlanMode), PendingSave>,
    shutdown: CancellationToken,
}

impl AutosaveWorker {
    pub fn new(
        store: Arc<dyn PlanStore>,
        directory: Option<Arc<dyn GuestDirectory>>,
        config: &PlannerConfig,
        shutdown: CancellationToken,
    ) -> (Self, AutosaveHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(SyncStatus::Idle);
        let worker = Self {
            store,
            directory,
            debounce: Duration::from_millis(config.autosave_debounce_ms),
            retry_base: Duration::from_millis(config.retry_base_ms),
            retry_max: Duration::from_millis(config.retry_max_ms),
            rx,
            status_tx,
            pending: HashMap::new(),
            shutdown,
        };
        let handle = AutosaveHandle {
            tx,
            status: status_rx,
        };
        (worker, handle)
    }

    /// Create the worker and spawn it on the current runtime
    pub fn spawn(
        store: Arc<dyn PlanStore>,
        directory: Option<Arc<dyn GuestDirectory>>,
        config: &PlannerConfig,
        shutdown: CancellationToken,
    ) -> (AutosaveHandle, JoinHandle<()>) {
        let (worker, handle) = Self::new(store, directory, config, shutdown);
        let task = tokio::spawn(worker.run());
        (handle, task)
    }

    /// Main loop; exits after a final flush on shutdown or when every handle is dropped
    pub async fn run(mut self) {
        tracing::info!(
            debounce_ms = self.debounce.as_millis() as u64,
            "Autosave worker started"
        );

        loop {
            let next_due = self.next_due();
            let deadline = next_due.unwrap_or_else(Instant::now);

            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    tracing::info!("Autosave worker received shutdown signal");
                    while let Ok(message) = self.rx.try_recv() {
                        self.handle_message(message).await;
                    }
                    self.flush_all(false).await;
                    break;
                }

                message = self.rx.recv() => match message {
                    Some(message) => self.handle_message(message).await,
                    None => {
                        tracing::debug!("All autosave handles dropped");
                        self.flush_all(false).await;
                        break;
                    }
                },

                _ = tokio::time::sleep_until(deadline), if next_due.is_some() => {
                    self.save_due().await;
                }
            }
        }

        tracing::info!("Autosave worker stopped");
    }

    async fn handle_message(&mut self, message: AutosaveMessage) {
        match message {
            AutosaveMessage::Snapshot { plan_id, snapshot } => {
                let key = (plan_id, snapshot.mode);
                if snapshot.is_empty() {
                    // 空白方案不保存
                    tracing::debug!(plan_id = %key.0, mode = %key.1, "Skipping empty plan snapshot");
                    self.pending.remove(&key);
                    self.refresh_status(false);
                    return;
                }
                let due = Instant::now() + self.debounce;
                let attempts = self.pending.get(&key).map(|p| p.attempts).unwrap_or(0);
                self.pending.insert(
                    key,
                    PendingSave {
                        snapshot,
                        due,
                        attempts,
                    },
                );
                self.refresh_status(false);
            }
            AutosaveMessage::Assignment {
                plan_id,
                guest_id,
                assignment,
            } => {
                self.write_assignment(&plan_id, guest_id, assignment).await;
            }
            AutosaveMessage::Flush(done) => {
                self.flush_all(true).await;
                let _ = done.send(());
            }
        }
    }

    async fn write_assignment(&self, plan_id: &str, guest_id: i64, assignment: AssignmentRef) {
        let Some(directory) = &self.directory else {
            return;
        };
        if let Err(e) = directory.write_assignment(plan_id, guest_id, assignment).await {
            tracing::error!(
                plan_id = %plan_id,
                guest_id = guest_id,
                error = %e,
                "Failed to write guest assignment"
            );
            self.status_tx.send_replace(SyncStatus::Error);
        }
    }

    fn next_due(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.due).min()
    }

    /// Save every entry whose quiet period has elapsed
    async fn save_due(&mut self) {
        let now = Instant::now();
        let mut keys: Vec<_> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= now)
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort();
        let mut saved = false;
        for key in keys {
            saved |= self.save_one(key, true).await;
        }
        self.refresh_status(saved);
    }

    /// Save everything regardless of due time; without `reschedule`
    /// failed snapshots are dropped (shutdown)
    async fn flush_all(&mut self, reschedule: bool) {
        let mut keys: Vec<_> = self.pending.keys().cloned().collect();
        keys.sort();
        let mut saved = false;
        let mut lost = false;
        for key in keys {
            let ok = self.save_one(key, reschedule).await;
            saved |= ok;
            lost |= !ok && !reschedule;
        }
        self.refresh_status(saved);
        if lost {
            self.status_tx.send_replace(SyncStatus::Error);
        }
    }

    async fn save_one(&mut self, key: (String, PlanMode), reschedule: bool) -> bool {
        let Some(entry) = self.pending.remove(&key) else {
            return false;
        };
        let (plan_id, mode) = &key;
        let patch = PlanPatch::new(entry.snapshot.clone());

        match self.store.save_plan(plan_id, patch).await {
            Ok(()) => {
                tracing::debug!(
                    plan_id = %plan_id,
                    mode = %mode,
                    sequence = entry.snapshot.last_sequence,
                    "Plan snapshot saved"
                );
                true
            }
            Err(e) if reschedule => {
                let attempts = entry.attempts + 1;
                let delay = self.retry_delay(attempts);
                tracing::error!(
                    plan_id = %plan_id,
                    mode = %mode,
                    attempts = attempts,
                    retry_in_ms = delay.as_millis() as u64,
                    error = %e,
                    "Failed to save plan snapshot"
                );
                let due = Instant::now() + delay;
                self.pending.insert(
                    key,
                    PendingSave {
                        snapshot: entry.snapshot,
                        due,
                        attempts,
                    },
                );
                false
            }
            Err(e) => {
                tracing::error!(
                    plan_id = %plan_id,
                    mode = %mode,
                    error = %e,
                    "Failed to save plan snapshot on shutdown, changes lost"
                );
                false
            }
        }
    }

    /// Exponential backoff: base * 2^(attempts-1), capped
    fn retry_delay(&self, attempts: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempts.saturating_sub(1));
        self.retry_base
            .saturating_mul(factor)
            .min(self.retry_max)
    }

    /// Recompute status from the pending set; `saved` marks a successful write
    fn refresh_status(&self, saved: bool) {
        let current = *self.status_tx.borrow();
        let status = if self.pending.values().any(|p| p.attempts > 0) {
            SyncStatus::Error
        } else if !self.pending.is_empty() {
            SyncStatus::Pending
        } else if saved || current == SyncStatus::Pending {
            SyncStatus::Synced
        } else {
            current
        };
        self.status_tx.send_if_modified(|value| {
            if *value == status {
                false
            } else {
                *value = status;
                true
            }
        });
    }
}
