//! Undo / redo history
//!
//! An ordered list of snapshots plus a pointer at the current entry.
//! The manager never touches plan state; callers re-hydrate from the
//! snapshot it hands back.

use shared::plan::PlanSnapshot;
use std::collections::VecDeque;

/// Snapshot stack for one mode
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: VecDeque<PlanSnapshot>,
    /// Index of the current entry; meaningless while `entries` is empty
    pointer: usize,
    limit: usize,
}

impl HistoryManager {
    /// `limit` is clamped to at least one entry
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            pointer: 0,
            limit: limit.max(1),
        }
    }

    /// History seeded with the initial state
    pub fn with_initial(snapshot: PlanSnapshot, limit: usize) -> Self {
        let mut history = Self::new(limit);
        history.push(snapshot);
        history
    }

    /// Drop the redo branch, append, move to the new tail
    ///
    /// Beyond the limit the oldest entry is evicted.
    pub fn push(&mut self, snapshot: PlanSnapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.pointer + 1);
        }
        self.entries.push_back(snapshot);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.pointer = self.entries.len() - 1;
    }

    /// Step back; `None` at the first entry
    pub fn undo(&mut self) -> Option<PlanSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.pointer -= 1;
        self.entries.get(self.pointer).cloned()
    }

    /// Step forward; `None` at the tail
    pub fn redo(&mut self) -> Option<PlanSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.pointer += 1;
        self.entries.get(self.pointer).cloned()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&PlanSnapshot> {
        self.entries.get(self.pointer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Forget everything and start over from `snapshot` (load / deserialize)
    pub fn reset(&mut self, snapshot: PlanSnapshot) {
        self.entries.clear();
        self.pointer = 0;
        self.push(snapshot);
    }
}
