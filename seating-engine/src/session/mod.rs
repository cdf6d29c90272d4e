//! Plan session - the single entry point for one editor on one plan
//!
//! Owns both mode layouts, the guest roster, per-mode history, the viewport
//! and the editor's view of the shared lock table.
//!
//! # Command Flow
//!
//! ```text
//! execute_command(cmd)
//!     ├─ 1. Lock gate (collaboration only, read-only check)
//!     ├─ 2. CommandAction::from(&cmd).execute(ctx) → events
//!     ├─ 3. apply_events(state, roster, events)
//!     ├─ 4. ensure_locks(gated tables)
//!     ├─ 5. history push
//!     └─ 6. broadcast + autosave + guest write-backs
//! ```
//!
//! A rejected command leaves state, roster, history and locks untouched.

mod assist;
mod loader;
mod ops;

#[cfg(test)]
mod tests;

pub use assist::AutoAssignReport;
pub use ops::FrameFlush;

use crate::core::PlannerConfig;
use crate::frame::FrameBatch;
use crate::history::HistoryManager;
use crate::locks::{Clock, LockManager, LockTable};
use crate::persistence::AutosaveHandle;
use crate::plan::{
    apply_events, gated_tables, CommandAction, CommandContext, CommandHandler, CommandMetadata,
    GuestRoster, PlanError, PlanResult, PlanState,
};
use crate::viewport::{ViewportController, ViewportState};
use shared::models::{EditorIdentity, Guest, LockEvent, PlanMode};
use shared::plan::{
    CommandResponse, PlanCommand, PlanCommandPayload, PlanDocument, PlanEvent, PlanEventPayload,
    PlanSnapshot, SnapshotError,
};
use shared::util::IdAllocator;
use std::collections::BTreeSet;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

pub struct PlanSession {
    plan_id: String,
    editor: EditorIdentity,
    config: PlannerConfig,
    /// Active tab
    mode: PlanMode,
    ceremony: PlanState,
    banquet: PlanState,
    roster: GuestRoster,
    ceremony_history: HistoryManager,
    banquet_history: HistoryManager,
    /// Shared by both modes so ids never collide across tabs
    ids: IdAllocator,
    locks: LockManager,
    viewport: ViewportController,
    frame: FrameBatch,
    event_tx: broadcast::Sender<PlanEvent>,
    autosave: Option<AutosaveHandle>,
}

impl std::fmt::Debug for PlanSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanSession")
            .field("plan_id", &self.plan_id)
            .field("editor", &self.editor)
            .field("mode", &self.mode)
            .field("event_tx", &"<broadcast::Sender>")
            .field("autosave", &self.autosave)
            .finish()
    }
}

impl PlanSession {
    /// Fresh, empty plan with a private lock table
    pub fn new(plan_id: impl Into<String>, editor: EditorIdentity, config: PlannerConfig) -> Self {
        Self::with_lock_table(plan_id, editor, config, LockTable::new())
    }

    /// Fresh plan sharing `locks` with other editors' sessions
    pub fn with_lock_table(
        plan_id: impl Into<String>,
        editor: EditorIdentity,
        config: PlannerConfig,
        locks: LockTable,
    ) -> Self {
        let plan_id = plan_id.into();
        let roster = GuestRoster::new();
        let ceremony = PlanState::new(PlanMode::Ceremony);
        let banquet = PlanState::new(PlanMode::Banquet);
        let ceremony_history =
            HistoryManager::with_initial(ceremony.to_snapshot(&roster), config.history_limit);
        let banquet_history =
            HistoryManager::with_initial(banquet.to_snapshot(&roster), config.history_limit);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        tracing::info!(plan_id = %plan_id, editor = %editor.id, "Plan session opened");

        Self {
            locks: LockManager::new(locks, editor.clone(), config.lock_ttl_ms),
            viewport: ViewportController::new(&config),
            plan_id,
            editor,
            mode: PlanMode::default(),
            ceremony,
            banquet,
            roster,
            ceremony_history,
            banquet_history,
            ids: IdAllocator::new(),
            frame: FrameBatch::new(),
            event_tx,
            autosave: None,
            config,
        }
    }

    /// Replace the lock clock (tests drive TTL expiry with it)
    pub fn with_lock_clock(mut self, clock: Clock) -> Self {
        self.locks = self.locks.with_clock(clock);
        self
    }

    /// Forward snapshots and assignment changes to an autosave worker
    pub fn attach_autosave(&mut self, handle: AutosaveHandle) {
        self.autosave = Some(handle);
    }

    /// Replace the roster with guests from the directory
    ///
    /// References to tables/seats unknown to either mode are cleared and the
    /// result becomes the new history baseline.
    pub fn set_guests(&mut self, guests: impl IntoIterator<Item = Guest>) {
        self.roster = GuestRoster::from_guests(guests);
        let dropped = self.drop_dangling_assignments();
        if !dropped.is_empty() {
            tracing::warn!(
                plan_id = %self.plan_id,
                guests = ?dropped,
                "Cleared assignments pointing at unknown tables or seats"
            );
        }
        self.reset_history();
    }

    // ========== Accessors ==========

    pub fn plan_id(&self) -> &str {
        &self.plan_id
    }

    pub fn editor(&self) -> &EditorIdentity {
        &self.editor
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn mode(&self) -> PlanMode {
        self.mode
    }

    /// Layout of the active tab
    pub fn state(&self) -> &PlanState {
        self.state_for(self.mode)
    }

    pub fn state_for(&self, mode: PlanMode) -> &PlanState {
        match mode {
            PlanMode::Ceremony => &self.ceremony,
            PlanMode::Banquet => &self.banquet,
        }
    }

    pub fn roster(&self) -> &GuestRoster {
        &self.roster
    }

    pub fn history(&self) -> &HistoryManager {
        match self.mode {
            PlanMode::Ceremony => &self.ceremony_history,
            PlanMode::Banquet => &self.banquet_history,
        }
    }

    pub fn locks(&self) -> &LockManager {
        &self.locks
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    /// Subscribe to committed plan events
    pub fn subscribe(&self) -> broadcast::Receiver<PlanEvent> {
        self.event_tx.subscribe()
    }

    /// Subscribe to lock notifications (acquired / denied / released)
    pub fn subscribe_locks(&self) -> broadcast::Receiver<LockEvent> {
        self.locks.subscribe()
    }

    pub fn can_undo(&self) -> bool {
        self.history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history().can_redo()
    }

    fn history_mut(&mut self) -> &mut HistoryManager {
        match self.mode {
            PlanMode::Ceremony => &mut self.ceremony_history,
            PlanMode::Banquet => &mut self.banquet_history,
        }
    }

    fn parts_mut(&mut self) -> (&mut PlanState, &mut GuestRoster) {
        let state = match self.mode {
            PlanMode::Ceremony => &mut self.ceremony,
            PlanMode::Banquet => &mut self.banquet,
        };
        (state, &mut self.roster)
    }

    // ========== Command processing ==========

    /// Execute a command and return the response
    pub fn execute_command(&mut self, cmd: PlanCommand) -> CommandResponse {
        match self.process_command(&cmd) {
            Ok((response, events)) => {
                self.broadcast(events);
                response
            }
            Err(err) => {
                tracing::debug!(command_id = %cmd.command_id, error = %err, "Command rejected");
                CommandResponse::error(cmd.command_id, err.into())
            }
        }
    }

    /// Run a payload as this session's editor; typed wrappers build on this
    fn run(&mut self, payload: PlanCommandPayload) -> PlanResult<Vec<PlanEvent>> {
        let cmd = PlanCommand::new(self.editor.clone(), payload);
        let (_, events) = self.process_command(&cmd)?;
        self.broadcast(events.clone());
        Ok(events)
    }

    fn broadcast(&self, events: Vec<PlanEvent>) {
        for event in events {
            if self.event_tx.send(event).is_err() {
                tracing::warn!("Event broadcast failed: no active receivers");
                break;
            }
        }
    }

    fn process_command(&mut self, cmd: &PlanCommand) -> PlanResult<(CommandResponse, Vec<PlanEvent>)> {
        tracing::debug!(
            command_id = %cmd.command_id,
            command = cmd.payload.name(),
            mode = %self.mode,
            "Processing command"
        );

        // 1. Lock gate
        let gated = if self.config.collaboration_enabled {
            gated_tables(&cmd.payload, self.state(), &self.roster)
        } else {
            Vec::new()
        };
        if let Err(err) = self.locks.check(&gated) {
            return Err(match err {
                PlanError::LockConflict {
                    resource_id,
                    owner_name,
                } => {
                    tracing::warn!(
                        command_id = %cmd.command_id,
                        table_id = resource_id,
                        owner = %owner_name,
                        "Command blocked by another editor's lock"
                    );
                    self.locks.deny(resource_id)
                }
                other => other,
            });
        }

        // 2. Validate and generate events (read-only)
        let metadata = CommandMetadata {
            command_id: cmd.command_id.clone(),
            editor_id: cmd.editor.id.clone(),
            editor_name: cmd.editor.name.clone(),
            timestamp: cmd.timestamp,
        };
        let action = CommandAction::from(cmd);
        let events = {
            let state = self.state();
            let mut ctx = CommandContext::new(
                state,
                &self.roster,
                &self.config,
                &self.ids,
                state.last_sequence,
            );
            action.execute(&mut ctx, &metadata)?
        };
        if events.is_empty() {
            tracing::debug!(command_id = %cmd.command_id, "Command produced no changes");
            return Ok((CommandResponse::success(cmd.command_id.clone(), None), events));
        }

        // 3. Apply
        let (state, roster) = self.parts_mut();
        apply_events(state, roster, &events);

        // 4. Locks on tables that still exist
        if !gated.is_empty() {
            let existing: Vec<i64> = gated
                .into_iter()
                .filter(|id| self.state().has_table(*id))
                .collect();
            if let Err(e) = self.locks.ensure_locks(&existing) {
                tracing::warn!(command_id = %cmd.command_id, error = %e, "Lock renewal failed after commit");
            }
        }

        // 5. History + side channels
        let touched: BTreeSet<i64> = events
            .iter()
            .flat_map(|e| e.payload.touched_guests())
            .collect();
        self.commit(&touched);

        tracing::info!(
            command_id = %cmd.command_id,
            command = cmd.payload.name(),
            event_count = events.len(),
            "Command processed successfully"
        );

        let response = CommandResponse::success(cmd.command_id.clone(), created_id(&events));
        Ok((response, events))
    }

    /// Record the active state: history push, viewport bounds, autosave
    fn commit(&mut self, touched_guests: &BTreeSet<i64>) {
        let snapshot = self.state().to_snapshot(&self.roster);
        self.history_mut().push(snapshot.clone());
        self.after_change(snapshot, touched_guests);
    }

    fn after_change(&mut self, snapshot: PlanSnapshot, touched_guests: &BTreeSet<i64>) {
        let bounds = self.state().content_bounds();
        self.viewport.update_content_bounds(bounds);

        let Some(autosave) = &self.autosave else {
            return;
        };
        autosave.notify_snapshot(&self.plan_id, snapshot);
        for guest_id in touched_guests {
            if let Some(guest) = self.roster.get(*guest_id) {
                autosave.notify_assignment(&self.plan_id, *guest_id, guest.assignment());
            }
        }
    }

    // ========== History ==========

    /// Step back one entry; `false` when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history_mut().undo() else {
            return false;
        };
        self.restore(&snapshot);
        tracing::debug!(mode = %self.mode, sequence = snapshot.last_sequence, "Undo");
        true
    }

    /// Step forward one entry; `false` at the tail
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history_mut().redo() else {
            return false;
        };
        self.restore(&snapshot);
        tracing::debug!(mode = %self.mode, sequence = snapshot.last_sequence, "Redo");
        true
    }

    /// Re-hydrate the active mode from a history entry
    fn restore(&mut self, snapshot: &PlanSnapshot) {
        let (state, other) = match self.mode {
            PlanMode::Ceremony => (&mut self.ceremony, &self.banquet),
            PlanMode::Banquet => (&mut self.banquet, &self.ceremony),
        };
        // 序列号只增不减
        let last_sequence = state.last_sequence;
        *state = PlanState::from_snapshot(snapshot);
        state.last_sequence = state.last_sequence.max(last_sequence);
        let changed: BTreeSet<i64> = self
            .roster
            .restore_assignments(&snapshot.assignments, other)
            .into_iter()
            .collect();

        self.frame = FrameBatch::new();
        let current = self.state().to_snapshot(&self.roster);
        self.after_change(current, &changed);
    }

    fn reset_history(&mut self) {
        let ceremony = self.ceremony.to_snapshot(&self.roster);
        let banquet = self.banquet.to_snapshot(&self.roster);
        self.ceremony_history.reset(ceremony);
        self.banquet_history.reset(banquet);
    }

    // ========== Mode / selection ==========

    /// Change the active tab; pending frame edits are committed first and
    /// every lock this editor holds is released
    ///
    /// Returns the flush of the pending frame so rejected edits can be
    /// surfaced; it is empty when `mode` is already active.
    pub fn switch_mode(&mut self, mode: PlanMode) -> FrameFlush {
        if mode == self.mode {
            return FrameFlush::default();
        }
        let flush = self.flush_frame();
        for response in flush.responses.iter().filter(|r| !r.success) {
            tracing::warn!(
                plan_id = %self.plan_id,
                command_id = %response.command_id,
                error = ?response.error,
                "Pending edit rejected while switching mode"
            );
        }
        let released = self.locks.release_all();
        tracing::info!(
            plan_id = %self.plan_id,
            from = %self.mode,
            to = %mode,
            released_locks = released.len(),
            "Switched plan mode"
        );
        self.mode = mode;
        let bounds = self.state().content_bounds();
        self.viewport.update_content_bounds(bounds);
        flush
    }

    /// Selection / edit intent on a table
    pub fn ensure_lock(&self, table_id: i64) -> bool {
        self.locks.ensure_lock(table_id)
    }

    /// Selection change or deselect
    pub fn release_locks_except(&self, keep: &[i64]) -> Vec<i64> {
        self.locks.release_locks_except(keep)
    }

    // ========== Viewport ==========

    pub fn fit_to_content(&mut self) -> ViewportState {
        let bounds = self.state().content_bounds();
        self.viewport.fit_to_content(bounds)
    }

    // ========== Serialization ==========

    /// Snapshot of the active tab
    pub fn serialize(&self) -> PlanSnapshot {
        self.state().to_snapshot(&self.roster)
    }

    pub fn serialize_mode(&self, mode: PlanMode) -> PlanSnapshot {
        self.state_for(mode).to_snapshot(&self.roster)
    }

    /// Both tabs, as handed to a store
    pub fn document(&self) -> PlanDocument {
        let mut document = PlanDocument::new(self.plan_id.clone());
        document.ceremony = Some(self.serialize_mode(PlanMode::Ceremony));
        document.banquet = Some(self.serialize_mode(PlanMode::Banquet));
        document
    }

    /// Replace the snapshot's mode wholesale
    ///
    /// Validation failures (version, checksum, dangling references, seats
    /// held twice, tables over capacity) change nothing. History of that
    /// mode restarts from the snapshot.
    pub fn deserialize(&mut self, snapshot: PlanSnapshot) -> PlanResult<()> {
        snapshot.validate()?;
        if let Some((table_id, occupied, capacity)) = self.roster.overfull_table(&snapshot) {
            return Err(SnapshotError::Inconsistent(format!(
                "table {table_id} holds {occupied} of {capacity}"
            ))
            .into());
        }
        let mode = snapshot.mode;
        self.install_layout(&snapshot);

        let other = match mode {
            PlanMode::Ceremony => &self.banquet,
            PlanMode::Banquet => &self.ceremony,
        };
        let changed: BTreeSet<i64> = self
            .roster
            .restore_assignments(&snapshot.assignments, other)
            .into_iter()
            .collect();

        let current = self.state_for(mode).to_snapshot(&self.roster);
        match mode {
            PlanMode::Ceremony => self.ceremony_history.reset(current.clone()),
            PlanMode::Banquet => self.banquet_history.reset(current.clone()),
        }
        if mode == self.mode {
            self.frame = FrameBatch::new();
            self.after_change(current, &changed);
        } else if let Some(autosave) = &self.autosave {
            autosave.notify_snapshot(&self.plan_id, current);
        }

        tracing::info!(
            plan_id = %self.plan_id,
            mode = %mode,
            tables = self.state_for(mode).tables.len(),
            seats = self.state_for(mode).seats.len(),
            "Plan snapshot loaded"
        );
        Ok(())
    }

    /// Swap in a validated layout and keep the id allocator ahead of it
    fn install_layout(&mut self, snapshot: &PlanSnapshot) {
        let state = PlanState::from_snapshot(snapshot);
        if let Some(max_id) = state.max_id() {
            self.ids.observe(max_id);
        }
        match snapshot.mode {
            PlanMode::Ceremony => self.ceremony = state,
            PlanMode::Banquet => self.banquet = state,
        }
    }

    /// Clear guest references to tables/seats neither mode knows
    fn drop_dangling_assignments(&mut self) -> Vec<i64> {
        let tables: BTreeSet<i64> = self
            .ceremony
            .tables
            .iter()
            .chain(&self.banquet.tables)
            .map(|t| t.id)
            .collect();
        let seats: BTreeSet<i64> = self
            .ceremony
            .seats
            .iter()
            .chain(&self.banquet.seats)
            .map(|s| s.id)
            .collect();

        let ids: Vec<i64> = self.roster.iter().map(|g| g.id).collect();
        let mut dropped = Vec::new();
        for id in ids {
            let Some(guest) = self.roster.get_mut(id) else {
                continue;
            };
            let mut changed = false;
            if guest.table_id.is_some_and(|t| !tables.contains(&t)) {
                guest.table_id = None;
                changed = true;
            }
            if guest.seat_id.is_some_and(|s| !seats.contains(&s)) {
                guest.seat_id = None;
                changed = true;
            }
            if changed {
                dropped.push(id);
            }
        }
        dropped
    }
}

/// Id of the area/table a command created, if any
fn created_id(events: &[PlanEvent]) -> Option<i64> {
    events.iter().find_map(|event| match &event.payload {
        PlanEventPayload::TableAdded { table } => Some(table.id),
        PlanEventPayload::AreaAdded { area } => Some(area.id),
        _ => None,
    })
}
