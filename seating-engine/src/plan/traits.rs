//! Command / event traits
//!
//! - [`CommandHandler`]: validates a command against read-only state and
//!   produces events. Never mutates.
//! - [`EventApplier`]: applies one event to plan state and the guest roster.
//!   Pure and infallible; all validation happened in the handler.

use super::error::PlanResult;
use super::state::{GuestRoster, PlanState};
use crate::core::PlannerConfig;
use enum_dispatch::enum_dispatch;
use shared::models::PlanMode;
use shared::plan::{PlanEvent, PlanEventPayload};
use shared::util::IdAllocator;

/// Who / when / which command, copied onto every produced event
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: String,
    pub editor_id: String,
    pub editor_name: String,
    pub timestamp: i64,
}

/// Read-only view handed to command handlers
pub struct CommandContext<'a> {
    pub state: &'a PlanState,
    pub roster: &'a GuestRoster,
    pub config: &'a PlannerConfig,
    ids: &'a IdAllocator,
    sequence: u64,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        state: &'a PlanState,
        roster: &'a GuestRoster,
        config: &'a PlannerConfig,
        ids: &'a IdAllocator,
        current_sequence: u64,
    ) -> Self {
        Self {
            state,
            roster,
            config,
            ids,
            sequence: current_sequence,
        }
    }

    pub fn mode(&self) -> PlanMode {
        self.state.mode
    }

    /// Allocate the next event sequence number
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// Allocate a new area / table / seat id
    pub fn allocate_id(&self) -> i64 {
        self.ids.allocate()
    }

    /// Build an event stamped with the next sequence and the command metadata
    pub fn event(&mut self, metadata: &CommandMetadata, payload: PlanEventPayload) -> PlanEvent {
        let sequence = self.next_sequence();
        PlanEvent::new(
            sequence,
            self.state.mode,
            metadata.editor_id.clone(),
            metadata.command_id.clone(),
            metadata.timestamp,
            payload,
        )
    }
}

/// Command handler - validation + event generation
pub trait CommandHandler {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>>;
}

/// Event applier - pure state transition
#[enum_dispatch]
pub trait EventApplier {
    fn apply(&self, state: &mut PlanState, roster: &mut GuestRoster, event: &PlanEvent);
}
