//! TableUpdated event applier
//!
//! Replaces the stored table with the patched copy.

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// TableUpdated applier
pub struct TableUpdatedApplier;

impl EventApplier for TableUpdatedApplier {
    fn apply(&self, state: &mut PlanState, _roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::TableUpdated { table } = &event.payload {
            if let Some(existing) = state.table_mut(table.id) {
                *existing = table.clone();
            }
            state.last_sequence = event.sequence;
        }
    }
}
