//! TableResized event applier
//!
//! Replaces the table dimensions (and possibly its shape).

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// TableResized applier
pub struct TableResizedApplier;

impl EventApplier for TableResizedApplier {
    fn apply(&self, state: &mut PlanState, _roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::TableResized { table_id, size } = &event.payload {
            if let Some(table) = state.table_mut(*table_id) {
                table.size = *size;
            }
            state.last_sequence = event.sequence;
        }
    }
}
