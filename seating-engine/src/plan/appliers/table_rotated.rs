//! TableRotated event applier
//!
//! Stores the absolute rotation carried by the event.

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// TableRotated applier
pub struct TableRotatedApplier;

impl EventApplier for TableRotatedApplier {
    fn apply(&self, state: &mut PlanState, _roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::TableRotated { table_id, rotation } = &event.payload {
            if let Some(table) = state.table_mut(*table_id) {
                table.rotation = *rotation;
            }
            state.last_sequence = event.sequence;
        }
    }
}
