//! TableMoved event applier
//!
//! Sets the table centre to the resolved position.

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// TableMoved applier
pub struct TableMovedApplier;

impl EventApplier for TableMovedApplier {
    fn apply(&self, state: &mut PlanState, _roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::TableMoved { table_id, position } = &event.payload {
            if let Some(table) = state.table_mut(*table_id) {
                table.position = *position;
            }
            state.last_sequence = event.sequence;
        }
    }
}
