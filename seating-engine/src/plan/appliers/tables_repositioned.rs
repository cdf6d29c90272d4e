//! TablesRepositioned event applier
//!
//! Moves every listed table in one step (auto layout).

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// TablesRepositioned applier
pub struct TablesRepositionedApplier;

impl EventApplier for TablesRepositionedApplier {
    fn apply(&self, state: &mut PlanState, _roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::TablesRepositioned { positions } = &event.payload {
            for entry in positions {
                if let Some(table) = state.table_mut(entry.table_id) {
                    table.position = entry.position;
                }
            }
            state.last_sequence = event.sequence;
        }
    }
}
