//! TablesReplaced event applier
//!
//! Swaps the whole table set (generated banquet layout).

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// TablesReplaced applier
pub struct TablesReplacedApplier;

impl EventApplier for TablesReplacedApplier {
    fn apply(&self, state: &mut PlanState, roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::TablesReplaced {
            tables,
            released_guests,
        } = &event.payload {
            super::release_table_guests(roster, released_guests);
            state.tables = tables.clone();
            state.last_sequence = event.sequence;
        }
    }
}
