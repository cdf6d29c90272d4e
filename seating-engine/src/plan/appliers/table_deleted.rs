//! TableDeleted event applier
//!
//! Removes the table and clears the released guests' table assignment.

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// TableDeleted applier
pub struct TableDeletedApplier;

impl EventApplier for TableDeletedApplier {
    fn apply(&self, state: &mut PlanState, roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::TableDeleted {
            table_id,
            released_guests,
        } = &event.payload {
            state.tables.retain(|t| t.id != *table_id);
            super::release_table_guests(roster, released_guests);
            state.last_sequence = event.sequence;
        }
    }
}
