//! GuestTableAssigned event applier
//!
//! Moves a guest to a table (or off any table) in a single step.

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// GuestTableAssigned applier
pub struct GuestTableAssignedApplier;

impl EventApplier for GuestTableAssignedApplier {
    fn apply(&self, state: &mut PlanState, roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::GuestTableAssigned { guest_id, table_id, .. } = &event.payload {
            if let Some(guest) = roster.get_mut(*guest_id) {
                guest.table_id = *table_id;
            }
            state.last_sequence = event.sequence;
        }
    }
}
