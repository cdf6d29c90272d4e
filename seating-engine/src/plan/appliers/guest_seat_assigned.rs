//! GuestSeatAssigned event applier
//!
//! Moves a guest to a ceremony seat (or off any seat).

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// GuestSeatAssigned applier
pub struct GuestSeatAssignedApplier;

impl EventApplier for GuestSeatAssignedApplier {
    fn apply(&self, state: &mut PlanState, roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::GuestSeatAssigned { guest_id, seat_id, .. } = &event.payload {
            if let Some(guest) = roster.get_mut(*guest_id) {
                guest.seat_id = *seat_id;
            }
            state.last_sequence = event.sequence;
        }
    }
}
