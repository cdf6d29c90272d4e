//! SeatsReplaced event applier
//!
//! Swaps the whole seat set (generated ceremony grid).

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// SeatsReplaced applier
pub struct SeatsReplacedApplier;

impl EventApplier for SeatsReplacedApplier {
    fn apply(&self, state: &mut PlanState, roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::SeatsReplaced {
            seats,
            released_guests,
        } = &event.payload {
            super::release_seat_guests(roster, released_guests);
            state.seats = seats.clone();
            state.last_sequence = event.sequence;
        }
    }
}
