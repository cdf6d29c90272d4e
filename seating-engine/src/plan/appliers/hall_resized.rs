//! HallResized event applier
//!
//! Stores the new hall dimensions.

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// HallResized applier
pub struct HallResizedApplier;

impl EventApplier for HallResizedApplier {
    fn apply(&self, state: &mut PlanState, _roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::HallResized { hall } = &event.payload {
            state.hall = *hall;
            state.last_sequence = event.sequence;
        }
    }
}
