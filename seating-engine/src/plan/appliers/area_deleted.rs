//! AreaDeleted event applier
//!
//! Removes the area from the layout.

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// AreaDeleted applier
pub struct AreaDeletedApplier;

impl EventApplier for AreaDeletedApplier {
    fn apply(&self, state: &mut PlanState, _roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::AreaDeleted { area_id } = &event.payload {
            state.areas.retain(|a| a.id != *area_id);
            state.last_sequence = event.sequence;
        }
    }
}
