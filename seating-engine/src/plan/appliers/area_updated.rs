//! AreaUpdated event applier
//!
//! Replaces the stored area with the patched copy.

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// AreaUpdated applier
pub struct AreaUpdatedApplier;

impl EventApplier for AreaUpdatedApplier {
    fn apply(&self, state: &mut PlanState, _roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::AreaUpdated { area } = &event.payload {
            if let Some(existing) = state.area_mut(area.id) {
                *existing = area.clone();
            }
            state.last_sequence = event.sequence;
        }
    }
}
