//! AreaAdded event applier
//!
//! Appends the new area to the layout.

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// AreaAdded applier
pub struct AreaAddedApplier;

impl EventApplier for AreaAddedApplier {
    fn apply(&self, state: &mut PlanState, _roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::AreaAdded { area } = &event.payload {
            state.areas.push(area.clone());
            state.last_sequence = event.sequence;
        }
    }
}
