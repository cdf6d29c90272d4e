//! TableAdded event applier
//!
//! Appends a new (or duplicated) table.

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// TableAdded applier
pub struct TableAddedApplier;

impl EventApplier for TableAddedApplier {
    fn apply(&self, state: &mut PlanState, _roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::TableAdded { table } = &event.payload {
            state.tables.push(table.clone());
            state.last_sequence = event.sequence;
        }
    }
}
