//! Event applier implementations
//!
//! Each applier implements the `EventApplier` trait and handles
//! one specific event type. Appliers are PURE functions.

use enum_dispatch::enum_dispatch;

use super::state::{GuestRoster, PlanState};
use super::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

mod area_added;
mod area_deleted;
mod area_updated;
mod guest_seat_assigned;
mod guest_table_assigned;
mod hall_resized;
mod seat_toggled;
mod seats_replaced;
mod table_added;
mod table_deleted;
mod table_moved;
mod table_resized;
mod table_rotated;
mod table_updated;
mod tables_replaced;
mod tables_repositioned;

pub use area_added::AreaAddedApplier;
pub use area_deleted::AreaDeletedApplier;
pub use area_updated::AreaUpdatedApplier;
pub use guest_seat_assigned::GuestSeatAssignedApplier;
pub use guest_table_assigned::GuestTableAssignedApplier;
pub use hall_resized::HallResizedApplier;
pub use seat_toggled::SeatToggledApplier;
pub use seats_replaced::SeatsReplacedApplier;
pub use table_added::TableAddedApplier;
pub use table_deleted::TableDeletedApplier;
pub use table_moved::TableMovedApplier;
pub use table_resized::TableResizedApplier;
pub use table_rotated::TableRotatedApplier;
pub use table_updated::TableUpdatedApplier;
pub use tables_replaced::TablesReplacedApplier;
pub use tables_repositioned::TablesRepositionedApplier;

/// EventAction enum - dispatches to concrete applier implementations
///
/// Uses enum_dispatch for zero-cost static dispatch.
#[enum_dispatch(EventApplier)]
pub enum EventAction {
    AreaAdded(AreaAddedApplier),
    AreaUpdated(AreaUpdatedApplier),
    AreaDeleted(AreaDeletedApplier),
    TableAdded(TableAddedApplier),
    TableMoved(TableMovedApplier),
    TableResized(TableResizedApplier),
    TableRotated(TableRotatedApplier),
    TableUpdated(TableUpdatedApplier),
    TableDeleted(TableDeletedApplier),
    TablesReplaced(TablesReplacedApplier),
    TablesRepositioned(TablesRepositionedApplier),
    SeatToggled(SeatToggledApplier),
    SeatsReplaced(SeatsReplacedApplier),
    GuestTableAssigned(GuestTableAssignedApplier),
    GuestSeatAssigned(GuestSeatAssignedApplier),
    HallResized(HallResizedApplier),
}

/// Convert PlanEvent reference to EventAction
///
/// This is the ONLY place with a match on PlanEventPayload.
impl From<&PlanEvent> for EventAction {
    fn from(event: &PlanEvent) -> Self {
        match &event.payload {
            PlanEventPayload::AreaAdded { .. } => EventAction::AreaAdded(AreaAddedApplier),
            PlanEventPayload::AreaUpdated { .. } => EventAction::AreaUpdated(AreaUpdatedApplier),
            PlanEventPayload::AreaDeleted { .. } => EventAction::AreaDeleted(AreaDeletedApplier),
            PlanEventPayload::TableAdded { .. } => EventAction::TableAdded(TableAddedApplier),
            PlanEventPayload::TableMoved { .. } => EventAction::TableMoved(TableMovedApplier),
            PlanEventPayload::TableResized { .. } => EventAction::TableResized(TableResizedApplier),
            PlanEventPayload::TableRotated { .. } => EventAction::TableRotated(TableRotatedApplier),
            PlanEventPayload::TableUpdated { .. } => EventAction::TableUpdated(TableUpdatedApplier),
            PlanEventPayload::TableDeleted { .. } => EventAction::TableDeleted(TableDeletedApplier),
            PlanEventPayload::TablesReplaced { .. } => {
                EventAction::TablesReplaced(TablesReplacedApplier)
            }
            PlanEventPayload::TablesRepositioned { .. } => {
                EventAction::TablesRepositioned(TablesRepositionedApplier)
            }
            PlanEventPayload::SeatToggled { .. } => EventAction::SeatToggled(SeatToggledApplier),
            PlanEventPayload::SeatsReplaced { .. } => {
                EventAction::SeatsReplaced(SeatsReplacedApplier)
            }
            PlanEventPayload::GuestTableAssigned { .. } => {
                EventAction::GuestTableAssigned(GuestTableAssignedApplier)
            }
            PlanEventPayload::GuestSeatAssigned { .. } => {
                EventAction::GuestSeatAssigned(GuestSeatAssignedApplier)
            }
            PlanEventPayload::HallResized { .. } => EventAction::HallResized(HallResizedApplier),
        }
    }
}

/// Apply a batch of events in order
pub fn apply_events(state: &mut PlanState, roster: &mut GuestRoster, events: &[PlanEvent]) {
    for event in events {
        EventAction::from(event).apply(state, roster, event);
    }
}

/// Clear the table assignment of every listed guest
fn release_table_guests(roster: &mut GuestRoster, guest_ids: &[i64]) {
    for guest_id in guest_ids {
        if let Some(guest) = roster.get_mut(*guest_id) {
            guest.table_id = None;
        }
    }
}

/// Clear the seat assignment of every listed guest
fn release_seat_guests(roster: &mut GuestRoster, guest_ids: &[i64]) {
    for guest_id in guest_ids {
        if let Some(guest) = roster.get_mut(*guest_id) {
            guest.seat_id = None;
        }
    }
}
