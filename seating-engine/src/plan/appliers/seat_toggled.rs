//! SeatToggled event applier
//!
//! Flips a seat's enabled flag; a released holder loses the seat.

use crate::plan::state::{GuestRoster, PlanState};
use crate::plan::traits::EventApplier;
use shared::plan::{PlanEvent, PlanEventPayload};

/// SeatToggled applier
pub struct SeatToggledApplier;

impl EventApplier for SeatToggledApplier {
    fn apply(&self, state: &mut PlanState, roster: &mut GuestRoster, event: &PlanEvent) {
        if let PlanEventPayload::SeatToggled {
            seat_id,
            enabled,
            released_guest,
        } = &event.payload {
            if let Some(seat) = state.seat_mut(*seat_id) {
                seat.enabled = *enabled;
            }
            if let Some(guest_id) = released_guest {
                super::release_seat_guests(roster, &[*guest_id]);
            }
            state.last_sequence = event.sequence;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::testing::*;

    #[test]
    fn test_disable_clears_holder() {
        let mut state = create_ceremony_state();
        let mut g = create_test_guest(3, 0);
        g.seat_id = Some(13);
        let mut roster = GuestRoster::from_guests([g]);

        let event = PlanEvent::new(
            2,
            state.mode,
            "e".to_string(),
            "c".to_string(),
            0,
            PlanEventPayload::SeatToggled {
                seat_id: 13,
                enabled: false,
                released_guest: Some(3),
            },
        );
        SeatToggledApplier.apply(&mut state, &mut roster, &event);
        assert!(!state.seat(13).unwrap().enabled);
        assert!(roster.seat_holder(13).is_none());
    }
}
