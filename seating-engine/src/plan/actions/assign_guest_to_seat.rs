//! AssignGuestToSeat command handler (ceremony only)

use super::require_mode;
use crate::plan::capacity::check_seat_available;
use crate::plan::error::{PlanError, PlanResult};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::PlanMode;
use shared::plan::{PlanEvent, PlanEventPayload};

/// AssignGuestToSeat action
#[derive(Debug, Clone)]
pub struct AssignGuestToSeatAction {
    pub guest_id: i64,
    pub seat_id: Option<i64>,
}

impl CommandHandler for AssignGuestToSeatAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        require_mode(ctx, PlanMode::Ceremony)?;
        let guest = ctx
            .roster
            .get(self.guest_id)
            .ok_or(PlanError::GuestNotFound(self.guest_id))?;
        let previous_seat_id = guest.seat_id;

        match self.seat_id {
            Some(seat_id) => {
                let seat = ctx
                    .state
                    .seat(seat_id)
                    .ok_or(PlanError::SeatNotFound(seat_id))?;
                check_seat_available(ctx.roster, seat, guest)?;
                if previous_seat_id == Some(seat_id) {
                    return Ok(Vec::new());
                }
            }
            None if previous_seat_id.is_none() => return Ok(Vec::new()),
            None => {}
        }

        Ok(vec![ctx.event(
            metadata,
            PlanEventPayload::GuestSeatAssigned {
                guest_id: self.guest_id,
                previous_seat_id,
                seat_id: self.seat_id,
            },
        )])
    }
}
