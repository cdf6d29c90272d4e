//! ToggleSeatEnabled command handler
//!
//! Disabling an occupied seat releases its holder in the same event.

use super::require_mode;
use crate::plan::error::{PlanError, PlanResult};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::PlanMode;
use shared::plan::{PlanEvent, PlanEventPayload};

/// ToggleSeatEnabled action
#[derive(Debug, Clone)]
pub struct ToggleSeatEnabledAction {
    pub seat_id: i64,
}

impl CommandHandler for ToggleSeatEnabledAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        require_mode(ctx, PlanMode::Ceremony)?;
        let seat = ctx
            .state
            .seat(self.seat_id)
            .ok_or(PlanError::SeatNotFound(self.seat_id))?;

        let enabled = !seat.enabled;
        let released_guest = if enabled {
            None
        } else {
            ctx.roster.seat_holder(seat.id).map(|g| g.id)
        };

        Ok(vec![ctx.event(
            metadata,
            PlanEventPayload::SeatToggled {
                seat_id: self.seat_id,
                enabled,
                released_guest,
            },
        )])
    }
}
