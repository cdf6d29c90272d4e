//! GenerateSeatGrid command handler
//!
//! Replaces every ceremony seat with a fresh grid. Guests holding a
//! replaced seat lose the seat assignment.

use super::{require_finite, require_mode};
use crate::plan::error::{PlanError, PlanResult};
use crate::plan::layout::{seat_grid, MAX_GENERATED_ITEMS};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::PlanMode;
use shared::plan::{PlanEvent, PlanEventPayload, SeatGridSpec};

/// GenerateSeatGrid action
#[derive(Debug, Clone)]
pub struct GenerateSeatGridAction {
    pub spec: SeatGridSpec,
}

impl CommandHandler for GenerateSeatGridAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        require_mode(ctx, PlanMode::Ceremony)?;
        validate_spec(&self.spec)?;

        let seat_ids = ctx.state.seat_ids();
        let released_guests: Vec<i64> = ctx
            .roster
            .iter()
            .filter(|g| g.seat_id.is_some_and(|id| seat_ids.contains(&id)))
            .map(|g| g.id)
            .collect();

        let seats = seat_grid(&self.spec, || ctx.allocate_id());
        Ok(vec![ctx.event(
            metadata,
            PlanEventPayload::SeatsReplaced {
                seats,
                released_guests,
            },
        )])
    }
}

fn validate_spec(spec: &SeatGridSpec) -> PlanResult<()> {
    let count = spec.rows.saturating_mul(spec.cols);
    if count == 0 {
        return Err(PlanError::InvalidOperation(
            "seat grid needs at least one row and one column".to_string(),
        ));
    }
    if count > MAX_GENERATED_ITEMS {
        return Err(PlanError::InvalidOperation(format!(
            "seat grid of {count} seats exceeds {MAX_GENERATED_ITEMS}"
        )));
    }
    require_finite(spec.start_x, "grid start")?;
    require_finite(spec.start_y, "grid start")?;
    require_finite(spec.gap, "seat gap")?;
    if spec.gap <= 0.0 {
        return Err(PlanError::InvalidGeometry("seat gap must be positive".to_string()));
    }
    Ok(())
}
