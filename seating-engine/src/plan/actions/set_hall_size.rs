//! SetHallSize command handler

use crate::plan::error::{PlanError, PlanResult};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::HallSize;
use shared::plan::{PlanEvent, PlanEventPayload};

/// SetHallSize action
#[derive(Debug, Clone)]
pub struct SetHallSizeAction {
    pub hall: HallSize,
}

impl CommandHandler for SetHallSizeAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        if !self.hall.is_valid() {
            return Err(PlanError::InvalidGeometry(format!(
                "hall size {}x{} is not valid",
                self.hall.width, self.hall.height
            )));
        }
        if self.hall == ctx.state.hall {
            return Ok(Vec::new());
        }
        Ok(vec![ctx.event(
            metadata,
            PlanEventPayload::HallResized { hall: self.hall },
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::state::GuestRoster;
    use crate::plan::testing::*;

    #[test]
    fn test_resize_hall() {
        let fx = Fixture::new(create_banquet_state(), GuestRoster::new());
        let hall = HallSize::new(2400.0, 1600.0);
        let events = SetHallSizeAction { hall }
            .execute(&mut fx.ctx(), &create_test_metadata())
            .unwrap();
        assert_eq!(events[0].payload, PlanEventPayload::HallResized { hall });
    }

    #[test]
    fn test_invalid_and_unchanged() {
        let fx = Fixture::new(create_banquet_state(), GuestRoster::new());
        assert!(matches!(
            SetHallSizeAction {
                hall: HallSize::new(0.0, 100.0)
            }
            .execute(&mut fx.ctx(), &create_test_metadata()),
            Err(PlanError::InvalidGeometry(_))
        ));
        let same = SetHallSizeAction {
            hall: fx.state.hall,
        };
        assert!(same.execute(&mut fx.ctx(), &create_test_metadata()).unwrap().is_empty());
    }
}
