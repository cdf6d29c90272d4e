//! DeleteArea command handler

use crate::plan::error::{PlanError, PlanResult};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::plan::{PlanEvent, PlanEventPayload};

/// DeleteArea action
#[derive(Debug, Clone)]
pub struct DeleteAreaAction {
    pub area_id: i64,
}

impl CommandHandler for DeleteAreaAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        if ctx.state.area(self.area_id).is_none() {
            return Err(PlanError::AreaNotFound(self.area_id));
        }
        Ok(vec![ctx.event(
            metadata,
            PlanEventPayload::AreaDeleted {
                area_id: self.area_id,
            },
        )])
    }
}
