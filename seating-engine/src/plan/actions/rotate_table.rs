//! RotateTable command handler

use super::{require_finite, require_movable_table};
use crate::plan::error::PlanResult;
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::table::normalize_degrees;
use shared::plan::{PlanEvent, PlanEventPayload};

/// RotateTable action
#[derive(Debug, Clone)]
pub struct RotateTableAction {
    pub table_id: i64,
    pub delta_degrees: f64,
}

impl CommandHandler for RotateTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        let table = require_movable_table(ctx, self.table_id)?;
        require_finite(self.delta_degrees, "rotation delta")?;

        let rotation = normalize_degrees(table.rotation + self.delta_degrees);
        Ok(vec![ctx.event(
            metadata,
            PlanEventPayload::TableRotated {
                table_id: self.table_id,
                rotation,
            },
        )])
    }
}
