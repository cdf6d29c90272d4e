//! DeleteTable command handler
//!
//! Cascades: every guest assigned to the table has the assignment cleared
//! (guests themselves are never deleted).

use super::require_movable_table;
use crate::plan::error::PlanResult;
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::plan::{PlanEvent, PlanEventPayload};

/// DeleteTable action
#[derive(Debug, Clone)]
pub struct DeleteTableAction {
    pub table_id: i64,
}

impl CommandHandler for DeleteTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        require_movable_table(ctx, self.table_id)?;

        let released_guests: Vec<i64> = ctx
            .roster
            .guests_at_table(self.table_id)
            .map(|g| g.id)
            .collect();

        Ok(vec![ctx.event(
            metadata,
            PlanEventPayload::TableDeleted {
                table_id: self.table_id,
                released_guests,
            },
        )])
    }
}
