//! ResizeTable command handler

use super::require_movable_table;
use crate::plan::error::{PlanError, PlanResult};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::TableSize;
use shared::plan::{PlanEvent, PlanEventPayload};

/// ResizeTable action
///
/// The size variant may differ from the current shape (rectangle ⇄ circle).
#[derive(Debug, Clone)]
pub struct ResizeTableAction {
    pub table_id: i64,
    pub size: TableSize,
}

impl CommandHandler for ResizeTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        require_movable_table(ctx, self.table_id)?;
        if !self.size.is_valid() {
            return Err(PlanError::InvalidGeometry(
                "table dimensions must be positive".to_string(),
            ));
        }
        Ok(vec![ctx.event(
            metadata,
            PlanEventPayload::TableResized {
                table_id: self.table_id,
                size: self.size,
            },
        )])
    }
}
