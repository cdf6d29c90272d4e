//! DuplicateTable command handler
//!
//! The clone is offset right and down by the configured duplicate offset,
//! starts unlocked and carries no guests.

use super::require_table;
use crate::plan::error::PlanResult;
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::Table;
use shared::plan::{PlanEvent, PlanEventPayload};

/// DuplicateTable action
#[derive(Debug, Clone)]
pub struct DuplicateTableAction {
    pub table_id: i64,
}

impl CommandHandler for DuplicateTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        let source = require_table(ctx, self.table_id)?;
        let offset = ctx.config.duplicate_offset;

        let table = Table {
            id: ctx.allocate_id(),
            name: format!("{} (copy)", source.name),
            position: source.position.offset(offset, offset),
            locked: false,
            ..source.clone()
        };
        Ok(vec![ctx.event(metadata, PlanEventPayload::TableAdded { table })])
    }
}
