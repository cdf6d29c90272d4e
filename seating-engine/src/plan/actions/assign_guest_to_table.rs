//! AssignGuestToTable command handler
//!
//! `table_id: None` clears the assignment. Re-assigning a guest to the
//! table they already sit at produces no events.

use super::require_table;
use crate::plan::capacity::check_table_capacity;
use crate::plan::error::{PlanError, PlanResult};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::plan::{PlanEvent, PlanEventPayload};

/// AssignGuestToTable action
#[derive(Debug, Clone)]
pub struct AssignGuestToTableAction {
    pub guest_id: i64,
    pub table_id: Option<i64>,
}

impl CommandHandler for AssignGuestToTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        let guest = ctx
            .roster
            .get(self.guest_id)
            .ok_or(PlanError::GuestNotFound(self.guest_id))?;
        let previous_table_id = guest.table_id;

        if let Some(table_id) = self.table_id {
            let table = require_table(ctx, table_id)?;
            if !table.enabled {
                return Err(PlanError::TableDisabled(table_id));
            }
            if previous_table_id == Some(table_id) {
                return Ok(Vec::new());
            }
            check_table_capacity(ctx.roster, table, guest)?;
        } else if previous_table_id.is_none() {
            return Ok(Vec::new());
        }

        Ok(vec![ctx.event(
            metadata,
            PlanEventPayload::GuestTableAssigned {
                guest_id: self.guest_id,
                previous_table_id,
                table_id: self.table_id,
            },
        )])
    }
}
