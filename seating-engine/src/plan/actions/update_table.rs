//! UpdateTable command handler
//!
//! Rename, capacity change, lock-in-place toggle and enable/disable.
//! Capacity may not drop below the people already seated.

use super::require_table;
use crate::plan::error::{PlanError, PlanResult};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::TableUpdate;
use shared::plan::{PlanEvent, PlanEventPayload};

/// UpdateTable action
#[derive(Debug, Clone)]
pub struct UpdateTableAction {
    pub table_id: i64,
    pub patch: TableUpdate,
}

impl CommandHandler for UpdateTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        let mut table = require_table(ctx, self.table_id)?.clone();

        if let Some(name) = &self.patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(PlanError::InvalidOperation(
                    "table name must not be empty".to_string(),
                ));
            }
            table.name = name.to_string();
        }
        if let Some(capacity) = self.patch.capacity {
            if capacity == 0 {
                return Err(PlanError::InvalidCapacity(
                    "capacity must be at least one".to_string(),
                ));
            }
            let occupied = ctx.roster.occupied_at_table(self.table_id);
            if capacity < occupied {
                return Err(PlanError::InvalidCapacity(format!(
                    "{occupied} people already seated, capacity {capacity} is too small"
                )));
            }
            table.capacity = capacity;
        }
        if let Some(locked) = self.patch.locked {
            table.locked = locked;
        }
        if let Some(enabled) = self.patch.enabled {
            table.enabled = enabled;
        }

        Ok(vec![ctx.event(metadata, PlanEventPayload::TableUpdated { table })])
    }
}
