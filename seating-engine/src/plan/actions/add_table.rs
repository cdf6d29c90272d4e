//! AddTable command handler
//!
//! Missing fields fall back to defaults: rectangle 80 x 60, capacity 8,
//! positioned at the hall centre.

use super::require_finite;
use crate::plan::error::{PlanError, PlanResult};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::table::{DEFAULT_TABLE_CAPACITY, normalize_degrees};
use shared::models::{Table, TableCreate};
use shared::plan::{PlanEvent, PlanEventPayload};

/// AddTable action
#[derive(Debug, Clone)]
pub struct AddTableAction {
    pub spec: TableCreate,
}

impl CommandHandler for AddTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        let size = self.spec.size.unwrap_or_default();
        if !size.is_valid() {
            return Err(PlanError::InvalidGeometry(
                "table dimensions must be positive".to_string(),
            ));
        }
        let capacity = self.spec.capacity.unwrap_or(DEFAULT_TABLE_CAPACITY);
        if capacity == 0 {
            return Err(PlanError::InvalidCapacity(
                "capacity must be at least one".to_string(),
            ));
        }
        let position = self.spec.position.unwrap_or_else(|| ctx.state.hall.center());
        if !position.is_finite() {
            return Err(PlanError::InvalidGeometry(
                "table position must be finite".to_string(),
            ));
        }
        let rotation = self.spec.rotation.unwrap_or(0.0);
        require_finite(rotation, "rotation")?;

        let name = match self.spec.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Table {}", ctx.state.tables.len() + 1),
        };

        let table = Table {
            id: ctx.allocate_id(),
            name,
            position,
            size,
            rotation: normalize_degrees(rotation),
            capacity,
            locked: false,
            enabled: true,
        };
        Ok(vec![ctx.event(metadata, PlanEventPayload::TableAdded { table })])
    }
}
