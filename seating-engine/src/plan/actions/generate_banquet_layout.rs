//! GenerateBanquetLayout command handler
//!
//! Replaces every banquet table with a rows x cols grid. Refused while any
//! table is locked in place; all current table assignments are cleared.

use super::{require_finite, require_mode};
use crate::plan::error::{PlanError, PlanResult};
use crate::plan::layout::{banquet_tables, MAX_GENERATED_ITEMS};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::PlanMode;
use shared::plan::{BanquetLayoutSpec, PlanEvent, PlanEventPayload};

/// GenerateBanquetLayout action
#[derive(Debug, Clone)]
pub struct GenerateBanquetLayoutAction {
    pub spec: BanquetLayoutSpec,
}

impl CommandHandler for GenerateBanquetLayoutAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        require_mode(ctx, PlanMode::Banquet)?;
        validate_spec(&self.spec)?;

        if let Some(locked) = ctx.state.tables.iter().find(|t| t.locked) {
            return Err(PlanError::TableLocked(locked.id));
        }

        let table_ids = ctx.state.table_ids();
        let released_guests: Vec<i64> = ctx
            .roster
            .iter()
            .filter(|g| g.table_id.is_some_and(|id| table_ids.contains(&id)))
            .map(|g| g.id)
            .collect();

        let tables = banquet_tables(&self.spec, || ctx.allocate_id());
        Ok(vec![ctx.event(
            metadata,
            PlanEventPayload::TablesReplaced {
                tables,
                released_guests,
            },
        )])
    }
}

fn validate_spec(spec: &BanquetLayoutSpec) -> PlanResult<()> {
    let count = spec.rows.saturating_mul(spec.cols);
    if count == 0 {
        return Err(PlanError::InvalidOperation(
            "banquet layout needs at least one row and one column".to_string(),
        ));
    }
    if count > MAX_GENERATED_ITEMS {
        return Err(PlanError::InvalidOperation(format!(
            "banquet layout of {count} tables exceeds {MAX_GENERATED_ITEMS}"
        )));
    }
    if spec.seats == 0 {
        return Err(PlanError::InvalidCapacity(
            "seats per table must be at least one".to_string(),
        ));
    }
    for (value, what) in [
        (spec.gap_x, "horizontal gap"),
        (spec.gap_y, "vertical gap"),
        (spec.start_x, "layout start"),
        (spec.start_y, "layout start"),
    ] {
        require_finite(value, what)?;
    }
    if spec.gap_x <= 0.0 || spec.gap_y <= 0.0 {
        return Err(PlanError::InvalidGeometry("table gaps must be positive".to_string()));
    }
    Ok(())
}
