//! ApplyAutoLayout command handler
//!
//! Rearranges every unlocked table; locked tables stay where they are.

use crate::plan::error::{PlanError, PlanResult};
use crate::plan::layout::auto_layout_positions;
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::plan::{AutoLayoutStyle, PlanEvent, PlanEventPayload, TablePosition};

/// ApplyAutoLayout action
#[derive(Debug, Clone)]
pub struct ApplyAutoLayoutAction {
    pub style: AutoLayoutStyle,
}

impl CommandHandler for ApplyAutoLayoutAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        let movable: Vec<i64> = ctx
            .state
            .tables
            .iter()
            .filter(|t| !t.locked)
            .map(|t| t.id)
            .collect();
        if movable.is_empty() {
            return Err(PlanError::InvalidOperation(
                "no unlocked tables to arrange".to_string(),
            ));
        }

        let points = auto_layout_positions(self.style, movable.len(), &ctx.state.hall);
        let positions = movable
            .into_iter()
            .zip(points)
            .map(|(table_id, position)| TablePosition { table_id, position })
            .collect();

        Ok(vec![ctx.event(
            metadata,
            PlanEventPayload::TablesRepositioned { positions },
        )])
    }
}
