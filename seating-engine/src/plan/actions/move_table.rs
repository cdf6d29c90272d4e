//! MoveTable command handler
//!
//! Relative (`dx/dy`) or absolute (`x/y`) moves, optionally snapped to the
//! configured grid step.

use super::require_movable_table;
use crate::plan::error::{PlanError, PlanResult};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::plan::{PlanEvent, PlanEventPayload, TableMovement};

/// MoveTable action
#[derive(Debug, Clone)]
pub struct MoveTableAction {
    pub table_id: i64,
    pub movement: TableMovement,
    /// `None` = use the configured default
    pub snap: Option<bool>,
}

impl CommandHandler for MoveTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        let table = require_movable_table(ctx, self.table_id)?;
        if !self.movement.is_finite() {
            return Err(PlanError::InvalidGeometry(
                "movement must be finite".to_string(),
            ));
        }

        let mut position = self.movement.resolve(table.position);
        if self.snap.unwrap_or(ctx.config.snap_to_grid) {
            position = position.snapped(ctx.config.grid_step);
        }

        Ok(vec![ctx.event(
            metadata,
            PlanEventPayload::TableMoved {
                table_id: self.table_id,
                position,
            },
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::state::GuestRoster;
    use crate::plan::testing::*;
    use shared::models::Point;

    fn moved_to(events: &[PlanEvent]) -> Point {
        match &events[0].payload {
            PlanEventPayload::TableMoved { position, .. } => *position,
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_move_relative() {
        let fx = Fixture::new(create_banquet_state(), GuestRoster::new());
        let action = MoveTableAction {
            table_id: 1,
            movement: TableMovement::By { dx: 15.0, dy: -5.0 },
            snap: None,
        };
        let events = action.execute(&mut fx.ctx(), &create_test_metadata()).unwrap();
        assert_eq!(moved_to(&events), Point::new(315.0, 295.0));
    }

    #[test]
    fn test_move_absolute_with_snap() {
        let fx = Fixture::new(create_banquet_state(), GuestRoster::new());
        let action = MoveTableAction {
            table_id: 1,
            movement: TableMovement::To { x: 433.0, y: 118.0 },
            snap: Some(true),
        };
        let events = action.execute(&mut fx.ctx(), &create_test_metadata()).unwrap();
        assert_eq!(moved_to(&events), Point::new(440.0, 120.0));
    }

    #[test]
    fn test_move_locked_table_rejected() {
        let mut state = create_banquet_state();
        state.tables[0].locked = true;
        let fx = Fixture::new(state, GuestRoster::new());
        let action = MoveTableAction {
            table_id: 1,
            movement: TableMovement::By { dx: 1.0, dy: 1.0 },
            snap: None,
        };
        assert_eq!(
            action.execute(&mut fx.ctx(), &create_test_metadata()),
            Err(PlanError::TableLocked(1))
        );
    }

    #[test]
    fn test_move_missing_table() {
        let fx = Fixture::new(create_banquet_state(), GuestRoster::new());
        let action = MoveTableAction {
            table_id: 42,
            movement: TableMovement::By { dx: 1.0, dy: 1.0 },
            snap: None,
        };
        assert_eq!(
            action.execute(&mut fx.ctx(), &create_test_metadata()),
            Err(PlanError::TableNotFound(42))
        );
    }
}
