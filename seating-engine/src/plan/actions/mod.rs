//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles
//! one specific command type.

use super::error::{PlanError, PlanResult};
use super::state::{GuestRoster, PlanState};
use super::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::{PlanMode, Table};
use shared::plan::{PlanCommand, PlanCommandPayload, PlanEvent};

mod add_area;
mod add_table;
mod apply_auto_layout;
mod assign_guest_to_seat;
mod assign_guest_to_table;
mod delete_area;
mod delete_table;
mod duplicate_table;
mod generate_banquet_layout;
mod generate_seat_grid;
mod move_table;
mod resize_table;
mod rotate_table;
mod set_hall_size;
mod toggle_seat_enabled;
mod update_area;
mod update_table;

pub use add_area::AddAreaAction;
pub use add_table::AddTableAction;
pub use apply_auto_layout::ApplyAutoLayoutAction;
pub use assign_guest_to_seat::AssignGuestToSeatAction;
pub use assign_guest_to_table::AssignGuestToTableAction;
pub use delete_area::DeleteAreaAction;
pub use delete_table::DeleteTableAction;
pub use duplicate_table::DuplicateTableAction;
pub use generate_banquet_layout::GenerateBanquetLayoutAction;
pub use generate_seat_grid::GenerateSeatGridAction;
pub use move_table::MoveTableAction;
pub use resize_table::ResizeTableAction;
pub use rotate_table::RotateTableAction;
pub use set_hall_size::SetHallSizeAction;
pub use toggle_seat_enabled::ToggleSeatEnabledAction;
pub use update_area::UpdateAreaAction;
pub use update_table::UpdateTableAction;

/// CommandAction enum - dispatches to concrete action implementations
pub enum CommandAction {
    AddArea(AddAreaAction),
    UpdateArea(UpdateAreaAction),
    DeleteArea(DeleteAreaAction),
    AddTable(AddTableAction),
    MoveTable(MoveTableAction),
    ResizeTable(ResizeTableAction),
    RotateTable(RotateTableAction),
    DuplicateTable(DuplicateTableAction),
    DeleteTable(DeleteTableAction),
    UpdateTable(UpdateTableAction),
    ToggleSeatEnabled(ToggleSeatEnabledAction),
    GenerateSeatGrid(GenerateSeatGridAction),
    GenerateBanquetLayout(GenerateBanquetLayoutAction),
    ApplyAutoLayout(ApplyAutoLayoutAction),
    AssignGuestToTable(AssignGuestToTableAction),
    AssignGuestToSeat(AssignGuestToSeatAction),
    SetHallSize(SetHallSizeAction),
}

impl CommandHandler for CommandAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        match self {
            CommandAction::AddArea(action) => action.execute(ctx, metadata),
            CommandAction::UpdateArea(action) => action.execute(ctx, metadata),
            CommandAction::DeleteArea(action) => action.execute(ctx, metadata),
            CommandAction::AddTable(action) => action.execute(ctx, metadata),
            CommandAction::MoveTable(action) => action.execute(ctx, metadata),
            CommandAction::ResizeTable(action) => action.execute(ctx, metadata),
            CommandAction::RotateTable(action) => action.execute(ctx, metadata),
            CommandAction::DuplicateTable(action) => action.execute(ctx, metadata),
            CommandAction::DeleteTable(action) => action.execute(ctx, metadata),
            CommandAction::UpdateTable(action) => action.execute(ctx, metadata),
            CommandAction::ToggleSeatEnabled(action) => action.execute(ctx, metadata),
            CommandAction::GenerateSeatGrid(action) => action.execute(ctx, metadata),
            CommandAction::GenerateBanquetLayout(action) => action.execute(ctx, metadata),
            CommandAction::ApplyAutoLayout(action) => action.execute(ctx, metadata),
            CommandAction::AssignGuestToTable(action) => action.execute(ctx, metadata),
            CommandAction::AssignGuestToSeat(action) => action.execute(ctx, metadata),
            CommandAction::SetHallSize(action) => action.execute(ctx, metadata),
        }
    }
}

/// Convert PlanCommand to CommandAction
///
/// This is the ONLY place with a match on PlanCommandPayload.
impl From<&PlanCommand> for CommandAction {
    fn from(cmd: &PlanCommand) -> Self {
        match &cmd.payload {
            PlanCommandPayload::AddArea { points, kind } => CommandAction::AddArea(AddAreaAction {
                points: points.clone(),
                kind: *kind,
            }),
            PlanCommandPayload::UpdateArea { area_id, patch } => {
                CommandAction::UpdateArea(UpdateAreaAction {
                    area_id: *area_id,
                    patch: patch.clone(),
                })
            }
            PlanCommandPayload::DeleteArea { area_id } => {
                CommandAction::DeleteArea(DeleteAreaAction { area_id: *area_id })
            }
            PlanCommandPayload::AddTable { spec } => {
                CommandAction::AddTable(AddTableAction { spec: spec.clone() })
            }
            PlanCommandPayload::MoveTable {
                table_id,
                movement,
                snap,
            } => CommandAction::MoveTable(MoveTableAction {
                table_id: *table_id,
                movement: *movement,
                snap: *snap,
            }),
            PlanCommandPayload::ResizeTable { table_id, size } => {
                CommandAction::ResizeTable(ResizeTableAction {
                    table_id: *table_id,
                    size: *size,
                })
            }
            PlanCommandPayload::RotateTable {
                table_id,
                delta_degrees,
            } => CommandAction::RotateTable(RotateTableAction {
                table_id: *table_id,
                delta_degrees: *delta_degrees,
            }),
            PlanCommandPayload::DuplicateTable { table_id } => {
                CommandAction::DuplicateTable(DuplicateTableAction {
                    table_id: *table_id,
                })
            }
            PlanCommandPayload::DeleteTable { table_id } => {
                CommandAction::DeleteTable(DeleteTableAction {
                    table_id: *table_id,
                })
            }
            PlanCommandPayload::UpdateTable { table_id, patch } => {
                CommandAction::UpdateTable(UpdateTableAction {
                    table_id: *table_id,
                    patch: patch.clone(),
                })
            }
            PlanCommandPayload::ToggleSeatEnabled { seat_id } => {
                CommandAction::ToggleSeatEnabled(ToggleSeatEnabledAction { seat_id: *seat_id })
            }
            PlanCommandPayload::GenerateSeatGrid { spec } => {
                CommandAction::GenerateSeatGrid(GenerateSeatGridAction { spec: *spec })
            }
            PlanCommandPayload::GenerateBanquetLayout { spec } => {
                CommandAction::GenerateBanquetLayout(GenerateBanquetLayoutAction { spec: *spec })
            }
            PlanCommandPayload::ApplyAutoLayout { style } => {
                CommandAction::ApplyAutoLayout(ApplyAutoLayoutAction { style: *style })
            }
            PlanCommandPayload::AssignGuestToTable { guest_id, table_id } => {
                CommandAction::AssignGuestToTable(AssignGuestToTableAction {
                    guest_id: *guest_id,
                    table_id: *table_id,
                })
            }
            PlanCommandPayload::AssignGuestToSeat { guest_id, seat_id } => {
                CommandAction::AssignGuestToSeat(AssignGuestToSeatAction {
                    guest_id: *guest_id,
                    seat_id: *seat_id,
                })
            }
            PlanCommandPayload::SetHallSize { hall } => {
                CommandAction::SetHallSize(SetHallSizeAction { hall: *hall })
            }
        }
    }
}

/// Existing tables a command would mutate (subject to the lock gate)
///
/// Table creation is not gated; there is nothing to conflict with yet.
/// Guest assignment gates both the table the guest leaves and the one they
/// join.
pub fn gated_tables(
    payload: &PlanCommandPayload,
    state: &PlanState,
    roster: &GuestRoster,
) -> Vec<i64> {
    match payload {
        PlanCommandPayload::MoveTable { table_id, .. }
        | PlanCommandPayload::ResizeTable { table_id, .. }
        | PlanCommandPayload::RotateTable { table_id, .. }
        | PlanCommandPayload::DeleteTable { table_id }
        | PlanCommandPayload::UpdateTable { table_id, .. } => vec![*table_id],
        PlanCommandPayload::AssignGuestToTable { guest_id, table_id } => {
            let current = roster
                .get(*guest_id)
                .and_then(|g| g.table_id)
                .filter(|id| state.has_table(*id));
            let mut gated: Vec<i64> = current.into_iter().collect();
            if let Some(target) = table_id
                && current != Some(*target)
            {
                gated.push(*target);
            }
            gated
        }
        PlanCommandPayload::ApplyAutoLayout { .. } => state
            .tables
            .iter()
            .filter(|t| !t.locked)
            .map(|t| t.id)
            .collect(),
        PlanCommandPayload::GenerateBanquetLayout { .. } => {
            state.tables.iter().map(|t| t.id).collect()
        }
        _ => Vec::new(),
    }
}

// ========== Shared validation helpers ==========

pub(crate) fn require_mode(ctx: &CommandContext<'_>, expected: PlanMode) -> PlanResult<()> {
    if ctx.mode() != expected {
        return Err(PlanError::WrongMode { expected });
    }
    Ok(())
}

pub(crate) fn require_table<'a>(ctx: &CommandContext<'a>, table_id: i64) -> PlanResult<&'a Table> {
    ctx.state
        .table(table_id)
        .ok_or(PlanError::TableNotFound(table_id))
}

/// Table must exist and not be locked in place
pub(crate) fn require_movable_table<'a>(
    ctx: &CommandContext<'a>,
    table_id: i64,
) -> PlanResult<&'a Table> {
    let table = require_table(ctx, table_id)?;
    if table.locked {
        return Err(PlanError::TableLocked(table_id));
    }
    Ok(table)
}

pub(crate) fn require_finite(value: f64, what: &str) -> PlanResult<()> {
    if !value.is_finite() {
        return Err(PlanError::InvalidGeometry(format!("{what} must be finite")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::testing::*;
    use shared::models::EditorIdentity;
    use shared::plan::{AutoLayoutStyle, TableMovement};

    #[test]
    fn gate_covers_table_mutations_only() {
        let mut state = create_banquet_state();
        state.tables[1].locked = true;
        let roster = GuestRoster::from_guests([create_test_guest(1, 0)]);

        let mv = PlanCommandPayload::MoveTable {
            table_id: 1,
            movement: TableMovement::By { dx: 1.0, dy: 0.0 },
            snap: None,
        };
        assert_eq!(gated_tables(&mv, &state, &roster), vec![1]);

        let layout = PlanCommandPayload::ApplyAutoLayout {
            style: AutoLayoutStyle::Columns,
        };
        assert_eq!(gated_tables(&layout, &state, &roster), vec![1]);

        let unassign = PlanCommandPayload::AssignGuestToTable {
            guest_id: 1,
            table_id: None,
        };
        assert!(gated_tables(&unassign, &state, &roster).is_empty());

        let add = PlanCommandPayload::AddTable {
            spec: Default::default(),
        };
        assert!(gated_tables(&add, &state, &roster).is_empty());
    }

    #[test]
    fn gate_covers_both_ends_of_a_reassignment() {
        let state = create_banquet_state();
        let mut seated = create_test_guest(1, 0);
        seated.table_id = Some(1);
        let mut elsewhere = create_test_guest(2, 0);
        // Table 99 belongs to the other mode
        elsewhere.table_id = Some(99);
        let roster = GuestRoster::from_guests([seated, elsewhere]);

        let assign = |guest_id, table_id| PlanCommandPayload::AssignGuestToTable { guest_id, table_id };
        assert_eq!(gated_tables(&assign(1, None), &state, &roster), vec![1]);
        assert_eq!(gated_tables(&assign(1, Some(2)), &state, &roster), vec![1, 2]);
        assert_eq!(gated_tables(&assign(1, Some(1)), &state, &roster), vec![1]);
        assert_eq!(gated_tables(&assign(2, Some(2)), &state, &roster), vec![2]);
        assert!(gated_tables(&assign(2, None), &state, &roster).is_empty());
    }

    #[test]
    fn command_converts_to_matching_action() {
        let cmd = PlanCommand::new(
            EditorIdentity::new("e", "E"),
            PlanCommandPayload::DeleteTable { table_id: 2 },
        );
        assert!(matches!(
            CommandAction::from(&cmd),
            CommandAction::DeleteTable(DeleteTableAction { table_id: 2 })
        ));
    }
}
