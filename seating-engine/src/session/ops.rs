//! Typed plan operations
//!
//! Thin wrappers that build the command payload and run it through the
//! session pipeline as the session's editor.

use super::PlanSession;
use crate::frame::TableEdit;
use crate::plan::{PlanError, PlanResult};
use crate::viewport::ViewportState;
use serde::Serialize;
use shared::models::{
    AreaKind, AreaUpdate, HallSize, Point, TableCreate, TableSize, TableUpdate,
};
use shared::plan::{
    AutoLayoutStyle, BanquetLayoutSpec, CommandResponse, PlanCommand, PlanCommandPayload,
    PlanEvent, PlanEventPayload, SeatGridSpec, TableMovement,
};

/// Result of committing one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameFlush {
    /// One response per table edit committed this frame
    pub responses: Vec<CommandResponse>,
    /// New viewport transform when a pan was pending
    pub viewport: Option<ViewportState>,
}

fn created(events: &[PlanEvent]) -> PlanResult<i64> {
    super::created_id(events)
        .ok_or_else(|| PlanError::InvalidOperation("command created nothing".to_string()))
}

impl PlanSession {
    // ========== Areas ==========

    pub fn add_area(&mut self, points: Vec<Point>, kind: AreaKind) -> PlanResult<i64> {
        let events = self.run(PlanCommandPayload::AddArea { points, kind })?;
        created(&events)
    }

    pub fn update_area(&mut self, area_id: i64, patch: AreaUpdate) -> PlanResult<()> {
        self.run(PlanCommandPayload::UpdateArea { area_id, patch })
            .map(drop)
    }

    pub fn delete_area(&mut self, area_id: i64) -> PlanResult<()> {
        self.run(PlanCommandPayload::DeleteArea { area_id }).map(drop)
    }

    // ========== Tables ==========

    pub fn add_table(&mut self, spec: TableCreate) -> PlanResult<i64> {
        let events = self.run(PlanCommandPayload::AddTable { spec })?;
        created(&events)
    }

    /// `snap: None` follows the configured default
    pub fn move_table(
        &mut self,
        table_id: i64,
        movement: TableMovement,
        snap: Option<bool>,
    ) -> PlanResult<()> {
        self.run(PlanCommandPayload::MoveTable {
            table_id,
            movement,
            snap,
        })
        .map(drop)
    }

    pub fn resize_table(&mut self, table_id: i64, size: TableSize) -> PlanResult<()> {
        self.run(PlanCommandPayload::ResizeTable { table_id, size })
            .map(drop)
    }

    pub fn rotate_table(&mut self, table_id: i64, delta_degrees: f64) -> PlanResult<()> {
        self.run(PlanCommandPayload::RotateTable {
            table_id,
            delta_degrees,
        })
        .map(drop)
    }

    /// Returns the id of the copy
    pub fn duplicate_table(&mut self, table_id: i64) -> PlanResult<i64> {
        let events = self.run(PlanCommandPayload::DuplicateTable { table_id })?;
        created(&events)
    }

    /// Returns the guests whose assignment was cleared
    pub fn delete_table(&mut self, table_id: i64) -> PlanResult<Vec<i64>> {
        let events = self.run(PlanCommandPayload::DeleteTable { table_id })?;
        self.frame.discard(table_id);
        Ok(events
            .iter()
            .find_map(|e| match &e.payload {
                PlanEventPayload::TableDeleted {
                    released_guests, ..
                } => Some(released_guests.clone()),
                _ => None,
            })
            .unwrap_or_default())
    }

    pub fn update_table(&mut self, table_id: i64, patch: TableUpdate) -> PlanResult<()> {
        self.run(PlanCommandPayload::UpdateTable { table_id, patch })
            .map(drop)
    }

    // ========== Seats / generators ==========

    pub fn toggle_seat_enabled(&mut self, seat_id: i64) -> PlanResult<()> {
        self.run(PlanCommandPayload::ToggleSeatEnabled { seat_id })
            .map(drop)
    }

    pub fn generate_seat_grid(&mut self, spec: SeatGridSpec) -> PlanResult<()> {
        self.run(PlanCommandPayload::GenerateSeatGrid { spec })
            .map(drop)
    }

    /// Replace every banquet table; pending frame edits are dropped only
    /// once the new layout is committed
    pub fn generate_banquet_layout(&mut self, spec: BanquetLayoutSpec) -> PlanResult<()> {
        self.run(PlanCommandPayload::GenerateBanquetLayout { spec })?;
        self.frame = crate::frame::FrameBatch::new();
        Ok(())
    }

    pub fn apply_auto_layout(&mut self, style: AutoLayoutStyle) -> PlanResult<()> {
        self.run(PlanCommandPayload::ApplyAutoLayout { style })
            .map(drop)
    }

    pub fn set_hall_size(&mut self, hall: HallSize) -> PlanResult<()> {
        self.run(PlanCommandPayload::SetHallSize { hall }).map(drop)
    }

    // ========== Assignments ==========

    /// `None` unassigns
    pub fn assign_guest_to_table(&mut self, guest_id: i64, table_id: Option<i64>) -> PlanResult<()> {
        self.run(PlanCommandPayload::AssignGuestToTable { guest_id, table_id })
            .map(drop)
    }

    /// `None` unassigns
    pub fn assign_guest_to_seat(&mut self, guest_id: i64, seat_id: Option<i64>) -> PlanResult<()> {
        self.run(PlanCommandPayload::AssignGuestToSeat { guest_id, seat_id })
            .map(drop)
    }

    // ========== Frame batching ==========

    /// Queue drag/resize input for the next frame
    ///
    /// When the edit kind for a table changes, the previous edit is committed
    /// right away so nothing is lost.
    pub fn queue_table_edit(&mut self, table_id: i64, edit: TableEdit) -> Option<CommandResponse> {
        let displaced = self.frame.queue(table_id, edit)?;
        Some(self.execute_command(PlanCommand::new(self.editor.clone(), displaced)))
    }

    /// Queue a pan for the next frame
    pub fn queue_pan(&mut self, dx: f64, dy: f64) {
        self.viewport.queue_pan(dx, dy);
    }

    /// Commit at most one command per table plus the pending pan
    pub fn flush_frame(&mut self) -> FrameFlush {
        let payloads = self.frame.flush();
        let responses = payloads
            .into_iter()
            .map(|payload| self.execute_command(PlanCommand::new(self.editor.clone(), payload)))
            .collect();
        FrameFlush {
            responses,
            viewport: self.viewport.flush_frame(),
        }
    }

    pub fn has_pending_frame(&self) -> bool {
        !self.frame.is_empty()
    }
}
