//! Per-frame batching of drag / resize input
//!
//! Pointer input arrives far more often than the UI renders. Edits are
//! queued per table and committed once per frame: relative moves add up,
//! absolute moves and resizes keep only the latest value.

use shared::models::TableSize;
use shared::plan::{PlanCommandPayload, TableMovement};
use std::collections::BTreeMap;

/// One queued table edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableEdit {
    Move(TableMovement),
    Resize(TableSize),
}

impl TableEdit {
    fn into_payload(self, table_id: i64) -> PlanCommandPayload {
        match self {
            TableEdit::Move(movement) => PlanCommandPayload::MoveTable {
                table_id,
                movement,
                snap: None,
            },
            TableEdit::Resize(size) => PlanCommandPayload::ResizeTable { table_id, size },
        }
    }
}

/// Edits waiting for the next frame, at most one per table
#[derive(Debug, Clone, Default)]
pub struct FrameBatch {
    pending: BTreeMap<i64, TableEdit>,
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Queue an edit, merging with what is already pending for the table
    ///
    /// Switching between moving and resizing the same table inside one frame
    /// hands back the displaced edit, which the caller commits right away.
    pub fn queue(&mut self, table_id: i64, edit: TableEdit) -> Option<PlanCommandPayload> {
        let Some(current) = self.pending.get_mut(&table_id) else {
            self.pending.insert(table_id, edit);
            return None;
        };

        match (*current, edit) {
            (TableEdit::Move(old), TableEdit::Move(new)) => {
                *current = TableEdit::Move(merge_movement(old, new));
                None
            }
            (TableEdit::Resize(_), TableEdit::Resize(_)) => {
                *current = edit;
                None
            }
            (displaced, _) => {
                *current = edit;
                Some(displaced.into_payload(table_id))
            }
        }
    }

    /// Drain the batch into commands, ordered by table id
    pub fn flush(&mut self) -> Vec<PlanCommandPayload> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(table_id, edit)| edit.into_payload(table_id))
            .collect()
    }

    /// Forget pending edits for one table (e.g. it was deleted)
    pub fn discard(&mut self, table_id: i64) {
        self.pending.remove(&table_id);
    }
}

fn merge_movement(old: TableMovement, new: TableMovement) -> TableMovement {
    match (old, new) {
        (TableMovement::By { dx: ax, dy: ay }, TableMovement::By { dx, dy }) => TableMovement::By {
            dx: ax + dx,
            dy: ay + dy,
        },
        (TableMovement::To { x, y }, TableMovement::By { dx, dy }) => TableMovement::To {
            x: x + dx,
            y: y + dy,
        },
        (_, to @ TableMovement::To { .. }) => to,
    }
}
