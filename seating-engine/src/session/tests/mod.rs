use super::*;
use crate::frame::TableEdit;
use crate::locks::Clock;
use shared::error::ErrorCode;
use shared::models::{AreaKind, HallSize, Point, TableCreate, TableSize, TableUpdate};
use shared::plan::{PlanEventType, SeatGridSpec, SeatingAssignment, TableMovement};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

fn alice() -> EditorIdentity {
    EditorIdentity::new("editor-a", "Alice")
}

fn bob() -> EditorIdentity {
    EditorIdentity::new("editor-b", "Bob")
}

fn create_test_session() -> PlanSession {
    PlanSession::new("plan-1", alice(), PlannerConfig::defaults())
}

fn solo_guest(id: i64) -> Guest {
    Guest::new(id, format!("Guest {id}"))
}

fn party(id: i64, companions: u32) -> Guest {
    Guest::new(id, format!("Guest {id}")).with_companions(companions)
}

fn table_at(x: f64, y: f64, capacity: u32) -> TableCreate {
    TableCreate {
        position: Some(Point::new(x, y)),
        capacity: Some(capacity),
        ..Default::default()
    }
}

/// Session with `guests` and one table of `capacity` at (400, 400)
fn create_session_with_table(capacity: u32, guests: Vec<Guest>) -> (PlanSession, i64) {
    let mut session = create_test_session();
    session.set_guests(guests);
    let table_id = session.add_table(table_at(400.0, 400.0, capacity)).unwrap();
    (session, table_id)
}

fn add_table_cmd(editor: EditorIdentity, capacity: u32) -> PlanCommand {
    PlanCommand::new(
        editor,
        PlanCommandPayload::AddTable {
            spec: table_at(300.0, 300.0, capacity),
        },
    )
}

/// Manually advanced millisecond clock for lock TTL tests
struct ManualClock(Arc<AtomicI64>);

impl ManualClock {
    fn new() -> Self {
        Self(Arc::new(AtomicI64::new(10_000)))
    }

    fn clock(&self) -> Clock {
        let now = self.0.clone();
        Arc::new(move || now.load(Ordering::SeqCst))
    }

    fn advance(&self, ms: i64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

mod test_flows;
