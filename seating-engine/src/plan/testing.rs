//! Test fixtures shared by action / applier tests

use super::state::{GuestRoster, PlanState};
use super::traits::{CommandContext, CommandMetadata};
use crate::core::PlannerConfig;
use shared::models::{Guest, PlanMode, Point, Seat, Table, TableSize};
use shared::util::IdAllocator;

pub fn create_test_metadata() -> CommandMetadata {
    CommandMetadata {
        command_id: "cmd-1".to_string(),
        editor_id: "editor-1".to_string(),
        editor_name: "Test Editor".to_string(),
        timestamp: 1_234_567_890,
    }
}

pub fn create_test_table(id: i64, x: f64, y: f64, capacity: u32) -> Table {
    Table {
        id,
        name: format!("Table {id}"),
        position: Point::new(x, y),
        size: TableSize::default(),
        rotation: 0.0,
        capacity,
        locked: false,
        enabled: true,
    }
}

pub fn create_test_seat(id: i64, row: u32, column: u32) -> Seat {
    Seat {
        id,
        position: Point::new(100.0 + column as f64 * 40.0, 80.0 + row as f64 * 40.0),
        row,
        column,
        enabled: true,
    }
}

pub fn create_test_guest(id: i64, companions: u32) -> Guest {
    Guest::new(id, format!("Guest {id}")).with_companions(companions)
}

/// Banquet state with tables 1 (cap 8) and 2 (cap 4)
pub fn create_banquet_state() -> PlanState {
    let mut state = PlanState::new(PlanMode::Banquet);
    state.tables.push(create_test_table(1, 300.0, 300.0, 8));
    state.tables.push(create_test_table(2, 700.0, 300.0, 4));
    state
}

/// Ceremony state with a 2 x 3 seat grid (ids 11..=16)
pub fn create_ceremony_state() -> PlanState {
    let mut state = PlanState::new(PlanMode::Ceremony);
    let mut id = 11;
    for row in 0..2 {
        for column in 0..3 {
            state.seats.push(create_test_seat(id, row, column));
            id += 1;
        }
    }
    state
}

/// Everything a command context borrows
pub struct Fixture {
    pub state: PlanState,
    pub roster: GuestRoster,
    pub config: PlannerConfig,
    pub ids: IdAllocator,
}

impl Fixture {
    pub fn new(state: PlanState, roster: GuestRoster) -> Self {
        Self {
            state,
            roster,
            config: PlannerConfig::defaults(),
            ids: IdAllocator::starting_at(1_000),
        }
    }

    pub fn ctx(&self) -> CommandContext<'_> {
        CommandContext::new(&self.state, &self.roster, &self.config, &self.ids, 0)
    }
}
