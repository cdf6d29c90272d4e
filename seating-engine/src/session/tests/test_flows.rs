use super::*;
use crate::assignment::{ConflictKind, SuggestionAction};
use crate::persistence::{MemoryGuestDirectory, MemoryPlanStore, PlanStore, SyncStatus};
use crate::AutosaveWorker;
use shared::plan::{AutoLayoutStyle, BanquetLayoutSpec};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn small_grid() -> SeatGridSpec {
    SeatGridSpec {
        rows: 2,
        cols: 3,
        aisle_after: None,
        ..Default::default()
    }
}

fn seated_at(id: i64, table_id: i64) -> Guest {
    let mut guest = solo_guest(id);
    guest.table_id = Some(table_id);
    guest
}

// ========================================================================
// Modes
// ========================================================================

#[test]
fn test_modes_keep_independent_layouts_and_history() {
    let (mut session, table_id) = create_session_with_table(8, vec![solo_guest(1)]);
    session.assign_guest_to_table(1, Some(table_id)).unwrap();

    session.switch_mode(PlanMode::Ceremony);
    assert!(session.state().tables.is_empty());
    assert!(!session.can_undo());

    session.generate_seat_grid(small_grid()).unwrap();
    let seat_id = session.state().seats[0].id;
    session.assign_guest_to_seat(1, Some(seat_id)).unwrap();

    let guest = session.roster().get(1).unwrap();
    assert_eq!(guest.table_id, Some(table_id));
    assert_eq!(guest.seat_id, Some(seat_id));

    // Undo in the ceremony tab leaves the banquet assignment alone
    session.undo();
    let guest = session.roster().get(1).unwrap();
    assert_eq!(guest.seat_id, None);
    assert_eq!(guest.table_id, Some(table_id));

    session.switch_mode(PlanMode::Banquet);
    assert_eq!(session.state().tables.len(), 1);
    assert!(session.can_undo());
}

#[test]
fn test_ceremony_undo_keeps_later_banquet_assignment() {
    let mut session = create_test_session();
    session.set_guests(vec![solo_guest(1)]);

    session.switch_mode(PlanMode::Ceremony);
    let ceremony_table = session.add_table(table_at(300.0, 300.0, 8)).unwrap();
    session.assign_guest_to_table(1, Some(ceremony_table)).unwrap();
    session.rotate_table(ceremony_table, 15.0).unwrap();

    session.switch_mode(PlanMode::Banquet);
    let banquet_table = session.add_table(table_at(300.0, 300.0, 8)).unwrap();
    session.assign_guest_to_table(1, Some(banquet_table)).unwrap();

    session.switch_mode(PlanMode::Ceremony);
    assert!(session.undo());

    assert_eq!(session.state().table(ceremony_table).unwrap().rotation, 0.0);
    assert_eq!(session.roster().get(1).unwrap().table_id, Some(banquet_table));
    assert_eq!(session.roster().occupied_at_table(ceremony_table), 0);
}

#[test]
fn test_seat_commands_need_ceremony_mode() {
    let (mut session, _) = create_session_with_table(8, vec![solo_guest(1)]);

    assert_eq!(
        session.assign_guest_to_seat(1, Some(1)).unwrap_err(),
        PlanError::WrongMode {
            expected: PlanMode::Ceremony
        }
    );
    assert_eq!(
        session.generate_seat_grid(small_grid()).unwrap_err(),
        PlanError::WrongMode {
            expected: PlanMode::Ceremony
        }
    );
}

#[test]
fn test_disabling_seat_releases_holder() {
    let mut session = create_test_session();
    session.set_guests(vec![solo_guest(1)]);
    session.switch_mode(PlanMode::Ceremony);
    session.generate_seat_grid(small_grid()).unwrap();
    let seat_id = session.state().seats[2].id;
    session.assign_guest_to_seat(1, Some(seat_id)).unwrap();

    session.toggle_seat_enabled(seat_id).unwrap();

    assert!(!session.state().seat(seat_id).unwrap().enabled);
    assert_eq!(session.roster().get(1).unwrap().seat_id, None);
    assert_eq!(
        session.assign_guest_to_seat(1, Some(seat_id)).unwrap_err(),
        PlanError::SeatDisabled(seat_id)
    );
}

#[test]
fn test_regenerating_grid_releases_seat_holders() {
    let mut session = create_test_session();
    session.set_guests(vec![solo_guest(1)]);
    session.switch_mode(PlanMode::Ceremony);
    session.generate_seat_grid(small_grid()).unwrap();
    let seat_id = session.state().seats[0].id;
    session.assign_guest_to_seat(1, Some(seat_id)).unwrap();

    session.generate_seat_grid(small_grid()).unwrap();

    assert!(session.state().seat(seat_id).is_none());
    assert_eq!(session.state().seats.len(), 6);
    assert_eq!(session.roster().get(1).unwrap().seat_id, None);
}

#[test]
fn test_banquet_layout_replaces_tables_and_releases_guests() {
    let (mut session, table_id) = create_session_with_table(8, vec![solo_guest(1)]);
    session.assign_guest_to_table(1, Some(table_id)).unwrap();

    session
        .generate_banquet_layout(BanquetLayoutSpec {
            rows: 2,
            cols: 2,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(session.state().tables.len(), 4);
    assert!(session.state().table(table_id).is_none());
    assert_eq!(session.roster().get(1).unwrap().table_id, None);
}

#[test]
fn test_auto_layout_keeps_locked_tables() {
    let (mut session, locked_id) = create_session_with_table(8, vec![]);
    let free_id = session.add_table(table_at(50.0, 50.0, 8)).unwrap();
    session
        .update_table(
            locked_id,
            TableUpdate {
                locked: Some(true),
                ..Default::default()
            },
        )
        .unwrap();

    session.apply_auto_layout(AutoLayoutStyle::Circular).unwrap();

    assert_eq!(
        session.state().table(locked_id).unwrap().position,
        Point::new(400.0, 400.0)
    );
    assert_ne!(
        session.state().table(free_id).unwrap().position,
        Point::new(50.0, 50.0)
    );
}

// ========================================================================
// Assignment assistance
// ========================================================================

#[test]
fn test_auto_assign_places_larger_parties_first() {
    let guests = vec![party(1, 2), party(2, 1), solo_guest(3)];
    let (mut session, table_id) = create_session_with_table(4, guests);

    let report = session.auto_assign();

    // Party of 3 fills the table down to one place; the couple no longer fits
    assert_eq!(report.assigned, vec![(1, table_id), (3, table_id)]);
    assert_eq!(report.unplaced, vec![2]);
    assert_eq!(session.roster().occupied_at_table(table_id), 4);
}

#[test]
fn test_over_capacity_reassign_and_stale_reapply() {
    let mut session = create_test_session();
    let crowded = session.add_table(table_at(400.0, 400.0, 2)).unwrap();
    let roomy = session.add_table(table_at(800.0, 400.0, 4)).unwrap();
    session.set_guests((1..=3).map(|id| seated_at(id, crowded)));

    let suggestion = session
        .conflicts()
        .into_iter()
        .find(|s| s.kind == ConflictKind::OverCapacity)
        .unwrap();
    let reassign = SuggestionAction::Reassign {
        guest_id: 1,
        from_table_id: crowded,
        to_table_id: roomy,
    };
    assert_eq!(suggestion.actions[0], reassign);

    session.apply_suggestion_action(&reassign).unwrap();
    assert_eq!(session.roster().occupied_at_table(crowded), 2);
    assert!(!session
        .conflicts()
        .iter()
        .any(|s| s.kind == ConflictKind::OverCapacity));

    let err = session.apply_suggestion_action(&reassign).unwrap_err();
    assert_eq!(err.code(), ErrorCode::StaleSuggestion);
}

#[test]
fn test_fix_position_moves_table_inside_hall() {
    let mut session = create_test_session();
    let table_id = session.add_table(table_at(1790.0, 600.0, 8)).unwrap();

    let suggestion = session
        .conflicts()
        .into_iter()
        .find(|s| s.kind == ConflictKind::OutOfBounds)
        .unwrap();
    let fix = suggestion
        .actions
        .iter()
        .find(|a| matches!(a, SuggestionAction::FixPosition { .. }))
        .unwrap()
        .clone();

    session.apply_suggestion_action(&fix).unwrap();

    assert_eq!(
        session.state().table(table_id).unwrap().position,
        Point::new(1760.0, 600.0)
    );
    assert!(!session
        .conflicts()
        .iter()
        .any(|s| s.kind == ConflictKind::OutOfBounds));
}

#[test]
fn test_focus_table_centres_viewport() {
    let (mut session, table_id) = create_session_with_table(8, vec![]);

    let view = session
        .apply_suggestion_action(&SuggestionAction::FocusTable { table_id })
        .unwrap()
        .unwrap();

    assert_eq!(view, session.viewport().state());
    let screen = session.viewport().world_to_screen(Point::new(400.0, 400.0));
    assert_eq!(screen, Point::new(400.0, 300.0));

    assert_eq!(
        session
            .apply_suggestion_action(&SuggestionAction::FocusTable { table_id: 404 })
            .unwrap_err(),
        PlanError::TableNotFound(404)
    );
}

// ========================================================================
// Frame batching
// ========================================================================

#[test]
fn test_drag_input_commits_once_per_frame() {
    let (mut session, table_id) = create_session_with_table(8, vec![]);
    let history_len = session.history().len();

    for _ in 0..3 {
        let displaced = session.queue_table_edit(
            table_id,
            TableEdit::Move(TableMovement::By { dx: 10.0, dy: 0.0 }),
        );
        assert!(displaced.is_none());
    }
    assert!(session.has_pending_frame());

    let flush = session.flush_frame();

    assert_eq!(flush.responses.len(), 1);
    assert!(flush.responses[0].success);
    assert!(flush.viewport.is_none());
    assert!(!session.has_pending_frame());
    assert_eq!(session.history().len(), history_len + 1);
    assert_eq!(
        session.state().table(table_id).unwrap().position,
        Point::new(430.0, 400.0)
    );
}

#[test]
fn test_switching_edit_kind_commits_displaced_edit() {
    let (mut session, table_id) = create_session_with_table(8, vec![]);

    session.queue_table_edit(
        table_id,
        TableEdit::Move(TableMovement::By { dx: 10.0, dy: 0.0 }),
    );
    let displaced = session
        .queue_table_edit(
            table_id,
            TableEdit::Resize(TableSize::Circle { diameter: 120.0 }),
        )
        .unwrap();

    assert!(displaced.success);
    assert_eq!(
        session.state().table(table_id).unwrap().position,
        Point::new(410.0, 400.0)
    );

    session.flush_frame();
    assert_eq!(
        session.state().table(table_id).unwrap().size,
        TableSize::Circle { diameter: 120.0 }
    );
}

#[test]
fn test_pan_is_applied_on_flush() {
    let mut session = create_test_session();
    session.queue_pan(4.0, 2.0);
    session.queue_pan(6.0, 3.0);
    assert_eq!(session.viewport().offset(), Point::new(0.0, 0.0));

    let flush = session.flush_frame();

    assert!(flush.responses.is_empty());
    assert_eq!(flush.viewport.unwrap().offset, Point::new(10.0, 5.0));
    assert!(session.flush_frame().viewport.is_none());
}

#[test]
fn test_deleting_table_drops_its_pending_edit() {
    let (mut session, table_id) = create_session_with_table(8, vec![]);
    session.queue_table_edit(
        table_id,
        TableEdit::Move(TableMovement::By { dx: 10.0, dy: 0.0 }),
    );

    session.delete_table(table_id).unwrap();

    assert!(!session.has_pending_frame());
    assert!(session.flush_frame().responses.is_empty());
}

#[test]
fn test_failed_banquet_layout_keeps_pending_edit() {
    let (mut session, table_id) = create_session_with_table(8, vec![]);
    session.queue_table_edit(
        table_id,
        TableEdit::Move(TableMovement::By { dx: 10.0, dy: 0.0 }),
    );

    let err = session
        .generate_banquet_layout(BanquetLayoutSpec {
            rows: 0,
            cols: 2,
            ..Default::default()
        })
        .unwrap_err();

    assert!(matches!(err, PlanError::InvalidOperation(_)));
    assert!(session.has_pending_frame());
    let flush = session.flush_frame();
    assert!(flush.responses[0].success);
    assert_eq!(
        session.state().table(table_id).unwrap().position,
        Point::new(410.0, 400.0)
    );
}

#[test]
fn test_banquet_layout_drops_pending_edits() {
    let (mut session, table_id) = create_session_with_table(8, vec![]);
    session.queue_table_edit(
        table_id,
        TableEdit::Move(TableMovement::By { dx: 10.0, dy: 0.0 }),
    );

    session
        .generate_banquet_layout(BanquetLayoutSpec {
            rows: 1,
            cols: 2,
            ..Default::default()
        })
        .unwrap();

    assert!(!session.has_pending_frame());
}

// ========================================================================
// Persistence
// ========================================================================

#[tokio::test(start_paused = true)]
async fn test_autosave_persists_layout_and_assignments() {
    let store = MemoryPlanStore::new();
    let directory = MemoryGuestDirectory::with_guests("plan-1", vec![solo_guest(1)]);
    let token = CancellationToken::new();
    let (handle, _task) = AutosaveWorker::spawn(
        Arc::new(store.clone()),
        Some(Arc::new(directory.clone())),
        &PlannerConfig::defaults(),
        token.clone(),
    );

    let (mut session, table_id) = create_session_with_table(8, vec![solo_guest(1)]);
    session.attach_autosave(handle.clone());
    session.assign_guest_to_table(1, Some(table_id)).unwrap();

    tokio::time::sleep(Duration::from_millis(900)).await;

    let document = store.document("plan-1").unwrap();
    assert_eq!(document.get(PlanMode::Banquet).unwrap().tables.len(), 1);
    assert_eq!(
        directory.guest("plan-1", 1).unwrap().table_id,
        Some(table_id)
    );
    assert_eq!(handle.status(), SyncStatus::Synced);
    token.cancel();
}

#[tokio::test]
async fn test_load_clears_dangling_assignments() {
    let (mut original, table_id) = create_session_with_table(8, vec![]);
    original.switch_mode(PlanMode::Ceremony);
    original.generate_seat_grid(small_grid()).unwrap();
    let store = MemoryPlanStore::new();
    store.insert(original.document());

    let directory =
        MemoryGuestDirectory::with_guests("plan-1", vec![seated_at(1, table_id), seated_at(2, 999)]);

    let session = PlanSession::load(
        "plan-1",
        alice(),
        PlannerConfig::defaults(),
        LockTable::new(),
        &store,
        &directory,
    )
    .await
    .unwrap();

    assert_eq!(session.state().tables.len(), 1);
    assert_eq!(session.state_for(PlanMode::Ceremony).seats.len(), 6);
    assert_eq!(session.roster().get(1).unwrap().table_id, Some(table_id));
    assert_eq!(session.roster().get(2).unwrap().table_id, None);
    assert!(!session.can_undo());

    // Fresh ids continue after the loaded ones
    let mut session = session;
    let new_id = session.add_table(table_at(900.0, 300.0, 8)).unwrap();
    assert!(new_id > session.state_for(PlanMode::Ceremony).seats[5].id);
}

#[tokio::test]
async fn test_missing_plan_loads_empty() {
    let store = MemoryPlanStore::new();
    assert!(store.load_plan("plan-1").await.is_err());
    let directory = MemoryGuestDirectory::with_guests("plan-1", vec![solo_guest(1)]);

    let session = PlanSession::load(
        "plan-1",
        alice(),
        PlannerConfig::defaults(),
        LockTable::new(),
        &store,
        &directory,
    )
    .await
    .unwrap();

    assert!(session.state().is_empty());
    assert_eq!(session.roster().len(), 1);
}
