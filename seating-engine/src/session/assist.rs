//! Assignment assistance: conflicts, recommendations, auto-assign
//!
//! Everything proposed here is executed through the regular
//! capacity-checked commands; nothing writes to state directly.

use super::PlanSession;
use crate::assignment::{
    placement_order, AssignmentEngine, GuestRecommendations, Recommendation, Suggestion,
    SuggestionAction,
};
use crate::plan::{PlanError, PlanResult};
use crate::viewport::ViewportState;
use serde::Serialize;
use shared::plan::TableMovement;

/// Outcome of [`PlanSession::auto_assign`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AutoAssignReport {
    /// (guest id, table id) in placement order
    pub assigned: Vec<(i64, i64)>,
    /// Guests no table could take
    pub unplaced: Vec<i64>,
}

impl PlanSession {
    fn engine(&self) -> AssignmentEngine<'_> {
        AssignmentEngine::new(self.state(), &self.roster, &self.config)
    }

    /// Conflicts in the active layout, high severity first
    pub fn conflicts(&self) -> Vec<Suggestion> {
        self.engine().conflicts()
    }

    /// Candidates for every unassigned guest
    pub fn recommendations(&self) -> Vec<GuestRecommendations> {
        self.engine().recommendations()
    }

    pub fn recommend_for(&self, guest_id: i64) -> Vec<Recommendation> {
        self.engine().recommend_for(guest_id)
    }

    /// Place every unassigned guest at their best-scoring table
    ///
    /// VIPs first, then larger parties. Scores are recomputed after each
    /// placement; a candidate rejected by validation falls through to the
    /// next one.
    pub fn auto_assign(&mut self) -> AutoAssignReport {
        let order: Vec<i64> = placement_order(&self.roster)
            .into_iter()
            .map(|g| g.id)
            .collect();
        let mut report = AutoAssignReport::default();

        for guest_id in order {
            let candidates = self.recommend_for(guest_id);
            let placed = candidates.iter().find_map(|candidate| {
                match self.assign_guest_to_table(guest_id, Some(candidate.table_id)) {
                    Ok(()) => Some(candidate.table_id),
                    Err(e) => {
                        tracing::debug!(
                            guest_id,
                            table_id = candidate.table_id,
                            error = %e,
                            "Auto-assign candidate rejected"
                        );
                        None
                    }
                }
            });
            match placed {
                Some(table_id) => report.assigned.push((guest_id, table_id)),
                None => report.unplaced.push(guest_id),
            }
        }

        tracing::info!(
            assigned = report.assigned.len(),
            unplaced = report.unplaced.len(),
            "Auto-assign finished"
        );
        report
    }

    /// Apply one remediation from a suggestion, re-validating it first
    ///
    /// Returns the new viewport for `focus-table`.
    pub fn apply_suggestion_action(
        &mut self,
        action: &SuggestionAction,
    ) -> PlanResult<Option<ViewportState>> {
        match *action {
            SuggestionAction::Reassign {
                guest_id,
                from_table_id,
                to_table_id,
            } => {
                let guest = self
                    .roster
                    .get(guest_id)
                    .ok_or(PlanError::GuestNotFound(guest_id))?;
                if guest.table_id != Some(from_table_id) {
                    return Err(PlanError::StaleSuggestion(format!(
                        "guest {guest_id} is no longer at table {from_table_id}"
                    )));
                }
                self.assign_guest_to_table(guest_id, Some(to_table_id))?;
                Ok(None)
            }
            SuggestionAction::FixPosition {
                table_id,
                new_position,
            } => {
                let movement = TableMovement::To {
                    x: new_position.x,
                    y: new_position.y,
                };
                self.move_table(table_id, movement, Some(false))?;
                Ok(None)
            }
            SuggestionAction::FocusTable { table_id } => {
                let position = self
                    .state()
                    .table(table_id)
                    .map(|t| t.position)
                    .ok_or(PlanError::TableNotFound(table_id))?;
                Ok(Some(self.viewport.center_on(position)))
            }
        }
    }
}
