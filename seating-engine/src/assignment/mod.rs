//! Assignment engine: conflict detection and recommendation scoring
//!
//! Both halves are read-only over the plan state and guest roster.
//! Anything they propose is applied through the normal validated command
//! path, never directly.

pub mod conflicts;
pub mod scoring;

pub use conflicts::{detect_conflicts, ConflictKind, Severity, Suggestion, SuggestionAction};
pub use scoring::{
    placement_order, recommend_for_guest, recommendations, GuestRecommendations, Recommendation,
    ScoreReason,
};

use crate::core::PlannerConfig;
use crate::plan::state::{GuestRoster, PlanState};

/// Borrowed view used by the session to answer assignment queries
pub struct AssignmentEngine<'a> {
    state: &'a PlanState,
    roster: &'a GuestRoster,
    config: &'a PlannerConfig,
}

impl<'a> AssignmentEngine<'a> {
    pub fn new(state: &'a PlanState, roster: &'a GuestRoster, config: &'a PlannerConfig) -> Self {
        Self {
            state,
            roster,
            config,
        }
    }

    pub fn conflicts(&self) -> Vec<Suggestion> {
        detect_conflicts(self.state, self.roster, self.config)
    }

    pub fn recommendations(&self) -> Vec<GuestRecommendations> {
        recommendations(self.state, self.roster, self.config)
    }

    /// Candidates for one guest; empty when the guest is unknown
    pub fn recommend_for(&self, guest_id: i64) -> Vec<Recommendation> {
        self.roster
            .get(guest_id)
            .map(|guest| recommend_for_guest(self.state, self.roster, self.config, guest))
            .unwrap_or_default()
    }
}
