//! Recommendation scoring
//!
//! Each candidate table gets four factors, each normalised to `[0, 1]`:
//!
//! | Factor | Grows with |
//! |--------|------------|
//! | affinity | guests at the table sharing the group or tags |
//! | vip proximity | closeness to the stage (VIP guests only) |
//! | capacity fit | how tightly the party fills the free places |
//! | side conflict | share of people from the opposing side, once dominant |
//!
//! `score = affinity·w₁ + vip·w₂ + fit·w₃ − conflict·w₄`. With non-negative
//! weights the score never drops when a bonus factor grows. Tables that are
//! disabled or cannot hold the party are never candidates.

use crate::core::{PlannerConfig, ScoringWeights};
use crate::plan::capacity::remaining_places;
use crate::plan::state::{GuestRoster, PlanState};
use serde::{Deserialize, Serialize};
use shared::models::{AreaKind, Guest, Point, Table};
use std::cmp::Ordering;

/// One contributing factor, kept for explainability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "factor", rename_all = "snake_case")]
pub enum ScoreReason {
    Affinity { matches: u32, points: f64 },
    VipProximity { distance: f64, points: f64 },
    CapacityFit { remaining_after: u32, points: f64 },
    SideConflict { opposing_share: f64, points: f64 },
}

impl ScoreReason {
    pub fn points(&self) -> f64 {
        match *self {
            ScoreReason::Affinity { points, .. }
            | ScoreReason::VipProximity { points, .. }
            | ScoreReason::CapacityFit { points, .. }
            | ScoreReason::SideConflict { points, .. } => points,
        }
    }
}

/// A scored guest-to-table candidate (advisory)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub guest_id: i64,
    pub table_id: i64,
    pub table_name: String,
    pub score: f64,
    pub reasons: Vec<ScoreReason>,
}

/// Top candidates for one unassigned guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestRecommendations {
    pub guest_id: i64,
    pub candidates: Vec<Recommendation>,
}

/// Centroid of the first stage area, the VIP anchor
pub fn stage_anchor(state: &PlanState) -> Option<Point> {
    state
        .areas
        .iter()
        .filter(|a| a.kind == AreaKind::Stage)
        .find_map(|a| a.centroid())
}

/// Unassigned guests in placement order: VIPs, then larger parties, then id
pub fn placement_order(roster: &GuestRoster) -> Vec<&Guest> {
    let mut pending: Vec<&Guest> = roster.iter().filter(|g| g.table_id.is_none()).collect();
    pending.sort_by(|a, b| {
        b.is_vip()
            .cmp(&a.is_vip())
            .then(b.party_size().cmp(&a.party_size()))
            .then(a.id.cmp(&b.id))
    });
    pending
}

/// Score one table for `guest`; `None` when the table cannot take the party
pub fn score_table(
    roster: &GuestRoster,
    weights: &ScoringWeights,
    guest: &Guest,
    table: &Table,
    stage: Option<Point>,
    hall_diagonal: f64,
) -> Option<Recommendation> {
    if !table.enabled || table.capacity == 0 {
        return None;
    }
    let remaining = remaining_places(roster, table);
    let party = guest.party_size();
    if party > remaining {
        return None;
    }

    let mut reasons = Vec::new();

    // Affinity
    let matches: u32 = roster
        .guests_at_table(table.id)
        .filter(|other| other.id != guest.id)
        .map(|other| {
            let same_group = guest.attributes.group_id.is_some()
                && guest.attributes.group_id == other.attributes.group_id;
            u32::from(same_group) + guest.attributes.shared_tags(&other.attributes).count() as u32
        })
        .sum();
    if matches > 0 {
        let factor = matches as f64 / (matches as f64 + 1.0);
        reasons.push(ScoreReason::Affinity {
            matches,
            points: factor * weights.affinity,
        });
    }

    // VIP proximity
    if let (true, Some(anchor)) = (guest.is_vip(), stage) {
        let distance = table.position.distance_to(&anchor);
        let factor = if hall_diagonal > 0.0 {
            1.0 - (distance / hall_diagonal).clamp(0.0, 1.0)
        } else {
            0.0
        };
        reasons.push(ScoreReason::VipProximity {
            distance,
            points: factor * weights.vip_proximity,
        });
    }

    // Capacity fit
    let remaining_after = remaining - party;
    let fit = 1.0 - remaining_after as f64 / table.capacity as f64;
    reasons.push(ScoreReason::CapacityFit {
        remaining_after,
        points: fit * weights.capacity_fit,
    });

    // Side conflict
    if let Some(side) = guest.attributes.side {
        let occupied = roster.occupied_at_table(table.id);
        let opposing: u32 = roster
            .guests_at_table(table.id)
            .filter(|other| other.attributes.side.is_some_and(|s| side.opposes(&s)))
            .map(Guest::party_size)
            .sum();
        if occupied > 0 {
            let share = opposing as f64 / occupied as f64;
            if share > 0.5 {
                reasons.push(ScoreReason::SideConflict {
                    opposing_share: share,
                    points: -share * weights.side_conflict,
                });
            }
        }
    }

    let score = reasons.iter().map(ScoreReason::points).sum();
    Some(Recommendation {
        guest_id: guest.id,
        table_id: table.id,
        table_name: table.name.clone(),
        score,
        reasons,
    })
}

fn by_score(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then(a.table_id.cmp(&b.table_id))
}

/// Top-N candidate tables for one guest, best first
pub fn recommend_for_guest(
    state: &PlanState,
    roster: &GuestRoster,
    config: &PlannerConfig,
    guest: &Guest,
) -> Vec<Recommendation> {
    let stage = stage_anchor(state);
    let diagonal = state.hall.diagonal();
    let mut candidates: Vec<Recommendation> = state
        .tables
        .iter()
        .filter(|t| guest.table_id != Some(t.id))
        .filter_map(|t| score_table(roster, &config.scoring, guest, t, stage, diagonal))
        .collect();
    candidates.sort_by(by_score);
    candidates.truncate(config.recommendation_limit);
    candidates
}

/// Candidates for every unassigned guest, in placement order
pub fn recommendations(
    state: &PlanState,
    roster: &GuestRoster,
    config: &PlannerConfig,
) -> Vec<GuestRecommendations> {
    placement_order(roster)
        .into_iter()
        .map(|guest| GuestRecommendations {
            guest_id: guest.id,
            candidates: recommend_for_guest(state, roster, config, guest),
        })
        .collect()
}
