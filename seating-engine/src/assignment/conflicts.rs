//! Conflict detection
//!
//! Scans the active layout and reports [`Suggestion`]s:
//! - over-capacity tables (high)
//! - tables outside the hall or crossing the boundary outline (high)
//! - tables overlapping an obstacle area (high)
//! - groups split across tables that one table could hold (medium)
//! - side guests outnumbered at a table while a table of their side has
//!   room (medium)
//! - tables closer than the minimum spacing (medium)
//!
//! Output order is stable: high severity first, then table id, then id.

use crate::core::PlannerConfig;
use crate::plan::capacity::remaining_places;
use crate::plan::state::{GuestRoster, PlanState};
use serde::{Deserialize, Serialize};
use shared::models::geometry::polygon_contains;
use shared::models::{AreaKind, Guest, GuestSide, Point, Table};
use std::collections::BTreeMap;

/// Conflict severity; `High` sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

/// What triggered a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    OverCapacity,
    OutOfBounds,
    OutsideBoundary,
    ObstacleOverlap,
    GroupSplit,
    SideSplit,
    TightSpacing,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OverCapacity => "over-capacity",
            Self::OutOfBounds => "out-of-bounds",
            Self::OutsideBoundary => "outside-boundary",
            Self::ObstacleOverlap => "obstacle-overlap",
            Self::GroupSplit => "group-split",
            Self::SideSplit => "side-split",
            Self::TightSpacing => "tight-spacing",
        }
    }
}

/// Remediation attached to a suggestion
///
/// Applying one always goes back through validated commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SuggestionAction {
    Reassign {
        guest_id: i64,
        from_table_id: i64,
        to_table_id: i64,
    },
    FixPosition {
        table_id: i64,
        new_position: Point,
    },
    FocusTable {
        table_id: i64,
    },
}

/// A detected conflict plus its remediation actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Stable id derived from kind and table id(s)
    pub id: String,
    pub table_id: i64,
    pub kind: ConflictKind,
    pub severity: Severity,
    pub message: String,
    pub actions: Vec<SuggestionAction>,
}

impl Suggestion {
    fn new(
        id: String,
        table: &Table,
        kind: ConflictKind,
        severity: Severity,
        message: String,
    ) -> Self {
        Self {
            id,
            table_id: table.id,
            kind,
            severity,
            message,
            actions: Vec::new(),
        }
    }

    fn with_action(mut self, action: SuggestionAction) -> Self {
        self.actions.push(action);
        self
    }
}

/// Run every check over the layout
pub fn detect_conflicts(
    state: &PlanState,
    roster: &GuestRoster,
    config: &PlannerConfig,
) -> Vec<Suggestion> {
    let mut out = Vec::new();
    over_capacity(state, roster, &mut out);
    placement(state, &mut out);
    group_splits(state, roster, &mut out);
    side_splits(state, roster, &mut out);
    tight_spacing(state, config, &mut out);

    out.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then(a.table_id.cmp(&b.table_id))
            .then_with(|| a.id.cmp(&b.id))
    });
    out
}

// ========== Capacity ==========

fn over_capacity(state: &PlanState, roster: &GuestRoster, out: &mut Vec<Suggestion>) {
    for table in &state.tables {
        let occupied = roster.occupied_at_table(table.id);
        if occupied <= table.capacity {
            continue;
        }
        let mut suggestion = Suggestion::new(
            format!("{}-{}", ConflictKind::OverCapacity.as_str(), table.id),
            table,
            ConflictKind::OverCapacity,
            Severity::High,
            format!(
                "{} seats {} people but holds only {}",
                table.name, occupied, table.capacity
            ),
        );

        // Move the smallest parties out until the table fits, where room exists
        let mut parties: Vec<&Guest> = roster.guests_at_table(table.id).collect();
        parties.sort_by_key(|g| (g.party_size(), g.id));
        let mut excess = occupied - table.capacity;
        let mut free: BTreeMap<i64, u32> = state
            .tables
            .iter()
            .filter(|t| t.id != table.id && t.enabled)
            .map(|t| (t.id, remaining_places(roster, t)))
            .collect();
        for guest in parties {
            if excess == 0 {
                break;
            }
            let target = free
                .iter_mut()
                .find(|(_, remaining)| **remaining >= guest.party_size());
            if let Some((to_table_id, remaining)) = target {
                *remaining -= guest.party_size();
                excess = excess.saturating_sub(guest.party_size());
                suggestion = suggestion.with_action(SuggestionAction::Reassign {
                    guest_id: guest.id,
                    from_table_id: table.id,
                    to_table_id: *to_table_id,
                });
            }
        }
        out.push(suggestion.with_action(SuggestionAction::FocusTable { table_id: table.id }));
    }
}

// ========== Placement ==========

fn placement(state: &PlanState, out: &mut Vec<Suggestion>) {
    let hall_bounds = state.hall.bounds();
    let boundaries: Vec<&[Point]> = state
        .areas
        .iter()
        .filter(|a| a.kind == AreaKind::Boundary && a.is_polygon())
        .map(|a| a.points.as_slice())
        .collect();

    for table in &state.tables {
        let bounds = table.bounds();
        let footprint = table.footprint();

        if !hall_bounds.contains(&bounds) {
            let (half_w, half_h) = (bounds.width() / 2.0, bounds.height() / 2.0);
            let clamp = |v: f64, half: f64, extent: f64| {
                if 2.0 * half >= extent {
                    extent / 2.0
                } else {
                    v.clamp(half, extent - half)
                }
            };
            let new_position = Point::new(
                clamp(table.position.x, half_w, state.hall.width),
                clamp(table.position.y, half_h, state.hall.height),
            );
            out.push(
                Suggestion::new(
                    format!("{}-{}", ConflictKind::OutOfBounds.as_str(), table.id),
                    table,
                    ConflictKind::OutOfBounds,
                    Severity::High,
                    format!("{} extends beyond the hall", table.name),
                )
                .with_action(SuggestionAction::FixPosition {
                    table_id: table.id,
                    new_position,
                })
                .with_action(SuggestionAction::FocusTable { table_id: table.id }),
            );
            continue;
        }

        let outside = boundaries.iter().any(|outline| {
            !polygon_contains(outline, &table.position) || footprint.crosses_outline(outline, true)
        });
        if outside {
            out.push(
                Suggestion::new(
                    format!("{}-{}", ConflictKind::OutsideBoundary.as_str(), table.id),
                    table,
                    ConflictKind::OutsideBoundary,
                    Severity::High,
                    format!("{} is outside the venue perimeter", table.name),
                )
                .with_action(SuggestionAction::FocusTable { table_id: table.id }),
            );
            continue;
        }

        for area in state
            .areas
            .iter()
            .filter(|a| a.kind == AreaKind::Obstacle)
        {
            if footprint.intersects_outline(&area.points, area.is_polygon()) {
                out.push(
                    Suggestion::new(
                        format!(
                            "{}-{}-{}",
                            ConflictKind::ObstacleOverlap.as_str(),
                            table.id,
                            area.id
                        ),
                        table,
                        ConflictKind::ObstacleOverlap,
                        Severity::High,
                        format!("{} overlaps an obstacle", table.name),
                    )
                    .with_action(SuggestionAction::FocusTable { table_id: table.id }),
                );
            }
        }
    }
}

// ========== Groups ==========

fn group_splits(state: &PlanState, roster: &GuestRoster, out: &mut Vec<Suggestion>) {
    // group -> table -> guests
    let mut groups: BTreeMap<&str, BTreeMap<i64, Vec<&Guest>>> = BTreeMap::new();
    for guest in roster.iter() {
        let (Some(group), Some(table_id)) = (guest.attributes.group_id.as_deref(), guest.table_id)
        else {
            continue;
        };
        if !state.has_table(table_id) {
            continue;
        }
        groups
            .entry(group)
            .or_default()
            .entry(table_id)
            .or_default()
            .push(guest);
    }

    for (group, tables) in groups {
        if tables.len() < 2 {
            continue;
        }
        let people = |guests: &Vec<&Guest>| guests.iter().map(|g| g.party_size()).sum::<u32>();

        // Largest share wins; ties go to the lower table id
        let Some((&main_id, _)) = tables
            .iter()
            .max_by(|a, b| people(a.1).cmp(&people(b.1)).then(b.0.cmp(a.0)))
        else {
            continue;
        };
        let Some(main) = state.table(main_id) else {
            continue;
        };
        if !main.enabled {
            continue;
        }
        let stragglers: Vec<&Guest> = tables
            .iter()
            .filter(|(id, _)| **id != main_id)
            .flat_map(|(_, guests)| guests.iter().copied())
            .collect();
        let moving: u32 = stragglers.iter().map(|g| g.party_size()).sum();
        if moving > remaining_places(roster, main) {
            continue;
        }

        let mut suggestion = Suggestion::new(
            format!("{}-{}-{}", ConflictKind::GroupSplit.as_str(), main_id, group),
            main,
            ConflictKind::GroupSplit,
            Severity::Medium,
            format!(
                "Group {group} is split across {} tables and fits at {}",
                tables.len(),
                main.name
            ),
        );
        for guest in stragglers {
            if let Some(from_table_id) = guest.table_id {
                suggestion = suggestion.with_action(SuggestionAction::Reassign {
                    guest_id: guest.id,
                    from_table_id,
                    to_table_id: main_id,
                });
            }
        }
        out.push(suggestion);
    }
}

fn side_label(side: GuestSide) -> &'static str {
    match side {
        GuestSide::Bride => "bride",
        GuestSide::Groom => "groom",
        GuestSide::Both => "both",
    }
}

/// Guests of one side seated where the opposing side outnumbers them, when
/// a table their side already leads can take all of them
fn side_splits(state: &PlanState, roster: &GuestRoster, out: &mut Vec<Suggestion>) {
    // table -> side -> guests
    let mut seated: BTreeMap<i64, BTreeMap<GuestSide, Vec<&Guest>>> = BTreeMap::new();
    for guest in roster.iter() {
        let (Some(side @ (GuestSide::Bride | GuestSide::Groom)), Some(table_id)) =
            (guest.attributes.side, guest.table_id)
        else {
            continue;
        };
        if !state.has_table(table_id) {
            continue;
        }
        seated
            .entry(table_id)
            .or_default()
            .entry(side)
            .or_default()
            .push(guest);
    }
    let people = |table_id: i64, side: GuestSide| -> u32 {
        seated
            .get(&table_id)
            .and_then(|sides| sides.get(&side))
            .map(|guests| guests.iter().map(|g| g.party_size()).sum())
            .unwrap_or(0)
    };

    for (&table_id, sides) in &seated {
        for (&side, guests) in sides {
            let opposing = match side {
                GuestSide::Bride => GuestSide::Groom,
                _ => GuestSide::Bride,
            };
            let own = people(table_id, side);
            if own >= people(table_id, opposing) {
                continue;
            }

            // Strongest lead for this side; ties go to the lower table id
            let Some(target) = state
                .tables
                .iter()
                .filter(|t| t.enabled && t.id != table_id)
                .filter(|t| people(t.id, side) > people(t.id, opposing))
                .filter(|t| remaining_places(roster, t) >= own)
                .max_by(|a, b| {
                    people(a.id, side)
                        .cmp(&people(b.id, side))
                        .then(b.id.cmp(&a.id))
                })
            else {
                continue;
            };
            let Some(source) = state.table(table_id) else {
                continue;
            };

            let label = side_label(side);
            let mut suggestion = Suggestion::new(
                format!("{}-{}-{}", ConflictKind::SideSplit.as_str(), table_id, label),
                source,
                ConflictKind::SideSplit,
                Severity::Medium,
                format!(
                    "{own} {label}-side guests are outnumbered at {} and fit at {}",
                    source.name, target.name
                ),
            );
            for guest in guests {
                suggestion = suggestion.with_action(SuggestionAction::Reassign {
                    guest_id: guest.id,
                    from_table_id: table_id,
                    to_table_id: target.id,
                });
            }
            out.push(suggestion);
        }
    }
}

// ========== Spacing ==========

fn tight_spacing(state: &PlanState, config: &PlannerConfig, out: &mut Vec<Suggestion>) {
    let mut tables: Vec<&Table> = state.tables.iter().collect();
    tables.sort_by_key(|t| t.id);

    for (i, first) in tables.iter().enumerate() {
        for second in &tables[i + 1..] {
            let distance = first.position.distance_to(&second.position);
            if distance >= config.min_table_spacing {
                continue;
            }
            // Push the second table out along the line between centres
            let (ux, uy) = if distance > f64::EPSILON {
                (
                    (second.position.x - first.position.x) / distance,
                    (second.position.y - first.position.y) / distance,
                )
            } else {
                (1.0, 0.0)
            };
            let new_position = first.position.offset(
                ux * config.target_table_spacing,
                uy * config.target_table_spacing,
            );
            out.push(
                Suggestion::new(
                    format!(
                        "{}-{}-{}",
                        ConflictKind::TightSpacing.as_str(),
                        first.id,
                        second.id
                    ),
                    second,
                    ConflictKind::TightSpacing,
                    Severity::Medium,
                    format!(
                        "{} is only {:.0} units from {}",
                        second.name, distance, first.name
                    ),
                )
                .with_action(SuggestionAction::FixPosition {
                    table_id: second.id,
                    new_position,
                }),
            );
        }
    }
}
