//! In-memory plan state
//!
//! [`PlanState`] holds one mode's layout (the spatial model). Guest
//! assignments live only on the guest records in [`GuestRoster`];
//! "guests at table X" is always derived from the roster.

use shared::models::{Area, Bounds, Guest, HallSize, PlanMode, Seat, Table};
use shared::plan::{PlanSnapshot, SeatingAssignment};
use std::collections::{BTreeMap, HashSet};

/// Layout of one mode
#[derive(Debug, Clone, PartialEq)]
pub struct PlanState {
    pub mode: PlanMode,
    pub hall: HallSize,
    pub areas: Vec<Area>,
    pub tables: Vec<Table>,
    pub seats: Vec<Seat>,
    /// Last applied event sequence
    pub last_sequence: u64,
}

impl PlanState {
    pub fn new(mode: PlanMode) -> Self {
        Self {
            mode,
            hall: HallSize::default(),
            areas: Vec::new(),
            tables: Vec::new(),
            seats: Vec::new(),
            last_sequence: 0,
        }
    }

    /// Layout part of a snapshot (assignments are restored separately)
    pub fn from_snapshot(snapshot: &PlanSnapshot) -> Self {
        Self {
            mode: snapshot.mode,
            hall: snapshot.hall,
            areas: snapshot.areas.clone(),
            tables: snapshot.tables.clone(),
            seats: snapshot.seats.clone(),
            last_sequence: snapshot.last_sequence,
        }
    }

    /// Capture layout plus the assignments that point into it
    pub fn to_snapshot(&self, roster: &GuestRoster) -> PlanSnapshot {
        let mut snapshot = PlanSnapshot::empty(self.mode, self.hall);
        snapshot.areas = self.areas.clone();
        snapshot.tables = self.tables.clone();
        snapshot.seats = self.seats.clone();
        snapshot.assignments = roster.assignments_in(self);
        snapshot.last_sequence = self.last_sequence;
        snapshot.update_checksum();
        snapshot
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty() && self.tables.is_empty() && self.seats.is_empty()
    }

    // ========== Lookups ==========

    pub fn area(&self, id: i64) -> Option<&Area> {
        self.areas.iter().find(|a| a.id == id)
    }

    pub fn area_mut(&mut self, id: i64) -> Option<&mut Area> {
        self.areas.iter_mut().find(|a| a.id == id)
    }

    pub fn table(&self, id: i64) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn table_mut(&mut self, id: i64) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    pub fn seat(&self, id: i64) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    pub fn seat_mut(&mut self, id: i64) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.id == id)
    }

    pub fn has_table(&self, id: i64) -> bool {
        self.table(id).is_some()
    }

    pub fn has_seat(&self, id: i64) -> bool {
        self.seat(id).is_some()
    }

    pub fn table_ids(&self) -> HashSet<i64> {
        self.tables.iter().map(|t| t.id).collect()
    }

    pub fn seat_ids(&self) -> HashSet<i64> {
        self.seats.iter().map(|s| s.id).collect()
    }

    /// Largest id in use (areas, tables, seats)
    pub fn max_id(&self) -> Option<i64> {
        self.areas
            .iter()
            .map(|a| a.id)
            .chain(self.tables.iter().map(|t| t.id))
            .chain(self.seats.iter().map(|s| s.id))
            .max()
    }

    /// Bounding box of every area point, table extent and seat position
    ///
    /// Table extents use rotation-insensitive bounds.
    pub fn content_bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        let mut include = |b: Bounds| {
            bounds = Some(match bounds {
                Some(acc) => acc.union(&b),
                None => b,
            });
        };
        for area in &self.areas {
            if let Some(b) = area.bounds() {
                include(b);
            }
        }
        for table in &self.tables {
            include(table.rotation_insensitive_bounds());
        }
        for seat in &self.seats {
            include(Bounds::from_point(seat.position));
        }
        bounds
    }
}

/// Guest records known to the session, keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestRoster {
    guests: BTreeMap<i64, Guest>,
}

impl GuestRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_guests(guests: impl IntoIterator<Item = Guest>) -> Self {
        Self {
            guests: guests.into_iter().map(|g| (g.id, g)).collect(),
        }
    }

    /// Insert or replace a guest record (directory refresh)
    pub fn upsert(&mut self, guest: Guest) {
        self.guests.insert(guest.id, guest);
    }

    /// Drop a guest removed from the directory
    pub fn remove(&mut self, guest_id: i64) -> Option<Guest> {
        self.guests.remove(&guest_id)
    }

    pub fn get(&self, guest_id: i64) -> Option<&Guest> {
        self.guests.get(&guest_id)
    }

    pub fn get_mut(&mut self, guest_id: i64) -> Option<&mut Guest> {
        self.guests.get_mut(&guest_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Guest> {
        self.guests.values()
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    // ========== Derived indexes ==========

    pub fn guests_at_table(&self, table_id: i64) -> impl Iterator<Item = &Guest> {
        self.guests
            .values()
            .filter(move |g| g.table_id == Some(table_id))
    }

    /// People at the table: Σ(1 + companions)
    pub fn occupied_at_table(&self, table_id: i64) -> u32 {
        self.guests_at_table(table_id).map(Guest::party_size).sum()
    }

    pub fn seat_holder(&self, seat_id: i64) -> Option<&Guest> {
        self.guests.values().find(|g| g.seat_id == Some(seat_id))
    }

    /// Per-table occupancy for every table that has guests
    pub fn occupancy(&self) -> BTreeMap<i64, u32> {
        let mut map = BTreeMap::new();
        for guest in self.guests.values() {
            if let Some(table_id) = guest.table_id {
                *map.entry(table_id).or_insert(0) += guest.party_size();
            }
        }
        map
    }

    /// Assignments pointing at tables or seats of `state`, sorted by guest id
    pub fn assignments_in(&self, state: &PlanState) -> Vec<SeatingAssignment> {
        let tables = state.table_ids();
        let seats = state.seat_ids();
        self.guests
            .values()
            .filter_map(|g| {
                let table_id = g.table_id.filter(|id| tables.contains(id));
                let seat_id = g.seat_id.filter(|id| seats.contains(id));
                (table_id.is_some() || seat_id.is_some()).then_some(SeatingAssignment {
                    guest_id: g.id,
                    table_id,
                    seat_id,
                })
            })
            .collect()
    }

    /// First table in `snapshot` whose listed guests exceed its capacity,
    /// as `(table_id, occupied, capacity)`
    ///
    /// Party sizes come from this roster; guests it does not know are skipped.
    pub fn overfull_table(&self, snapshot: &PlanSnapshot) -> Option<(i64, u32, u32)> {
        let mut occupied: BTreeMap<i64, u32> = BTreeMap::new();
        for a in &snapshot.assignments {
            let (Some(table_id), Some(guest)) = (a.table_id, self.guests.get(&a.guest_id)) else {
                continue;
            };
            *occupied.entry(table_id).or_default() += guest.party_size();
        }
        snapshot.tables.iter().find_map(|t| {
            let used = occupied.get(&t.id).copied().unwrap_or(0);
            (used > t.capacity).then_some((t.id, used, t.capacity))
        })
    }

    /// Re-hydrate assignment fields for one mode from a snapshot
    ///
    /// A guest whose current reference points into `other` (the other mode's
    /// layout) keeps it, whatever `assignments` says; everything else follows
    /// `assignments`. Returns the guests whose fields changed.
    pub fn restore_assignments(
        &mut self,
        assignments: &[SeatingAssignment],
        other: &PlanState,
    ) -> Vec<i64> {
        let listed: BTreeMap<i64, &SeatingAssignment> =
            assignments.iter().map(|a| (a.guest_id, a)).collect();
        let other_tables = other.table_ids();
        let other_seats = other.seat_ids();

        let mut changed = Vec::new();
        for guest in self.guests.values_mut() {
            let entry = listed.get(&guest.id);
            let keep_table = guest.table_id.filter(|id| other_tables.contains(id));
            let keep_seat = guest.seat_id.filter(|id| other_seats.contains(id));

            let table_id = keep_table.or_else(|| entry.and_then(|a| a.table_id));
            let seat_id = keep_seat.or_else(|| entry.and_then(|a| a.seat_id));

            if guest.table_id != table_id || guest.seat_id != seat_id {
                guest.table_id = table_id;
                guest.seat_id = seat_id;
                changed.push(guest.id);
            }
        }
        changed
    }
}
