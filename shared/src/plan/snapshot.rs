//! Plan snapshot - serializable capture of one mode's layout
//!
//! The snapshot includes a `state_checksum` (SHA-256 over the canonical JSON
//! of its content) so exporters and stores can detect corruption or
//! reducer drift. Unknown fields are ignored and optional fields default, so
//! consumers tolerate additive schema evolution.

use super::types::SeatingAssignment;
use crate::error::ErrorCode;
use crate::models::{Area, HallSize, PlanMode, Seat, Table};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Current snapshot schema version
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Snapshot validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot schema version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("snapshot checksum mismatch (expected {expected}, computed {computed})")]
    ChecksumMismatch { expected: String, computed: String },
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(String),
}

impl SnapshotError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SnapshotError::UnsupportedVersion { .. } => ErrorCode::SnapshotVersionUnsupported,
            SnapshotError::ChecksumMismatch { .. } => ErrorCode::ChecksumMismatch,
            SnapshotError::Inconsistent(_) => ErrorCode::InvalidSnapshot,
        }
    }
}

/// Layout of one mode at one history point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub mode: PlanMode,
    #[serde(default)]
    pub hall: HallSize,
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub seats: Vec<Seat>,
    /// Derived from guest records, sorted by guest id
    #[serde(default)]
    pub assignments: Vec<SeatingAssignment>,
    /// Last applied event sequence
    #[serde(default)]
    pub last_sequence: u64,
    #[serde(default)]
    pub created_at: i64,
    /// Hex SHA-256; empty when produced by a tool that does not compute it
    #[serde(default)]
    pub state_checksum: String,
}

fn default_schema_version() -> u32 {
    SNAPSHOT_SCHEMA_VERSION
}

/// Borrowed view hashed by the checksum (excludes bookkeeping fields)
#[derive(Serialize)]
struct ChecksumView<'a> {
    schema_version: u32,
    mode: PlanMode,
    hall: &'a HallSize,
    areas: &'a [Area],
    tables: &'a [Table],
    seats: &'a [Seat],
    assignments: &'a [SeatingAssignment],
}

impl PlanSnapshot {
    /// Empty layout for `mode` with the given hall
    pub fn empty(mode: PlanMode, hall: HallSize) -> Self {
        let mut snapshot = Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            mode,
            hall,
            areas: Vec::new(),
            tables: Vec::new(),
            seats: Vec::new(),
            assignments: Vec::new(),
            last_sequence: 0,
            created_at: crate::util::now_millis(),
            state_checksum: String::new(),
        };
        snapshot.update_checksum();
        snapshot
    }

    /// No areas, tables, seats or assignments
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
            && self.tables.is_empty()
            && self.seats.is_empty()
            && self.assignments.is_empty()
    }

    /// Compute the content checksum (hex SHA-256)
    pub fn compute_checksum(&self) -> String {
        let view = ChecksumView {
            schema_version: self.schema_version,
            mode: self.mode,
            hall: &self.hall,
            areas: &self.areas,
            tables: &self.tables,
            seats: &self.seats,
            assignments: &self.assignments,
        };
        let bytes = serde_json::to_vec(&view).unwrap_or_default();
        crate::util::sha256_hex(&bytes)
    }

    /// Update the state_checksum field based on current state
    pub fn update_checksum(&mut self) {
        self.state_checksum = self.compute_checksum();
    }

    /// Verify that the state_checksum matches computed checksum
    pub fn verify_checksum(&self) -> bool {
        self.state_checksum == self.compute_checksum()
    }

    /// Same layout content, ignoring sequence/timestamps
    pub fn same_content(&self, other: &PlanSnapshot) -> bool {
        self.compute_checksum() == other.compute_checksum()
    }

    /// Check version, checksum and internal consistency
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.schema_version,
                supported: SNAPSHOT_SCHEMA_VERSION,
            });
        }
        if !self.state_checksum.is_empty() {
            let computed = self.compute_checksum();
            if computed != self.state_checksum {
                return Err(SnapshotError::ChecksumMismatch {
                    expected: self.state_checksum.clone(),
                    computed,
                });
            }
        }
        if !self.hall.is_valid() {
            return Err(SnapshotError::Inconsistent("invalid hall size".into()));
        }

        let mut area_ids = HashSet::new();
        for area in &self.areas {
            if !area_ids.insert(area.id) {
                return Err(SnapshotError::Inconsistent(format!("duplicate area id {}", area.id)));
            }
            if area.points.len() < Area::MIN_POINTS || !area.points.iter().all(|p| p.is_finite()) {
                return Err(SnapshotError::Inconsistent(format!("area {} has invalid outline", area.id)));
            }
        }

        let mut table_ids = HashSet::new();
        for table in &self.tables {
            if !table_ids.insert(table.id) {
                return Err(SnapshotError::Inconsistent(format!("duplicate table id {}", table.id)));
            }
            if table.capacity == 0 || !table.size.is_valid() || !table.position.is_finite() {
                return Err(SnapshotError::Inconsistent(format!("table {} is invalid", table.id)));
            }
        }

        // seat id -> enabled
        let mut seat_ids = HashMap::new();
        for seat in &self.seats {
            if seat_ids.insert(seat.id, seat.enabled).is_some() {
                return Err(SnapshotError::Inconsistent(format!("duplicate seat id {}", seat.id)));
            }
        }

        let mut guest_ids = HashSet::new();
        let mut held_seats = HashSet::new();
        for a in &self.assignments {
            if !guest_ids.insert(a.guest_id) {
                return Err(SnapshotError::Inconsistent(format!(
                    "guest {} assigned twice",
                    a.guest_id
                )));
            }
            if a.table_id.is_some_and(|id| !table_ids.contains(&id)) {
                return Err(SnapshotError::Inconsistent(format!(
                    "guest {} references unknown table",
                    a.guest_id
                )));
            }
            if let Some(seat_id) = a.seat_id {
                match seat_ids.get(&seat_id) {
                    None => {
                        return Err(SnapshotError::Inconsistent(format!(
                            "guest {} references unknown seat",
                            a.guest_id
                        )));
                    }
                    Some(false) => {
                        return Err(SnapshotError::Inconsistent(format!(
                            "guest {} holds disabled seat {seat_id}",
                            a.guest_id
                        )));
                    }
                    Some(true) => {}
                }
                if !held_seats.insert(seat_id) {
                    return Err(SnapshotError::Inconsistent(format!(
                        "seat {seat_id} held by more than one guest"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Both layouts of one plan as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub plan_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceremony: Option<PlanSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banquet: Option<PlanSnapshot>,
}

impl PlanDocument {
    pub fn new(plan_id: impl Into<String>) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            plan_id: plan_id.into(),
            ceremony: None,
            banquet: None,
        }
    }

    pub fn get(&self, mode: PlanMode) -> Option<&PlanSnapshot> {
        match mode {
            PlanMode::Ceremony => self.ceremony.as_ref(),
            PlanMode::Banquet => self.banquet.as_ref(),
        }
    }

    /// Upsert-merge: replaces only the patched mode
    pub fn merge(&mut self, patch: PlanPatch) {
        let slot = match patch.mode {
            PlanMode::Ceremony => &mut self.ceremony,
            PlanMode::Banquet => &mut self.banquet,
        };
        *slot = Some(patch.snapshot);
    }
}

/// Partial plan update sent to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPatch {
    pub mode: PlanMode,
    pub snapshot: PlanSnapshot,
}

impl PlanPatch {
    pub fn new(snapshot: PlanSnapshot) -> Self {
        Self {
            mode: snapshot.mode,
            snapshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Point, TableSize};

    fn table(id: i64) -> Table {
        Table {
            id,
            name: format!("Table {id}"),
            position: Point::new(200.0, 200.0),
            size: TableSize::default(),
            rotation: 0.0,
            capacity: 8,
            locked: false,
            enabled: true,
        }
    }

    fn snapshot_with_table() -> PlanSnapshot {
        let mut s = PlanSnapshot::empty(PlanMode::Banquet, HallSize::default());
        s.tables.push(table(1));
        s.assignments.push(SeatingAssignment {
            guest_id: 10,
            table_id: Some(1),
            seat_id: None,
        });
        s.update_checksum();
        s
    }

    #[test]
    fn checksum_ignores_bookkeeping_fields() {
        let a = snapshot_with_table();
        let mut b = a.clone();
        b.last_sequence = 99;
        b.created_at += 1;
        assert!(b.verify_checksum());
        assert!(a.same_content(&b));
        assert_eq!(a.state_checksum.len(), 64);
    }

    #[test]
    fn tampered_content_fails_validation() {
        let mut s = snapshot_with_table();
        s.tables[0].capacity = 2;
        match s.validate() {
            Err(e @ SnapshotError::ChecksumMismatch { .. }) => {
                assert_eq!(e.code(), ErrorCode::ChecksumMismatch)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn newer_schema_rejected() {
        let mut s = snapshot_with_table();
        s.schema_version = SNAPSHOT_SCHEMA_VERSION + 1;
        assert!(matches!(
            s.validate(),
            Err(SnapshotError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn dangling_assignment_rejected() {
        let mut s = snapshot_with_table();
        s.assignments[0].table_id = Some(404);
        s.state_checksum.clear();
        assert!(matches!(s.validate(), Err(SnapshotError::Inconsistent(_))));
    }

    fn snapshot_with_seats() -> PlanSnapshot {
        let mut s = PlanSnapshot::empty(PlanMode::Ceremony, HallSize::default());
        for (id, enabled) in [(1, true), (2, false)] {
            s.seats.push(Seat {
                id,
                position: Point::new(100.0 * id as f64, 100.0),
                row: 0,
                column: id as u32 - 1,
                enabled,
            });
        }
        s.assignments.push(SeatingAssignment {
            guest_id: 10,
            table_id: None,
            seat_id: Some(1),
        });
        s
    }

    #[test]
    fn seated_snapshot_is_valid() {
        assert!(snapshot_with_seats().validate().is_ok());
    }

    #[test]
    fn guest_on_disabled_seat_rejected() {
        let mut s = snapshot_with_seats();
        s.assignments[0].seat_id = Some(2);
        match s.validate() {
            Err(SnapshotError::Inconsistent(msg)) => assert!(msg.contains("disabled seat 2")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn shared_seat_rejected() {
        let mut s = snapshot_with_seats();
        s.assignments.push(SeatingAssignment {
            guest_id: 11,
            table_id: None,
            seat_id: Some(1),
        });
        match s.validate() {
            Err(SnapshotError::Inconsistent(msg)) => assert!(msg.contains("seat 1")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn tolerates_unknown_and_missing_fields() {
        let s: PlanSnapshot =
            serde_json::from_str(r#"{"mode":"ceremony","future_field":[1,2,3]}"#).unwrap();
        assert_eq!(s.schema_version, SNAPSHOT_SCHEMA_VERSION);
        assert!(s.is_empty());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn document_merge_is_per_mode() {
        let mut doc = PlanDocument::new("plan-1");
        doc.merge(PlanPatch::new(snapshot_with_table()));
        assert!(doc.get(PlanMode::Banquet).is_some());
        assert!(doc.get(PlanMode::Ceremony).is_none());

        doc.merge(PlanPatch::new(PlanSnapshot::empty(
            PlanMode::Ceremony,
            HallSize::default(),
        )));
        assert_eq!(doc.get(PlanMode::Banquet).unwrap().tables.len(), 1);
        assert!(doc.get(PlanMode::Ceremony).unwrap().is_empty());
    }
}
