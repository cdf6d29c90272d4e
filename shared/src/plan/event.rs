//! Plan events - immutable facts recorded after command processing

use super::types::TablePosition;
use crate::models::{Area, HallSize, PlanMode, Point, Seat, Table, TableSize};
use serde::{Deserialize, Serialize};

/// Plan event - one committed mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEvent {
    /// Event unique ID
    pub event_id: String,
    /// Session-wide sequence number (for ordering and replay)
    pub sequence: u64,
    /// Layout the event applies to
    pub mode: PlanMode,
    /// Timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Editor who triggered this event
    pub editor_id: String,
    /// Command that triggered this event
    pub command_id: String,
    /// Event type
    pub event_type: PlanEventType,
    /// Event payload
    pub payload: PlanEventPayload,
}

/// Event type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanEventType {
    // Areas
    AreaAdded,
    AreaUpdated,
    AreaDeleted,

    // Tables
    TableAdded,
    TableMoved,
    TableResized,
    TableRotated,
    TableUpdated,
    TableDeleted,
    TablesReplaced,
    TablesRepositioned,

    // Seats
    SeatToggled,
    SeatsReplaced,

    // Assignments
    GuestTableAssigned,
    GuestSeatAssigned,

    // Hall
    HallResized,
}

impl std::fmt::Display for PlanEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanEventType::AreaAdded => write!(f, "AREA_ADDED"),
            PlanEventType::AreaUpdated => write!(f, "AREA_UPDATED"),
            PlanEventType::AreaDeleted => write!(f, "AREA_DELETED"),
            PlanEventType::TableAdded => write!(f, "TABLE_ADDED"),
            PlanEventType::TableMoved => write!(f, "TABLE_MOVED"),
            PlanEventType::TableResized => write!(f, "TABLE_RESIZED"),
            PlanEventType::TableRotated => write!(f, "TABLE_ROTATED"),
            PlanEventType::TableUpdated => write!(f, "TABLE_UPDATED"),
            PlanEventType::TableDeleted => write!(f, "TABLE_DELETED"),
            PlanEventType::TablesReplaced => write!(f, "TABLES_REPLACED"),
            PlanEventType::TablesRepositioned => write!(f, "TABLES_REPOSITIONED"),
            PlanEventType::SeatToggled => write!(f, "SEAT_TOGGLED"),
            PlanEventType::SeatsReplaced => write!(f, "SEATS_REPLACED"),
            PlanEventType::GuestTableAssigned => write!(f, "GUEST_TABLE_ASSIGNED"),
            PlanEventType::GuestSeatAssigned => write!(f, "GUEST_SEAT_ASSIGNED"),
            PlanEventType::HallResized => write!(f, "HALL_RESIZED"),
        }
    }
}

/// Event payload variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanEventPayload {
    // ========== Areas ==========
    AreaAdded {
        area: Area,
    },
    /// Full area after the patch
    AreaUpdated {
        area: Area,
    },
    AreaDeleted {
        area_id: i64,
    },

    // ========== Tables ==========
    /// Also used for duplicates
    TableAdded {
        table: Table,
    },
    TableMoved {
        table_id: i64,
        position: Point,
    },
    TableResized {
        table_id: i64,
        size: TableSize,
    },
    TableRotated {
        table_id: i64,
        /// Absolute rotation after the change, degrees in [0, 360)
        rotation: f64,
    },
    /// Full table after the patch
    TableUpdated {
        table: Table,
    },
    TableDeleted {
        table_id: i64,
        /// Guests whose table assignment was cleared
        released_guests: Vec<i64>,
    },
    TablesReplaced {
        tables: Vec<Table>,
        released_guests: Vec<i64>,
    },
    TablesRepositioned {
        positions: Vec<TablePosition>,
    },

    // ========== Seats ==========
    SeatToggled {
        seat_id: i64,
        enabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        released_guest: Option<i64>,
    },
    SeatsReplaced {
        seats: Vec<Seat>,
        released_guests: Vec<i64>,
    },

    // ========== Assignments ==========
    /// Single mutation covering both the cleared and the new assignment
    GuestTableAssigned {
        guest_id: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        previous_table_id: Option<i64>,
        table_id: Option<i64>,
    },
    GuestSeatAssigned {
        guest_id: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        previous_seat_id: Option<i64>,
        seat_id: Option<i64>,
    },

    // ========== Hall ==========
    HallResized {
        hall: HallSize,
    },
}

impl PlanEventPayload {
    pub fn event_type(&self) -> PlanEventType {
        match self {
            Self::AreaAdded { .. } => PlanEventType::AreaAdded,
            Self::AreaUpdated { .. } => PlanEventType::AreaUpdated,
            Self::AreaDeleted { .. } => PlanEventType::AreaDeleted,
            Self::TableAdded { .. } => PlanEventType::TableAdded,
            Self::TableMoved { .. } => PlanEventType::TableMoved,
            Self::TableResized { .. } => PlanEventType::TableResized,
            Self::TableRotated { .. } => PlanEventType::TableRotated,
            Self::TableUpdated { .. } => PlanEventType::TableUpdated,
            Self::TableDeleted { .. } => PlanEventType::TableDeleted,
            Self::TablesReplaced { .. } => PlanEventType::TablesReplaced,
            Self::TablesRepositioned { .. } => PlanEventType::TablesRepositioned,
            Self::SeatToggled { .. } => PlanEventType::SeatToggled,
            Self::SeatsReplaced { .. } => PlanEventType::SeatsReplaced,
            Self::GuestTableAssigned { .. } => PlanEventType::GuestTableAssigned,
            Self::GuestSeatAssigned { .. } => PlanEventType::GuestSeatAssigned,
            Self::HallResized { .. } => PlanEventType::HallResized,
        }
    }

    /// Guests whose assignment fields this event changes
    pub fn touched_guests(&self) -> Vec<i64> {
        match self {
            Self::TableDeleted {
                released_guests, ..
            }
            | Self::TablesReplaced {
                released_guests, ..
            }
            | Self::SeatsReplaced {
                released_guests, ..
            } => released_guests.clone(),
            Self::SeatToggled { released_guest, .. } => released_guest.iter().copied().collect(),
            Self::GuestTableAssigned { guest_id, .. } | Self::GuestSeatAssigned { guest_id, .. } => {
                vec![*guest_id]
            }
            _ => Vec::new(),
        }
    }
}

impl PlanEvent {
    pub fn new(
        sequence: u64,
        mode: PlanMode,
        editor_id: String,
        command_id: String,
        timestamp: i64,
        payload: PlanEventPayload,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            sequence,
            mode,
            timestamp,
            editor_id,
            command_id,
            event_type: payload.event_type(),
            payload,
        }
    }
}
