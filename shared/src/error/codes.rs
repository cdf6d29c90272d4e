//! Unified error codes for the seating planner
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Layout errors (geometry, areas, tables, seats)
//! - 2xxx: Assignment errors (guests, capacity, suggestions)
//! - 3xxx: Collaboration errors (locks)
//! - 4xxx: History / snapshot errors
//! - 9xxx: System errors (persistence, serialization)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a bare `u16` so UI layers in any language can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Layout ====================
    /// Geometry is invalid (too few points, non-positive size, NaN)
    InvalidGeometry = 1001,
    /// Area not found
    AreaNotFound = 1002,
    /// Table not found
    TableNotFound = 1003,
    /// Seat not found
    SeatNotFound = 1004,
    /// Table is locked in place
    TableLocked = 1005,
    /// Table is disabled
    TableDisabled = 1006,
    /// Seat is disabled
    SeatDisabled = 1007,
    /// Operation not available in the active mode
    WrongMode = 1008,
    /// Capacity below one or below current occupancy
    InvalidCapacity = 1009,

    // ==================== 2xxx: Assignment ====================
    /// Guest not found in the roster
    GuestNotFound = 2001,
    /// Table or seat has no room for the party
    CapacityExceeded = 2002,
    /// Suggestion no longer matches the current state
    StaleSuggestion = 2003,

    // ==================== 3xxx: Collaboration ====================
    /// Resource is locked by another editor
    LockConflict = 3001,

    // ==================== 4xxx: History ====================
    /// Snapshot failed validation
    InvalidSnapshot = 4001,
    /// Snapshot schema is newer than this build understands
    SnapshotVersionUnsupported = 4002,
    /// Snapshot checksum does not match its content
    ChecksumMismatch = 4003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Persistence adapter failed
    PersistenceFailed = 9101,
    /// Plan not found in the store
    PlanNotFound = 9102,
    /// Serialization failed
    SerializationFailed = 9103,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Validation rejections are surfaced inline; state is unchanged
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            ErrorCode::ValidationFailed
                | ErrorCode::ValueOutOfRange
                | ErrorCode::InvalidGeometry
                | ErrorCode::TableLocked
                | ErrorCode::TableDisabled
                | ErrorCode::SeatDisabled
                | ErrorCode::WrongMode
                | ErrorCode::InvalidCapacity
                | ErrorCode::CapacityExceeded
        )
    }

    /// Whether the caller may retry the same request later
    pub const fn is_retryable(&self) -> bool {
        matches!(self, ErrorCode::LockConflict | ErrorCode::PersistenceFailed)
    }

    /// Default English message
    pub fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::ValueOutOfRange => "Value out of range",

            // Layout
            ErrorCode::InvalidGeometry => "Invalid geometry",
            ErrorCode::AreaNotFound => "Area not found",
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::SeatNotFound => "Seat not found",
            ErrorCode::TableLocked => "Table is locked in place",
            ErrorCode::TableDisabled => "Table is disabled",
            ErrorCode::SeatDisabled => "Seat is disabled",
            ErrorCode::WrongMode => "Operation not available in this mode",
            ErrorCode::InvalidCapacity => "Invalid table capacity",

            // Assignment
            ErrorCode::GuestNotFound => "Guest not found",
            ErrorCode::CapacityExceeded => "Capacity exceeded",
            ErrorCode::StaleSuggestion => "Suggestion is out of date",

            // Collaboration
            ErrorCode::LockConflict => "Resource is being edited by another collaborator",

            // History
            ErrorCode::InvalidSnapshot => "Invalid snapshot",
            ErrorCode::SnapshotVersionUnsupported => "Snapshot schema version not supported",
            ErrorCode::ChecksumMismatch => "Snapshot checksum mismatch",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::PersistenceFailed => "Persistence failed",
            ErrorCode::PlanNotFound => "Plan not found",
            ErrorCode::SerializationFailed => "Serialization failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Layout
            1001 => Ok(ErrorCode::InvalidGeometry),
            1002 => Ok(ErrorCode::AreaNotFound),
            1003 => Ok(ErrorCode::TableNotFound),
            1004 => Ok(ErrorCode::SeatNotFound),
            1005 => Ok(ErrorCode::TableLocked),
            1006 => Ok(ErrorCode::TableDisabled),
            1007 => Ok(ErrorCode::SeatDisabled),
            1008 => Ok(ErrorCode::WrongMode),
            1009 => Ok(ErrorCode::InvalidCapacity),

            // Assignment
            2001 => Ok(ErrorCode::GuestNotFound),
            2002 => Ok(ErrorCode::CapacityExceeded),
            2003 => Ok(ErrorCode::StaleSuggestion),

            // Collaboration
            3001 => Ok(ErrorCode::LockConflict),

            // History
            4001 => Ok(ErrorCode::InvalidSnapshot),
            4002 => Ok(ErrorCode::SnapshotVersionUnsupported),
            4003 => Ok(ErrorCode::ChecksumMismatch),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9101 => Ok(ErrorCode::PersistenceFailed),
            9102 => Ok(ErrorCode::PlanNotFound),
            9103 => Ok(ErrorCode::SerializationFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[ErrorCode] = &[
        ErrorCode::Success,
        ErrorCode::Unknown,
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::InvalidRequest,
        ErrorCode::ValueOutOfRange,
        ErrorCode::InvalidGeometry,
        ErrorCode::AreaNotFound,
        ErrorCode::TableNotFound,
        ErrorCode::SeatNotFound,
        ErrorCode::TableLocked,
        ErrorCode::TableDisabled,
        ErrorCode::SeatDisabled,
        ErrorCode::WrongMode,
        ErrorCode::InvalidCapacity,
        ErrorCode::GuestNotFound,
        ErrorCode::CapacityExceeded,
        ErrorCode::StaleSuggestion,
        ErrorCode::LockConflict,
        ErrorCode::InvalidSnapshot,
        ErrorCode::SnapshotVersionUnsupported,
        ErrorCode::ChecksumMismatch,
        ErrorCode::InternalError,
        ErrorCode::PersistenceFailed,
        ErrorCode::PlanNotFound,
        ErrorCode::SerializationFailed,
    ];

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::InvalidGeometry.code(), 1001);
        assert_eq!(ErrorCode::CapacityExceeded.code(), 2002);
        assert_eq!(ErrorCode::LockConflict.code(), 3001);
        assert_eq!(ErrorCode::InvalidSnapshot.code(), 4001);
        assert_eq!(ErrorCode::PersistenceFailed.code(), 9101);
    }

    #[test]
    fn test_try_from_covers_every_variant() {
        for code in ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(*code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4), Err(InvalidErrorCode(4)));
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::CapacityExceeded).unwrap();
        assert_eq!(json, "2002");
        let code: ErrorCode = serde_json::from_str("3001").unwrap();
        assert_eq!(code, ErrorCode::LockConflict);
        assert!(serde_json::from_str::<ErrorCode>("77").is_err());
    }

    #[test]
    fn test_classification() {
        assert!(ErrorCode::CapacityExceeded.is_validation());
        assert!(ErrorCode::SeatDisabled.is_validation());
        assert!(!ErrorCode::LockConflict.is_validation());
        assert!(ErrorCode::LockConflict.is_retryable());
        assert!(!ErrorCode::TableNotFound.is_retryable());
        assert!(ErrorCode::Success.is_success());
    }

    #[test]
    fn test_messages_not_empty() {
        for code in ALL {
            assert!(!code.message().is_empty());
        }
    }
}
