//! Plan errors

use shared::error::ErrorCode;
use shared::plan::{CommandError, SnapshotError};
use thiserror::Error;

/// Errors raised while validating or executing plan operations
///
/// Every rejection leaves plan state, history and locks untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    // ========== Validation ==========
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Capacity exceeded: {remaining} place(s) left")]
    CapacityExceeded { remaining: u32 },

    #[error("Seat {0} is disabled")]
    SeatDisabled(i64),

    #[error("Table {0} is disabled")]
    TableDisabled(i64),

    #[error("Table {0} is locked in place")]
    TableLocked(i64),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),

    #[error("Operation requires {expected} mode")]
    WrongMode { expected: shared::models::PlanMode },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    // ========== Not found ==========
    #[error("Area not found: {0}")]
    AreaNotFound(i64),

    #[error("Table not found: {0}")]
    TableNotFound(i64),

    #[error("Seat not found: {0}")]
    SeatNotFound(i64),

    #[error("Guest not found: {0}")]
    GuestNotFound(i64),

    // ========== Collaboration ==========
    #[error("Table {resource_id} is being edited by {owner_name}")]
    LockConflict { resource_id: i64, owner_name: String },

    // ========== Suggestions / snapshots ==========
    #[error("Suggestion is out of date: {0}")]
    StaleSuggestion(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    // ========== Boundary ==========
    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type PlanResult<T> = Result<T, PlanError>;

impl PlanError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PlanError::InvalidGeometry(_) => ErrorCode::InvalidGeometry,
            PlanError::CapacityExceeded { .. } => ErrorCode::CapacityExceeded,
            PlanError::SeatDisabled(_) => ErrorCode::SeatDisabled,
            PlanError::TableDisabled(_) => ErrorCode::TableDisabled,
            PlanError::TableLocked(_) => ErrorCode::TableLocked,
            PlanError::InvalidCapacity(_) => ErrorCode::InvalidCapacity,
            PlanError::WrongMode { .. } => ErrorCode::WrongMode,
            PlanError::InvalidOperation(_) => ErrorCode::InvalidRequest,
            PlanError::AreaNotFound(_) => ErrorCode::AreaNotFound,
            PlanError::TableNotFound(_) => ErrorCode::TableNotFound,
            PlanError::SeatNotFound(_) => ErrorCode::SeatNotFound,
            PlanError::GuestNotFound(_) => ErrorCode::GuestNotFound,
            PlanError::LockConflict { .. } => ErrorCode::LockConflict,
            PlanError::StaleSuggestion(_) => ErrorCode::StaleSuggestion,
            PlanError::InvalidSnapshot(e) => e.code(),
            PlanError::Persistence(_) => ErrorCode::PersistenceFailed,
        }
    }

    /// Synchronous validation failure (capacity, geometry, disabled targets)
    pub fn is_validation(&self) -> bool {
        self.code().is_validation()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PlanError::AreaNotFound(_)
                | PlanError::TableNotFound(_)
                | PlanError::SeatNotFound(_)
                | PlanError::GuestNotFound(_)
        )
    }
}

impl From<PlanError> for CommandError {
    fn from(err: PlanError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            PlanError::CapacityExceeded { remaining } => {
                CommandError::new(code, message).with_remaining_seats(remaining)
            }
            PlanError::LockConflict { owner_name, .. } => {
                CommandError::new(code, message).with_lock_owner(owner_name)
            }
            _ => CommandError::new(code, message),
        }
    }
}
