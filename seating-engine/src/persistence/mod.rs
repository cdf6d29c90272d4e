//! Persistence boundary
//!
//! The core never performs I/O on its own. It talks to two collaborators:
//! - [`PlanStore`]: loads plan documents and upsert-merges per-mode snapshots
//! - [`GuestDirectory`]: source of truth for guests; only assignment fields
//!   are written back
//!
//! [`AutosaveWorker`] debounces snapshot writes and forwards assignment
//! write-backs off the editing path.

pub mod autosave;
pub mod memory;

pub use autosave::{AutosaveHandle, AutosaveWorker, SyncStatus};
pub use memory::{MemoryGuestDirectory, MemoryPlanStore};

use async_trait::async_trait;
use shared::error::ErrorCode;
use shared::models::{AssignmentRef, Guest};
use shared::plan::{PlanDocument, PlanPatch};
use thiserror::Error;

/// Adapter failures; never roll back in-memory state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("Plan not found: {0}")]
    PlanNotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl PersistenceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PersistenceError::PlanNotFound(_) => ErrorCode::PlanNotFound,
            PersistenceError::Serialization(_) => ErrorCode::SerializationFailed,
            PersistenceError::Unavailable(_) | PersistenceError::Storage(_) => {
                ErrorCode::PersistenceFailed
            }
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Serialization(err.to_string())
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Plan storage contract
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Full document; `PlanNotFound` when the plan was never saved
    async fn load_plan(&self, plan_id: &str) -> PersistenceResult<PlanDocument>;

    /// Upsert-merge one mode's snapshot into the stored document
    async fn save_plan(&self, plan_id: &str, patch: PlanPatch) -> PersistenceResult<()>;
}

/// Guest directory contract (read guests, write assignment fields only)
#[async_trait]
pub trait GuestDirectory: Send + Sync {
    async fn load_guests(&self, plan_id: &str) -> PersistenceResult<Vec<Guest>>;

    async fn write_assignment(
        &self,
        plan_id: &str,
        guest_id: i64,
        assignment: AssignmentRef,
    ) -> PersistenceResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_fall_in_system_range() {
        assert_eq!(
            PersistenceError::PlanNotFound("p".into()).code(),
            ErrorCode::PlanNotFound
        );
        assert_eq!(
            PersistenceError::Unavailable("down".into()).code(),
            ErrorCode::PersistenceFailed
        );
        let json_err = serde_json::from_str::<PlanDocument>("{").unwrap_err();
        assert_eq!(
            PersistenceError::from(json_err).code(),
            ErrorCode::SerializationFailed
        );
    }
}
