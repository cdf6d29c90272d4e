//! Shared types for the seating planner
//!
//! Data model, command/event/snapshot wire types, error codes and small
//! utilities used by the seating engine and by external collaborators
//! (storage adapters, exporters, the UI layer).

pub mod error;
pub mod models;
pub mod plan;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorCategory, ErrorCode};
pub use plan::{
    CommandError, CommandResponse, PlanCommand, PlanCommandPayload, PlanDocument, PlanEvent,
    PlanEventPayload, PlanEventType, PlanSnapshot,
};
