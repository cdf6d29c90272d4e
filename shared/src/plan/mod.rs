//! Plan command / event / snapshot types
//!
//! - Commands: requests from an editor to modify the plan
//! - Events: immutable facts recorded after command processing
//! - Snapshots: serializable capture of one mode's layout

pub mod command;
pub mod event;
pub mod snapshot;
pub mod types;

// Re-exports
pub use command::{PlanCommand, PlanCommandPayload};
pub use event::{PlanEvent, PlanEventPayload, PlanEventType};
pub use snapshot::{PlanDocument, PlanPatch, PlanSnapshot, SNAPSHOT_SCHEMA_VERSION, SnapshotError};
pub use types::*;
