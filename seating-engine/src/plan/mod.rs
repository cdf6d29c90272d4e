//! Spatial model: plan state, command actions and event appliers
//!
//! A command is converted into a [`CommandAction`], validated against
//! read-only state, and turned into [`PlanEvent`](shared::plan::PlanEvent)s.
//! Events are then applied by pure [`EventAction`] appliers.

// `traits` ahead of `appliers`: enum_dispatch emits the `EventApplier`
// impl beside whichever of the two it expands last
pub mod traits;

pub mod actions;
pub mod appliers;
pub mod capacity;
pub mod error;
pub mod layout;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use actions::{gated_tables, CommandAction};
pub use appliers::{apply_events, EventAction};
pub use error::{PlanError, PlanResult};
pub use state::{GuestRoster, PlanState};
pub use traits::{CommandContext, CommandHandler, CommandMetadata, EventApplier};
