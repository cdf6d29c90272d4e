//! Opening a session from the persistence boundary

use super::PlanSession;
use crate::core::PlannerConfig;
use crate::locks::LockTable;
use crate::persistence::{GuestDirectory, PersistenceError, PlanStore};
use crate::plan::{PlanError, PlanResult};
use shared::models::{EditorIdentity, PlanMode};

impl From<PersistenceError> for PlanError {
    fn from(err: PersistenceError) -> Self {
        PlanError::Persistence(err.to_string())
    }
}

impl PlanSession {
    /// Load layouts from the store and guests from the directory
    ///
    /// A plan the store has never seen opens empty. Guest assignment fields
    /// come from the directory; references to unknown tables/seats are
    /// cleared.
    pub async fn load(
        plan_id: &str,
        editor: EditorIdentity,
        config: PlannerConfig,
        locks: LockTable,
        store: &dyn PlanStore,
        directory: &dyn GuestDirectory,
    ) -> PlanResult<Self> {
        let guests = directory.load_guests(plan_id).await?;
        let document = match store.load_plan(plan_id).await {
            Ok(document) => Some(document),
            Err(PersistenceError::PlanNotFound(_)) => {
                tracing::info!(plan_id = %plan_id, "No saved plan, starting empty");
                None
            }
            Err(e) => {
                tracing::error!(plan_id = %plan_id, error = %e, "Failed to load plan");
                return Err(e.into());
            }
        };

        let mut session = Self::with_lock_table(plan_id, editor, config, locks);
        if let Some(document) = document {
            for mode in PlanMode::ALL {
                if let Some(snapshot) = document.get(mode) {
                    snapshot.validate()?;
                    session.install_layout(snapshot);
                }
            }
        }
        session.set_guests(guests);

        let bounds = session.state().content_bounds();
        session.viewport.update_content_bounds(bounds);

        tracing::info!(
            plan_id = %plan_id,
            guests = session.roster.len(),
            ceremony_seats = session.ceremony.seats.len(),
            banquet_tables = session.banquet.tables.len(),
            "Plan session loaded"
        );
        Ok(session)
    }
}
