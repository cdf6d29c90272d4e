//! UpdateArea command handler

use super::add_area::validate_outline;
use crate::plan::error::{PlanError, PlanResult};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::AreaUpdate;
use shared::plan::{PlanEvent, PlanEventPayload};

/// UpdateArea action
#[derive(Debug, Clone)]
pub struct UpdateAreaAction {
    pub area_id: i64,
    pub patch: AreaUpdate,
}

impl CommandHandler for UpdateAreaAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        let current = ctx
            .state
            .area(self.area_id)
            .ok_or(PlanError::AreaNotFound(self.area_id))?;

        let mut area = current.clone();
        if let Some(points) = &self.patch.points {
            validate_outline(points)?;
            area.points = points.clone();
        }
        if let Some(kind) = self.patch.kind {
            area.kind = kind;
        }

        Ok(vec![ctx.event(metadata, PlanEventPayload::AreaUpdated { area })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::state::GuestRoster;
    use crate::plan::testing::*;
    use shared::models::{Area, AreaKind, Point};

    fn fixture() -> Fixture {
        let mut state = create_banquet_state();
        state.areas.push(Area {
            id: 5,
            kind: AreaKind::Free,
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
        });
        Fixture::new(state, GuestRoster::new())
    }

    #[test]
    fn test_update_area_kind_only() {
        let fx = fixture();
        let action = UpdateAreaAction {
            area_id: 5,
            patch: AreaUpdate {
                points: None,
                kind: Some(AreaKind::Obstacle),
            },
        };
        let events = action.execute(&mut fx.ctx(), &create_test_metadata()).unwrap();
        match &events[0].payload {
            PlanEventPayload::AreaUpdated { area } => {
                assert_eq!(area.kind, AreaKind::Obstacle);
                assert_eq!(area.points.len(), 2);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_update_area_validates_points() {
        let fx = fixture();
        let action = UpdateAreaAction {
            area_id: 5,
            patch: AreaUpdate {
                points: Some(vec![]),
                kind: None,
            },
        };
        assert!(matches!(
            action.execute(&mut fx.ctx(), &create_test_metadata()),
            Err(PlanError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_update_missing_area() {
        let fx = fixture();
        let action = UpdateAreaAction {
            area_id: 99,
            patch: AreaUpdate::default(),
        };
        assert_eq!(
            action.execute(&mut fx.ctx(), &create_test_metadata()),
            Err(PlanError::AreaNotFound(99))
        );
    }
}
