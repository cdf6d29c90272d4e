//! AddArea command handler

use crate::plan::error::{PlanError, PlanResult};
use crate::plan::traits::{CommandContext, CommandHandler, CommandMetadata};
use shared::models::{Area, AreaKind, Point};
use shared::plan::{PlanEvent, PlanEventPayload};

/// AddArea action
#[derive(Debug, Clone)]
pub struct AddAreaAction {
    pub points: Vec<Point>,
    pub kind: AreaKind,
}

/// Outline must have at least two finite points
pub(crate) fn validate_outline(points: &[Point]) -> PlanResult<()> {
    if points.len() < Area::MIN_POINTS {
        return Err(PlanError::InvalidGeometry(format!(
            "area needs at least {} points, got {}",
            Area::MIN_POINTS,
            points.len()
        )));
    }
    if !points.iter().all(Point::is_finite) {
        return Err(PlanError::InvalidGeometry(
            "area points must be finite".to_string(),
        ));
    }
    Ok(())
}

impl CommandHandler for AddAreaAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> PlanResult<Vec<PlanEvent>> {
        validate_outline(&self.points)?;

        let area = Area {
            id: ctx.allocate_id(),
            kind: self.kind,
            points: self.points.clone(),
        };
        Ok(vec![ctx.event(metadata, PlanEventPayload::AreaAdded { area })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::state::GuestRoster;
    use crate::plan::testing::*;

    #[test]
    fn test_add_area_success() {
        let fx = Fixture::new(create_banquet_state(), GuestRoster::new());
        let mut ctx = fx.ctx();
        let action = AddAreaAction {
            points: vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(50.0, 80.0)],
            kind: AreaKind::Stage,
        };
        let events = action.execute(&mut ctx, &create_test_metadata()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].sequence, 1);
        match &events[0].payload {
            PlanEventPayload::AreaAdded { area } => {
                assert_eq!(area.id, 1_000);
                assert_eq!(area.kind, AreaKind::Stage);
                assert_eq!(area.points.len(), 3);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_add_area_rejects_single_point() {
        let fx = Fixture::new(create_banquet_state(), GuestRoster::new());
        let action = AddAreaAction {
            points: vec![Point::new(0.0, 0.0)],
            kind: AreaKind::Free,
        };
        let err = action
            .execute(&mut fx.ctx(), &create_test_metadata())
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidGeometry(_)));
    }

    #[test]
    fn test_add_area_rejects_nan() {
        let fx = Fixture::new(create_banquet_state(), GuestRoster::new());
        let action = AddAreaAction {
            points: vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)],
            kind: AreaKind::Aisle,
        };
        assert!(action.execute(&mut fx.ctx(), &create_test_metadata()).is_err());
    }
}
