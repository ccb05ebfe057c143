use crate::config::GizmoAxis;
use crate::session::DragSnapshot;
use crate::solver::{SolveInput, TransformSolve, TransformUpdate};

/// Scales the object along one of its local axes, or uniformly.
///
/// Always works in local space. Snapping does not apply.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScaleSolver {
    pub axis: GizmoAxis,
}

impl TransformSolve for ScaleSolver {
    fn solve(&self, snapshot: &DragSnapshot, input: &SolveInput) -> TransformUpdate {
        let old = snapshot.scale;
        let delta = (input.point - snapshot.offset) * snapshot.parent_inverse_scale;

        if self.axis == GizmoAxis::XYZ {
            let largest = old.max_element();
            if largest.abs() < f64::EPSILON {
                return TransformUpdate::Scale(old);
            }
            return TransformUpdate::Scale(old * (1.0 + delta.y / largest));
        }

        let Some(component) = self.axis.single_component() else {
            return TransformUpdate::Scale(old);
        };

        // old * (1 + d / old), without dividing by a zero scale
        let i = component.index();
        let local = snapshot.world_rotation.inverse() * delta;
        let mut scale = old;
        scale[i] = old[i] + local[i];

        TransformUpdate::Scale(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{DQuat, DVec3};
    use crate::solver::tests::{input, snapshot};
    use std::f64::consts::FRAC_PI_2;

    fn scale(axis: GizmoAxis, snapshot: &DragSnapshot, point: DVec3) -> DVec3 {
        match (ScaleSolver { axis }).solve(snapshot, &input(point)) {
            TransformUpdate::Scale(scale) => scale,
            other => panic!("unexpected update {other:?}"),
        }
    }

    #[test]
    fn uniform_scale_follows_vertical_delta() {
        let snapshot = snapshot(DVec3::ZERO, DQuat::IDENTITY, DVec3::ONE, DVec3::ZERO);
        let result = scale(GizmoAxis::XYZ, &snapshot, DVec3::new(0.3, 0.5, 0.0));
        assert!(result.abs_diff_eq(DVec3::splat(1.5), 1e-12));
    }

    #[test]
    fn uniform_scale_keeps_proportions() {
        let old = DVec3::new(1.0, 2.0, 4.0);
        let snapshot = snapshot(DVec3::ZERO, DQuat::IDENTITY, old, DVec3::ZERO);
        let result = scale(GizmoAxis::XYZ, &snapshot, DVec3::new(0.0, 2.0, 0.0));
        assert!(result.abs_diff_eq(DVec3::new(1.5, 3.0, 6.0), 1e-12));
    }

    #[test]
    fn single_axis_scale_only_changes_that_axis() {
        let old = DVec3::new(2.0, 3.0, 4.0);
        let snapshot = snapshot(DVec3::ZERO, DQuat::from_rotation_z(FRAC_PI_2), old, DVec3::ZERO);

        // Local X points along world Y
        let result = scale(GizmoAxis::X, &snapshot, DVec3::new(5.0, 1.0, 7.0));
        assert!(result.abs_diff_eq(DVec3::new(3.0, 3.0, 4.0), 1e-12));
    }

    #[test]
    fn zero_scale_does_not_produce_nan() {
        let flat = snapshot(DVec3::ZERO, DQuat::IDENTITY, DVec3::new(0.0, 1.0, 1.0), DVec3::ZERO);
        let result = scale(GizmoAxis::X, &flat, DVec3::new(0.5, 0.0, 0.0));
        assert!(result.is_finite());
        assert!((result.x - 0.5).abs() < 1e-12);

        let collapsed = snapshot(DVec3::ZERO, DQuat::IDENTITY, DVec3::ZERO, DVec3::ZERO);
        let result = scale(GizmoAxis::XYZ, &collapsed, DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(result, DVec3::ZERO);
    }

    #[test]
    fn plane_axes_leave_scale_untouched() {
        let old = DVec3::new(2.0, 3.0, 4.0);
        let snapshot = snapshot(DVec3::ZERO, DQuat::IDENTITY, old, DVec3::ZERO);
        assert_eq!(scale(GizmoAxis::XY, &snapshot, DVec3::ONE), old);
    }

    #[test]
    fn drag_after_collapsing_an_axis_stays_finite() {
        use crate::math::Transform;
        use crate::target::Target;

        let mut target = Target::new(Transform::from_rotation(DQuat::from_rotation_y(0.4)));

        // Collapse X to zero, then start a new session on Y
        let first = DragSnapshot::capture(&target, DVec3::ZERO);
        let collapse = (first.world_rotation * DVec3::X) * -1.0;
        target.apply(ScaleSolver { axis: GizmoAxis::X }.solve(&first, &input(collapse)));
        assert!(DVec3::from(target.transform.scale).x.abs() < 1e-12);

        let second = DragSnapshot::capture(&target, DVec3::ZERO);
        assert!(second.world_rotation.is_finite());

        let result = scale(GizmoAxis::Y, &second, DVec3::new(0.0, 0.5, 0.0));
        assert!(result.is_finite());
        assert!(result.abs_diff_eq(DVec3::new(0.0, 1.5, 1.0), 1e-9));
    }
}
