use crate::config::{AxisComponent, GizmoAxis, GizmoSpace};
use crate::math::{DQuat, DVec3, look_at_rotation, planar_angle};
use crate::session::DragSnapshot;
use crate::solver::{SolveInput, TransformSolve, TransformUpdate};

/// Rotates the object around a coordinate axis, in the screen plane
/// or freely like a trackball.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RotationSolver {
    pub axis: GizmoAxis,
    pub space: GizmoSpace,
}

impl TransformSolve for RotationSolver {
    fn solve(&self, snapshot: &DragSnapshot, input: &SolveInput) -> TransformUpdate {
        // Both vectors are relative to the rotation center
        let start = (snapshot.offset - snapshot.world_position) * snapshot.parent_inverse_scale;
        let current = (input.point - snapshot.world_position) * snapshot.parent_inverse_scale;

        let rotation = match self.axis {
            GizmoAxis::E => rotate_in_view_plane(snapshot, start, current, input.eye),
            GizmoAxis::XYZE => rotate_trackball(snapshot, start, current),
            axis => match axis.single_component() {
                Some(component) => {
                    self.rotate_around_axis(snapshot, component, start, current, input)
                }
                None => snapshot.rotation,
            },
        };

        TransformUpdate::Rotation(rotation.normalize())
    }
}

impl RotationSolver {
    fn rotate_around_axis(
        &self,
        snapshot: &DragSnapshot,
        component: AxisComponent,
        start: DVec3,
        current: DVec3,
        input: &SolveInput,
    ) -> DQuat {
        let (start, current) = match self.space {
            GizmoSpace::Local => {
                let inverse = snapshot.world_rotation.inverse();
                (inverse * start, inverse * current)
            }
            GizmoSpace::World => (start, current),
        };

        let angle = planar_angle(current, component) - planar_angle(start, component);
        let delta = DQuat::from_axis_angle(component.unit(), input.snap.snap_rotation(angle));

        match self.space {
            GizmoSpace::Local => snapshot.rotation * delta,
            GizmoSpace::World => {
                snapshot.parent_rotation.inverse() * delta * snapshot.world_rotation
            }
        }
    }
}

/// Rotation around the eye vector, measured in a frame whose +Z is the eye.
fn rotate_in_view_plane(
    snapshot: &DragSnapshot,
    start: DVec3,
    current: DVec3,
    eye: DVec3,
) -> DQuat {
    let view = look_at_rotation(eye, DVec3::Y).inverse();
    let angle = planar_angle(view * current, AxisComponent::Z)
        - planar_angle(view * start, AxisComponent::Z);

    let delta = DQuat::from_axis_angle(eye.normalize_or(DVec3::Z), angle);
    snapshot.parent_rotation.inverse() * delta * snapshot.world_rotation
}

/// Free rotation carrying the start vector onto the current one.
fn rotate_trackball(snapshot: &DragSnapshot, start: DVec3, current: DVec3) -> DQuat {
    let axis = current.cross(start).normalize_or_zero();
    if axis == DVec3::ZERO {
        return snapshot.rotation;
    }

    let delta = DQuat::from_axis_angle(axis, -current.angle_between(start));
    snapshot.parent_rotation.inverse() * delta * snapshot.world_rotation
}
