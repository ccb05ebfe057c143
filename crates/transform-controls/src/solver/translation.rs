use crate::config::{GizmoAxis, GizmoSpace};
use crate::math::mask_components;
use crate::session::DragSnapshot;
use crate::snap::snap_components;
use crate::solver::{SolveInput, TransformSolve, TransformUpdate};

/// Moves the object along an axis, within a plane or freely.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TranslationSolver {
    pub axis: GizmoAxis,
    pub space: GizmoSpace,
}

impl TransformSolve for TranslationSolver {
    fn solve(&self, snapshot: &DragSnapshot, input: &SolveInput) -> TransformUpdate {
        let mask = self.axis.components();
        let delta = (input.point - snapshot.offset) * snapshot.parent_inverse_scale;

        let delta = if self.space == GizmoSpace::Local && self.axis != GizmoAxis::XYZ {
            let local = mask_components(snapshot.world_rotation.inverse() * delta, mask);
            snapshot.rotation * local
        } else {
            snapshot.parent_rotation.inverse() * mask_components(delta, mask)
        };

        let mut position = snapshot.position + delta;

        if let Some(increment) = input.snap.translation {
            // Round in the frame the mask was applied in
            let to_mask_frame = match self.space {
                GizmoSpace::Local => snapshot.rotation.inverse(),
                GizmoSpace::World => snapshot.parent_rotation,
            };
            let snapped = snap_components(to_mask_frame * position, mask, increment);
            position = to_mask_frame.inverse() * snapped;
        }

        TransformUpdate::Translation(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{DQuat, DVec3};
    use crate::snap::SnapSettings;
    use crate::solver::tests::{input, snapshot};
    use std::f64::consts::FRAC_PI_2;

    fn translate(solver: TranslationSolver, snapshot: &DragSnapshot, input: &SolveInput) -> DVec3 {
        match solver.solve(snapshot, input) {
            TransformUpdate::Translation(position) => position,
            other => panic!("unexpected update {other:?}"),
        }
    }

    #[test]
    fn world_x_drag_moves_along_x_only() {
        let solver = TranslationSolver {
            axis: GizmoAxis::X,
            space: GizmoSpace::World,
        };
        let snapshot = snapshot(DVec3::ZERO, DQuat::IDENTITY, DVec3::ONE, DVec3::ZERO);

        let position = translate(solver, &snapshot, &input(DVec3::new(2.0, 0.0, 0.0)));
        assert!(position.abs_diff_eq(DVec3::new(2.0, 0.0, 0.0), 1e-12));

        // Off-axis pointer motion is masked out
        let position = translate(solver, &snapshot, &input(DVec3::new(2.0, 0.7, -0.3)));
        assert!(position.abs_diff_eq(DVec3::new(2.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn snapped_world_translation_rounds_to_increment() {
        let solver = TranslationSolver {
            axis: GizmoAxis::X,
            space: GizmoSpace::World,
        };
        let snapshot = snapshot(DVec3::ZERO, DQuat::IDENTITY, DVec3::ONE, DVec3::ZERO);
        let input = SolveInput {
            snap: SnapSettings::new(Some(1.0), None),
            ..input(DVec3::new(2.4, 0.0, 0.0))
        };

        let position = translate(solver, &snapshot, &input);
        assert!(position.abs_diff_eq(DVec3::new(2.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn unmasked_components_keep_their_start_value() {
        let start = DVec3::new(0.3, -1.7, 4.2);
        let rotation = DQuat::from_rotation_y(0.6) * DQuat::from_rotation_x(-0.4);
        let parent_rotation = DQuat::from_rotation_z(FRAC_PI_2) * DQuat::from_rotation_x(0.3);
        let axes = [
            GizmoAxis::X,
            GizmoAxis::Y,
            GizmoAxis::Z,
            GizmoAxis::XY,
            GizmoAxis::YZ,
            GizmoAxis::XZ,
            GizmoAxis::XYZ,
        ];

        for parent in [DQuat::IDENTITY, parent_rotation] {
            let snapshot = DragSnapshot {
                parent_rotation: parent,
                world_rotation: parent * rotation,
                ..snapshot(start, rotation, DVec3::ONE, DVec3::ONE)
            };

            for snap in [None, Some(0.5)] {
                for space in [GizmoSpace::World, GizmoSpace::Local] {
                    for axis in axes {
                        let solver = TranslationSolver { axis, space };
                        let input = SolveInput {
                            snap: SnapSettings::new(snap, None),
                            ..input(DVec3::new(3.0, -2.0, 5.0))
                        };
                        let position = translate(solver, &snapshot, &input);

                        // Compare in the frame the mask is applied in
                        let frame = match space {
                            GizmoSpace::Local if axis != GizmoAxis::XYZ => rotation.inverse(),
                            _ => parent,
                        };
                        let (before, after) = (frame * start, frame * position);
                        let mask = axis.components();
                        for i in 0..3 {
                            if !mask.iter().any(|component| component.index() == i) {
                                assert!(
                                    (before[i] - after[i]).abs() < 1e-9,
                                    "{axis} {space} {snap:?} [{i}]"
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn world_snap_under_rotated_parent_keeps_other_world_axes() {
        // Parent turned 90 degrees about Z, so parent-space X is world Y
        let parent_rotation = DQuat::from_rotation_z(FRAC_PI_2);
        let start = DVec3::new(0.3, 0.0, 0.0);
        let snapshot = DragSnapshot {
            parent_rotation,
            world_position: parent_rotation * start,
            world_rotation: parent_rotation,
            ..snapshot(start, DQuat::IDENTITY, DVec3::ONE, DVec3::ZERO)
        };
        let solver = TranslationSolver {
            axis: GizmoAxis::X,
            space: GizmoSpace::World,
        };
        let input = SolveInput {
            snap: SnapSettings::new(Some(1.0), None),
            ..input(DVec3::new(2.0, 0.0, 0.0))
        };

        let world = parent_rotation * translate(solver, &snapshot, &input);
        assert!(world.abs_diff_eq(DVec3::new(2.0, 0.3, 0.0), 1e-9));
    }

    #[test]
    fn local_drag_follows_object_axes() {
        let rotation = DQuat::from_rotation_z(FRAC_PI_2);
        let solver = TranslationSolver {
            axis: GizmoAxis::X,
            space: GizmoSpace::Local,
        };
        let snapshot = snapshot(DVec3::ZERO, rotation, DVec3::ONE, DVec3::ZERO);

        // Local X points along world Y
        let position = translate(solver, &snapshot, &input(DVec3::new(1.0, 2.0, 0.0)));
        assert!(position.abs_diff_eq(DVec3::new(0.0, 2.0, 0.0), 1e-12));
    }

    #[test]
    fn parent_scale_and_rotation_are_cancelled() {
        let parent_rotation = DQuat::from_rotation_z(FRAC_PI_2);
        let snapshot = DragSnapshot {
            parent_rotation,
            world_rotation: parent_rotation,
            parent_inverse_scale: DVec3::splat(0.5),
            ..snapshot(DVec3::ZERO, DQuat::IDENTITY, DVec3::ONE, DVec3::ZERO)
        };
        let solver = TranslationSolver {
            axis: GizmoAxis::Y,
            space: GizmoSpace::World,
        };

        // World +Y by 4 is parent-space -X by 2
        let position = translate(solver, &snapshot, &input(DVec3::new(0.0, 4.0, 0.0)));
        assert!(position.abs_diff_eq(DVec3::new(2.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn drag_and_return_restores_position() {
        let start = DVec3::new(1.0, 2.0, 3.0);
        let offset = DVec3::new(1.0, 2.0, 3.0);
        let snapshot = snapshot(start, DQuat::from_rotation_y(0.3), DVec3::ONE, offset);
        let solver = TranslationSolver {
            axis: GizmoAxis::XZ,
            space: GizmoSpace::Local,
        };

        let moved = translate(solver, &snapshot, &input(DVec3::new(2.5, 2.0, 1.0)));
        assert!(!moved.abs_diff_eq(start, 1e-3));

        let back = translate(solver, &snapshot, &input(snapshot.offset));
        assert!(back.abs_diff_eq(start, 1e-12));
    }
}
