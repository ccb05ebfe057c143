//! Per-frame placement of the gizmo.

use crate::camera::Camera;
use crate::config::{Color32, GizmoAxis, GizmoConfig, GizmoMode};
use crate::handles::handle_axes;
use crate::math::{DMat4, DQuat, DVec3, look_at_rotation};
use crate::picking::PickSurface;
use crate::plane::ReferencePlanes;
use crate::target::Target;

/// Distance at which the gizmo is one world unit large, for a size of 1.
const SCREEN_SCALE_DIVISOR: f64 = 6.0;

/// Orientation and highlight state of one visual part.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PartPlacement {
    pub axis: GizmoAxis,
    pub rotation: DQuat,
    pub highlighted: bool,
    pub color: Color32,
}

/// Where and how the gizmo is drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// False when no object is attached.
    pub visible: bool,
    /// World position of the attached object.
    pub position: DVec3,
    /// Uniform scale keeping the gizmo at a constant size on screen.
    pub scale: f64,
    /// Frame rotation. The object's world rotation in local space, identity in world space.
    pub rotation: DQuat,
    /// Unit vector from the object towards the viewer.
    pub eye: DVec3,
    pub parts: Vec<PartPlacement>,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            visible: false,
            position: DVec3::ZERO,
            scale: 1.0,
            rotation: DQuat::IDENTITY,
            eye: DVec3::Z,
            parts: Vec::new(),
        }
    }
}

impl Placement {
    /// Computes the placement for the current state.
    ///
    /// Depends only on its arguments, so computing it again for the
    /// same state gives the same result.
    pub fn compute(
        config: &GizmoConfig,
        camera: &Camera,
        target: Option<&Target>,
        axis: Option<GizmoAxis>,
    ) -> Self {
        let Some(target) = target else {
            return Self::default();
        };

        let position = target.world_position();
        let rotation = if config.local_space() {
            target.world_rotation()
        } else {
            DQuat::IDENTITY
        };
        let eye = camera.eye_vector(position);
        let scale = position.distance(camera.position) / SCREEN_SCALE_DIVISOR * config.size;

        let parts = handle_axes(config.mode)
            .iter()
            .map(|&part| {
                let highlighted = axis == Some(part);
                PartPlacement {
                    axis: part,
                    rotation: part_rotation(config.mode, part, rotation, eye),
                    highlighted,
                    color: config.visuals.color(part, highlighted),
                }
            })
            .collect();

        Self {
            visible: true,
            position,
            scale,
            rotation,
            eye,
            parts,
        }
    }

    pub fn part(&self, axis: GizmoAxis) -> Option<&PartPlacement> {
        self.parts.iter().find(|part| part.axis == axis)
    }

    /// Planes through the gizmo origin, following the gizmo frame.
    pub fn reference_planes(&self) -> ReferencePlanes {
        ReferencePlanes {
            origin: self.position,
            frame: self.rotation,
            eye_facing: look_at_rotation(self.eye, DVec3::Y),
        }
    }

    /// World matrix of a part, including the screen-constant scale.
    pub fn part_matrix(&self, axis: GizmoAxis) -> DMat4 {
        let rotation = self.part(axis).map_or(self.rotation, |part| part.rotation);
        DMat4::from_scale_rotation_translation(DVec3::splat(self.scale), rotation, self.position)
    }

    /// Moves unit-scale pickers to where their parts are drawn.
    pub fn pose_pickers(&self, pickers: &[PickSurface<GizmoAxis>]) -> Vec<PickSurface<GizmoAxis>> {
        pickers
            .iter()
            .map(|picker| {
                let mut posed = picker.clone();
                posed.transform = self.part_matrix(picker.tag) * picker.transform;
                posed
            })
            .collect()
    }
}

/// Orientation of a part within the gizmo frame.
///
/// Eye-facing parts look at the camera. Rotation rings turn about their
/// axis so that their visible half faces the camera.
pub fn part_rotation(mode: GizmoMode, axis: GizmoAxis, frame: DQuat, eye: DVec3) -> DQuat {
    if axis.is_eye_facing() {
        return look_at_rotation(eye, DVec3::Y);
    }

    if mode != GizmoMode::Rotate {
        return frame;
    }

    let eye = frame.inverse() * eye;
    let facing = match axis {
        GizmoAxis::X => DQuat::from_rotation_x(f64::atan2(-eye.y, eye.z)),
        GizmoAxis::Y => DQuat::from_rotation_y(f64::atan2(eye.x, eye.z)),
        GizmoAxis::Z => DQuat::from_rotation_z(f64::atan2(eye.y, eye.x)),
        _ => DQuat::IDENTITY,
    };
    frame * facing
}
