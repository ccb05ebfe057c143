use crate::math::{DMat4, DQuat, DVec3, Transform, rotation_of};
use crate::picking::PickShape;
use crate::solver::TransformUpdate;

/// The object being manipulated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Target {
    /// Transform relative to the parent
    pub transform: Transform,
    /// World transform of the parent. Identity for root objects.
    pub parent: Transform,
    /// Pickable bounds of the object itself, in its local space.
    /// Hitting them on pointer down arms keyboard shortcuts.
    pub bounds: Option<PickShape>,
}

impl Target {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            parent: Transform::default(),
            bounds: None,
        }
    }

    pub fn with_parent(mut self, parent: Transform) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_bounds(mut self, bounds: PickShape) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn parent_matrix(&self) -> DMat4 {
        self.parent.matrix()
    }

    pub fn world_matrix(&self) -> DMat4 {
        self.parent_matrix() * self.transform.matrix()
    }

    pub fn world_position(&self) -> DVec3 {
        self.world_matrix().w_axis.truncate()
    }

    /// Parent rotation composed with the local rotation.
    ///
    /// Stays finite when a scale component is zero.
    pub fn world_rotation(&self) -> DQuat {
        (rotation_of(&self.parent_matrix()) * DQuat::from(self.transform.rotation).normalize())
            .normalize()
    }

    /// Writes the component carried by `update`, leaving the others untouched.
    pub(crate) fn apply(&mut self, update: TransformUpdate) {
        match update {
            TransformUpdate::Translation(translation) => {
                self.transform.translation = translation.into();
            }
            TransformUpdate::Rotation(rotation) => {
                self.transform.rotation = rotation.into();
            }
            TransformUpdate::Scale(scale) => {
                self.transform.scale = scale.into();
            }
        }
    }
}

impl From<Transform> for Target {
    fn from(transform: Transform) -> Self {
        Self::new(transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn world_transform_includes_parent() {
        let target = Target::new(Transform::from_translation(DVec3::new(1.0, 0.0, 0.0)))
            .with_parent(Transform::from_scale_rotation_translation(
                DVec3::splat(2.0),
                DQuat::from_rotation_z(FRAC_PI_2),
                DVec3::new(0.0, 0.0, 5.0),
            ));

        assert!(target.world_position().abs_diff_eq(DVec3::new(0.0, 2.0, 5.0), 1e-12));
        assert!(
            target
                .world_rotation()
                .abs_diff_eq(DQuat::from_rotation_z(FRAC_PI_2), 1e-12)
        );
    }

    #[test]
    fn apply_only_touches_one_component() {
        let mut target = Target::new(Transform::from_scale_rotation_translation(
            DVec3::splat(3.0),
            DQuat::from_rotation_y(0.5),
            DVec3::new(1.0, 2.0, 3.0),
        ));
        let before = target.transform;

        target.apply(TransformUpdate::Translation(DVec3::new(4.0, 5.0, 6.0)));
        assert_eq!(target.transform.scale, before.scale);
        assert_eq!(target.transform.rotation, before.rotation);
        assert_eq!(DVec3::from(target.transform.translation), DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn collapsed_scale_keeps_a_finite_rotation() {
        let target = Target::new(Transform::from_scale_rotation_translation(
            DVec3::new(0.0, 1.0, 1.0),
            DQuat::from_rotation_y(0.4),
            DVec3::ZERO,
        ))
        .with_parent(Transform::from_rotation(DQuat::from_rotation_z(FRAC_PI_2)));

        let rotation = target.world_rotation();
        assert!(rotation.is_finite());
        assert!(rotation.abs_diff_eq(
            DQuat::from_rotation_z(FRAC_PI_2) * DQuat::from_rotation_y(0.4),
            1e-12
        ));
    }
}
