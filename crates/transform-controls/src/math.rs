pub use emath::{Pos2, Rect, Vec2};
pub use glam::{DMat3, DMat4, DQuat, DVec2, DVec3, DVec4, Vec4Swizzles};

use enumset::EnumSet;

use crate::config::AxisComponent;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Transform {
    pub scale: mint::Vector3<f64>,
    pub rotation: mint::Quaternion<f64>,
    pub translation: mint::Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: DVec3::ONE.into(),
            rotation: DQuat::IDENTITY.into(),
            translation: DVec3::ZERO.into(),
        }
    }
}

impl Transform {
    pub fn from_scale_rotation_translation(
        scale: impl Into<mint::Vector3<f64>>,
        rotation: impl Into<mint::Quaternion<f64>>,
        translation: impl Into<mint::Vector3<f64>>,
    ) -> Self {
        Self {
            scale: scale.into(),
            rotation: rotation.into(),
            translation: translation.into(),
        }
    }

    pub fn from_translation(translation: impl Into<mint::Vector3<f64>>) -> Self {
        Self {
            translation: translation.into(),
            ..Default::default()
        }
    }

    pub fn from_rotation(rotation: impl Into<mint::Quaternion<f64>>) -> Self {
        Self {
            rotation: rotation.into(),
            ..Default::default()
        }
    }

    /// Decomposes an affine matrix. Shear is lost.
    pub fn from_matrix(matrix: DMat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self::from_scale_rotation_translation(scale, rotation, translation)
    }

    pub fn matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(
            self.scale.into(),
            DQuat::from(self.rotation),
            self.translation.into(),
        )
    }
}

/// A half-line in world space. `direction` is expected to be normalized
/// so that ray parameters are distances.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    pub fn point_at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Transforms the ray without renormalizing it, so that
    /// ray parameters keep their meaning across spaces.
    pub(crate) fn transformed(&self, matrix: &DMat4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}

/// Finds the ray parameter where a ray meets a plane.
/// Intersections behind the ray origin are rejected.
pub(crate) fn intersect_plane(
    plane_normal: DVec3,
    plane_origin: DVec3,
    ray_origin: DVec3,
    ray_dir: DVec3,
) -> Option<f64> {
    let denom = plane_normal.dot(ray_dir);

    if denom.abs() < 10e-8 {
        None
    } else {
        let t = (plane_origin - ray_origin).dot(plane_normal) / denom;
        (t >= 0.0).then_some(t)
    }
}

/// Rounds given value to the nearest interval
pub(crate) fn round_to_interval(val: f64, interval: f64) -> f64 {
    (val / interval).round() * interval
}

/// Calculates 2d screen coordinates from 3d world coordinates
pub(crate) fn world_to_screen(viewport: Rect, mvp: DMat4, pos: DVec3) -> Option<Pos2> {
    let mut pos = mvp * DVec4::from((pos, 1.0));

    if pos.w < 1e-10 {
        return None;
    }

    pos /= pos.w;
    pos.y *= -1.0;

    let center = viewport.center();

    Some(Pos2::new(
        (center.x as f64 + pos.x * viewport.width() as f64 / 2.0) as f32,
        (center.y as f64 + pos.y * viewport.height() as f64 / 2.0) as f32,
    ))
}

/// Calculates 3d world coordinates from 2d screen coordinates
pub(crate) fn screen_to_world(viewport: Rect, mat: DMat4, pos: Pos2, z: f64) -> DVec3 {
    let x = (((pos.x - viewport.min.x) / viewport.width()) * 2.0 - 1.0) as f64;
    let y = (((pos.y - viewport.min.y) / viewport.height()) * 2.0 - 1.0) as f64;

    let mut world_pos = mat * DVec4::new(x, -y, z, 1.0);

    // w is zero when far plane is set to infinity
    if world_pos.w.abs() < 1e-7 {
        world_pos.w = 1e-7;
    }

    world_pos /= world_pos.w;

    world_pos.xyz()
}

/// Rotation whose +Z axis points along `dir`, keeping +Y as close to `up` as possible.
pub(crate) fn look_at_rotation(dir: DVec3, up: DVec3) -> DQuat {
    let mut z = dir.normalize_or(DVec3::Z);
    let mut x = up.cross(z);

    if x.length_squared() < 1e-12 {
        // up and dir are parallel, nudge dir off the up axis
        if (up.z.abs() - 1.0).abs() < 1e-12 {
            z.x += 1e-4;
        } else {
            z.z += 1e-4;
        }
        z = z.normalize();
        x = up.cross(z);
    }

    let x = x.normalize();
    let y = z.cross(x);

    DQuat::from_mat3(&DMat3::from_cols(x, y, z))
}

/// Rotation part of an affine matrix. Identity for a singular matrix.
pub(crate) fn rotation_of(matrix: &DMat4) -> DQuat {
    let (_, rotation, _) = matrix.to_scale_rotation_translation();
    let rotation = rotation.normalize();
    if rotation.is_finite() {
        rotation
    } else {
        DQuat::IDENTITY
    }
}

/// Column lengths of the inverse matrix. Used to cancel a parent's scale.
/// A singular matrix cancels nothing.
pub(crate) fn inverse_scale_of(matrix: &DMat4) -> DVec3 {
    if matrix.determinant() == 0.0 {
        return DVec3::ONE;
    }
    let inverse = matrix.inverse();
    DVec3::new(
        inverse.x_axis.truncate().length(),
        inverse.y_axis.truncate().length(),
        inverse.z_axis.truncate().length(),
    )
}

/// Zeroes the components not listed in `mask`.
pub(crate) fn mask_components(value: DVec3, mask: EnumSet<AxisComponent>) -> DVec3 {
    let mut masked = DVec3::ZERO;
    for component in mask {
        let i = component.index();
        masked[i] = value[i];
    }
    masked
}

/// Angle of `v` around the given coordinate axis, measured with `atan2`
/// over the cyclic component pair (z,y), (x,z) or (y,x).
pub(crate) fn planar_angle(v: DVec3, about: AxisComponent) -> f64 {
    match about {
        AxisComponent::X => f64::atan2(v.z, v.y),
        AxisComponent::Y => f64::atan2(v.x, v.z),
        AxisComponent::Z => f64::atan2(v.y, v.x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn plane_intersection_rejects_parallel_and_backward_rays() {
        let t = intersect_plane(DVec3::Z, DVec3::ZERO, DVec3::new(0.0, 0.0, 5.0), -DVec3::Z);
        assert_eq!(t, Some(5.0));

        let origin = DVec3::new(0.0, 0.0, 5.0);
        assert!(intersect_plane(DVec3::Z, DVec3::ZERO, origin, DVec3::X).is_none());
        assert!(intersect_plane(DVec3::Z, DVec3::ZERO, origin, DVec3::Z).is_none());
    }

    #[test]
    fn look_at_points_z_along_direction() {
        let dir = DVec3::new(1.0, 2.0, 3.0).normalize();
        let rotation = look_at_rotation(dir, DVec3::Y);
        assert!((rotation * DVec3::Z).abs_diff_eq(dir, 1e-9));
        assert!((rotation * DVec3::X).dot(DVec3::Y).abs() < 1e-9);

        // Looking straight down the up axis still gives a valid rotation
        let rotation = look_at_rotation(DVec3::Y, DVec3::Y);
        assert!(rotation.is_normalized());
        assert!((rotation * DVec3::Z).dot(DVec3::Y) > 0.999);
    }

    #[test]
    fn masks_components() {
        let v = mask_components(DVec3::new(1.0, 2.0, 3.0), AxisComponent::Y | AxisComponent::Z);
        assert_eq!(v, DVec3::new(0.0, 2.0, 3.0));
    }

    #[test]
    fn planar_angles_follow_right_hand_rule() {
        assert!((planar_angle(DVec3::Z, AxisComponent::X) - FRAC_PI_2).abs() < 1e-12);
        assert!((planar_angle(DVec3::X, AxisComponent::Y) - FRAC_PI_2).abs() < 1e-12);
        assert!((planar_angle(DVec3::Y, AxisComponent::Z) - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn inverse_scale_cancels_uniform_parent_scale() {
        let parent = DMat4::from_scale_rotation_translation(
            DVec3::splat(2.0),
            DQuat::from_rotation_y(0.7),
            DVec3::new(1.0, 2.0, 3.0),
        );
        assert!(inverse_scale_of(&parent).abs_diff_eq(DVec3::splat(0.5), 1e-12));
    }

    #[test]
    fn screen_round_trip() {
        let viewport = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let mvp = DMat4::perspective_rh_gl(1.0, 800.0 / 600.0, 0.1, 100.0)
            * DMat4::from_translation(DVec3::new(0.0, 0.0, -10.0));
        let screen = world_to_screen(viewport, mvp, DVec3::new(1.0, 0.5, 0.0)).unwrap();
        let near = screen_to_world(viewport, mvp.inverse(), screen, -1.0);
        let far = screen_to_world(viewport, mvp.inverse(), screen, 1.0);
        let ray = Ray::new(near, (far - near).normalize());
        let t = intersect_plane(DVec3::Z, DVec3::ZERO, ray.origin, ray.direction).unwrap();
        assert!(ray.point_at(t).abs_diff_eq(DVec3::new(1.0, 0.5, 0.0), 1e-3));
    }
}
