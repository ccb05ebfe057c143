//! Camera descriptor used for picking, placement and eye-vector computation.

use enum_dispatch::enum_dispatch;

use crate::math::{
    DMat4, DQuat, DVec3, Pos2, Ray, Rect, look_at_rotation, screen_to_world, world_to_screen,
};

/// Per-projection behavior of a camera.
#[enum_dispatch]
pub trait CameraProjection {
    /// OpenGL-style projection matrix (clip depth from -1 to 1).
    fn projection_matrix(&self) -> DMat4;

    /// Unit vector pointing from `target` towards the viewer.
    fn eye_vector(&self, camera_position: DVec3, camera_rotation: DQuat, target: DVec3) -> DVec3;
}

/// Projection of a camera.
#[enum_dispatch(CameraProjection)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Perspective(Perspective),
    Orthographic(Orthographic),
    Custom(CustomProjection),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Perspective {
    /// Vertical field of view in radians
    pub fov_y: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl CameraProjection for Perspective {
    fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    fn eye_vector(&self, camera_position: DVec3, camera_rotation: DQuat, target: DVec3) -> DVec3 {
        perspective_eye(camera_position, camera_rotation, target)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orthographic {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl CameraProjection for Orthographic {
    fn projection_matrix(&self) -> DMat4 {
        DMat4::orthographic_rh_gl(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }

    fn eye_vector(&self, _camera_position: DVec3, camera_rotation: DQuat, _target: DVec3) -> DVec3 {
        // All view rays are parallel, the eye is the camera's backward axis.
        camera_rotation * DVec3::Z
    }
}

/// A host-supplied projection matrix of unknown kind.
///
/// The eye vector falls back to the perspective formula.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CustomProjection {
    pub matrix: DMat4,
}

impl CameraProjection for CustomProjection {
    fn projection_matrix(&self) -> DMat4 {
        self.matrix
    }

    fn eye_vector(&self, camera_position: DVec3, camera_rotation: DQuat, target: DVec3) -> DVec3 {
        perspective_eye(camera_position, camera_rotation, target)
    }
}

fn perspective_eye(camera_position: DVec3, camera_rotation: DQuat, target: DVec3) -> DVec3 {
    (camera_position - target).normalize_or(camera_rotation * DVec3::Z)
}

/// The camera looking at the scene. Looks down its local -Z axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// World position
    pub position: DVec3,
    /// World rotation
    pub rotation: DQuat,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(50f64.to_radians(), 1.0, 0.1, 2000.0)
    }
}

impl Camera {
    pub fn new(position: DVec3, rotation: DQuat, projection: impl Into<Projection>) -> Self {
        Self {
            position,
            rotation,
            projection: projection.into(),
        }
    }

    /// Perspective camera at the origin.
    pub fn perspective(fov_y: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self::new(
            DVec3::ZERO,
            DQuat::IDENTITY,
            Perspective {
                fov_y,
                aspect,
                near,
                far,
            },
        )
    }

    /// Orthographic camera at the origin.
    pub fn orthographic(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        Self::new(
            DVec3::ZERO,
            DQuat::IDENTITY,
            Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            },
        )
    }

    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    /// Turns the camera so that it looks at `target`.
    pub fn looking_at(mut self, target: DVec3, up: DVec3) -> Self {
        self.rotation = look_at_rotation(self.position - target, up);
        self
    }

    pub fn forward(&self) -> DVec3 {
        self.rotation * DVec3::NEG_Z
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection.projection_matrix() * self.view_matrix()
    }

    /// Unit vector pointing from `target` towards the viewer.
    pub fn eye_vector(&self, target: DVec3) -> DVec3 {
        self.projection
            .eye_vector(self.position, self.rotation, target)
    }

    /// Calculate a world space ray from given screen space position
    pub fn pointer_ray(&self, viewport: Rect, screen_pos: Pos2) -> Ray {
        let mat = self.view_projection().inverse();
        let origin = screen_to_world(viewport, mat, screen_pos, -1.0);
        let target = screen_to_world(viewport, mat, screen_pos, 1.0);

        Ray::new(origin, (target - origin).normalize())
    }

    /// Screen position of a world space point, if it is in front of the camera.
    pub fn world_to_screen(&self, viewport: Rect, point: DVec3) -> Option<Pos2> {
        world_to_screen(viewport, self.view_projection(), point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    fn viewport() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn perspective_eye_points_towards_camera() {
        let camera = Camera::perspective(1.0, 1.0, 0.1, 100.0)
            .with_position(DVec3::new(0.0, 0.0, 10.0))
            .looking_at(DVec3::ZERO, DVec3::Y);

        let eye = camera.eye_vector(DVec3::new(0.0, 5.0, 0.0));
        assert!(eye.abs_diff_eq(DVec3::new(0.0, -5.0, 10.0).normalize(), 1e-12));
    }

    #[test]
    fn orthographic_eye_is_camera_backward_axis() {
        let camera = Camera::orthographic(-5.0, 5.0, -5.0, 5.0, 0.1, 100.0)
            .with_position(DVec3::new(10.0, 0.0, 0.0))
            .looking_at(DVec3::ZERO, DVec3::Y);

        let eye = camera.eye_vector(DVec3::new(0.0, 3.0, -2.0));
        assert!(eye.abs_diff_eq(DVec3::X, 1e-9));
        assert!(camera.forward().abs_diff_eq(DVec3::NEG_X, 1e-9));
    }

    #[test]
    fn custom_projection_uses_perspective_eye() {
        let camera = Camera::new(
            DVec3::new(0.0, 0.0, 4.0),
            DQuat::IDENTITY,
            CustomProjection {
                matrix: DMat4::perspective_rh_gl(1.0, 1.0, 0.1, 100.0),
            },
        );
        assert!(camera.eye_vector(DVec3::ZERO).abs_diff_eq(DVec3::Z, 1e-12));
    }

    #[test]
    fn center_ray_follows_forward_axis() {
        let camera = Camera::perspective(1.0, 800.0 / 600.0, 0.1, 100.0)
            .with_position(DVec3::new(3.0, 2.0, 10.0))
            .looking_at(DVec3::new(3.0, 2.0, 0.0), DVec3::Y);

        let ray = camera.pointer_ray(viewport(), viewport().center());
        assert!(ray.direction.abs_diff_eq(DVec3::NEG_Z, 1e-6));
        assert!((ray.origin.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn orthographic_rays_are_parallel() {
        let camera = Camera::orthographic(-4.0, 4.0, -3.0, 3.0, 0.1, 100.0)
            .with_position(DVec3::new(0.0, 0.0, 10.0));

        let a = camera.pointer_ray(viewport(), Pos2::new(100.0, 100.0));
        let b = camera.pointer_ray(viewport(), Pos2::new(700.0, 500.0));
        assert!(a.direction.abs_diff_eq(b.direction, 1e-9));
        assert!(a.direction.abs_diff_eq(DVec3::NEG_Z, 1e-9));
    }

    #[test]
    fn projects_points_back_onto_their_rays() {
        let camera = Camera::perspective(0.8, 800.0 / 600.0, 0.1, 100.0)
            .with_position(DVec3::new(4.0, 3.0, 8.0))
            .looking_at(DVec3::ZERO, DVec3::Y);
        let point = DVec3::new(0.5, -0.25, 1.0);

        let screen = camera.world_to_screen(viewport(), point).unwrap();
        let ray = camera.pointer_ray(viewport(), screen);
        let closest = ray.point_at((point - ray.origin).dot(ray.direction));
        assert!(closest.abs_diff_eq(point, 1e-3));
    }
}
