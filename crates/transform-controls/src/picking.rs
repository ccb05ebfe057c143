//! Ray casting against tagged pick surfaces.
//!
//! Surfaces are simple analytic shapes standing in for picker geometry.
//! Each surface carries a tag (the gizmo axis for pickers) that is
//! reported back for the nearest hit.

use std::f64::consts::PI;

use crate::camera::Camera;
use crate::math::{DMat4, DQuat, DVec3, Pos2, Ray, Rect, intersect_plane};

/// Shape of a pick surface in its local space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PickShape {
    /// Sphere centered at the origin.
    Sphere { radius: f64 },
    /// Axis aligned box centered at the origin.
    Cuboid { half_extents: DVec3 },
    /// Finite cylinder between two points.
    Cylinder { start: DVec3, end: DVec3, radius: f64 },
    /// Square centered at the origin, spanned by `tangent` and `normal × tangent`.
    Quad {
        normal: DVec3,
        tangent: DVec3,
        half_size: f64,
    },
    /// Ring around the origin, limited to `half_angle` on either side of `mid`.
    /// A half angle of π or more makes a full ring.
    Arc {
        normal: DVec3,
        mid: DVec3,
        radius: f64,
        tube: f64,
        half_angle: f64,
    },
}

impl PickShape {
    /// Finds the nearest non-negative ray parameter where `ray` meets the shape.
    ///
    /// The ray direction does not need to be normalized.
    pub fn intersect(&self, ray: Ray) -> Option<f64> {
        match *self {
            Self::Sphere { radius } => ray_sphere(ray, radius),
            Self::Cuboid { half_extents } => ray_cuboid(ray, half_extents),
            Self::Cylinder { start, end, radius } => ray_cylinder(ray, start, end, radius),
            Self::Quad {
                normal,
                tangent,
                half_size,
            } => {
                let t = intersect_plane(normal, DVec3::ZERO, ray.origin, ray.direction)?;
                let p = ray.point_at(t);
                let bitangent = normal.cross(tangent);
                (p.dot(tangent).abs() <= half_size && p.dot(bitangent).abs() <= half_size)
                    .then_some(t)
            }
            Self::Arc {
                normal,
                mid,
                radius,
                tube,
                half_angle,
            } => {
                let t = intersect_plane(normal, DVec3::ZERO, ray.origin, ray.direction)?;
                let p = ray.point_at(t);
                let distance = p.length();
                if (distance - radius).abs() > tube || distance < 1e-9 {
                    return None;
                }
                (half_angle >= PI || p.angle_between(mid) <= half_angle).then_some(t)
            }
        }
    }
}

fn ray_sphere(ray: Ray, radius: f64) -> Option<f64> {
    let a = ray.direction.length_squared();
    let b = ray.origin.dot(ray.direction);
    let c = ray.origin.length_squared() - radius * radius;

    let discriminant = b * b - a * c;
    if a < f64::EPSILON || discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = (-b - root) / a;
    let far = (-b + root) / a;
    if near >= 0.0 {
        Some(near)
    } else {
        (far >= 0.0).then_some(far)
    }
}

fn ray_cuboid(ray: Ray, half_extents: DVec3) -> Option<f64> {
    let inv = ray.direction.recip();
    let t1 = (-half_extents - ray.origin) * inv;
    let t2 = (half_extents - ray.origin) * inv;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max < t_min.max(0.0) {
        return None;
    }

    Some(if t_min >= 0.0 { t_min } else { t_max })
}

fn ray_cylinder(ray: Ray, start: DVec3, end: DVec3, radius: f64) -> Option<f64> {
    let axis = (end - start).normalize_or_zero();
    let length = (end - start).length();
    if length < f64::EPSILON {
        return None;
    }

    // Project the ray into the plane perpendicular to the cylinder axis
    let d = ray.direction - axis * ray.direction.dot(axis);
    let o = (ray.origin - start) - axis * (ray.origin - start).dot(axis);

    let a = d.dot(d);
    let b = 2.0 * d.dot(o);
    let c = o.dot(o) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if a < f64::EPSILON || discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)]
        .into_iter()
        .filter(|t| *t >= 0.0)
        .find(|t| {
            let projection = (ray.point_at(*t) - start).dot(axis);
            (0.0..=length).contains(&projection)
        })
}

/// A pickable surface, optionally with child surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct PickSurface<T> {
    /// Reported back when this surface is the nearest hit.
    pub tag: T,
    /// `None` for pure grouping nodes.
    pub shape: Option<PickShape>,
    /// Transform relative to the parent surface.
    pub transform: DMat4,
    pub children: Vec<Self>,
}

impl<T> PickSurface<T> {
    pub fn new(tag: T, shape: PickShape) -> Self {
        Self {
            tag,
            shape: Some(shape),
            transform: DMat4::IDENTITY,
            children: Vec::new(),
        }
    }

    pub fn group(tag: T, children: Vec<Self>) -> Self {
        Self {
            tag,
            shape: None,
            transform: DMat4::IDENTITY,
            children,
        }
    }

    pub fn with_transform(mut self, transform: DMat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_translation(self, translation: DVec3) -> Self {
        self.with_transform(DMat4::from_translation(translation))
    }

    pub fn with_pose(self, scale: f64, rotation: DQuat, translation: DVec3) -> Self {
        self.with_transform(DMat4::from_scale_rotation_translation(
            DVec3::splat(scale),
            rotation,
            translation,
        ))
    }
}

impl<T: Copy> PickSurface<T> {
    fn nearest_hit(&self, ray: Ray, parent: DMat4, nearest: &mut Option<PickHit<T>>) {
        let world = parent * self.transform;

        // Degenerate transforms (zero scale) cannot be hit
        if let Some(shape) = self.shape
            && world.determinant().abs() > f64::EPSILON
            && let Some(t) = shape.intersect(ray.transformed(&world.inverse()))
            && nearest.is_none_or(|hit| t < hit.distance)
        {
            *nearest = Some(PickHit {
                point: ray.point_at(t),
                distance: t,
                tag: self.tag,
            });
        }

        for child in &self.children {
            child.nearest_hit(ray, world, nearest);
        }
    }
}

/// The nearest intersection found by a pick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit<T> {
    /// World space intersection point.
    pub point: DVec3,
    /// Distance from the ray origin.
    pub distance: f64,
    pub tag: T,
}

/// Casts `ray` against `candidates` and their children, returning the nearest hit.
pub fn pick_ray<T: Copy>(ray: Ray, candidates: &[PickSurface<T>]) -> Option<PickHit<T>> {
    let mut nearest = None;
    for candidate in candidates {
        candidate.nearest_hit(ray, DMat4::IDENTITY, &mut nearest);
    }
    nearest
}

/// Casts a ray from the camera through the pointer position and
/// returns the nearest hit among `candidates`.
pub fn pick<T: Copy>(
    pointer: Pos2,
    viewport: Rect,
    camera: &Camera,
    candidates: &[PickSurface<T>],
) -> Option<PickHit<T>> {
    if candidates.is_empty() || !viewport.is_finite() || viewport.area() <= 0.0 {
        return None;
    }

    pick_ray(camera.pointer_ray(viewport, pointer), candidates)
}
