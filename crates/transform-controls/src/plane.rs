//! Selection of the constraint plane a drag is resolved against.

use std::fmt;

use crate::config::{GizmoAxis, GizmoMode};
use crate::math::{DQuat, DVec3, Ray, intersect_plane};

/// One of the reference planes kept around the gizmo.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlaneKind {
    XY,
    YZ,
    XZ,
    /// Plane facing the camera
    XYZE,
}

impl PlaneKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::XY => "XY",
            Self::YZ => "YZ",
            Self::XZ => "XZ",
            Self::XYZE => "XYZE",
        }
    }
}

impl fmt::Display for PlaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the plane giving the least edge-on intersection for `axis`.
///
/// `eye` must be expressed in the gizmo frame, where the XY plane
/// has identity orientation.
pub fn plane_kind(mode: GizmoMode, axis: GizmoAxis, eye: DVec3) -> PlaneKind {
    let eye = eye.abs();

    match (mode, axis) {
        (_, GizmoAxis::XY) => PlaneKind::XY,
        (_, GizmoAxis::YZ) => PlaneKind::YZ,
        (_, GizmoAxis::XZ) => PlaneKind::XZ,
        (_, GizmoAxis::XYZ | GizmoAxis::E | GizmoAxis::XYZE) => PlaneKind::XYZE,

        (GizmoMode::Rotate, GizmoAxis::X) => PlaneKind::YZ,
        (GizmoMode::Rotate, GizmoAxis::Y) => PlaneKind::XZ,
        (GizmoMode::Rotate, GizmoAxis::Z) => PlaneKind::XY,

        (_, GizmoAxis::X) if eye.y > eye.z => PlaneKind::XZ,
        (_, GizmoAxis::Y) if eye.x > eye.z => PlaneKind::YZ,
        (_, GizmoAxis::X | GizmoAxis::Y) => PlaneKind::XY,
        (_, GizmoAxis::Z) if eye.x > eye.y => PlaneKind::YZ,
        (_, GizmoAxis::Z) => PlaneKind::XZ,
    }
}

/// The planes a drag can be resolved against, all passing through the gizmo origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReferencePlanes {
    pub origin: DVec3,
    /// Orientation of the XY plane
    pub frame: DQuat,
    /// Orientation of the camera facing plane, +Z towards the viewer
    pub eye_facing: DQuat,
}

impl ReferencePlanes {
    pub fn normal(&self, kind: PlaneKind) -> DVec3 {
        match kind {
            PlaneKind::XY => self.frame * DVec3::Z,
            PlaneKind::YZ => self.frame * DVec3::X,
            PlaneKind::XZ => self.frame * DVec3::Y,
            PlaneKind::XYZE => self.eye_facing * DVec3::Z,
        }
    }

    pub fn plane(&self, kind: PlaneKind) -> ActivePlane {
        ActivePlane {
            kind,
            origin: self.origin,
            normal: self.normal(kind),
        }
    }
}

/// Selects the constraint plane for a drag on `axis`.
///
/// A pure function of its inputs. `eye` is a world space direction and is
/// brought into the gizmo frame before the plane heuristic runs.
pub fn select_plane(
    mode: GizmoMode,
    axis: GizmoAxis,
    eye: DVec3,
    planes: &ReferencePlanes,
) -> ActivePlane {
    let eye_in_frame = planes.frame.inverse() * eye;
    planes.plane(plane_kind(mode, axis, eye_in_frame))
}

/// The plane pointer rays are intersected with during one drag.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ActivePlane {
    pub kind: PlaneKind,
    pub origin: DVec3,
    pub normal: DVec3,
}

impl ActivePlane {
    /// World space point where `ray` meets the plane.
    pub fn intersect(&self, ray: Ray) -> Option<DVec3> {
        intersect_plane(self.normal, self.origin, ray.origin, ray.direction)
            .map(|t| ray.point_at(t))
    }
}
