//! Per-mode handle tags and default picker surfaces.
//!
//! Pickers are defined at unit gizmo scale around the gizmo origin. They are
//! posed each frame with the placement of the part carrying the same tag.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::config::{GizmoAxis, GizmoMode};
use crate::math::DVec3;
use crate::picking::{PickShape, PickSurface};

const ARROW_START: f64 = 0.1;
const ARROW_END: f64 = 1.1;
const ARROW_RADIUS: f64 = 0.2;
const CENTER_HALF_SIZE: f64 = 0.2;
const PLANE_HALF_SIZE: f64 = 0.2;
const PLANE_OFFSET: f64 = 0.2;
const RING_RADIUS: f64 = 1.0;
const RING_TUBE: f64 = 0.12;
const VIEW_RING_RADIUS: f64 = 1.25;

/// Tags of the visual parts shown in `mode`.
pub fn handle_axes(mode: GizmoMode) -> &'static [GizmoAxis] {
    match mode {
        GizmoMode::Translate => &[
            GizmoAxis::X,
            GizmoAxis::Y,
            GizmoAxis::Z,
            GizmoAxis::XYZ,
            GizmoAxis::XY,
            GizmoAxis::YZ,
            GizmoAxis::XZ,
        ],
        GizmoMode::Rotate => &[
            GizmoAxis::X,
            GizmoAxis::Y,
            GizmoAxis::Z,
            GizmoAxis::E,
            GizmoAxis::XYZE,
        ],
        GizmoMode::Scale => &[GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z, GizmoAxis::XYZ],
    }
}

/// Default picker set for `mode`.
///
/// The trackball ring is only pickable when `trackball` is set.
pub fn default_pickers(mode: GizmoMode, trackball: bool) -> Vec<PickSurface<GizmoAxis>> {
    match mode {
        GizmoMode::Translate => {
            let mut pickers = arrow_pickers();
            pickers.push(PickSurface::new(GizmoAxis::XYZ, PickShape::Sphere {
                radius: CENTER_HALF_SIZE,
            }));
            pickers.extend([
                plane_picker(GizmoAxis::XY, DVec3::Z, DVec3::X, DVec3::new(1.0, 1.0, 0.0)),
                plane_picker(GizmoAxis::YZ, DVec3::X, DVec3::Y, DVec3::new(0.0, 1.0, 1.0)),
                plane_picker(GizmoAxis::XZ, DVec3::Y, DVec3::X, DVec3::new(1.0, 0.0, 1.0)),
            ]);
            pickers
        }
        GizmoMode::Rotate => {
            let mut pickers = vec![
                ring_picker(GizmoAxis::X, DVec3::X, DVec3::Z, RING_RADIUS, FRAC_PI_2),
                ring_picker(GizmoAxis::Y, DVec3::Y, DVec3::Z, RING_RADIUS, FRAC_PI_2),
                ring_picker(GizmoAxis::Z, DVec3::Z, DVec3::X, RING_RADIUS, FRAC_PI_2),
                ring_picker(GizmoAxis::E, DVec3::Z, DVec3::X, VIEW_RING_RADIUS, PI),
            ];
            if trackball {
                pickers.push(ring_picker(GizmoAxis::XYZE, DVec3::Z, DVec3::X, RING_RADIUS, PI));
            }
            pickers
        }
        GizmoMode::Scale => {
            let mut pickers = arrow_pickers();
            pickers.push(PickSurface::new(GizmoAxis::XYZ, PickShape::Cuboid {
                half_extents: DVec3::splat(CENTER_HALF_SIZE),
            }));
            pickers
        }
    }
}

fn arrow_pickers() -> Vec<PickSurface<GizmoAxis>> {
    [(GizmoAxis::X, DVec3::X), (GizmoAxis::Y, DVec3::Y), (GizmoAxis::Z, DVec3::Z)]
        .into_iter()
        .map(|(axis, direction)| {
            PickSurface::new(axis, PickShape::Cylinder {
                start: direction * ARROW_START,
                end: direction * ARROW_END,
                radius: ARROW_RADIUS,
            })
        })
        .collect()
}

fn plane_picker(
    axis: GizmoAxis,
    normal: DVec3,
    tangent: DVec3,
    corner: DVec3,
) -> PickSurface<GizmoAxis> {
    PickSurface::new(axis, PickShape::Quad {
        normal,
        tangent,
        half_size: PLANE_HALF_SIZE,
    })
    .with_translation(corner * PLANE_OFFSET)
}

fn ring_picker(
    axis: GizmoAxis,
    normal: DVec3,
    mid: DVec3,
    radius: f64,
    half_angle: f64,
) -> PickSurface<GizmoAxis> {
    PickSurface::new(axis, PickShape::Arc {
        normal,
        mid,
        radius,
        tube: RING_TUBE,
        half_angle,
    })
}
