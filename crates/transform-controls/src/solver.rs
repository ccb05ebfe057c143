//! Pure transform math for each gizmo mode.
//!
//! A solver turns the current plane intersection of a drag into a new value
//! for exactly one component of the object's local transform.

use enum_dispatch::enum_dispatch;

use crate::config::{GizmoAxis, GizmoMode, GizmoSpace};
use crate::math::{DQuat, DVec3};
use crate::session::DragSnapshot;
use crate::snap::SnapSettings;

pub use rotation::RotationSolver;
pub use scale::ScaleSolver;
pub use translation::TranslationSolver;

pub(crate) mod rotation;
pub(crate) mod scale;
pub(crate) mod translation;

/// New value for one component of the local transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TransformUpdate {
    Translation(DVec3),
    Rotation(DQuat),
    Scale(DVec3),
}

/// Per-move input of a solver.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolveInput {
    /// Current intersection of the pointer with the active plane
    pub point: DVec3,
    /// Unit vector from the object towards the viewer
    pub eye: DVec3,
    pub snap: SnapSettings,
}

#[enum_dispatch]
pub trait TransformSolve {
    /// Computes the new transform component from the drag start state.
    fn solve(&self, snapshot: &DragSnapshot, input: &SolveInput) -> TransformUpdate;
}

/// Solver of the active mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[enum_dispatch(TransformSolve)]
pub enum Solver {
    Translate(TranslationSolver),
    Rotate(RotationSolver),
    Scale(ScaleSolver),
}

impl Solver {
    pub fn new(mode: GizmoMode, axis: GizmoAxis, space: GizmoSpace) -> Self {
        match mode {
            GizmoMode::Translate => TranslationSolver { axis, space }.into(),
            GizmoMode::Rotate => RotationSolver { axis, space }.into(),
            GizmoMode::Scale => ScaleSolver { axis }.into(),
        }
    }
}
