//! Drag session bookkeeping.

use std::fmt;

use crate::math::{DQuat, DVec3, inverse_scale_of, rotation_of};
use crate::plane::ActivePlane;
use crate::solver::Solver;
use crate::target::Target;

/// Object and parent state captured once when a drag starts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragSnapshot {
    /// Local position
    pub position: DVec3,
    /// Local scale
    pub scale: DVec3,
    /// Local rotation
    pub rotation: DQuat,
    pub world_position: DVec3,
    pub world_rotation: DQuat,
    pub parent_rotation: DQuat,
    /// Cancels the parent's scale on world space deltas
    pub parent_inverse_scale: DVec3,
    /// Point where the pointer met the active plane at press time
    pub offset: DVec3,
}

impl DragSnapshot {
    pub fn capture(target: &Target, offset: DVec3) -> Self {
        let parent = target.parent_matrix();

        Self {
            position: target.transform.translation.into(),
            scale: target.transform.scale.into(),
            rotation: DQuat::from(target.transform.rotation).normalize(),
            world_position: target.world_position(),
            world_rotation: target.world_rotation(),
            parent_rotation: rotation_of(&parent),
            parent_inverse_scale: inverse_scale_of(&parent),
            offset,
        }
    }
}

/// Observable interaction state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InteractionState {
    /// Nothing under the pointer.
    Idle,
    /// The pointer is over a handle.
    Hovering,
    /// A handle was pressed but has not moved yet.
    Armed,
    /// A handle is being dragged.
    Dragging,
}

impl InteractionState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Hovering => "hovering",
            Self::Armed => "armed",
            Self::Dragging => "dragging",
        }
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An active drag. Exists only between a pointer down on a handle
/// and the matching release.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct DragSession {
    pub snapshot: DragSnapshot,
    /// Held fixed for the whole drag
    pub plane: ActivePlane,
    pub solver: Solver,
    pub moved: bool,
}

/// Pointer button state.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub(crate) enum PointerState {
    #[default]
    Released,
    /// Held down, with a session when the press landed on a handle.
    /// Hover updates are suppressed either way.
    Held(Option<DragSession>),
}

impl PointerState {
    pub fn is_held(&self) -> bool {
        matches!(self, Self::Held(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Held(session) => session.as_ref(),
            Self::Released => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut DragSession> {
        match self {
            Self::Held(session) => session.as_mut(),
            Self::Released => None,
        }
    }

    /// Discards any in-flight session but keeps the button held.
    pub fn drop_session(&mut self) {
        if let Self::Held(session) = self {
            *session = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Transform;

    #[test]
    fn capture_reads_local_and_world_state() {
        let target = Target::new(Transform::from_scale_rotation_translation(
            DVec3::new(1.0, 2.0, 3.0),
            DQuat::from_rotation_x(0.2),
            DVec3::new(1.0, 0.0, 0.0),
        ))
        .with_parent(Transform::from_scale_rotation_translation(
            DVec3::splat(4.0),
            DQuat::from_rotation_y(0.3),
            DVec3::new(0.0, 10.0, 0.0),
        ));

        let snapshot = DragSnapshot::capture(&target, DVec3::ONE);

        assert_eq!(snapshot.position, DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(snapshot.scale, DVec3::new(1.0, 2.0, 3.0));
        assert!(snapshot.parent_inverse_scale.abs_diff_eq(DVec3::splat(0.25), 1e-12));
        assert!(
            snapshot
                .parent_rotation
                .abs_diff_eq(DQuat::from_rotation_y(0.3), 1e-12)
        );
        assert!(
            snapshot
                .world_rotation
                .abs_diff_eq(DQuat::from_rotation_y(0.3) * DQuat::from_rotation_x(0.2), 1e-9)
        );
        assert!(snapshot.world_position.abs_diff_eq(target.world_position(), 1e-12));
        assert_eq!(snapshot.offset, DVec3::ONE);
    }

    #[test]
    fn dropping_a_session_keeps_the_button_held() {
        let mut pointer = PointerState::Held(None);
        pointer.drop_session();
        assert!(pointer.is_held());
        assert!(pointer.session().is_none());

        let mut pointer = PointerState::Released;
        pointer.drop_session();
        assert!(!pointer.is_held());
    }
}
