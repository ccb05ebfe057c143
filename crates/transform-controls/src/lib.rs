//! Pointer driven translate, rotate and scale controls for a single 3d object.
//!
//! The controls turn a stream of pointer events into axis or plane constrained
//! edits of the attached object's transform. They handle local and world space,
//! numeric snapping, and three rotation conventions: around a single axis,
//! in the screen plane and as a free trackball.
//!
//! # Usage
//!
//! Create [`TransformControls`] with a [`GizmoConfig`] and a [`Camera`], then
//! [`attach`](TransformControls::attach) the object to edit. Forward pointer
//! input with [`TransformControls::handle_pointer`] and keep the camera current
//! with [`TransformControls::set_camera`].
//!
//! Rendering is left to the host. [`TransformControls::update`] returns a
//! [`Placement`] describing where the gizmo is, how large it should be drawn,
//! how each part is oriented and which part is highlighted.
//!
//! Listeners registered with [`TransformControls::add_listener`] are notified
//! of every visible change and of every edit of the object's transform.

mod handles;
mod session;
mod target;

pub mod camera;
pub mod config;
pub mod controls;
pub mod events;
pub mod math;
pub mod picking;
pub mod placement;
pub mod plane;
pub mod shortcuts;
pub mod snap;
pub mod solver;

pub mod prelude;

pub use prelude::*;
