pub use crate::camera::{
    Camera, CameraProjection, CustomProjection, Orthographic, Perspective, Projection,
};
pub use crate::config::{
    AxisComponent, ConfigError, GizmoAxis, GizmoConfig, GizmoMode, GizmoSpace, GizmoVisuals,
};
pub use crate::controls::{
    PointerButton, PointerEvent, PointerKind, PointerPhase, TransformControls,
};
pub use crate::events::{ControlEvent, ListenerId};
pub use crate::handles::{default_pickers, handle_axes};
pub use crate::math::{Ray, Transform};
pub use crate::picking::{PickHit, PickShape, PickSurface};
pub use crate::placement::{PartPlacement, Placement};
pub use crate::session::{DragSnapshot, InteractionState};
pub use crate::shortcuts::Shortcut;
pub use crate::snap::SnapSettings;
pub use crate::target::Target;

pub use enumset::{EnumSet, enum_set};

pub use mint;

pub use ecolor::Color32;
pub use emath::{Pos2, Rect};
