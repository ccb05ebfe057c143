//! The interaction engine tying picking, plane selection and solving together.

use tracing::{debug, trace, warn};

use crate::camera::{Camera, Projection};
use crate::config::{
    ConfigError, GizmoAxis, GizmoConfig, GizmoMode, GizmoSpace, MIN_SIZE, SHORTCUT_SNAP_ANGLE,
    SHORTCUT_SNAP_DISTANCE, SIZE_STEP, validate_size,
};
use crate::events::{ControlEvent, EventDispatcher, ListenerId};
use crate::handles::default_pickers;
use crate::math::{Pos2, Rect};
use crate::picking::{PickSurface, pick};
use crate::placement::Placement;
use crate::plane::select_plane;
use crate::session::{DragSession, DragSnapshot, InteractionState, PointerState};
use crate::shortcuts::{Shortcut, ShortcutListener};
use crate::snap::SnapSettings;
use crate::solver::{SolveInput, Solver, TransformSolve};
use crate::target::Target;

/// Stage of a pointer interaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The pointer left the viewport.
    Leave,
    /// The platform cancelled the interaction.
    Cancel,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// A pointer event in viewport coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Pos2,
    /// The button that changed, if the platform reports one.
    pub button: Option<PointerButton>,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, position: Pos2) -> Self {
        Self {
            phase,
            position,
            button: None,
            kind: PointerKind::Mouse,
        }
    }

    /// Touch event built from the changed touch points. Only the first one is used.
    pub fn touch(phase: PointerPhase, points: &[Pos2]) -> Option<Self> {
        points.first().map(|&position| Self {
            phase,
            position,
            button: None,
            kind: PointerKind::Touch,
        })
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = Some(button);
        self
    }

    fn is_primary(&self) -> bool {
        self.button.is_none_or(|button| button == PointerButton::Primary)
    }
}

/// Host supplied picker sets, replacing the defaults of a mode.
#[derive(Debug, Clone, Default)]
struct PickerOverrides {
    translate: Option<Vec<PickSurface<GizmoAxis>>>,
    rotate: Option<Vec<PickSurface<GizmoAxis>>>,
    scale: Option<Vec<PickSurface<GizmoAxis>>>,
}

impl PickerOverrides {
    fn get(&self, mode: GizmoMode) -> Option<&[PickSurface<GizmoAxis>]> {
        match mode {
            GizmoMode::Translate => self.translate.as_deref(),
            GizmoMode::Rotate => self.rotate.as_deref(),
            GizmoMode::Scale => self.scale.as_deref(),
        }
    }

    fn set(&mut self, mode: GizmoMode, pickers: Option<Vec<PickSurface<GizmoAxis>>>) {
        match mode {
            GizmoMode::Translate => self.translate = pickers,
            GizmoMode::Rotate => self.rotate = pickers,
            GizmoMode::Scale => self.scale = pickers,
        }
    }
}

/// Pointer driven translate, rotate and scale controls for one attached object.
///
/// Feed pointer events with [`Self::handle_pointer`] and call [`Self::update`]
/// once per frame to get the gizmo [`Placement`] to draw.
#[derive(Debug)]
pub struct TransformControls {
    config: GizmoConfig,
    camera: Camera,
    target: Option<Target>,
    axis: Option<GizmoAxis>,
    pointer: PointerState,
    placement: Placement,
    pickers: PickerOverrides,
    shortcuts: ShortcutListener,
    events: EventDispatcher,
}

impl TransformControls {
    pub fn new(config: GizmoConfig, camera: Camera) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config: config.normalized(),
            camera,
            target: None,
            axis: None,
            pointer: PointerState::default(),
            placement: Placement::default(),
            pickers: PickerOverrides::default(),
            shortcuts: ShortcutListener::default(),
            events: EventDispatcher::default(),
        })
    }

    pub fn config(&self) -> &GizmoConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Replaces the camera. Call whenever the camera moves.
    pub fn set_camera(&mut self, camera: Camera) {
        let was_custom = matches!(self.camera.projection, Projection::Custom(_));
        if !was_custom && matches!(camera.projection, Projection::Custom(_)) {
            warn!("custom camera projection, eye vector falls back to the perspective formula");
        }

        self.camera = camera;
        self.refresh();
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.config.viewport = viewport;
        self.refresh();
        self.emit(ControlEvent::Change);
    }

    pub fn mode(&self) -> GizmoMode {
        self.config.mode
    }

    /// Switches the kind of edit. Scale mode forces local space.
    pub fn set_mode(&mut self, mode: GizmoMode) {
        self.config.mode = mode;
        self.config = self.config.normalized();
        self.axis = None;
        self.pointer.drop_session();

        debug!(%mode, space = %self.config.space, "mode changed");
        self.refresh();
        self.emit(ControlEvent::Change);
    }

    pub fn space(&self) -> GizmoSpace {
        self.config.space
    }

    /// Switches the edit frame. Ignored while scaling, which is always local.
    pub fn set_space(&mut self, space: GizmoSpace) {
        if self.config.mode == GizmoMode::Scale && space == GizmoSpace::World {
            debug!("world space is not available while scaling");
            return;
        }

        self.config.space = space;
        self.pointer.drop_session();

        debug!(%space, "space changed");
        self.refresh();
        self.emit(ControlEvent::Change);
    }

    pub fn size(&self) -> f64 {
        self.config.size
    }

    pub fn set_size(&mut self, size: f64) -> Result<(), ConfigError> {
        validate_size(size)?;
        self.apply_size(size);
        Ok(())
    }

    pub fn set_translation_snap(&mut self, increment: Option<f64>) -> Result<(), ConfigError> {
        let snap = SnapSettings {
            translation: increment,
            ..self.config.snap
        };
        snap.validate()?;
        self.apply_snap(snap);
        Ok(())
    }

    /// Sets the rotation increment in radians.
    pub fn set_rotation_snap(&mut self, increment: Option<f64>) -> Result<(), ConfigError> {
        let snap = SnapSettings {
            rotation: increment,
            ..self.config.snap
        };
        snap.validate()?;
        self.apply_snap(snap);
        Ok(())
    }

    /// Replaces the whole configuration.
    pub fn update_config(&mut self, config: GizmoConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let config = config.normalized();

        if config.mode != self.config.mode {
            self.axis = None;
        }
        if config.mode != self.config.mode || config.space != self.config.space {
            self.pointer.drop_session();
        }

        self.config = config;
        self.refresh();
        self.emit(ControlEvent::Change);
        Ok(())
    }

    /// Replaces the picker set of `mode`. `None` restores the default set.
    ///
    /// Pickers are given at unit gizmo scale around the origin and tagged
    /// with the axis they select.
    pub fn set_pickers(&mut self, mode: GizmoMode, pickers: Option<Vec<PickSurface<GizmoAxis>>>) {
        self.pickers.set(mode, pickers);
    }

    /// Starts controlling `target`.
    pub fn attach(&mut self, target: impl Into<Target>) {
        self.target = Some(target.into());
        self.axis = None;
        self.pointer = PointerState::Released;

        debug!(mode = %self.config.mode, space = %self.config.space, "attached");
        self.refresh();
        self.emit(ControlEvent::Change);
    }

    /// Stops controlling the target and returns it. Any drag in progress is discarded.
    pub fn detach(&mut self) -> Option<Target> {
        let target = self.target.take();
        self.axis = None;
        self.pointer = PointerState::Released;
        self.shortcuts.disarm();
        self.refresh();

        if target.is_some() {
            debug!("detached");
            self.emit(ControlEvent::Change);
        }
        target
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Mutable access for host side edits. Call [`Self::update`] afterwards.
    pub fn target_mut(&mut self) -> Option<&mut Target> {
        self.target.as_mut()
    }

    /// The hovered or dragged axis.
    pub fn axis(&self) -> Option<GizmoAxis> {
        self.axis
    }

    /// A handle press whose drag plane was missed stays `Armed` until release.
    pub fn state(&self) -> InteractionState {
        match self.pointer.session() {
            Some(session) if session.moved => InteractionState::Dragging,
            Some(_) => InteractionState::Armed,
            None if self.axis.is_none() => InteractionState::Idle,
            None if self.pointer.is_held() => InteractionState::Armed,
            None => InteractionState::Hovering,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.session().is_some()
    }

    pub fn shortcuts_armed(&self) -> bool {
        self.shortcuts.is_armed()
    }

    /// Recomputes the placement for this frame.
    pub fn update(&mut self) -> &Placement {
        self.refresh();
        &self.placement
    }

    /// Placement computed by the last refresh.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn add_listener(&mut self, listener: impl FnMut(&ControlEvent) + 'static) -> ListenerId {
        self.events.add(listener)
    }

    /// Returns false if the listener was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.events.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.events.len()
    }

    /// Detaches the target and releases every listener and shortcut binding.
    pub fn dispose(&mut self) {
        self.detach();
        self.shortcuts.disarm();
        self.events.clear();
        debug!("disposed");
    }

    /// Feeds a pointer event. Inert without a target and for non-primary buttons.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.target.is_none() || !event.is_primary() {
            return;
        }

        match event.phase {
            PointerPhase::Down => self.pointer_down(event.position),
            PointerPhase::Move => self.pointer_move(event.position),
            PointerPhase::Up | PointerPhase::Leave | PointerPhase::Cancel => {
                self.pointer_up(event);
            }
        }
    }

    /// Applies a keyboard shortcut. Returns false when shortcuts are not armed.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> bool {
        if !self.shortcuts.is_armed() {
            return false;
        }

        trace!(%shortcut, "shortcut");
        match shortcut {
            Shortcut::ToggleSpace => self.set_space(self.config.space.toggled()),
            Shortcut::EnableSnap => self.apply_snap(SnapSettings::new(
                Some(SHORTCUT_SNAP_DISTANCE),
                Some(SHORTCUT_SNAP_ANGLE),
            )),
            Shortcut::Translate => self.set_mode(GizmoMode::Translate),
            Shortcut::Rotate => self.set_mode(GizmoMode::Rotate),
            Shortcut::Scale => self.set_mode(GizmoMode::Scale),
            Shortcut::Grow => self.apply_size(self.config.size + SIZE_STEP),
            Shortcut::Shrink => self.apply_size((self.config.size - SIZE_STEP).max(MIN_SIZE)),
        }
        true
    }

    fn apply_size(&mut self, size: f64) {
        self.config.size = size;
        self.refresh();
        self.emit(ControlEvent::Change);
    }

    fn apply_snap(&mut self, snap: SnapSettings) {
        self.config.snap = snap;
        self.refresh();
        self.emit(ControlEvent::Change);
    }

    fn refresh(&mut self) {
        self.placement = Placement::compute(
            &self.config,
            &self.camera,
            self.target.as_ref(),
            self.axis,
        );
    }

    fn emit(&mut self, event: ControlEvent) {
        self.events.emit(&event);
    }

    fn pick_axis(&self, position: Pos2) -> Option<GizmoAxis> {
        let mode = self.config.mode;
        let posed = match self.pickers.get(mode) {
            Some(pickers) => self.placement.pose_pickers(pickers),
            None => self
                .placement
                .pose_pickers(&default_pickers(mode, self.config.trackball)),
        };

        pick(position, self.config.viewport, &self.camera, &posed).map(|hit| hit.tag)
    }

    fn hits_target(&self, position: Pos2) -> bool {
        let Some((bounds, world)) = self
            .target
            .as_ref()
            .and_then(|target| target.bounds.map(|bounds| (bounds, target.world_matrix())))
        else {
            return false;
        };

        let surface = PickSurface::new((), bounds).with_transform(world);
        pick(position, self.config.viewport, &self.camera, &[surface]).is_some()
    }

    fn hover(&mut self, position: Pos2) {
        self.refresh();
        let axis = self.pick_axis(position);

        if axis != self.axis {
            trace!(?axis, "hovered axis changed");
            self.axis = axis;
            self.refresh();
            self.emit(ControlEvent::Change);
        }
    }

    fn pointer_down(&mut self, position: Pos2) {
        if self.pointer.is_held() {
            return;
        }

        self.refresh();
        let axis = self.pick_axis(position);

        if self.hits_target(position) {
            debug!("pointer down on target, shortcuts armed");
            self.shortcuts.arm();
        }

        let Some(axis) = axis else {
            if self.axis.take().is_some() {
                self.refresh();
                self.emit(ControlEvent::Change);
            }
            self.pointer = PointerState::Held(None);
            return;
        };

        self.axis = Some(axis);
        self.emit(ControlEvent::MouseDown);
        self.refresh();

        let session = self.start_session(axis, position);
        self.pointer = PointerState::Held(session);
    }

    fn start_session(&self, axis: GizmoAxis, position: Pos2) -> Option<DragSession> {
        let target = self.target.as_ref()?;
        let mode = self.config.mode;

        let planes = self.placement.reference_planes();
        let plane = select_plane(mode, axis, self.placement.eye, &planes);
        let ray = self.camera.pointer_ray(self.config.viewport, position);
        let Some(offset) = plane.intersect(ray) else {
            warn!(%axis, plane = %plane.kind, "pointer ray misses the drag plane, no drag started");
            return None;
        };

        debug!(%mode, %axis, space = %self.config.space, plane = %plane.kind, "drag started");
        Some(DragSession {
            snapshot: DragSnapshot::capture(target, offset),
            plane,
            solver: Solver::new(mode, axis, self.config.space),
            moved: false,
        })
    }

    fn pointer_move(&mut self, position: Pos2) {
        if !self.pointer.is_held() {
            self.hover(position);
            return;
        }

        let ray = self.camera.pointer_ray(self.config.viewport, position);
        let (Some(session), Some(target)) = (self.pointer.session_mut(), self.target.as_mut())
        else {
            return;
        };

        let Some(point) = session.plane.intersect(ray) else {
            trace!("pointer ray misses the drag plane, move skipped");
            return;
        };

        let input = SolveInput {
            point,
            eye: self.placement.eye,
            snap: self.config.snap,
        };
        let update = session.solver.solve(&session.snapshot, &input);
        session.moved = true;
        trace!(?update, "drag update");

        target.apply(update);
        let transform = target.transform;

        self.refresh();
        self.emit(ControlEvent::Change);
        self.emit(ControlEvent::ObjectChange { transform });
    }

    fn pointer_up(&mut self, event: PointerEvent) {
        if self.pointer.is_held() && self.axis.is_some() {
            debug!(mode = %self.config.mode, "drag ended");
            self.emit(ControlEvent::MouseUp {
                mode: self.config.mode,
            });
        }
        self.pointer = PointerState::Released;

        match event.kind {
            // Touch has no hover to fall back to
            PointerKind::Touch => {
                self.axis = None;
                self.refresh();
                self.emit(ControlEvent::Change);
            }
            PointerKind::Mouse => self.hover(event.position),
        }
    }
}
