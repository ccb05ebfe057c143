use std::fmt;
use std::str::FromStr;

pub use ecolor::Color32;

use emath::Rect;
use enumset::{EnumSet, EnumSetType, enum_set};
use thiserror::Error;

use crate::math::DVec3;
use crate::snap::SnapSettings;

/// Default screen-scale multiplier of the gizmo
pub const DEFAULT_SIZE: f64 = 1.0;
/// Amount by which the size shortcuts grow or shrink the gizmo
pub const SIZE_STEP: f64 = 0.1;
/// Smallest size the size shortcuts can shrink the gizmo to
pub const MIN_SIZE: f64 = 0.1;
/// Translation increment enabled by the snap shortcut
pub const SHORTCUT_SNAP_DISTANCE: f64 = 100.0;
/// Rotation increment enabled by the snap shortcut, in radians (15°)
pub const SHORTCUT_SNAP_ANGLE: f64 = std::f64::consts::PI / 12.0;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("gizmo size must be positive and finite, got {0}")]
    InvalidSize(f64),
    #[error("translation snap must be positive and finite, got {0}")]
    InvalidTranslationSnap(f64),
    #[error("rotation snap must be positive and finite, got {0}")]
    InvalidRotationSnap(f64),
    #[error("unknown gizmo mode `{0}`")]
    UnknownMode(String),
    #[error("unknown gizmo space `{0}`")]
    UnknownSpace(String),
    #[error("unknown gizmo axis `{0}`")]
    UnknownAxis(String),
}

/// Configuration of the transform controls.
///
/// Defines which kind of edit a drag performs and
/// how the gizmo is placed on screen.
#[derive(Debug, Copy, Clone)]
pub struct GizmoConfig {
    /// Screen area the camera renders to. Used to map pointer
    /// positions to normalized device coordinates.
    pub viewport: Rect,
    /// Kind of edit performed by dragging.
    pub mode: GizmoMode,
    /// Whether edits are expressed in the object's own frame or in the world frame.
    /// Always [`GizmoSpace::Local`] while scaling.
    pub space: GizmoSpace,
    /// Screen-scale multiplier of the gizmo.
    pub size: f64,
    /// Optional increments for translation and rotation.
    pub snap: SnapSettings,
    /// Colors of the gizmo parts.
    pub visuals: GizmoVisuals,
    /// Exposes the free trackball (XYZE) picker while rotating.
    pub trackball: bool,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            viewport: Rect::NOTHING,
            mode: GizmoMode::default(),
            space: GizmoSpace::default(),
            size: DEFAULT_SIZE,
            snap: SnapSettings::default(),
            visuals: GizmoVisuals::default(),
            trackball: false,
        }
    }
}

impl GizmoConfig {
    /// Checks that all numeric options are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_size(self.size)?;
        self.snap.validate()
    }

    /// Brings mode and space in line with each other.
    /// Scaling is only defined in local space.
    pub(crate) fn normalized(mut self) -> Self {
        if self.mode == GizmoMode::Scale {
            self.space = GizmoSpace::Local;
        }
        self
    }

    /// Whether local orientation is used
    pub(crate) fn local_space(&self) -> bool {
        self.space == GizmoSpace::Local
    }
}

pub(crate) fn validate_size(size: f64) -> Result<(), ConfigError> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSize(size))
    }
}

/// Operation mode of the gizmo.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum GizmoMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl GizmoMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Rotate => "rotate",
            Self::Scale => "scale",
        }
    }
}

impl fmt::Display for GizmoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GizmoMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "translate" => Ok(Self::Translate),
            "rotate" => Ok(Self::Rotate),
            "scale" => Ok(Self::Scale),
            _ => Err(ConfigError::UnknownMode(s.to_owned())),
        }
    }
}

/// Frame in which edits are expressed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum GizmoSpace {
    /// Axes are aligned to the world frame.
    #[default]
    World,
    /// Axes are aligned to the object's own rotation.
    Local,
}

impl GizmoSpace {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::World => "world",
            Self::Local => "local",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::World => Self::Local,
            Self::Local => Self::World,
        }
    }
}

impl fmt::Display for GizmoSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GizmoSpace {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "world" => Ok(Self::World),
            "local" => Ok(Self::Local),
            _ => Err(ConfigError::UnknownSpace(s.to_owned())),
        }
    }
}

/// A single coordinate axis.
#[derive(Debug, EnumSetType, Hash)]
pub enum AxisComponent {
    X,
    Y,
    Z,
}

impl AxisComponent {
    pub const fn unit(self) -> DVec3 {
        match self {
            Self::X => DVec3::X,
            Self::Y => DVec3::Y,
            Self::Z => DVec3::Z,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Constraint selected by the picked gizmo part.
///
/// Single letters constrain to one axis, letter pairs to a plane.
/// `XYZ` is unconstrained (uniform when scaling), `E` rotates in the
/// screen plane and `XYZE` is the free trackball rotation.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
    XY,
    YZ,
    XZ,
    XYZ,
    E,
    XYZE,
}

impl GizmoAxis {
    pub const ALL: [Self; 9] = [
        Self::X,
        Self::Y,
        Self::Z,
        Self::XY,
        Self::YZ,
        Self::XZ,
        Self::XYZ,
        Self::E,
        Self::XYZE,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::XY => "XY",
            Self::YZ => "YZ",
            Self::XZ => "XZ",
            Self::XYZ => "XYZ",
            Self::E => "E",
            Self::XYZE => "XYZE",
        }
    }

    /// Coordinate axes named by this constraint.
    pub const fn components(self) -> EnumSet<AxisComponent> {
        match self {
            Self::X => enum_set!(AxisComponent::X),
            Self::Y => enum_set!(AxisComponent::Y),
            Self::Z => enum_set!(AxisComponent::Z),
            Self::XY => enum_set!(AxisComponent::X | AxisComponent::Y),
            Self::YZ => enum_set!(AxisComponent::Y | AxisComponent::Z),
            Self::XZ => enum_set!(AxisComponent::X | AxisComponent::Z),
            Self::XYZ | Self::XYZE => {
                enum_set!(AxisComponent::X | AxisComponent::Y | AxisComponent::Z)
            }
            Self::E => EnumSet::new(),
        }
    }

    /// The only coordinate axis of a single-axis constraint.
    pub const fn single_component(self) -> Option<AxisComponent> {
        match self {
            Self::X => Some(AxisComponent::X),
            Self::Y => Some(AxisComponent::Y),
            Self::Z => Some(AxisComponent::Z),
            _ => None,
        }
    }

    /// Parts tagged with an `E` always face the camera.
    pub const fn is_eye_facing(self) -> bool {
        matches!(self, Self::E | Self::XYZE)
    }
}

impl fmt::Display for GizmoAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GizmoAxis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|axis| axis.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownAxis(s.to_owned()))
    }
}

/// Controls the colors of the gizmo parts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GizmoVisuals {
    /// Color of the x axis
    pub x_color: Color32,
    /// Color of the y axis
    pub y_color: Color32,
    /// Color of the z axis
    pub z_color: Color32,
    /// Color of the XY plane handle
    pub xy_color: Color32,
    /// Color of the YZ plane handle
    pub yz_color: Color32,
    /// Color of the XZ plane handle
    pub xz_color: Color32,
    /// Color of the center handle
    pub xyz_color: Color32,
    /// Color of the screen-plane rotation ring
    pub e_color: Color32,
    /// Color of the trackball ring
    pub xyze_color: Color32,
    /// Color used for the part matching the current axis
    pub highlight_color: Color32,
}

impl Default for GizmoVisuals {
    fn default() -> Self {
        Self {
            x_color: Color32::from_rgb(255, 0, 0),
            y_color: Color32::from_rgb(0, 255, 0),
            z_color: Color32::from_rgb(0, 0, 255),
            xy_color: Color32::from_rgba_unmultiplied(255, 255, 0, 64),
            yz_color: Color32::from_rgba_unmultiplied(0, 255, 255, 64),
            xz_color: Color32::from_rgba_unmultiplied(255, 0, 255, 64),
            xyz_color: Color32::from_rgba_unmultiplied(255, 255, 255, 64),
            e_color: Color32::from_rgb(204, 204, 0),
            xyze_color: Color32::from_rgb(120, 120, 120),
            highlight_color: Color32::from_rgb(255, 255, 0),
        }
    }
}

impl GizmoVisuals {
    /// Color of the part tagged with `axis`
    pub fn color(&self, axis: GizmoAxis, highlighted: bool) -> Color32 {
        if highlighted {
            return self.highlight_color;
        }

        match axis {
            GizmoAxis::X => self.x_color,
            GizmoAxis::Y => self.y_color,
            GizmoAxis::Z => self.z_color,
            GizmoAxis::XY => self.xy_color,
            GizmoAxis::YZ => self.yz_color,
            GizmoAxis::XZ => self.xz_color,
            GizmoAxis::XYZ => self.xyz_color,
            GizmoAxis::E => self.e_color,
            GizmoAxis::XYZE => self.xyze_color,
        }
    }
}
