//! Rounding of drag results to configured increments.

use enumset::EnumSet;

use crate::config::{AxisComponent, ConfigError};
use crate::math::{DVec3, round_to_interval};

/// Optional snapping increments.
///
/// An absent increment passes values through unchanged.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SnapSettings {
    /// Linear increment for translations.
    pub translation: Option<f64>,
    /// Angular increment for rotations, in radians.
    pub rotation: Option<f64>,
}

impl SnapSettings {
    pub const fn new(translation: Option<f64>, rotation: Option<f64>) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn snap_translation(&self, value: f64) -> f64 {
        snap(value, self.translation)
    }

    pub fn snap_rotation(&self, angle: f64) -> f64 {
        snap(angle, self.rotation)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |increment: &f64| !is_valid_increment(*increment);

        if let Some(increment) = self.translation.filter(invalid) {
            return Err(ConfigError::InvalidTranslationSnap(increment));
        }
        if let Some(increment) = self.rotation.filter(invalid) {
            return Err(ConfigError::InvalidRotationSnap(increment));
        }
        Ok(())
    }
}

fn is_valid_increment(increment: f64) -> bool {
    increment.is_finite() && increment > 0.0
}

/// Rounds `value` to the nearest multiple of `increment`.
pub fn snap(value: f64, increment: Option<f64>) -> f64 {
    match increment {
        Some(increment) if is_valid_increment(increment) => round_to_interval(value, increment),
        _ => value,
    }
}

/// Rounds the components listed in `mask`, leaving the others untouched.
pub(crate) fn snap_components(
    mut value: DVec3,
    mask: EnumSet<AxisComponent>,
    increment: f64,
) -> DVec3 {
    for component in mask {
        let i = component.index();
        value[i] = snap(value[i], Some(increment));
    }
    value
}
