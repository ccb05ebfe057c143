//! Optional keyboard binding layered on top of the controls.

use std::fmt;

/// Actions of the reference keyboard binding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// Switch between world and local space.
    ToggleSpace,
    /// Enable the fixed snap increments.
    EnableSnap,
    Translate,
    Rotate,
    Scale,
    /// Make the gizmo larger.
    Grow,
    /// Make the gizmo smaller.
    Shrink,
}

impl Shortcut {
    /// Maps a key name to its shortcut. Letter keys are case insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "q" | "Q" => Some(Self::ToggleSpace),
            "Control" => Some(Self::EnableSnap),
            "w" | "W" => Some(Self::Translate),
            "e" | "E" => Some(Self::Rotate),
            "r" | "R" => Some(Self::Scale),
            "+" | "=" => Some(Self::Grow),
            "-" | "_" => Some(Self::Shrink),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToggleSpace => "toggle-space",
            Self::EnableSnap => "enable-snap",
            Self::Translate => "translate",
            Self::Rotate => "rotate",
            Self::Scale => "scale",
            Self::Grow => "grow",
            Self::Shrink => "shrink",
        }
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether this controls instance currently reacts to shortcuts.
///
/// Armed when a press lands on the attached object, disarmed on detach.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub(crate) struct ShortcutListener {
    armed: bool,
}

impl ShortcutListener {
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(self) -> bool {
        self.armed
    }
}
