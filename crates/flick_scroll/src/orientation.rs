//! Orientation policy
//!
//! Resolves the configured [`AxisMode`] of each axis into a can-scroll flag,
//! given whether the content overflows the viewport on that axis.
//!
//! | mode           | vertical   | horizontal |
//! |----------------|------------|------------|
//! | `AlwaysScroll` | true       | true       |
//! | `AutoScroll`   | overflow   | overflow   |
//! | `Hidden`       | false      | false      |
//! | `Default`      | true       | overflow   |
//!
//! Vertical `Default` always scrolls so content that fits still overscrolls
//! and snaps back under a touch drag. Horizontal `Default` behaves like
//! `AutoScroll`.

use std::fmt;
use std::str::FromStr;

use flick_core::events::Axis;
use flick_core::geometry::Size;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Per-axis scrolling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisMode {
    /// Always scrolls
    #[serde(rename = "scroll")]
    AlwaysScroll,
    /// Scrolls only if the content overflows
    #[serde(rename = "auto")]
    AutoScroll,
    /// Never scrolls
    #[serde(rename = "hidden")]
    Hidden,
    /// Axis-dependent touch default (see module docs)
    #[default]
    #[serde(rename = "default")]
    Default,
}

impl AxisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisMode::AlwaysScroll => "scroll",
            AxisMode::AutoScroll => "auto",
            AxisMode::Hidden => "hidden",
            AxisMode::Default => "default",
        }
    }
}

impl fmt::Display for AxisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AxisMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "scroll" => Ok(AxisMode::AlwaysScroll),
            "auto" => Ok(AxisMode::AutoScroll),
            "hidden" => Ok(AxisMode::Hidden),
            "default" => Ok(AxisMode::Default),
            other => Err(ConfigError::UnknownAxisMode(other.to_string())),
        }
    }
}

/// Resolve one axis mode into a can-scroll flag
pub fn resolve(axis: Axis, mode: AxisMode, overflow_present: bool) -> bool {
    match (mode, axis) {
        (AxisMode::AlwaysScroll, _) => true,
        (AxisMode::AutoScroll, _) => overflow_present,
        (AxisMode::Hidden, _) => false,
        (AxisMode::Default, Axis::Vertical) => true,
        (AxisMode::Default, Axis::Horizontal) => overflow_present,
    }
}

/// Can-scroll flags for both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedAxes {
    pub horizontal: bool,
    pub vertical: bool,
}

impl ResolvedAxes {
    pub const NONE: ResolvedAxes = ResolvedAxes {
        horizontal: false,
        vertical: false,
    };

    /// Resolve both axes from their modes and the measured sizes
    ///
    /// Overflow means the content extent is strictly larger than the viewport.
    pub fn resolve(horizontal: AxisMode, vertical: AxisMode, viewport: Size, content: Size) -> Self {
        Self {
            horizontal: resolve(
                Axis::Horizontal,
                horizontal,
                content.width > viewport.width,
            ),
            vertical: resolve(Axis::Vertical, vertical, content.height > viewport.height),
        }
    }

    pub fn allows(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }
}
