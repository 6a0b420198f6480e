//! Scroller configuration (scroll.toml)

use std::fs;
use std::path::{Path, PathBuf};

use flick_animation::SpringConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kinetic::KineticConfig;
use crate::orientation::AxisMode;

/// Errors raised while loading or validating a [`ScrollConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown axis mode `{0}` (expected scroll, auto, hidden or default)")]
    UnknownAxisMode(String),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Touch scroller configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Vertical axis mode
    #[serde(default)]
    pub vertical: AxisMode,
    /// Horizontal axis mode
    #[serde(default)]
    pub horizontal: AxisMode,
    /// Claimed drag starts and flicks stop propagation to ancestors
    #[serde(default = "default_true")]
    pub prevent_drag_propagation: bool,
    /// Forwarded to the surface; sizes the scroll container to its parent
    #[serde(default = "default_true")]
    pub fit_to_container: bool,
    /// Kinetic simulator tuning
    #[serde(default)]
    pub kinetic: KineticConfig,
}

fn default_true() -> bool {
    true
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            vertical: AxisMode::Default,
            horizontal: AxisMode::Default,
            prevent_drag_propagation: true,
            fit_to_container: true,
            kinetic: KineticConfig::default(),
        }
    }
}

impl ScrollConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ScrollConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded scroll config");
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reject physics constants the simulator cannot converge with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let k = &self.kinetic;
        non_negative("kinetic.deceleration", k.deceleration)?;
        non_negative("kinetic.velocity_threshold", k.velocity_threshold)?;
        non_negative("kinetic.max_velocity", k.max_velocity)?;
        non_negative("kinetic.max_overscroll", k.max_overscroll)?;
        non_negative("kinetic.drag_resistance", k.drag_resistance)?;
        if k.drag_resistance > 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "kinetic.drag_resistance",
                reason: format!("{} is above 1.0", k.drag_resistance),
            });
        }
        if k.deceleration == 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "kinetic.deceleration",
                reason: "momentum would never stop".to_string(),
            });
        }
        spring("kinetic.bounce_spring", k.bounce_spring)?;
        spring("kinetic.wheel_spring", k.wheel_spring)?;
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("{value} is not a finite, non-negative number"),
        });
    }
    Ok(())
}

fn spring(field: &'static str, config: SpringConfig) -> Result<(), ConfigError> {
    if !config.is_valid() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!(
                "stiffness {}, damping {}, mass {} must be finite and positive",
                config.stiffness, config.damping, config.mass
            ),
        });
    }
    Ok(())
}
