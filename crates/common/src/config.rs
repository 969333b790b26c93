//! Simulation configuration.
//!
//! Loaded from YAML. Every field has a default, so a partial file (or no file
//! at all) still yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Which point the tracking volume is centred on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingCenter {
    /// The rig origin lifted by the user height. The volume stays put while
    /// the user walks, like a physical play area.
    #[default]
    Room,
    /// The torso lifted by the user height. The volume travels with the user.
    Torso,
}

/// How a key-up is matched against a held key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseMatch {
    /// Any release of the key clears the latch, whatever modifiers are down.
    #[default]
    KeyOnly,
    /// The release must carry the same modifiers as the press. Releasing a
    /// modifier first leaves the latch set until a matching release arrives.
    Strict,
}

/// Per-controller input options, applied when a controller is built or reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Press threshold for trigger and grip.
    pub axis_threshold: f32,
    /// Whether the primary 2D axis reports touch independently of click.
    pub touch_included: bool,
    /// Whether the primary 2D axis exposes click at all.
    pub click_included: bool,
    /// Whether trigger and grip expose their digital press.
    pub button_included: bool,
    /// Whether the primary button reports touch independently of press.
    pub primary_touch_included: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            axis_threshold: 0.1,
            touch_included: true,
            click_included: true,
            button_included: true,
            primary_touch_included: false,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulated user height in meters.
    pub user_height: f32,
    /// Walking speed in meters per second.
    pub move_speed: f32,
    /// Turning and look speed in degrees per second.
    pub rotate_speed: f32,
    /// Tracking volume radius in meters.
    pub tracking_radius: f32,
    pub tracking_center: TrackingCenter,
    pub release_match: ReleaseMatch,
    pub controller: ControllerConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            user_height: 1.7,
            move_speed: 1.45,
            rotate_speed: 30.0,
            tracking_radius: 2.0,
            tracking_center: TrackingCenter::default(),
            release_match: ReleaseMatch::default(),
            controller: ControllerConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Load a file, falling back to defaults when it is missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded simulation config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the integrator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("user_height", self.user_height)?;
        positive("tracking_radius", self.tracking_radius)?;
        non_negative("move_speed", self.move_speed)?;
        non_negative("rotate_speed", self.rotate_speed)?;

        let threshold = self.controller.axis_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid {
                field: "controller.axis_threshold",
                reason: format!("{threshold} is outside [0, 1]"),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} must be a finite number above zero"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} must be a finite, non-negative number"),
        })
    }
}
