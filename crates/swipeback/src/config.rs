#![forbid(unsafe_code)]

//! Configuration for the swipe-back controller.
//!
//! Groups the gesture thresholds and animator tunables into one
//! [`SwipeConfig`] that can be built in code or, with the `config` feature,
//! loaded from TOML or JSON.
//!
//! # Example (TOML)
//!
//! ```toml
//! [gesture]
//! fling_velocity = 300.0
//! completion_threshold = 0.5
//!
//! [animator]
//! duration_ms = 400
//! underlay_offset = -60.0
//! timed_curve = "ease_in_out_spring"
//!
//! [animator.shadow]
//! color = [0, 0, 0]
//! radius = 5.0
//! opacity = 0.2
//! ```
//!
//! Missing sections and fields fall back to their defaults.

#[cfg(feature = "config")]
use std::path::Path;

use swipeback_core::gesture::GestureConfig;

use crate::animator::AnimatorConfig;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SwipeConfig {
    pub gesture: GestureConfig,
    pub animator: AnimatorConfig,
}

impl SwipeConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.gesture.validate();
        errors.extend(self.animator.validate());
        errors
    }

    /// Return `self` if valid, or every validation error at once.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from loading or validating a [`SwipeConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// `Duration` as whole milliseconds.
#[cfg(feature = "config")]
pub(crate) mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
