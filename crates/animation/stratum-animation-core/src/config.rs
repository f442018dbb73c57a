//! Core configuration for stratum-animation-core.

use serde::{Deserialize, Serialize};

use crate::error::AnimError;
use crate::fcurve::KeyframeSettings;

/// Defaults applied when building animations.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Influence given to newly added layers, in [0, 1].
    pub layer_influence: f32,

    /// Preferred settings for newly inserted keys.
    pub keyframe: KeyframeSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layer_influence: 1.0,
            keyframe: KeyframeSettings::default(),
        }
    }
}

impl Config {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, AnimError> {
        let cfg: Config =
            serde_json::from_str(s).map_err(|e| AnimError::Config(format!("parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AnimError> {
        if !(0.0..=1.0).contains(&self.layer_influence) {
            return Err(AnimError::Config(format!(
                "layer_influence must be in [0, 1], got {}",
                self.layer_influence
            )));
        }
        let thresh = self.keyframe.merge_threshold;
        if !thresh.is_finite() || thresh < 0.0 {
            return Err(AnimError::Config(format!(
                "keyframe.merge_threshold must be finite and >= 0, got {thresh}"
            )));
        }
        Ok(())
    }

    /// Keyframe settings to use for an insertion: the configured preference
    /// when `from_userprefs` is set, the built-in defaults otherwise.
    pub fn keyframe_settings(&self, from_userprefs: bool) -> KeyframeSettings {
        if from_userprefs {
            self.keyframe
        } else {
            KeyframeSettings::default()
        }
    }
}
