//! Kernel configuration.
//!
//! Groups the numerical resolution of every stage. Loaded from TOML, where
//! every table and field is optional:
//!
//! ```toml
//! [profile]
//! step = 0.05
//!
//! [lathe]
//! radial_segments = 128
//! ```

use barrelcad_kernel_lathe::LatheParams;
use barrelcad_kernel_profile::ProfileParams;
use serde::{Deserialize, Serialize};

use crate::{KernelError, Result};

/// Resolution settings for profile sampling and mesh revolution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Profile sampling.
    pub profile: ProfileParams,
    /// Mesh revolution and surface texture.
    pub lathe: LatheParams,
}

impl KernelConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| KernelError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| KernelError::InvalidConfig(e.to_string()))
    }

    /// Check that every setting can produce a profile and a mesh.
    pub fn validate(&self) -> Result<()> {
        let p = &self.profile;
        let l = &self.lathe;
        positive("profile.step", p.step)?;
        non_negative("profile.min_radius", p.min_radius)?;
        if l.radial_segments < 3 {
            return Err(KernelError::InvalidConfig(format!(
                "lathe.radial_segments must be at least 3, got {}",
                l.radial_segments
            )));
        }
        positive("lathe.wall_step", l.wall_step)?;
        positive("lathe.thread_pitch", l.thread_pitch)?;
        non_negative("lathe.axis_radius", l.axis_radius)?;
        non_negative("lathe.outer_threshold", l.outer_threshold)?;
        non_negative("lathe.bore_tolerance", l.bore_tolerance)?;
        non_negative("lathe.thread_depth", l.thread_depth)?;
        non_negative("lathe.min_radius", l.min_radius)?;
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidConfig(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidConfig(format!(
            "{name} must be non-negative, got {value}"
        )))
    }
}
