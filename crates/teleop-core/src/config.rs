//! Mapper configuration.
//!
//! Step sizes and decay factors are fixed for the lifetime of an
//! [`crate::InputMapper`] except through the `+`/`-` keys, so they are chosen
//! once here and validated before any state is built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid mapper configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Step size is zero, negative, or not finite.
    #[error("{field} must be a positive finite number, got {value}")]
    InvalidStep {
        /// Name of the offending field
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Decay factor outside `[0, 1]`.
    #[error("{field} must be within [0, 1], got {value}")]
    InvalidDecay {
        /// Name of the offending field
        field: &'static str,
        /// Rejected value
        value: f64,
    },
}

/// Initial step sizes and per-tick decay factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Increment applied to speed or turning per movement key.
    pub wheel_step: f64,
    /// Increment applied to the gripper offset per gripper key.
    pub gripper_step: f64,
    /// Multiplier applied to speed every tick.
    pub speed_decay: f64,
    /// Multiplier applied to turning every tick.
    pub turning_decay: f64,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self { wheel_step: 0.5, gripper_step: 0.02, speed_decay: 0.9, turning_decay: 0.5 }
    }
}

impl MapperConfig {
    /// Check every field.
    ///
    /// A decay of exactly 1.0 is accepted: values then hold until a reverse
    /// key zeroes them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_step("wheel_step", self.wheel_step)?;
        check_step("gripper_step", self.gripper_step)?;
        check_decay("speed_decay", self.speed_decay)?;
        check_decay("turning_decay", self.turning_decay)?;
        Ok(())
    }
}

fn check_step(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidStep { field, value })
    }
}

fn check_decay(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDecay { field, value })
    }
}
