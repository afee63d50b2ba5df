//! Numeric settings shared by the solvers.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default absolute tolerance for treating a value as zero.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-6;

/// Settings that control how results are accepted or rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Absolute tolerance for residual forces, magnitudes and angles.
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTolerance`] unless `tolerance` is positive and finite.
    pub fn new(tolerance: f64) -> Result<Self, ConfigError> {
        let config = Self { tolerance };
        config.validate()?;
        Ok(config)
    }

    /// Check a configuration that was built or deserialized directly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTolerance`] unless the tolerance is positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tolerance.is_finite() && self.tolerance > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidTolerance {
                tolerance: self.tolerance,
            })
        }
    }
}
