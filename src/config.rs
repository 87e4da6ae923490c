use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

/// Tracker settings, fixed for the lifetime of a tracker.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Margin, in percent of the larger window side, added around the
    /// converged mean-shift window before the ellipse fit.
    pub expansion_ratio: f64,
    pub max_iterations: usize,
    /// Mean-shift stops once the window center moves less than this (px).
    pub max_step_size: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            expansion_ratio: 5.0,
            max_iterations: 20,
            max_step_size: 0.5,
        }
    }
}

impl TrackerConfig {
    pub fn new(expansion_ratio: f64, max_iterations: usize, max_step_size: f64) -> Self {
        Self {
            expansion_ratio,
            max_iterations,
            max_step_size,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.expansion_ratio.is_finite() || self.expansion_ratio < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "expansion_ratio must be a non-negative number, got {}",
                self.expansion_ratio
            )));
        }

        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "max_iterations must be positive".into(),
            ));
        }

        if !self.max_step_size.is_finite() || self.max_step_size < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max_step_size must be a non-negative number, got {}",
                self.max_step_size
            )));
        }

        Ok(())
    }
}
