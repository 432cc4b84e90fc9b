//! Threshold sweeps

use amoc_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tolerance absorbing rounding in `(end - start) / step`
const STEP_TOLERANCE: f64 = 1e-9;

/// Largest number of thresholds a sweep may hold
pub const MAX_THRESHOLDS: usize = 1_000_000;

/// Evenly spaced thresholds from `start` to `end` (inclusive when reachable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSweep {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for ThresholdSweep {
    fn default() -> Self {
        Self {
            start: -20.0,
            end: 120.0,
            step: 0.5,
        }
    }
}

impl ThresholdSweep {
    /// Create a sweep, rejecting empty or malformed ranges
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self> {
        let sweep = Self { start, end, step };
        sweep.validate()?;
        Ok(sweep)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(Error::non_finite("threshold sweep bounds"));
        }
        if self.end < self.start {
            return Err(Error::invalid_parameter(format!(
                "threshold sweep end {} is below start {}",
                self.end, self.start
            )));
        }
        if self.step <= 0.0 || !self.step.is_finite() {
            return Err(Error::invalid_parameter(format!(
                "threshold sweep step must be positive and finite, got {}",
                self.step
            )));
        }
        if self.count().is_none() {
            return Err(Error::invalid_parameter(format!(
                "threshold sweep from {} to {} in steps of {} exceeds {} thresholds",
                self.start, self.end, self.step, MAX_THRESHOLDS
            )));
        }
        Ok(())
    }

    /// Threshold count, `None` when the range is malformed or too large
    fn count(&self) -> Option<usize> {
        let intervals = ((self.end - self.start) / self.step + STEP_TOLERANCE).floor();
        if intervals.is_finite() && intervals >= 0.0 && intervals < MAX_THRESHOLDS as f64 {
            Some(intervals as usize + 1)
        } else {
            None
        }
    }

    /// Number of thresholds in the sweep; 0 if it fails validation
    pub fn len(&self) -> usize {
        self.count().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Threshold values in increasing order
    ///
    /// Each value is `start + i * step`, so long sweeps don't accumulate
    /// rounding error.
    pub fn values(&self) -> Vec<f64> {
        (0..self.len())
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }
}
