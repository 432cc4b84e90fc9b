//! Causal reference models for CUSUM
//!
//! A reference gives, for every sample, the level the detector compares the
//! observation against. Every model here is causal: the reference at index
//! `i` only depends on observations `1..=i`, so computing it over a prefix of
//! a signal yields a prefix of the full reference.

use amoc_core::{Error, Result};

/// A causal per-sample reference level
pub trait ReferenceModel {
    /// Name used in logs and reports
    fn name(&self) -> &'static str;

    /// Compute the reference sequence for the given observations
    fn reference(&self, observed: &[f64]) -> Vec<f64>;
}

/// Cumulative average of the observations seen so far (inclusive)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningMean;

impl ReferenceModel for RunningMean {
    fn name(&self) -> &'static str {
        "running_mean"
    }

    fn reference(&self, observed: &[f64]) -> Vec<f64> {
        observed
            .iter()
            .enumerate()
            .scan(0.0, |sum, (i, &x)| {
                *sum += x;
                Some(*sum / (i + 1) as f64)
            })
            .collect()
    }
}

/// The same level for every sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantReference {
    level: f64,
}

impl ConstantReference {
    pub fn new(level: f64) -> Self {
        Self { level }
    }

    pub fn level(&self) -> f64 {
        self.level
    }
}

impl ReferenceModel for ConstantReference {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn reference(&self, observed: &[f64]) -> Vec<f64> {
        vec![self.level; observed.len()]
    }
}

/// Exponentially weighted moving average, seeded with the first observation
///
/// `m[1] = x[1]`, `m[i] = lambda * x[i] + (1 - lambda) * m[i-1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialMean {
    lambda: f64,
}

impl ExponentialMean {
    /// Create an EWMA reference; `lambda` must lie in (0, 1]
    pub fn new(lambda: f64) -> Result<Self> {
        if !(lambda > 0.0 && lambda <= 1.0) {
            return Err(Error::invalid_parameter(format!(
                "EWMA lambda must be in (0, 1], got {lambda}"
            )));
        }
        Ok(Self { lambda })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl ReferenceModel for ExponentialMean {
    fn name(&self) -> &'static str {
        "exponential_mean"
    }

    fn reference(&self, observed: &[f64]) -> Vec<f64> {
        let mut iter = observed.iter();
        let first = match iter.next() {
            Some(&x) => x,
            None => return Vec::new(),
        };

        let mut reference = Vec::with_capacity(observed.len());
        reference.push(first);
        let mut level = first;
        for &x in iter {
            level = self.lambda * x + (1.0 - self.lambda) * level;
            reference.push(level);
        }
        reference
    }
}
