//! Types produced by detectors

use amoc_core::{Error, Result};
use std::fmt;

/// One detection score per sample, immutable once computed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreSequence {
    values: Vec<f64>,
}

impl ScoreSequence {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Wrap scores produced by some other detector
    ///
    /// Scores may take any finite value; NaN or infinite scores are rejected
    /// because they cannot be compared against a threshold.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if let Some(position) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "score at index {} is not finite",
                position + 1
            )));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest score, `None` for an empty sequence
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Smallest score, `None` for an empty sequence
    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    /// Event-detected flags: `true` where the score exceeds the threshold
    pub fn exceeds(&self, threshold: f64) -> impl Iterator<Item = bool> + '_ {
        self.values.iter().map(move |&v| v > threshold)
    }

    /// 0-based position of the first score above the threshold
    pub fn first_crossing(&self, threshold: f64) -> Option<usize> {
        self.values.iter().position(|&v| v > threshold)
    }
}

impl fmt::Display for ScoreSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max() {
            Some(max) => write!(f, "ScoreSequence {{ len: {}, max: {:.3} }}", self.len(), max),
            None => write!(f, "ScoreSequence {{ len: 0 }}"),
        }
    }
}
