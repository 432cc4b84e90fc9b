//! CUSUM (Cumulative Sum) change detection
//!
//! One-sided, causal scoring: deviations of the observation above a causal
//! reference accumulate, and the running sum is clamped at zero.

use crate::kernel::CusumKernel;
use crate::reference::{ReferenceModel, RunningMean};
use crate::traits::{ChangePointDetectorProperties, ScoreDetector};
use crate::types::ScoreSequence;
use amoc_core::{Error, Result};
use amoc_signal::Signal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// CUSUM parameters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CusumParameters {
    /// Allowance subtracted from every deviation before accumulating
    pub drift: f64,
}

impl CusumParameters {
    pub fn validate(&self) -> Result<()> {
        if !self.drift.is_finite() {
            return Err(Error::non_finite("CUSUM drift"));
        }
        if self.drift < 0.0 {
            return Err(Error::invalid_parameter(format!(
                "CUSUM drift must be non-negative, got {}",
                self.drift
            )));
        }
        Ok(())
    }
}

/// CUSUM detector scoring observations against a causal reference
#[derive(Debug, Clone)]
pub struct CusumDetector<R = RunningMean> {
    kernel: CusumKernel,
    params: CusumParameters,
    reference: R,
}

impl Default for CusumDetector<RunningMean> {
    fn default() -> Self {
        Self::new(RunningMean)
    }
}

impl<R: ReferenceModel> CusumDetector<R> {
    /// Create a detector with zero drift
    pub fn new(reference: R) -> Self {
        Self {
            kernel: CusumKernel::new(0.0),
            params: CusumParameters::default(),
            reference,
        }
    }

    /// Create a detector with explicit parameters
    pub fn with_parameters(reference: R, params: CusumParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            kernel: CusumKernel::new(params.drift),
            params,
            reference,
        })
    }

    /// Set the drift (allowance)
    pub fn with_drift(self, drift: f64) -> Result<Self> {
        Self::with_parameters(self.reference, CusumParameters { drift })
    }

    pub fn parameters(&self) -> &CusumParameters {
        &self.params
    }

    pub fn reference_model(&self) -> &R {
        &self.reference
    }

    /// Score observations against an externally supplied reference
    ///
    /// The reference must be causal for the scores to be meaningful online;
    /// that is the caller's responsibility.
    pub fn score_with_reference(
        &self,
        observed: &[f64],
        reference: &[f64],
    ) -> Result<ScoreSequence> {
        if reference.len() != observed.len() {
            return Err(Error::size_mismatch(
                observed.len(),
                reference.len(),
                "CUSUM reference",
            ));
        }
        Ok(ScoreSequence::new(
            self.kernel.compute_cusum(observed, reference),
        ))
    }

    /// Score every signal against its own noise-free baseline
    pub fn score_batch_against_baseline(&self, signals: &[Signal]) -> Result<Vec<ScoreSequence>>
    where
        R: Sync,
    {
        debug!("Scoring {} signals against their baselines", signals.len());
        signals
            .par_iter()
            .map(|signal| self.score_with_reference(signal.observed(), signal.baseline()))
            .collect()
    }
}

impl<R: ReferenceModel> ChangePointDetectorProperties for CusumDetector<R> {
    fn algorithm_name(&self) -> &'static str {
        "CUSUM"
    }
}

impl<R: ReferenceModel> ScoreDetector for CusumDetector<R> {
    fn score(&self, observed: &[f64]) -> Result<ScoreSequence> {
        let reference = self.reference.reference(observed);
        self.score_with_reference(observed, &reference)
    }

    #[instrument(
        skip(self, signals),
        fields(reference = self.reference.name(), drift = self.params.drift)
    )]
    fn score_batch(&self, signals: &[Signal]) -> Result<Vec<ScoreSequence>>
    where
        Self: Sync,
    {
        debug!("Scoring {} signals", signals.len());
        signals
            .par_iter()
            .map(|signal| self.score_signal(signal))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ConstantReference;

    #[test]
    fn test_cusum_detects_mean_shift() {
        let detector = CusumDetector::new(ConstantReference::new(0.0));

        // Data with mean shift at index 25
        let mut data = vec![0.0; 50];
        for x in data.iter_mut().skip(25) {
            *x = 3.0;
        }

        let scores = detector.score(&data).unwrap();
        assert_eq!(scores.first_crossing(4.0), Some(26));
        assert_eq!(scores.max(), Some(75.0));
    }

    #[test]
    fn test_running_mean_is_default() {
        let data = [1.0, 1.0, 4.0, 4.0];
        let scores = CusumDetector::new(RunningMean).score(&data).unwrap();

        // Running means: 1, 1, 2, 2.5 -> deviations 0, 0, 2, 1.5
        assert_eq!(scores.values(), &[0.0, 0.0, 2.0, 3.5]);
    }

    #[test]
    fn test_single_sample_scores_zero() {
        let scores = CusumDetector::new(RunningMean).score(&[42.0]).unwrap();
        assert_eq!(scores.values(), &[0.0]);
        assert_eq!(scores.first_crossing(0.0), None);
    }

    #[test]
    fn test_reference_length_mismatch() {
        let detector = CusumDetector::new(RunningMean);
        let result = detector.score_with_reference(&[1.0, 2.0], &[0.0]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_drift_validation() {
        assert!(CusumDetector::new(RunningMean).with_drift(-1.0).is_err());
        assert!(CusumDetector::new(RunningMean).with_drift(f64::INFINITY).is_err());

        let detector = CusumDetector::new(RunningMean).with_drift(0.25).unwrap();
        assert_eq!(detector.parameters().drift, 0.25);
        assert_eq!(detector.algorithm_name(), "CUSUM");
    }
}
