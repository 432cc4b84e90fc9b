//! Core traits for score-producing detectors
//!
//! The evaluator only needs a score per sample, so any detector that can turn
//! an observed sequence into a [`ScoreSequence`] can be swept for an AMOC
//! curve.

use crate::types::ScoreSequence;
use amoc_core::Result;
use amoc_signal::Signal;
use rayon::prelude::*;

/// Properties of a detector that don't depend on its input
pub trait ChangePointDetectorProperties {
    /// Get the name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;
}

/// Detectors that assign a score to every sample of a sequence
pub trait ScoreDetector: ChangePointDetectorProperties {
    /// Score an observed sequence
    fn score(&self, observed: &[f64]) -> Result<ScoreSequence>;

    /// Score the observed amplitudes of a signal
    fn score_signal(&self, signal: &Signal) -> Result<ScoreSequence> {
        self.score(signal.observed())
    }

    /// Score many signals independently
    ///
    /// Default implementation runs on the rayon pool; results keep the input order.
    fn score_batch(&self, signals: &[Signal]) -> Result<Vec<ScoreSequence>>
    where
        Self: Sync,
    {
        signals
            .par_iter()
            .map(|signal| self.score_signal(signal))
            .collect()
    }
}
