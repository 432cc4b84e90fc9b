//! AMOC evaluation over a threshold sweep

use crate::curve::{AmocCurve, AmocPoint};
use crate::outcome::{OutcomeTable, SignalProfile};
use crate::sweep::ThresholdSweep;
use amoc_changepoint::ScoreSequence;
use amoc_core::{Error, Result};
use amoc_signal::Signal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument, trace};

/// Parameters controlling how detections are credited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationParameters {
    /// Only the first `max_latency` active samples count toward a detection;
    /// `None` credits detections anywhere in the active region
    pub max_latency: Option<usize>,
}

impl EvaluationParameters {
    pub fn with_max_latency(mut self, max_latency: usize) -> Self {
        self.max_latency = Some(max_latency);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_latency == Some(0) {
            return Err(Error::invalid_parameter(
                "max_latency must be at least one sample",
            ));
        }
        Ok(())
    }
}

/// A signal paired with the scores a detector assigned to it
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSignal {
    signal: Signal,
    scores: ScoreSequence,
}

impl ScoredSignal {
    /// Pair a signal with its scores; lengths must agree and scores must be finite
    pub fn new(signal: Signal, scores: ScoreSequence) -> Result<Self> {
        if scores.len() != signal.len() {
            return Err(Error::size_mismatch(
                signal.len(),
                scores.len(),
                &format!("scores of signal {}", signal.id()),
            ));
        }
        if scores.values().iter().any(|s| !s.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "signal {} has non-finite scores",
                signal.id()
            )));
        }
        Ok(Self { signal, scores })
    }

    /// Pair signals with scores position by position
    pub fn pair(signals: Vec<Signal>, scores: Vec<ScoreSequence>) -> Result<Vec<Self>> {
        if signals.len() != scores.len() {
            return Err(Error::size_mismatch(
                signals.len(),
                scores.len(),
                "score sequences",
            ));
        }
        signals
            .into_iter()
            .zip(scores)
            .map(|(signal, scores)| Self::new(signal, scores))
            .collect()
    }

    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    pub fn scores(&self) -> &ScoreSequence {
        &self.scores
    }
}

/// Sweeps a decision threshold over scored signals to build an AMOC curve
#[derive(Debug, Clone, Default)]
pub struct AmocEvaluator {
    params: EvaluationParameters,
}

impl AmocEvaluator {
    pub fn new(params: EvaluationParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn parameters(&self) -> &EvaluationParameters {
        &self.params
    }

    /// Evaluate every threshold of the sweep
    #[instrument(
        skip(self, signals, sweep),
        fields(signals = signals.len(), thresholds = sweep.len())
    )]
    pub fn evaluate(&self, signals: &[ScoredSignal], sweep: &ThresholdSweep) -> Result<AmocCurve> {
        sweep.validate()?;
        self.evaluate_thresholds(signals, &sweep.values())
    }

    /// Evaluate an arbitrary set of thresholds
    pub fn evaluate_thresholds(
        &self,
        signals: &[ScoredSignal],
        thresholds: &[f64],
    ) -> Result<AmocCurve> {
        if thresholds.iter().any(|t| t.is_nan()) {
            return Err(Error::invalid_parameter("thresholds must not be NaN"));
        }
        let profiles = self.profiles(signals)?;

        debug!(
            "Evaluating {} thresholds over {} signals",
            thresholds.len(),
            profiles.len()
        );

        let points = thresholds
            .par_iter()
            .map(|&threshold| Self::point(&profiles, threshold))
            .collect::<Result<Vec<_>>>()?;

        Ok(AmocCurve::new(points))
    }

    /// Evaluate a single threshold, keeping the per-signal outcomes
    pub fn evaluate_threshold(
        &self,
        signals: &[ScoredSignal],
        threshold: f64,
    ) -> Result<(AmocPoint, OutcomeTable)> {
        if threshold.is_nan() {
            return Err(Error::invalid_parameter("threshold must not be NaN"));
        }
        let profiles = self.profiles(signals)?;
        let table = OutcomeTable::from_profiles(&profiles, threshold);
        let point = AmocPoint {
            threshold,
            false_alarm_rate: table.false_alarm_rate()?,
            total_score: table.total_score()?,
        };
        Ok((point, table))
    }

    /// Summarise each signal once, independently of any threshold
    fn profiles(&self, signals: &[ScoredSignal]) -> Result<Vec<SignalProfile>> {
        if signals.is_empty() {
            return Err(Error::EmptySignalSet);
        }

        let mut seen = BTreeSet::new();
        let duplicate = signals
            .iter()
            .map(|s| s.signal().id())
            .find(|id| !seen.insert(*id));
        if let Some(duplicate) = duplicate {
            return Err(Error::InvalidInput(format!(
                "signal {duplicate} appears more than once"
            )));
        }

        Ok(signals
            .par_iter()
            .map(|scored| SignalProfile::new(scored, self.params.max_latency))
            .collect())
    }

    fn point(profiles: &[SignalProfile], threshold: f64) -> Result<AmocPoint> {
        let table = OutcomeTable::from_profiles(profiles, threshold);
        let point = AmocPoint {
            threshold,
            false_alarm_rate: table.false_alarm_rate()?,
            total_score: table.total_score()?,
        };
        trace!(
            threshold,
            false_alarm_rate = point.false_alarm_rate,
            total_score = point.total_score,
            "threshold evaluated"
        );
        Ok(point)
    }
}
