//! Per-signal outcomes and their aggregation
//!
//! For a given threshold each signal contributes a detection flag, a count of
//! false alarms and the number of inactive samples those alarms are drawn
//! from. Rates are computed from the summed counts, never by averaging
//! per-signal rates.

use crate::evaluator::ScoredSignal;
use amoc_core::{Error, Result};
use amoc_signal::SignalId;
use std::collections::BTreeMap;
use std::ops::Range;

/// Outcome of thresholding one signal's scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalOutcome {
    /// A sample inside the evaluation window scored above the threshold
    pub detected: bool,
    /// Inactive samples scoring above the threshold
    pub false_alarms: usize,
    /// Inactive samples in the signal
    pub inactive_samples: usize,
}

/// Threshold-independent summary of a scored signal
///
/// Holds the peak score inside the evaluation window and the sorted scores of
/// the inactive region, so any threshold can be answered with a comparison
/// and a binary search.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalProfile {
    id: SignalId,
    window: Range<usize>,
    window_peak: Option<f64>,
    inactive_scores: Vec<f64>,
}

impl SignalProfile {
    /// Summarise a scored signal
    ///
    /// The evaluation window is the first `max_latency` samples of the active
    /// region, or all of it when `max_latency` is `None`.
    pub fn new(scored: &ScoredSignal, max_latency: Option<usize>) -> Self {
        let signal = scored.signal();
        let scores = scored.scores().values();

        let active = signal.active_range();
        let window_len = max_latency.map_or(active.len(), |k| k.min(active.len()));
        let window = active.start..active.start + window_len;

        let window_peak = scores[window.clone()].iter().copied().reduce(f64::max);

        let mut inactive_scores: Vec<f64> = scores
            .iter()
            .zip(signal.labels())
            .filter(|(_, label)| !label.is_active())
            .map(|(&score, _)| score)
            .collect();
        inactive_scores.sort_unstable_by(f64::total_cmp);

        Self {
            id: signal.id(),
            window,
            window_peak,
            inactive_scores,
        }
    }

    pub fn id(&self) -> SignalId {
        self.id
    }

    /// 0-based positions counted toward a successful detection
    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    /// Highest score inside the evaluation window
    pub fn window_peak(&self) -> Option<f64> {
        self.window_peak
    }

    /// Threshold this signal's scores
    pub fn outcome(&self, threshold: f64) -> SignalOutcome {
        let at_or_below = self.inactive_scores.partition_point(|&s| s <= threshold);
        SignalOutcome {
            detected: self.window_peak.is_some_and(|peak| peak > threshold),
            false_alarms: self.inactive_scores.len() - at_or_below,
            inactive_samples: self.inactive_scores.len(),
        }
    }
}

/// Outcomes of every signal at one threshold, keyed by signal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeTable {
    outcomes: BTreeMap<SignalId, SignalOutcome>,
}

impl OutcomeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Threshold every profile
    pub fn from_profiles(profiles: &[SignalProfile], threshold: f64) -> Self {
        let mut table = Self::new();
        for profile in profiles {
            table.record(profile.id(), profile.outcome(threshold));
        }
        table
    }

    /// Record a signal's outcome, merging with any earlier record for the same signal
    pub fn record(&mut self, id: SignalId, outcome: SignalOutcome) {
        let entry = self.outcomes.entry(id).or_default();
        entry.detected |= outcome.detected;
        entry.false_alarms += outcome.false_alarms;
        entry.inactive_samples += outcome.inactive_samples;
    }

    pub fn get(&self, id: SignalId) -> Option<&SignalOutcome> {
        self.outcomes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SignalId, &SignalOutcome)> {
        self.outcomes.iter()
    }

    /// Number of signals detected within their evaluation window
    pub fn detections(&self) -> usize {
        self.outcomes.values().filter(|o| o.detected).count()
    }

    pub fn false_alarms(&self) -> usize {
        self.outcomes.values().map(|o| o.false_alarms).sum()
    }

    pub fn inactive_samples(&self) -> usize {
        self.outcomes.values().map(|o| o.inactive_samples).sum()
    }

    /// Summed false alarms over summed inactive samples
    ///
    /// A signal set without any inactive sample cannot raise a false alarm,
    /// so its rate is 0.
    pub fn false_alarm_rate(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::EmptySignalSet);
        }
        let inactive = self.inactive_samples();
        if inactive == 0 {
            return Ok(0.0);
        }
        Ok(self.false_alarms() as f64 / inactive as f64)
    }

    /// Fraction of signals detected within their evaluation window
    pub fn total_score(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::EmptySignalSet);
        }
        Ok(self.detections() as f64 / self.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amoc_changepoint::ScoreSequence;
    use amoc_signal::{ActivityLabel, Signal};

    fn scored(id: usize, scores: Vec<f64>, active: Range<usize>) -> ScoredSignal {
        let n = scores.len();
        let labels = (0..n)
            .map(|i| {
                if active.contains(&i) {
                    ActivityLabel::Active
                } else {
                    ActivityLabel::Inactive
                }
            })
            .collect();
        let signal = Signal::from_parts(SignalId(id), vec![0.0; n], vec![0.0; n], labels).unwrap();
        ScoredSignal::new(signal, ScoreSequence::from_values(scores).unwrap()).unwrap()
    }

    #[test]
    fn test_profile_counts_inactive_alarms() {
        // inactive: 0, 1, 2, 6, 7 ; active: 3, 4, 5
        let signal = scored(0, vec![0.0, 2.0, 4.0, 1.0, 5.0, 3.0, 6.0, 0.5], 3..6);
        let profile = SignalProfile::new(&signal, None);

        assert_eq!(profile.window(), 3..6);
        assert_eq!(profile.window_peak(), Some(5.0));

        let outcome = profile.outcome(1.5);
        assert!(outcome.detected);
        assert_eq!(outcome.false_alarms, 3); // 2.0, 4.0, 6.0
        assert_eq!(outcome.inactive_samples, 5);

        let outcome = profile.outcome(5.0);
        assert!(!outcome.detected);
        assert_eq!(outcome.false_alarms, 1);
    }

    #[test]
    fn test_latency_window_truncates_detection() {
        // Score only rises late in the active region
        let signal = scored(0, vec![0.0, 0.0, 0.0, 0.0, 0.0, 9.0, 0.0], 2..6);

        let whole = SignalProfile::new(&signal, None);
        assert!(whole.outcome(1.0).detected);

        let early = SignalProfile::new(&signal, Some(2));
        assert_eq!(early.window(), 2..4);
        assert!(!early.outcome(1.0).detected);
        // Late detections are not false alarms either
        assert_eq!(early.outcome(1.0).false_alarms, 0);
    }

    #[test]
    fn test_signal_without_activity_is_never_detected() {
        let signal = scored(0, vec![0.0], 0..0);
        let profile = SignalProfile::new(&signal, None);
        assert_eq!(profile.window_peak(), None);
        assert!(!profile.outcome(-1.0).detected);
        assert_eq!(profile.outcome(-1.0).false_alarms, 1);
    }

    #[test]
    fn test_table_rates() {
        let profiles = vec![
            SignalProfile::new(&scored(0, vec![0.0, 3.0, 5.0, 0.0], 2..3), None),
            SignalProfile::new(&scored(1, vec![0.0, 0.0, 1.0, 0.0], 2..3), None),
        ];
        let table = OutcomeTable::from_profiles(&profiles, 2.0);

        assert_eq!(table.len(), 2);
        assert_eq!(table.detections(), 1);
        assert_eq!(table.false_alarms(), 1);
        assert_eq!(table.inactive_samples(), 6);
        assert_eq!(table.false_alarm_rate().unwrap(), 1.0 / 6.0);
        assert_eq!(table.total_score().unwrap(), 0.5);
        assert!(table.get(SignalId(0)).unwrap().detected);
    }

    #[test]
    fn test_record_merges_same_signal() {
        let mut table = OutcomeTable::new();
        let outcome = SignalOutcome {
            detected: false,
            false_alarms: 2,
            inactive_samples: 10,
        };
        table.record(SignalId(4), outcome);
        table.record(
            SignalId(4),
            SignalOutcome {
                detected: true,
                ..outcome
            },
        );

        assert_eq!(table.len(), 1);
        let merged = table.get(SignalId(4)).unwrap();
        assert!(merged.detected);
        assert_eq!(merged.false_alarms, 4);
        assert_eq!(merged.inactive_samples, 20);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let table = OutcomeTable::new();
        assert!(matches!(table.false_alarm_rate(), Err(Error::EmptySignalSet)));
        assert!(matches!(table.total_score(), Err(Error::EmptySignalSet)));
    }

    #[test]
    fn test_no_inactive_samples_gives_zero_rate() {
        let profiles = vec![SignalProfile::new(&scored(0, vec![0.0, 1.0], 0..2), None)];
        let table = OutcomeTable::from_profiles(&profiles, -1.0);
        assert_eq!(table.false_alarm_rate().unwrap(), 0.0);
        assert_eq!(table.total_score().unwrap(), 1.0);
    }
}
