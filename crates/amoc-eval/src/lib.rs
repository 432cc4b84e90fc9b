//! Activity Monitor Operating Characteristic (AMOC) evaluation
//!
//! An AMOC curve relates the false-alarm rate of a streaming detector to its
//! detection rate as the decision threshold is swept, much like an ROC curve
//! for event detection.
//!
//! For every threshold `t` and every signal:
//!
//! - a sample is flagged when its score exceeds `t`
//! - a flagged inactive sample is a false alarm
//! - the signal counts as detected if a flagged sample falls within the first
//!   `max_latency` samples of its active region
//!
//! Rates are then aggregated over the whole signal set: the false-alarm rate
//! is total false alarms over total inactive samples and the total score is
//! the fraction of signals detected.
//!
//! ## Usage
//!
//! ```rust
//! use amoc_eval::{Experiment, ExperimentConfig, ThresholdSweep};
//! use amoc_signal::GeneratorParameters;
//!
//! let config = ExperimentConfig {
//!     generator: GeneratorParameters::default()
//!         .with_num_samples(500)
//!         .with_spike_length(50),
//!     num_signals: 20,
//!     sweep: ThresholdSweep::new(0.0, 50.0, 1.0).unwrap(),
//!     ..Default::default()
//! };
//!
//! let report = Experiment::new(config).unwrap().run().unwrap();
//! assert_eq!(report.curve.len(), 51);
//! for point in report.curve.points() {
//!     assert!((0.0..=1.0).contains(&point.false_alarm_rate));
//!     assert!((0.0..=1.0).contains(&point.total_score));
//! }
//! ```

pub mod curve;
pub mod evaluator;
pub mod experiment;
pub mod outcome;
pub mod sweep;

pub use curve::{AmocCurve, AmocPoint};
pub use evaluator::{AmocEvaluator, EvaluationParameters, ScoredSignal};
pub use experiment::{Experiment, ExperimentConfig, ExperimentReport, ReferenceConfig};
pub use outcome::{OutcomeTable, SignalOutcome, SignalProfile};
pub use sweep::{ThresholdSweep, MAX_THRESHOLDS};
