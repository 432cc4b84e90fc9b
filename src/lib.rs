//! AMOC evaluation of event detectors
//!
//! Umbrella crate re-exporting the workspace:
//!
//! - [`signal`]: labeled synthetic spike signals
//! - [`changepoint`]: CUSUM scoring against causal references
//! - [`eval`]: threshold sweeps and AMOC curves
//!
//! ```rust
//! use amoc_stats::prelude::*;
//!
//! let signals = SignalGenerator::new(GeneratorParameters::default())?
//!     .generate_batch(10, 7);
//! let scores = CusumDetector::new(RunningMean).score_batch(&signals)?;
//! let scored = ScoredSignal::pair(signals, scores)?;
//!
//! let curve = AmocEvaluator::default().evaluate(&scored, &ThresholdSweep::default())?;
//! assert_eq!(curve.len(), 281);
//! # Ok::<(), amoc_stats::Error>(())
//! ```

pub use amoc_changepoint as changepoint;
pub use amoc_core::{Error, Result};
pub use amoc_eval as eval;
pub use amoc_signal as signal;

/// Commonly used types from every stage of the pipeline
pub mod prelude {
    pub use amoc_changepoint::{
        ConstantReference, CusumDetector, CusumParameters, ExponentialMean, ReferenceModel,
        RunningMean, ScoreDetector, ScoreSequence,
    };
    pub use amoc_core::{Error, Result};
    pub use amoc_eval::{
        AmocCurve, AmocEvaluator, AmocPoint, EvaluationParameters, Experiment, ExperimentConfig,
        ReferenceConfig, ScoredSignal, ThresholdSweep,
    };
    pub use amoc_signal::{
        ActivityLabel, GeneratorParameters, Signal, SignalGenerator, SignalId,
    };
}
