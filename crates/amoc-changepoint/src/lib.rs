//! CUSUM change detection for AMOC evaluation
//!
//! Detectors here turn an observed sequence into one score per sample. The
//! evaluator thresholds those scores, so a detector never decides on its own
//! when an event happened.
//!
//! # Components
//!
//! - [`ReferenceModel`]: causal per-sample reference levels ([`RunningMean`],
//!   [`ConstantReference`], [`ExponentialMean`])
//! - [`CusumKernel`] / [`CusumState`]: the clamped cumulative-sum recurrence
//! - [`CusumDetector`]: reference + kernel behind the [`ScoreDetector`] trait
//!
//! ## Usage
//!
//! ```rust
//! use amoc_changepoint::{CusumDetector, RunningMean, ScoreDetector};
//!
//! // Flat, then a sustained increase
//! let data: Vec<f64> = (0..50).map(|i| if i < 25 { 0.0 } else { 5.0 }).collect();
//!
//! let detector = CusumDetector::new(RunningMean);
//! let scores = detector.score(&data).unwrap();
//!
//! assert_eq!(scores.len(), data.len());
//! assert_eq!(scores.values()[0], 0.0);
//! assert!(scores.first_crossing(10.0).is_some());
//! ```

pub mod cusum;
pub mod kernel;
pub mod reference;
pub mod traits;
pub mod types;

pub use cusum::{CusumDetector, CusumParameters};
pub use kernel::{CusumKernel, CusumState};
pub use reference::{ConstantReference, ExponentialMean, ReferenceModel, RunningMean};
pub use traits::{ChangePointDetectorProperties, ScoreDetector};
pub use types::ScoreSequence;
