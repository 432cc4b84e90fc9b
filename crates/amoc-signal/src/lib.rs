//! Labeled synthetic signals for detector evaluation
//!
//! A [`Signal`] is a flat, noisy series with a single half-sine spike. Every
//! sample carries its noise-free baseline and a ground-truth
//! [`ActivityLabel`], which is what the evaluator scores detections against.
//!
//! ```rust
//! use amoc_signal::{GeneratorParameters, SignalGenerator, SignalId};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let params = GeneratorParameters::default()
//!     .with_num_samples(1000)
//!     .with_spike_length(100)
//!     .with_noise(0.0, 1.0);
//! let generator = SignalGenerator::new(params).unwrap();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let signal = generator.generate(SignalId(0), &mut rng);
//!
//! assert_eq!(signal.len(), 1000);
//! assert_eq!(signal.active_len(), 100);
//! ```

pub mod export;
pub mod generator;
pub mod spike;
pub mod types;

pub use export::{read_signals_csv, write_signals_csv};
pub use generator::{GeneratorParameters, SignalGenerator};
pub use spike::SpikeTemplate;
pub use types::{ActivityLabel, Sample, Signal, SignalId};
