//! Synthetic spike-signal generation
//!
//! Each signal is flat (zero baseline) apart from one half-sine spike placed
//! uniformly at random so that it fits entirely inside the sample range.
//! Gaussian noise is added to every sample independently.

use crate::spike::SpikeTemplate;
use crate::types::{Signal, SignalId};
use amoc_core::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Parameters for synthetic signal generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParameters {
    /// Number of samples per signal (indices 1..=num_samples)
    pub num_samples: usize,
    /// Length of the spike and of the active region
    pub spike_length: usize,
    /// Mean of the additive Gaussian noise
    pub noise_mean: f64,
    /// Standard deviation of the additive Gaussian noise
    pub noise_std: f64,
    /// Height of the half-sine spike
    pub peak_amplitude: f64,
}

impl Default for GeneratorParameters {
    fn default() -> Self {
        Self {
            num_samples: 1000,
            spike_length: 100,
            noise_mean: 0.0,
            noise_std: 1.0,
            peak_amplitude: 1.0,
        }
    }
}

impl GeneratorParameters {
    pub fn with_num_samples(mut self, num_samples: usize) -> Self {
        self.num_samples = num_samples;
        self
    }

    pub fn with_spike_length(mut self, spike_length: usize) -> Self {
        self.spike_length = spike_length;
        self
    }

    /// Set the noise mean and standard deviation
    pub fn with_noise(mut self, mean: f64, std: f64) -> Self {
        self.noise_mean = mean;
        self.noise_std = std;
        self
    }

    pub fn with_peak_amplitude(mut self, peak_amplitude: f64) -> Self {
        self.peak_amplitude = peak_amplitude;
        self
    }

    /// Check that a spike fits in the range and the noise model is well formed
    pub fn validate(&self) -> Result<()> {
        if self.num_samples == 0 {
            return Err(Error::invalid_parameter("num_samples must be positive"));
        }
        if self.spike_length == 0 {
            return Err(Error::invalid_parameter("spike_length must be positive"));
        }
        if self.spike_length > self.num_samples {
            return Err(Error::invalid_parameter(format!(
                "spike_length {} exceeds the sample range 1..={}",
                self.spike_length, self.num_samples
            )));
        }
        if !self.noise_mean.is_finite() {
            return Err(Error::non_finite("noise_mean"));
        }
        if !self.noise_std.is_finite() {
            return Err(Error::non_finite("noise_std"));
        }
        if self.noise_std < 0.0 {
            return Err(Error::invalid_parameter(format!(
                "noise_std must be non-negative, got {}",
                self.noise_std
            )));
        }
        if !self.peak_amplitude.is_finite() {
            return Err(Error::non_finite("peak_amplitude"));
        }
        Ok(())
    }

    /// Number of distinct onsets a spike can take, `None` if it doesn't fit
    pub fn onset_positions(&self) -> Option<usize> {
        if self.spike_length == 0 {
            return None;
        }
        self.num_samples
            .checked_sub(self.spike_length)
            .map(|slack| slack + 1)
    }
}

/// Generator of labeled spike signals
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    params: GeneratorParameters,
    template: SpikeTemplate,
    noise: Normal<f64>,
    onsets: usize,
}

impl SignalGenerator {
    /// Create a generator, rejecting parameters that cannot produce a signal
    pub fn new(params: GeneratorParameters) -> Result<Self> {
        params.validate()?;
        let noise = Normal::new(params.noise_mean, params.noise_std)
            .map_err(|e| Error::invalid_parameter(format!("noise distribution: {e}")))?;
        let onsets = params.onset_positions().ok_or_else(|| {
            Error::invalid_parameter("spike does not fit inside the sample range")
        })?;
        let template = SpikeTemplate::half_sine(params.spike_length, params.peak_amplitude);
        Ok(Self {
            params,
            template,
            noise,
            onsets,
        })
    }

    pub fn parameters(&self) -> &GeneratorParameters {
        &self.params
    }

    pub fn template(&self) -> &SpikeTemplate {
        &self.template
    }

    /// Generate one signal from the caller's random source
    pub fn generate<R: Rng + ?Sized>(&self, id: SignalId, rng: &mut R) -> Signal {
        let n = self.params.num_samples;
        let len = self.params.spike_length;

        // 0-based start
        let start = rng.gen_range(0..self.onsets);
        let active = start..start + len;

        let mut baseline = vec![0.0; n];
        baseline[active.clone()].copy_from_slice(self.template.values());

        let observed = baseline
            .iter()
            .map(|&b| b + self.noise.sample(rng))
            .collect();

        Signal::from_generated(id, observed, baseline, active)
    }

    /// Generate `count` signals in parallel
    ///
    /// Signal `i` draws from its own ChaCha stream seeded with `seed + i`, so
    /// the batch does not depend on how rayon schedules the work.
    #[instrument(
        skip(self),
        fields(num_samples = self.params.num_samples, spike_length = self.params.spike_length)
    )]
    pub fn generate_batch(&self, count: usize, seed: u64) -> Vec<Signal> {
        debug!("Generating {} signals", count);

        (0..count)
            .into_par_iter()
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(i as u64));
                self.generate(SignalId(i), &mut rng)
            })
            .collect()
    }
}
