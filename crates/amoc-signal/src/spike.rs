//! Spike templates embedded into synthetic signals

use std::f64::consts::PI;

/// Fixed-shape, noise-free spike added to the baseline at the onset
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeTemplate {
    values: Vec<f64>,
}

impl SpikeTemplate {
    /// Half a sine period stretched over `length` samples
    ///
    /// Sample `k` is `peak * sin(pi * k / (length - 1))`, so the template starts
    /// and ends at zero and reaches `peak` in the middle. A single-sample
    /// template is `[0.0]`.
    pub fn half_sine(length: usize, peak: f64) -> Self {
        let values = match length {
            0 => Vec::new(),
            1 => vec![0.0],
            _ => {
                let span = (length - 1) as f64;
                (0..length)
                    .map(|k| peak * (PI * k as f64 / span).sin())
                    .collect()
            }
        };
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Largest amplitude of the template
    pub fn peak(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}
