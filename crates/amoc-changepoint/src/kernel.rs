//! CUSUM computation kernel
//!
//! The kernel holds the recurrence only; choosing the reference is the
//! detector's job.

/// Online one-sided CUSUM statistic
///
/// The first update always yields 0; every later update yields
/// `max(0, previous + (observed - reference) - drift)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CusumState {
    statistic: f64,
    drift: f64,
    observations: usize,
}

impl CusumState {
    pub fn new(drift: f64) -> Self {
        Self {
            statistic: 0.0,
            drift,
            observations: 0,
        }
    }

    /// Feed one observation and its reference level, returning the new score
    pub fn update(&mut self, observed: f64, reference: f64) -> f64 {
        if self.observations > 0 {
            let accumulated = self.statistic + (observed - reference) - self.drift;
            self.statistic = if accumulated > 0.0 { accumulated } else { 0.0 };
        }
        self.observations += 1;
        self.statistic
    }

    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    /// Number of observations processed so far
    pub fn observations(&self) -> usize {
        self.observations
    }

    pub fn reset(&mut self) {
        self.statistic = 0.0;
        self.observations = 0;
    }
}

/// Kernel for batch CUSUM computations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CusumKernel {
    drift: f64,
}

impl CusumKernel {
    pub fn new(drift: f64) -> Self {
        Self { drift }
    }

    pub fn drift(&self) -> f64 {
        self.drift
    }

    /// Compute the CUSUM scores of `observed` against `reference`
    ///
    /// Both slices must have the same length; the detector checks this.
    pub fn compute_cusum(&self, observed: &[f64], reference: &[f64]) -> Vec<f64> {
        debug_assert_eq!(observed.len(), reference.len());

        let mut state = CusumState::new(self.drift);
        observed
            .iter()
            .zip(reference)
            .map(|(&x, &r)| state.update(x, r))
            .collect()
    }
}
