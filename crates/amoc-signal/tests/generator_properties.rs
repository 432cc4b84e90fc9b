//! Property-based tests for the signal generator

use amoc_signal::{ActivityLabel, GeneratorParameters, SignalGenerator, SignalId};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

proptest! {
    // Property: the active run is contiguous, exactly spike_length long and inside the range
    #[test]
    fn prop_active_run_is_contiguous_and_fits(
        num_samples in 1usize..400,
        spike_fraction in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let spike_length = ((num_samples as f64 * spike_fraction) as usize).clamp(1, num_samples);
        let params = GeneratorParameters::default()
            .with_num_samples(num_samples)
            .with_spike_length(spike_length);
        let generator = SignalGenerator::new(params).unwrap();
        let signal = generator.generate(SignalId(0), &mut ChaCha8Rng::seed_from_u64(seed));

        prop_assert_eq!(signal.len(), num_samples);

        let active: Vec<usize> = signal
            .labels()
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_active())
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(active.len(), spike_length);
        prop_assert!(active.windows(2).all(|w| w[1] == w[0] + 1));

        let onset = signal.onset().unwrap();
        prop_assert!(onset >= 1);
        prop_assert!(onset + spike_length - 1 <= num_samples);
        prop_assert_eq!(active[0] + 1, onset);
    }

    // Property: baseline is zero outside the spike and non-negative inside it
    #[test]
    fn prop_baseline_is_flat_outside_spike(seed in any::<u64>(), peak in 0.0f64..10.0) {
        let params = GeneratorParameters::default()
            .with_num_samples(300)
            .with_spike_length(40)
            .with_peak_amplitude(peak);
        let generator = SignalGenerator::new(params).unwrap();
        let signal = generator.generate(SignalId(1), &mut ChaCha8Rng::seed_from_u64(seed));

        for sample in signal.samples() {
            match sample.label {
                ActivityLabel::Inactive => prop_assert_eq!(sample.baseline, 0.0),
                ActivityLabel::Active => {
                    prop_assert!(sample.baseline >= -1e-12 && sample.baseline <= peak + 1e-12)
                }
            }
        }
    }
}

#[test]
fn test_onsets_cover_the_valid_range() {
    // With 11 possible onsets and many draws, both extremes should show up
    let params = GeneratorParameters::default()
        .with_num_samples(20)
        .with_spike_length(10);
    let generator = SignalGenerator::new(params).unwrap();
    let signals = generator.generate_batch(500, 3);

    let onsets: Vec<usize> = signals.iter().filter_map(|s| s.onset()).collect();
    assert_eq!(onsets.len(), 500);
    assert!(onsets.iter().all(|&o| (1..=11).contains(&o)));
    assert!(onsets.contains(&1));
    assert!(onsets.contains(&11));
}
