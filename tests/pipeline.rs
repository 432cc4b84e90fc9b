//! Generator -> detector -> evaluator through the umbrella crate

use amoc_stats::changepoint::CusumState;
use amoc_stats::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_online_scoring_matches_batch() {
    let generator = SignalGenerator::new(GeneratorParameters::default()).unwrap();
    let signal = generator.generate(SignalId(0), &mut ChaCha8Rng::seed_from_u64(2024));

    let batch = CusumDetector::new(RunningMean).score_signal(&signal).unwrap();

    // Stream the samples one at a time, keeping only a running sum
    let mut state = CusumState::new(0.0);
    let mut sum = 0.0;
    let online: Vec<f64> = signal
        .observed()
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            sum += x;
            state.update(x, sum / (i + 1) as f64)
        })
        .collect();

    assert_eq!(batch.values(), online.as_slice());
}

#[test]
fn test_stronger_spikes_are_easier_to_detect() {
    let detection_at = |peak: f64| {
        let config = ExperimentConfig {
            generator: GeneratorParameters::default().with_peak_amplitude(peak),
            num_signals: 50,
            ..Default::default()
        };
        let report = Experiment::new(config).unwrap().run().unwrap();
        report
            .curve
            .points()
            .iter()
            .find(|p| p.threshold == 60.0)
            .map(|p| p.total_score)
            .unwrap()
    };

    let weak = detection_at(0.5);
    let strong = detection_at(8.0);
    assert!(weak < strong, "weak {weak}, strong {strong}");
    assert!(strong >= 0.9, "strong {strong}");
}
