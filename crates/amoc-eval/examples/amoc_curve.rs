//! AMOC curve for a CUSUM detector on synthetic spike signals
//!
//! Runs the full pipeline and writes `threshold,false_alarm_rate,total_score`
//! rows to stdout. Pass a JSON experiment configuration as the first argument
//! to override the defaults; set `RUST_LOG=debug` to follow the stages.
//!
//! ```text
//! cargo run -p amoc-eval --example amoc_curve > amoc.csv
//! cargo run -p amoc-eval --example amoc_curve -- experiment.json > amoc.csv
//! ```

use amoc_eval::{Experiment, ExperimentConfig};
use anyhow::Context;
use std::io;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ExperimentConfig::from_path(&path)
            .with_context(|| format!("loading experiment config from {path}"))?,
        None => ExperimentConfig::default(),
    };

    let report = Experiment::new(config)?.run()?;
    report.curve.write_csv(io::stdout().lock())?;

    eprintln!("Signals evaluated: {}", report.signals.len());
    eprintln!("Thresholds swept:  {}", report.curve.len());
    eprintln!("Area under curve:  {:.4}", report.curve.area_under_curve());
    for max_far in [0.001, 0.01, 0.05] {
        match report.curve.best_score_at(max_far) {
            Some(p) => eprintln!(
                "  FAR <= {max_far:<5}: score {:.2} at threshold {:.1} (FAR {:.5})",
                p.total_score, p.threshold, p.false_alarm_rate
            ),
            None => eprintln!("  FAR <= {max_far:<5}: no operating point"),
        }
    }

    Ok(())
}
