//! CSV interchange for signals
//!
//! Signals are written in long format, one row per sample:
//! `signal_id,index,observed,baseline,label`.

use crate::types::{ActivityLabel, Signal, SignalId};
use amoc_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;

#[derive(Debug, Serialize, Deserialize)]
struct SignalRow {
    signal_id: SignalId,
    index: usize,
    observed: f64,
    baseline: f64,
    label: ActivityLabel,
}

/// Write signals as long-format CSV rows
pub fn write_signals_csv<W: io::Write>(writer: W, signals: &[Signal]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for signal in signals {
        for sample in signal.samples() {
            csv.serialize(SignalRow {
                signal_id: signal.id(),
                index: sample.index,
                observed: sample.observed,
                baseline: sample.baseline,
                label: sample.label,
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}

/// Read signals written by [`write_signals_csv`] or recorded elsewhere
///
/// Rows are grouped by `signal_id`; within a signal they must be ordered by
/// `index`, starting at 1 with no gaps.
pub fn read_signals_csv<R: io::Read>(reader: R) -> Result<Vec<Signal>> {
    let mut grouped: BTreeMap<SignalId, Vec<SignalRow>> = BTreeMap::new();
    for row in csv::Reader::from_reader(reader).deserialize() {
        let row: SignalRow = row?;
        grouped.entry(row.signal_id).or_default().push(row);
    }

    grouped
        .into_iter()
        .map(|(id, rows)| {
            if let Some((position, row)) = rows
                .iter()
                .enumerate()
                .find(|(position, row)| row.index != position + 1)
            {
                return Err(Error::InvalidInput(format!(
                    "signal {id}: expected sample index {} but found {}",
                    position + 1,
                    row.index
                )));
            }
            let observed = rows.iter().map(|r| r.observed).collect();
            let baseline = rows.iter().map(|r| r.baseline).collect();
            let labels = rows.iter().map(|r| r.label).collect();
            Signal::from_parts(id, observed, baseline, labels)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeneratorParameters, SignalGenerator};

    #[test]
    fn test_csv_header_and_rows() {
        let signal = Signal::from_parts(
            SignalId(2),
            vec![0.5, 1.5],
            vec![0.0, 1.0],
            vec![ActivityLabel::Inactive, ActivityLabel::Active],
        )
        .unwrap();

        let mut buffer = Vec::new();
        write_signals_csv(&mut buffer, &[signal]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(
            text,
            "signal_id,index,observed,baseline,label\n2,1,0.5,0.0,0\n2,2,1.5,1.0,1\n"
        );
    }

    #[test]
    fn test_generated_signals_survive_csv() {
        let params = GeneratorParameters::default()
            .with_num_samples(64)
            .with_spike_length(8);
        let signals = SignalGenerator::new(params).unwrap().generate_batch(3, 5);

        let mut buffer = Vec::new();
        write_signals_csv(&mut buffer, &signals).unwrap();
        let restored = read_signals_csv(buffer.as_slice()).unwrap();

        assert_eq!(restored.len(), 3);
        for (original, restored) in signals.iter().zip(&restored) {
            assert_eq!(original.id(), restored.id());
            assert_eq!(original.labels(), restored.labels());
            assert_eq!(original.active_range(), restored.active_range());
        }
    }

    #[test]
    fn test_read_rejects_gaps() {
        let text = "signal_id,index,observed,baseline,label\n0,1,0.0,0.0,0\n0,3,0.0,0.0,0\n";
        let result = read_signals_csv(text.as_bytes());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_read_rejects_bad_label() {
        let text = "signal_id,index,observed,baseline,label\n0,1,0.0,0.0,7\n";
        assert!(matches!(read_signals_csv(text.as_bytes()), Err(Error::Csv(_))));
    }
}
