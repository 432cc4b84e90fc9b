//! AMOC curves and their tabular form

use amoc_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// One row of an AMOC table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmocPoint {
    pub threshold: f64,
    /// False alarms per inactive sample, in [0, 1]
    pub false_alarm_rate: f64,
    /// Fraction of signals detected within the latency window, in [0, 1]
    pub total_score: f64,
}

/// False-alarm rate vs. detection rate across a threshold sweep
///
/// Points are kept ordered by increasing threshold.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AmocCurve {
    points: Vec<AmocPoint>,
}

impl AmocCurve {
    pub fn new(mut points: Vec<AmocPoint>) -> Self {
        points.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Self { points }
    }

    pub fn points(&self) -> &[AmocPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Area under the curve of total score over false-alarm rate
    ///
    /// The curve is closed with the trivial operating points (0, 0) and
    /// (1, 1) and integrated with the trapezoidal rule. A detector no better
    /// than chance scores about 0.5, a perfect one 1.
    pub fn area_under_curve(&self) -> f64 {
        let mut xy: Vec<(f64, f64)> = self
            .points
            .iter()
            .map(|p| (p.false_alarm_rate, p.total_score))
            .collect();
        xy.push((0.0, 0.0));
        xy.push((1.0, 1.0));
        xy.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

        xy.windows(2)
            .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
            .sum()
    }

    /// Best total score among points whose false-alarm rate is at most `max_far`
    ///
    /// Ties go to the lower false-alarm rate.
    pub fn best_score_at(&self, max_far: f64) -> Option<AmocPoint> {
        self.points
            .iter()
            .filter(|p| p.false_alarm_rate <= max_far)
            .max_by(|a, b| {
                a.total_score
                    .total_cmp(&b.total_score)
                    .then(b.false_alarm_rate.total_cmp(&a.false_alarm_rate))
            })
            .copied()
    }

    /// Write the curve as `threshold,false_alarm_rate,total_score` rows
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for point in &self.points {
            csv.serialize(point)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Read a curve written by [`AmocCurve::write_csv`]
    pub fn read_csv<R: io::Read>(reader: R) -> Result<Self> {
        let points = csv::Reader::from_reader(reader)
            .deserialize()
            .collect::<std::result::Result<Vec<AmocPoint>, _>>()?;
        Ok(Self::new(points))
    }
}

impl fmt::Display for AmocCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AMOC curve ({} thresholds):", self.len())?;
        writeln!(f, "  {:>10}  {:>8}  {:>8}", "threshold", "FAR", "score")?;
        for p in &self.points {
            writeln!(
                f,
                "  {:>10.3}  {:>8.5}  {:>8.3}",
                p.threshold, p.false_alarm_rate, p.total_score
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn point(threshold: f64, false_alarm_rate: f64, total_score: f64) -> AmocPoint {
        AmocPoint {
            threshold,
            false_alarm_rate,
            total_score,
        }
    }

    #[test]
    fn test_points_sorted_by_threshold() {
        let curve = AmocCurve::new(vec![
            point(2.0, 0.1, 0.5),
            point(-1.0, 1.0, 1.0),
            point(0.5, 0.4, 0.9),
        ]);
        let thresholds: Vec<f64> = curve.points().iter().map(|p| p.threshold).collect();
        assert_eq!(thresholds, vec![-1.0, 0.5, 2.0]);
    }

    #[test]
    fn test_area_under_curve() {
        // Perfect detector: full score at zero false alarms
        let perfect = AmocCurve::new(vec![point(1.0, 0.0, 1.0)]);
        assert_abs_diff_eq!(perfect.area_under_curve(), 1.0);

        // Chance: score tracks the false-alarm rate
        let chance = AmocCurve::new(vec![point(1.0, 0.25, 0.25), point(0.0, 0.75, 0.75)]);
        assert_abs_diff_eq!(chance.area_under_curve(), 0.5);

        // No points: only the diagonal anchors remain
        assert_abs_diff_eq!(AmocCurve::default().area_under_curve(), 0.5);
    }

    #[test]
    fn test_best_score_at() {
        let curve = AmocCurve::new(vec![
            point(0.0, 0.5, 1.0),
            point(1.0, 0.05, 0.8),
            point(2.0, 0.01, 0.8),
            point(3.0, 0.0, 0.2),
        ]);

        assert_eq!(curve.best_score_at(0.1), Some(point(2.0, 0.01, 0.8)));
        assert_eq!(curve.best_score_at(1.0), Some(point(0.0, 0.5, 1.0)));
        assert_eq!(curve.best_score_at(0.0), Some(point(3.0, 0.0, 0.2)));
        assert_eq!(AmocCurve::default().best_score_at(1.0), None);
    }

    #[test]
    fn test_csv_table() {
        let curve = AmocCurve::new(vec![point(-0.5, 1.0, 1.0), point(0.0, 0.25, 0.5)]);

        let mut buffer = Vec::new();
        curve.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "threshold,false_alarm_rate,total_score\n-0.5,1.0,1.0\n0.0,0.25,0.5\n"
        );

        assert_eq!(AmocCurve::read_csv(text.as_bytes()).unwrap(), curve);
    }
}
