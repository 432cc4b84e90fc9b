//! Types describing labeled signals

use amoc_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Identity of a signal within a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalId(pub usize);

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ground-truth activity label of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ActivityLabel {
    /// No event in progress (label 0)
    Inactive,
    /// Inside the spike region (label 1)
    Active,
}

impl ActivityLabel {
    pub fn is_active(self) -> bool {
        matches!(self, ActivityLabel::Active)
    }
}

impl From<ActivityLabel> for u8 {
    fn from(label: ActivityLabel) -> Self {
        match label {
            ActivityLabel::Inactive => 0,
            ActivityLabel::Active => 1,
        }
    }
}

impl TryFrom<u8> for ActivityLabel {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(ActivityLabel::Inactive),
            1 => Ok(ActivityLabel::Active),
            other => Err(format!("activity label must be 0 or 1, got {other}")),
        }
    }
}

/// A single sample of a signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// 1-based position in the signal
    pub index: usize,
    /// Observed amplitude (baseline plus noise)
    pub observed: f64,
    /// Noise-free amplitude
    pub baseline: f64,
    /// Ground truth
    pub label: ActivityLabel,
}

/// A labeled signal: observed and noise-free amplitudes plus activity labels
///
/// Samples are stored column-wise so detectors can borrow the observed
/// amplitudes as a plain slice. Positions handed out by [`Signal::active_range`]
/// are 0-based offsets into those slices; [`Sample::index`] and
/// [`Signal::onset`] are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    id: SignalId,
    observed: Vec<f64>,
    baseline: Vec<f64>,
    labels: Vec<ActivityLabel>,
    active: Range<usize>,
}

impl Signal {
    /// Build a signal from externally supplied sequences
    ///
    /// The three sequences must have the same length and the labels must
    /// contain at most one contiguous run of [`ActivityLabel::Active`].
    pub fn from_parts(
        id: SignalId,
        observed: Vec<f64>,
        baseline: Vec<f64>,
        labels: Vec<ActivityLabel>,
    ) -> Result<Self> {
        if baseline.len() != observed.len() {
            return Err(Error::size_mismatch(observed.len(), baseline.len(), "baseline"));
        }
        if labels.len() != observed.len() {
            return Err(Error::size_mismatch(observed.len(), labels.len(), "labels"));
        }
        let active = active_run(&labels).ok_or_else(|| {
            Error::InvalidInput(format!(
                "signal {id} has more than one run of active labels"
            ))
        })?;

        Ok(Self {
            id,
            observed,
            baseline,
            labels,
            active,
        })
    }

    /// Assemble a generated signal whose active run is already known
    pub(crate) fn from_generated(
        id: SignalId,
        observed: Vec<f64>,
        baseline: Vec<f64>,
        active: Range<usize>,
    ) -> Self {
        let labels = (0..observed.len())
            .map(|i| {
                if active.contains(&i) {
                    ActivityLabel::Active
                } else {
                    ActivityLabel::Inactive
                }
            })
            .collect();
        Self {
            id,
            observed,
            baseline,
            labels,
            active,
        }
    }

    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn observed(&self) -> &[f64] {
        &self.observed
    }

    pub fn baseline(&self) -> &[f64] {
        &self.baseline
    }

    pub fn labels(&self) -> &[ActivityLabel] {
        &self.labels
    }

    /// 0-based positions of the active region (empty if the signal has none)
    pub fn active_range(&self) -> Range<usize> {
        self.active.clone()
    }

    /// 1-based index of the first active sample
    pub fn onset(&self) -> Option<usize> {
        if self.active.is_empty() {
            None
        } else {
            Some(self.active.start + 1)
        }
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn inactive_len(&self) -> usize {
        self.len() - self.active.len()
    }

    /// Get the sample at a 0-based position
    pub fn sample(&self, position: usize) -> Option<Sample> {
        Some(Sample {
            index: position + 1,
            observed: *self.observed.get(position)?,
            baseline: self.baseline[position],
            label: self.labels[position],
        })
    }

    /// Iterate over all samples in order
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(move |position| self.sample(position))
    }
}

/// Locate the single active run; `None` if there is more than one
fn active_run(labels: &[ActivityLabel]) -> Option<Range<usize>> {
    let start = match labels.iter().position(|l| l.is_active()) {
        Some(start) => start,
        None => return Some(0..0),
    };
    let end = labels[start..]
        .iter()
        .position(|l| !l.is_active())
        .map_or(labels.len(), |offset| start + offset);

    if labels[end..].iter().any(|l| l.is_active()) {
        None
    } else {
        Some(start..end)
    }
}
