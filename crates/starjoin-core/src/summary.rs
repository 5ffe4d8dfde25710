//! Aggregated statistics over recorded measurements.

use crate::encoding::EncodingKind;
use crate::experiment::{Measurement, Phase};
use serde::Serialize;
use std::collections::BTreeMap;

/// Statistics for one `(experiment size, phase, encoding)` group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub experiment_size: usize,
    pub phase: Phase,
    pub encoding: EncodingKind,
    pub count: usize,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub median_ms: f64,
}

impl SummaryEntry {
    fn from_samples(
        experiment_size: usize,
        phase: Phase,
        encoding: EncodingKind,
        mut samples: Vec<f64>,
    ) -> Self {
        samples.sort_by(|a, b| a.total_cmp(b));
        let count = samples.len();
        let mean_ms = samples.iter().sum::<f64>() / count as f64;
        let median_ms = if count % 2 == 1 {
            samples[count / 2]
        } else {
            (samples[count / 2 - 1] + samples[count / 2]) / 2.0
        };

        Self {
            experiment_size,
            phase,
            encoding,
            count,
            mean_ms,
            min_ms: samples[0],
            max_ms: samples[count - 1],
            median_ms,
        }
    }
}

/// Per-group statistics, ordered by experiment size, phase, then encoding.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    entries: Vec<SummaryEntry>,
}

impl Summary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a (Phase, Measurement)>,
    {
        let mut groups: BTreeMap<(usize, Phase, EncodingKind), Vec<f64>> = BTreeMap::new();
        for (phase, measurement) in records {
            groups
                .entry((measurement.experiment_size, *phase, measurement.encoding))
                .or_default()
                .push(measurement.elapsed_ms);
        }

        let entries = groups
            .into_iter()
            .map(|((size, phase, encoding), samples)| {
                SummaryEntry::from_samples(size, phase, encoding, samples)
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(
        &self,
        experiment_size: usize,
        phase: Phase,
        encoding: EncodingKind,
    ) -> Option<&SummaryEntry> {
        self.entries.iter().find(|e| {
            e.experiment_size == experiment_size && e.phase == phase && e.encoding == encoding
        })
    }

    /// Mean foreign-key time divided by mean direct-reference time.
    ///
    /// Values above 1.0 mean the direct-reference variant was faster.
    pub fn speedup(&self, experiment_size: usize, phase: Phase) -> Option<f64> {
        let foreign = self.entry(experiment_size, phase, EncodingKind::Foreign)?;
        let pointer = self.entry(experiment_size, phase, EncodingKind::Pointer)?;
        (pointer.mean_ms > 0.0).then(|| foreign.mean_ms / pointer.mean_ms)
    }

    /// Distinct experiment sizes, ascending
    pub fn experiment_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.entries.iter().map(|e| e.experiment_size).collect();
        sizes.dedup();
        sizes
    }
}
