//! Experiment runner and measurement sinks.
//!
//! One experiment covers one dimension count: the dimension store is built
//! once, then every repetition builds a foreign-key and a direct-reference fact
//! table over the same enumeration, scans both, and drops them before the next
//! repetition starts. Each repetition hands four [`Measurement`]s to the sink,
//! in this order: build/foreign, build/pointer, scan/foreign, scan/pointer.

use crate::config::{BenchmarkConfig, ExperimentPlan};
use crate::dimension::DimensionStore;
use crate::encoding::{DirectReferenceEncoding, EncodingKind, ForeignKeyEncoding, TupleEncoding};
use crate::enumerator::{EnumerationShape, enumerate};
use crate::error::StarJoinResult;
use crate::fact_table::FactTable;
use crate::memory::MemoryStats;
use crate::scan::scan;
use crate::timing::Timer;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

/// Which part of a repetition a measurement times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Materialising a fact table
    Build,
    /// Resolving every column of a fact table
    Scan,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::Build, Phase::Scan];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Build => "build",
            Phase::Scan => "scan",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One timing: `(experiment size, encoding, elapsed milliseconds)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Number of dimensions of the experiment
    pub experiment_size: usize,
    pub encoding: EncodingKind,
    pub elapsed_ms: f64,
}

impl Measurement {
    pub fn new(experiment_size: usize, encoding: EncodingKind, elapsed_ms: f64) -> Self {
        Self { experiment_size, encoding, elapsed_ms }
    }

    /// `experimentSize,encodingKind,elapsedMs` without the line terminator
    pub fn csv_record(&self) -> String {
        format!("{},{},{}", self.experiment_size, self.encoding, self.elapsed_ms)
    }
}

/// Receives measurements as they are taken.
pub trait MeasurementSink {
    fn record(&mut self, phase: Phase, measurement: Measurement) -> StarJoinResult<()>;

    /// Called once the sweep has finished
    fn flush(&mut self) -> StarJoinResult<()> {
        Ok(())
    }
}

impl<S: MeasurementSink + ?Sized> MeasurementSink for &mut S {
    fn record(&mut self, phase: Phase, measurement: Measurement) -> StarJoinResult<()> {
        (**self).record(phase, measurement)
    }

    fn flush(&mut self) -> StarJoinResult<()> {
        (**self).flush()
    }
}

/// Keeps every measurement in memory, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    records: Vec<(Phase, Measurement)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[(Phase, Measurement)] {
        &self.records
    }

    /// Measurements of one phase, in arrival order
    pub fn measurements(&self, phase: Phase) -> impl Iterator<Item = &Measurement> + '_ {
        self.records.iter().filter(move |(p, _)| *p == phase).map(|(_, m)| m)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MeasurementSink for RecordingSink {
    fn record(&mut self, phase: Phase, measurement: Measurement) -> StarJoinResult<()> {
        self.records.push((phase, measurement));
        Ok(())
    }
}

/// Forwards every measurement to two sinks.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: MeasurementSink, B: MeasurementSink> MeasurementSink for Tee<A, B> {
    fn record(&mut self, phase: Phase, measurement: Measurement) -> StarJoinResult<()> {
        self.0.record(phase, measurement)?;
        self.1.record(phase, measurement)
    }

    fn flush(&mut self) -> StarJoinResult<()> {
        self.0.flush()?;
        self.1.flush()
    }
}

/// Run every dimension count the configuration plans for.
///
/// Returns the plan so callers can report skipped dimension counts.
pub fn run_sweep<S: MeasurementSink>(
    config: &BenchmarkConfig,
    sink: &mut S,
) -> StarJoinResult<ExperimentPlan> {
    config.validate()?;
    let plan = config.plan();

    for &dimensions in &plan.evaluated {
        run_experiment(dimensions, config, sink)?;
    }
    sink.flush()?;

    info!(
        evaluated = plan.evaluated.len(),
        skipped = plan.skipped.len(),
        "Benchmark sweep complete"
    );
    Ok(plan)
}

/// Build the star schema for `dimensions` dimensions and run all repetitions.
#[instrument(skip_all, fields(dimensions = dimensions))]
pub fn run_experiment<S: MeasurementSink>(
    dimensions: usize,
    config: &BenchmarkConfig,
    sink: &mut S,
) -> StarJoinResult<()> {
    info!(
        repetitions = config.repetitions,
        rows_per_dimension = config.rows_per_dimension,
        fact_row_limit = config.fact_row_limit,
        "Running experiment for {dimensions} dimensions"
    );

    let store = DimensionStore::build(dimensions, config.rows_per_dimension)?;
    let shape = EnumerationShape::new(dimensions, config.rows_per_dimension, config.fact_row_limit);
    let foreign = ForeignKeyEncoding::new(&store);
    let pointer = DirectReferenceEncoding::new(&store);

    for repetition in 0..config.repetitions {
        run_repetition(repetition, shape, &foreign, &pointer, sink)?;
    }
    Ok(())
}

fn run_repetition<S: MeasurementSink>(
    repetition: usize,
    shape: EnumerationShape,
    foreign: &ForeignKeyEncoding<'_>,
    pointer: &DirectReferenceEncoding<'_>,
    sink: &mut S,
) -> StarJoinResult<()> {
    let dimensions = shape.dimensions;

    let foreign_table = timed_build(shape, foreign, sink)?;
    let pointer_table = timed_build(shape, pointer, sink)?;
    debug_assert_eq!(foreign_table.len(), pointer_table.len());

    info!(
        repetition,
        foreign_rows = foreign_table.len(),
        pointer_rows = pointer_table.len(),
        "Built fact tables"
    );
    if let Some(memory) = MemoryStats::current() {
        debug!(repetition, rss = %memory.format_rss(), "Resident memory with both fact tables");
    }

    let report = scan(foreign, &foreign_table)?;
    sink.record(Phase::Scan, Measurement::new(dimensions, report.encoding, report.elapsed_ms()))?;
    info!(repetition, elapsed_ms = report.elapsed_ms(), "Time taken without pointers");

    let report = scan(pointer, &pointer_table)?;
    sink.record(Phase::Scan, Measurement::new(dimensions, report.encoding, report.elapsed_ms()))?;
    info!(repetition, elapsed_ms = report.elapsed_ms(), "Time taken with pointers");

    Ok(())
}

fn timed_build<E: TupleEncoding, S: MeasurementSink>(
    shape: EnumerationShape,
    encoding: &E,
    sink: &mut S,
) -> StarJoinResult<FactTable<E::Column>> {
    let timer = Timer::new();
    let table = enumerate(shape, encoding)?;
    let elapsed_ms = timer.elapsed_ms();

    sink.record(Phase::Build, Measurement::new(shape.dimensions, E::KIND, elapsed_ms))?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StarJoinError;

    #[test]
    fn test_csv_record_format() {
        let measurement = Measurement::new(4, EncodingKind::Pointer, 12.5);
        assert_eq!(measurement.csv_record(), "4,pointer,12.5");
    }

    #[test]
    fn test_tee_forwards_to_both() {
        let mut left = RecordingSink::new();
        let mut right = RecordingSink::new();
        {
            let mut tee = Tee(&mut left, &mut right);
            tee.record(Phase::Build, Measurement::new(2, EncodingKind::Foreign, 1.0)).unwrap();
            tee.flush().unwrap();
        }
        assert_eq!(left.len(), 1);
        assert_eq!(right.records(), left.records());
    }

    struct FailingSink;

    impl MeasurementSink for FailingSink {
        fn record(&mut self, _: Phase, _: Measurement) -> StarJoinResult<()> {
            Err(StarJoinError::emission("disk full"))
        }
    }

    #[test]
    fn test_sink_failure_stops_experiment() {
        let config = BenchmarkConfig {
            rows_per_dimension: 3,
            fact_row_limit: 9,
            repetitions: 2,
            ..Default::default()
        };
        let err = run_experiment(2, &config, &mut FailingSink).unwrap_err();
        assert_eq!(err, StarJoinError::emission("disk full"));
    }
}
