#![allow(missing_docs)]
//! Core functionality for the star-join encoding benchmark.
//!
//! This crate measures how much a star-schema join costs when fact tuples
//! reference their dimension rows through surrogate ids resolved by a hash
//! index, compared with tuples that hold shared handles to the rows directly.
//! It provides the dimension store, the bounded cartesian enumerator that
//! materialises fact tables, the two tuple encodings, the full-scan access
//! benchmark and the experiment runner that ties them together.

/// Benchmark configuration, file/environment loading and experiment planning
pub mod config;
/// Reference configuration constants
pub mod constants;
/// Dimension tables, dimension rows and their hash indexes
pub mod dimension;
/// Foreign-key and direct-reference tuple encodings
pub mod encoding;
/// Bounded lexicographic enumeration of the cartesian product
pub mod enumerator;
/// Structured error types
pub mod error;
/// Experiment runner and measurement sinks
pub mod experiment;
/// Fact tuples and fact tables
pub mod fact_table;
/// Resident memory probing
pub mod memory;
/// Full-scan join access benchmark
pub mod scan;
/// Aggregated statistics over recorded measurements
pub mod summary;
/// Wall-clock timing helpers
pub mod timing;

pub use config::{BenchmarkConfig, ExperimentPlan};
pub use dimension::{DimensionHandle, DimensionIndex, DimensionRow, DimensionStore, RowId};
pub use encoding::{DirectReferenceEncoding, EncodingKind, ForeignKeyEncoding, TupleEncoding};
pub use enumerator::{EnumerationShape, enumerate};
pub use error::{StarJoinError, StarJoinResult};
pub use experiment::{
    Measurement, MeasurementSink, Phase, RecordingSink, Tee, run_experiment, run_sweep,
};
pub use fact_table::{FactTable, FactTuple};
pub use scan::{ScanReport, scan};
pub use summary::{Summary, SummaryEntry};
pub use timing::Timer;
