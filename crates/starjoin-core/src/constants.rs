/// Reference configuration of the benchmark.
///
/// These are the sizes the published measurements were taken with. Every
/// value can be overridden through [`crate::config::BenchmarkConfig`].
pub mod reference {
    /// Rows in each dimension table
    pub const ROWS_PER_DIMENSION: usize = 100;

    /// Upper bound on the number of tuples in a fact table
    pub const FACT_ROW_LIMIT: usize = 50_000_000;

    /// Repetitions per dimension count
    pub const REPETITIONS: usize = 10;

    /// Smallest dimension count in the sweep
    pub const MIN_DIMENSIONS: usize = 2;

    /// Largest dimension count in the sweep
    pub const MAX_DIMENSIONS: usize = 10;

    /// Directory the result files are written to
    pub const OUTPUT_DIR: &str = "results";
}

/// Bounds enforced by configuration validation
pub mod limits {
    /// Largest accepted dimension count; `k^n` saturates well before this
    /// for any `k >= 2`
    pub const MAX_DIMENSIONS: usize = 64;
}

/// Result file layout
pub mod output {
    /// Scan-phase timings
    pub const SCAN_RESULTS_FILE: &str = "results.csv";

    /// Build-phase timings
    pub const BUILD_RESULTS_FILE: &str = "results_build.csv";

    /// Header line shared by both result files
    pub const CSV_HEADER: &str = "exp,type,time";
}

/// Environment variables recognised by the configuration loader
pub mod env {
    pub const ROWS_PER_DIMENSION: &str = "STARJOIN_ROWS_PER_DIMENSION";
    pub const FACT_ROW_LIMIT: &str = "STARJOIN_FACT_ROW_LIMIT";
    pub const REPETITIONS: &str = "STARJOIN_REPETITIONS";
    pub const MIN_DIMENSIONS: &str = "STARJOIN_MIN_DIMENSIONS";
    pub const MAX_DIMENSIONS: &str = "STARJOIN_MAX_DIMENSIONS";
    pub const OUTPUT_DIR: &str = "STARJOIN_OUTPUT_DIR";
}
