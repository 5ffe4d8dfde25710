//! CSV result files: one for scan timings, one for build timings.

use starjoin_core::constants::output::{BUILD_RESULTS_FILE, CSV_HEADER, SCAN_RESULTS_FILE};
use starjoin_core::{Measurement, MeasurementSink, Phase, StarJoinError, StarJoinResult};
use std::fs::{self, File};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes `exp,type,time` records to a scan stream and a build stream.
pub struct CsvSink<W: Write> {
    scan: W,
    build: W,
}

impl<W: Write> CsvSink<W> {
    /// Wrap two writers and emit the header line on both
    pub fn new(mut scan: W, mut build: W) -> StarJoinResult<Self> {
        writeln!(scan, "{CSV_HEADER}")?;
        writeln!(build, "{CSV_HEADER}")?;
        Ok(Self { scan, build })
    }

    pub fn into_inner(self) -> (W, W) {
        (self.scan, self.build)
    }
}

impl CsvSink<LineWriter<File>> {
    /// Create `results.csv` and `results_build.csv` under `dir`.
    ///
    /// Records are flushed line by line so completed experiments survive an
    /// aborted run.
    pub fn create(dir: &Path) -> StarJoinResult<Self> {
        fs::create_dir_all(dir).map_err(|e| {
            StarJoinError::emission(format!("failed to create {}: {e}", dir.display()))
        })?;
        let (scan_path, build_path) = result_paths(dir);
        let scan = open(&scan_path)?;
        let build = open(&build_path)?;

        info!(
            scan = %scan_path.display(),
            build = %build_path.display(),
            "Writing benchmark results"
        );
        Self::new(LineWriter::new(scan), LineWriter::new(build))
    }
}

/// Paths of the scan and build result files under `dir`
pub fn result_paths(dir: &Path) -> (PathBuf, PathBuf) {
    (dir.join(SCAN_RESULTS_FILE), dir.join(BUILD_RESULTS_FILE))
}

fn open(path: &Path) -> StarJoinResult<File> {
    File::create(path)
        .map_err(|e| StarJoinError::emission(format!("failed to create {}: {e}", path.display())))
}

impl<W: Write> MeasurementSink for CsvSink<W> {
    fn record(&mut self, phase: Phase, measurement: Measurement) -> StarJoinResult<()> {
        let out = match phase {
            Phase::Scan => &mut self.scan,
            Phase::Build => &mut self.build,
        };
        writeln!(out, "{}", measurement.csv_record())?;
        Ok(())
    }

    fn flush(&mut self) -> StarJoinResult<()> {
        self.scan.flush()?;
        self.build.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starjoin_core::{BenchmarkConfig, EncodingKind, run_sweep};

    #[test]
    fn test_records_are_routed_by_phase() {
        let mut sink = CsvSink::new(Vec::new(), Vec::new()).unwrap();
        sink.record(Phase::Build, Measurement::new(4, EncodingKind::Foreign, 812.25)).unwrap();
        sink.record(Phase::Scan, Measurement::new(4, EncodingKind::Foreign, 95.5)).unwrap();
        sink.record(Phase::Scan, Measurement::new(4, EncodingKind::Pointer, 40.125)).unwrap();

        let (scan, build) = sink.into_inner();
        assert_eq!(
            String::from_utf8(scan).unwrap(),
            "exp,type,time\n4,foreign,95.5\n4,pointer,40.125\n"
        );
        assert_eq!(String::from_utf8(build).unwrap(), "exp,type,time\n4,foreign,812.25\n");
    }

    #[test]
    fn test_sweep_writes_result_files() {
        let dir = std::env::temp_dir().join(format!("starjoin-csv-{}", std::process::id()));
        let config = BenchmarkConfig {
            rows_per_dimension: 3,
            fact_row_limit: 9,
            repetitions: 2,
            min_dimensions: 1,
            max_dimensions: 2,
            output_dir: dir.clone(),
        };

        let mut sink = CsvSink::create(&config.output_dir).unwrap();
        run_sweep(&config, &mut sink).unwrap();
        drop(sink);

        let (scan_path, build_path) = result_paths(&dir);
        for path in [scan_path, build_path] {
            let contents = fs::read_to_string(&path).unwrap();
            let lines: Vec<&str> = contents.lines().collect();
            assert_eq!(lines[0], "exp,type,time");
            // Only n = 2 runs (3^1 < 9): two repetitions, two encodings.
            assert_eq!(lines.len(), 1 + 2 * 2);
            assert!(lines[1].starts_with("2,foreign,"));
            assert!(lines[2].starts_with("2,pointer,"));
        }

        fs::remove_dir_all(&dir).unwrap();
    }
}
