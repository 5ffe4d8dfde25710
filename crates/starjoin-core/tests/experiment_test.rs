use starjoin_core::*;

fn small_config() -> BenchmarkConfig {
    BenchmarkConfig {
        rows_per_dimension: 4,
        fact_row_limit: 20,
        repetitions: 3,
        min_dimensions: 1,
        max_dimensions: 3,
        ..Default::default()
    }
}

#[test]
fn test_experiment_emits_four_measurements_per_repetition() {
    let config = small_config();
    let mut sink = RecordingSink::new();
    run_experiment(3, &config, &mut sink).unwrap();

    assert_eq!(sink.len(), 4 * 3);
    let expected_order = [
        (Phase::Build, EncodingKind::Foreign),
        (Phase::Build, EncodingKind::Pointer),
        (Phase::Scan, EncodingKind::Foreign),
        (Phase::Scan, EncodingKind::Pointer),
    ];
    for (i, (phase, measurement)) in sink.records().iter().enumerate() {
        assert_eq!((*phase, measurement.encoding), expected_order[i % 4]);
        assert_eq!(measurement.experiment_size, 3);
        assert!(measurement.elapsed_ms >= 0.0);
    }
    assert_eq!(sink.measurements(Phase::Scan).count(), 6);
    assert_eq!(sink.measurements(Phase::Build).count(), 6);
}

#[test]
fn test_sweep_skips_undersized_products() {
    // 4^1 = 4 < 20 is skipped, 4^2 = 16 < 20 is skipped, 4^3 = 64 runs.
    let config = small_config();
    let mut sink = RecordingSink::new();
    let plan = run_sweep(&config, &mut sink).unwrap();

    assert_eq!(plan.skipped, vec![1, 2]);
    assert_eq!(plan.evaluated, vec![3]);
    assert_eq!(sink.len(), 12);
    assert!(sink.records().iter().all(|(_, m)| m.experiment_size == 3));
}

#[test]
fn test_sweep_rejects_invalid_config() {
    let config = BenchmarkConfig { repetitions: 0, ..small_config() };
    let mut sink = RecordingSink::new();
    let err = run_sweep(&config, &mut sink).unwrap_err();

    assert!(matches!(err, StarJoinError::Configuration { .. }));
    assert!(sink.is_empty());
}

#[test]
fn test_summary_over_a_sweep() {
    let config = BenchmarkConfig { max_dimensions: 4, ..small_config() };
    let mut sink = RecordingSink::new();
    run_sweep(&config, &mut sink).unwrap();

    let summary = Summary::from_records(sink.records());
    assert_eq!(summary.experiment_sizes(), vec![3, 4]);
    for size in [3, 4] {
        for phase in Phase::ALL {
            for encoding in EncodingKind::ALL {
                let entry = summary.entry(size, phase, encoding).unwrap();
                assert_eq!(entry.count, 3);
                assert!(entry.min_ms <= entry.median_ms && entry.median_ms <= entry.max_ms);
            }
        }
    }
}
