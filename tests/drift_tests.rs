use tabdrift::{Column, DataType, Dataset, DriftDetector, IntegrityConfig, SkipReason};

fn numeric(name: &str, values: Vec<f64>) -> Column {
    Column::new(name, DataType::Float).with_values(values)
}

fn linear(start: i32, end: i32) -> Vec<f64> {
    (start..end).map(f64::from).collect()
}

#[test]
fn test_shifted_column_is_drifted() {
    let baseline = Dataset::new(vec![
        numeric("steady", linear(0, 200)),
        numeric("shifted", linear(0, 200)),
    ])
    .unwrap();
    let current = Dataset::new(vec![
        numeric("steady", linear(0, 200)),
        numeric("shifted", linear(150, 350)),
    ])
    .unwrap();

    let report = DriftDetector::default().detect(&baseline, &current);

    assert_eq!(report.columns.len(), 2);
    let steady = report.get("steady").unwrap();
    assert!(!steady.drifted);
    assert_eq!(steady.statistic, 0.0);

    let shifted = report.get("shifted").unwrap();
    assert!(shifted.drifted);
    assert!(shifted.p_value < 0.05);
    assert!((shifted.statistic - 0.75).abs() < 1e-12);

    assert_eq!(report.drifted_columns(), vec!["shifted".to_string()]);
}

#[test]
fn test_drifted_columns_follow_current_column_order() {
    let baseline = Dataset::new(vec![
        numeric("a", linear(0, 100)),
        numeric("b", linear(0, 100)),
        numeric("c", linear(0, 100)),
    ])
    .unwrap();
    let current = Dataset::new(vec![
        numeric("c", linear(500, 600)),
        numeric("a", linear(500, 600)),
        numeric("b", linear(500, 600)),
    ])
    .unwrap();

    let report = DriftDetector::default().detect(&baseline, &current);
    assert_eq!(report.drifted_columns(), vec!["c", "a", "b"]);
}

#[test]
fn test_one_sided_columns_are_silently_excluded() {
    let baseline = Dataset::new(vec![
        numeric("kept", linear(0, 50)),
        numeric("dropped", linear(0, 50)),
    ])
    .unwrap();
    let current = Dataset::new(vec![
        numeric("kept", linear(0, 50)),
        numeric("added", linear(1000, 1050)),
    ])
    .unwrap();

    let report = DriftDetector::default().detect(&baseline, &current);
    assert_eq!(report.columns.len(), 1);
    assert!(report.skipped.is_empty());
    assert!(report.drifted_columns().is_empty());
}

#[test]
fn test_single_observation_gets_no_verdict() {
    let baseline = Dataset::new(vec![
        Column::new("x", DataType::Float).with_values(vec![Some(1.0), None, None]),
        Column::new("y", DataType::Float).with_values(vec![Some(0.0), None, None]),
    ])
    .unwrap();
    let current = Dataset::new(vec![
        Column::new("x", DataType::Float).with_values(vec![None, Some(1_000_000.0), None]),
        Column::new("y", DataType::Float).with_values(vec![None, None, Some(-1_000_000.0)]),
    ])
    .unwrap();

    let report = DriftDetector::default().detect(&baseline, &current);
    assert!(report.columns.is_empty());
    assert!(report.drifted_columns().is_empty());
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(
        report.skipped[0].reason,
        SkipReason::InsufficientSample { baseline_n: 1, current_n: 1 }
    );
}

#[test]
fn test_min_sample_size_is_configurable() {
    let baseline = Dataset::new(vec![numeric("x", linear(0, 5))]).unwrap();
    let current = Dataset::new(vec![numeric("x", linear(100, 105))]).unwrap();

    let default_report = DriftDetector::default().detect(&baseline, &current);
    assert_eq!(default_report.columns.len(), 1);

    let strict = DriftDetector::new(&IntegrityConfig::new().with_min_sample_size(10)).unwrap();
    let strict_report = strict.detect(&baseline, &current);
    assert!(strict_report.columns.is_empty());
    assert_eq!(strict_report.skipped[0].reason.as_str(), "insufficient_sample");
}

#[test]
fn test_schema_mismatch_excluded_not_fatal() {
    let baseline = Dataset::new(vec![
        Column::new("score", DataType::Integer).with_values(vec![1i64, 2, 3, 4]),
        numeric("amount", linear(0, 4)),
    ])
    .unwrap();
    let current = Dataset::new(vec![
        Column::new("score", DataType::String).with_values(vec!["1", "2", "3", "4"]),
        numeric("amount", linear(0, 4)),
    ])
    .unwrap();

    let report = DriftDetector::default().detect(&baseline, &current);
    assert_eq!(report.columns.len(), 1);
    assert_eq!(report.columns[0].column, "amount");
    let mismatches = report.schema_mismatches();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].column, "score");
    assert_eq!(
        mismatches[0].reason,
        SkipReason::SchemaMismatch { baseline: DataType::Integer, current: DataType::String }
    );
}

#[test]
fn test_large_samples_give_repeatable_verdicts() {
    let config = IntegrityConfig::new().with_max_sample_size(500);
    let baseline = Dataset::new(vec![numeric("x", linear(0, 20_000))]).unwrap();
    let current = Dataset::new(vec![numeric("x", linear(0, 20_000).into_iter().map(|v| v * 1.1).collect())]).unwrap();

    let detector = DriftDetector::new(&config).unwrap();
    let runs: Vec<_> = (0..3).map(|_| detector.detect(&baseline, &current)).collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
    assert_eq!(runs[0].columns[0].baseline_n, 500);
}

#[test]
fn test_report_serializes_skip_reasons() {
    let baseline = Dataset::new(vec![Column::new("x", DataType::Float).with_values(vec![Some(1.0), None])]).unwrap();
    let current = Dataset::new(vec![Column::new("x", DataType::Float).with_values(vec![Some(2.0), Some(3.0)])]).unwrap();

    let report = DriftDetector::default().detect(&baseline, &current);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["skipped"][0]["column"], "x");
    assert_eq!(json["skipped"][0]["reason"], "insufficient_sample");
    assert_eq!(json["skipped"][0]["baseline_n"], 1);
    assert_eq!(json["p_threshold"], 0.05);
}
