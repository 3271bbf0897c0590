//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::fs;

use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use stancemap::{BatchRunner, Config, Correction, WeightNormalizer, telemetry};

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

/// Sum all counter values matching a metric name and, optionally, a label.
fn counter_total(snapshot: &SnapshotVec, name: &str, label: Option<(&str, &str)>) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .filter(|(key, _, _, _)| {
            label.is_none_or(|(k, v)| {
                key.key()
                    .labels()
                    .any(|l| l.key() == k && l.value() == v)
            })
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

#[test]
fn batch_records_party_outcomes() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("good.csv"), "s1,Mee eens,1\ns2,Neutraal,1\n").unwrap();
    fs::write(input.path().join("bad.csv"), "s1,Onbekend,1\n").unwrap();

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let report = metrics::with_local_recorder(&recorder, || {
        BatchRunner::new(Config::default()).run(input.path(), output.path())
    })
    .unwrap();
    assert_eq!(report.written.len(), 1);

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_total(&snapshot, telemetry::PARTIES_TOTAL, Some(("status", "ok"))),
        1
    );
    assert_eq!(
        counter_total(&snapshot, telemetry::PARTIES_TOTAL, Some(("status", "error"))),
        1
    );
    assert_eq!(counter_total(&snapshot, telemetry::STATEMENTS_TOTAL, None), 2);
}

#[test]
fn rounding_correction_is_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let normalizer = WeightNormalizer::default();
        normalizer.normalize(&[1.0, 1.0, 1.0]).unwrap();
        normalizer.normalize(&[1.0, 1.0]).unwrap();
        WeightNormalizer::new(3, Correction::LargestRemainder)
            .normalize(&[1.0, 2.0, 4.0])
            .unwrap();
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::WEIGHT_CORRECTIONS_TOTAL,
            Some(("correction", "first-entry"))
        ),
        1
    );
    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::WEIGHT_CORRECTIONS_TOTAL,
            Some(("correction", "largest-remainder"))
        ),
        1
    );
}

#[test]
fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    WeightNormalizer::default().normalize(&[1.0, 1.0, 1.0]).unwrap();
}
