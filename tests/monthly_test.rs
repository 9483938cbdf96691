// ABOUTME: Integration tests for per-month outcomes and the monthly summary
// ABOUTME: Covers the sample minimum, averaging, best and worst months, and failed months
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::synthetic_data::{cycling_readings, steady_readings, utc_ms};
use nightscout_intelligence::{MonthOutcome, MonthResult, MonthlySummary, StatsEngine};
use nightscout_mcp_server::units::TargetRange;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn month(month: u32, outcome: MonthOutcome) -> MonthResult {
    MonthResult {
        year: 2024,
        month,
        outcome,
    }
}

fn analyzed(engine: &StatsEngine, month_number: u32, values: &[i32]) -> MonthResult {
    let samples = cycling_readings(utc_ms(2024, month_number, 1, 0, 0), 20, values);
    month(month_number, MonthOutcome::evaluate(engine, &samples))
}

#[test]
fn test_ten_samples_is_enough() {
    let engine = StatsEngine::new(TargetRange::default());
    let samples = steady_readings(utc_ms(2024, 1, 1, 0, 0), 10, 110);

    let outcome = MonthOutcome::evaluate(&engine, &samples);

    let stats = outcome.statistics().unwrap();
    assert_eq!(stats.count, 10);
    assert_close(stats.tir(), 100.0);
}

#[test]
fn test_minimum_counts_raw_samples() {
    let engine = StatsEngine::new(TargetRange::default());
    // Nine valid readings plus one sensor error still meet the raw minimum
    let mut samples = steady_readings(utc_ms(2024, 1, 1, 0, 0), 9, 110);
    samples.extend(steady_readings(utc_ms(2024, 1, 2, 0, 0), 1, 20));

    let outcome = MonthOutcome::evaluate(&engine, &samples);

    assert_eq!(outcome.statistics().unwrap().count, 9);
}

#[test]
fn test_all_sensor_errors_is_no_data() {
    let engine = StatsEngine::new(TargetRange::default());
    let samples = steady_readings(utc_ms(2024, 1, 1, 0, 0), 12, 30);

    assert_eq!(MonthOutcome::evaluate(&engine, &samples), MonthOutcome::NoData);
}

#[test]
fn test_summary_averages_analyzed_months_only() {
    let engine = StatsEngine::new(TargetRange::default());
    let results = vec![
        analyzed(&engine, 1, &[100, 120]),
        month(2, MonthOutcome::NoData),
        analyzed(&engine, 3, &[100, 200]),
        month(4, MonthOutcome::InsufficientData { samples: 4 }),
        month(
            5,
            MonthOutcome::Failed {
                message: "HTTP 503".to_owned(),
            },
        ),
    ];

    let summary = MonthlySummary::from_results(&results).unwrap();

    assert_eq!(summary.months_analyzed, 2);
    assert_eq!(summary.total_readings, 40);
    assert_close(summary.mean_tir, 75.0);
    assert_close(summary.mean_glucose, (110.0 + 150.0) / 2.0);
    assert_eq!(summary.best.month, 1);
    assert_close(summary.best.tir, 100.0);
    assert_eq!(summary.worst.month, 3);
    assert_close(summary.worst.tir, 50.0);
}

#[test]
fn test_best_and_worst_ties_keep_earliest_month() {
    let engine = StatsEngine::new(TargetRange::default());
    let results = vec![
        analyzed(&engine, 6, &[110]),
        analyzed(&engine, 7, &[110]),
        analyzed(&engine, 8, &[115]),
    ];

    let summary = MonthlySummary::from_results(&results).unwrap();

    assert_eq!(summary.best.month, 6);
    assert_eq!(summary.worst.month, 6);
}

#[test]
fn test_summary_requires_an_analyzed_month() {
    let results = vec![
        month(1, MonthOutcome::NoData),
        month(2, MonthOutcome::InsufficientData { samples: 3 }),
    ];

    assert!(MonthlySummary::from_results(&results).is_none());
    assert!(MonthlySummary::from_results(&[]).is_none());
}

#[test]
fn test_month_labels() {
    assert_eq!(month(3, MonthOutcome::NoData).label(), "Mar");
    assert_eq!(month(11, MonthOutcome::NoData).label(), "Nov");
}
