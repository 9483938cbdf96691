// ABOUTME: Integration tests for report rendering and structured output formats
// ABOUTME: Verifies unit-aware text reports, empty-data messages, and JSON/TOON serialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::synthetic_data::{cycling_readings, treatment, utc_ms};
use nightscout_intelligence::{
    GlycemicAssessment, MonthOutcome, MonthResult, MonthlySummary, StatsEngine,
};
use nightscout_mcp_server::formatters::{
    format_structured, reports, DisplaySettings, OutputFormat,
};
use nightscout_mcp_server::models::{
    DeviceStatus, Sample, ServerSettings, ServerStatus, TimeWindow, TrendDirection,
};
use nightscout_mcp_server::services::{
    Analysis, HistoryReport, MonthlyReport, RangeReport, TreatmentReport,
};
use nightscout_mcp_server::units::{GlucoseUnit, TargetRange};
use serde_json::{json, Value};

fn mgdl() -> DisplaySettings {
    DisplaySettings::new(GlucoseUnit::MgDl, TargetRange::default())
}

fn mmol() -> DisplaySettings {
    DisplaySettings::new(GlucoseUnit::Mmol, TargetRange::default())
}

fn history_report(count: usize, max_displayed: usize) -> HistoryReport {
    let start = utc_ms(2024, 3, 15, 0, 0);
    let mut readings = cycling_readings(start, count, &[100, 120, 140]);
    readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let statistics = StatsEngine::default()
        .compute(&readings)
        .map_or(Analysis::InsufficientData { samples: 0 }, Analysis::Ready);
    HistoryReport {
        hours: 6,
        window: TimeWindow::trailing_hours(start + 6 * 3_600_000, 6).unwrap(),
        readings,
        max_displayed,
        statistics,
    }
}

fn range_report() -> Analysis<RangeReport> {
    let samples = cycling_readings(utc_ms(2024, 3, 1, 0, 0), 30, &[50, 70, 100, 140, 200, 260]);
    let statistics = StatsEngine::default().compute(&samples).unwrap();
    Analysis::Ready(RangeReport {
        window: TimeWindow::new(utc_ms(2024, 3, 1, 0, 0), utc_ms(2024, 3, 8, 0, 0)).unwrap(),
        assessment: GlycemicAssessment::assess(&statistics, 70.0),
        statistics,
    })
}

#[test]
fn test_current_reading_in_mgdl() {
    let mut sample = Sample::new(utc_ms(2024, 3, 15, 9, 30), 124).with_direction(TrendDirection::Flat);
    sample.delta = Some(-3.6);
    sample.device = Some("xDrip-DexcomG6".to_owned());

    let text = reports::current_reading(Some(&sample), &mgdl());

    assert!(text.contains("124 mg/dL →"));
    assert!(text.contains("2024-03-15 09:30 UTC"));
    assert!(text.contains("Delta: -3"));
    assert!(text.contains("xDrip-DexcomG6"));
}

#[test]
fn test_current_reading_in_mmol() {
    let mut sample = Sample::new(utc_ms(2024, 3, 15, 9, 30), 124);
    sample.delta = Some(18.0);

    let text = reports::current_reading(Some(&sample), &mmol());

    assert!(text.contains("6.9 mmol/L"));
    assert!(text.contains("Delta: +1.0"));
    assert!(text.contains("Device: N/A"));
}

#[test]
fn test_current_reading_without_data() {
    assert_eq!(
        reports::current_reading(None, &mgdl()),
        "No glucose readings available"
    );
}

#[test]
fn test_history_lists_at_most_fifteen_readings() {
    let text = reports::history(&history_report(40, 100), &mgdl());

    assert_eq!(text.matches("\n• 03-15").count(), 15);
    assert!(text.contains("... and 25 more readings"));
    assert!(text.contains("TIR (70-140 mg/dL): 100.0%"));
}

#[test]
fn test_history_respects_smaller_cap() {
    let text = reports::history(&history_report(12, 5), &mgdl());

    assert_eq!(text.matches("\n• 03-15").count(), 5);
    assert!(text.contains("... and 7 more readings"));
}

#[test]
fn test_history_without_readings() {
    let mut empty = history_report(0, 10);
    empty.statistics = Analysis::InsufficientData { samples: 0 };
    assert_eq!(
        reports::history(&empty, &mgdl()),
        "No data for the last 6 hours"
    );

    empty.statistics = Analysis::InsufficientData { samples: 4 };
    assert!(reports::history(&empty, &mgdl()).contains("4 sensor errors filtered"));
}

#[test]
fn test_range_analysis_report() {
    let text = reports::range_analysis(&range_report(), &mgdl());

    assert!(text.contains("2024-03-01"));
    assert!(text.contains("7 days, 30 readings"));
    assert!(text.contains("In target (70-140 mg/dL): 50.0%"));
    assert!(text.contains("Severe hypo (<54 mg/dL): 16.7%"));
    assert!(text.contains("20.0% away from TIR goal of 70%"));
    assert!(text.contains("High variability"));
}

#[test]
fn test_range_analysis_labels_follow_units() {
    let text = reports::range_analysis(&range_report(), &mmol());

    assert!(text.contains("In target (3.9-7.8 mmol/L)"));
    assert!(text.contains("Very high (>13.9 mmol/L)"));
}

#[test]
fn test_range_analysis_without_data() {
    let insufficient: Analysis<RangeReport> = Analysis::InsufficientData { samples: 3 };
    assert_eq!(
        reports::range_analysis(&insufficient, &mgdl()),
        "Not enough data for analysis"
    );
}

#[test]
fn test_monthly_report_rows_and_summary() {
    let engine = StatsEngine::default();
    let january = cycling_readings(utc_ms(2024, 1, 1, 0, 0), 20, &[100, 120]);
    let months = vec![
        MonthResult {
            year: 2024,
            month: 1,
            outcome: MonthOutcome::evaluate(&engine, &january),
        },
        MonthResult {
            year: 2024,
            month: 2,
            outcome: MonthOutcome::InsufficientData { samples: 6 },
        },
        MonthResult {
            year: 2024,
            month: 3,
            outcome: MonthOutcome::Failed {
                message: "Nightscout API error: HTTP 503 Service Unavailable while fetching".to_owned(),
            },
        },
    ];
    let summary = MonthlySummary::from_results(&months);
    let report = MonthlyReport {
        year: 2024,
        goal_pct: 85.0,
        summary_assessment: summary
            .as_ref()
            .map(|s| GlycemicAssessment::from_metrics(s.mean_tir, s.mean_cv, 85.0)),
        months,
        summary,
    };

    let text = reports::monthly(&report, &mgdl());

    assert!(text.contains("Glucose Analysis for 2024 (TIR goal: 85%)"));
    assert!(text.contains("Jan   │  100.0% ✅"));
    assert!(text.contains("Feb   │ Not enough data (6 readings)"));
    assert!(text.contains("Mar   │ Error: Nightscout API error: HTTP 503 Service U\n"));
    assert!(text.contains("SUMMARY (1 months, 20 readings)"));
    assert!(text.contains("GOAL MET"));
    assert!(text.contains("Best TIR: Jan"));
}

#[test]
fn test_monthly_report_without_analyzed_months() {
    let report = MonthlyReport {
        year: 2023,
        goal_pct: 85.0,
        months: vec![MonthResult {
            year: 2023,
            month: 7,
            outcome: MonthOutcome::NoData,
        }],
        summary: None,
        summary_assessment: None,
    };

    let text = reports::monthly(&report, &mgdl());

    assert!(text.contains("Jul   │ No data"));
    assert!(!text.contains("SUMMARY"));
}

#[test]
fn test_treatments_report() {
    let report = TreatmentReport {
        hours: 24,
        treatments: vec![
            treatment("2024-03-15T12:00:00Z", "Meal Bolus", Some(4.5), Some(45.0)),
            treatment("2024-03-15T08:00:00Z", "Correction Bolus", Some(1.5), None),
        ],
        total_insulin: 6.0,
        total_carbs: 45.0,
    };

    let text = reports::treatments(&report);

    assert!(text.contains("Treatments for 24h"));
    assert!(text.contains("• 03-15 12:00: [Meal Bolus] 💉 4.5 U 🍞 45 g"));
    assert!(text.contains("Totals: 💉 6.0 U 🍞 45 g"));
}

#[test]
fn test_treatments_report_empty() {
    let report = TreatmentReport {
        hours: 12,
        treatments: Vec::new(),
        total_insulin: 0.0,
        total_carbs: 0.0,
    };
    assert_eq!(reports::treatments(&report), "No treatments in the last 12 hours");
}

#[test]
fn test_server_status_defaults() {
    let status = ServerStatus {
        name: Some("My Nightscout".to_owned()),
        version: Some("15.0.2".to_owned()),
        server_time: None,
        settings: Some(ServerSettings::default()),
    };

    let text = reports::server_status(&status);

    assert!(text.contains("Name: My Nightscout"));
    assert!(text.contains("Server time: N/A"));
    assert!(text.contains("Units: mg/dl"));
    assert!(!text.contains("Thresholds"));
}

#[test]
fn test_devices_report() {
    let statuses: Vec<DeviceStatus> = serde_json::from_value(json!([
        {
            "created_at": "2024-03-15T10:05:00Z",
            "device": "openaps://rig",
            "uploader": { "battery": 87 },
            "pump": { "reservoir": 112.5, "battery": { "percent": 60 } }
        }
    ]))
    .unwrap();

    let text = reports::devices(&statuses);

    assert!(text.contains("⏰ 10:05:"));
    assert!(text.contains("Uploader: battery 87%"));
    assert!(text.contains("Pump: reservoir 112.5U, battery 60%"));
    assert_eq!(reports::devices(&[]), "No device data available");
}

#[test]
fn test_structured_json_output() {
    let report = range_report();

    let rendered = format_structured(&report, OutputFormat::Json).unwrap();
    let value: Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value["status"], "ready");
    assert_eq!(value["statistics"]["count"], 30);
    assert_eq!(value["assessment"]["tir_status"], "below_target");
}

#[cfg(feature = "toon")]
#[test]
fn test_structured_toon_output() {
    let rendered = format_structured(&json!({ "count": 3, "unit": "mg/dL" }), OutputFormat::Toon).unwrap();

    assert!(rendered.contains("count: 3"));
}

#[test]
fn test_output_format_parsing() {
    assert_eq!(OutputFormat::from_str_param("JSON"), OutputFormat::Json);
    assert_eq!(OutputFormat::from_str_param(" toon "), OutputFormat::Toon);
    assert_eq!(OutputFormat::from_str_param("markdown"), OutputFormat::Text);
    assert_eq!(OutputFormat::Json.to_string(), "json");
}
