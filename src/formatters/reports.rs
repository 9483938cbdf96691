// ABOUTME: Text renderers for every glucose, treatment, and status report
// ABOUTME: Emoji-annotated plain text in the configured unit; no computation happens here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{group_thousands, DisplaySettings};
use crate::models::{DeviceStatus, Sample, ServerStatus, Treatment, TrendDirection};
use crate::services::{Analysis, HistoryReport, MonthlyReport, RangeReport, TreatmentReport};
use crate::units::GlucoseUnit;
use nightscout_intelligence::{
    GlucoseStatistics, MonthOutcome, MonthResult, TirStatus, VariabilityStatus,
};

/// Readings listed in a history report regardless of the caller's cap
const MAX_LISTED_READINGS: usize = 15;

/// Characters of an error message shown in a monthly table row
const MONTH_ERROR_PREVIEW_CHARS: usize = 40;

const fn tir_mark(status: TirStatus) -> &'static str {
    match status {
        TirStatus::GoalMet => "✅",
        TirStatus::Borderline => "⚠️",
        TirStatus::BelowTarget => "❌",
    }
}

const fn cv_mark(status: VariabilityStatus) -> &'static str {
    match status {
        VariabilityStatus::Stable => "✅",
        VariabilityStatus::Acceptable => "⚠️",
        VariabilityStatus::High => "❌",
    }
}

fn timestamp(ms: i64, pattern: &str) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map_or_else(|| ms.to_string(), |dt| dt.format(pattern).to_string())
}

fn iso_timestamp(raw: &str, parsed: Option<DateTime<Utc>>, pattern: &str) -> String {
    parsed.map_or_else(|| raw.to_owned(), |dt| dt.format(pattern).to_string())
}

fn min_max(stats: &GlucoseStatistics, display: &DisplaySettings) -> String {
    format!(
        "{}–{}",
        display.glucose_short(f64::from(stats.min)),
        display.glucose_short(f64::from(stats.max))
    )
}

/// Latest reading with trend, delta, and device
#[must_use]
pub fn current_reading(sample: Option<&Sample>, display: &DisplaySettings) -> String {
    let Some(sample) = sample else {
        return "No glucose readings available".to_owned();
    };

    let arrow = sample.direction.as_ref().map_or("", TrendDirection::arrow);
    let delta = sample.delta.unwrap_or(0.0);
    let sign = if delta >= 0.0 { '+' } else { '-' };
    let magnitude = match display.units {
        GlucoseUnit::Mmol => display.glucose_short(delta.abs()),
        GlucoseUnit::MgDl => format!("{:.0}", delta.abs().trunc()),
    };

    format!(
        "🩸 Current glucose: {} {arrow}\n\
         📅 Time: {} UTC\n\
         📈 Delta: {sign}{magnitude}\n\
         📱 Device: {}",
        display.glucose(f64::from(sample.value)),
        timestamp(sample.timestamp, "%Y-%m-%d %H:%M"),
        sample.device.as_deref().unwrap_or("N/A"),
    )
}

/// Recent history: statistics plus the newest readings
#[must_use]
pub fn history(report: &HistoryReport, display: &DisplaySettings) -> String {
    let stats = match &report.statistics {
        Analysis::Ready(stats) => stats,
        Analysis::InsufficientData { samples: 0 } => {
            return format!("No data for the last {} hours", report.hours);
        }
        Analysis::InsufficientData { samples } => {
            return format!(
                "No valid readings for the last {} hours ({samples} sensor errors filtered)",
                report.hours
            );
        }
    };

    let mut text = format!(
        "📊 Glucose history for {}h ({} readings)\n\n\
         📈 Statistics:\n\
         • Average: {}\n\
         • Min/Max: {}\n\
         • TIR ({}): {:.1}%\n\
         • CV: {:.1}%\n\n\
         📋 Recent readings:",
        report.hours,
        report.readings.len(),
        display.glucose_short(stats.mean),
        min_max(stats, display),
        display.target_label(),
        stats.tir(),
        stats.cv,
    );

    let listed = report.max_displayed.min(MAX_LISTED_READINGS);
    for sample in report.readings.iter().take(listed) {
        let arrow = sample.direction.as_ref().map_or("", TrendDirection::arrow);
        let line = format!(
            "• {}: {} {arrow}",
            timestamp(sample.timestamp, "%m-%d %H:%M"),
            display.glucose_short(f64::from(sample.value)),
        );
        text.push('\n');
        text.push_str(line.trim_end());
    }

    let remaining = report.readings.len().saturating_sub(listed);
    if remaining > 0 {
        let _ = write!(text, "\n... and {remaining} more readings");
    }

    text
}

/// Free-form range analysis with bands and assessment
#[must_use]
pub fn range_analysis(analysis: &Analysis<RangeReport>, display: &DisplaySettings) -> String {
    let Analysis::Ready(report) = analysis else {
        return "Not enough data for analysis".to_owned();
    };
    let stats = &report.statistics;
    let ranges = &stats.ranges;
    let assessment = &report.assessment;
    let goal = assessment.goal_pct;

    let mut text = format!(
        "📊 Glucose Analysis: {} — {} ({} days, {} readings)\n\n\
         📈 Key Metrics:\n\
         • Average glucose: {}\n\
         • Min/Max: {}\n\
         • Standard deviation: {}\n\
         • CV: {:.1}% {}\n\
         • Estimated HbA1c: {:.1}%\n\n\
         🎯 Time in Ranges:\n\
         • 🔴 Severe hypo ({}): {:.1}% (goal <1%)\n\
         • 🟠 Hypoglycemia ({}): {:.1}% (goal <4%)\n\
         • 🟢 In target ({}): {:.1}% {} (goal ≥{goal}%)\n\
         • 🟡 Above target: {:.1}%\n\
         • 🟠 High ({}): {:.1}%\n\
         • 🔴 Very high ({}): {:.1}% (goal <5%)\n\n\
         💡 Assessment:",
        report.window.start().format("%Y-%m-%d"),
        report.window.end().format("%Y-%m-%d"),
        report.window.whole_days(),
        group_thousands(stats.count),
        display.glucose_short(stats.mean),
        min_max(stats, display),
        display.glucose_short(stats.std_dev),
        stats.cv,
        cv_mark(assessment.variability),
        stats.a1c,
        display.severe_low_label(),
        ranges.severe_low_pct,
        display.low_label(),
        ranges.low_pct,
        display.target_label(),
        ranges.in_target_pct,
        tir_mark(assessment.tir_status),
        ranges.above_target_pct,
        display.high_label(),
        ranges.high_pct,
        display.very_high_label(),
        ranges.very_high_pct,
    );

    if assessment.goal_met() {
        let _ = write!(text, "\n• ✅ TIR goal of {goal}% achieved!");
    } else {
        let _ = write!(
            text,
            "\n• ⚠️ {:.1}% away from TIR goal of {goal}%",
            assessment.gap_to_goal_pct
        );
    }

    text.push_str(match assessment.variability {
        VariabilityStatus::Stable => "\n• ✅ Excellent glucose stability",
        VariabilityStatus::Acceptable => "\n• 📊 Good stability",
        VariabilityStatus::High => "\n• ⚠️ High variability",
    });

    text
}

fn month_row(result: &MonthResult, goal: f64, display: &DisplaySettings) -> String {
    let name = result.label();
    match &result.outcome {
        MonthOutcome::Analyzed(stats) => format!(
            "{name:5} │ {:6.1}% {}    │ {:>5} │ {:5.1}% {} │ {:4.1}% │ {:>8}",
            stats.tir(),
            tir_mark(TirStatus::classify(stats.tir(), goal)),
            display.glucose_short(stats.mean),
            stats.cv,
            cv_mark(VariabilityStatus::classify(stats.cv)),
            stats.a1c,
            group_thousands(stats.count),
        ),
        MonthOutcome::InsufficientData { samples } => {
            format!("{name:5} │ Not enough data ({samples} readings)")
        }
        MonthOutcome::NoData => format!("{name:5} │ No data"),
        MonthOutcome::Failed { message } => {
            let preview: String = message.chars().take(MONTH_ERROR_PREVIEW_CHARS).collect();
            format!("{name:5} │ Error: {preview}")
        }
    }
}

/// Month-by-month table with the cross-month summary
#[must_use]
pub fn monthly(report: &MonthlyReport, display: &DisplaySettings) -> String {
    let heavy = "=".repeat(80);
    let light = "-".repeat(80);
    let goal = report.goal_pct;
    let target_label = display.target_label();

    let mut text = format!(
        "📊 Glucose Analysis for {} (TIR goal: {goal}%)\n{heavy}\n\
         Month │  TIR ({target_label})  │  Avg  │   CV   │  A1c  │ Readings\n{light}\n",
        report.year
    );
    for result in &report.months {
        text.push_str(&month_row(result, goal, display));
        text.push('\n');
    }
    text.push_str(&heavy);
    text.push('\n');

    let (Some(summary), Some(assessment)) = (&report.summary, &report.summary_assessment) else {
        return text;
    };

    let tir_status = if assessment.goal_met() {
        "✅ GOAL MET".to_owned()
    } else {
        format!("⚠️ {:.1}% to goal", assessment.gap_to_goal_pct)
    };
    let cv_status = match assessment.variability {
        VariabilityStatus::Stable => "✅ Stable",
        VariabilityStatus::Acceptable => "📊 OK",
        VariabilityStatus::High => "⚠️ High",
    };

    let _ = write!(
        text,
        "\n📈 SUMMARY ({} months, {} readings)\n{}\n\
         🎯 Average TIR ({target_label}): {:.1}% — {tir_status}\n\
         📊 Average glucose: {}\n\
         📉 Average CV: {:.1}% — {cv_status}\n\
         🩸 Estimated HbA1c: {:.1}%\n\n\
         🏆 Best TIR: {} — {:.1}%\n\
         📉 Worst TIR: {} — {:.1}%\n",
        summary.months_analyzed,
        group_thousands(summary.total_readings),
        "-".repeat(60),
        summary.mean_tir,
        display.glucose(summary.mean_glucose),
        summary.mean_cv,
        summary.mean_a1c,
        nightscout_intelligence::month_abbreviation(summary.best.month),
        summary.best.tir,
        nightscout_intelligence::month_abbreviation(summary.worst.month),
        summary.worst.tir,
    );

    text
}

fn treatment_line(treatment: &Treatment) -> String {
    let mut parts = vec![format!(
        "• {}:",
        iso_timestamp(
            &treatment.created_at,
            treatment.created_at_utc(),
            "%m-%d %H:%M"
        )
    )];
    if let Some(event) = treatment.event_type.as_deref().filter(|e| !e.is_empty()) {
        parts.push(format!("[{event}]"));
    }
    if let Some(insulin) = treatment.insulin.filter(|v| *v > 0.0) {
        parts.push(format!("💉 {insulin} U"));
    }
    if let Some(carbs) = treatment.carbs.filter(|v| *v > 0.0) {
        parts.push(format!("🍞 {carbs} g"));
    }
    if let Some(notes) = treatment.notes.as_deref().filter(|n| !n.is_empty()) {
        parts.push(format!("📝 {notes}"));
    }
    parts.join(" ")
}

/// Treatment list with insulin and carb totals
#[must_use]
pub fn treatments(report: &TreatmentReport) -> String {
    if report.treatments.is_empty() {
        return format!("No treatments in the last {} hours", report.hours);
    }

    let mut text = format!("💉 Treatments for {}h:\n", report.hours);
    for treatment in &report.treatments {
        text.push_str(&treatment_line(treatment));
        text.push('\n');
    }

    text.push_str("\n📊 Totals:");
    if report.total_insulin > 0.0 {
        let _ = write!(text, " 💉 {:.1} U", report.total_insulin);
    }
    if report.total_carbs > 0.0 {
        let _ = write!(text, " 🍞 {} g", report.total_carbs);
    }
    text
}

fn threshold(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_owned(), |v| v.to_string())
}

/// Site name, version, units, and alarm thresholds
#[must_use]
pub fn server_status(status: &ServerStatus) -> String {
    let settings = status.settings.as_ref();
    let mut text = format!(
        "⚙️ Nightscout Status:\n\
         • Name: {}\n\
         • Version: {}\n\
         • Server time: {}\n\
         • Units: {}",
        status.name.as_deref().unwrap_or("N/A"),
        status.version.as_deref().unwrap_or("N/A"),
        status.server_time.as_deref().unwrap_or("N/A"),
        settings
            .and_then(|s| s.units.as_deref())
            .unwrap_or("mg/dl"),
    );

    if let Some(thresholds) = settings.and_then(|s| s.thresholds.as_ref()) {
        let _ = write!(
            text,
            "\n\n🎯 Thresholds:\n\
             • High: {} mg/dL\n\
             • Target top: {} mg/dL\n\
             • Target bottom: {} mg/dL\n\
             • Low: {} mg/dL",
            threshold(thresholds.bg_high),
            threshold(thresholds.bg_target_top),
            threshold(thresholds.bg_target_bottom),
            threshold(thresholds.bg_low),
        );
    }

    text
}

fn battery(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => "?".to_owned(),
    }
}

/// Uploader, pump, and device state per report
#[must_use]
pub fn devices(statuses: &[DeviceStatus]) -> String {
    if statuses.is_empty() {
        return "No device data available".to_owned();
    }

    let mut text = "📱 Device Status:\n".to_owned();
    for status in statuses {
        let _ = write!(
            text,
            "\n⏰ {}:",
            iso_timestamp(&status.created_at, status.created_at_utc(), "%H:%M")
        );
        if let Some(uploader) = &status.uploader {
            let _ = write!(
                text,
                "\n  📱 Uploader: battery {}%",
                battery(uploader.battery.as_ref())
            );
        }
        if let Some(pump) = &status.pump {
            let reservoir = pump
                .reservoir
                .map_or_else(|| "?".to_owned(), |r| r.to_string());
            let percent = pump
                .battery
                .as_ref()
                .and_then(|b| b.percent)
                .map_or_else(|| "?".to_owned(), |p| p.to_string());
            let _ = write!(
                text,
                "\n  💉 Pump: reservoir {reservoir}U, battery {percent}%"
            );
        }
        if let Some(device) = &status.device {
            let _ = write!(text, "\n  📡 Device: {device}");
        }
    }
    text
}
