// ABOUTME: Synthetic CGM reading generators for integration tests
// ABOUTME: Builds evenly spaced readings, fixed calendar instants, and treatment fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{TimeZone, Utc};
use nightscout_mcp_server::models::{Sample, Treatment};

/// Sensor reading interval
pub const FIVE_MINUTES_MS: i64 = 5 * 60 * 1000;

/// Epoch ms of a UTC calendar instant
pub fn utc_ms(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap()
        .timestamp_millis()
}

/// `count` readings of `value` taken every five minutes starting at `start_ms`
pub fn steady_readings(start_ms: i64, count: usize, value: i32) -> Vec<Sample> {
    (0..count)
        .map(|i| Sample::new(start_ms + i64::try_from(i).unwrap() * FIVE_MINUTES_MS, value))
        .collect()
}

/// Readings cycling through `values`, five minutes apart from `start_ms`
pub fn cycling_readings(start_ms: i64, count: usize, values: &[i32]) -> Vec<Sample> {
    (0..count)
        .map(|i| Sample::new(start_ms + i64::try_from(i).unwrap() * FIVE_MINUTES_MS, values[i % values.len()]))
        .collect()
}

pub fn treatment(created_at: &str, event_type: &str, insulin: Option<f64>, carbs: Option<f64>) -> Treatment {
    Treatment {
        created_at: created_at.to_owned(),
        event_type: Some(event_type.to_owned()),
        insulin,
        carbs,
        notes: None,
    }
}
