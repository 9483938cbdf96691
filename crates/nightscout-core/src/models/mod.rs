// ABOUTME: Data models for Nightscout glucose entries, treatments, and status records
// ABOUTME: Re-exports sample, time window, treatment, and status types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Glucose sample and trend direction
pub mod sample;
/// Server and device status
pub mod status;
/// Half-open fetch interval
pub mod time_window;
/// Treatment events
pub mod treatment;

pub use sample::{Sample, TrendDirection};
pub use status::{
    DeviceStatus, PumpBattery, PumpStatus, ServerSettings, ServerStatus, Thresholds,
    UploaderStatus,
};
pub use time_window::TimeWindow;
pub use treatment::{parse_timestamp, Treatment};

/// Samples produced by one range fetch
pub type SampleSet = Vec<Sample>;
