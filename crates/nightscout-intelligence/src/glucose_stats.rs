// ABOUTME: Statistics engine reducing glucose samples to clinical metrics
// ABOUTME: Sensor-error filtering, population variance, six-band time in range, and A1c estimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Glucose Statistics
//!
//! All math is in mg/dL. Readings below the 40 mg/dL sensor-error floor are
//! dropped before anything is computed; an empty result after filtering is
//! reported as `None`, never as an error.
//!
//! The six bands are evaluated independently, exactly as defined:
//!
//! | band | predicate |
//! |---|---|
//! | severe low | `v < 54` |
//! | low | `54 <= v < 70` |
//! | in target | `low <= v <= high` |
//! | above target | `high < v <= 180` |
//! | high | `180 < v <= 250` |
//! | very high | `v > 250` |
//!
//! With the default target `[70, 140]` they partition every valid reading.
//! A custom target can leave gaps or overlaps (a `high` above 180 makes the
//! above-target band empty); that is reported as computed, not corrected.
#![allow(clippy::cast_precision_loss)] // Safe: reading counts stay far below 2^52

use nightscout_core::constants::glucose::{
    A1C_DIVISOR, A1C_INTERCEPT, ABOVE_TARGET_MAX_MGDL, HIGH_MAX_MGDL, LOW_BELOW_MGDL,
    SENSOR_ERROR_FLOOR_MGDL, SEVERE_LOW_BELOW_MGDL,
};
use nightscout_core::models::Sample;
use nightscout_core::units::TargetRange;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Round to one decimal place (half away from zero)
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Estimated A1c (%) from mean glucose in mg/dL, unrounded
#[must_use]
pub fn estimate_a1c(mean_mgdl: f64) -> f64 {
    (mean_mgdl + A1C_INTERCEPT) / A1C_DIVISOR
}

/// Whether a reading is physiologically plausible
#[must_use]
pub const fn is_valid_reading(sample: &Sample) -> bool {
    sample.value >= SENSOR_ERROR_FLOOR_MGDL
}

/// Samples that pass the sensor-error floor, in their original order
#[must_use]
pub fn filter_valid(samples: &[Sample]) -> Vec<Sample> {
    samples.iter().filter(|s| is_valid_reading(s)).cloned().collect()
}

/// Percentage of readings in each clinical band, rounded to one decimal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInRanges {
    /// `< 54` mg/dL
    pub severe_low_pct: f64,
    /// `[54, 70)` mg/dL
    pub low_pct: f64,
    /// `[low, high]` of the configured target
    pub in_target_pct: f64,
    /// `(high, 180]` mg/dL
    pub above_target_pct: f64,
    /// `(180, 250]` mg/dL
    pub high_pct: f64,
    /// `> 250` mg/dL
    pub very_high_pct: f64,
}

impl TimeInRanges {
    /// Sum of all six bands
    #[must_use]
    pub fn total_pct(&self) -> f64 {
        self.severe_low_pct
            + self.low_pct
            + self.in_target_pct
            + self.above_target_pct
            + self.high_pct
            + self.very_high_pct
    }
}

/// Descriptive statistics over the valid readings of one sample set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlucoseStatistics {
    /// Valid readings counted
    pub count: usize,
    /// Mean mg/dL, unrounded
    pub mean: f64,
    /// Population standard deviation, mg/dL, unrounded
    pub std_dev: f64,
    /// Coefficient of variation in percent, one decimal
    pub cv: f64,
    /// Lowest valid reading
    pub min: i32,
    /// Highest valid reading
    pub max: i32,
    /// Band breakdown
    pub ranges: TimeInRanges,
    /// Estimated A1c in percent, one decimal
    pub a1c: f64,
}

impl GlucoseStatistics {
    /// Time in the configured target range
    #[must_use]
    pub const fn tir(&self) -> f64 {
        self.ranges.in_target_pct
    }
}

/// Reduces sample sets to [`GlucoseStatistics`] against a fixed target range
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsEngine {
    target: TargetRange,
}

impl StatsEngine {
    /// Create an engine for a target range
    #[must_use]
    pub const fn new(target: TargetRange) -> Self {
        Self { target }
    }

    /// Target range used for the in-target band
    #[must_use]
    pub const fn target(&self) -> TargetRange {
        self.target
    }

    /// Compute statistics, or `None` when no reading passes the validity floor
    #[must_use]
    pub fn compute(&self, samples: &[Sample]) -> Option<GlucoseStatistics> {
        let readings: Vec<i32> = samples
            .iter()
            .filter(|s| is_valid_reading(s))
            .map(|s| s.value)
            .collect();
        let discarded = samples.len() - readings.len();
        if discarded > 0 {
            debug!(
                discarded,
                kept = readings.len(),
                "Dropped readings below the sensor-error floor"
            );
        }
        let min = readings.iter().copied().min()?;
        let max = readings.iter().copied().max()?;
        let values: Vec<f64> = readings.into_iter().map(f64::from).collect();

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        let cv = if mean > 0.0 {
            std_dev / mean * 100.0
        } else {
            0.0
        };

        Some(GlucoseStatistics {
            count: values.len(),
            mean,
            std_dev,
            cv: round_to_tenth(cv),
            min,
            max,
            ranges: self.time_in_ranges(&values),
            a1c: round_to_tenth(estimate_a1c(mean)),
        })
    }

    fn time_in_ranges(&self, values: &[f64]) -> TimeInRanges {
        let n = values.len() as f64;
        let pct = |predicate: &dyn Fn(f64) -> bool| {
            let hits = values.iter().filter(|v| predicate(**v)).count() as f64;
            round_to_tenth(hits / n * 100.0)
        };

        let severe_low = f64::from(SEVERE_LOW_BELOW_MGDL);
        let low = f64::from(LOW_BELOW_MGDL);
        let above_max = f64::from(ABOVE_TARGET_MAX_MGDL);
        let high_max = f64::from(HIGH_MAX_MGDL);
        let target = self.target;

        TimeInRanges {
            severe_low_pct: pct(&|v| v < severe_low),
            low_pct: pct(&|v| v >= severe_low && v < low),
            in_target_pct: pct(&|v| target.contains(v)),
            above_target_pct: pct(&|v| v > target.high && v <= above_max),
            high_pct: pct(&|v| v > above_max && v <= high_max),
            very_high_pct: pct(&|v| v > high_max),
        }
    }
}
