// ABOUTME: Half-open epoch-millisecond interval used to bound range fetches
// ABOUTME: Enforces start < end at construction so every window is non-empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::time::{MS_PER_DAY, MS_PER_HOUR};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The interval `[start_ms, end_ms)` in epoch milliseconds (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start_ms: i64,
    end_ms: i64,
}

impl TimeWindow {
    /// Create a window, rejecting empty or inverted intervals
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `start_ms >= end_ms`
    pub fn new(start_ms: i64, end_ms: i64) -> AppResult<Self> {
        if start_ms >= end_ms {
            return Err(AppError::invalid_input(format!(
                "time window start ({start_ms}) must be before end ({end_ms})"
            )));
        }
        Ok(Self { start_ms, end_ms })
    }

    /// Window covering the `hours` hours that end at `end_ms`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `hours` is zero
    pub fn trailing_hours(end_ms: i64, hours: u32) -> AppResult<Self> {
        let span = i64::from(hours) * MS_PER_HOUR;
        Self::new(end_ms - span, end_ms)
    }

    /// Inclusive lower bound
    #[must_use]
    pub const fn start_ms(&self) -> i64 {
        self.start_ms
    }

    /// Exclusive upper bound
    #[must_use]
    pub const fn end_ms(&self) -> i64 {
        self.end_ms
    }

    /// Whether `timestamp_ms` falls inside the window (start inclusive, end exclusive)
    #[must_use]
    pub const fn contains(&self, timestamp_ms: i64) -> bool {
        timestamp_ms >= self.start_ms && timestamp_ms < self.end_ms
    }

    /// Whole days spanned by the window
    #[must_use]
    pub const fn whole_days(&self) -> i64 {
        (self.end_ms - self.start_ms) / MS_PER_DAY
    }

    /// Start as a UTC datetime
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.start_ms).unwrap_or_default()
    }

    /// End as a UTC datetime
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.end_ms).unwrap_or_default()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start().to_rfc3339(), self.end().to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_rejects_empty_and_inverted() {
        assert!(TimeWindow::new(10, 10).is_err());
        assert!(TimeWindow::new(11, 10).is_err());
        assert!(TimeWindow::new(10, 11).is_ok());
    }

    #[test]
    fn test_window_is_half_open() {
        let window = TimeWindow::new(1_000, 2_000).unwrap();
        assert!(window.contains(1_000));
        assert!(window.contains(1_999));
        assert!(!window.contains(2_000));
        assert!(!window.contains(999));
    }

    #[test]
    fn test_trailing_hours() {
        let window = TimeWindow::trailing_hours(10 * 3_600_000, 6).unwrap();
        assert_eq!(window.start_ms(), 4 * 3_600_000);
        assert!(TimeWindow::trailing_hours(0, 0).is_err());
    }
}
