// ABOUTME: Glucose analysis engine: statistics, time-in-range bands, and date ranges
// ABOUTME: Pure functions over mg/dL samples; display units never enter the math
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nightscout Intelligence
//!
//! - **glucose_stats**: validity filtering, descriptive statistics, six-band
//!   time-in-range breakdown, and the A1c estimate
//! - **date_range**: relative, year-month, and full-date range expressions
//! - **assessment**: goal and variability verdicts over computed statistics
//! - **monthly**: per-month outcomes and the cross-month summary

pub use nightscout_core::errors;
pub use nightscout_core::models;

/// Goal and stability verdicts
pub mod assessment;
/// Date range expression parsing
pub mod date_range;
/// Statistics engine
pub mod glucose_stats;
/// Monthly aggregation
pub mod monthly;

pub use assessment::{GlycemicAssessment, TirStatus, VariabilityStatus};
pub use date_range::{month_window, resolve, resolve_range, DateExpression, RelativeUnit};
pub use glucose_stats::{
    estimate_a1c, filter_valid, is_valid_reading, round_to_tenth, GlucoseStatistics, StatsEngine,
    TimeInRanges,
};
pub use monthly::{month_abbreviation, MonthOutcome, MonthResult, MonthTir, MonthlySummary};
