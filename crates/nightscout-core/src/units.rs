// ABOUTME: Glucose display units, mg/dL to mmol/L conversion, and the target range
// ABOUTME: All computation stays in mg/dL; mmol/L is a display-only projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::glucose::{
    ABOVE_TARGET_MAX_MGDL, DEFAULT_TARGET_HIGH_MGDL, DEFAULT_TARGET_LOW_MGDL, MGDL_PER_MMOL,
    MMOL_INPUT_CEILING,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Convert mg/dL to mmol/L
#[must_use]
pub fn mgdl_to_mmol(mgdl: f64) -> f64 {
    mgdl / MGDL_PER_MMOL
}

/// Interpret a user-supplied glucose threshold
///
/// Values below 30 cannot be plausible mg/dL thresholds, so they are read as
/// mmol/L and converted.
#[must_use]
pub fn normalize_glucose_input(value: f64) -> f64 {
    if value < MMOL_INPUT_CEILING {
        value * MGDL_PER_MMOL
    } else {
        value
    }
}

/// Display unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlucoseUnit {
    /// Milligrams per deciliter
    #[serde(rename = "mgdl")]
    MgDl,
    /// Millimoles per liter
    #[default]
    Mmol,
}

impl GlucoseUnit {
    /// Parse a unit selector; anything other than `mgdl` means mmol/L
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("mgdl") {
            Self::MgDl
        } else {
            Self::Mmol
        }
    }

    /// Unit label for display
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MgDl => "mg/dL",
            Self::Mmol => "mmol/L",
        }
    }

    /// Project an mg/dL value into this unit
    #[must_use]
    pub fn convert(self, mgdl: f64) -> f64 {
        match self {
            Self::MgDl => mgdl,
            Self::Mmol => mgdl_to_mmol(mgdl),
        }
    }
}

impl fmt::Display for GlucoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MgDl => write!(f, "mgdl"),
            Self::Mmol => write!(f, "mmol"),
        }
    }
}

/// Configured "in target" band in mg/dL (both bounds inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRange {
    /// Lower bound, mg/dL
    pub low: f64,
    /// Upper bound, mg/dL
    pub high: f64,
}

impl TargetRange {
    /// Create a target range from mg/dL bounds
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Create a target range from user input, auto-detecting mmol/L values
    #[must_use]
    pub fn from_user_input(low: f64, high: f64) -> Self {
        Self::new(normalize_glucose_input(low), normalize_glucose_input(high))
    }

    /// Whether an mg/dL value is inside the target band
    #[must_use]
    pub fn contains(&self, mgdl: f64) -> bool {
        mgdl >= self.low && mgdl <= self.high
    }

    /// The above-target band `(high, 180]` is empty when `high` reaches 180
    #[must_use]
    pub fn above_target_band_is_degenerate(&self) -> bool {
        self.high >= f64::from(ABOVE_TARGET_MAX_MGDL)
    }
}

impl Default for TargetRange {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_LOW_MGDL, DEFAULT_TARGET_HIGH_MGDL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mmol_input_is_converted() {
        let range = TargetRange::from_user_input(3.9, 7.8);
        assert!((range.low - 70.27).abs() < 0.01);
        assert!((range.high - 140.54).abs() < 0.01);

        let mgdl = TargetRange::from_user_input(80.0, 160.0);
        assert!((mgdl.low - 80.0).abs() < f64::EPSILON);
        assert!((mgdl.high - 160.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_target_bounds_are_inclusive() {
        let range = TargetRange::default();
        assert!(range.contains(70.0));
        assert!(range.contains(140.0));
        assert!(!range.contains(69.0));
        assert!(!range.contains(141.0));
    }

    #[test]
    fn test_unit_selector() {
        assert_eq!(GlucoseUnit::from_str_or_default("mgdl"), GlucoseUnit::MgDl);
        assert_eq!(GlucoseUnit::from_str_or_default("MGDL"), GlucoseUnit::MgDl);
        assert_eq!(GlucoseUnit::from_str_or_default("mmol"), GlucoseUnit::Mmol);
        assert_eq!(GlucoseUnit::from_str_or_default("mg/dl"), GlucoseUnit::Mmol);
        assert!((GlucoseUnit::Mmol.convert(180.182) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_above_target_band() {
        assert!(!TargetRange::default().above_target_band_is_degenerate());
        assert!(TargetRange::new(70.0, 200.0).above_target_band_is_degenerate());
    }
}
