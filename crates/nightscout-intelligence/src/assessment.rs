// ABOUTME: Goal and glycemic-stability verdicts derived from computed statistics
// ABOUTME: TIR is compared to a caller goal and a fixed 70% baseline; CV to 33%/36% cutoffs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nightscout_core::constants::analysis::{
    CV_ACCEPTABLE_MAX_PCT, CV_STABLE_MAX_PCT, TIR_BASELINE_PCT,
};
use serde::{Deserialize, Serialize};

use crate::glucose_stats::{round_to_tenth, GlucoseStatistics};

/// Time-in-range verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TirStatus {
    /// At or above the goal
    GoalMet,
    /// Below the goal but at or above the 70% baseline
    Borderline,
    /// Below both
    BelowTarget,
}

impl TirStatus {
    /// Classify a TIR percentage against a goal
    #[must_use]
    pub fn classify(tir_pct: f64, goal_pct: f64) -> Self {
        if tir_pct >= goal_pct {
            Self::GoalMet
        } else if tir_pct >= TIR_BASELINE_PCT {
            Self::Borderline
        } else {
            Self::BelowTarget
        }
    }
}

/// Coefficient-of-variation verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariabilityStatus {
    /// CV <= 33%
    Stable,
    /// CV <= 36%
    Acceptable,
    /// CV > 36%
    High,
}

impl VariabilityStatus {
    /// Classify a CV percentage
    #[must_use]
    pub fn classify(cv_pct: f64) -> Self {
        if cv_pct <= CV_STABLE_MAX_PCT {
            Self::Stable
        } else if cv_pct <= CV_ACCEPTABLE_MAX_PCT {
            Self::Acceptable
        } else {
            Self::High
        }
    }
}

/// Combined verdict for one analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlycemicAssessment {
    /// TIR goal used, percent
    pub goal_pct: f64,
    /// TIR verdict
    pub tir_status: TirStatus,
    /// CV verdict
    pub variability: VariabilityStatus,
    /// Percentage points still missing to reach the goal (0 when met)
    pub gap_to_goal_pct: f64,
}

impl GlycemicAssessment {
    /// Assess statistics against a TIR goal
    #[must_use]
    pub fn assess(stats: &GlucoseStatistics, goal_pct: f64) -> Self {
        Self::from_metrics(stats.tir(), stats.cv, goal_pct)
    }

    /// Assess raw TIR and CV values, e.g. monthly averages
    #[must_use]
    pub fn from_metrics(tir_pct: f64, cv_pct: f64, goal_pct: f64) -> Self {
        Self {
            goal_pct,
            tir_status: TirStatus::classify(tir_pct, goal_pct),
            variability: VariabilityStatus::classify(cv_pct),
            gap_to_goal_pct: round_to_tenth((goal_pct - tir_pct).max(0.0)),
        }
    }

    /// Whether the TIR goal was reached
    #[must_use]
    pub fn goal_met(&self) -> bool {
        self.tir_status == TirStatus::GoalMet
    }
}
