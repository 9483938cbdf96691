// ABOUTME: Month-by-month glucose outcomes and the cross-month summary
// ABOUTME: A failed month is recorded in place; best and worst months are chosen by TIR
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: at most twelve months are averaged

use nightscout_core::constants::analysis::MIN_SAMPLES_FOR_ANALYSIS;
use nightscout_core::models::Sample;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::glucose_stats::{GlucoseStatistics, StatsEngine};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Three-letter English month name for 1-12
#[must_use]
pub fn month_abbreviation(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| MONTH_ABBREVIATIONS.get(i))
        .copied()
        .unwrap_or("???")
}

/// What happened when one month was analyzed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MonthOutcome {
    /// Enough readings to compute statistics
    Analyzed(GlucoseStatistics),
    /// Some readings, but fewer than the analysis minimum
    InsufficientData {
        /// Raw readings fetched
        samples: usize,
    },
    /// No readings at all
    NoData,
    /// Fetching the month failed; the rest of the report continues
    Failed {
        /// Error text
        message: String,
    },
}

impl MonthOutcome {
    /// Classify the readings fetched for one month
    #[must_use]
    pub fn evaluate(engine: &StatsEngine, samples: &[Sample]) -> Self {
        if samples.is_empty() {
            return Self::NoData;
        }
        if samples.len() < MIN_SAMPLES_FOR_ANALYSIS {
            return Self::InsufficientData {
                samples: samples.len(),
            };
        }
        engine
            .compute(samples)
            .map_or(Self::NoData, Self::Analyzed)
    }

    /// Statistics, if the month was analyzed
    #[must_use]
    pub const fn statistics(&self) -> Option<&GlucoseStatistics> {
        match self {
            Self::Analyzed(stats) => Some(stats),
            _ => None,
        }
    }
}

/// One month of a monthly report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthResult {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Outcome for the month
    pub outcome: MonthOutcome,
}

impl MonthResult {
    /// Short month name
    #[must_use]
    pub fn label(&self) -> &'static str {
        month_abbreviation(self.month)
    }
}

/// Month and TIR of a best or worst month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthTir {
    /// Calendar month, 1-12
    pub month: u32,
    /// TIR percentage
    pub tir: f64,
}

/// Averages over the analyzed months
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Months that produced statistics
    pub months_analyzed: usize,
    /// Valid readings across those months
    pub total_readings: usize,
    /// Mean of monthly TIR
    pub mean_tir: f64,
    /// Mean of monthly CV
    pub mean_cv: f64,
    /// Mean of monthly mean glucose, mg/dL
    pub mean_glucose: f64,
    /// Mean of monthly A1c estimates
    pub mean_a1c: f64,
    /// Highest TIR; the earliest month wins ties
    pub best: MonthTir,
    /// Lowest TIR; the earliest month wins ties
    pub worst: MonthTir,
}

impl MonthlySummary {
    /// Summarize, or `None` if no month was analyzed
    #[must_use]
    pub fn from_results(results: &[MonthResult]) -> Option<Self> {
        let analyzed: Vec<(u32, &GlucoseStatistics)> = results
            .iter()
            .filter_map(|r| r.outcome.statistics().map(|s| (r.month, s)))
            .collect();
        let (first_month, first) = analyzed.first().copied()?;

        let n = analyzed.len() as f64;
        let mean_of = |metric: fn(&GlucoseStatistics) -> f64| {
            analyzed.iter().map(|(_, s)| metric(s)).sum::<f64>() / n
        };

        let start = MonthTir {
            month: first_month,
            tir: first.tir(),
        };
        let (best, worst) = analyzed
            .iter()
            .skip(1)
            .fold((start, start), |(best, worst), (month, stats)| {
                let candidate = MonthTir {
                    month: *month,
                    tir: stats.tir(),
                };
                (
                    if candidate.tir > best.tir { candidate } else { best },
                    if candidate.tir < worst.tir { candidate } else { worst },
                )
            });
        debug!(
            months_analyzed = analyzed.len(),
            months_total = results.len(),
            best_month = best.month,
            worst_month = worst.month,
            "Monthly summary folded"
        );

        Some(Self {
            months_analyzed: analyzed.len(),
            total_readings: analyzed.iter().map(|(_, s)| s.count).sum(),
            mean_tir: mean_of(GlucoseStatistics::tir),
            mean_cv: mean_of(|s| s.cv),
            mean_glucose: mean_of(|s| s.mean),
            mean_a1c: mean_of(|s| s.a1c),
            best,
            worst,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_abbreviation() {
        assert_eq!(month_abbreviation(1), "Jan");
        assert_eq!(month_abbreviation(12), "Dec");
        assert_eq!(month_abbreviation(0), "???");
        assert_eq!(month_abbreviation(13), "???");
    }

    #[test]
    fn test_evaluate_below_minimum() {
        let engine = StatsEngine::default();
        let few: Vec<Sample> = (0..9).map(|i| Sample::new(i, 120)).collect();
        assert_eq!(
            MonthOutcome::evaluate(&engine, &few),
            MonthOutcome::InsufficientData { samples: 9 }
        );
        assert_eq!(MonthOutcome::evaluate(&engine, &[]), MonthOutcome::NoData);
    }
}
