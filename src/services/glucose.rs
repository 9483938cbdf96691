// ABOUTME: Glucose service composing date resolution, paginated fetching, and statistics
// ABOUTME: Returns plain report values; "not enough data" is an outcome, never an error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::constants::analysis::MIN_SAMPLES_FOR_ANALYSIS;
use crate::constants::time::MS_PER_HOUR;
use crate::errors::{AppError, AppResult};
use crate::models::{DeviceStatus, Sample, ServerStatus, TimeWindow, Treatment};
use nightscout_intelligence::{
    filter_valid, is_valid_reading, month_window, resolve_range, GlucoseStatistics, GlycemicAssessment,
    MonthOutcome, MonthResult, MonthlySummary, StatsEngine,
};
use nightscout_providers::{CgmDataSource, RangeFetcher};

/// Result of an analytical operation that needs a minimum amount of data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Analysis<T> {
    /// Enough data; the computed report
    Ready(T),
    /// Too few readings to say anything meaningful
    InsufficientData {
        /// Raw readings fetched, before the validity filter
        samples: usize,
    },
}

impl<T> Analysis<T> {
    /// The report, if one was produced
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::InsufficientData { .. } => None,
        }
    }
}

/// Recent history with summary statistics
#[derive(Debug, Clone, Serialize)]
pub struct HistoryReport {
    /// Hours covered
    pub hours: u32,
    /// Window that was fetched
    pub window: TimeWindow,
    /// Valid readings, newest first
    pub readings: Vec<Sample>,
    /// Caller's cap on listed readings
    pub max_displayed: usize,
    /// Statistics over `readings`
    pub statistics: Analysis<GlucoseStatistics>,
}

/// Free-form range analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeReport {
    /// Resolved window
    pub window: TimeWindow,
    /// Statistics over the valid readings
    pub statistics: GlucoseStatistics,
    /// Verdict against the caller's TIR goal
    pub assessment: GlycemicAssessment,
}

/// Month-by-month analysis of one year
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    /// Calendar year
    pub year: i32,
    /// TIR goal, percent
    pub goal_pct: f64,
    /// One entry per requested month, in order
    pub months: Vec<MonthResult>,
    /// Averages over the analyzed months
    pub summary: Option<MonthlySummary>,
    /// Verdict on the averaged TIR and CV
    pub summary_assessment: Option<GlycemicAssessment>,
}

/// Recent treatments with totals
#[derive(Debug, Clone, Serialize)]
pub struct TreatmentReport {
    /// Hours covered
    pub hours: u32,
    /// Treatments, newest first
    pub treatments: Vec<Treatment>,
    /// Insulin delivered, units
    pub total_insulin: f64,
    /// Carbohydrates, grams
    pub total_carbs: f64,
}

impl TreatmentReport {
    fn new(hours: u32, treatments: Vec<Treatment>) -> Self {
        let total = |field: fn(&Treatment) -> Option<f64>| {
            treatments
                .iter()
                .filter_map(field)
                .filter(|v| *v > 0.0)
                .sum::<f64>()
        };
        let total_insulin = total(|t| t.insulin);
        let total_carbs = total(|t| t.carbs);
        Self {
            hours,
            treatments,
            total_insulin,
            total_carbs,
        }
    }
}

fn system_now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// The operations exposed through the MCP tools
///
/// Holds no per-request state; one instance serves every call.
pub struct GlucoseService {
    source: Arc<dyn CgmDataSource>,
    engine: StatsEngine,
    page_size: usize,
    now: fn() -> i64,
}

impl GlucoseService {
    /// Create a service over `source` using the configured target and page size
    #[must_use]
    pub fn new(source: Arc<dyn CgmDataSource>, config: &ServerConfig) -> Self {
        Self {
            source,
            engine: StatsEngine::new(config.target),
            page_size: config.nightscout.page_size,
            now: system_now_ms,
        }
    }

    /// Replace the wall clock (epoch ms)
    #[must_use]
    pub fn with_clock(mut self, now: fn() -> i64) -> Self {
        self.now = now;
        self
    }

    /// Engine used for every computation
    #[must_use]
    pub const fn engine(&self) -> &StatsEngine {
        &self.engine
    }

    async fn fetch_window(&self, window: &TimeWindow) -> AppResult<Vec<Sample>> {
        RangeFetcher::new(self.source.as_ref(), self.page_size)
            .fetch(window)
            .await
    }

    /// Latest reading, if the site has a valid one
    ///
    /// An entry without a sensor value (meter or calibration record) or below
    /// the sensor-error floor counts as no reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unconfigured or the request fails
    pub async fn fetch_current_sample(&self) -> AppResult<Option<Sample>> {
        let latest = self.source.latest_entries(1).await?;
        let current = latest.into_iter().next();
        if let Some(sample) = current.as_ref().filter(|s| !is_valid_reading(s)) {
            warn!(
                timestamp = sample.timestamp,
                value = sample.value,
                "Newest entry has no usable glucose value"
            );
            return Ok(None);
        }
        Ok(current)
    }

    /// The last `hours` hours of readings with statistics
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for zero hours, or any fetch error
    pub async fn fetch_history(&self, hours: u32, max_displayed: usize) -> AppResult<HistoryReport> {
        let window = TimeWindow::trailing_hours((self.now)(), hours)?;
        let raw = self.fetch_window(&window).await?;
        let raw_count = raw.len();

        let mut readings = filter_valid(&raw);
        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let statistics = self
            .engine
            .compute(&readings)
            .map_or(Analysis::InsufficientData { samples: raw_count }, Analysis::Ready);

        debug!(
            hours,
            samples = raw_count,
            valid = readings.len(),
            "Glucose history fetched"
        );

        Ok(HistoryReport {
            hours,
            window,
            readings,
            max_displayed,
            statistics,
        })
    }

    /// Analyze an arbitrary date range against a TIR goal
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateExpression` or `InvalidInput` for bad bounds, or any fetch error
    pub async fn analyze_range(
        &self,
        from: &str,
        to: Option<&str>,
        goal_pct: f64,
    ) -> AppResult<Analysis<RangeReport>> {
        let window = resolve_range(from, to, (self.now)())?;
        let raw = self.fetch_window(&window).await?;

        if raw.len() < MIN_SAMPLES_FOR_ANALYSIS {
            info!(samples = raw.len(), %window, "Not enough readings for range analysis");
            return Ok(Analysis::InsufficientData { samples: raw.len() });
        }

        let Some(statistics) = self.engine.compute(&raw) else {
            return Ok(Analysis::InsufficientData { samples: raw.len() });
        };

        Ok(Analysis::Ready(RangeReport {
            window,
            assessment: GlycemicAssessment::assess(&statistics, goal_pct),
            statistics,
        }))
    }

    /// Analyze each month from `from_month` to `to_month` of `year`
    ///
    /// A month whose fetch fails is recorded as failed and the report continues.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the month range is empty or outside 1-12
    pub async fn analyze_monthly(
        &self,
        year: i32,
        from_month: u32,
        to_month: u32,
        goal_pct: f64,
    ) -> AppResult<MonthlyReport> {
        if !(1..=12).contains(&from_month) || !(1..=12).contains(&to_month) {
            return Err(AppError::invalid_input(format!(
                "months must be 1-12 (got {from_month}-{to_month})"
            )));
        }
        if from_month > to_month {
            return Err(AppError::invalid_input(format!(
                "fromMonth ({from_month}) must not be after toMonth ({to_month})"
            )));
        }

        let mut months = Vec::new();
        for month in from_month..=to_month {
            let window = month_window(year, month)?;
            let outcome = match self.fetch_window(&window).await {
                Ok(samples) => MonthOutcome::evaluate(&self.engine, &samples),
                Err(e) => {
                    warn!(year, month, error = %e, "Month fetch failed");
                    MonthOutcome::Failed {
                        message: e.to_string(),
                    }
                }
            };
            months.push(MonthResult {
                year,
                month,
                outcome,
            });
        }

        let summary = MonthlySummary::from_results(&months);
        let summary_assessment = summary
            .as_ref()
            .map(|s| GlycemicAssessment::from_metrics(s.mean_tir, s.mean_cv, goal_pct));

        Ok(MonthlyReport {
            year,
            goal_pct,
            months,
            summary,
            summary_assessment,
        })
    }

    /// Treatments from the last `hours` hours
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unconfigured or the request fails
    pub async fn recent_treatments(&self, hours: u32, count: usize) -> AppResult<TreatmentReport> {
        let since_ms = (self.now)() - i64::from(hours) * MS_PER_HOUR;
        let since = DateTime::<Utc>::from_timestamp_millis(since_ms)
            .ok_or_else(|| AppError::invalid_input(format!("invalid start time {since_ms}")))?;
        let treatments = self.source.treatments(since, count).await?;
        Ok(TreatmentReport::new(hours, treatments))
    }

    /// Nightscout server status
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unconfigured or the request fails
    pub async fn server_status(&self) -> AppResult<ServerStatus> {
        self.source.status().await
    }

    /// Most recent device status reports
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unconfigured or the request fails
    pub async fn device_status(&self, count: usize) -> AppResult<Vec<DeviceStatus>> {
        self.source.device_status(count).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn treatment(insulin: Option<f64>, carbs: Option<f64>) -> Treatment {
        Treatment {
            created_at: "2024-03-15T08:00:00Z".to_owned(),
            event_type: None,
            insulin,
            carbs,
            notes: None,
        }
    }

    #[test]
    fn test_treatment_totals_skip_missing_values() {
        let report = TreatmentReport::new(
            24,
            vec![
                treatment(Some(2.5), Some(30.0)),
                treatment(None, Some(15.0)),
                treatment(Some(1.0), None),
            ],
        );
        assert!((report.total_insulin - 3.5).abs() < f64::EPSILON);
        assert!((report.total_carbs - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_analysis_ready_accessor() {
        let ready: Analysis<u8> = Analysis::Ready(3);
        assert_eq!(ready.ready(), Some(&3));
        let missing: Analysis<u8> = Analysis::InsufficientData { samples: 2 };
        assert_eq!(missing.ready(), None);
    }
}
