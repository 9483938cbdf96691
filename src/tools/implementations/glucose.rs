// ABOUTME: Glucose tools for current readings, recent history, and range or monthly analysis.
// ABOUTME: Implements glucose_current, glucose_history, analyze, analyze_monthly.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Glucose Tools
//!
//! - `GlucoseCurrentTool` - Latest reading with trend arrow and delta
//! - `GlucoseHistoryTool` - Last N hours with statistics
//! - `AnalyzeTool` - Any date range against a TIR goal
//! - `AnalyzeMonthlyTool` - Month-by-month table for one year
//!
//! Tools only parse arguments and render; every computation happens in
//! `GlucoseService`.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::constants::analysis::{DEFAULT_MONTHLY_TIR_GOAL_PCT, DEFAULT_RANGE_TIR_GOAL_PCT};
use crate::constants::tools;
use crate::errors::AppResult;
use crate::formatters::reports;
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

use super::{format_property, render, ToolArgs, FORMAT_ARG};

const HISTORY_DEFAULT_HOURS: i64 = 6;
const HISTORY_MAX_HOURS: i64 = 720;
const HISTORY_DEFAULT_COUNT: i64 = 100;
const HISTORY_MAX_COUNT: i64 = 1000;
const ANALYZE_DEFAULT_FROM: &str = "7d";
const TIR_GOAL_MIN_PCT: f64 = 50.0;
const TIR_GOAL_MAX_PCT: f64 = 100.0;
const MONTHLY_MIN_YEAR: i64 = 2015;
const MONTHLY_MAX_YEAR: i64 = 2030;

fn tir_goal_property(default: f64) -> PropertySchema {
    PropertySchema::number(
        "Time-in-range goal in percent",
        TIR_GOAL_MIN_PCT,
        TIR_GOAL_MAX_PCT,
    )
    .with_default(default)
}

// ============================================================================
// GlucoseCurrentTool
// ============================================================================

/// Tool returning the most recent glucose reading.
pub struct GlucoseCurrentTool;

#[async_trait]
impl McpTool for GlucoseCurrentTool {
    fn name(&self) -> &'static str {
        tools::GLUCOSE_CURRENT
    }

    fn description(&self) -> &'static str {
        "Get the current blood glucose reading from Nightscout"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(FORMAT_ARG.to_owned(), format_property());
        JsonSchema::object(properties, &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SOURCE | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let format = ToolArgs::new(self.name(), &args).output_format()?;
        let sample = ctx.service.fetch_current_sample().await?;
        render(&sample, format, |s| {
            reports::current_reading(s.as_ref(), &ctx.display)
        })
    }
}

// ============================================================================
// GlucoseHistoryTool
// ============================================================================

/// Tool returning recent readings with summary statistics.
pub struct GlucoseHistoryTool;

#[async_trait]
impl McpTool for GlucoseHistoryTool {
    fn name(&self) -> &'static str {
        tools::GLUCOSE_HISTORY
    }

    fn description(&self) -> &'static str {
        "Get blood glucose history for a specified time period"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "hours".to_owned(),
            PropertySchema::integer("Number of hours of history", 1, HISTORY_MAX_HOURS)
                .with_default(HISTORY_DEFAULT_HOURS),
        );
        properties.insert(
            "count".to_owned(),
            PropertySchema::integer("Maximum number of readings", 1, HISTORY_MAX_COUNT)
                .with_default(HISTORY_DEFAULT_COUNT),
        );
        properties.insert(FORMAT_ARG.to_owned(), format_property());
        JsonSchema::object(properties, &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SOURCE
            | ToolCapabilities::READS_DATA
            | ToolCapabilities::PAGINATED
            | ToolCapabilities::ANALYTICS
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let params = ToolArgs::new(self.name(), &args);
        let hours = params.integer("hours", HISTORY_DEFAULT_HOURS, 1, HISTORY_MAX_HOURS)?;
        let count = params.integer("count", HISTORY_DEFAULT_COUNT, 1, HISTORY_MAX_COUNT)?;
        let format = params.output_format()?;

        let report = ctx
            .service
            .fetch_history(hours as u32, count as usize)
            .await?;
        render(&report, format, |r| reports::history(r, &ctx.display))
    }
}

// ============================================================================
// AnalyzeTool
// ============================================================================

/// Tool analyzing an arbitrary date range.
pub struct AnalyzeTool;

#[async_trait]
impl McpTool for AnalyzeTool {
    fn name(&self) -> &'static str {
        tools::ANALYZE
    }

    fn description(&self) -> &'static str {
        "Analyze glucose patterns for any date range. Supports dates (YYYY-MM-DD), \
         months (YYYY-MM), or relative periods (7d, 2w, 3m, 1y)"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "from".to_owned(),
            PropertySchema::string(
                "Start: YYYY-MM-DD, YYYY-MM, or relative (7d, 2w, 3m, 1y)",
            )
            .with_default(ANALYZE_DEFAULT_FROM),
        );
        properties.insert(
            "to".to_owned(),
            PropertySchema::string("End: YYYY-MM-DD or YYYY-MM (default: now)"),
        );
        properties.insert(
            "tirGoal".to_owned(),
            tir_goal_property(DEFAULT_RANGE_TIR_GOAL_PCT),
        );
        properties.insert(FORMAT_ARG.to_owned(), format_property());
        JsonSchema::object(properties, &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SOURCE
            | ToolCapabilities::READS_DATA
            | ToolCapabilities::PAGINATED
            | ToolCapabilities::ANALYTICS
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let params = ToolArgs::new(self.name(), &args);
        let from = params
            .optional_string("from")?
            .unwrap_or(ANALYZE_DEFAULT_FROM);
        let to = params.optional_string("to")?;
        let goal = params.number(
            "tirGoal",
            DEFAULT_RANGE_TIR_GOAL_PCT,
            TIR_GOAL_MIN_PCT,
            TIR_GOAL_MAX_PCT,
        )?;
        let format = params.output_format()?;

        debug!(from, to, goal, "Analyzing glucose range");
        let analysis = ctx.service.analyze_range(from, to, goal).await?;
        render(&analysis, format, |a| reports::range_analysis(a, &ctx.display))
    }
}

// ============================================================================
// AnalyzeMonthlyTool
// ============================================================================

/// Tool producing a month-by-month breakdown of one year.
pub struct AnalyzeMonthlyTool;

#[async_trait]
impl McpTool for AnalyzeMonthlyTool {
    fn name(&self) -> &'static str {
        tools::ANALYZE_MONTHLY
    }

    fn description(&self) -> &'static str {
        "Analyze glucose data broken down by month. Great for yearly reviews."
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "year".to_owned(),
            PropertySchema::integer("Year to analyze", MONTHLY_MIN_YEAR, MONTHLY_MAX_YEAR),
        );
        properties.insert(
            "fromMonth".to_owned(),
            PropertySchema::integer("First month (1-12)", 1, 12).with_default(1),
        );
        properties.insert(
            "toMonth".to_owned(),
            PropertySchema::integer("Last month (1-12)", 1, 12).with_default(12),
        );
        properties.insert(
            "tirGoal".to_owned(),
            tir_goal_property(DEFAULT_MONTHLY_TIR_GOAL_PCT),
        );
        properties.insert(FORMAT_ARG.to_owned(), format_property());
        JsonSchema::object(properties, &["year"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SOURCE
            | ToolCapabilities::READS_DATA
            | ToolCapabilities::PAGINATED
            | ToolCapabilities::ANALYTICS
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let params = ToolArgs::new(self.name(), &args);
        let year = params.required_integer("year", MONTHLY_MIN_YEAR, MONTHLY_MAX_YEAR)?;
        let from_month = params.integer("fromMonth", 1, 1, 12)?;
        let to_month = params.integer("toMonth", 12, 1, 12)?;
        let goal = params.number(
            "tirGoal",
            DEFAULT_MONTHLY_TIR_GOAL_PCT,
            TIR_GOAL_MIN_PCT,
            TIR_GOAL_MAX_PCT,
        )?;
        let format = params.output_format()?;

        let report = ctx
            .service
            .analyze_monthly(year as i32, from_month as u32, to_month as u32, goal)
            .await?;
        render(&report, format, |r| reports::monthly(r, &ctx.display))
    }
}

/// Create all glucose tools for registration
#[must_use]
pub fn create_glucose_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(GlucoseCurrentTool),
        Box::new(GlucoseHistoryTool),
        Box::new(AnalyzeTool),
        Box::new(AnalyzeMonthlyTool),
    ]
}
