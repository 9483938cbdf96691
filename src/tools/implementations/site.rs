// ABOUTME: Site tools reporting treatments, Nightscout server status, and uploader or pump state.
// ABOUTME: Implements treatments, status, devices.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Site Tools
//!
//! - `TreatmentsTool` - Recent insulin and carb entries with totals
//! - `StatusTool` - Server name, version, units and alarm thresholds
//! - `DevicesTool` - Latest device status uploads

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::constants::tools;
use crate::errors::AppResult;
use crate::formatters::reports;
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

use super::{format_property, render, ToolArgs, FORMAT_ARG};

const TREATMENTS_DEFAULT_HOURS: i64 = 24;
const TREATMENTS_MAX_HOURS: i64 = 168;
const TREATMENTS_DEFAULT_COUNT: i64 = 50;
const TREATMENTS_MAX_COUNT: i64 = 200;
const DEVICES_DEFAULT_COUNT: i64 = 5;
const DEVICES_MAX_COUNT: i64 = 20;

// ============================================================================
// TreatmentsTool
// ============================================================================

/// Tool listing recent treatments.
pub struct TreatmentsTool;

#[async_trait]
impl McpTool for TreatmentsTool {
    fn name(&self) -> &'static str {
        tools::TREATMENTS
    }

    fn description(&self) -> &'static str {
        "Get recent treatments (insulin doses, carbs, etc.)"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "hours".to_owned(),
            PropertySchema::integer("Number of hours to look back", 1, TREATMENTS_MAX_HOURS)
                .with_default(TREATMENTS_DEFAULT_HOURS),
        );
        properties.insert(
            "count".to_owned(),
            PropertySchema::integer("Maximum number of treatments", 1, TREATMENTS_MAX_COUNT)
                .with_default(TREATMENTS_DEFAULT_COUNT),
        );
        properties.insert(FORMAT_ARG.to_owned(), format_property());
        JsonSchema::object(properties, &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SOURCE | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let params = ToolArgs::new(self.name(), &args);
        let hours = params.integer("hours", TREATMENTS_DEFAULT_HOURS, 1, TREATMENTS_MAX_HOURS)?;
        let count = params.integer("count", TREATMENTS_DEFAULT_COUNT, 1, TREATMENTS_MAX_COUNT)?;
        let format = params.output_format()?;

        let report = ctx
            .service
            .recent_treatments(hours as u32, count as usize)
            .await?;
        render(&report, format, reports::treatments)
    }
}

// ============================================================================
// StatusTool
// ============================================================================

/// Tool reporting Nightscout server status and settings.
pub struct StatusTool;

#[async_trait]
impl McpTool for StatusTool {
    fn name(&self) -> &'static str {
        tools::STATUS
    }

    fn description(&self) -> &'static str {
        "Get Nightscout server status and settings"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(FORMAT_ARG.to_owned(), format_property());
        JsonSchema::object(properties, &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SOURCE | ToolCapabilities::SITE_INFO
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let format = ToolArgs::new(self.name(), &args).output_format()?;
        let status = ctx.service.server_status().await?;
        render(&status, format, reports::server_status)
    }
}

// ============================================================================
// DevicesTool
// ============================================================================

/// Tool reporting uploader, pump, and CGM device state.
pub struct DevicesTool;

#[async_trait]
impl McpTool for DevicesTool {
    fn name(&self) -> &'static str {
        tools::DEVICES
    }

    fn description(&self) -> &'static str {
        "Get status of connected devices (pump, CGM, phone)"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "count".to_owned(),
            PropertySchema::integer("Number of status entries", 1, DEVICES_MAX_COUNT)
                .with_default(DEVICES_DEFAULT_COUNT),
        );
        properties.insert(FORMAT_ARG.to_owned(), format_property());
        JsonSchema::object(properties, &[])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SOURCE | ToolCapabilities::SITE_INFO
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let params = ToolArgs::new(self.name(), &args);
        let count = params.integer("count", DEVICES_DEFAULT_COUNT, 1, DEVICES_MAX_COUNT)?;
        let format = params.output_format()?;

        let statuses = ctx.service.device_status(count as usize).await?;
        render(&statuses, format, |s| reports::devices(s))
    }
}

/// Create all site tools for registration
#[must_use]
pub fn create_site_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(TreatmentsTool),
        Box::new(StatusTool),
        Box::new(DevicesTool),
    ]
}
