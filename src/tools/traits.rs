// ABOUTME: Defines the McpTool trait and ToolCapabilities for the pluggable tools architecture.
// ABOUTME: Tools implement this trait to be registered and executed via the ToolRegistry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MCP Tool Trait and Capabilities
//!
//! Every tool provides its metadata (name, description, input schema),
//! capability flags for discovery and logging, and an async `execute`.

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::JsonSchema;

use super::context::ToolExecutionContext;
use super::result::ToolResult;

bitflags! {
    /// Capabilities that tools declare for filtering and discovery.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool needs a configured Nightscout endpoint
        const REQUIRES_SOURCE = 0b0000_0001;
        /// Tool reads data from the source
        const READS_DATA = 0b0000_0010;
        /// Tool walks a time range through the paginating fetcher
        const PAGINATED = 0b0000_0100;
        /// Tool computes statistics over the fetched readings
        const ANALYTICS = 0b0000_1000;
        /// Tool reports site or device state rather than glucose
        const SITE_INFO = 0b0001_0000;
    }
}

impl ToolCapabilities {
    /// Check if tool needs a configured source
    #[must_use]
    pub const fn requires_source(self) -> bool {
        self.contains(Self::REQUIRES_SOURCE)
    }

    /// Check if tool reads data
    #[must_use]
    pub const fn reads_data(self) -> bool {
        self.contains(Self::READS_DATA)
    }

    /// Check if tool paginates through a range
    #[must_use]
    pub const fn is_paginated(self) -> bool {
        self.contains(Self::PAGINATED)
    }

    /// Check if tool performs analytics
    #[must_use]
    pub const fn is_analytics(self) -> bool {
        self.contains(Self::ANALYTICS)
    }

    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = [
            (Self::REQUIRES_SOURCE, "requires_source"),
            (Self::READS_DATA, "reads_data"),
            (Self::PAGINATED, "paginated"),
            (Self::ANALYTICS, "analytics"),
            (Self::SITE_INFO, "site_info"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect();

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// The main trait that all MCP tools must implement.
///
/// Tools are `Send + Sync` so one registry can be shared by every request.
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier used in `tools/call`
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters, returned by `tools/list`
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags for filtering and logging
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Returns `AppError` for invalid arguments or failed fetches
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_lists_flags_in_order() {
        let caps = ToolCapabilities::REQUIRES_SOURCE
            | ToolCapabilities::PAGINATED
            | ToolCapabilities::ANALYTICS;
        assert_eq!(caps.describe(), "requires_source, paginated, analytics");
        assert_eq!(ToolCapabilities::empty().describe(), "none");
        assert!(caps.is_paginated());
        assert!(!caps.reads_data());
    }
}
