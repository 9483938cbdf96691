// ABOUTME: Defines ToolExecutionContext which gives tools the glucose service and display settings.
// ABOUTME: One context is built at startup and shared by every tool call.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Execution Context
//!
//! Tools never construct clients or read configuration themselves; everything
//! they need arrives through this context.

use std::fmt;
use std::sync::Arc;

use crate::formatters::DisplaySettings;
use crate::services::GlucoseService;

/// Context provided to every tool execution.
#[derive(Clone)]
pub struct ToolExecutionContext {
    /// Shared glucose operations
    pub service: Arc<GlucoseService>,
    /// Unit and target range for rendered reports
    pub display: DisplaySettings,
}

impl ToolExecutionContext {
    /// Create a new execution context
    #[must_use]
    pub const fn new(service: Arc<GlucoseService>, display: DisplaySettings) -> Self {
        Self { service, display }
    }
}

impl fmt::Debug for ToolExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolExecutionContext")
            .field("service", &"<GlucoseService>")
            .field("display", &self.display)
            .finish()
    }
}
