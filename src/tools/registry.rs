// ABOUTME: Central registry for MCP tools with lookup, schema listing, and timed execution.
// ABOUTME: Tools are listed in registration order so tools/list output is stable.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Registry
//!
//! Central registry for MCP tools, providing:
//! - Tool registration and lookup
//! - Category grouping for logging and discovery
//! - Schema generation for MCP tools/list responses
//! - Timed execution with structured logging

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::mcp::schema::ToolSchema;

use super::context::ToolExecutionContext;
use super::errors::ToolError;
use super::implementations::glucose::create_glucose_tools;
use super::implementations::site::create_site_tools;
use super::result::ToolResult;
use super::traits::McpTool;

/// Central registry for MCP tools.
///
/// Built once at startup and then used immutably; tools are `Arc`-wrapped so
/// the registry can be shared across async tasks.
///
/// # Example
///
/// ```
/// use nightscout_mcp_server::tools::registry::ToolRegistry;
///
/// let mut registry = ToolRegistry::new();
/// registry.register_builtin_tools();
/// assert_eq!(registry.len(), 7);
/// ```
pub struct ToolRegistry {
    /// Registered tools by name
    tools: HashMap<String, Arc<dyn McpTool>>,
    /// Names in registration order
    order: Vec<String>,
    /// Tool categories for organization
    categories: HashMap<String, Vec<String>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
            categories: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    ///
    /// # Returns
    ///
    /// `true` if the tool was registered, `false` if a tool with the same name exists
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> bool {
        let name = tool.name().to_owned();

        if self.tools.contains_key(&name) {
            warn!("Tool '{}' is already registered, skipping", name);
            return false;
        }

        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        true
    }

    /// Register a tool and categorize it
    pub fn register_with_category(&mut self, tool: Arc<dyn McpTool>, category: &str) {
        let name = tool.name().to_owned();
        if self.register(tool) {
            self.categories
                .entry(category.to_owned())
                .or_default()
                .push(name);
        }
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool names in registration order
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Tools registered under a category
    #[must_use]
    pub fn tools_in_category(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Schemas for every registered tool, in registration order
    #[must_use]
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| ToolSchema {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the tool is not found or its execution fails
    pub async fn execute(
        &self,
        name: &str,
        args: serde_json::Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolResult> {
        let tool = self.get(name).ok_or_else(|| ToolError::not_found(name))?;

        let started = Instant::now();
        let result = tool.execute(args, context).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        AppLogger::log_mcp_tool_call(name, result.is_ok(), duration_ms);
        if let Err(e) = &result {
            warn!(tool = name, error = %e, "Tool execution failed");
        }
        result
    }

    /// Register all built-in tools
    pub fn register_builtin_tools(&mut self) {
        info!("Registering built-in tools...");

        for tool in create_glucose_tools() {
            self.register_with_category(Arc::from(tool), "glucose");
        }
        debug!(
            "Registered glucose tools (registry now has {} tools)",
            self.tools.len()
        );

        for tool in create_site_tools() {
            self.register_with_category(Arc::from(tool), "site");
        }

        info!("Registered {} built-in tools", self.len());
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tool_count", &self.tools.len())
            .field("tools", &self.tool_names())
            .field("categories", &self.categories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::tools;

    #[test]
    fn test_builtin_tools_in_order() {
        let mut registry = ToolRegistry::new();
        registry.register_builtin_tools();
        assert_eq!(
            registry.tool_names(),
            vec![
                tools::GLUCOSE_CURRENT,
                tools::GLUCOSE_HISTORY,
                tools::ANALYZE,
                tools::ANALYZE_MONTHLY,
                tools::TREATMENTS,
                tools::STATUS,
                tools::DEVICES,
            ]
        );
        assert_eq!(registry.tools_in_category("site").len(), 3);
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register_builtin_tools();
        let again: Option<Arc<dyn McpTool>> =
            create_site_tools().into_iter().next().map(Arc::from);
        assert!(again.is_some_and(|tool| !registry.register(tool)));
        assert_eq!(registry.len(), 7);
    }
}
