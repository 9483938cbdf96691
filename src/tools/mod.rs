// ABOUTME: Pluggable MCP tools architecture: trait, registry, execution context, and implementations.
// ABOUTME: Each tool parses its arguments, calls the glucose service, and renders the report.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tools
//!
//! - [`traits`] - `McpTool` trait and `ToolCapabilities`
//! - [`registry`] - `ToolRegistry` for lookup, listing, and execution
//! - [`context`] - `ToolExecutionContext` shared by every call
//! - [`implementations`] - The glucose and site tools

/// Tool execution context
pub mod context;
/// Tool-specific error types
pub mod errors;
/// Built-in tool implementations
pub mod implementations;
/// Tool registry
pub mod registry;
/// Tool execution result
pub mod result;
/// Tool trait and capability flags
pub mod traits;

pub use context::ToolExecutionContext;
pub use errors::ToolError;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
