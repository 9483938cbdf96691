// ABOUTME: MCP protocol layer: schema types, request routing, and the stdio transport
// ABOUTME: JSON-RPC 2.0 framing lives in crate::jsonrpc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Request validation and method routing
pub mod request_processor;
/// MCP protocol schema definitions
pub mod schema;
/// Newline-delimited stdio transport
pub mod transport;

pub use request_processor::McpRequestProcessor;
pub use transport::StdioTransport;
