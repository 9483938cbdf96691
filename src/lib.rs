// ABOUTME: Main library entry point for the Nightscout MCP server
// ABOUTME: Exposes CGM glucose data, analysis, treatments and device status as MCP tools over stdio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nightscout MCP Server
//!
//! A Model Context Protocol (MCP) server that reads continuous glucose
//! monitor data from a Nightscout site and turns it into reports an
//! assistant can read.
//!
//! ## Architecture
//!
//! - **Config**: Immutable `ServerConfig` loaded once from the environment
//! - **Services**: `GlucoseService`, the resolve, fetch, compute pipeline
//! - **Formatters**: Unit-aware text reports plus JSON and TOON output
//! - **Tools**: `McpTool` implementations behind a `ToolRegistry`
//! - **MCP**: JSON-RPC 2.0 request routing and the stdio transport
//!
//! Pagination lives in `nightscout-providers`; statistics and date ranges in
//! `nightscout-intelligence`; shared types in `nightscout-core`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nightscout_mcp_server::config::ServerConfig;
//! use nightscout_mcp_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Report rendering and output formats
pub mod formatters;

/// JSON-RPC 2.0 types
pub mod jsonrpc;

/// Structured logging setup
pub mod logging;

/// MCP protocol handling and transport
pub mod mcp;

/// Glucose operations behind the tools
pub mod services;

/// MCP tools and registry
pub mod tools;

pub use nightscout_core::{constants, errors, models, units};
