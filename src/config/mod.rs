// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration; the result is immutable after startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the Nightscout MCP Server
//!
//! - **Environment**: server configuration from environment variables

/// Environment and server configuration
pub mod environment;

// Re-export main configuration types from environment
pub use environment::{parse_glucose_threshold, NightscoutConfig, ServerConfig};
