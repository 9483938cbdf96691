// ABOUTME: Core types and constants for the Nightscout MCP server
// ABOUTME: Foundation crate with error handling, glucose units, data models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nightscout Core
//!
//! Foundation crate providing shared types and constants for the Nightscout
//! MCP server. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ProviderError`
//! - **constants**: Glucose thresholds, pagination limits, and protocol values
//! - **models**: Samples, time windows, treatments, and device/server status records
//! - **units**: Display units and the configured target range

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Nightscout data models (samples, time windows, treatments, status)
pub mod models;

/// Glucose display units and target range configuration
pub mod units;
