// ABOUTME: Domain service layer exposing the glucose operations behind every MCP tool
// ABOUTME: Protocol-agnostic; tools translate arguments and formatters render the reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Each analytical request runs the same pipeline: resolve dates, paginate
//! the fetch, compute statistics, and hand a report value to the formatter.

/// Glucose, treatment, and status operations
pub mod glucose;

pub use glucose::{
    Analysis, GlucoseService, HistoryReport, MonthlyReport, RangeReport, TreatmentReport,
};
