// ABOUTME: Data source traits abstracting the remote CGM backend
// ABOUTME: EntrySource serves time-bounded glucose pages; CgmDataSource adds treatments and status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Source Abstraction
//!
//! The range fetcher depends only on [`EntrySource`], a single
//! "give me up to `count` samples newest-first with `gte <= date < lt`"
//! query. Everything else the tools need sits on [`CgmDataSource`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nightscout_core::errors::AppResult;
use nightscout_core::models::{DeviceStatus, Sample, ServerStatus, TimeWindow, Treatment};

/// One page request against the entries endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryQuery {
    /// Inclusive lower bound, epoch ms
    pub gte: i64,
    /// Exclusive upper bound (the cursor), epoch ms
    pub lt: i64,
    /// Maximum samples to return
    pub count: usize,
}

impl EntryQuery {
    /// Query for the page of `window` that ends just before `cursor`
    #[must_use]
    pub const fn page(window: &TimeWindow, cursor: i64, count: usize) -> Self {
        Self {
            gte: window.start_ms(),
            lt: cursor,
            count,
        }
    }
}

/// A time-indexed glucose entry source
///
/// Implementations must return samples sorted newest-first, restricted to
/// `query.gte <= date < query.lt`, and at most `query.count` of them.
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Fetch one page of samples
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unconfigured or the request fails
    async fn entries(&self, query: &EntryQuery) -> AppResult<Vec<Sample>>;
}

/// Full read-only CGM backend used by the tools
#[async_trait]
pub trait CgmDataSource: EntrySource {
    /// Most recent `count` readings, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unconfigured or the request fails
    async fn latest_entries(&self, count: usize) -> AppResult<Vec<Sample>>;

    /// Treatments created at or after `since`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unconfigured or the request fails
    async fn treatments(&self, since: DateTime<Utc>, count: usize) -> AppResult<Vec<Treatment>>;

    /// Server status and settings
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unconfigured or the request fails
    async fn status(&self) -> AppResult<ServerStatus>;

    /// Most recent `count` device status reports
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unconfigured or the request fails
    async fn device_status(&self, count: usize) -> AppResult<Vec<DeviceStatus>>;
}
