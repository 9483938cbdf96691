// ABOUTME: Scripted in-memory CGM data source for integration tests
// ABOUTME: Serves entries per the Nightscout query contract and records every page request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nightscout_mcp_server::errors::provider::ProviderError;
use nightscout_mcp_server::errors::{AppError, AppResult};
use nightscout_mcp_server::models::{DeviceStatus, Sample, ServerStatus, Treatment};
use nightscout_providers::{CgmDataSource, EntryQuery, EntrySource};

/// Decides which entry queries fail
pub type FailWhen = fn(&EntryQuery) -> bool;

/// Fake Nightscout site holding a fixed set of readings
#[derive(Default)]
pub struct FakeSource {
    samples: Vec<Sample>,
    treatments: Vec<Treatment>,
    status: ServerStatus,
    devices: Vec<DeviceStatus>,
    fail_when: Option<FailWhen>,
    always_full: bool,
    queries: Mutex<Vec<EntryQuery>>,
}

impl FakeSource {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples,
            ..Self::default()
        }
    }

    /// A source that answers every query with a full page just below the cursor
    pub fn always_full() -> Self {
        Self {
            always_full: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing_when(mut self, predicate: FailWhen) -> Self {
        self.fail_when = Some(predicate);
        self
    }

    #[must_use]
    pub fn with_treatments(mut self, treatments: Vec<Treatment>) -> Self {
        self.treatments = treatments;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ServerStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_devices(mut self, devices: Vec<DeviceStatus>) -> Self {
        self.devices = devices;
        self
    }

    /// Every entry query answered so far
    pub fn queries(&self) -> Vec<EntryQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    fn newest_first(&self) -> Vec<Sample> {
        let mut sorted = self.samples.clone();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted
    }
}

#[async_trait]
impl EntrySource for FakeSource {
    async fn entries(&self, query: &EntryQuery) -> AppResult<Vec<Sample>> {
        self.queries.lock().unwrap().push(*query);

        if self.fail_when.is_some_and(|fails| fails(query)) {
            return Err(AppError::from(ProviderError::HttpStatus {
                endpoint: "/api/v1/entries.json".to_owned(),
                status_code: 503,
                body: "Service Unavailable".to_owned(),
            }));
        }

        if self.always_full {
            let count = i64::try_from(query.count).unwrap();
            return Ok((1..=count)
                .map(|offset| Sample::new(query.lt - offset, 120))
                .collect());
        }

        Ok(self
            .newest_first()
            .into_iter()
            .filter(|s| s.timestamp >= query.gte && s.timestamp < query.lt)
            .take(query.count)
            .collect())
    }
}

#[async_trait]
impl CgmDataSource for FakeSource {
    async fn latest_entries(&self, count: usize) -> AppResult<Vec<Sample>> {
        Ok(self.newest_first().into_iter().take(count).collect())
    }

    async fn treatments(&self, since: DateTime<Utc>, count: usize) -> AppResult<Vec<Treatment>> {
        Ok(self
            .treatments
            .iter()
            .filter(|t| t.created_at_utc().is_some_and(|at| at >= since))
            .take(count)
            .cloned()
            .collect())
    }

    async fn status(&self) -> AppResult<ServerStatus> {
        Ok(self.status.clone())
    }

    async fn device_status(&self, count: usize) -> AppResult<Vec<DeviceStatus>> {
        Ok(self.devices.iter().take(count).cloned().collect())
    }
}
