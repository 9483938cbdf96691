// ABOUTME: Treatment record model (insulin doses, carbs, notes) from Nightscout
// ABOUTME: Read-only view of the treatments endpoint; no write support
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One care-portal treatment event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    /// ISO-8601 creation time as stored by Nightscout
    #[serde(rename = "created_at")]
    pub created_at: String,
    /// Care-portal event type (e.g. `Meal Bolus`, `Correction Bolus`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Insulin units delivered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulin: Option<f64>,
    /// Carbohydrates in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Treatment {
    /// Parsed creation time, if it is valid RFC 3339
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

/// Parse a Nightscout ISO-8601 timestamp (`Z` or offset suffix) into UTC
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
