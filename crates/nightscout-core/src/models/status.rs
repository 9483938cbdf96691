// ABOUTME: Server status and device status models from Nightscout
// ABOUTME: Captures settings thresholds plus uploader and pump battery/reservoir state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::treatment::parse_timestamp;

/// Response of `/api/v1/status.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    /// Site name
    #[serde(default)]
    pub name: Option<String>,
    /// Nightscout version
    #[serde(default)]
    pub version: Option<String>,
    /// Server clock as reported by Nightscout
    #[serde(default)]
    pub server_time: Option<String>,
    /// Site settings
    #[serde(default)]
    pub settings: Option<ServerSettings>,
}

/// Subset of Nightscout site settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Display units configured on the site (`mg/dl` or `mmol`)
    #[serde(default)]
    pub units: Option<String>,
    /// Alarm thresholds
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
}

/// Alarm thresholds, always mg/dL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// Urgent high
    #[serde(default)]
    pub bg_high: Option<f64>,
    /// Top of target
    #[serde(default)]
    pub bg_target_top: Option<f64>,
    /// Bottom of target
    #[serde(default)]
    pub bg_target_bottom: Option<f64>,
    /// Urgent low
    #[serde(default)]
    pub bg_low: Option<f64>,
}

/// One entry of `/api/v1/devicestatus.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceStatus {
    /// ISO-8601 creation time
    pub created_at: String,
    /// Reporting device
    #[serde(default)]
    pub device: Option<String>,
    /// Phone/uploader state
    #[serde(default)]
    pub uploader: Option<UploaderStatus>,
    /// Insulin pump state
    #[serde(default)]
    pub pump: Option<PumpStatus>,
}

impl DeviceStatus {
    /// Parsed creation time
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

/// Uploader state; battery is reported as number or string depending on the uploader
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploaderStatus {
    /// Battery percentage
    #[serde(default)]
    pub battery: Option<Value>,
}

/// Pump state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PumpStatus {
    /// Remaining insulin units
    #[serde(default)]
    pub reservoir: Option<f64>,
    /// Pump battery
    #[serde(default)]
    pub battery: Option<PumpBattery>,
}

/// Pump battery detail
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PumpBattery {
    /// Battery percentage
    #[serde(default)]
    pub percent: Option<f64>,
}
