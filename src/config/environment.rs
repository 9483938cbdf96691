// ABOUTME: Environment-based server configuration for the Nightscout MCP server
// ABOUTME: Loads endpoint, credentials, display unit, target range, and fetch limits once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt;

use nightscout_core::constants::env_config;
use nightscout_core::constants::glucose::{DEFAULT_TARGET_HIGH_MGDL, DEFAULT_TARGET_LOW_MGDL};
use nightscout_core::constants::http::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use nightscout_core::constants::pagination::DEFAULT_PAGE_SIZE;
use nightscout_core::errors::{AppError, AppResult};
use nightscout_core::units::{normalize_glucose_input, GlucoseUnit, TargetRange};
use nightscout_providers::{
    clamp_page_size, HttpClientSettings, NightscoutClient, NightscoutEndpoint,
};
use tracing::{info, warn};

/// Connection settings for the Nightscout site
#[derive(Clone, Default)]
pub struct NightscoutConfig {
    /// Base URL, possibly with embedded `user:pass@` credentials
    pub url: Option<String>,
    /// Hashed API secret or readable token
    pub api_secret: Option<String>,
    /// Range fetch page size, already clamped
    pub page_size: usize,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl fmt::Debug for NightscoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NightscoutConfig")
            .field("url", &self.url.as_ref().map(|_| "<set>"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Immutable process-wide configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Nightscout connection
    pub nightscout: NightscoutConfig,
    /// Display unit for every report
    pub units: GlucoseUnit,
    /// In-target band, mg/dL
    pub target: TargetRange,
    /// Server version (from Cargo.toml)
    pub server_version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            nightscout: NightscoutConfig {
                url: None,
                api_secret: None,
                page_size: DEFAULT_PAGE_SIZE,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            units: GlucoseUnit::default(),
            target: TargetRange::default(),
            server_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if `NIGHTSCOUT_URL` is set but unparseable, or
    /// the target range is empty
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let config = Self {
            nightscout: NightscoutConfig {
                url: non_empty(env_config::NIGHTSCOUT_URL),
                api_secret: non_empty(env_config::NIGHTSCOUT_API_SECRET),
                page_size: non_empty(env_config::NIGHTSCOUT_PAGE_SIZE)
                    .and_then(|v| v.parse::<usize>().ok())
                    .map_or(DEFAULT_PAGE_SIZE, clamp_page_size),
                timeout_secs: non_empty(env_config::NIGHTSCOUT_TIMEOUT_SECS)
                    .and_then(|v| v.parse::<u64>().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
            units: non_empty(env_config::GLUCOSE_UNITS)
                .map_or_else(GlucoseUnit::default, |v| GlucoseUnit::from_str_or_default(&v)),
            target: TargetRange::new(
                parse_glucose_threshold(
                    non_empty(env_config::GLUCOSE_LOW).as_deref(),
                    DEFAULT_TARGET_LOW_MGDL,
                ),
                parse_glucose_threshold(
                    non_empty(env_config::GLUCOSE_HIGH).as_deref(),
                    DEFAULT_TARGET_HIGH_MGDL,
                ),
            ),
            server_version: env!("CARGO_PKG_VERSION").to_owned(),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for an unparseable URL or `low >= high`
    pub fn validate(&self) -> AppResult<()> {
        if let Some(url) = &self.nightscout.url {
            NightscoutEndpoint::parse(url, None)?;
        } else {
            warn!("NIGHTSCOUT_URL is not set; every data tool will fail until it is configured");
        }

        if self.target.low >= self.target.high {
            return Err(AppError::config_invalid(format!(
                "GLUCOSE_LOW ({:.1} mg/dL) must be below GLUCOSE_HIGH ({:.1} mg/dL)",
                self.target.low, self.target.high
            )));
        }

        if self.target.above_target_band_is_degenerate() {
            warn!(
                target.high = self.target.high,
                "GLUCOSE_HIGH is at or above 180 mg/dL; the above-target band will be empty"
            );
        }

        Ok(())
    }

    /// Override the display unit
    #[must_use]
    pub const fn with_units(mut self, units: GlucoseUnit) -> Self {
        self.units = units;
        self
    }

    /// Build the Nightscout client described by this configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the URL is unparseable
    pub fn build_client(&self) -> AppResult<NightscoutClient> {
        NightscoutClient::from_settings(
            self.nightscout.url.as_deref(),
            self.nightscout.api_secret.as_deref(),
        )
    }

    /// Timeouts for the shared HTTP client
    #[must_use]
    pub const fn http_client_settings(&self) -> HttpClientSettings {
        HttpClientSettings::from_secs(self.nightscout.timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Nightscout MCP Server Configuration:\n\
             - Nightscout URL: {}\n\
             - API secret: {}\n\
             - Units: {}\n\
             - Target range: {:.0}-{:.0} mg/dL\n\
             - Page size: {}\n\
             - Timeout: {}s\n\
             - Version: {}",
            if self.nightscout.url.is_some() {
                "Configured"
            } else {
                "Not set"
            },
            if self.nightscout.api_secret.is_some() {
                "Configured"
            } else {
                "Not set"
            },
            self.units.label(),
            self.target.low,
            self.target.high,
            self.nightscout.page_size,
            self.nightscout.timeout_secs,
            self.server_version
        )
    }
}

/// Parse a glucose threshold, reading values below 30 as mmol/L
///
/// Missing or unparseable values fall back to `default_mgdl`.
#[must_use]
pub fn parse_glucose_threshold(raw: Option<&str>, default_mgdl: f64) -> f64 {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map_or(default_mgdl, normalize_glucose_input)
}
