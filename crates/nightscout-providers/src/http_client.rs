// ABOUTME: Process-wide pooled reqwest client used for every Nightscout API call
// ABOUTME: Timeouts come from server configuration and are fixed by the first initialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nightscout_core::constants::http::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, warn};

/// Timeouts applied to every Nightscout request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientSettings {
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,
}

impl HttpClientSettings {
    /// Settings from whole seconds; zero falls back to the default
    #[must_use]
    pub const fn from_secs(timeout_secs: u64, connect_timeout_secs: u64) -> Self {
        let timeout = if timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            timeout_secs
        };
        let connect = if connect_timeout_secs == 0 {
            DEFAULT_CONNECT_TIMEOUT_SECS
        } else {
            connect_timeout_secs
        };
        Self {
            timeout: Duration::from_secs(timeout),
            connect_timeout: Duration::from_secs(connect),
        }
    }
}

impl Default for HttpClientSettings {
    fn default() -> Self {
        Self::from_secs(DEFAULT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS)
    }
}

static CLIENT_SETTINGS: OnceLock<HttpClientSettings> = OnceLock::new();

static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Fix the shared client's timeouts; call once at startup before any request
///
/// Returns `false` when settings were already fixed, either by an earlier call
/// or because a request built the client with defaults first.
#[must_use]
pub fn initialize_shared_client(settings: HttpClientSettings) -> bool {
    if SHARED_CLIENT.get().is_some() {
        warn!(?settings, "Shared HTTP client already built; timeouts unchanged");
        return false;
    }
    match CLIENT_SETTINGS.set(settings) {
        Ok(()) => {
            debug!(?settings, "Shared HTTP client settings fixed");
            true
        }
        Err(rejected) => {
            warn!(
                rejected = ?rejected,
                active = ?CLIENT_SETTINGS.get(),
                "Shared HTTP client settings already fixed"
            );
            false
        }
    }
}

/// Settings the shared client uses or will use
#[must_use]
pub fn active_settings() -> HttpClientSettings {
    CLIENT_SETTINGS.get().copied().unwrap_or_default()
}

/// The shared client, built on first use
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let settings = active_settings();
        ClientBuilder::new()
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .user_agent(concat!("nightscout-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "HTTP client build failed; using reqwest defaults");
                Client::new()
            })
    })
}
