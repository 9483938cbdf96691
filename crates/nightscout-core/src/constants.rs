// ABOUTME: Application constants organized by domain
// ABOUTME: Clinical glucose thresholds, pagination limits, time units, and protocol identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace. All glucose values are mg/dL.

/// Clinical glucose thresholds (mg/dL)
pub mod glucose {
    /// Readings below this are sensor artifacts and never physiological (2.2 mmol/L)
    pub const SENSOR_ERROR_FLOOR_MGDL: i32 = 40;

    /// Upper bound (exclusive) of the severe-low band (3.0 mmol/L)
    pub const SEVERE_LOW_BELOW_MGDL: i32 = 54;

    /// Upper bound (exclusive) of the low band (3.9 mmol/L)
    pub const LOW_BELOW_MGDL: i32 = 70;

    /// Upper bound (inclusive) of the above-target band (10.0 mmol/L)
    pub const ABOVE_TARGET_MAX_MGDL: i32 = 180;

    /// Upper bound (inclusive) of the high band (13.9 mmol/L)
    pub const HIGH_MAX_MGDL: i32 = 250;

    /// Default lower bound of the target range (3.9 mmol/L)
    pub const DEFAULT_TARGET_LOW_MGDL: f64 = 70.0;

    /// Default upper bound of the target range (7.8 mmol/L)
    pub const DEFAULT_TARGET_HIGH_MGDL: f64 = 140.0;

    /// mg/dL per mmol/L
    pub const MGDL_PER_MMOL: f64 = 18.0182;

    /// Configured values below this are assumed to be mmol/L
    pub const MMOL_INPUT_CEILING: f64 = 30.0;

    /// ADAG estimated A1c intercept: `a1c = (mean + 46.7) / 28.7`
    pub const A1C_INTERCEPT: f64 = 46.7;

    /// ADAG estimated A1c slope
    pub const A1C_DIVISOR: f64 = 28.7;
}

/// Analysis thresholds
pub mod analysis {
    /// Minimum raw readings before range statistics are considered meaningful
    pub const MIN_SAMPLES_FOR_ANALYSIS: usize = 10;

    /// TIR percentage below which a result is flagged as poor regardless of goal
    pub const TIR_BASELINE_PCT: f64 = 70.0;

    /// CV at or below this is stable glucose
    pub const CV_STABLE_MAX_PCT: f64 = 33.0;

    /// CV at or below this is acceptable variability
    pub const CV_ACCEPTABLE_MAX_PCT: f64 = 36.0;

    /// Default TIR goal for free-form range analysis
    pub const DEFAULT_RANGE_TIR_GOAL_PCT: f64 = 70.0;

    /// Default TIR goal for monthly analysis
    pub const DEFAULT_MONTHLY_TIR_GOAL_PCT: f64 = 85.0;
}

/// Pagination limits for range fetching
pub mod pagination {
    /// Hard ceiling on pages issued for one window
    pub const MAX_PAGES: usize = 100;

    /// Default page size (Nightscout's practical maximum)
    pub const DEFAULT_PAGE_SIZE: usize = 10_000;

    /// Smallest accepted page size
    pub const MIN_PAGE_SIZE: usize = 1;

    /// Largest accepted page size
    pub const MAX_PAGE_SIZE: usize = 10_000;
}

/// Fixed-duration time units (calendar-naive)
pub mod time {
    /// Milliseconds in one hour
    pub const MS_PER_HOUR: i64 = 3_600_000;

    /// Milliseconds in one day
    pub const MS_PER_DAY: i64 = 86_400_000;

    /// Milliseconds in one week
    pub const MS_PER_WEEK: i64 = 604_800_000;

    /// Milliseconds in a 30-day month
    pub const MS_PER_MONTH: i64 = 2_592_000_000;

    /// Milliseconds in a 365-day year
    pub const MS_PER_YEAR: i64 = 31_536_000_000;
}

/// HTTP client settings
pub mod http {
    /// Per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Connect timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Length of a SHA-256 hex digest, used to recognise hashed API secrets
    pub const HASHED_SECRET_LEN: usize = 64;
}

/// Nightscout REST API paths
pub mod endpoints {
    /// Glucose entries
    pub const ENTRIES: &str = "/api/v1/entries.json";
    /// Treatments (insulin, carbs, notes)
    pub const TREATMENTS: &str = "/api/v1/treatments.json";
    /// Server status and settings
    pub const STATUS: &str = "/api/v1/status.json";
    /// Uploader/pump/CGM device status
    pub const DEVICE_STATUS: &str = "/api/v1/devicestatus.json";
}

/// MCP protocol identifiers
pub mod protocol {
    /// JSON-RPC version string
    pub const JSONRPC_VERSION: &str = "2.0";

    /// MCP protocol revision we implement
    pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

    /// Server name reported during initialize
    pub const SERVER_NAME: &str = "nightscout";

    /// JSON-RPC parse error
    pub const ERROR_PARSE: i32 = -32700;

    /// JSON-RPC invalid request
    pub const ERROR_INVALID_REQUEST: i32 = -32600;

    /// JSON-RPC method not found
    pub const ERROR_METHOD_NOT_FOUND: i32 = -32601;

    /// JSON-RPC invalid params
    pub const ERROR_INVALID_PARAMS: i32 = -32602;

    /// JSON-RPC internal error
    pub const ERROR_INTERNAL_ERROR: i32 = -32603;
}

/// MCP tool names
pub mod tools {
    /// Latest glucose reading
    pub const GLUCOSE_CURRENT: &str = "glucose_current";
    /// Recent history with summary statistics
    pub const GLUCOSE_HISTORY: &str = "glucose_history";
    /// Free-form date range analysis
    pub const ANALYZE: &str = "analyze";
    /// Month-by-month analysis
    pub const ANALYZE_MONTHLY: &str = "analyze_monthly";
    /// Recent treatments
    pub const TREATMENTS: &str = "treatments";
    /// Server status
    pub const STATUS: &str = "status";
    /// Device status
    pub const DEVICES: &str = "devices";
}

/// Environment variable names
pub mod env_config {
    /// Nightscout base URL, optionally with `user:pass@` credentials
    pub const NIGHTSCOUT_URL: &str = "NIGHTSCOUT_URL";
    /// Hashed API secret or readable access token
    pub const NIGHTSCOUT_API_SECRET: &str = "NIGHTSCOUT_API_SECRET";
    /// Display units (`mgdl` or `mmol`)
    pub const GLUCOSE_UNITS: &str = "GLUCOSE_UNITS";
    /// Target range lower bound
    pub const GLUCOSE_LOW: &str = "GLUCOSE_LOW";
    /// Target range upper bound
    pub const GLUCOSE_HIGH: &str = "GLUCOSE_HIGH";
    /// Range fetch page size
    pub const NIGHTSCOUT_PAGE_SIZE: &str = "NIGHTSCOUT_PAGE_SIZE";
    /// HTTP request timeout in seconds
    pub const NIGHTSCOUT_TIMEOUT_SECS: &str = "NIGHTSCOUT_TIMEOUT_SECS";
}

/// Service names for structured logging
pub mod service_names {
    /// This server
    pub const NIGHTSCOUT_MCP_SERVER: &str = "nightscout-mcp-server";
}
