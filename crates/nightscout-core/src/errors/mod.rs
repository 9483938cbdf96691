// ABOUTME: Unified error handling with error codes and the AppError type
// ABOUTME: Maps configuration, upstream, pagination, and date parsing failures to stable codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every failure in the server is an [`AppError`] carrying an [`ErrorCode`].
//! The codes keep the distinct failure classes apart so callers can tell a
//! misconfigured endpoint from a failing upstream, or a runaway pagination
//! from a malformed date expression.
//!
//! "Not enough data" is deliberately absent: it is a normal analysis outcome,
//! not an error.

/// Provider (HTTP data source) error types
pub mod provider;

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Tool or operation input is invalid
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A date range expression could not be parsed
    #[serde(rename = "INVALID_DATE_EXPRESSION")]
    InvalidDateExpression = 3004,

    // External Services (5000-5999)
    /// Nightscout returned a failure or could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Nightscout rejected our credentials
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,
    /// Pagination circuit breaker tripped
    #[serde(rename = "PAGINATION_OVERRUN")]
    PaginationOverrun = 5010,

    // Configuration (6000-6999)
    /// Required configuration is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// Configuration value is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the JSON-RPC error code used when this error surfaces at protocol level
    #[must_use]
    pub const fn jsonrpc_code(self) -> i32 {
        match self {
            Self::InvalidInput | Self::InvalidDateExpression => -32602,
            Self::ExternalServiceError
            | Self::ExternalAuthFailed
            | Self::PaginationOverrun
            | Self::ConfigMissing
            | Self::ConfigInvalid
            | Self::InternalError
            | Self::SerializationError => -32603,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidDateExpression => "The date expression could not be parsed",
            Self::ExternalServiceError => "The Nightscout server returned an error",
            Self::ExternalAuthFailed => "Authentication with the Nightscout server failed",
            Self::PaginationOverrun => "Too many pages requested from the Nightscout server",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Date expression did not match any supported grammar
    #[must_use]
    pub fn invalid_date(expression: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidDateExpression,
            format!("'{expression}': {reason}"),
        )
    }

    /// Required configuration is missing
    #[must_use]
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Configuration value is invalid
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Pagination exceeded the page ceiling before reaching the window start
    #[must_use]
    pub fn pagination_overrun(pages: usize, samples: usize) -> Self {
        Self::new(
            ErrorCode::PaginationOverrun,
            format!("gave up after {pages} pages ({samples} readings) without reaching the start of the range"),
        )
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
