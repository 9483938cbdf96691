// ABOUTME: Structured error types for Nightscout data source operations
// ABOUTME: Separates missing configuration, transport failures, HTTP status, and decode errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised by the HTTP layer talking to a Nightscout server
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No Nightscout endpoint has been configured
    #[error("NIGHTSCOUT_URL environment variable is not set")]
    NotConfigured,

    /// Request could not be sent or the connection failed (timeouts included)
    #[error("request to {endpoint} failed: {reason}")]
    Transport {
        /// API path that was requested
        endpoint: String,
        /// Underlying transport error text
        reason: String,
    },

    /// Server answered with a non-success status
    #[error("{endpoint} returned HTTP {status_code}: {body}")]
    HttpStatus {
        /// API path that was requested
        endpoint: String,
        /// HTTP status code
        status_code: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// Response body was not the JSON we expected
    #[error("failed to decode response from {endpoint}: {reason}")]
    Decode {
        /// API path that was requested
        endpoint: String,
        /// Decoder error text
        reason: String,
    },
}

impl ProviderError {
    /// Whether this error came from rejected credentials
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus {
                status_code: 401 | 403,
                ..
            }
        )
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = match &error {
            ProviderError::NotConfigured => ErrorCode::ConfigMissing,
            e if e.is_auth_failure() => ErrorCode::ExternalAuthFailed,
            ProviderError::Transport { .. }
            | ProviderError::HttpStatus { .. }
            | ProviderError::Decode { .. } => ErrorCode::ExternalServiceError,
        };
        let message = error.to_string();
        Self::new(code, message).with_source(error)
    }
}

/// Result alias for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_conversion_keeps_code_and_source() {
        let error = AppError::from(ProviderError::HttpStatus {
            endpoint: "/api/v1/entries.json".to_owned(),
            status_code: 503,
            body: "Service Unavailable".to_owned(),
        });

        assert_eq!(error.code, ErrorCode::ExternalServiceError);
        assert!(error.message.contains("HTTP 503"));
        let source = error.source().unwrap();
        assert!(source.downcast_ref::<ProviderError>().is_some());
    }

    #[test]
    fn test_auth_and_configuration_codes() {
        let rejected = ProviderError::HttpStatus {
            endpoint: "/api/v1/status.json".to_owned(),
            status_code: 401,
            body: String::new(),
        };
        assert_eq!(AppError::from(rejected).code, ErrorCode::ExternalAuthFailed);
        assert_eq!(
            AppError::from(ProviderError::NotConfigured).code,
            ErrorCode::ConfigMissing
        );
    }
}
