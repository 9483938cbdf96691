// ABOUTME: Output format abstraction and unit-aware glucose display helpers
// ABOUTME: Text reports for humans; JSON and TOON for clients that want the structured report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Output Format Abstraction Layer
//!
//! Every tool renders its report in one of three formats:
//!
//! - **Text**: Default; the emoji-annotated report shown to the user
//! - **JSON**: The report value serialized with `serde_json`
//! - **TOON**: Token-efficient encoding of the same value (feature `toon`)
//!
//! All glucose arithmetic stays in mg/dL. [`DisplaySettings`] projects
//! values into the configured unit at the very last step.

/// Text report renderers
pub mod reports;

use serde::Serialize;
use std::error::Error;
use std::fmt;

use crate::config::ServerConfig;
use crate::constants::glucose::{
    ABOVE_TARGET_MAX_MGDL, HIGH_MAX_MGDL, LOW_BELOW_MGDL, SEVERE_LOW_BELOW_MGDL,
};
use crate::errors::AppError;
use crate::units::{GlucoseUnit, TargetRange};
#[cfg(feature = "toon")]
use toon_format::EncodeOptions;

/// Output serialization format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    #[default]
    Text,
    /// JSON format
    Json,
    /// TOON format - Token-Oriented Object Notation for LLM efficiency
    Toon,
}

impl OutputFormat {
    /// Parse format from string parameter (case-insensitive)
    /// Returns `Text` for unrecognized values
    #[must_use]
    pub fn from_str_param(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "toon" => Self::Toon,
            _ => Self::Text,
        }
    }

    /// Get the format name as a string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Toon => "toon",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for formatting operations
#[derive(Debug, Clone)]
pub struct FormatError {
    /// Error message describing what went wrong
    pub message: String,
    /// The format that was being used when the error occurred
    pub format: OutputFormat,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Format error ({}): {}", self.format, self.message)
    }
}

impl Error for FormatError {}

impl From<FormatError> for AppError {
    fn from(error: FormatError) -> Self {
        Self::serialization(error.to_string())
    }
}

/// Serialize a report as structured data
///
/// `Text` has no generic serialization and falls back to pretty JSON; text
/// rendering goes through [`reports`].
///
/// # Errors
///
/// Returns `FormatError` if serialization fails or TOON support is not compiled in
pub fn format_structured<T: Serialize>(data: &T, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Text | OutputFormat::Json => {
            serde_json::to_string_pretty(data).map_err(|e| FormatError {
                message: e.to_string(),
                format,
            })
        }
        OutputFormat::Toon => encode_toon(data),
    }
}

#[cfg(feature = "toon")]
fn encode_toon<T: Serialize>(data: &T) -> Result<String, FormatError> {
    let value = serde_json::to_value(data).map_err(|e| FormatError {
        message: format!("Failed to convert to JSON value: {e}"),
        format: OutputFormat::Toon,
    })?;
    let options = EncodeOptions::default();
    toon_format::encode(&value, &options).map_err(|e| FormatError {
        message: e.to_string(),
        format: OutputFormat::Toon,
    })
}

#[cfg(not(feature = "toon"))]
fn encode_toon<T: Serialize>(_data: &T) -> Result<String, FormatError> {
    Err(FormatError {
        message: "built without TOON support".to_owned(),
        format: OutputFormat::Toon,
    })
}

/// Unit and target range every report is rendered with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySettings {
    /// Display unit
    pub units: GlucoseUnit,
    /// Configured in-target band, mg/dL
    pub target: TargetRange,
}

impl DisplaySettings {
    /// Create display settings
    #[must_use]
    pub const fn new(units: GlucoseUnit, target: TargetRange) -> Self {
        Self { units, target }
    }

    /// Display settings from the server configuration
    #[must_use]
    pub const fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.units, config.target)
    }

    /// Value with unit label, e.g. `124 mg/dL` or `6.9 mmol/L`
    #[must_use]
    pub fn glucose(&self, mgdl: f64) -> String {
        format!("{} {}", self.glucose_short(mgdl), self.units.label())
    }

    /// Value without unit label
    #[must_use]
    pub fn glucose_short(&self, mgdl: f64) -> String {
        match self.units {
            GlucoseUnit::MgDl => format!("{:.0}", mgdl.round()),
            GlucoseUnit::Mmol => format!("{:.1}", self.units.convert(mgdl)),
        }
    }

    /// Target range label, e.g. `70-140 mg/dL` or `3.9-7.8 mmol/L`
    #[must_use]
    pub fn target_label(&self) -> String {
        match self.units {
            GlucoseUnit::MgDl => format!(
                "{:.0}-{:.0} mg/dL",
                self.target.low.trunc(),
                self.target.high.trunc()
            ),
            GlucoseUnit::Mmol => format!(
                "{:.1}-{:.1} mmol/L",
                self.units.convert(self.target.low),
                self.units.convert(self.target.high)
            ),
        }
    }

    /// Label of the severe-low band
    #[must_use]
    pub fn severe_low_label(&self) -> String {
        format!(
            "<{} {}",
            self.glucose_short(f64::from(SEVERE_LOW_BELOW_MGDL)),
            self.units.label()
        )
    }

    /// Label of the low band
    #[must_use]
    pub fn low_label(&self) -> String {
        self.band_label(SEVERE_LOW_BELOW_MGDL, LOW_BELOW_MGDL)
    }

    /// Label of the high band
    #[must_use]
    pub fn high_label(&self) -> String {
        self.band_label(ABOVE_TARGET_MAX_MGDL, HIGH_MAX_MGDL)
    }

    /// Label of the very-high band
    #[must_use]
    pub fn very_high_label(&self) -> String {
        format!(
            ">{} {}",
            self.glucose_short(f64::from(HIGH_MAX_MGDL)),
            self.units.label()
        )
    }

    fn band_label(&self, low: i32, high: i32) -> String {
        format!(
            "{}-{} {}",
            self.glucose_short(f64::from(low)),
            self.glucose_short(f64::from(high)),
            self.units.label()
        )
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::new(GlucoseUnit::default(), TargetRange::default())
    }
}

/// Group digits in thousands, e.g. `12,345`
#[must_use]
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(8_640), "8,640");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_output_format_param() {
        assert_eq!(OutputFormat::from_str_param("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_param("toon"), OutputFormat::Toon);
        assert_eq!(OutputFormat::from_str_param("markdown"), OutputFormat::Text);
    }

    #[test]
    fn test_band_labels_follow_units() {
        let mmol = DisplaySettings::default();
        assert_eq!(mmol.severe_low_label(), "<3.0 mmol/L");
        assert_eq!(mmol.low_label(), "3.0-3.9 mmol/L");
        assert_eq!(mmol.high_label(), "10.0-13.9 mmol/L");
        assert_eq!(mmol.very_high_label(), ">13.9 mmol/L");
        assert_eq!(mmol.target_label(), "3.9-7.8 mmol/L");

        let mgdl = DisplaySettings::new(GlucoseUnit::MgDl, TargetRange::default());
        assert_eq!(mgdl.severe_low_label(), "<54 mg/dL");
        assert_eq!(mgdl.target_label(), "70-140 mg/dL");
        assert_eq!(mgdl.glucose(123.6), "124 mg/dL");
    }
}
