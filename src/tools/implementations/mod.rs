// ABOUTME: Module containing all MCP tool implementations organized by category.
// ABOUTME: Shared argument parsing and output rendering used by every tool.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Implementations
//!
//! - `glucose` - Current reading, history, range analysis, monthly analysis
//! - `site` - Treatments, server status, device status

// Glucose tools: glucose_current, glucose_history, analyze, analyze_monthly
pub mod glucose;

// Site tools: treatments, status, devices
pub mod site;

use serde::Serialize;
use serde_json::Value;

use crate::errors::AppResult;
use crate::formatters::{format_structured, OutputFormat};
use crate::mcp::schema::PropertySchema;

use super::errors::ToolError;
use super::result::ToolResult;

/// Name of the output format argument every tool accepts
pub const FORMAT_ARG: &str = "format";

/// Schema of the shared `format` argument
#[must_use]
pub fn format_property() -> PropertySchema {
    PropertySchema::string("Output format: text (default), json, or toon")
        .with_default("text")
        .with_allowed(&["text", "json", "toon"])
}

/// Typed, bounds-checked access to a tool's JSON arguments
///
/// `null` and absent arguments are treated alike.
#[derive(Debug, Clone, Copy)]
pub struct ToolArgs<'a> {
    tool: &'static str,
    args: &'a Value,
}

impl<'a> ToolArgs<'a> {
    /// Wrap the arguments of `tool`
    #[must_use]
    pub const fn new(tool: &'static str, args: &'a Value) -> Self {
        Self { tool, args }
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.args.get(name).filter(|v| !v.is_null())
    }

    fn invalid(&self, name: &str, reason: impl Into<String>) -> ToolError {
        ToolError::invalid_parameter(self.tool, name, reason)
    }

    /// Integer argument in `[min, max]`, `default` when absent
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for non-integers or out-of-range values
    pub fn integer(&self, name: &str, default: i64, min: i64, max: i64) -> AppResult<i64> {
        self.get(name)
            .map_or(Ok(default), |value| self.parse_integer(name, value, min, max))
    }

    /// Required integer argument in `[min, max]`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when absent, non-integer or out of range
    pub fn required_integer(&self, name: &str, min: i64, max: i64) -> AppResult<i64> {
        let value = self
            .get(name)
            .ok_or_else(|| ToolError::missing_parameter(self.tool, name))?;
        self.parse_integer(name, value, min, max)
    }

    fn parse_integer(&self, name: &str, value: &Value, min: i64, max: i64) -> AppResult<i64> {
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract().abs() < f64::EPSILON && f.abs() < 9.0e15)
                    .map(|f| f as i64)
            }),
            _ => None,
        };
        let n = parsed.ok_or_else(|| self.invalid(name, format!("expected an integer, got {value}")))?;
        if (min..=max).contains(&n) {
            Ok(n)
        } else {
            Err(self
                .invalid(name, format!("must be between {min} and {max} (got {n})"))
                .into())
        }
    }

    /// Number argument in `[min, max]`, `default` when absent
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for non-numbers or out-of-range values
    pub fn number(&self, name: &str, default: f64, min: f64, max: f64) -> AppResult<f64> {
        let Some(value) = self.get(name) else {
            return Ok(default);
        };
        let n = value
            .as_f64()
            .filter(|f| f.is_finite())
            .ok_or_else(|| self.invalid(name, format!("expected a number, got {value}")))?;
        if (min..=max).contains(&n) {
            Ok(n)
        } else {
            Err(self
                .invalid(name, format!("must be between {min} and {max} (got {n})"))
                .into())
        }
    }

    /// Optional non-empty string argument
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the argument is present but not a string
    pub fn optional_string(&self, name: &str) -> AppResult<Option<&'a str>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                Ok((!trimmed.is_empty()).then_some(trimmed))
            }
            Some(other) => Err(self
                .invalid(name, format!("expected a string, got {other}"))
                .into()),
        }
    }

    /// Requested output format; unrecognized values render as text
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `format` is present but not a string
    pub fn output_format(&self) -> AppResult<OutputFormat> {
        Ok(self
            .optional_string(FORMAT_ARG)?
            .map_or(OutputFormat::Text, OutputFormat::from_str_param))
    }
}

/// Render a report: text through `render_text`, structured formats by serialization
///
/// # Errors
///
/// Returns `SerializationError` if the structured encoding fails
pub fn render<T: Serialize>(
    report: &T,
    format: OutputFormat,
    render_text: impl FnOnce(&T) -> String,
) -> AppResult<ToolResult> {
    match format {
        OutputFormat::Text => Ok(ToolResult::text(render_text(report))),
        OutputFormat::Json | OutputFormat::Toon => {
            Ok(ToolResult::text(format_structured(report, format)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_integer_defaults_and_bounds() {
        let args = json!({"hours": 12, "count": 0, "bad": 1.5, "null": null});
        let args = ToolArgs::new("glucose_history", &args);
        assert_eq!(args.integer("hours", 6, 1, 720).ok(), Some(12));
        assert_eq!(args.integer("missing", 6, 1, 720).ok(), Some(6));
        assert_eq!(args.integer("null", 6, 1, 720).ok(), Some(6));
        assert!(args
            .integer("count", 100, 1, 1000)
            .is_err_and(|e| e.code == ErrorCode::InvalidInput));
        assert!(args.integer("bad", 6, 1, 720).is_err());
    }

    #[test]
    fn test_whole_float_is_accepted_as_integer() {
        let args = json!({"year": 2024.0});
        let args = ToolArgs::new("analyze_monthly", &args);
        assert_eq!(args.required_integer("year", 2015, 2030).ok(), Some(2024));
        assert!(args.required_integer("fromMonth", 1, 12).is_err());
    }

    #[test]
    fn test_strings_and_format() {
        let args = json!({"from": " 2024-03 ", "to": "", "format": "JSON", "n": 3});
        let args = ToolArgs::new("analyze", &args);
        assert_eq!(args.optional_string("from").ok().flatten(), Some("2024-03"));
        assert_eq!(args.optional_string("to").ok().flatten(), None);
        assert!(args.optional_string("n").is_err());
        assert_eq!(args.output_format().ok(), Some(OutputFormat::Json));
    }
}
