// ABOUTME: Glucose sample model matching the Nightscout entries wire format
// ABOUTME: Tolerates integer or fractional sgv/date values and unknown trend directions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One CGM glucose reading
///
/// Values are always mg/dL as delivered by the source. Samples are never
/// mutated after they are fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Epoch milliseconds, UTC
    #[serde(rename = "date", deserialize_with = "deserialize_millis")]
    pub timestamp: i64,
    /// Sensor glucose value in mg/dL (0 when the entry carries no value)
    #[serde(rename = "sgv", default, deserialize_with = "deserialize_glucose")]
    pub value: i32,
    /// Trend arrow reported by the uploader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<TrendDirection>,
    /// Uploader/device identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Change since the previous reading, mg/dL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

impl Sample {
    /// Create a bare sample with only timestamp and value
    #[must_use]
    pub const fn new(timestamp: i64, value: i32) -> Self {
        Self {
            timestamp,
            value,
            direction: None,
            device: None,
            delta: None,
        }
    }

    /// Attach a trend direction
    #[must_use]
    pub fn with_direction(mut self, direction: TrendDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Reading time as a UTC datetime
    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Trend direction reported alongside a reading
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrendDirection {
    /// Rising fast
    DoubleUp,
    /// Rising
    SingleUp,
    /// Rising slowly
    FortyFiveUp,
    /// Steady
    Flat,
    /// Falling slowly
    FortyFiveDown,
    /// Falling
    SingleDown,
    /// Falling fast
    DoubleDown,
    /// Uploader could not compute a trend
    NotComputable,
    /// Rate of change outside the measurable range
    RateOutOfRange,
    /// Any other value, preserved verbatim
    Other(String),
}

impl TrendDirection {
    /// Wire name of this direction
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::DoubleUp => "DoubleUp",
            Self::SingleUp => "SingleUp",
            Self::FortyFiveUp => "FortyFiveUp",
            Self::Flat => "Flat",
            Self::FortyFiveDown => "FortyFiveDown",
            Self::SingleDown => "SingleDown",
            Self::DoubleDown => "DoubleDown",
            Self::NotComputable => "NOT COMPUTABLE",
            Self::RateOutOfRange => "RATE OUT OF RANGE",
            Self::Other(name) => name,
        }
    }

    /// Arrow glyph for display; unknown directions render their raw name
    #[must_use]
    pub fn arrow(&self) -> &str {
        match self {
            Self::DoubleUp => "⇈",
            Self::SingleUp => "↑",
            Self::FortyFiveUp => "↗",
            Self::Flat => "→",
            Self::FortyFiveDown => "↘",
            Self::SingleDown => "↓",
            Self::DoubleDown => "⇊",
            Self::NotComputable => "?",
            Self::RateOutOfRange => "⚠️",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for TrendDirection {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DoubleUp" => Self::DoubleUp,
            "SingleUp" => Self::SingleUp,
            "FortyFiveUp" => Self::FortyFiveUp,
            "Flat" => Self::Flat,
            "FortyFiveDown" => Self::FortyFiveDown,
            "SingleDown" => Self::SingleDown,
            "DoubleDown" => Self::DoubleDown,
            "NOT COMPUTABLE" => Self::NotComputable,
            "RATE OUT OF RANGE" => Self::RateOutOfRange,
            _ => Self::Other(value),
        }
    }
}

impl From<TrendDirection> for String {
    fn from(value: TrendDirection) -> Self {
        match value {
            TrendDirection::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

/// Nightscout uploaders disagree on integer vs float encodings
#[derive(Deserialize)]
#[serde(untagged)]
enum WireNumber {
    Int(i64),
    Float(f64),
}

impl WireNumber {
    fn as_i64(&self) -> i64 {
        match *self {
            Self::Int(v) => v,
            // Safe: epoch millis and mg/dL values are far inside i64 range
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(v) => v.round() as i64,
        }
    }
}

fn deserialize_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    WireNumber::deserialize(deserializer).map(|n| n.as_i64())
}

fn deserialize_glucose<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<WireNumber>::deserialize(deserializer)?;
    Ok(value.map_or(0, |n| {
        i32::try_from(n.as_i64()).unwrap_or(0)
    }))
}
