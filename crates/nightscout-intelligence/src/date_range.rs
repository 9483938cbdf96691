// ABOUTME: Date range expressions resolved to epoch-millisecond bounds
// ABOUTME: Relative offsets (7d, 2w, 3m, 1y), year-month, and full dates, all UTC
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Date Range Resolution
//!
//! Grammars are tried in order:
//!
//! 1. relative offset `^\d+[dwmy]$` (case-insensitive), N fixed-length units before now
//! 2. year-month `YYYY-MM`, first instant of the month
//! 3. full date `YYYY-MM-DD`, midnight
//!
//! Relative units are calendar-naive: a month is 30 days and a year 365.
//!
//! Used as the end of a range, a year-month or full date covers its whole
//! unit, so the effective bound is the start of the next month or day.

use chrono::{Datelike, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use nightscout_core::constants::time::{MS_PER_DAY, MS_PER_MONTH, MS_PER_WEEK, MS_PER_YEAR};
use nightscout_core::errors::{AppError, AppResult};
use nightscout_core::models::TimeWindow;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Stored as Option so a pattern compilation failure degrades to "no match"
static RELATIVE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^([0-9]+)([dwmy])$").ok());

static YEAR_MONTH_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})$").ok());

static FULL_DATE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").ok());

/// Fixed-length unit of a relative offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeUnit {
    /// 86,400,000 ms
    Days,
    /// 604,800,000 ms
    Weeks,
    /// 30 days
    Months,
    /// 365 days
    Years,
}

impl RelativeUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "d" => Some(Self::Days),
            "w" => Some(Self::Weeks),
            "m" => Some(Self::Months),
            "y" => Some(Self::Years),
            _ => None,
        }
    }

    /// Length of one unit in milliseconds
    #[must_use]
    pub const fn millis(self) -> i64 {
        match self {
            Self::Days => MS_PER_DAY,
            Self::Weeks => MS_PER_WEEK,
            Self::Months => MS_PER_MONTH,
            Self::Years => MS_PER_YEAR,
        }
    }

    const fn suffix(self) -> char {
        match self {
            Self::Days => 'd',
            Self::Weeks => 'w',
            Self::Months => 'm',
            Self::Years => 'y',
        }
    }
}

/// A parsed range expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateExpression {
    /// `amount` units before now
    Relative {
        /// Number of units
        amount: i64,
        /// Unit length
        unit: RelativeUnit,
        /// `amount * unit` in ms, checked at parse time
        offset_ms: i64,
    },
    /// A calendar month
    YearMonth {
        /// First day of the month
        first_day: NaiveDate,
    },
    /// A calendar day
    Date(NaiveDate),
}

impl DateExpression {
    /// Parse an expression
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateExpression`, echoing the input, when no grammar
    /// matches or the calendar values are out of range
    pub fn parse(expression: &str) -> AppResult<Self> {
        let trimmed = expression.trim();

        if let Some(caps) = captures(&RELATIVE_PATTERN, trimmed) {
            let amount: i64 = caps[1]
                .parse()
                .map_err(|_| AppError::invalid_date(expression, "offset is too large"))?;
            let unit = RelativeUnit::from_suffix(&caps[2])
                .ok_or_else(|| AppError::invalid_date(expression, "unknown unit"))?;
            let offset_ms = amount
                .checked_mul(unit.millis())
                .ok_or_else(|| AppError::invalid_date(expression, "offset is too large"))?;
            return Ok(Self::Relative {
                amount,
                unit,
                offset_ms,
            });
        }

        if let Some(caps) = captures(&YEAR_MONTH_PATTERN, trimmed) {
            let (year, month) = (parse_number(&caps[1]), parse_number(&caps[2]));
            let first_day = calendar_date(year, month, 1)
                .ok_or_else(|| AppError::invalid_date(expression, "month out of range"))?;
            return Ok(Self::YearMonth { first_day });
        }

        if let Some(caps) = captures(&FULL_DATE_PATTERN, trimmed) {
            let (year, month, day) = (
                parse_number(&caps[1]),
                parse_number(&caps[2]),
                parse_number(&caps[3]),
            );
            let date = calendar_date(year, month, day)
                .ok_or_else(|| AppError::invalid_date(expression, "no such calendar date"))?;
            return Ok(Self::Date(date));
        }

        Err(AppError::invalid_date(
            expression,
            "expected YYYY-MM-DD, YYYY-MM, or a relative period like 7d, 2w, 3m, 1y",
        ))
    }

    /// Resolve as the start of a range
    #[must_use]
    pub fn start_millis(&self, now_ms: i64) -> i64 {
        match self {
            Self::Relative { offset_ms, .. } => now_ms.saturating_sub(*offset_ms),
            Self::YearMonth { first_day } => midnight_millis(*first_day),
            Self::Date(date) => midnight_millis(*date),
        }
    }

    /// Resolve as the end of a range: whole units are included
    #[must_use]
    pub fn end_millis(&self, now_ms: i64) -> i64 {
        match self {
            Self::Relative { .. } => self.start_millis(now_ms),
            Self::YearMonth { first_day } => first_day
                .checked_add_months(Months::new(1))
                .map_or(i64::MAX, midnight_millis),
            Self::Date(date) => date.succ_opt().map_or(i64::MAX, midnight_millis),
        }
    }
}

impl FromStr for DateExpression {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative { amount, unit, .. } => write!(f, "{amount}{}", unit.suffix()),
            Self::YearMonth { first_day } => {
                write!(f, "{:04}-{:02}", first_day.year(), first_day.month())
            }
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

fn captures<'t>(pattern: &LazyLock<Option<Regex>>, text: &'t str) -> Option<regex::Captures<'t>> {
    pattern.as_ref().and_then(|re| re.captures(text))
}

// Digits-only captures of at most four characters always fit
fn parse_number(digits: &str) -> u32 {
    digits.parse().unwrap_or(0)
}

fn calendar_date(year: u32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn midnight_millis(date: NaiveDate) -> i64 {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .timestamp_millis()
}

/// Resolve an expression to the start-of-range instant in epoch ms
///
/// # Errors
///
/// Returns `InvalidDateExpression` if `expression` does not parse
pub fn resolve(expression: &str, now_ms: i64) -> AppResult<i64> {
    Ok(DateExpression::parse(expression)?.start_millis(now_ms))
}

/// Build the window for `from` up to `to` (or now when `to` is absent)
///
/// # Errors
///
/// Returns `InvalidDateExpression` if either bound does not parse, and
/// `InvalidInput` if the resulting window is empty or inverted
pub fn resolve_range(from: &str, to: Option<&str>, now_ms: i64) -> AppResult<TimeWindow> {
    let start = DateExpression::parse(from)?.start_millis(now_ms);
    let end = match to.map(str::trim).filter(|t| !t.is_empty()) {
        Some(to) => DateExpression::parse(to)?.end_millis(now_ms),
        None => now_ms,
    };
    TimeWindow::new(start, end)
}

/// Window covering one calendar month in UTC
///
/// # Errors
///
/// Returns `InvalidInput` if `month` is not 1-12 or the year is unrepresentable
pub fn month_window(year: i32, month: u32) -> AppResult<TimeWindow> {
    let first_day = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::invalid_input(format!("invalid month {year}-{month:02}")))?;
    let month = DateExpression::YearMonth { first_day };
    TimeWindow::new(month.start_millis(0), month.end_millis(0))
}
