// ABOUTME: Integration tests for date range expression resolution
// ABOUTME: Relative offsets, calendar month and day bounds, rollovers, and rejected expressions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::synthetic_data::utc_ms;
use nightscout_intelligence::{month_window, resolve, resolve_range, DateExpression};
use nightscout_mcp_server::constants::time::MS_PER_DAY;
use nightscout_mcp_server::errors::ErrorCode;

fn now() -> i64 {
    utc_ms(2024, 3, 15, 12, 0)
}

#[test]
fn test_relative_days_resolve_before_now() {
    assert_eq!(resolve("7d", now()).unwrap(), utc_ms(2024, 3, 8, 12, 0));
    assert_eq!(resolve("2w", now()).unwrap(), utc_ms(2024, 3, 1, 12, 0));
}

#[test]
fn test_relative_months_and_years_are_fixed_length() {
    assert_eq!(resolve("1m", now()).unwrap(), now() - 30 * MS_PER_DAY);
    assert_eq!(resolve("1Y", now()).unwrap(), now() - 365 * MS_PER_DAY);
}

#[test]
fn test_year_month_bounds() {
    let expression = DateExpression::parse("2024-03").unwrap();
    assert_eq!(expression.start_millis(now()), utc_ms(2024, 3, 1, 0, 0));
    assert_eq!(expression.end_millis(now()), utc_ms(2024, 4, 1, 0, 0));
}

#[test]
fn test_december_rolls_into_next_year() {
    let expression = DateExpression::parse("2024-12").unwrap();
    assert_eq!(expression.end_millis(now()), utc_ms(2025, 1, 1, 0, 0));
}

#[test]
fn test_full_date_covers_whole_day() {
    let expression = DateExpression::parse("2024-02-29").unwrap();
    assert_eq!(expression.start_millis(now()), utc_ms(2024, 2, 29, 0, 0));
    assert_eq!(expression.end_millis(now()), utc_ms(2024, 3, 1, 0, 0));
}

#[test]
fn test_relative_end_is_the_instant_itself() {
    let expression = DateExpression::parse("3d").unwrap();
    assert_eq!(expression.start_millis(now()), expression.end_millis(now()));
}

#[test]
fn test_resolve_range_defaults_end_to_now() {
    let window = resolve_range("7d", None, now()).unwrap();
    assert_eq!(window.start_ms(), utc_ms(2024, 3, 8, 12, 0));
    assert_eq!(window.end_ms(), now());

    let blank_end = resolve_range("7d", Some("  "), now()).unwrap();
    assert_eq!(blank_end, window);
}

#[test]
fn test_resolve_range_with_month_bounds() {
    let window = resolve_range("2024-01", Some("2024-02"), now()).unwrap();
    assert_eq!(window.start_ms(), utc_ms(2024, 1, 1, 0, 0));
    assert_eq!(window.end_ms(), utc_ms(2024, 3, 1, 0, 0));
    assert_eq!(window.whole_days(), 60);
}

#[test]
fn test_inverted_range_is_rejected() {
    let error = resolve_range("2024-03-10", Some("2024-03-01"), now()).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_invalid_expressions_are_rejected() {
    for expression in ["yesterday", "7", "d7", "2024-13", "2024-02-30", "2024/03/01", "", "7x"] {
        let error = DateExpression::parse(expression).unwrap_err();
        assert_eq!(
            error.code,
            ErrorCode::InvalidDateExpression,
            "expression {expression:?}"
        );
    }
}

#[test]
fn test_invalid_expression_is_echoed() {
    let error = resolve("fortnight", now()).unwrap_err();
    assert!(error.message.contains("fortnight"));
}

#[test]
fn test_month_window_handles_leap_february() {
    let february = month_window(2024, 2).unwrap();
    assert_eq!(february.start_ms(), utc_ms(2024, 2, 1, 0, 0));
    assert_eq!(february.end_ms() - february.start_ms(), 29 * MS_PER_DAY);

    let december = month_window(2023, 12).unwrap();
    assert_eq!(december.end_ms(), utc_ms(2024, 1, 1, 0, 0));

    assert_eq!(month_window(2024, 13).unwrap_err().code, ErrorCode::InvalidInput);
}
