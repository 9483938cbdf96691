// ABOUTME: Integration tests for environment configuration loading and validation
// ABOUTME: Covers defaults, unit selection, threshold normalization, page size clamping, and rejects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use nightscout_mcp_server::config::ServerConfig;
use nightscout_mcp_server::constants::env_config;
use nightscout_mcp_server::constants::http::DEFAULT_CONNECT_TIMEOUT_SECS;
use nightscout_mcp_server::errors::{AppResult, ErrorCode};
use nightscout_mcp_server::units::GlucoseUnit;
use serial_test::serial;

fn load(pairs: &[(&str, &str)]) -> AppResult<ServerConfig> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_without_environment() {
    let config = load(&[]).unwrap();

    assert!(config.nightscout.url.is_none());
    assert!(config.nightscout.api_secret.is_none());
    assert_eq!(config.units, GlucoseUnit::Mmol);
    assert!((config.target.low - 70.0).abs() < f64::EPSILON);
    assert!((config.target.high - 140.0).abs() < f64::EPSILON);
    assert_eq!(config.nightscout.page_size, 10_000);
    assert_eq!(config.server_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_units_selector() {
    assert_eq!(
        load(&[(env_config::GLUCOSE_UNITS, "MGDL")]).unwrap().units,
        GlucoseUnit::MgDl
    );
    assert_eq!(
        load(&[(env_config::GLUCOSE_UNITS, "mmol")]).unwrap().units,
        GlucoseUnit::Mmol
    );
    assert_eq!(
        load(&[(env_config::GLUCOSE_UNITS, "stones")]).unwrap().units,
        GlucoseUnit::Mmol
    );
}

#[test]
fn test_mmol_thresholds_are_converted() {
    let config = load(&[
        (env_config::GLUCOSE_LOW, "3.9"),
        (env_config::GLUCOSE_HIGH, "10"),
    ])
    .unwrap();

    assert!((config.target.low - 70.27).abs() < 0.01);
    assert!((config.target.high - 180.18).abs() < 0.01);
}

#[test]
fn test_mgdl_thresholds_are_kept() {
    let config = load(&[
        (env_config::GLUCOSE_LOW, "80"),
        (env_config::GLUCOSE_HIGH, "160"),
    ])
    .unwrap();

    assert!((config.target.low - 80.0).abs() < f64::EPSILON);
    assert!((config.target.high - 160.0).abs() < f64::EPSILON);
}

#[test]
fn test_inverted_target_is_config_invalid() {
    let error = load(&[
        (env_config::GLUCOSE_LOW, "150"),
        (env_config::GLUCOSE_HIGH, "100"),
    ])
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);

    let equal = load(&[
        (env_config::GLUCOSE_LOW, "120"),
        (env_config::GLUCOSE_HIGH, "120"),
    ])
    .unwrap_err();
    assert_eq!(equal.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_unparseable_url_is_config_invalid() {
    let error = load(&[(env_config::NIGHTSCOUT_URL, "not a url")]).unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);

    let ftp = load(&[(env_config::NIGHTSCOUT_URL, "ftp://ns.example.com")]).unwrap_err();
    assert_eq!(ftp.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_blank_values_count_as_unset() {
    let config = load(&[
        (env_config::NIGHTSCOUT_URL, "   "),
        (env_config::NIGHTSCOUT_API_SECRET, ""),
    ])
    .unwrap();

    assert!(config.nightscout.url.is_none());
    assert!(config.nightscout.api_secret.is_none());
}

#[test]
fn test_page_size_and_timeout_overrides() {
    let config = load(&[
        (env_config::NIGHTSCOUT_PAGE_SIZE, "500"),
        (env_config::NIGHTSCOUT_TIMEOUT_SECS, "5"),
    ])
    .unwrap();
    assert_eq!(config.nightscout.page_size, 500);
    assert_eq!(config.nightscout.timeout_secs, 5);

    let clamped = load(&[(env_config::NIGHTSCOUT_PAGE_SIZE, "99999")]).unwrap();
    assert_eq!(clamped.nightscout.page_size, 10_000);

    let garbage = load(&[(env_config::NIGHTSCOUT_TIMEOUT_SECS, "0")]).unwrap();
    assert!(garbage.nightscout.timeout_secs > 0);

    let settings = config.http_client_settings();
    assert_eq!(settings.timeout, Duration::from_secs(5));
    assert_eq!(
        settings.connect_timeout,
        Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
    );
}

#[test]
fn test_summary_hides_secrets() {
    let config = load(&[
        (env_config::NIGHTSCOUT_URL, "https://user:pw@ns.example.com"),
        (env_config::NIGHTSCOUT_API_SECRET, "super-secret-token"),
    ])
    .unwrap();

    let summary = config.summary();
    assert!(summary.contains("Nightscout URL: Configured"));
    assert!(!summary.contains("super-secret-token"));
    assert!(!summary.contains("user:pw"));
}

#[test]
fn test_build_client_reflects_url() {
    let configured = load(&[(env_config::NIGHTSCOUT_URL, "https://ns.example.com/")]).unwrap();
    assert!(configured.build_client().unwrap().is_configured());

    let missing = load(&[]).unwrap();
    assert!(!missing.build_client().unwrap().is_configured());
}

#[test]
fn test_with_units_overrides() {
    let config = load(&[(env_config::GLUCOSE_UNITS, "mmol")])
        .unwrap()
        .with_units(GlucoseUnit::MgDl);
    assert_eq!(config.units, GlucoseUnit::MgDl);
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    env::set_var(env_config::GLUCOSE_UNITS, "mgdl");
    env::set_var(env_config::GLUCOSE_HIGH, "160");

    let config = ServerConfig::from_env().unwrap();

    env::remove_var(env_config::GLUCOSE_UNITS);
    env::remove_var(env_config::GLUCOSE_HIGH);

    assert_eq!(config.units, GlucoseUnit::MgDl);
    assert!((config.target.high - 160.0).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_from_env_rejects_bad_target() {
    env::set_var(env_config::GLUCOSE_LOW, "200");
    env::set_var(env_config::GLUCOSE_HIGH, "100");

    let result = ServerConfig::from_env();

    env::remove_var(env_config::GLUCOSE_LOW);
    env::remove_var(env_config::GLUCOSE_HIGH);

    assert_eq!(result.unwrap_err().code, ErrorCode::ConfigInvalid);
}
