// ABOUTME: Nightscout data source implementation and cursor-paginated range fetching
// ABOUTME: Source traits, shared HTTP client, authenticated REST client, and the range fetcher
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! Nightscout data source and pagination.
//!
//! The range fetcher only needs [`EntrySource`]; the HTTP client below is one
//! implementation of it, and test fakes are another.

pub use nightscout_core::errors;
pub use nightscout_core::models;

/// Shared HTTP client for Nightscout API calls
pub mod http_client;
/// Nightscout REST v1 client
pub mod nightscout;
/// Backward cursor pagination over an entry source
pub mod range_fetcher;
/// Data source traits
pub mod source;

pub use http_client::{
    active_settings, initialize_shared_client, shared_client, HttpClientSettings,
};
pub use nightscout::{NightscoutClient, NightscoutEndpoint, SecretAuth};
pub use range_fetcher::{
    clamp_page_size, is_empty_page, is_short_page, reached_lower_bound, PageTransition,
    PaginationState, RangeFetcher, StopReason,
};
pub use source::{CgmDataSource, EntryQuery, EntrySource};
