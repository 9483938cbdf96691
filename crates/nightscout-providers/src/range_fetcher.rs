// ABOUTME: Backward-walking cursor pagination that assembles every sample in a time window
// ABOUTME: Explicit state machine with named stop guards and a hard page-count circuit breaker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Range Fetcher
//!
//! Nightscout returns at most `count` entries per request, newest first. To
//! read a whole window `[start, end)` we walk backwards: each page asks for
//! `start <= date < cursor`, and the oldest timestamp of a page becomes the
//! exclusive cursor of the next one. Because the cursor is exclusive, a
//! sample is never returned by two pages.
//!
//! The walk is modelled as [`PaginationState`], advanced once per page:
//!
//! | guard | outcome |
//! |---|---|
//! | [`is_empty_page`] | complete, window exhausted |
//! | [`is_short_page`] | complete, the source has nothing older |
//! | [`reached_lower_bound`] | complete, the page touched `start` |
//! | otherwise | continue with `cursor = oldest` |
//!
//! [`PaginationState::ceiling_reached`] trips after [`MAX_PAGES`] requests
//! that all demanded a follow-up page.

use nightscout_core::constants::pagination::{MAX_PAGES, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use nightscout_core::errors::{AppError, AppResult};
use nightscout_core::models::{Sample, TimeWindow};
use tracing::{debug, info, warn};

use crate::source::{EntryQuery, EntrySource};

/// Why a pagination walk finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The source returned no samples
    EmptyPage,
    /// The source returned fewer samples than requested
    ShortPage,
    /// The oldest sample of the page is at or before the window start
    LowerBoundReached,
}

/// Result of feeding one page into the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTransition {
    /// Request another page ending just before `next_cursor`
    Continue {
        /// Exclusive upper bound for the next request
        next_cursor: i64,
    },
    /// The window has been fully read
    Complete(StopReason),
}

/// Guard: the page carried no samples
#[must_use]
pub fn is_empty_page(page: &[Sample]) -> bool {
    page.is_empty()
}

/// Guard: the page was not full, so nothing older remains
#[must_use]
pub const fn is_short_page(page_len: usize, page_size: usize) -> bool {
    page_len < page_size
}

/// Guard: the walk has reached the inclusive window start
#[must_use]
pub const fn reached_lower_bound(oldest: i64, window: &TimeWindow) -> bool {
    oldest <= window.start_ms()
}

/// Cursor, accumulated samples, and pages issued for one window
#[derive(Debug, Clone)]
pub struct PaginationState {
    window: TimeWindow,
    page_size: usize,
    cursor: i64,
    pages_issued: usize,
    accumulated: Vec<Sample>,
}

impl PaginationState {
    /// Start a walk at the window end
    #[must_use]
    pub fn new(window: TimeWindow, page_size: usize) -> Self {
        Self {
            window,
            page_size: clamp_page_size(page_size),
            cursor: window.end_ms(),
            pages_issued: 0,
            accumulated: Vec::new(),
        }
    }

    /// Query for the next page
    #[must_use]
    pub const fn next_query(&self) -> EntryQuery {
        EntryQuery::page(&self.window, self.cursor, self.page_size)
    }

    /// Current exclusive upper bound
    #[must_use]
    pub const fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Requests answered so far
    #[must_use]
    pub const fn pages_issued(&self) -> usize {
        self.pages_issued
    }

    /// Samples collected so far
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.accumulated.len()
    }

    /// Whether the page ceiling has been hit
    #[must_use]
    pub const fn ceiling_reached(&self) -> bool {
        self.pages_issued >= MAX_PAGES
    }

    /// Feed one page (the answer to [`Self::next_query`]) into the walk
    pub fn advance(&mut self, page: Vec<Sample>) -> PageTransition {
        self.pages_issued += 1;

        if is_empty_page(&page) {
            return PageTransition::Complete(StopReason::EmptyPage);
        }

        let page_len = page.len();
        let oldest = page
            .iter()
            .map(|sample| sample.timestamp)
            .min()
            .unwrap_or(self.window.start_ms());

        // Only keep what lies in [start, cursor); a well-behaved source never sends more
        let (start, cursor) = (self.window.start_ms(), self.cursor);
        self.accumulated.extend(
            page.into_iter()
                .filter(|sample| sample.timestamp >= start && sample.timestamp < cursor),
        );

        if is_short_page(page_len, self.page_size) {
            return PageTransition::Complete(StopReason::ShortPage);
        }
        if reached_lower_bound(oldest, &self.window) {
            return PageTransition::Complete(StopReason::LowerBoundReached);
        }

        self.cursor = oldest;
        PageTransition::Continue {
            next_cursor: oldest,
        }
    }

    /// Finish the walk and take the samples
    #[must_use]
    pub fn into_samples(self) -> Vec<Sample> {
        self.accumulated
    }
}

/// Clamp a requested page size into the range the source accepts
#[must_use]
pub fn clamp_page_size(page_size: usize) -> usize {
    page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}

/// Reads complete windows from an [`EntrySource`]
pub struct RangeFetcher<'a, S: EntrySource + ?Sized> {
    source: &'a S,
    page_size: usize,
}

impl<'a, S: EntrySource + ?Sized> RangeFetcher<'a, S> {
    /// Create a fetcher; `page_size` is clamped to 1..=10,000
    #[must_use]
    pub fn new(source: &'a S, page_size: usize) -> Self {
        Self {
            source,
            page_size: clamp_page_size(page_size),
        }
    }

    /// Effective page size
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch every sample with `window.start <= date < window.end`
    ///
    /// # Errors
    ///
    /// Propagates source errors unchanged (no retry), and returns
    /// `PaginationOverrun` if 100 consecutive full pages never reach the window start
    pub async fn fetch(&self, window: &TimeWindow) -> AppResult<Vec<Sample>> {
        let mut state = PaginationState::new(*window, self.page_size);

        loop {
            let query = state.next_query();
            let page = self.source.entries(&query).await?;
            debug!(
                page = state.pages_issued() + 1,
                cursor = query.lt,
                returned = page.len(),
                "Fetched entries page"
            );

            match state.advance(page) {
                PageTransition::Complete(reason) => {
                    info!(
                        pages = state.pages_issued(),
                        samples = state.sample_count(),
                        stop = ?reason,
                        window = %window,
                        "Range fetch complete"
                    );
                    return Ok(state.into_samples());
                }
                PageTransition::Continue { .. } if state.ceiling_reached() => {
                    warn!(
                        pages = state.pages_issued(),
                        samples = state.sample_count(),
                        cursor = state.cursor(),
                        "Range fetch exceeded page ceiling"
                    );
                    return Err(AppError::pagination_overrun(
                        state.pages_issued(),
                        state.sample_count(),
                    ));
                }
                PageTransition::Continue { .. } => {}
            }
        }
    }
}
