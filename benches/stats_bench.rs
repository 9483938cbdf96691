// ABOUTME: Criterion benchmarks for glucose statistics, pagination, and date parsing
// ABOUTME: Measures statistics over day, month, and year sized reading sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the analysis pipeline.
//!
//! A CGM reports every five minutes, so a day is 288 readings and a year
//! roughly 105,000.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nightscout_intelligence::{DateExpression, StatsEngine};
use nightscout_mcp_server::models::{Sample, TimeWindow};
use nightscout_mcp_server::units::TargetRange;
use nightscout_providers::{PageTransition, PaginationState};

const FIVE_MINUTES_MS: i64 = 300_000;
const READINGS_PER_DAY: usize = 288;

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn generate_readings(count: usize) -> Vec<Sample> {
    (0..count)
        .map(|i| {
            // Slow sine-like swing between roughly 60 and 240 mg/dL
            let phase = (i % 144) as i32;
            let value = 60 + (phase - 72).abs() * 5 / 2;
            Sample::new(i as i64 * FIVE_MINUTES_MS, value)
        })
        .collect()
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    let engine = StatsEngine::new(TargetRange::default());

    for (label, days) in [("day", 1), ("month", 30), ("year", 365)] {
        let readings = generate_readings(READINGS_PER_DAY * days);
        group.throughput(Throughput::Elements(readings.len() as u64));
        group.bench_with_input(BenchmarkId::new("statistics", label), &readings, |b, readings| {
            b.iter(|| engine.compute(black_box(readings)));
        });
    }

    group.finish();
}

#[allow(clippy::cast_possible_wrap)]
fn bench_pagination_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagination");
    let readings = generate_readings(READINGS_PER_DAY * 90);
    let end = readings.len() as i64 * FIVE_MINUTES_MS;
    let Ok(window) = TimeWindow::new(0, end) else {
        return;
    };
    let mut newest_first = readings;
    newest_first.reverse();

    for page_size in [1_000_usize, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("walk_90_days", page_size),
            &page_size,
            |b, &page_size| {
                b.iter(|| {
                    let mut state = PaginationState::new(window, page_size);
                    let mut offset = 0;
                    loop {
                        let page_end = (offset + page_size).min(newest_first.len());
                        let page = newest_first[offset..page_end].to_vec();
                        offset = page_end;
                        if let PageTransition::Complete(_) = state.advance(page) {
                            break;
                        }
                    }
                    state.into_samples().len()
                });
            },
        );
    }

    group.finish();
}

fn bench_date_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_expression");

    for expression in ["7d", "2024-03", "2024-03-15"] {
        group.bench_with_input(
            BenchmarkId::new("parse", expression),
            &expression,
            |b, expression| {
                b.iter(|| DateExpression::parse(black_box(expression)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_statistics,
    bench_pagination_walk,
    bench_date_parsing
);
criterion_main!(benches);
