//! Expansion filter benchmark suite.
//!
//! Benchmarks the candidate-text scan at different scales:
//! - Candidate counts: 1 000, 10 000
//! - Match rates: 1%, 10%
//!
//! Run with: cargo bench --bench expansion_scan
//! Results saved to: target/criterion/

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use resume_export::ExpansionFilter;

// ============================================================================
// Benchmark Parameters
// ============================================================================

const CANDIDATE_COUNTS: &[usize] = &[1_000, 10_000];
const MATCH_PERCENTS: &[usize] = &[1, 10];

// ============================================================================
// Candidate Generation
// ============================================================================

/// Builds a synthetic candidate set where every `100 / percent`-th label
/// is an expansion control. The rest look like ordinary page text.
fn candidate_labels(count: usize, match_percent: usize) -> Vec<String> {
    let stride = 100 / match_percent.max(1);
    (0..count)
        .map(|i| {
            if i % stride == 0 {
                match i % 3 {
                    0 => format!("+{} more", (i % 17) + 1),
                    1 => "See More".to_string(),
                    _ => "Show more projects".to_string(),
                }
            } else {
                format!("Senior Developer profile entry number {i}")
            }
        })
        .collect()
}

// ============================================================================
// Benchmark: Single-Label Match
// ============================================================================

fn bench_matches(c: &mut Criterion) {
    let filter = ExpansionFilter::first_pass();

    let mut group = c.benchmark_group("matches");

    group.bench_function("plus_count_hit", |b| {
        b.iter(|| filter.matches(black_box("+11 more")));
    });
    group.bench_function("see_more_hit", |b| {
        b.iter(|| filter.matches(black_box("See 3 More Skills")));
    });
    group.bench_function("miss", |b| {
        b.iter(|| filter.matches(black_box("Lead Backend Engineer, Payments")));
    });

    group.finish();
}

// ============================================================================
// Benchmark: Candidate Scan
// ============================================================================

fn bench_select(c: &mut Criterion) {
    let filter = ExpansionFilter::first_pass();

    let mut group = c.benchmark_group("select");

    for &count in CANDIDATE_COUNTS {
        for &percent in MATCH_PERCENTS {
            let labels = candidate_labels(count, percent);
            let id = format!("{count}c_{percent}pct");
            group.bench_with_input(BenchmarkId::new("scan", &id), &labels, |b, labels| {
                b.iter(|| filter.select(black_box(labels)));
            });
        }
    }

    group.finish();
}

// ============================================================================
// Benchmark: Second Pass
// ============================================================================

fn bench_second_pass(c: &mut Criterion) {
    let filter = ExpansionFilter::second_pass();
    let labels = candidate_labels(10_000, 10);

    c.bench_function("second_pass_scan_10000", |b| {
        b.iter(|| filter.select(black_box(&labels)));
    });
}

// ============================================================================
// Criterion Setup
// ============================================================================

criterion_group!(benches, bench_matches, bench_select, bench_second_pass);
criterion_main!(benches);
