//! Render + size guard throughput benchmark.
//!
//! Measures meeting-page rendering and the truncation pass across page sizes
//! using Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fathom_mcp::api::MeetingsResponse;
use fathom_mcp::render::meetings::render_meetings;
use fathom_mcp::render::{enforce_character_limit, DetailFlags, DisplayZone, SizeLimit};
use fathom_mcp::tools::ResponseFormat;
use serde_json::{json, Value};

fn meeting(i: usize) -> Value {
    json!({
        "title": format!("Pipeline review {i}"),
        "recording_id": i + 1,
        "url": format!("https://fathom.video/calls/{}", i + 1),
        "created_at": "2026-03-02T10:00:00Z",
        "recording_start_time": "2026-03-02T10:00:00Z",
        "recording_end_time": "2026-03-02T11:10:00Z",
        "calendar_invitees_domains_type": "one_or_more_external",
        "calendar_invitees": [
            {"name": "Ada", "email": "ada@acme.com", "is_external": false},
            {"name": "Bob", "email": "bob@initech.com", "is_external": true}
        ],
        "recorded_by": {"name": "Ada", "email": "ada@acme.com", "team": "Sales"},
        "default_summary": {"markdown_formatted": "Reviewed open deals and blockers. ".repeat(20)},
        "action_items": [
            {"description": "Send revised quote", "completed": false,
             "recording_timestamp": "00:31:10", "assignee": {"name": "Ada"}}
        ]
    })
}

fn response(n: usize) -> MeetingsResponse {
    let items: Vec<Value> = (0..n).map(meeting).collect();
    serde_json::from_value(json!({"items": items, "next_cursor": "next"})).unwrap()
}

fn flags() -> DetailFlags {
    DetailFlags {
        summary: true,
        transcript: false,
        action_items: true,
        crm_matches: false,
    }
}

fn bench_render_meetings(c: &mut Criterion) {
    let page_sizes: &[usize] = &[1, 10, 50];
    let zone = DisplayZone::utc();

    let mut group = c.benchmark_group("render_meetings");
    for &size in page_sizes {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &n| {
            b.iter_batched(
                || response(n),
                |r| render_meetings(black_box(r), flags(), &zone).unwrap(),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_size_guard(c: &mut Criterion) {
    let page_sizes: &[usize] = &[10, 50, 200];
    let zone = DisplayZone::utc();
    let limit = SizeLimit::default();

    let mut group = c.benchmark_group("size_guard");
    for &size in page_sizes {
        let page = render_meetings(response(size), flags(), &zone).unwrap();
        for format in ResponseFormat::ALL {
            group.bench_with_input(
                BenchmarkId::new(format.as_str(), size),
                &page,
                |b, p| {
                    b.iter_batched(
                        || p.clone(),
                        |p| enforce_character_limit(black_box(p), format, &limit).unwrap(),
                        criterion::BatchSize::SmallInput,
                    );
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_render_meetings, bench_size_guard);
criterion_main!(benches);
