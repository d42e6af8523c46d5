use chart_core::{aggregate, AreaChart, Document, RawRecord, SurveyTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_records(n: usize, distinct_days: i64) -> Vec<RawRecord> {
    let base = SurveyTime::from_ymd(2024, 1, 1).map(|t| t.as_millis()).unwrap_or(0);
    (0..n)
        .map(|i| {
            let d = (i as i64 * 7919) % distinct_days;
            RawRecord::new(SurveyTime::from_millis(base + d * 86_400_000))
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for &n in &[1_000usize, 100_000usize] {
        let data = build_records(n, 365);
        group.bench_function(format!("records_{n}"), |b| {
            b.iter(|| black_box(aggregate(black_box(&data))));
        });
    }
    group.finish();
}

fn bench_redraw(c: &mut Criterion) {
    let mut doc = Document::with_mount_points(["area-chart"]);
    let Ok(mut chart) = AreaChart::new(&mut doc, "area-chart", build_records(10_000, 365)) else {
        return;
    };
    c.bench_function("wrangle_and_draw_10k", |b| {
        b.iter(|| {
            chart.wrangle_data(&mut doc);
        });
    });
}

criterion_group!(benches, bench_aggregate, bench_redraw);
criterion_main!(benches);
