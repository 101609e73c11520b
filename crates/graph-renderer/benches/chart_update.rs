//! Benchmarks for the per-frame update path.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use graph_renderer::*;

fn entities(count: usize) -> Vec<ChartEntity<u32>> {
    (0..count)
        .map(|i| ChartEntity::new(i as u32, ((i * 37) % 100) as f64))
        .collect()
}

fn settled_chart(count: usize) -> (BarChart<u32>, f64) {
    let options = BarChartOptions::default()
        .with_layout(BarChartLayout::default().with_entity(BarLayoutConfig::default().with_gap(0.0)));
    let mut chart = BarChart::new(&entities(count), 4000.0, 1000.0, options).unwrap();
    let mut now = 0.0;
    while chart.update(now, &mut PointerState::absent()) {
        now += 16.0;
    }
    (chart, now)
}

fn bench_steady_state_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("bar_chart_update");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("hover_sweep", size), &size, |b, &size| {
            let (mut chart, mut now) = settled_chart(size);
            let mut x = 0.0;
            b.iter(|| {
                now += 16.0;
                x = (x + 7.0) % 4000.0;
                let mut pointer = PointerState::new(x, 990.0, ClickingState::None);
                black_box(chart.update(now, &mut pointer));
                black_box(chart.entity_vertex_positions().len())
            });
        });

        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, &size| {
            let (mut chart, mut now) = settled_chart(size);
            b.iter(|| {
                now += 16.0;
                black_box(chart.update(now, &mut PointerState::absent()))
            });
        });
    }

    group.finish();
}

fn bench_data_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("bar_chart_update_data");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("retarget_and_relayout", size), &size, |b, &size| {
            let (mut chart, mut now) = settled_chart(size);
            let mut a = entities(size);
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                a[0].value = if flip { 1000.0 } else { 10.0 };
                now += 16.0;
                let _ = black_box(chart.update_data(&a, now));
                black_box(chart.update(now, &mut PointerState::absent()))
            });
        });
    }

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_bar_layout");

    for size in [10, 100, 1000] {
        let data = entities(size);
        let config = BarChartLayout::default();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(compute_bar_layout(&data, 4000.0, 1000.0, &config)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_steady_state_update,
    bench_data_update,
    bench_layout
);
criterion_main!(benches);
