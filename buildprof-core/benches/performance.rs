use criterion::{black_box, criterion_group, criterion_main, Criterion};
use buildprof_core::graph::{TargetGraph, TargetNode};
use buildprof_core::{BuildProfiler, BuildTimes};

fn generate_nodes(count: usize, deps_per_target: usize) -> Vec<TargetNode> {
    let mut nodes = Vec::with_capacity(count);

    for i in 0..count {
        let deps = if i > 0 && deps_per_target > 0 {
            let dep_count = deps_per_target.min(i);
            (0..dep_count)
                .map(|j| {
                    let dep_idx = i - 1 - j;
                    format!("bundle/target-{}", dep_idx)
                })
                .collect()
        } else {
            Vec::new()
        };

        nodes.push(TargetNode::new(format!("bundle/target-{}", i), deps));
    }

    nodes
}

fn record_build(count: usize) -> BuildTimes {
    let times = BuildTimes::new();
    let profiler = BuildProfiler::new(times.clone());

    for i in 0..count {
        let name = format!("bundle/target-{}", i);
        let start = (i as i64) * 3;
        profiler.set_start_time(&name, Some("tech"), Some(start));
        profiler.set_end_time(&name, Some(start + 10));
    }

    times
}

fn benchmark_graph_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_construction");

    for count in [100, 500, 1000, 2000, 5000] {
        group.bench_function(format!("{}_targets", count), |b| {
            let nodes = generate_nodes(count, 3);
            b.iter(|| black_box(TargetGraph::new(nodes.clone())));
        });
    }

    group.finish();
}

fn benchmark_recording(c: &mut Criterion) {
    let mut group = c.benchmark_group("recording");

    for count in [100, 1000, 5000] {
        group.bench_function(format!("{}_targets", count), |b| {
            b.iter(|| black_box(record_build(count)));
        });
    }

    group.finish();
}

fn benchmark_calculate_build_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_build_times");

    for count in [100, 500, 1000, 2000, 5000] {
        let graph = TargetGraph::new(generate_nodes(count, 3));
        let times = record_build(count);
        let profiler = BuildProfiler::new(times);

        group.bench_function(format!("{}_targets", count), |b| {
            b.iter(|| black_box(profiler.calculate_build_times(&graph)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_graph_construction,
    benchmark_recording,
    benchmark_calculate_build_times
);
criterion_main!(benches);
