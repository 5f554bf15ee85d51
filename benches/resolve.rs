//! Benchmarks for dependency resolution
//!
//! Resolves from the top of a large layered target graph, forward and
//! reverse, to keep queries linear in the reachable subgraph.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use targetscope::export::adjacency;
use targetscope::filter::NameFilter;
use targetscope::graph::TargetGraph;
use targetscope::project::TargetRecord;

/// Create `layers` layers of `width` targets, each depending on every
/// target of the next layer.
fn create_layered_targets(layers: usize, width: usize) -> Vec<TargetRecord> {
    let mut targets = Vec::with_capacity(layers * width + 1);
    targets.push(TargetRecord::new(
        "App",
        (0..width).map(|i| format!("L0-{}", i)),
    ));

    for layer in 0..layers {
        for i in 0..width {
            let dependencies: Vec<String> = if layer + 1 < layers {
                (0..width).map(|j| format!("L{}-{}", layer + 1, j)).collect()
            } else {
                Vec::new()
            };
            targets.push(TargetRecord::new(format!("L{}-{}", layer, i), dependencies));
        }
    }

    targets
}

fn build(targets: &[TargetRecord], reverse: bool) -> TargetGraph {
    let mut graph = TargetGraph::new(reverse);
    graph.add_target_info(targets);
    graph
}

/// Benchmark forward resolution from the root
fn bench_resolve_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_forward");

    for width in [10, 30, 60] {
        let graph = build(&create_layered_targets(20, width), false);
        group.bench_with_input(BenchmarkId::from_parameter(width), &graph, |b, graph| {
            b.iter(|| black_box(graph.resolve_dependencies(black_box("App"))))
        });
    }

    group.finish();
}

/// Benchmark reverse resolution from the bottom layer
fn bench_resolve_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_reverse");

    for width in [10, 30, 60] {
        let graph = build(&create_layered_targets(20, width), true);
        group.bench_with_input(BenchmarkId::from_parameter(width), &graph, |b, graph| {
            b.iter(|| black_box(graph.resolve_dependencies(black_box("L19-0"))))
        });
    }

    group.finish();
}

/// Benchmark the filtered whole-graph adjacency view
fn bench_adjacency(c: &mut Criterion) {
    let graph = build(&create_layered_targets(20, 30), false);
    let filter = NameFilter::new("^L1").unwrap();

    c.bench_function("adjacency_filtered", |b| {
        b.iter(|| black_box(adjacency(&graph, &filter)))
    });
}

criterion_group!(
    benches,
    bench_resolve_forward,
    bench_resolve_reverse,
    bench_adjacency
);
criterion_main!(benches);
