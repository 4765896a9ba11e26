//! Run with:
//! ```bash
//! cargo bench --bench astar
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use simcore::prelude::*;

const SEED: u64 = 0xDEAD_BEEF_CAFE_BABE;

/// Builds an `n x n` grid graph with 4-connectivity and unit edge weights,
/// positions laid out on the grid so Euclidean/Manhattan/octile heuristics
/// are all meaningful.
fn build_grid(side: usize) -> AStar<u32> {
    let n = side * side;
    let mut graph: AStar<u32> = AStar::init(n);
    for row in 0..side {
        for col in 0..side {
            let idx = row * side + col;
            graph.set_position(idx as u32, Position::new(col as f32, row as f32)).unwrap();
            if col + 1 < side {
                let right = idx + 1;
                graph.add_edge(idx, right, 1);
                graph.add_edge(right, idx, 1);
            }
            if row + 1 < side {
                let down = idx + side;
                graph.add_edge(idx, down, 1);
                graph.add_edge(down, idx, 1);
            }
        }
    }
    graph
}

fn bench_find_path(c: &mut Criterion) {
    const SIDE: usize = 64;
    let mut graph = build_grid(SIDE);
    graph.set_heuristic(Heuristic::Octile);
    let n = SIDE * SIDE;

    let mut group = c.benchmark_group("astar_find_path");
    group.throughput(Throughput::Elements(1));
    group.bench_function(BenchmarkId::new("corner_to_corner", n), |b| {
        b.iter(|| {
            let mut path = Vec::new();
            black_box(graph.find_path(black_box(0), black_box(n - 1), &mut path))
        })
    });
    group.finish();
}

fn bench_heuristics(c: &mut Criterion) {
    const SIDE: usize = 64;
    let n = SIDE * SIDE;

    let mut group = c.benchmark_group("astar_heuristic_comparison");
    group.throughput(Throughput::Elements(1));
    for heuristic in [Heuristic::Zero, Heuristic::Manhattan, Heuristic::Euclidean, Heuristic::Octile] {
        let mut graph = build_grid(SIDE);
        graph.set_heuristic(heuristic);
        group.bench_function(BenchmarkId::new(format!("{heuristic:?}"), n), |b| {
            b.iter(|| {
                let mut path = Vec::new();
                black_box(graph.find_path(black_box(0), black_box(n - 1), &mut path))
            })
        });
    }
    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut group = c.benchmark_group("astar_scaling_by_grid_side");
    for side in [8usize, 16, 32, 64] {
        let mut graph = build_grid(side);
        graph.set_heuristic(Heuristic::Octile);
        let n = side * side;
        let jitter = rng.gen_range(0..n);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(n), &jitter, |b, &dest| {
            b.iter(|| {
                let mut path = Vec::new();
                black_box(graph.find_path(black_box(0), black_box(dest), &mut path))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_find_path, bench_heuristics, bench_scaling);
criterion_main!(benches);
