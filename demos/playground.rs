//! ```bash
//! cargo run --example playground --release
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use simcore::floyd_warshall_optimized::{FloydWarshallConfig, FloydWarshallOptimized};
use simcore::prelude::*;
use std::time::Instant;

/// Deterministic seed for reproducibility.
const SEED: u64 = 42;
/// World extent for the spatial containers.
const WORLD: f32 = 10_000.0;
/// Number of entities driven through the quadtree and sweep-and-prune demos.
const N_ENTITIES: usize = 20_000;
/// Node count for the shortest-path demos.
const N_NODES: usize = 200;

fn divider() {
    println!("{}", "─".repeat(60));
}

fn random_positions(n: usize, seed: u64) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Position::new(rng.gen::<f32>() * WORLD, rng.gen::<f32>() * WORLD))
        .collect()
}

fn main() -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║      simcore Spatial & Pathfinding Primitives Tour        ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    // ── Phase 1: QuadTree ────────────────────────────────────────────────
    divider();
    println!("Phase 1 — QuadTree<u32>: {N_ENTITIES} points over a {WORLD}x{WORLD} world");

    let positions = random_positions(N_ENTITIES, SEED);
    let t0 = Instant::now();
    let mut tree = QuadTree::init(Rectangle::new(0.0, 0.0, WORLD, WORLD));
    for (i, p) in positions.iter().enumerate() {
        tree.insert(i as u32, *p);
    }
    println!("  Inserted {N_ENTITIES} points in {:?}", t0.elapsed());

    let probe = Position::new(WORLD / 2.0, WORLD / 2.0);
    let t0 = Instant::now();
    let nearest = tree.query_nearest(probe, WORLD);
    println!("  Nearest to world center: {nearest:?} (in {:?})", t0.elapsed());

    let mut in_range = Vec::new();
    tree.query_rect(Rectangle::new(0.0, 0.0, 500.0, 500.0), &mut in_range);
    println!("  Points in the bottom-left 500x500 tile: {}", in_range.len());

    // ── Phase 2: SweepAndPrune ───────────────────────────────────────────
    divider();
    println!("Phase 2 — SweepAndPrune<u32>: broad-phase collisions over {N_ENTITIES} boxes");

    let mut sap = SweepAndPrune::with_capacity(N_ENTITIES);
    for (i, p) in positions.iter().enumerate() {
        sap.add(i as u32, *p, 10.0, 10.0);
    }

    let t0 = Instant::now();
    let collisions = sap.find_collisions();
    println!("  Found {} overlapping pairs in {:?}", collisions.len(), t0.elapsed());

    // ── Phase 3: ZIndexBuckets ───────────────────────────────────────────
    divider();
    println!("Phase 3 — ZIndexBuckets<u32, u8>: draw-order layering");

    let mut layers: ZIndexBuckets<u32, u8> = ZIndexBuckets::new();
    for i in 0..10u32 {
        layers.insert(i, (i % 4) as u8);
    }
    let draw_order: Vec<_> = layers.iter().copied().collect();
    println!("  Draw order (back to front): {draw_order:?}");

    // ── Phase 4: FloydWarshall (scalar) and FloydWarshallOptimized ──────
    divider();
    println!("Phase 4 — All-pairs shortest paths over a {N_NODES}-node random graph");

    let mut rng = StdRng::seed_from_u64(SEED + 1);
    let edges: Vec<(usize, usize, u32)> = (0..N_NODES)
        .flat_map(|i| (0..N_NODES).map(move |j| (i, j)))
        .filter(|&(i, j)| i != j)
        .filter(|_| rng.gen_bool(0.1))
        .map(|(i, j)| (i, j, rng.gen_range(1..50)))
        .collect();

    let t0 = Instant::now();
    let mut scalar: FloydWarshall<u32> = FloydWarshall::init(N_NODES);
    for &(i, j, w) in &edges {
        scalar.add_edge(i, j, w);
    }
    scalar.generate();
    println!("  Scalar engine settled {N_NODES}x{N_NODES} matrix in {:?}", t0.elapsed());

    let t0 = Instant::now();
    let mut optimized = FloydWarshallOptimized::new(N_NODES, FloydWarshallConfig { parallel: true, simd: true });
    for &(i, j, w) in &edges {
        optimized.add_edge(i, j, w);
    }
    optimized.generate();
    println!("  Optimized engine (parallel+SIMD) settled the same matrix in {:?}", t0.elapsed());

    let mismatches = (0..N_NODES)
        .flat_map(|i| (0..N_NODES).map(move |j| (i, j)))
        .filter(|&(i, j)| scalar.value(i, j) != optimized.value(i, j))
        .count();
    println!("  Cross-validation mismatches against the scalar engine: {mismatches}");

    // ── Phase 5: AStar ────────────────────────────────────────────────────
    divider();
    println!("Phase 5 — AStar<u32> over a 32x32 grid with an octile heuristic");

    const SIDE: usize = 32;
    let mut grid: AStar<u32> = AStar::init(SIDE * SIDE);
    for row in 0..SIDE {
        for col in 0..SIDE {
            let idx = row * SIDE + col;
            grid.set_position(idx as u32, Position::new(col as f32, row as f32))?;
            if col + 1 < SIDE {
                grid.add_edge(idx, idx + 1, 1);
                grid.add_edge(idx + 1, idx, 1);
            }
            if row + 1 < SIDE {
                grid.add_edge(idx, idx + SIDE, 1);
                grid.add_edge(idx + SIDE, idx, 1);
            }
        }
    }
    grid.set_heuristic(Heuristic::Octile);

    let t0 = Instant::now();
    let mut path = Vec::new();
    let cost = grid.find_path(0, SIDE * SIDE - 1, &mut path);
    println!("  Corner-to-corner cost: {cost:?}, path length: {} (in {:?})", path.len(), t0.elapsed());

    // ── Phase 6: Summary ──────────────────────────────────────────────────
    divider();
    println!("Phase 6 — Summary");
    println!("  QuadTree:          {} points indexed", tree.count());
    println!("  SweepAndPrune:     {} boxes, {} collisions", sap.len(), collisions.len());
    println!("  ZIndexBuckets:     {} items in draw order", layers.len());
    println!("  FloydWarshall:     {N_NODES} nodes, two engines agree: {}", mismatches == 0);
    println!("  AStar:             path found: {}", cost.is_some());
    divider();

    Ok(())
}
