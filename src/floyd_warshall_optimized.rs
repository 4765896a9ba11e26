//! `FloydWarshallOptimized` — the flat-`u32`, SIMD- and row-parallel variant
//! of [`crate::floyd_warshall::FloydWarshall`].
//!
//! The weight type is pinned to `u32` rather than generic over
//! [`crate::numeric::PositiveInteger`]: the SIMD body processes 4 lanes of
//! `u32` at a time, and that lane width is only meaningful for a fixed
//! element size. `generate` dispatches across three execution strategies
//! controlled by [`FloydWarshallConfig`], all producing bit-identical
//! results to the scalar engine (see the cross-validation test below).

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{CoreError, CoreResult};
use crate::sparse_set::SparseSet;

const INF: u32 = u32::MAX;
const LANES: usize = 4;
/// Row count above which `generate` considers the parallel+SIMD strategy,
/// per the spec's `size > 64 ∧ parallel` dispatch rule.
const PARALLEL_THRESHOLD: usize = 64;
/// Spin-loop iterations attempted before a barrier-waiting thread yields to
/// the OS scheduler.
const SPIN_ITERATIONS: u32 = 100;

/// Execution strategy for [`FloydWarshallOptimized::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloydWarshallConfig {
    /// Use the row-parallel barrier-per-k solve when `size > 64`.
    pub parallel: bool,
    /// Use the 4-lane SIMD body (single-threaded if `parallel` is false or
    /// `size <= 64`).
    pub simd: bool,
}

/// The flat-array, SIMD/row-parallel all-pairs shortest-path engine.
pub struct FloydWarshallOptimized {
    n: usize,
    dist: Vec<u32>,
    next: Vec<u32>,
    config: FloydWarshallConfig,
    id_to_idx: SparseSet<u32, u32>,
    idx_to_id: SparseSet<u32, u32>,
}

impl FloydWarshallOptimized {
    /// Allocates a solver over `n` nodes with the given execution strategy.
    #[must_use]
    pub fn new(n: usize, config: FloydWarshallConfig) -> Self {
        let mut solver = Self {
            n,
            dist: Vec::new(),
            next: Vec::new(),
            config,
            id_to_idx: SparseSet::init(n, n),
            idx_to_id: SparseSet::init(n, n),
        };
        solver.clean();
        solver
    }

    /// Resizes to `n` nodes. Reallocates only if `n` exceeds the current
    /// matrix capacity; otherwise reuses the existing buffers.
    pub fn resize(&mut self, n: usize) {
        self.n = n;
        if self.dist.len() < n * n {
            self.dist = vec![INF; n * n];
            self.next = vec![0u32; n * n];
        }
        self.id_to_idx = SparseSet::init(n, n);
        self.idx_to_id = SparseSet::init(n, n);
        self.clean();
    }

    /// Resets `dist`/`next` to the identity state over the current `n`,
    /// reusing the backing allocation when it is already large enough.
    pub fn clean(&mut self) {
        let n = self.n;
        if self.dist.len() < n * n {
            self.dist = vec![INF; n * n];
            self.next = vec![0u32; n * n];
        } else {
            self.dist[..n * n].fill(INF);
        }
        for i in 0..n {
            self.dist[i * n + i] = 0;
            for j in 0..n {
                self.next[i * n + j] = j as u32;
            }
        }
    }

    /// Registers a bidirectional id↔index mapping.
    pub fn map_entity(&mut self, id: u32, idx: u32) -> CoreResult<()> {
        self.id_to_idx.put(id, idx)?;
        self.idx_to_id.put(idx, id)?;
        Ok(())
    }

    /// Looks up the index mapped to `id`.
    #[must_use]
    pub fn idx_for_id(&self, id: u32) -> Option<u32> {
        self.id_to_idx.get(id).copied()
    }

    /// Looks up the id mapped to `idx`.
    #[must_use]
    pub fn id_for_idx(&self, idx: u32) -> Option<u32> {
        self.idx_to_id.get(idx).copied()
    }

    /// Sets a directed edge weight `i -> j`.
    pub fn add_edge(&mut self, i: usize, j: usize, weight: u32) {
        self.dist[i * self.n + j] = weight;
    }

    /// The settled distance from `i` to `j`, or `None` if unreachable.
    #[must_use]
    pub fn value(&self, i: usize, j: usize) -> Option<u32> {
        let d = self.dist[i * self.n + j];
        (d < INF || i == j).then_some(d)
    }

    /// The first hop on the shortest path from `i` to `j`.
    #[must_use]
    pub fn next(&self, i: usize, j: usize) -> u32 {
        self.next[i * self.n + j]
    }

    /// [`FloydWarshallOptimized::next`] translated through the id↔index
    /// mapping.
    #[must_use]
    pub fn next_with_mapping(&self, u: u32, v: u32) -> Option<u32> {
        let i = self.idx_for_id(u)?;
        let j = self.idx_for_id(v)?;
        let hop_idx = self.next(i as usize, j as usize);
        self.id_for_idx(hop_idx)
    }

    /// Appends ids from `u` to `v` (inclusive) by following
    /// [`FloydWarshallOptimized::next_with_mapping`]. On failure `buf` is
    /// truncated back to its length on entry.
    pub fn set_path_with_mapping(&self, buf: &mut Vec<u32>, u: u32, v: u32) -> CoreResult<()> {
        let start_len = buf.len();
        let mut current = u;
        buf.push(current);
        while current != v {
            match self.next_with_mapping(current, v) {
                Some(next_id) => current = next_id,
                None => {
                    buf.truncate(start_len);
                    return Err(CoreError::PathNotFound);
                }
            }
        }
        Ok(())
    }

    /// Runs the relaxation, dispatching to scalar, single-thread SIMD, or
    /// row-parallel SIMD according to `config` and `n`.
    pub fn generate(&mut self) {
        let n = self.n;
        if n > PARALLEL_THRESHOLD && self.config.parallel {
            if self.generate_parallel().is_ok() {
                return;
            }
            // Thread spawn or counter allocation failed; fall back.
        }
        if self.config.simd {
            Self::generate_simd_range(&mut self.dist, &mut self.next, n, 0, n);
        } else {
            Self::generate_scalar_range(&mut self.dist, &mut self.next, n, 0, n);
        }
    }

    fn generate_scalar_range(dist: &mut [u32], next: &mut [u32], n: usize, row_lo: usize, row_hi: usize) {
        for k in 0..n {
            for i in row_lo..row_hi {
                let dik = dist[i * n + k];
                if dik == INF {
                    continue;
                }
                for j in 0..n {
                    let dkj = dist[k * n + j];
                    if dkj == INF {
                        continue;
                    }
                    let candidate = dik.saturating_add(dkj);
                    if candidate < dist[i * n + j] {
                        dist[i * n + j] = candidate;
                        next[i * n + j] = next[i * n + k];
                    }
                }
            }
        }
    }

    /// 4-lane SIMD relaxation of row `i` against pivot `k`. Ties (`new ==
    /// existing`) keep the existing value and next-hop, matching the
    /// scalar tie-break.
    fn relax_row_simd(dist: &mut [u32], next: &mut [u32], n: usize, k: usize, i: usize) {
        let dik = dist[i * n + k];
        if dik == INF {
            return;
        }
        let next_ik = next[i * n + k];
        let row_base = i * n;
        let pivot_base = k * n;

        let mut j = 0;
        while j + LANES <= n {
            for lane in 0..LANES {
                let dkj = dist[pivot_base + j + lane];
                if dkj == INF {
                    continue;
                }
                let candidate = dik.saturating_add(dkj);
                if candidate < dist[row_base + j + lane] {
                    dist[row_base + j + lane] = candidate;
                    next[row_base + j + lane] = next_ik;
                }
            }
            j += LANES;
        }
        while j < n {
            let dkj = dist[pivot_base + j];
            if dkj != INF {
                let candidate = dik.saturating_add(dkj);
                if candidate < dist[row_base + j] {
                    dist[row_base + j] = candidate;
                    next[row_base + j] = next_ik;
                }
            }
            j += 1;
        }
    }

    fn generate_simd_range(dist: &mut [u32], next: &mut [u32], n: usize, row_lo: usize, row_hi: usize) {
        for k in 0..n {
            for i in row_lo..row_hi {
                Self::relax_row_simd(dist, next, n, k, i);
            }
        }
    }

    /// Barrier-per-k parallel solve: rows are partitioned evenly among
    /// `min(cpu_count, n)` persistent threads; each thread spins (then
    /// yields) on a per-row atomic counter until row `k` has been fully
    /// written by its owner before using it as the "through" row.
    fn generate_parallel(&mut self) -> Result<(), ()> {
        let n = self.n;
        let thread_count = std::thread::available_parallelism().map(|p| p.get()).unwrap_or(1).min(n).max(1);

        let mut counters = Vec::new();
        counters.try_reserve(n + 1).map_err(|_| ())?;
        counters.resize_with(n + 1, || AtomicU32::new(0));
        counters[0].store(thread_count as u32, Ordering::Relaxed);

        let base_rows = n / thread_count;
        let extra_rows = n % thread_count;
        let mut ranges = Vec::with_capacity(thread_count);
        let mut start = 0usize;
        for t in 0..thread_count {
            let rows = base_rows + usize::from(t < extra_rows);
            ranges.push((start, start + rows));
            start += rows;
        }

        let dist = &mut self.dist[..n * n];
        let next = &mut self.next[..n * n];
        let dist_ptr = dist.as_mut_ptr() as usize;
        let next_ptr = next.as_mut_ptr() as usize;
        let counters = &counters;

        std::thread::scope(|scope| {
            for &(row_lo, row_hi) in &ranges {
                scope.spawn(move || {
                    // SAFETY: each row index belongs to exactly one thread's
                    // range, and the barrier below ensures no thread reads
                    // row k until its owner has finished writing it for
                    // this k, so these aliasing raw slices never race.
                    let dist = unsafe { std::slice::from_raw_parts_mut(dist_ptr as *mut u32, n * n) };
                    let next = unsafe { std::slice::from_raw_parts_mut(next_ptr as *mut u32, n * n) };

                    for k in 0..n {
                        wait_for_barrier(&counters[k], thread_count as u32);
                        for i in row_lo..row_hi {
                            Self::relax_row_simd(dist, next, n, k, i);
                        }
                        if (row_lo..row_hi).contains(&k) {
                            counters[k + 1].fetch_add(thread_count as u32, Ordering::Release);
                        }
                    }
                });
            }
        });

        Ok(())
    }
}

fn wait_for_barrier(counter: &AtomicU32, target: u32) {
    for _ in 0..SPIN_ITERATIONS {
        if counter.load(Ordering::Acquire) >= target {
            return;
        }
        std::hint::spin_loop();
    }
    while counter.load(Ordering::Acquire) < target {
        std::thread::yield_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floyd_warshall::FloydWarshall;

    fn build(n: usize, config: FloydWarshallConfig) -> FloydWarshallOptimized {
        FloydWarshallOptimized::new(n, config)
    }

    #[test]
    fn scenario_e_scalar_path() {
        let mut fw = build(4, FloydWarshallConfig { parallel: false, simd: false });
        fw.add_edge(0, 1, 1);
        fw.add_edge(1, 2, 1);
        fw.add_edge(2, 3, 1);
        fw.add_edge(0, 3, 10);
        for i in 0..4u32 {
            fw.map_entity(100 + i, i).unwrap();
        }
        fw.generate();

        assert_eq!(fw.value(0, 3), Some(3));
        let mut path = Vec::new();
        fw.set_path_with_mapping(&mut path, 100, 103).unwrap();
        assert_eq!(path, vec![100, 101, 102, 103]);
    }

    #[test]
    fn simd_and_scalar_agree_on_a_random_graph() {
        let n = 17;
        let edges: Vec<(usize, usize, u32)> = (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter(|&(i, j)| i != j)
            .map(|(i, j)| (i, j, ((i * 7 + j * 13 + 3) % 23) as u32))
            .collect();

        let mut scalar: FloydWarshall<u32> = FloydWarshall::init(n);
        let mut simd = build(n, FloydWarshallConfig { parallel: false, simd: true });
        for &(i, j, w) in &edges {
            scalar.add_edge(i, j, w);
            simd.add_edge(i, j, w);
        }
        scalar.generate();
        simd.generate();

        for i in 0..n {
            for j in 0..n {
                assert_eq!(scalar.value(i, j), simd.value(i, j), "mismatch at ({i}, {j})");
            }
        }
    }

    #[test]
    fn parallel_and_scalar_agree_on_a_larger_graph() {
        let n = 80;
        let mut scalar: FloydWarshall<u32> = FloydWarshall::init(n);
        let mut parallel = build(n, FloydWarshallConfig { parallel: true, simd: true });
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let w = ((i * 31 + j * 17 + 5) % 41) as u32;
                scalar.add_edge(i, j, w);
                parallel.add_edge(i, j, w);
            }
        }
        scalar.generate();
        parallel.generate();

        for i in 0..n {
            for j in 0..n {
                assert_eq!(scalar.value(i, j), parallel.value(i, j), "mismatch at ({i}, {j})");
            }
        }
    }

    #[test]
    fn saturating_add_clamps_at_inf() {
        // (MAX - 1) + (MAX - 1) saturates to MAX, which collides with the
        // INF sentinel itself — the path is treated as unreachable, not as
        // a path of length MAX.
        let mut fw = build(3, FloydWarshallConfig::default());
        fw.add_edge(0, 1, u32::MAX - 1);
        fw.add_edge(1, 2, u32::MAX - 1);
        fw.generate();
        assert_eq!(fw.value(0, 2), None);
    }
}
