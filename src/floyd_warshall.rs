//! `FloydWarshall<W>` — a dense all-pairs shortest-path engine with path
//! reconstruction and an id↔index entity mapping.
//!
//! This is the scalar baseline; [`crate::floyd_warshall_optimized`] carries
//! the same semantics over a flat `u32` matrix with SIMD and row-parallel
//! dispatch.

use num_traits::Zero;

use crate::error::{CoreError, CoreResult};
use crate::numeric::PositiveInteger;
use crate::sparse_set::SparseSet;

/// Dense all-pairs shortest-path solver over `n` nodes with weight type `W`.
pub struct FloydWarshall<W> {
    n: usize,
    dist: Vec<W>,
    next: Vec<u32>,
    id_to_idx: SparseSet<u32, u32>,
    idx_to_id: SparseSet<u32, u32>,
}

impl<W: PositiveInteger + Zero> FloydWarshall<W> {
    /// Allocates a solver over `n` nodes. Equivalent to `init` followed
    /// immediately by `clean`.
    #[must_use]
    pub fn init(n: usize) -> Self {
        let mut solver = Self {
            n,
            dist: Vec::new(),
            next: Vec::new(),
            id_to_idx: SparseSet::init(n, n),
            idx_to_id: SparseSet::init(n, n),
        };
        solver.clean();
        solver
    }

    /// Resizes the solver to `n` nodes and re-initializes it, as if freshly
    /// constructed with `init(n)`.
    pub fn resize(&mut self, n: usize) {
        self.n = n;
        self.id_to_idx = SparseSet::init(n, n);
        self.idx_to_id = SparseSet::init(n, n);
        self.clean();
    }

    /// Resets `dist` to `dist[i][i] = 0`, everywhere else `INF`, and `next`
    /// to `next[i][j] = j`. Reuses the existing matrix allocation when it is
    /// already large enough for `n`.
    pub fn clean(&mut self) {
        let n = self.n;
        if self.dist.len() < n * n {
            self.dist = vec![W::max_value(); n * n];
            self.next = vec![0u32; n * n];
        } else {
            self.dist[..n * n].fill(W::max_value());
        }
        for i in 0..n {
            self.dist[i * n + i] = W::zero();
            for j in 0..n {
                self.next[i * n + j] = j as u32;
            }
        }
    }

    /// Registers a bidirectional id↔index mapping for entity `id` at index
    /// `idx`.
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

    /// Sets a directed edge weight `i -> j`. Weights are overwritten, not
    /// accumulated; call twice for an undirected edge.
    pub fn add_edge(&mut self, i: usize, j: usize, weight: W) {
        self.dist[i * self.n + j] = weight;
    }

    /// Runs the Floyd–Warshall relaxation, with saturating addition clamped
    /// at `INF = W::max_value()` and source-/destination-side pruning on
    /// already-unreachable pairs.
    pub fn generate(&mut self) {
        let n = self.n;
        let inf = W::max_value();
        for k in 0..n {
            for i in 0..n {
                let dik = self.dist[i * n + k];
                if dik >= inf {
                    continue;
                }
                for j in 0..n {
                    let dkj = self.dist[k * n + j];
                    if dkj >= inf {
                        continue;
                    }
                    let candidate = dik.saturating_add(&dkj);
                    if candidate < self.dist[i * n + j] {
                        self.dist[i * n + j] = candidate;
                        self.next[i * n + j] = self.next[i * n + k];
                    }
                }
            }
        }
    }

    /// The settled distance from `i` to `j`, or `None` if unreachable.
    #[must_use]
    pub fn value(&self, i: usize, j: usize) -> Option<W> {
        let d = self.dist[i * self.n + j];
        (d < W::max_value() || i == j).then_some(d)
    }

    /// The first hop on the shortest path from `i` to `j`.
    #[must_use]
    pub fn next(&self, i: usize, j: usize) -> u32 {
        self.next[i * self.n + j]
    }

    /// [`FloydWarshall::next`] translated through the id↔index mapping.
    #[must_use]
    pub fn next_with_mapping(&self, u: u32, v: u32) -> Option<u32> {
        let i = self.idx_for_id(u)?;
        let j = self.idx_for_id(v)?;
        let hop_idx = self.next(i as usize, j as usize);
        self.id_for_idx(hop_idx)
    }

    /// Appends ids from `u` to `v` (inclusive) by following
    /// [`FloydWarshall::next_with_mapping`]. On failure `buf` is truncated
    /// back to its length on entry.
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
}
