//! `AStar<W>` — a single-source shortest-path engine over an explicit
//! adjacency list, with pluggable heuristics and an entity↔internal-index
//! remapping layer.
//!
//! The open set is a `BinaryHeap` (a max-heap) of entries ordered by a
//! reversed `Ord` so the heap behaves as a min-heap on `f`-score — the same
//! trick used by the routing-server `astar.rs` reference's
//! `SmallestCostHolder` wrapper.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use num_traits::Zero;

use crate::geometry::Position;
use crate::numeric::PositiveInteger;
use crate::sparse_set::SparseSet;

/// "No parent" sentinel stored in `came_from`.
const NO_PARENT: u32 = u32::MAX;

/// Selects which heuristic `find_path` uses, unless a custom function has
/// been set via [`AStar::set_custom_heuristic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// `sqrt(dx^2 + dy^2)`.
    #[default]
    Euclidean,
    /// `|dx| + |dy|`.
    Manhattan,
    /// `max(|dx|, |dy|)`.
    Chebyshev,
    /// `max(dx, dy) + (sqrt(2) - 1) * min(dx, dy)`.
    Octile,
    /// Always `0`; reduces the search to Dijkstra's algorithm.
    Zero,
}

impl Heuristic {
    fn evaluate(self, from: Position, to: Position) -> f32 {
        let dx = (from.x - to.x).abs();
        let dy = (from.y - to.y).abs();
        match self {
            Heuristic::Euclidean => (dx * dx + dy * dy).sqrt(),
            Heuristic::Manhattan => dx + dy,
            Heuristic::Chebyshev => dx.max(dy),
            Heuristic::Octile => {
                const SQRT_2_MINUS_1: f32 = std::f32::consts::SQRT_2 - 1.0;
                dx.max(dy) + SQRT_2_MINUS_1 * dx.min(dy)
            }
            Heuristic::Zero => 0.0,
        }
    }
}

/// A user-supplied heuristic function, overriding the [`Heuristic`] tag
/// until cleared by setting a new tag.
pub type HeuristicFn = Box<dyn Fn(Position, Position) -> f32>;

/// Reversed-`Ord` heap entry: `BinaryHeap` is a max-heap, so comparing by
/// the *smaller* `f`-score first makes `pop()` return the minimum.
struct OpenEntry {
    node: u32,
    f_score: f32,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}
impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_score.total_cmp(&self.f_score)
    }
}

/// A directed, weighted adjacency-list graph searched with A*.
pub struct AStar<W> {
    n: usize,
    adjacency: Vec<Vec<(u32, W)>>,
    positions: SparseSet<u32, Position>,
    id_to_idx: SparseSet<u32, u32>,
    idx_to_id: SparseSet<u32, u32>,
    heuristic: Heuristic,
    custom_heuristic: Option<HeuristicFn>,
}

impl<W: PositiveInteger + Zero> AStar<W> {
    /// Allocates a graph over `n` nodes with empty adjacency.
    #[must_use]
    pub fn init(n: usize) -> Self {
        Self {
            n,
            adjacency: vec![Vec::new(); n],
            positions: SparseSet::init(n, n),
            id_to_idx: SparseSet::init(n, n),
            idx_to_id: SparseSet::init(n, n),
            heuristic: Heuristic::default(),
            custom_heuristic: None,
        }
    }

    /// Selects a built-in heuristic and clears any custom function.
    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = heuristic;
        self.custom_heuristic = None;
    }

    /// Installs a custom heuristic function, overriding the `Heuristic` tag
    /// until a new tag is set.
    pub fn set_custom_heuristic(&mut self, f: HeuristicFn) {
        self.custom_heuristic = Some(f);
    }

    /// Adds a directed edge `from -> to` with `weight`.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: W) {
        self.adjacency[from].push((to as u32, weight));
    }

    /// Registers a bidirectional id↔index mapping for entity `id` at index
    /// `idx`.
    pub fn map_entity(&mut self, id: u32, idx: u32) -> crate::error::CoreResult<()> {
        self.id_to_idx.put(id, idx)?;
        self.idx_to_id.put(idx, id)?;
        Ok(())
    }

    /// Sets the position of node `idx`, used by the built-in heuristics.
    pub fn set_position(&mut self, idx: u32, position: Position) -> crate::error::CoreResult<()> {
        self.positions.put(idx, position)
    }

    /// Sets the position of entity `id` (translated to its internal index
    /// first). Returns `false` if `id` has no registered mapping.
    pub fn set_position_by_id(&mut self, id: u32, position: Position) -> bool {
        let Some(idx) = self.id_to_idx.get(id).copied() else {
            return false;
        };
        self.positions.put(idx, position).is_ok()
    }

    fn heuristic_value(&self, from_idx: usize, to_idx: usize) -> f32 {
        let (Some(&from), Some(&to)) = (self.positions.get(from_idx as u32), self.positions.get(to_idx as u32))
        else {
            return 0.0;
        };
        match &self.custom_heuristic {
            Some(f) => f(from, to),
            None => self.heuristic.evaluate(from, to),
        }
    }

    /// Finds a shortest path from `source` to `dest` (both internal node
    /// indices), appending the path (inclusive of both endpoints) to
    /// `out_path` in traversal order. Returns the total cost, or `None` if
    /// no path exists.
    pub fn find_path(&self, source: usize, dest: usize, out_path: &mut Vec<u32>) -> Option<W> {
        if source == dest {
            out_path.push(source as u32);
            return Some(W::zero());
        }

        let n = self.n;
        let mut g_score = vec![W::max_value(); n];
        let mut came_from = vec![NO_PARENT; n];
        let mut closed = vec![false; n];

        g_score[source] = W::zero();
        let mut open = BinaryHeap::new();
        open.push(OpenEntry { node: source as u32, f_score: self.heuristic_value(source, dest) });

        while let Some(OpenEntry { node: u, .. }) = open.pop() {
            let u = u as usize;
            if u == dest {
                let mut path = vec![dest as u32];
                let mut current = dest;
                while came_from[current] != NO_PARENT {
                    current = came_from[current] as usize;
                    path.push(current as u32);
                }
                path.reverse();
                out_path.extend(path);
                return Some(g_score[dest]);
            }
            if closed[u] {
                continue;
            }
            closed[u] = true;

            for &(v, weight) in &self.adjacency[u] {
                let v = v as usize;
                if closed[v] {
                    continue;
                }
                let tentative = g_score[u].saturating_add(&weight);
                if tentative < g_score[v] {
                    came_from[v] = u as u32;
                    g_score[v] = tentative;
                    let f = crate::numeric::to_usize(tentative) as f32 + self.heuristic_value(v, dest);
                    open.push(OpenEntry { node: v as u32, f_score: f });
                }
            }
        }

        None
    }

    /// Entity-mapped variant of [`AStar::find_path`]: `source`/`dest` and
    /// `out_path` entries are all ids rather than internal indices.
    pub fn find_path_with_mapping(&self, source_id: u32, dest_id: u32, out_path: &mut Vec<u32>) -> Option<W> {
        let source = self.id_to_idx.get(source_id).copied()? as usize;
        let dest = self.id_to_idx.get(dest_id).copied()? as usize;

        let mut idx_path = Vec::new();
        let cost = self.find_path(source, dest, &mut idx_path)?;
        for idx in idx_path {
            out_path.push(self.idx_to_id.get(idx).copied()?);
        }
        Some(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid4() -> AStar<u32> {
        // 0 - 1 - 2 - 3, a straight line with unit weights.
        let mut a: AStar<u32> = AStar::init(4);
        a.add_edge(0, 1, 1);
        a.add_edge(1, 2, 1);
        a.add_edge(2, 3, 1);
        for i in 0..4u32 {
            a.set_position(i, Position::new(i as f32, 0.0)).unwrap();
        }
        a
    }

    #[test]
    fn scenario_f_zero_heuristic_is_dijkstra() {
        let mut a = grid4();
        a.set_heuristic(Heuristic::Zero);
        let mut path = Vec::new();
        let cost = a.find_path(0, 3, &mut path).unwrap();
        assert_eq!(cost, 3);
        assert_eq!(path, vec![0, 1, 2, 3]);
    }

    #[test]
    fn octile_on_an_axis_aligned_path_matches_euclidean_and_manhattan() {
        // dy = 0 along the whole path, so octile's min(dx,dy) term is 0 and
        // it collapses to max(dx,dy) = dx, identical to both other metrics
        // on this axis-aligned graph — invariant 10's identity case.
        let mut a = grid4();
        a.set_heuristic(Heuristic::Octile);
        let mut octile_path = Vec::new();
        let octile_cost = a.find_path(0, 3, &mut octile_path).unwrap();

        let mut b = grid4();
        b.set_heuristic(Heuristic::Euclidean);
        let mut euclidean_path = Vec::new();
        let euclidean_cost = b.find_path(0, 3, &mut euclidean_path).unwrap();

        assert_eq!(octile_cost, euclidean_cost);
        assert_eq!(octile_path, euclidean_path);
    }

    #[test]
    fn same_source_and_dest_returns_zero_cost_singleton_path() {
        let a = grid4();
        let mut path = Vec::new();
        let cost = a.find_path(2, 2, &mut path).unwrap();
        assert_eq!(cost, 0);
        assert_eq!(path, vec![2]);
    }

    #[test]
    fn unreachable_dest_returns_none() {
        let mut a: AStar<u32> = AStar::init(3);
        a.add_edge(0, 1, 1);
        // node 2 has no incoming edge from the {0,1} component.
        let mut path = Vec::new();
        assert_eq!(a.find_path(0, 2, &mut path), None);
        assert!(path.is_empty());
    }

    #[test]
    fn entity_mapped_variant_round_trips_ids() {
        let mut a = grid4();
        for (id, idx) in [(100, 0), (101, 1), (102, 2), (103, 3)] {
            a.map_entity(id, idx).unwrap();
        }
        let mut path = Vec::new();
        let cost = a.find_path_with_mapping(100, 103, &mut path).unwrap();
        assert_eq!(cost, 3);
        assert_eq!(path, vec![100, 101, 102, 103]);
    }

    #[test]
    fn custom_heuristic_overrides_tag_until_retagged() {
        let mut a = grid4();
        a.set_heuristic(Heuristic::Manhattan);
        a.set_custom_heuristic(Box::new(|_, _| 0.0));
        let mut path = Vec::new();
        let cost = a.find_path(0, 3, &mut path).unwrap();
        assert_eq!(cost, 3);

        a.set_heuristic(Heuristic::Zero);
        assert!(a.custom_heuristic.is_none());
    }
}
