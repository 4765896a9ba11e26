//! Spatial-indexing, collision-detection, and graph-pathfinding primitives
//! for a 2D simulation/game runtime.
//!
//! Every container here is a leaf or near-leaf in the crate's own
//! dependency order: [`geometry`] and [`numeric`] are assumed primitives;
//! [`sparse_set`] builds on nothing but `numeric`; everything else builds on
//! one or both of those.
//!
//! ```text
//! geometry, numeric -> sparse_set -> { zindex_buckets, quadtree,
//!     sweep_and_prune, floyd_warshall, floyd_warshall_optimized, astar }
//! ```

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub mod astar;
pub mod error;
pub mod floyd_warshall;
pub mod floyd_warshall_optimized;
pub mod geometry;
pub mod numeric;
pub mod quadtree;
pub mod sparse_set;
pub mod sweep_and_prune;
pub mod zindex_buckets;

/// Re-exports the crate's full public surface for the common `use
/// simcore::prelude::*;` import.
pub mod prelude {
    pub use crate::astar::{AStar, Heuristic, HeuristicFn};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::floyd_warshall::FloydWarshall;
    pub use crate::floyd_warshall_optimized::{FloydWarshallConfig, FloydWarshallOptimized};
    pub use crate::geometry::{Aabb, CollisionPair, EntityPoint, Position, PositionI, Rectangle};
    pub use crate::numeric::PositiveInteger;
    pub use crate::quadtree::QuadTree;
    pub use crate::sparse_set::SparseSet;
    pub use crate::sweep_and_prune::SweepAndPrune;
    pub use crate::zindex_buckets::ZIndexBuckets;
}
