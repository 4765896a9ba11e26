//! `SweepAndPrune<Id>` — a sort-and-sweep broad-phase collision detector
//! over axis-aligned boxes.
//!
//! Boxes are kept in a flat `Vec`; a reused scratch buffer of indices is
//! sorted by minimum X before each sweep, so repeated `find_collisions`
//! calls do not reallocate.

use crate::geometry::{Aabb, CollisionPair, Position, Rectangle};

/// A sort-and-sweep broad-phase index over axis-aligned boxes.
pub struct SweepAndPrune<Id> {
    boxes: Vec<Aabb<Id>>,
    sorted_indices: Vec<u32>,
}

impl<Id: Copy + PartialEq + Ord> SweepAndPrune<Id> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            boxes: Vec::new(),
            sorted_indices: Vec::new(),
        }
    }

    /// Creates an empty index with storage pre-allocated for `capacity` boxes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            boxes: Vec::with_capacity(capacity),
            sorted_indices: Vec::with_capacity(capacity),
        }
    }

    /// Number of boxes currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether no boxes are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Adds a box for `id`. Does not check for an existing box with the
    /// same id; callers that need upsert semantics should `remove` first.
    pub fn add(&mut self, id: Id, center: Position, half_width: f32, half_height: f32) {
        self.boxes.push(Aabb::new(id, center, half_width, half_height));
    }

    /// Removes the first box matching `id` by linear scan and swap-removal.
    /// Returns whether a box was removed.
    pub fn remove(&mut self, id: Id) -> bool {
        if let Some(pos) = self.boxes.iter().position(|b| b.id == id) {
            self.boxes.swap_remove(pos);
            true
        } else {
            false
        }
    }

    /// Updates the center of the first box matching `id`. Returns whether a
    /// box was found.
    pub fn update_position(&mut self, id: Id, new_center: Position) -> bool {
        if let Some(b) = self.boxes.iter_mut().find(|b| b.id == id) {
            b.center = new_center;
            true
        } else {
            false
        }
    }

    /// Finds every pair of overlapping boxes via a 1D sweep along X, using
    /// the strict `Aabb::overlaps` test to confirm full-axis overlap for
    /// every pair whose X extents overlap.
    ///
    /// Re-sorts the reused `sorted_indices` scratch buffer by minimum X each
    /// call rather than maintaining incremental order, trading re-sort cost
    /// for simplicity — a reasonable trade given the spec does not mandate
    /// incremental resorting.
    pub fn find_collisions(&mut self) -> Vec<CollisionPair<Id>> {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.boxes.len() as u32);
        self.sorted_indices
            .sort_unstable_by(|&a, &b| self.boxes[a as usize].min_x().total_cmp(&self.boxes[b as usize].min_x()));

        let mut pairs = Vec::new();
        for (i, &a_idx) in self.sorted_indices.iter().enumerate() {
            let a = &self.boxes[a_idx as usize];
            let a_max_x = a.max_x();
            for &b_idx in &self.sorted_indices[i + 1..] {
                let b = &self.boxes[b_idx as usize];
                if b.min_x() >= a_max_x {
                    // Every later box in sorted order has an even larger
                    // min X, so no further candidate can overlap `a` on X.
                    break;
                }
                if a.overlaps(b) {
                    pairs.push(CollisionPair::new(a.id, b.id));
                }
            }
        }
        pairs
    }

    /// Returns every box fully or partially contained in `range`, tested via
    /// strict rectangle/box overlap against `range` expanded to a
    /// zero-half-extent `Aabb`-style box comparison.
    #[must_use]
    pub fn query_rect(&self, range: Rectangle) -> Vec<Id> {
        let range_center = Position::new(range.x + range.width / 2.0, range.y + range.height / 2.0);
        let range_half_w = range.width / 2.0;
        let range_half_h = range.height / 2.0;
        let probe = Aabb::new((), range_center, range_half_w, range_half_h);
        self.boxes
            .iter()
            .filter(|b| {
                let other = Aabb::new((), b.center, b.half_width, b.half_height);
                probe.overlaps(&other)
            })
            .map(|b| b.id)
            .collect()
    }

    /// Returns every box whose closest point lies within `radius` of
    /// `center`, via coordinate clamping against each box rather than a
    /// center-to-center distance.
    #[must_use]
    pub fn query_radius(&self, center: Position, radius: f32) -> Vec<Id> {
        let radius_sq = radius * radius;
        self.boxes
            .iter()
            .filter(|b| b.distance_squared_to_point(center) <= radius_sq)
            .map(|b| b.id)
            .collect()
    }
}

impl<Id: Copy + PartialEq + Ord> Default for SweepAndPrune<Id> {
    fn default() -> Self {
        Self::new()
    }
}
