/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Spatial index for viewport culling.
//!
//! Nodes are indexed by their canvas-space bounds (content plus title strip)
//! so the visibility pass can use an R*-tree range query instead of testing
//! every node against the viewport.

use euclid::default::Rect;
use rstar::{AABB, RTree, RTreeObject};

/// A node entry stored in the R*-tree. `order` is the node's position in the
/// store at build time.
struct IndexedNode {
    envelope: AABB<[f64; 2]>,
    order: usize,
}

impl RTreeObject for IndexedNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn aabb(rect: &Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.min_x(), rect.min_y()], [rect.max_x(), rect.max_y()])
}

pub(crate) struct NodeSpatialIndex {
    tree: RTree<IndexedNode>,
}

impl NodeSpatialIndex {
    /// Build the index from `(store_position, bounds)` pairs.
    pub fn build(nodes: impl Iterator<Item = (usize, Rect<f64>)>) -> Self {
        let entries: Vec<_> = nodes
            .map(|(order, bounds)| IndexedNode {
                envelope: aabb(&bounds),
                order,
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Store positions of every node whose bounds intersect `rect`, edges
    /// included, in ascending store order.
    pub fn intersecting(&self, rect: &Rect<f64>) -> Vec<usize> {
        let mut found: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&aabb(rect))
            .map(|n| n.order)
            .collect();
        found.sort_unstable();
        found
    }
}
