/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Node store for the spatial canvas.
//!
//! Core structures:
//! - `NodeStore`: ordered node records; the order is the back-to-front paint
//!   and hit-test order
//! - `Node`: one embedded page with its canvas rectangle and renderer state
//! - `arrange`: overlap-removing layout sweep over a subset of nodes

use std::collections::HashMap;

use euclid::default::{Point2D, Rect};

use crate::bridge::RequestId;
use crate::persistence::types::{PersistedNode, StoreSnapshot};

pub mod arrange;
pub mod node;
pub(crate) mod spatial_index;

use node::{Node, NodeId, NodeTemplate};
use spatial_index::NodeSpatialIndex;

/// Session used when a node is created without one.
pub const FALLBACK_SESSION_ID: &str = "default";

/// Hit-test padding for pointer presses.
pub const PRESS_HIT_PADDING: f64 = 5.0;
/// Hit-test padding for hover tracking.
pub const HOVER_HIT_PADDING: f64 = 10.0;

/// How [`NodeStore::restore`] treats the id counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdCounter {
    /// Never go below the current counter. Ids stay unique for the session.
    Keep,
    /// Start over from the largest id in the snapshot.
    Recompute,
}

#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    /// Back to front.
    nodes: Vec<Node>,

    /// Position of each node in `nodes`.
    index: HashMap<NodeId, usize>,

    /// Last numeric id handed out.
    id_counter: u64,

    /// Last renderer request id handed out. Survives `clear` and `restore`.
    request_counter: u64,

    selected: Option<NodeId>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes back to front.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.index.get(id).map(|&i| &mut self.nodes[i])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn frontmost(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub fn id_counter(&self) -> u64 {
        self.id_counter
    }

    /// Mark `id` as waiting on a new renderer request. Any answer to an
    /// earlier request for the node becomes stale.
    pub fn begin_request(&mut self, id: &NodeId) -> Option<(RequestId, &mut Node)> {
        let i = *self.index.get(id)?;
        self.request_counter += 1;
        let request = RequestId(self.request_counter);
        let node = &mut self.nodes[i];
        node.pending_request = Some(request);
        Some((request, node))
    }

    /// Insert a new node at `position` as the frontmost, selected node.
    pub fn add(&mut self, position: Point2D<f64>, template: NodeTemplate) -> NodeId {
        self.id_counter += 1;
        let id = NodeId::from_counter(self.id_counter);
        let session_id = template
            .session_id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_SESSION_ID.to_owned());
        let mut node = Node::new(id.clone(), position, session_id);
        if let Some(url) = template.url {
            node.url = url;
        }
        if let Some(title) = template.title {
            node.title = title;
        }
        if let Some(size) = template.size {
            node.resize_to(size);
        }

        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(node);
        self.select(Some(&id));
        id
    }

    /// Remove a node. Clears the selection when it was the selected node.
    pub fn remove(&mut self, id: &NodeId) -> Option<Node> {
        let position = self.index.remove(id)?;
        let node = self.nodes.remove(position);
        self.reindex_from(position);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Some(node)
    }

    /// Move a node to the back of the iteration order (frontmost on screen).
    /// Other nodes keep their relative order and fields.
    pub fn bring_to_front(&mut self, id: &NodeId) -> bool {
        let Some(&position) = self.index.get(id) else {
            return false;
        };
        if position + 1 == self.nodes.len() {
            return true;
        }
        let node = self.nodes.remove(position);
        self.nodes.push(node);
        self.reindex_from(position);
        true
    }

    /// Select exactly one node (or none) and bring it to the front.
    /// Returns `false` when `id` names a node that is not in the store, in
    /// which case the selection is cleared.
    pub fn select(&mut self, id: Option<&NodeId>) -> bool {
        for node in &mut self.nodes {
            node.selected = false;
        }
        self.selected = None;
        let Some(id) = id else {
            return true;
        };
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        node.selected = true;
        self.selected = Some(id.clone());
        self.bring_to_front(id)
    }

    /// Frontmost node whose padded bounds (content plus title strip) contain
    /// the canvas point.
    pub fn hit_test(&self, point: Point2D<f64>, padding: f64) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|node| node.hit(point, padding))
            .map(|node| node.id.clone())
    }

    /// Nodes whose bounds intersect `rect` (edges included), in store order.
    pub fn visible_set(&self, rect: &Rect<f64>) -> Vec<NodeId> {
        let index = NodeSpatialIndex::build(
            self.nodes
                .iter()
                .enumerate()
                .map(|(i, node)| (i, node.bounds())),
        );
        index
            .intersecting(rect)
            .into_iter()
            .map(|i| self.nodes[i].id.clone())
            .collect()
    }

    pub fn content_rects(&self) -> impl Iterator<Item = Rect<f64>> + '_ {
        self.nodes.iter().map(Node::content_rect)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.selected = None;
        self.id_counter = 0;
    }

    /// Serialize the store, renderer bookkeeping stripped.
    pub fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            nodes: self
                .nodes
                .iter()
                .map(|node| {
                    (
                        node.id.clone(),
                        PersistedNode {
                            x: node.position.x,
                            y: node.position.y,
                            width: node.size.width,
                            height: node.size.height,
                            url: node.url.clone(),
                            title: node.title.clone(),
                            session_id: node.session_id.clone(),
                            selected: node.selected,
                        },
                    )
                })
                .collect(),
        }
    }

    /// Replace the contents wholesale, preserving snapshot order. The id
    /// counter resumes after the largest `node_<n>` id, or after the current
    /// counter when that is higher and `counter` is [`IdCounter::Keep`]. The
    /// selection is cleared. Duplicate ids keep their first occurrence.
    pub fn restore(&mut self, snapshot: &StoreSnapshot, counter: IdCounter) {
        let previous_counter = self.id_counter;
        self.clear();
        for (id, persisted) in &snapshot.nodes {
            if self.index.contains_key(id) {
                continue;
            }
            let session_id = if persisted.session_id.trim().is_empty() {
                FALLBACK_SESSION_ID.to_owned()
            } else {
                persisted.session_id.clone()
            };
            let mut node = Node::new(
                id.clone(),
                Point2D::new(persisted.x, persisted.y),
                session_id,
            );
            node.resize_to(euclid::default::Size2D::new(persisted.width, persisted.height));
            node.url = persisted.url.clone();
            node.title = persisted.title.clone();
            self.index.insert(id.clone(), self.nodes.len());
            self.nodes.push(node);
        }
        let largest = self
            .nodes
            .iter()
            .filter_map(|n| n.id.counter_value())
            .max()
            .unwrap_or(0);
        self.id_counter = match counter {
            IdCounter::Keep => largest.max(previous_counter),
            IdCounter::Recompute => largest,
        };
    }

    fn reindex_from(&mut self, start: usize) {
        for (i, node) in self.nodes.iter().enumerate().skip(start) {
            self.index.insert(node.id.clone(), i);
        }
    }
}
