/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Serializable types for canvas snapshots.
//!
//! Nodes are always stored as an ordered list of `[id, attributes]` pairs so
//! the back-to-front order survives a round trip through JSON.

use serde::{Deserialize, Serialize};

use crate::graph::node::NodeId;

/// Persisted node attributes. Renderer bookkeeping is never written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedNode {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub url: String,
    pub title: String,
    pub session_id: String,
    pub selected: bool,
}

impl Default for PersistedNode {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: crate::graph::node::DEFAULT_NODE_WIDTH,
            height: crate::graph::node::DEFAULT_NODE_HEIGHT,
            url: String::new(),
            title: String::new(),
            session_id: String::new(),
            selected: false,
        }
    }
}

/// The node store, in paint order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub nodes: Vec<(NodeId, PersistedNode)>,
}

/// A named workspace as handed to and from the persistence transport.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<(NodeId, PersistedNode)>,
}

impl WorkspaceSnapshot {
    pub fn new(name: impl Into<String>, store: StoreSnapshot) -> Self {
        Self {
            name: name.into(),
            nodes: store.nodes,
        }
    }

    pub fn into_store_snapshot(self) -> (String, StoreSnapshot) {
        (self.name, StoreSnapshot { nodes: self.nodes })
    }
}
