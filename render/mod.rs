/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Draw list for the canvas.
//!
//! [`build_frame`] is a pure function of the store and viewport: it never
//! mutates either, so a host can call it as often as it likes. Painting the
//! items is the host's job.

use std::path::PathBuf;

use euclid::default::Rect;

use crate::graph::NodeStore;
use crate::graph::node::{NodeId, Placeholder};
use crate::viewport::Viewport;

/// What to paint in a node's content area.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeSurface {
    /// No URL configured yet.
    Empty,
    Loading,
    LoadFailed { description: String },
    /// The host paints the live view on top.
    Live,
    /// Cached screenshot in place of the live view.
    Preview(PathBuf),
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeDrawItem {
    pub id: NodeId,
    /// Screen-space rectangles.
    pub content_rect: Rect<f64>,
    pub frame_rect: Rect<f64>,
    pub title_rect: Rect<f64>,
    pub show_title: bool,
    pub title: String,
    pub selected: bool,
    pub hovered: bool,
    pub surface: NodeSurface,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Back to front.
    pub nodes: Vec<NodeDrawItem>,
}

pub fn build_frame(
    store: &NodeStore,
    viewport: &Viewport,
    hovered: Option<&NodeId>,
    node_padding: f64,
) -> Frame {
    let scale = viewport.scale();
    let nodes = store
        .visible_set(&viewport.visible_canvas_rect())
        .into_iter()
        .filter_map(|id| store.get(&id))
        .map(|node| {
            let content_rect = viewport.canvas_rect_to_screen(node.content_rect());
            let is_hovered = hovered == Some(&node.id);
            let surface = match (&node.preview, &node.placeholder) {
                (Some(path), _) => NodeSurface::Preview(path.clone()),
                _ if !node.has_url() => NodeSurface::Empty,
                (None, Some(Placeholder::LoadFailed { description, .. })) => {
                    NodeSurface::LoadFailed {
                        description: description.clone(),
                    }
                },
                (None, Some(Placeholder::Loading)) => NodeSurface::Loading,
                (None, None) if node.renderer.is_some() => NodeSurface::Live,
                (None, None) => NodeSurface::Loading,
            };
            NodeDrawItem {
                id: node.id.clone(),
                content_rect,
                frame_rect: content_rect.inflate(node_padding * scale, node_padding * scale),
                title_rect: viewport.canvas_rect_to_screen(node.title_strip_rect()),
                show_title: node.selected || is_hovered || node.has_url(),
                title: if node.title.is_empty() {
                    node.url.clone()
                } else {
                    node.title.clone()
                },
                selected: node.selected,
                hovered: is_hovered,
                surface,
            }
        })
        .collect();
    Frame { nodes }
}
