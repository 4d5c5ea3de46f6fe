/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Node record and its title-strip chrome geometry.
//!
//! All geometry here is in canvas units. The title strip sits above the
//! content rectangle, separated by a small margin:
//!
//! ```text
//!   y - 33  +--(o)- title ----------- [R] [X]--+
//!           |                                  |   TITLE_HEIGHT
//!   y - 8   +----------------------------------+
//!                                                  TITLE_MARGIN
//!   y       +----------------------------------+
//!           |             content              |
//!   y + h   +----------------------------------+
//! ```

use std::fmt;
use std::path::PathBuf;

use euclid::default::{Point2D, Rect, Size2D};
use serde::{Deserialize, Serialize};

use crate::bridge::{RendererId, RequestId};

pub const DEFAULT_NODE_WIDTH: f64 = 600.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 400.0;
/// Canonical size floor for every resize path.
pub const MIN_NODE_SIZE: f64 = 100.0;
pub const TITLE_HEIGHT: f64 = 25.0;
pub const TITLE_MARGIN: f64 = 8.0;
/// Distance from the content top edge to the top of the title strip.
pub const TITLE_STRIP_OFFSET: f64 = TITLE_HEIGHT + TITLE_MARGIN;
pub const LOGO_OFFSET_X: f64 = 15.0;
pub const LOGO_RADIUS: f64 = 5.0;
pub const BUTTON_SIZE: f64 = 16.0;
pub const BUTTON_MARGIN: f64 = 4.0;

/// Stable node identifier of the form `node_<n>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn from_counter(n: u64) -> Self {
        Self(format!("node_{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of a `node_<n>` id, if it has one.
    pub fn counter_value(&self) -> Option<u64> {
        self.0.strip_prefix("node_")?.parse().ok()
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the content area shows while no live page is painted over it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placeholder {
    Loading,
    LoadFailed { code: i32, description: String },
}

/// Distinct press targets on a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRegion {
    Logo,
    RefreshButton,
    CloseButton,
    TitleStrip,
    Content,
}

/// Optional attributes for a new node. Missing fields fall back to defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeTemplate {
    pub url: Option<String>,
    pub title: Option<String>,
    pub session_id: Option<String>,
    pub size: Option<Size2D<f64>>,
}

impl NodeTemplate {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn from_node(node: &Node) -> Self {
        Self {
            url: Some(node.url.clone()),
            title: Some(node.title.clone()),
            session_id: Some(node.session_id.clone()),
            size: Some(node.size),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Top-left corner of the content rectangle.
    pub position: Point2D<f64>,
    pub size: Size2D<f64>,
    /// Empty means unconfigured; such a node never gets a renderer.
    pub url: String,
    pub title: String,
    pub session_id: String,
    pub selected: bool,
    /// Live renderer handle, once the host acknowledged creation.
    pub renderer: Option<RendererId>,
    /// Outstanding create or session request. Only its answer is applied.
    pub pending_request: Option<RequestId>,
    pub placeholder: Option<Placeholder>,
    /// Cached screenshot drawn instead of the live view.
    pub preview: Option<PathBuf>,
}

impl Node {
    pub fn new(id: NodeId, position: Point2D<f64>, session_id: String) -> Self {
        Self {
            id,
            position,
            size: Size2D::new(DEFAULT_NODE_WIDTH, DEFAULT_NODE_HEIGHT),
            url: String::new(),
            title: String::new(),
            session_id,
            selected: false,
            renderer: None,
            pending_request: None,
            placeholder: None,
            preview: None,
        }
    }

    pub fn renderer_pending(&self) -> bool {
        self.pending_request.is_some()
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    pub fn content_rect(&self) -> Rect<f64> {
        Rect::new(self.position, self.size)
    }

    pub fn title_strip_rect(&self) -> Rect<f64> {
        Rect::new(
            Point2D::new(self.position.x, self.position.y - TITLE_STRIP_OFFSET),
            Size2D::new(self.size.width, TITLE_HEIGHT),
        )
    }

    /// Content plus everything above it up to the top of the title strip.
    pub fn bounds(&self) -> Rect<f64> {
        self.padded_bounds(0.0)
    }

    /// [`Node::bounds`] grown by `padding` on every side.
    pub fn padded_bounds(&self, padding: f64) -> Rect<f64> {
        Rect::new(
            Point2D::new(
                self.position.x - padding,
                self.position.y - padding - TITLE_STRIP_OFFSET,
            ),
            Size2D::new(
                self.size.width + padding * 2.0,
                self.size.height + padding * 2.0 + TITLE_STRIP_OFFSET,
            ),
        )
    }

    /// Inclusive containment test used by hit-testing.
    pub fn hit(&self, point: Point2D<f64>, padding: f64) -> bool {
        contains_inclusive(&self.padded_bounds(padding), point)
    }

    pub fn logo_center(&self) -> Point2D<f64> {
        Point2D::new(
            self.position.x + LOGO_OFFSET_X,
            self.position.y - TITLE_HEIGHT / 2.0 - TITLE_MARGIN,
        )
    }

    pub fn refresh_button_rect(&self) -> Rect<f64> {
        self.button_rect(self.position.x + self.size.width - (BUTTON_SIZE + BUTTON_MARGIN) * 2.0)
    }

    pub fn close_button_rect(&self) -> Rect<f64> {
        self.button_rect(self.position.x + self.size.width - BUTTON_SIZE)
    }

    fn button_rect(&self, x: f64) -> Rect<f64> {
        let y = self.position.y - TITLE_STRIP_OFFSET + (TITLE_HEIGHT - BUTTON_SIZE) / 2.0;
        Rect::new(Point2D::new(x, y), Size2D::new(BUTTON_SIZE, BUTTON_SIZE))
    }

    /// Classify a canvas point against the node chrome. The logo wins over
    /// the strip, and the buttons win over the drag strip. Points in the
    /// margin gap or outside the node return `None`.
    pub fn region_at(&self, point: Point2D<f64>) -> Option<NodeRegion> {
        if (point - self.logo_center()).length() <= LOGO_RADIUS {
            return Some(NodeRegion::Logo);
        }
        if contains_inclusive(&self.title_strip_rect(), point) {
            if contains_inclusive(&self.refresh_button_rect(), point) {
                return Some(NodeRegion::RefreshButton);
            }
            if contains_inclusive(&self.close_button_rect(), point) {
                return Some(NodeRegion::CloseButton);
            }
            return Some(NodeRegion::TitleStrip);
        }
        if contains_inclusive(&self.content_rect(), point) {
            return Some(NodeRegion::Content);
        }
        None
    }

    /// Resize from the south-east corner, never going below the size floor.
    pub fn resize_to(&mut self, size: Size2D<f64>) {
        self.size = Size2D::new(size.width.max(MIN_NODE_SIZE), size.height.max(MIN_NODE_SIZE));
    }

    /// Drop every field that only describes the live renderer.
    pub fn clear_renderer_state(&mut self) {
        self.renderer = None;
        self.pending_request = None;
        self.placeholder = None;
        self.preview = None;
    }
}

pub fn contains_inclusive(rect: &Rect<f64>, point: Point2D<f64>) -> bool {
    point.x >= rect.min_x() && point.x <= rect.max_x() && point.y >= rect.min_y() && point.y <= rect.max_y()
}

/// Axis-aligned intersection. Touching edges do not overlap.
pub fn overlap(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min_x() < b.max_x() && a.max_x() > b.min_x() && a.min_y() < b.max_y() && a.max_y() > b.min_y()
}
