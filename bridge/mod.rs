/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Boundary to the out-of-process content host.
//!
//! Requests go out through [`RendererBridge`] and never block. Results and
//! host notifications come back as [`BridgeEvent`]s on a channel, correlated
//! by node id. Create and session requests also carry a [`RequestId`] that
//! the host echoes back, so an answer to a superseded request is told apart
//! from the current one. By the time an event is drained the node may be
//! gone, so every consumer re-checks existence before applying it.

use std::fmt;
use std::path::PathBuf;

use crossbeam_channel::{Receiver, Sender, unbounded};
use euclid::default::Rect;

use crate::graph::node::NodeId;

pub mod recording;

/// Opaque handle for a live renderer instance, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RendererId(pub u64);

/// Correlates a create or session request with its answer. Allocated by
/// the node store and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CreateViewRequest {
    pub node_id: NodeId,
    pub request: RequestId,
    pub url: String,
    pub session_id: String,
    /// Rounded screen pixels.
    pub screen_bounds: Rect<i32>,
    pub canvas_bounds: Rect<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RefreshViewRequest {
    pub node_id: NodeId,
    /// Zero-sized when `visible` is false.
    pub screen_bounds: Rect<i32>,
    pub canvas_bounds: Rect<f64>,
    pub visible: bool,
    /// Page zoom that keeps content laid out at its intrinsic width.
    pub zoom_factor: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateSessionRequest {
    pub node_id: NodeId,
    pub request: RequestId,
    pub session_id: String,
    pub canvas_bounds: Rect<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeError {
    /// No view exists for the node (never created, or already destroyed).
    ViewNotFound,
    /// The host reported a failure.
    Host(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::ViewNotFound => write!(f, "view not found"),
            BridgeError::Host(e) => write!(f, "host error: {e}"),
        }
    }
}

impl std::error::Error for BridgeError {}

/// Responses and notifications delivered into the canvas core.
#[derive(Clone, Debug, PartialEq)]
pub enum BridgeEvent {
    ViewCreated {
        node_id: NodeId,
        request: RequestId,
        renderer: RendererId,
    },
    ViewCreateFailed {
        node_id: NodeId,
        request: RequestId,
        error: BridgeError,
    },
    ViewRefreshed {
        node_id: NodeId,
        result: Result<(), BridgeError>,
    },
    ScreenshotCaptured {
        node_id: NodeId,
        result: Result<PathBuf, BridgeError>,
    },
    /// The view was re-created under a new session.
    SessionUpdated {
        node_id: NodeId,
        request: RequestId,
        result: Result<RendererId, BridgeError>,
    },
    TitleChanged {
        node_id: NodeId,
        title: String,
    },
    LoadFailed {
        node_id: NodeId,
        code: i32,
        description: String,
    },
    PopupRequested {
        node_id: NodeId,
        url: String,
    },
}

impl BridgeEvent {
    pub fn node_id(&self) -> &NodeId {
        match self {
            BridgeEvent::ViewCreated { node_id, .. }
            | BridgeEvent::ViewCreateFailed { node_id, .. }
            | BridgeEvent::ViewRefreshed { node_id, .. }
            | BridgeEvent::ScreenshotCaptured { node_id, .. }
            | BridgeEvent::SessionUpdated { node_id, .. }
            | BridgeEvent::TitleChanged { node_id, .. }
            | BridgeEvent::LoadFailed { node_id, .. }
            | BridgeEvent::PopupRequested { node_id, .. } => node_id,
        }
    }

    /// The request this event answers, for create and session responses.
    pub fn request(&self) -> Option<RequestId> {
        match self {
            BridgeEvent::ViewCreated { request, .. }
            | BridgeEvent::ViewCreateFailed { request, .. }
            | BridgeEvent::SessionUpdated { request, .. } => Some(*request),
            _ => None,
        }
    }
}

pub type BridgeEventSender = Sender<BridgeEvent>;
pub type BridgeEventReceiver = Receiver<BridgeEvent>;

pub fn event_channel() -> (BridgeEventSender, BridgeEventReceiver) {
    unbounded()
}

/// Commands the canvas core issues to the content host. None of these
/// block; outcomes arrive later as [`BridgeEvent`]s.
pub trait RendererBridge {
    /// Create a view, or navigate the existing one for this node.
    fn create_view(&mut self, request: CreateViewRequest);

    /// Reposition or suspend a view. Safe on missing views.
    fn refresh_view(&mut self, request: RefreshViewRequest);

    fn reload_view(&mut self, node_id: &NodeId);

    fn destroy_view(&mut self, node_id: &NodeId);

    /// Destroy every view, returning how many were live.
    fn destroy_all_views(&mut self) -> usize;

    fn bring_to_front(&mut self, node_id: &NodeId);

    /// Toggle visibility of every view, or only of `only`.
    fn set_all_visible(&mut self, visible: bool, only: Option<&NodeId>);

    fn capture_screenshot(&mut self, node_id: &NodeId);

    /// Re-create a view under another session.
    fn update_session(&mut self, request: UpdateSessionRequest);
}

/// Round canvas-derived screen coordinates to whole pixels.
pub fn round_screen_rect(rect: Rect<f64>) -> Rect<i32> {
    Rect::new(
        euclid::default::Point2D::new(rect.origin.x.round() as i32, rect.origin.y.round() as i32),
        euclid::default::Size2D::new(
            rect.size.width.round() as i32,
            rect.size.height.round() as i32,
        ),
    )
}
