/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Viewport-driven renderer activation.
//!
//! Each redraw walks the store once: visible nodes without a renderer get one
//! requested, visible nodes with one are repositioned, and hidden nodes with
//! one are suspended. Renderers are never destroyed here.

pub mod backpressure;

use std::collections::HashSet;
use std::time::Instant;

use euclid::default::{Point2D, Rect, Size2D};
use log::trace;

use crate::bridge::{
    CreateViewRequest, RefreshViewRequest, RendererBridge, RequestId, round_screen_rect,
};
use crate::graph::NodeStore;
use crate::graph::node::{Node, NodeId};
use crate::viewport::Viewport;
use backpressure::ViewCreationBackpressure;

/// Content is laid out at this multiple of the node's canvas width.
pub const INTRINSIC_WIDTH_FACTOR: f64 = 2.0;

pub struct ViewReconcileArgs<'a, B: RendererBridge + ?Sized> {
    pub store: &'a mut NodeStore,
    pub viewport: &'a Viewport,
    pub bridge: &'a mut B,
    pub backpressure: &'a ViewCreationBackpressure,
    pub now: Instant,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: Vec<NodeId>,
    pub refreshed: usize,
    pub suspended: usize,
    /// Visible nodes skipped because creation is cooling down.
    pub throttled: usize,
}

/// Page zoom that fits `intrinsic_width` into `screen_width` pixels.
pub fn zoom_factor(canvas_width: f64, screen_width: i32) -> f64 {
    if screen_width <= 0 {
        return 1.0;
    }
    canvas_width * INTRINSIC_WIDTH_FACTOR / f64::from(screen_width)
}

pub fn create_request(node: &Node, request: RequestId, viewport: &Viewport) -> CreateViewRequest {
    CreateViewRequest {
        node_id: node.id.clone(),
        request,
        url: node.url.clone(),
        session_id: node.session_id.clone(),
        screen_bounds: round_screen_rect(viewport.canvas_rect_to_screen(node.content_rect())),
        canvas_bounds: node.content_rect(),
    }
}

pub fn refresh_request(node: &Node, viewport: &Viewport, visible: bool) -> RefreshViewRequest {
    let screen_bounds = if visible {
        round_screen_rect(viewport.canvas_rect_to_screen(node.content_rect()))
    } else {
        Rect::new(Point2D::zero(), Size2D::zero())
    };
    let zoom_factor = if visible {
        zoom_factor(node.size.width, screen_bounds.size.width)
    } else {
        1.0
    };
    RefreshViewRequest {
        node_id: node.id.clone(),
        screen_bounds,
        canvas_bounds: node.content_rect(),
        visible,
        zoom_factor,
    }
}

/// Run one activation pass over the store in paint order.
pub fn reconcile_views<B: RendererBridge + ?Sized>(args: ViewReconcileArgs<'_, B>) -> ReconcileReport {
    let ViewReconcileArgs {
        store,
        viewport,
        bridge,
        backpressure,
        now,
    } = args;
    let visible: HashSet<NodeId> = store
        .visible_set(&viewport.visible_canvas_rect())
        .into_iter()
        .collect();
    let mut report = ReconcileReport::default();

    for id in store.ids() {
        let Some(node) = store.get(&id) else {
            continue;
        };
        let is_visible = visible.contains(&id);
        match (is_visible, node.renderer.is_some()) {
            (true, false) => {
                if !node.has_url() || node.renderer_pending() {
                    continue;
                }
                if !backpressure.can_create(&id, now) {
                    report.throttled += 1;
                    continue;
                }
                let Some((request, node)) = store.begin_request(&id) else {
                    continue;
                };
                bridge.create_view(create_request(node, request, viewport));
                report.created.push(id);
            },
            (true, true) => {
                bridge.refresh_view(refresh_request(node, viewport, true));
                report.refreshed += 1;
            },
            (false, true) => {
                bridge.refresh_view(refresh_request(node, viewport, false));
                report.suspended += 1;
            },
            (false, false) => {},
        }
    }
    trace!("reconciled views: {report:?}");
    report
}
