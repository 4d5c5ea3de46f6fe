/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::time::Instant;

use canvasshell::CanvasApp;
use canvasshell::bridge::event_channel;
use canvasshell::bridge::recording::{BridgeCommand, RecordingBridge};
use canvasshell::graph::node::{NodeId, NodeTemplate};
use canvasshell::input::interaction::{PointerButton, PointerEvent};
use canvasshell::render::Frame;
use canvasshell::settings::CanvasSettings;
use euclid::default::{Point2D, Size2D};

pub(crate) const CANVAS_SIZE: (f64, f64) = (1000.0, 800.0);

/// A canvas driven by a responsive in-process bridge.
pub(crate) struct TestHarness {
    pub(crate) app: CanvasApp<RecordingBridge>,
}

impl TestHarness {
    pub(crate) fn new() -> Self {
        Self::with_settings(CanvasSettings::default())
    }

    pub(crate) fn with_settings(settings: CanvasSettings) -> Self {
        let (tx, rx) = event_channel();
        let app = CanvasApp::new(
            RecordingBridge::responsive(tx),
            rx,
            settings,
            Size2D::new(CANVAS_SIZE.0, CANVAS_SIZE.1),
        );
        Self { app }
    }

    /// A bridge that records commands but never answers. Tests deliver the
    /// host's events by hand.
    pub(crate) fn silent() -> Self {
        let (tx, rx) = event_channel();
        let app = CanvasApp::new(
            RecordingBridge::new(tx),
            rx,
            CanvasSettings::default(),
            Size2D::new(CANVAS_SIZE.0, CANVAS_SIZE.1),
        );
        Self { app }
    }

    /// Start from an empty store without the default node.
    pub(crate) fn empty() -> Self {
        let mut harness = Self::new();
        harness.app.init();
        let ids = harness.app.store().ids();
        for id in ids {
            harness.app.close_node(&id);
        }
        harness.app.bridge_mut().take_commands();
        harness
    }

    pub(crate) fn add(&mut self, x: f64, y: f64, w: f64, h: f64, url: &str) -> NodeId {
        self.app.add_node(
            Point2D::new(x, y),
            NodeTemplate {
                url: (!url.is_empty()).then(|| url.to_owned()),
                size: Some(Size2D::new(w, h)),
                ..NodeTemplate::default()
            },
        )
    }

    /// One frame: activation pass, then deliver the host's answers.
    pub(crate) fn step(&mut self) -> Frame {
        let now = Instant::now();
        let frame = self.app.redraw(now);
        self.app.pump_bridge_events(now);
        frame
    }

    pub(crate) fn press(&mut self, x: f64, y: f64) {
        self.app.handle_pointer(PointerEvent::Down {
            position: Point2D::new(x, y),
            button: PointerButton::Primary,
        });
    }

    pub(crate) fn move_to(&mut self, x: f64, y: f64) {
        self.app.handle_pointer(PointerEvent::Move {
            position: Point2D::new(x, y),
        });
    }

    pub(crate) fn release(&mut self, x: f64, y: f64) {
        self.app.handle_pointer(PointerEvent::Up {
            position: Point2D::new(x, y),
            button: PointerButton::Primary,
        });
    }

    pub(crate) fn drag(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.press(from.0, from.1);
        self.move_to(to.0, to.1);
        self.release(to.0, to.1);
    }

    pub(crate) fn position(&self, id: &NodeId) -> Option<(f64, f64)> {
        self.app.store().get(id).map(|n| (n.position.x, n.position.y))
    }

    pub(crate) fn size(&self, id: &NodeId) -> Option<(f64, f64)> {
        self.app.store().get(id).map(|n| (n.size.width, n.size.height))
    }

    pub(crate) fn created(&self) -> Vec<NodeId> {
        self.app.bridge().created_nodes()
    }

    pub(crate) fn commands(&mut self) -> Vec<BridgeCommand> {
        self.app.bridge_mut().take_commands()
    }
}
