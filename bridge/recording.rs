/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! In-process bridge that records every command and, optionally, answers
//! like a well-behaved host. Drives the headless binary and the tests.

use std::collections::HashMap;
use std::path::PathBuf;

use log::debug;

use super::{
    BridgeError, BridgeEvent, BridgeEventSender, CreateViewRequest, RefreshViewRequest,
    RendererBridge, RendererId, RequestId, UpdateSessionRequest,
};
use crate::graph::node::NodeId;

#[derive(Clone, Debug, PartialEq)]
pub enum BridgeCommand {
    Create(CreateViewRequest),
    Refresh(RefreshViewRequest),
    Reload(NodeId),
    Destroy(NodeId),
    DestroyAll,
    BringToFront(NodeId),
    SetAllVisible { visible: bool, only: Option<NodeId> },
    CaptureScreenshot(NodeId),
    UpdateSession(UpdateSessionRequest),
}

pub struct RecordingBridge {
    commands: Vec<BridgeCommand>,
    events: BridgeEventSender,
    /// Answer requests with success events as a live host would.
    auto_respond: bool,
    live: HashMap<NodeId, RendererId>,
    next_renderer: u64,
    screenshot_dir: PathBuf,
}

impl RecordingBridge {
    pub fn new(events: BridgeEventSender) -> Self {
        Self {
            commands: Vec::new(),
            events,
            auto_respond: false,
            live: HashMap::new(),
            next_renderer: 0,
            screenshot_dir: std::env::temp_dir(),
        }
    }

    /// A bridge that acknowledges creates, refreshes, screenshots and
    /// session updates immediately.
    pub fn responsive(events: BridgeEventSender) -> Self {
        Self {
            auto_respond: true,
            ..Self::new(events)
        }
    }

    pub fn with_screenshot_dir(mut self, dir: PathBuf) -> Self {
        self.screenshot_dir = dir;
        self
    }

    pub fn commands(&self) -> &[BridgeCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<BridgeCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn created_nodes(&self) -> Vec<NodeId> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                BridgeCommand::Create(req) => Some(req.node_id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Request id of the most recent create for `node_id`.
    pub fn last_create_request(&self, node_id: &NodeId) -> Option<RequestId> {
        self.commands.iter().rev().find_map(|c| match c {
            BridgeCommand::Create(req) if &req.node_id == node_id => Some(req.request),
            _ => None,
        })
    }

    pub fn live_view_count(&self) -> usize {
        self.live.len()
    }

    fn respond(&self, event: BridgeEvent) {
        if !self.auto_respond {
            return;
        }
        if self.events.send(event).is_err() {
            debug!("bridge event receiver dropped");
        }
    }

    fn allocate_renderer(&mut self, node_id: &NodeId) -> RendererId {
        self.next_renderer += 1;
        let renderer = RendererId(self.next_renderer);
        self.live.insert(node_id.clone(), renderer);
        renderer
    }
}

impl RendererBridge for RecordingBridge {
    fn create_view(&mut self, request: CreateViewRequest) {
        debug!("create view for {} at {}", request.node_id, request.url);
        let node_id = request.node_id.clone();
        let request_id = request.request;
        self.commands.push(BridgeCommand::Create(request));
        if self.auto_respond {
            let renderer = match self.live.get(&node_id) {
                Some(existing) => *existing,
                None => self.allocate_renderer(&node_id),
            };
            self.respond(BridgeEvent::ViewCreated {
                node_id,
                request: request_id,
                renderer,
            });
        }
    }

    fn refresh_view(&mut self, request: RefreshViewRequest) {
        let result = if self.live.contains_key(&request.node_id) {
            Ok(())
        } else {
            Err(BridgeError::ViewNotFound)
        };
        let node_id = request.node_id.clone();
        self.commands.push(BridgeCommand::Refresh(request));
        self.respond(BridgeEvent::ViewRefreshed { node_id, result });
    }

    fn reload_view(&mut self, node_id: &NodeId) {
        self.commands.push(BridgeCommand::Reload(node_id.clone()));
    }

    fn destroy_view(&mut self, node_id: &NodeId) {
        self.live.remove(node_id);
        self.commands.push(BridgeCommand::Destroy(node_id.clone()));
    }

    fn destroy_all_views(&mut self) -> usize {
        let count = self.live.len();
        self.live.clear();
        self.commands.push(BridgeCommand::DestroyAll);
        count
    }

    fn bring_to_front(&mut self, node_id: &NodeId) {
        self.commands.push(BridgeCommand::BringToFront(node_id.clone()));
    }

    fn set_all_visible(&mut self, visible: bool, only: Option<&NodeId>) {
        self.commands.push(BridgeCommand::SetAllVisible {
            visible,
            only: only.cloned(),
        });
    }

    fn capture_screenshot(&mut self, node_id: &NodeId) {
        self.commands.push(BridgeCommand::CaptureScreenshot(node_id.clone()));
        let result = if self.live.contains_key(node_id) {
            Ok(self.screenshot_dir.join(format!("{node_id}.png")))
        } else {
            Err(BridgeError::ViewNotFound)
        };
        self.respond(BridgeEvent::ScreenshotCaptured {
            node_id: node_id.clone(),
            result,
        });
    }

    fn update_session(&mut self, request: UpdateSessionRequest) {
        let node_id = request.node_id.clone();
        let request_id = request.request;
        self.commands.push(BridgeCommand::UpdateSession(request));
        if self.auto_respond {
            let result = if self.live.contains_key(&node_id) {
                Ok(self.allocate_renderer(&node_id))
            } else {
                Err(BridgeError::ViewNotFound)
            };
            self.respond(BridgeEvent::SessionUpdated {
                node_id,
                request: request_id,
                result,
            });
        }
    }
}
