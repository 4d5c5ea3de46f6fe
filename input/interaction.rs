/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Pointer interaction state machine.
//!
//! The machine owns only the transient gesture state (which node, where the
//! gesture started). It reads the store and viewport through an
//! [`InteractionContext`] and returns [`CanvasIntent`]s; the app applies them.
//! Exactly one [`InteractionState`] is active at a time and transitions only
//! happen on discrete input events.

use euclid::default::{Point2D, Size2D, Vector2D};
use url::Url;

use crate::app::CanvasIntent;
use crate::graph::node::{Node, NodeId, NodeRegion};
use crate::graph::{HOVER_HIT_PADDING, NodeStore, PRESS_HIT_PADDING};
use crate::viewport::{Viewport, wheel_zoom_factor};

/// Screen-pixel reach of the resize handle around a node's bottom-right corner.
pub const RESIZE_HANDLE_MARGIN: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    /// Select, drag, resize; empty-space presses pan.
    #[default]
    Operation,
    /// Every press pans.
    Hand,
}

impl Tool {
    pub fn toggled(self) -> Self {
        match self {
            Tool::Operation => Tool::Hand,
            Tool::Hand => Tool::Operation,
        }
    }
}

/// Only the south-east corner is wired up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeHandle {
    SouthEast,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Pointer input in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down {
        position: Point2D<f64>,
        button: PointerButton,
    },
    Move {
        position: Point2D<f64>,
    },
    Up {
        position: Point2D<f64>,
        button: PointerButton,
    },
    Leave,
    DoubleClick {
        position: Point2D<f64>,
    },
    Wheel {
        position: Point2D<f64>,
        delta_y: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum InteractionState {
    Idle,
    PanningCanvas {
        last_pointer: Point2D<f64>,
        moved: bool,
    },
    DraggingNode {
        node_id: NodeId,
        start_position: Point2D<f64>,
        start_pointer: Point2D<f64>,
    },
    ResizingNode {
        node_id: NodeId,
        handle: ResizeHandle,
        start_size: Size2D<f64>,
        start_pointer: Point2D<f64>,
    },
    EditingField {
        node_id: NodeId,
        draft: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Grab,
    Grabbing,
    ResizeSe,
}

pub struct InteractionContext<'a> {
    pub store: &'a NodeStore,
    pub viewport: &'a Viewport,
    pub tool: Tool,
}

#[derive(Debug, Clone)]
pub struct InteractionMachine {
    state: InteractionState,
    hovered: Option<NodeId>,
    /// Last pointer position in canvas space. Paste lands here.
    pointer_canvas: Point2D<f64>,
}

impl Default for InteractionMachine {
    fn default() -> Self {
        Self {
            state: InteractionState::Idle,
            hovered: None,
            pointer_canvas: Point2D::origin(),
        }
    }
}

impl InteractionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn hovered(&self) -> Option<&NodeId> {
        self.hovered.as_ref()
    }

    pub fn pointer_canvas_position(&self) -> Point2D<f64> {
        self.pointer_canvas
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, InteractionState::EditingField { .. })
    }

    pub fn editing_node(&self) -> Option<&NodeId> {
        match &self.state {
            InteractionState::EditingField { node_id, .. } => Some(node_id),
            _ => None,
        }
    }

    /// Drop any gesture and hover state, e.g. after the store was replaced.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.hovered = None;
    }

    /// Open the URL field for `node_id`, pre-filled with `draft`.
    pub fn begin_editing(&mut self, node_id: NodeId, draft: String) {
        self.state = InteractionState::EditingField { node_id, draft };
    }

    /// Replace the text of the open field. Ignored when not editing.
    pub fn set_draft(&mut self, text: &str) {
        if let InteractionState::EditingField { draft, .. } = &mut self.state {
            text.clone_into(draft);
        }
    }

    /// Enter: close the field and, when the draft is not blank, ask for the
    /// node's URL to be set and its renderer activated.
    pub fn submit_edit(&mut self) -> Vec<CanvasIntent> {
        let InteractionState::EditingField { node_id, draft } =
            std::mem::replace(&mut self.state, InteractionState::Idle)
        else {
            return Vec::new();
        };
        match normalize_url(&draft) {
            Some(url) => vec![CanvasIntent::SetNodeUrl { node_id, url }],
            None => Vec::new(),
        }
    }

    /// Escape or focus loss: close the field without touching the node.
    pub fn cancel_edit(&mut self) -> bool {
        if self.is_editing() {
            self.state = InteractionState::Idle;
            return true;
        }
        false
    }

    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        ctx: &InteractionContext<'_>,
    ) -> Vec<CanvasIntent> {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button, ctx),
            PointerEvent::Move { position } => self.pointer_move(position, ctx),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::Leave => self.pointer_leave(),
            PointerEvent::DoubleClick { position } => self.double_click(position, ctx),
            PointerEvent::Wheel { position, delta_y } => {
                self.cancel_edit();
                vec![CanvasIntent::ZoomViewport {
                    pivot: position,
                    factor: wheel_zoom_factor(delta_y),
                }]
            },
        }
    }

    fn pointer_down(
        &mut self,
        position: Point2D<f64>,
        button: PointerButton,
        ctx: &InteractionContext<'_>,
    ) -> Vec<CanvasIntent> {
        if button != PointerButton::Primary {
            return Vec::new();
        }
        // A press anywhere on the canvas takes focus from the URL field.
        self.cancel_edit();
        let canvas = ctx.viewport.screen_to_canvas(position);
        self.pointer_canvas = canvas;

        if ctx.tool == Tool::Hand {
            self.start_pan(position);
            return Vec::new();
        }

        if let Some(selected) = ctx.store.selected_node()
            && on_resize_handle(selected, position, ctx.viewport)
        {
            self.state = InteractionState::ResizingNode {
                node_id: selected.id.clone(),
                handle: ResizeHandle::SouthEast,
                start_size: selected.size,
                start_pointer: position,
            };
            return Vec::new();
        }

        let Some(node) = ctx
            .store
            .hit_test(canvas, PRESS_HIT_PADDING)
            .and_then(|id| ctx.store.get(&id))
        else {
            self.start_pan(position);
            return vec![CanvasIntent::SelectNode(None)];
        };

        let node_id = node.id.clone();
        let mut intents = vec![CanvasIntent::SelectNode(Some(node_id.clone()))];
        if on_resize_handle(node, position, ctx.viewport) {
            self.state = InteractionState::ResizingNode {
                node_id,
                handle: ResizeHandle::SouthEast,
                start_size: node.size,
                start_pointer: position,
            };
            return intents;
        }
        match node.region_at(canvas) {
            Some(NodeRegion::Logo) => intents.push(CanvasIntent::OpenSessionPicker(node_id)),
            Some(NodeRegion::RefreshButton) => intents.push(CanvasIntent::ReloadNode(node_id)),
            Some(NodeRegion::CloseButton) => intents.push(CanvasIntent::CloseNode(node_id)),
            Some(NodeRegion::TitleStrip) => {
                self.state = InteractionState::DraggingNode {
                    node_id,
                    start_position: node.position,
                    start_pointer: position,
                };
            },
            Some(NodeRegion::Content) | None => {},
        }
        intents
    }

    fn start_pan(&mut self, position: Point2D<f64>) {
        self.state = InteractionState::PanningCanvas {
            last_pointer: position,
            moved: false,
        };
    }

    fn pointer_move(
        &mut self,
        position: Point2D<f64>,
        ctx: &InteractionContext<'_>,
    ) -> Vec<CanvasIntent> {
        let canvas = ctx.viewport.screen_to_canvas(position);
        self.pointer_canvas = canvas;
        let scale = ctx.viewport.scale();
        match &mut self.state {
            InteractionState::PanningCanvas {
                last_pointer,
                moved,
            } => {
                let delta = position - *last_pointer;
                *last_pointer = position;
                if delta == Vector2D::zero() {
                    return Vec::new();
                }
                *moved = true;
                vec![CanvasIntent::PanViewport(delta)]
            },
            InteractionState::DraggingNode {
                node_id,
                start_position,
                start_pointer,
            } => vec![CanvasIntent::MoveNode {
                node_id: node_id.clone(),
                position: *start_position + (position - *start_pointer) / scale,
            }],
            InteractionState::ResizingNode {
                node_id,
                start_size,
                start_pointer,
                ..
            } => {
                let delta = (position - *start_pointer) / scale;
                vec![CanvasIntent::ResizeNode {
                    node_id: node_id.clone(),
                    size: Size2D::new(start_size.width + delta.x, start_size.height + delta.y),
                }]
            },
            InteractionState::Idle | InteractionState::EditingField { .. } => {
                let hovered = ctx.store.hit_test(canvas, HOVER_HIT_PADDING);
                if hovered == self.hovered {
                    return Vec::new();
                }
                self.hovered = hovered.clone();
                vec![CanvasIntent::SetHovered(hovered)]
            },
        }
    }

    /// Ends any manipulation. The commit is unconditional; duplicate
    /// snapshots are dropped by the history.
    fn pointer_up(&mut self) -> Vec<CanvasIntent> {
        self.end_manipulation();
        vec![CanvasIntent::CommitHistory]
    }

    fn pointer_leave(&mut self) -> Vec<CanvasIntent> {
        let committed = self.end_manipulation();
        let mut intents = Vec::new();
        if self.hovered.take().is_some() {
            intents.push(CanvasIntent::SetHovered(None));
        }
        if committed {
            intents.push(CanvasIntent::CommitHistory);
        }
        intents
    }

    /// Return to idle from pan/drag/resize. Returns whether a node was being
    /// manipulated. The URL field survives.
    fn end_manipulation(&mut self) -> bool {
        match self.state {
            InteractionState::DraggingNode { .. } | InteractionState::ResizingNode { .. } => {
                self.state = InteractionState::Idle;
                true
            },
            InteractionState::PanningCanvas { .. } => {
                self.state = InteractionState::Idle;
                false
            },
            InteractionState::Idle | InteractionState::EditingField { .. } => false,
        }
    }

    fn double_click(
        &mut self,
        position: Point2D<f64>,
        ctx: &InteractionContext<'_>,
    ) -> Vec<CanvasIntent> {
        let canvas = ctx.viewport.screen_to_canvas(position);
        self.pointer_canvas = canvas;
        match ctx.store.hit_test(canvas, 0.0).and_then(|id| ctx.store.get(&id)) {
            Some(node) => {
                self.begin_editing(node.id.clone(), node.url.clone());
                Vec::new()
            },
            None => vec![CanvasIntent::AddNodeForEditing {
                canvas_position: canvas,
            }],
        }
    }

    pub fn cursor_hint(&self, ctx: &InteractionContext<'_>) -> CursorHint {
        match &self.state {
            InteractionState::PanningCanvas { .. } | InteractionState::DraggingNode { .. } => {
                CursorHint::Grabbing
            },
            InteractionState::ResizingNode { .. } => CursorHint::ResizeSe,
            InteractionState::EditingField { .. } | InteractionState::Idle => {
                if ctx.tool == Tool::Hand {
                    return CursorHint::Grab;
                }
                let pointer = ctx.viewport.canvas_to_screen(self.pointer_canvas);
                match ctx.store.selected_node() {
                    Some(node) if on_resize_handle(node, pointer, ctx.viewport) => {
                        CursorHint::ResizeSe
                    },
                    _ => CursorHint::Default,
                }
            },
        }
    }
}

fn on_resize_handle(node: &Node, pointer: Point2D<f64>, viewport: &Viewport) -> bool {
    let corner = viewport.canvas_to_screen(node.content_rect().max());
    (pointer.x - corner.x).abs() <= RESIZE_HANDLE_MARGIN
        && (pointer.y - corner.y).abs() <= RESIZE_HANDLE_MARGIN
}

const KNOWN_SCHEMES: &[&str] = &["http", "https", "file", "about", "data", "ftp"];

/// Trim and normalize user-typed URL text. Bare hosts get an `https://`
/// prefix; text that parses either way is kept verbatim. Blank input yields
/// `None`.
pub fn normalize_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed)
        && KNOWN_SCHEMES.contains(&url.scheme())
    {
        return Some(url.into());
    }
    if let Ok(url) = Url::parse(&format!("https://{trimmed}")) {
        return Some(url.into());
    }
    Some(trimmed.to_owned())
}
