/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Application state management for the canvas.
//!
//! Every handler receives its collaborators through [`CanvasApp`]; there is
//! no global state. Input is turned into [`CanvasIntent`]s and applied in
//! order by [`CanvasApp::apply_intents`].

use std::time::Instant;

use euclid::default::{Point2D, Rect, Size2D, Vector2D};
use log::{debug, error, info, warn};

use crate::bridge::{BridgeEvent, BridgeEventReceiver, RendererBridge, UpdateSessionRequest};
use crate::graph::{IdCounter, NodeStore};
use crate::graph::arrange::{ArrangeDirection, DEFAULT_ARRANGE_GAP, arrange};
use crate::graph::node::{Node, NodeId, NodeTemplate, Placeholder, overlap};
use crate::history::{History, HistoryEntry, HistoryError};
use crate::input::interaction::{
    CursorHint, InteractionContext, InteractionMachine, PointerEvent, Tool,
};
use crate::input::{Key, Modifiers, collect_actions, intents_from_actions};
use crate::lifecycle::backpressure::ViewCreationBackpressure;
use crate::lifecycle::{ReconcileReport, ViewReconcileArgs, create_request, reconcile_views};
use crate::persistence::types::WorkspaceSnapshot;
use crate::persistence::{WorkspaceStore, WorkspaceStoreError};
use crate::render::{Frame, build_frame};
use crate::settings::CanvasSettings;
use crate::viewport::{RESET_VIEW_PADDING, Viewport};

/// Name used when a workspace has none.
pub const DEFAULT_WORKSPACE_NAME: &str = "default";

/// Popups open this far to the right of their source node.
pub const POPUP_OFFSET_X: f64 = 1000.0;

/// Horizontal reach of the band searched for nodes to re-flow around a popup.
pub const POPUP_BAND_REACH: f64 = 9999.0;

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasIntent {
    SelectNode(Option<NodeId>),
    MoveNode {
        node_id: NodeId,
        position: Point2D<f64>,
    },
    ResizeNode {
        node_id: NodeId,
        size: Size2D<f64>,
    },
    PanViewport(Vector2D<f64>),
    ZoomViewport {
        pivot: Point2D<f64>,
        factor: f64,
    },
    SetHovered(Option<NodeId>),
    AddNodeForEditing {
        canvas_position: Point2D<f64>,
    },
    SetNodeUrl {
        node_id: NodeId,
        url: String,
    },
    SetNodeSession {
        node_id: NodeId,
        session_id: String,
    },
    OpenSessionPicker(NodeId),
    ReloadNode(NodeId),
    CloseNode(NodeId),
    CommitHistory,
    SubmitEdit,
    CancelEdit,
    ClosePopups,
    ToggleTool,
    Undo,
    Redo,
    SaveWorkspace,
    CopySelected,
    PasteAtPointer,
    DeleteSelected,
    FitView,
    NewWorkspace,
    Arrange(ArrangeDirection),
}

pub struct CanvasApp<B: RendererBridge> {
    store: NodeStore,
    viewport: Viewport,
    history: History,
    settings: CanvasSettings,
    interaction: InteractionMachine,
    tool: Tool,
    backpressure: ViewCreationBackpressure,
    bridge: B,
    events: BridgeEventReceiver,

    workspace_name: String,
    workspace_store: Option<WorkspaceStore>,

    /// Attributes of the last copied node, without its position.
    clipboard: Option<NodeTemplate>,

    /// Node whose session picker is open. Its live view is hidden meanwhile.
    session_picker: Option<NodeId>,

    last_reconcile: ReconcileReport,
}

impl<B: RendererBridge> CanvasApp<B> {
    pub fn new(
        bridge: B,
        events: BridgeEventReceiver,
        settings: CanvasSettings,
        canvas_size: Size2D<f64>,
    ) -> Self {
        let settings = settings.normalized();
        Self {
            store: NodeStore::new(),
            viewport: Viewport::new(canvas_size),
            history: History::with_capacity(settings.history_capacity),
            settings,
            interaction: InteractionMachine::new(),
            tool: Tool::default(),
            backpressure: ViewCreationBackpressure::new(),
            bridge,
            events,
            workspace_name: DEFAULT_WORKSPACE_NAME.to_owned(),
            workspace_store: None,
            clipboard: None,
            session_picker: None,
            last_reconcile: ReconcileReport::default(),
        }
    }

    /// Attach the transport used by [`CanvasIntent::SaveWorkspace`].
    pub fn with_workspace_store(mut self, workspace_store: WorkspaceStore) -> Self {
        self.workspace_store = Some(workspace_store);
        self
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut NodeStore {
        &mut self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn interaction(&self) -> &InteractionMachine {
        &self.interaction
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn workspace_name(&self) -> &str {
        &self.workspace_name
    }

    pub fn clipboard(&self) -> Option<&NodeTemplate> {
        self.clipboard.as_ref()
    }

    pub fn session_picker(&self) -> Option<&NodeId> {
        self.session_picker.as_ref()
    }

    pub fn backpressure(&self) -> &ViewCreationBackpressure {
        &self.backpressure
    }

    pub fn last_reconcile(&self) -> &ReconcileReport {
        &self.last_reconcile
    }

    pub fn cursor_hint(&self) -> CursorHint {
        self.interaction.cursor_hint(&InteractionContext {
            store: &self.store,
            viewport: &self.viewport,
            tool: self.tool,
        })
    }

    // --- input ---

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let ctx = InteractionContext {
            store: &self.store,
            viewport: &self.viewport,
            tool: self.tool,
        };
        let intents = self.interaction.handle_pointer(event, &ctx);
        self.apply_intents(intents);
    }

    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) {
        let actions = collect_actions(key, modifiers, self.interaction.is_editing());
        self.apply_intents(intents_from_actions(&actions));
    }

    /// Replace the text of the open URL field.
    pub fn set_edit_draft(&mut self, text: &str) {
        self.interaction.set_draft(text);
    }

    pub fn apply_intents<I>(&mut self, intents: I)
    where
        I: IntoIterator<Item = CanvasIntent>,
    {
        for intent in intents {
            self.apply_intent(intent);
        }
    }

    fn apply_intent(&mut self, intent: CanvasIntent) {
        match intent {
            CanvasIntent::SelectNode(id) => self.select(id.as_ref()),
            CanvasIntent::MoveNode { node_id, position } => {
                if let Some(node) = self.store.get_mut(&node_id) {
                    node.position = position;
                }
            },
            CanvasIntent::ResizeNode { node_id, size } => {
                if let Some(node) = self.store.get_mut(&node_id) {
                    node.resize_to(size);
                }
            },
            CanvasIntent::PanViewport(delta) => self.viewport.pan(delta),
            CanvasIntent::ZoomViewport { pivot, factor } => {
                self.viewport.zoom(pivot, factor);
            },
            // The machine owns hover; only the picture changes.
            CanvasIntent::SetHovered(_) => {},
            CanvasIntent::AddNodeForEditing { canvas_position } => {
                let id = self.add_node(canvas_position, NodeTemplate::default());
                self.interaction.begin_editing(id, String::new());
                self.commit();
            },
            CanvasIntent::SetNodeUrl { node_id, url } => {
                self.set_node_url(&node_id, url);
            },
            CanvasIntent::SetNodeSession {
                node_id,
                session_id,
            } => {
                self.set_node_session(&node_id, &session_id);
            },
            CanvasIntent::OpenSessionPicker(node_id) => self.open_session_picker(&node_id),
            CanvasIntent::ReloadNode(node_id) => self.reload_node(&node_id),
            CanvasIntent::CloseNode(node_id) => {
                self.close_node(&node_id);
            },
            CanvasIntent::CommitHistory => {
                self.commit();
            },
            CanvasIntent::SubmitEdit => {
                let intents = self.interaction.submit_edit();
                self.apply_intents(intents);
            },
            CanvasIntent::CancelEdit => {
                self.interaction.cancel_edit();
            },
            CanvasIntent::ClosePopups => self.close_popups(),
            CanvasIntent::ToggleTool => self.tool = self.tool.toggled(),
            CanvasIntent::Undo => {
                self.undo();
            },
            CanvasIntent::Redo => {
                self.redo();
            },
            CanvasIntent::SaveWorkspace => match self.workspace_store.as_ref() {
                Some(workspace_store) => {
                    if let Err(e) = self.save_to(workspace_store) {
                        warn!("Failed to save workspace {:?}: {e}", self.workspace_name);
                    }
                },
                None => debug!("no workspace store attached; save skipped"),
            },
            CanvasIntent::CopySelected => self.copy_selected(),
            CanvasIntent::PasteAtPointer => {
                self.paste_at(self.interaction.pointer_canvas_position());
            },
            CanvasIntent::DeleteSelected => {
                if let Some(id) = self.store.selected().cloned() {
                    self.close_node(&id);
                }
            },
            CanvasIntent::FitView => self.fit_view(),
            CanvasIntent::NewWorkspace => self.reset(),
            CanvasIntent::Arrange(direction) => {
                self.arrange(direction);
            },
        }
        self.viewport.request_redraw();
    }

    // --- node operations ---

    /// Add a node on the canvas. Blank sessions resolve to the configured
    /// default.
    pub fn add_node(&mut self, position: Point2D<f64>, mut template: NodeTemplate) -> NodeId {
        template.session_id = Some(
            self.settings
                .resolve_session(template.session_id.as_deref()),
        );
        self.store.add(position, template)
    }

    /// Select one node (or none). The selected node's view is raised too.
    pub fn select(&mut self, id: Option<&NodeId>) {
        if !self.store.select(id) {
            debug!("select ignored for missing node {id:?}");
            return;
        }
        if let Some(id) = id {
            self.bridge.bring_to_front(id);
        }
    }

    pub fn close_node(&mut self, id: &NodeId) -> bool {
        if self.store.remove(id).is_none() {
            return false;
        }
        if self.session_picker.as_ref() == Some(id) {
            self.session_picker = None;
        }
        if self.interaction.editing_node() == Some(id) {
            self.interaction.cancel_edit();
        }
        self.bridge.destroy_view(id);
        self.backpressure.reset(id);
        self.commit();
        true
    }

    /// Ask the host for a view for `id`, or navigate the existing one.
    /// User-driven, so any creation cooldown is forgotten.
    pub fn activate_node(&mut self, id: &NodeId) -> bool {
        self.backpressure.reset(id);
        if !self.store.get(id).is_some_and(Node::has_url) {
            return false;
        }
        let Some((request, node)) = self.store.begin_request(id) else {
            return false;
        };
        if matches!(node.placeholder, Some(Placeholder::LoadFailed { .. })) {
            node.placeholder = None;
        }
        self.bridge.create_view(create_request(node, request, &self.viewport));
        true
    }

    pub fn set_node_url(&mut self, id: &NodeId, url: String) -> bool {
        let Some(node) = self.store.get_mut(id) else {
            return false;
        };
        node.url = url;
        self.activate_node(id);
        self.commit();
        true
    }

    pub fn reload_node(&mut self, id: &NodeId) {
        self.backpressure.reset(id);
        let Some(node) = self.store.get_mut(id) else {
            return;
        };
        node.placeholder = None;
        if node.renderer.is_some() {
            self.bridge.reload_view(id);
        } else {
            self.activate_node(id);
        }
    }

    /// Move a node to another session, re-creating its live view if it has
    /// one. Returns `false` when nothing changed.
    pub fn set_node_session(&mut self, id: &NodeId, session_id: &str) -> bool {
        let session_id = session_id.trim();
        if session_id.is_empty() {
            return false;
        }
        let Some(node) = self.store.get_mut(id) else {
            return false;
        };
        if node.session_id == session_id {
            return false;
        }
        session_id.clone_into(&mut node.session_id);
        if node.renderer.is_some()
            && let Some((request, node)) = self.store.begin_request(id)
        {
            self.bridge.update_session(UpdateSessionRequest {
                node_id: id.clone(),
                request,
                session_id: node.session_id.clone(),
                canvas_bounds: node.content_rect(),
            });
        }
        self.commit();
        true
    }

    pub fn arrange(&mut self, direction: ArrangeDirection) -> bool {
        let moved = arrange(&mut self.store, direction, DEFAULT_ARRANGE_GAP, None);
        if moved {
            self.commit();
        }
        moved
    }

    /// Open `url` in a new node beside `source` and push neighbours in the
    /// same horizontal band out of its way.
    pub fn handle_popup(&mut self, source: &NodeId, url: String) -> Option<NodeId> {
        let Some(src) = self.store.get(source) else {
            debug!("popup from missing node {source} ignored");
            return None;
        };
        let src_rect = src.content_rect();
        let session_id = src.session_id.clone();
        let position = Point2D::new(src_rect.max_x() + POPUP_OFFSET_X, src_rect.min_y());
        let band = Rect::new(
            Point2D::new(src_rect.min_x() - POPUP_BAND_REACH, src_rect.min_y()),
            Size2D::new(
                src_rect.size.width + 2.0 * POPUP_BAND_REACH,
                src_rect.size.height,
            ),
        );

        let id = self.add_node(
            position,
            NodeTemplate {
                url: Some(url),
                session_id: Some(session_id),
                ..NodeTemplate::default()
            },
        );
        let mut subset = vec![id.clone(), source.clone()];
        subset.extend(
            self.store
                .iter()
                .filter(|node| node.id != id && &node.id != source)
                .filter(|node| overlap(&node.content_rect(), &band))
                .map(|node| node.id.clone()),
        );
        arrange(&mut self.store, ArrangeDirection::Left, DEFAULT_ARRANGE_GAP, Some(&subset));
        arrange(&mut self.store, ArrangeDirection::Top, DEFAULT_ARRANGE_GAP, Some(&subset));
        self.activate_node(&id);
        self.commit();
        Some(id)
    }

    // --- session picker ---

    pub fn open_session_picker(&mut self, id: &NodeId) {
        let Some(has_view) = self.store.get(id).map(|node| node.renderer.is_some()) else {
            return;
        };
        if let Some(previous) = self.session_picker.take()
            && &previous != id
        {
            self.restore_picker_node(&previous);
        }
        if has_view {
            self.bridge.capture_screenshot(id);
            self.bridge.set_all_visible(false, Some(id));
        }
        self.session_picker = Some(id.clone());
    }

    /// Move the picker's node to `session_id` and close the picker. Only
    /// configured sessions are accepted.
    pub fn choose_session(&mut self, session_id: &str) -> bool {
        let Some(id) = self.session_picker.clone() else {
            return false;
        };
        if !self.settings.session_ids.iter().any(|s| s == session_id) {
            warn!("session {session_id:?} is not configured");
            return false;
        }
        self.restore_picker_node(&id);
        self.session_picker = None;
        self.set_node_session(&id, session_id);
        true
    }

    pub fn dismiss_session_picker(&mut self) {
        if let Some(id) = self.session_picker.take() {
            self.restore_picker_node(&id);
        }
    }

    fn restore_picker_node(&mut self, id: &NodeId) {
        if let Some(node) = self.store.get_mut(id) {
            node.preview = None;
            if node.renderer.is_some() {
                self.bridge.set_all_visible(true, Some(id));
            }
        }
    }

    fn close_popups(&mut self) {
        self.interaction.cancel_edit();
        self.dismiss_session_picker();
    }

    // --- clipboard ---

    pub fn copy_selected(&mut self) {
        if let Some(node) = self.store.selected_node() {
            self.clipboard = Some(NodeTemplate::from_node(node));
        }
    }

    pub fn paste_at(&mut self, position: Point2D<f64>) -> Option<NodeId> {
        let template = self.clipboard.clone()?;
        let id = self.add_node(position, template);
        self.activate_node(&id);
        self.commit();
        Some(id)
    }

    // --- history ---

    /// Snapshot the store into history. Returns whether an entry was added.
    pub fn commit(&mut self) -> bool {
        match self.history_entry() {
            Ok(entry) => self.history.commit(entry),
            Err(e) => {
                error!("Failed to snapshot canvas: {e}");
                false
            },
        }
    }

    /// Selection is not undoable: entries carry every node unselected, so a
    /// restored store compares equal to the entry it came from.
    fn history_entry(&self) -> Result<HistoryEntry, HistoryError> {
        let mut snapshot = self.store.to_snapshot();
        for (_, node) in &mut snapshot.nodes {
            node.selected = false;
        }
        HistoryEntry::from_snapshot(&snapshot)
    }

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo().cloned() else {
            return false;
        };
        if let Err(e) = self.apply_history_entry(&entry) {
            error!("Discarding malformed undo entry: {e}");
            self.history.redo();
            return false;
        }
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redo().cloned() else {
            return false;
        };
        if let Err(e) = self.apply_history_entry(&entry) {
            error!("Discarding malformed redo entry: {e}");
            self.history.undo();
            return false;
        }
        true
    }

    /// Replace the store with `entry`. The store is untouched on parse
    /// failure.
    fn apply_history_entry(&mut self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        let snapshot = entry.to_snapshot()?;
        let destroyed = self.bridge.destroy_all_views();
        debug!("history restore destroyed {destroyed} views");
        self.store.restore(&snapshot, IdCounter::Keep);
        self.interaction.reset();
        self.session_picker = None;
        self.backpressure.clear();
        self.load_views();
        Ok(())
    }

    // --- workspace lifecycle ---

    /// Make sure the canvas is never empty, seed history and create views.
    pub fn init(&mut self) {
        if self.store.is_empty() {
            self.add_default_node();
        }
        self.seed_history();
        self.load_views();
        self.viewport.request_redraw();
    }

    pub fn load_workspace(&mut self, snapshot: WorkspaceSnapshot) {
        let destroyed = self.bridge.destroy_all_views();
        let (name, store_snapshot) = snapshot.into_store_snapshot();
        self.store.restore(&store_snapshot, IdCounter::Recompute);
        if self.store.is_empty() {
            self.add_default_node();
        }
        self.store.select(None);
        self.workspace_name = if name.trim().is_empty() {
            DEFAULT_WORKSPACE_NAME.to_owned()
        } else {
            name.trim().to_owned()
        };
        self.interaction.reset();
        self.session_picker = None;
        self.backpressure.clear();
        self.seed_history();
        self.load_views();
        self.viewport.request_redraw();
        info!(
            "Loaded workspace {:?} with {} nodes ({destroyed} views destroyed)",
            self.workspace_name,
            self.store.len()
        );
    }

    /// Start over with a fresh default canvas.
    pub fn reset(&mut self) {
        self.bridge.destroy_all_views();
        self.store.clear();
        self.history.clear();
        self.workspace_name = DEFAULT_WORKSPACE_NAME.to_owned();
        self.interaction.reset();
        self.session_picker = None;
        self.backpressure.clear();
        self.init();
    }

    pub fn to_workspace_snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot::new(self.workspace_name.clone(), self.store.to_snapshot())
    }

    /// Write the latest state, and the named copy for non-default workspaces.
    pub fn save_to(&self, workspace_store: &WorkspaceStore) -> Result<(), WorkspaceStoreError> {
        let snapshot = self.to_workspace_snapshot();
        workspace_store.save_latest(&snapshot)?;
        if self.workspace_name != DEFAULT_WORKSPACE_NAME {
            workspace_store.save_named(&self.workspace_name, &snapshot)?;
        }
        Ok(())
    }

    fn add_default_node(&mut self) -> NodeId {
        let template = NodeTemplate::with_url(self.settings.default_node_url.clone());
        self.add_node(Point2D::origin(), template)
    }

    fn seed_history(&mut self) {
        match self.history_entry() {
            Ok(entry) => self.history.reset(entry),
            Err(e) => error!("Failed to seed history: {e}"),
        }
    }

    // --- view ---

    pub fn fit_view(&mut self) {
        self.viewport
            .fit_to_rects(self.store.content_rects(), RESET_VIEW_PADDING);
    }

    pub fn set_canvas_size(&mut self, size: Size2D<f64>) {
        self.viewport.set_canvas_size(size);
    }

    fn load_views(&mut self) -> ReconcileReport {
        self.reconcile(Instant::now())
    }

    fn reconcile(&mut self, now: Instant) -> ReconcileReport {
        let report = reconcile_views(ViewReconcileArgs {
            store: &mut self.store,
            viewport: &self.viewport,
            bridge: &mut self.bridge,
            backpressure: &self.backpressure,
            now,
        });
        self.last_reconcile = report.clone();
        report
    }

    /// Run the activation pass and build the draw list. Clears the pending
    /// redraw request.
    pub fn redraw(&mut self, now: Instant) -> Frame {
        self.viewport.take_redraw_request();
        self.reconcile(now);
        build_frame(
            &self.store,
            &self.viewport,
            self.interaction.hovered(),
            self.settings.node_padding,
        )
    }

    /// Redraw only when something asked for it.
    pub fn redraw_if_requested(&mut self, now: Instant) -> Option<Frame> {
        if !self.viewport.take_redraw_request() {
            return None;
        }
        Some(self.redraw(now))
    }

    // --- bridge events ---

    /// Apply every event the host has delivered so far. Returns how many
    /// were processed.
    pub fn pump_bridge_events(&mut self, now: Instant) -> usize {
        let events: Vec<BridgeEvent> = self.events.try_iter().collect();
        let count = events.len();
        for event in events {
            self.handle_bridge_event(event, now);
        }
        if count > 0 {
            self.viewport.request_redraw();
        }
        count
    }

    pub fn handle_bridge_event(&mut self, event: BridgeEvent, now: Instant) {
        if let BridgeEvent::PopupRequested { node_id, url } = event {
            self.handle_popup(&node_id, url);
            return;
        }
        let picker = self.session_picker.clone();
        let Some(node) = self.store.get_mut(event.node_id()) else {
            debug!("dropping {event:?} for missing node");
            return;
        };
        if let Some(request) = event.request()
            && node.pending_request != Some(request)
        {
            debug!("stale answer to {request} for {} ignored", node.id);
            return;
        }
        match event {
            BridgeEvent::ViewCreated {
                node_id, renderer, ..
            } => {
                node.renderer = Some(renderer);
                node.pending_request = None;
                node.placeholder = None;
                self.backpressure.note_success(&node_id);
            },
            BridgeEvent::ViewCreateFailed { node_id, error, .. } => {
                node.pending_request = None;
                node.placeholder = Some(Placeholder::LoadFailed {
                    code: 0,
                    description: error.to_string(),
                });
                let delay = self.backpressure.note_failure(&node_id, now);
                warn!("Failed to create view for {node_id}: {error}; retry in {delay:?}");
            },
            BridgeEvent::ViewRefreshed { node_id, result } => match result {
                Ok(()) => {
                    if node.placeholder == Some(Placeholder::Loading) {
                        node.placeholder = None;
                    }
                },
                Err(e) => {
                    debug!("refresh of {node_id} failed: {e}");
                    node.placeholder = Some(Placeholder::Loading);
                },
            },
            BridgeEvent::ScreenshotCaptured { node_id, result } => match result {
                Ok(path) if picker.as_ref() == Some(&node_id) => node.preview = Some(path),
                Ok(_) => debug!("screenshot for {node_id} arrived after the picker closed"),
                Err(e) => warn!("Failed to capture {node_id}: {e}"),
            },
            BridgeEvent::SessionUpdated {
                node_id, result, ..
            } => {
                node.pending_request = None;
                match result {
                    Ok(renderer) => node.renderer = Some(renderer),
                    Err(e) => {
                        warn!("Failed to move {node_id} to session {}: {e}", node.session_id);
                        node.renderer = None;
                    },
                }
            },
            BridgeEvent::TitleChanged { title, .. } => node.title = title,
            BridgeEvent::LoadFailed {
                node_id,
                code,
                description,
            } => {
                warn!("{node_id} failed to load ({code}): {description}");
                node.placeholder = Some(Placeholder::LoadFailed { code, description });
            },
            BridgeEvent::PopupRequested { .. } => {},
        }
    }
}
