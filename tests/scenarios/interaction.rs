/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use canvasshell::bridge::recording::BridgeCommand;
use canvasshell::input::interaction::{CursorHint, PointerEvent, Tool};
use canvasshell::input::{Key, Modifiers};
use canvasshell::settings::CanvasSettings;
use euclid::default::{Point2D, Vector2D};

use crate::harness::TestHarness;

#[test]
fn added_node_is_only_selection_and_hit() {
    let mut harness = TestHarness::empty();
    let a = harness.add(0.0, 0.0, 100.0, 100.0, "");
    let b = harness.add(50.0, 50.0, 100.0, 100.0, "");

    let store = harness.app.store();
    let selected: Vec<_> = store.iter().filter(|n| n.selected).map(|n| n.id.clone()).collect();
    assert_eq!(selected, vec![b.clone()]);
    assert_eq!(store.hit_test(Point2D::new(1.0, 1.0), 0.0), Some(a));
    assert_eq!(store.hit_test(Point2D::new(60.0, 60.0), 0.0), Some(b));
}

#[test]
fn clicking_back_node_promotes_it() {
    let mut harness = TestHarness::empty();
    let back = harness.add(0.0, 100.0, 200.0, 200.0, "");
    let front = harness.add(100.0, 150.0, 200.0, 200.0, "");
    harness.commands();

    harness.press(50.0, 150.0);
    harness.release(50.0, 150.0);

    assert_eq!(harness.app.store().ids(), vec![front, back.clone()]);
    assert_eq!(harness.app.store().selected(), Some(&back));
    assert_eq!(harness.commands(), vec![BridgeCommand::BringToFront(back)]);
}

#[test]
fn resize_past_floor_clamps_to_minimum() {
    let mut harness = TestHarness::empty();
    let id = harness.add(100.0, 100.0, 300.0, 200.0, "");
    let history_before = harness.app.history().len();

    harness.press(400.0, 300.0);
    assert_eq!(harness.app.cursor_hint(), CursorHint::ResizeSe);
    harness.move_to(-1000.0, -1000.0);
    harness.release(-1000.0, -1000.0);

    assert_eq!(harness.size(&id), Some((100.0, 100.0)));
    assert_eq!(harness.position(&id), Some((100.0, 100.0)));
    assert_eq!(harness.app.history().len(), history_before + 1);
}

#[test]
fn resize_grows_by_scaled_delta() {
    let mut harness = TestHarness::empty();
    let id = harness.add(0.0, 100.0, 300.0, 200.0, "");
    harness.app.viewport_mut().zoom(Point2D::origin(), 2.0);

    // Corner (300, 300) sits at screen (600, 600).
    harness.drag((600.0, 600.0), (700.0, 640.0));

    assert_eq!(harness.size(&id), Some((350.0, 220.0)));
}

#[test]
fn pointer_leave_commits_partial_drag() {
    let mut harness = TestHarness::empty();
    let id = harness.add(100.0, 100.0, 300.0, 200.0, "");
    let history_before = harness.app.history().len();

    harness.press(250.0, 80.0);
    harness.move_to(300.0, 80.0);
    harness.app.handle_pointer(PointerEvent::Leave);

    assert_eq!(harness.position(&id), Some((150.0, 100.0)));
    assert_eq!(harness.app.history().len(), history_before + 1);
    // Moves after leaving no longer drag.
    harness.move_to(500.0, 500.0);
    assert_eq!(harness.position(&id), Some((150.0, 100.0)));
}

#[test]
fn hand_tool_pans_over_nodes() {
    let mut harness = TestHarness::empty();
    let id = harness.add(0.0, 100.0, 300.0, 200.0, "");
    harness.app.handle_key(Key::Tab, Modifiers::NONE);
    assert_eq!(harness.app.tool(), Tool::Hand);

    harness.drag((100.0, 80.0), (160.0, 120.0));

    assert_eq!(harness.position(&id), Some((0.0, 100.0)));
    assert_eq!(harness.app.viewport().offset(), Vector2D::new(60.0, 40.0));
}

#[test]
fn double_click_title_edits_existing_url() {
    let mut harness = TestHarness::empty();
    let id = harness.add(0.0, 100.0, 300.0, 200.0, "https://old.test/");
    harness.step();
    harness.commands();

    harness.app.handle_pointer(PointerEvent::DoubleClick {
        position: Point2D::new(150.0, 80.0),
    });
    assert_eq!(harness.app.interaction().editing_node(), Some(&id));

    harness.app.set_edit_draft("new.test/path");
    harness.app.handle_key(Key::Enter, Modifiers::NONE);

    assert_eq!(
        harness.app.store().get(&id).map(|n| n.url.clone()),
        Some("https://new.test/path".to_string())
    );
    assert!(harness.commands().iter().any(|c| matches!(
        c,
        BridgeCommand::Create(req) if req.node_id == id && req.url == "https://new.test/path"
    )));
}

#[test]
fn close_button_removes_node() {
    let mut harness = TestHarness::empty();
    let id = harness.add(100.0, 100.0, 300.0, 200.0, "https://close.test");

    // Close button spans x 384..400, y 71.5..87.5.
    harness.press(392.0, 80.0);
    harness.release(392.0, 80.0);

    assert!(!harness.app.store().contains(&id));
    assert!(harness.commands().contains(&BridgeCommand::Destroy(id)));
}

#[test]
fn logo_click_opens_session_picker_and_escape_dismisses() {
    let mut harness = TestHarness::with_settings(CanvasSettings {
        session_ids: vec!["default".into(), "work".into()],
        ..CanvasSettings::default()
    });
    harness.app.init();
    let ids = harness.app.store().ids();
    for id in &ids {
        harness.app.close_node(id);
    }
    let id = harness.add(100.0, 100.0, 300.0, 200.0, "https://logo.test");
    harness.step();
    harness.commands();

    // Logo hotspot is centred at (115, 79.5).
    harness.press(115.0, 79.5);
    harness.release(115.0, 79.5);
    harness.step();

    assert_eq!(harness.app.session_picker(), Some(&id));
    let commands = harness.commands();
    assert!(commands.contains(&BridgeCommand::CaptureScreenshot(id.clone())));
    assert!(commands.contains(&BridgeCommand::SetAllVisible {
        visible: false,
        only: Some(id.clone()),
    }));
    assert!(harness.app.store().get(&id).and_then(|n| n.preview.clone()).is_some());

    harness.app.handle_key(Key::Escape, Modifiers::NONE);

    assert_eq!(harness.app.session_picker(), None);
    assert_eq!(harness.app.store().get(&id).and_then(|n| n.preview.clone()), None);
    assert!(harness.commands().contains(&BridgeCommand::SetAllVisible {
        visible: true,
        only: Some(id),
    }));
}

#[test]
fn arrange_shortcut_removes_overlaps() {
    let mut harness = TestHarness::empty();
    let a = harness.add(0.0, 0.0, 300.0, 200.0, "");
    let b = harness.add(100.0, 50.0, 300.0, 200.0, "");
    let history_before = harness.app.history().len();

    harness.app.handle_key(Key::ArrowLeft, Modifiers::CTRL);

    assert_eq!(harness.position(&a), Some((0.0, 0.0)));
    assert_eq!(harness.position(&b), Some((320.0, 50.0)));
    assert_eq!(harness.app.history().len(), history_before + 1);
}

#[test]
fn space_fits_view_to_nodes() {
    let mut harness = TestHarness::empty();
    harness.add(0.0, 0.0, 800.0, 600.0, "");

    harness.app.handle_key(Key::Space, Modifiers::NONE);

    // Box 1000x800 with padding fills the 1000x800 surface at scale 1.
    let transform = harness.app.viewport().transform();
    assert_eq!(transform.scale, 1.0);
    assert_eq!((transform.offset_x, transform.offset_y), (100.0, 100.0));
}
