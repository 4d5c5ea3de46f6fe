/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use canvasshell::bridge::recording::BridgeCommand;
use canvasshell::graph::node::NodeId;
use euclid::default::Vector2D;

use crate::harness::TestHarness;

/// Default node at the canvas origin, shifted on screen so its title strip
/// (canvas y -33..-8) sits at screen y 67..92.
fn harness_with_default_node() -> (TestHarness, NodeId) {
    let mut harness = TestHarness::new();
    harness.app.init();
    harness.app.viewport_mut().pan(Vector2D::new(100.0, 100.0));
    let id = harness.app.store().ids()[0].clone();
    (harness, id)
}

#[test]
fn undo_twice_redo_once_restores_second_commit() {
    let (mut harness, id) = harness_with_default_node();

    harness.drag((300.0, 80.0), (350.0, 80.0));
    harness.drag((300.0, 80.0), (300.0, 130.0));
    harness.drag((300.0, 130.0), (400.0, 130.0));
    assert_eq!(harness.position(&id), Some((150.0, 50.0)));
    assert_eq!(harness.app.history().len(), 4);

    assert!(harness.app.undo());
    assert!(harness.app.undo());
    assert_eq!(harness.position(&id), Some((50.0, 0.0)));
    assert!(harness.app.redo());

    assert_eq!(harness.position(&id), Some((50.0, 50.0)));
}

#[test]
fn gesture_without_change_does_not_grow_history() {
    let (mut harness, _id) = harness_with_default_node();

    // Content click on the selected node, then an empty-space click.
    harness.press(300.0, 300.0);
    harness.release(300.0, 300.0);
    harness.press(900.0, 750.0);
    harness.release(900.0, 750.0);

    assert_eq!(harness.app.history().len(), 1);
}

#[test]
fn new_change_after_undo_discards_redo() {
    let (mut harness, id) = harness_with_default_node();
    harness.drag((300.0, 80.0), (350.0, 80.0));
    harness.drag((300.0, 80.0), (300.0, 130.0));

    assert!(harness.app.undo());
    harness.drag((300.0, 80.0), (300.0, 280.0));

    assert_eq!(harness.position(&id), Some((50.0, 200.0)));
    assert_eq!(harness.app.history().len(), 3);
    assert!(!harness.app.history().can_redo());
    assert!(!harness.app.redo());
}

#[test]
fn idle_click_after_undo_keeps_redo() {
    let (mut harness, id) = harness_with_default_node();
    harness.drag((300.0, 80.0), (350.0, 80.0));
    assert!(harness.app.undo());

    harness.press(900.0, 750.0);
    harness.release(900.0, 750.0);

    assert!(harness.app.history().can_redo());
    assert!(harness.app.redo());
    assert_eq!(harness.position(&id), Some((50.0, 0.0)));
}

#[test]
fn undo_tears_down_views_before_recreating() {
    let (mut harness, id) = harness_with_default_node();
    harness.step();
    harness.drag((300.0, 80.0), (350.0, 80.0));
    harness.commands();

    assert!(harness.app.undo());

    let commands = harness.commands();
    let destroy_at = commands
        .iter()
        .position(|c| matches!(c, BridgeCommand::DestroyAll));
    let create_at = commands
        .iter()
        .position(|c| matches!(c, BridgeCommand::Create(req) if req.node_id == id));
    assert_eq!(destroy_at, Some(0));
    assert!(create_at > destroy_at);
    assert_eq!(harness.app.store().get(&id).and_then(|n| n.renderer), None);

    harness.step();
    assert!(harness.app.store().get(&id).and_then(|n| n.renderer).is_some());
}

#[test]
fn keyboard_undo_redo_shortcuts() {
    use canvasshell::input::{Key, Modifiers};

    let (mut harness, id) = harness_with_default_node();
    harness.drag((300.0, 80.0), (350.0, 80.0));

    harness.app.handle_key(Key::Character('z'), Modifiers::CTRL);
    assert_eq!(harness.position(&id), Some((0.0, 0.0)));
    harness.app.handle_key(Key::Character('y'), Modifiers::CTRL);
    assert_eq!(harness.position(&id), Some((50.0, 0.0)));
}

#[test]
fn node_ids_are_not_reused_after_undo() {
    let (mut harness, _id) = harness_with_default_node();
    let undone = harness.add(600.0, 0.0, 300.0, 200.0, "https://undone.test");
    assert!(harness.app.commit());

    assert!(harness.app.undo());
    assert!(!harness.app.store().contains(&undone));
    let added = harness.add(600.0, 0.0, 300.0, 200.0, "https://added.test");

    assert_ne!(added, undone);
    // A late title for the undone node must not land on the new one.
    harness.app.handle_bridge_event(
        canvasshell::bridge::BridgeEvent::TitleChanged {
            node_id: undone,
            title: "stale".into(),
        },
        std::time::Instant::now(),
    );
    assert_eq!(harness.app.store().get(&added).map(|n| n.title.as_str()), Some(""));
}
