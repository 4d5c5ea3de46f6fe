/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::time::Instant;

use canvasshell::CanvasIntent;
use canvasshell::bridge::{BridgeError, BridgeEvent, RendererId};
use canvasshell::bridge::recording::BridgeCommand;
use canvasshell::render::NodeSurface;
use euclid::default::{Point2D, Vector2D};

use crate::harness::TestHarness;

#[test]
fn offscreen_node_never_receives_create() {
    let mut harness = TestHarness::empty();
    let far = harness.add(5000.0, 5000.0, 600.0, 400.0, "https://far.test");
    let near = harness.add(10.0, 50.0, 600.0, 400.0, "https://near.test");

    harness.step();
    harness.step();

    assert_eq!(harness.created(), vec![near]);
    assert!(!harness.created().contains(&far));
}

#[test]
fn empty_url_node_is_not_activated() {
    let mut harness = TestHarness::empty();
    let blank = harness.add(10.0, 50.0, 600.0, 400.0, "");

    let frame = harness.step();

    assert!(harness.created().is_empty());
    assert_eq!(frame.nodes.len(), 1);
    assert_eq!(frame.nodes[0].id, blank);
    assert_eq!(frame.nodes[0].surface, NodeSurface::Empty);
}

#[test]
fn panning_away_suspends_without_destroying() {
    let mut harness = TestHarness::empty();
    let left = harness.add(0.0, 50.0, 600.0, 400.0, "https://left.test");
    let right = harness.add(3000.0, 50.0, 600.0, 400.0, "https://right.test");

    harness.step();
    assert_eq!(harness.created(), vec![left.clone()]);
    harness.commands();

    harness.app.viewport_mut().pan(Vector2D::new(-3000.0, 0.0));
    harness.step();

    let commands = harness.commands();
    assert!(commands.iter().any(|c| matches!(
        c,
        BridgeCommand::Refresh(req) if req.node_id == left && !req.visible
    )));
    assert!(commands.iter().any(|c| matches!(
        c,
        BridgeCommand::Create(req) if req.node_id == right
    )));
    assert!(!commands.iter().any(|c| matches!(c, BridgeCommand::Destroy(_) | BridgeCommand::DestroyAll)));
    assert!(harness.app.store().get(&left).and_then(|n| n.renderer).is_some());
}

#[test]
fn renderer_count_follows_visible_set() {
    let mut harness = TestHarness::empty();
    for row in 0..7 {
        for col in 0..7 {
            harness.add(
                f64::from(col) * 1500.0,
                f64::from(row) * 1500.0,
                600.0,
                400.0,
                "https://grid.test",
            );
        }
    }
    assert_eq!(harness.app.store().len(), 49);

    harness.step();
    assert_eq!(harness.created().len(), 1);

    // At half scale the visible canvas is 2000x1600: a 2x2 block of the grid.
    harness.app.viewport_mut().zoom(Point2D::origin(), 0.5);
    harness.step();
    assert_eq!(harness.created().len(), 4);
    assert_eq!(harness.app.last_reconcile().refreshed, 1);
}

#[test]
fn live_view_refresh_carries_zoom_compensation() {
    let mut harness = TestHarness::empty();
    let id = harness.add(0.0, 50.0, 600.0, 400.0, "https://zoom.test");
    harness.step();
    harness.commands();

    harness.app.viewport_mut().zoom(Point2D::origin(), 0.5);
    harness.step();

    let refresh = harness.commands().into_iter().find_map(|c| match c {
        BridgeCommand::Refresh(req) if req.node_id == id => Some(req),
        _ => None,
    });
    let refresh = refresh.expect("refresh for live node");
    assert!(refresh.visible);
    assert_eq!(refresh.screen_bounds.size.width, 300);
    assert_eq!(refresh.zoom_factor, 4.0);
}

#[test]
fn responses_for_closed_nodes_are_dropped() {
    let mut harness = TestHarness::empty();
    let id = harness.add(0.0, 50.0, 600.0, 400.0, "https://gone.test");
    harness.app.redraw(Instant::now());
    assert!(harness.app.close_node(&id));

    // The ViewCreated answer is still queued.
    let processed = harness.app.pump_bridge_events(Instant::now());

    assert!(processed >= 1);
    assert!(!harness.app.store().contains(&id));
    assert!(harness.app.store().is_empty());
}

#[test]
fn load_failure_is_drawn_as_placeholder() {
    let mut harness = TestHarness::empty();
    let id = harness.add(0.0, 50.0, 600.0, 400.0, "https://broken.test");
    harness.step();

    harness.app.handle_bridge_event(
        BridgeEvent::LoadFailed {
            node_id: id.clone(),
            code: -105,
            description: "ERR_NAME_NOT_RESOLVED".into(),
        },
        Instant::now(),
    );
    let frame = harness.app.redraw(Instant::now());

    assert_eq!(
        frame.nodes[0].surface,
        NodeSurface::LoadFailed {
            description: "ERR_NAME_NOT_RESOLVED".into()
        }
    );
}

#[test]
fn late_failure_from_before_undo_does_not_orphan_the_new_view() {
    let mut harness = TestHarness::silent();
    harness.app.init();
    let id = harness.app.store().ids()[0].clone();
    let before_undo = harness.app.bridge().last_create_request(&id).expect("create sent");
    harness.app.apply_intents([
        CanvasIntent::MoveNode {
            node_id: id.clone(),
            position: Point2D::new(40.0, 60.0),
        },
        CanvasIntent::CommitHistory,
    ]);

    assert!(harness.app.undo());
    let after_undo = harness.app.bridge().last_create_request(&id).expect("create sent");
    assert_ne!(before_undo, after_undo);

    let now = Instant::now();
    harness.app.handle_bridge_event(
        BridgeEvent::ViewCreateFailed {
            node_id: id.clone(),
            request: before_undo,
            error: BridgeError::Host("superseded".into()),
        },
        now,
    );
    harness.app.handle_bridge_event(
        BridgeEvent::ViewCreated {
            node_id: id.clone(),
            request: after_undo,
            renderer: RendererId(2),
        },
        now,
    );

    let node = harness.app.store().get(&id).expect("node");
    assert_eq!(node.renderer, Some(RendererId(2)));
    assert_eq!(node.placeholder, None);

    harness.app.viewport_mut().pan(Vector2D::new(-50_000.0, 0.0));
    harness.commands();
    harness.step();
    assert!(harness.commands().iter().any(|c| matches!(
        c,
        BridgeCommand::Refresh(req) if req.node_id == id && !req.visible
    )));
}
