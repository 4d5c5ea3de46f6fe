/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use canvasshell::graph::node::NodeId;
use canvasshell::persistence::{LATEST_FILE_NAME, WorkspaceStore, WorkspaceStoreError};
use canvasshell::settings::{CanvasSettings, SETTINGS_FILE_NAME};
use tempfile::TempDir;

use crate::harness::TestHarness;

fn create_test_store() -> (WorkspaceStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = WorkspaceStore::open(dir.path().to_path_buf()).expect("Failed to open store");
    (store, dir)
}

#[test]
fn save_and_reload_preserves_order_and_resumes_ids() {
    let (workspace_store, _dir) = create_test_store();
    let mut harness = TestHarness::new();
    harness.app.init();
    let first = harness.app.store().ids()[0].clone();
    let second = harness.add(700.0, 0.0, 400.0, 300.0, "https://two.test");
    let third = harness.add(0.0, 500.0, 400.0, 300.0, "https://three.test");
    harness.app.select(Some(&first));
    harness.app.save_to(&workspace_store).expect("save workspace");

    let snapshot = workspace_store
        .load_latest()
        .expect("load latest")
        .expect("latest exists");
    let mut reloaded = TestHarness::new();
    reloaded.app.load_workspace(snapshot);

    assert_eq!(reloaded.app.store().ids(), vec![second.clone(), third, first]);
    assert_eq!(reloaded.app.store().selected(), None);
    assert_eq!(reloaded.position(&second), Some((700.0, 0.0)));
    assert_eq!(reloaded.size(&second), Some((400.0, 300.0)));
    assert_eq!(reloaded.app.history().len(), 1);

    let next = reloaded.add(0.0, 0.0, 100.0, 100.0, "");
    assert_eq!(next, NodeId::from("node_4"));
}

#[test]
fn persisted_nodes_are_an_ordered_list_of_pairs() {
    let mut harness = TestHarness::new();
    harness.app.init();

    let value = serde_json::to_value(harness.app.to_workspace_snapshot()).expect("serialize");

    assert_eq!(value["name"], "default");
    assert_eq!(value["nodes"][0][0], "node_1");
    assert_eq!(value["nodes"][0][1]["sessionId"], "default");
    assert!(value["nodes"][0][1].get("renderer").is_none());
}

#[test]
fn corrupt_latest_state_falls_back_to_default_canvas() {
    let (workspace_store, dir) = create_test_store();
    std::fs::write(dir.path().join(LATEST_FILE_NAME), "{ nodes: oops").expect("write garbage");

    let loaded = workspace_store.load_latest();
    assert!(matches!(loaded, Err(WorkspaceStoreError::Parse(_))));

    let mut harness = TestHarness::new();
    harness.app.init();
    assert_eq!(harness.app.store().len(), 1);
}

#[test]
fn named_workspace_round_trip_through_app() {
    let (workspace_store, _dir) = create_test_store();
    let mut harness = TestHarness::new();
    harness.app.init();
    let mut snapshot = harness.app.to_workspace_snapshot();
    snapshot.name = "research".into();
    harness.app.load_workspace(snapshot);
    harness.add(900.0, 900.0, 200.0, 200.0, "https://paper.test");

    harness.app.save_to(&workspace_store).expect("save workspace");

    assert_eq!(
        workspace_store.list_named().expect("list"),
        vec!["research".to_string()]
    );
    let named = workspace_store
        .load_named("research")
        .expect("load named")
        .expect("named exists");
    assert_eq!(named.nodes.len(), 2);
    assert!(matches!(
        workspace_store.load_named("latest"),
        Err(WorkspaceStoreError::InvalidName(_))
    ));
}

#[test]
fn settings_file_drives_new_canvas() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(SETTINGS_FILE_NAME);
    std::fs::write(
        &path,
        "default_session_id = \"work\"\nsession_ids = [\"work\", \"home\"]\ndefault_node_url = \"https://start.test\"\n",
    )
    .expect("write settings");

    let settings = CanvasSettings::load_or_default(&path).expect("load settings");
    let mut harness = TestHarness::with_settings(settings);
    harness.app.init();

    let node = harness.app.store().frontmost().expect("default node");
    assert_eq!(node.url, "https://start.test");
    assert_eq!(node.session_id, "work");
}

#[test]
fn new_workspace_shortcut_resets_canvas() {
    use canvasshell::input::{Key, Modifiers};

    let mut harness = TestHarness::new();
    harness.app.init();
    harness.add(900.0, 900.0, 200.0, 200.0, "");
    harness.app.commit();
    assert_eq!(harness.app.store().len(), 2);

    harness.app.handle_key(Key::Character('n'), Modifiers::CTRL);

    assert_eq!(harness.app.store().len(), 1);
    assert_eq!(harness.app.history().len(), 1);
    assert_eq!(harness.app.workspace_name(), "default");
    assert_eq!(harness.app.store().ids(), vec![NodeId::from("node_1")]);
}
