//! Dotted-path snapshot tree tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Value};

use statsink_core::SnapshotTree;

#[test]
fn nested_paths_create_objects() {
    let mut tree = SnapshotTree::new();
    tree.set_path(json!(3), "service.requests");
    tree.set_path(json!(1.5), "service.db.latency");

    assert_eq!(tree.get_path("service.requests"), Some(&json!(3)));
    assert_eq!(tree.get_path("service.db.latency"), Some(&json!(1.5)));
    assert_eq!(
        tree.as_value(),
        &json!({ "service": { "requests": 3, "db": { "latency": 1.5 } } })
    );
}

#[test]
fn with_root_places_empty_prefix_object() {
    let tree = SnapshotTree::with_root("service");
    assert_eq!(tree.to_json_string(), r#"{"service":{}}"#);

    let bare = SnapshotTree::with_root("");
    assert_eq!(bare.to_json_string(), "{}");
}

#[test]
fn leaf_on_path_is_replaced_by_object() {
    let mut tree = SnapshotTree::new();
    tree.set_path(json!(7), "a");
    tree.set_path(json!(1), "a.b");

    assert_eq!(tree.get_path("a.b"), Some(&json!(1)));
    assert!(tree.get_path("a").unwrap().is_object());
}

#[test]
fn overwrite_keeps_siblings() {
    let mut tree = SnapshotTree::new();
    tree.set_path(json!(1), "x.y");
    tree.set_path(json!(2), "x.z");
    tree.set_path(json!(9), "x.y");

    assert_eq!(tree.as_value(), &json!({ "x": { "y": 9, "z": 2 } }));
}

#[test]
fn missing_path_is_none() {
    let mut tree = SnapshotTree::new();
    tree.set_path(json!("0.5s"), "t.load");

    assert!(tree.get_path("t.nope").is_none());
    assert!(tree.get_path("t.load.deeper").is_none());
    assert_eq!(tree.get_path(""), Some(tree.as_value()));
}

#[test]
fn serialized_string_parses_back() {
    let mut tree = SnapshotTree::with_root("svc");
    tree.set_path(json!(42.5), "svc.queue_depth");

    let parsed: Value = serde_json::from_str(&tree.to_json_string()).unwrap();
    assert_eq!(parsed["svc"]["queue_depth"], json!(42.5));
}
