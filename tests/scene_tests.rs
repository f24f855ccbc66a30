//! Scene Integration Tests
//!
//! Tests for:
//! - Scene: create/remove nodes, add/remove hierarchy
//! - Attachment and renderability queries
//! - World matrix propagation

use glam::Vec3;
use stagecraft::scene::{NodeKind, Scene};

fn new_scene() -> Scene {
    Scene::new()
}

// ============================================================================
// Node Creation & Removal
// ============================================================================

#[test]
fn scene_starts_with_root_only() {
    let scene = new_scene();
    assert_eq!(scene.len(), 1);
    assert!(scene.is_empty());
    let root = scene.get_node(scene.root()).unwrap();
    assert_eq!(root.kind, NodeKind::Root);
    assert!(root.visible);
}

#[test]
fn scene_created_nodes_are_detached_and_hidden() {
    let mut scene = new_scene();
    let handle = scene.create_node("card", NodeKind::Mesh);

    let node = scene.get_node(handle).unwrap();
    assert_eq!(node.name, "card");
    assert!(!node.visible);
    assert!(node.parent().is_none());
    assert!(!scene.is_attached(handle));
}

#[test]
fn scene_remove_node_removes_subtree() {
    let mut scene = new_scene();
    let root = scene.root();
    let group = scene.create_node("group", NodeKind::Group);
    let a = scene.create_node("a", NodeKind::Mesh);
    let b = scene.create_node("b", NodeKind::Mesh);
    scene.add(root, group);
    scene.add(group, a);
    scene.add(group, b);
    assert_eq!(scene.len(), 4);

    scene.remove_node(group);

    assert_eq!(scene.len(), 1);
    assert!(scene.get_node(a).is_none());
    assert!(scene.get_node(root).unwrap().children().is_empty());
}

#[test]
fn scene_root_cannot_be_removed() {
    let mut scene = new_scene();
    let root = scene.root();
    scene.remove_node(root);
    assert!(scene.get_node(root).is_some());
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn scene_add_removes_from_old_parent() {
    let mut scene = new_scene();
    let root = scene.root();
    let first = scene.create_node("first", NodeKind::Group);
    let second = scene.create_node("second", NodeKind::Group);
    let child = scene.create_node("child", NodeKind::Mesh);
    scene.add(root, first);
    scene.add(root, second);

    scene.add(first, child);
    scene.add(second, child);

    assert!(scene.get_node(first).unwrap().children().is_empty());
    assert_eq!(scene.get_node(second).unwrap().children(), &[child]);
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(second));
}

#[test]
fn scene_add_to_self_is_noop() {
    let mut scene = new_scene();
    let node = scene.create_node("loop", NodeKind::Group);
    scene.add(node, node);
    assert!(scene.get_node(node).unwrap().parent().is_none());
}

#[test]
fn scene_remove_ignores_non_children() {
    let mut scene = new_scene();
    let root = scene.root();
    let group = scene.create_node("group", NodeKind::Group);
    let other = scene.create_node("other", NodeKind::Group);
    scene.add(root, group);

    scene.remove(other, group);
    assert!(scene.is_attached(group));

    scene.remove(root, group);
    assert!(!scene.is_attached(group));
    assert!(scene.get_node(group).is_some());
}

#[test]
fn scene_rendered_requires_visible_ancestors() {
    let mut scene = new_scene();
    let root = scene.root();
    let group = scene.create_node("group", NodeKind::Group);
    let mesh = scene.create_node("mesh", NodeKind::Mesh);
    scene.add(root, group);
    scene.add(group, mesh);
    scene.get_node_mut(mesh).unwrap().visible = true;

    assert!(!scene.is_rendered(mesh));
    scene.get_node_mut(group).unwrap().visible = true;
    assert!(scene.is_rendered(mesh));
}

// ============================================================================
// World Matrix
// ============================================================================

#[test]
fn scene_world_matrix_composes_parent_transforms() {
    let mut scene = new_scene();
    let root = scene.root();
    let group = scene.create_node("group", NodeKind::Group);
    let mesh = scene.create_node("mesh", NodeKind::Mesh);
    scene.add(root, group);
    scene.add(group, mesh);

    scene.get_node_mut(group).unwrap().transform.position = Vec3::new(0.0, 0.0, 1000.0);
    scene.get_node_mut(group).unwrap().transform.scale = Vec3::splat(2.0);
    scene.get_node_mut(mesh).unwrap().transform.position = Vec3::new(1.0, 0.0, 0.0);
    scene.update_matrix_world();

    let world = scene.get_node(mesh).unwrap().world_matrix();
    let origin = world.transform_point3(Vec3::ZERO);
    assert!((origin - Vec3::new(2.0, 0.0, 1000.0)).length() < 1e-4);
}
