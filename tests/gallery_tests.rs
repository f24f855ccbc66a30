//! Gallery Tests
//!
//! Tests for:
//! - Ring layout of the `we_<i>` mesh children (depth and angle offsets)
//! - Round-robin texture pool and wrap-around
//! - Children following the gallery through load, unload and destroy

use std::f32::consts::PI;

use glam::Vec3;
use pollster::block_on;

use stagecraft::component::gallery::{BASE_DEPTH_OFFSET, item_name};
use stagecraft::{GalleryComponent, Host, MediaItem, MediaKind, NodeHandle, Options, TexturePool};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn media() -> Vec<MediaItem> {
    vec![
        MediaItem::image("a.png"),
        MediaItem::video("b.mp4"),
        MediaItem::image("c.png"),
    ]
}

fn mounted_gallery(total: usize) -> (Host, GalleryComponent) {
    let host = Host::default();
    let gallery = GalleryComponent::new(
        &host,
        Options::new().with_total(total).with_depth_range(0.0, 1000.0),
        Vec::new(),
        media(),
    );
    block_on(host.mount(gallery.component().clone())).unwrap();
    (host, gallery)
}

fn child_nodes(host: &Host, gallery: &GalleryComponent) -> Vec<NodeHandle> {
    let scene = host.scene().borrow();
    scene
        .get_node(gallery.node().unwrap())
        .unwrap()
        .children()
        .to_vec()
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn gallery_creates_named_children() {
    let (host, gallery) = mounted_gallery(4);

    assert_eq!(gallery.name(), "widget-gallery");
    assert_eq!(gallery.item_names(), vec!["we_0", "we_1", "we_2", "we_3"]);
    let mut names = gallery.decorator_names();
    names.sort();
    assert_eq!(names, (0..4).map(item_name).collect::<Vec<_>>());
    assert!(host.diagnostics().take_reports().is_empty());
}

#[test]
fn gallery_ring_depth_and_angle() {
    let (host, gallery) = mounted_gallery(4);
    block_on(host.check_if_load()).unwrap();

    let nodes = child_nodes(&host, &gallery);
    assert_eq!(nodes.len(), 4);

    let expected_z = [0.0, -250.0, -500.0, -750.0].map(|d| d + BASE_DEPTH_OFFSET);
    let expected_angle = [0.0, 3.0 * PI / 4.0, 3.0 * PI / 2.0, 9.0 * PI / 4.0];

    let scene = host.scene().borrow();
    for (i, handle) in nodes.iter().enumerate() {
        let node = scene.get_node(*handle).unwrap();
        assert_eq!(node.name, format!("widget-we_{i}"));
        assert!(
            approx_eq(node.transform.position.z, expected_z[i]),
            "child {i}: z = {}",
            node.transform.position.z
        );
        assert!(approx_eq(node.transform.rotation.z, expected_angle[i]));
        assert_eq!(node.transform.position.x, 0.0);
        assert!(node.visible);
    }
}

#[test]
fn gallery_children_follow_gallery_visibility() {
    let (host, gallery) = mounted_gallery(2);
    assert!(child_nodes(&host, &gallery).is_empty());

    block_on(host.check_if_load()).unwrap();
    assert!(gallery.is_active());
    assert_eq!(child_nodes(&host, &gallery).len(), 2);

    gallery.add_load_condition(|| false);
    block_on(host.check_if_load()).unwrap();
    assert!(!gallery.is_loaded());
    assert!(child_nodes(&host, &gallery).is_empty());
    assert!(!gallery.is_node_attached());
}

// ============================================================================
// Texture pool
// ============================================================================

#[test]
fn pool_wraps_after_every_slot_was_served() {
    let (_host, gallery) = mounted_gallery(0);
    assert_eq!(gallery.pool_len(), 3);

    let served: Vec<String> = (0..4)
        .map(|_| gallery.next_pooled_texture().unwrap().src)
        .collect();

    assert_eq!(served, vec!["a.png", "b.mp4", "c.png", "a.png"]);
}

#[test]
fn building_the_ring_leaves_the_pool_cursor_at_the_first_slot() {
    let (host, gallery) = mounted_gallery(4);
    block_on(host.check_if_load()).unwrap();
    assert_eq!(gallery.item_names().len(), 4);

    let first = gallery.next_pooled_texture().unwrap();
    assert_eq!(first.src, "a.png");
    assert_eq!(first.kind, MediaKind::Image);

    let second = gallery.next_pooled_texture().unwrap();
    assert_eq!(second.src, "b.mp4");
    assert_eq!(second.kind, MediaKind::Video);
}

#[test]
fn empty_pool_serves_nothing() {
    let pool = TexturePool::new(Vec::new());
    assert!(pool.next_texture().is_none());

    let host = Host::default();
    let gallery = GalleryComponent::new(
        &host,
        Options::new().with_total(2),
        Vec::new(),
        Vec::<MediaItem>::new(),
    );
    block_on(host.mount(gallery.component().clone())).unwrap();
    assert!(gallery.next_pooled_texture().is_none());
    assert_eq!(gallery.item_names().len(), 2);
}

#[test]
fn media_record_prefers_image_source() {
    let item = MediaItem::from_record(Some("still.png"), Some("clip.mp4")).unwrap();
    assert_eq!(item.kind, MediaKind::Image);
    assert_eq!(MediaItem::from_record(None, Some("clip.mp4")).unwrap().kind, MediaKind::Video);
    assert!(MediaItem::from_record(None, None).is_none());
}

// ============================================================================
// Destroy
// ============================================================================

#[test]
fn destroy_detaches_every_ring_child() {
    let (host, gallery) = mounted_gallery(4);
    block_on(host.check_if_load()).unwrap();
    assert_eq!(host.scene().borrow().len(), 6);

    block_on(host.unmount(gallery.component())).unwrap();

    assert!(gallery.is_destroyed());
    assert!(gallery.decorator_names().is_empty());
    assert!(gallery.item_names().is_empty());
    assert_eq!(host.scene().borrow().len(), 1);
    assert!(host.diagnostics().take_reports().is_empty());
}

#[test]
fn default_gallery_uses_eight_slots() {
    let host = Host::default();
    let gallery = GalleryComponent::new(&host, Options::new(), Vec::new(), media());
    block_on(host.mount(gallery.component().clone())).unwrap();

    assert_eq!(gallery.item_names().len(), 8);
    assert_eq!(gallery.options().max_depth, Some(1000.0));
    assert_eq!(gallery.composed(stagecraft::Channel::Position), Vec3::ZERO);
}
