//! Transform Composition Tests
//!
//! Tests for:
//! - ValueLayerStack sum / multiply reduction and name uniqueness
//! - Epsilon write suppression in Component::update_transform
//! - Euler rotation and local matrix rebuild on the scene node

use std::f32::consts::FRAC_PI_2;

use glam::{Affine3A, Quat, Vec3};
use pollster::block_on;

use stagecraft::component::{ORIGINAL, ValueLayerStack};
use stagecraft::scene::Transform;
use stagecraft::{Channel, Component, Host, Options, TransformWrites};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

fn loaded_group(options: Options) -> (Host, Component) {
    let host = Host::default();
    let component = Component::builder(&host)
        .group()
        .options(options)
        .decorators(Vec::new())
        .build();
    block_on(host.mount(component.clone())).unwrap();
    block_on(host.check_if_load()).unwrap();
    (host, component)
}

fn node_transform(host: &Host, component: &Component) -> Transform {
    let scene = host.scene().borrow();
    scene
        .get_node(component.node().unwrap())
        .unwrap()
        .transform
        .clone()
}

// ============================================================================
// ValueLayerStack
// ============================================================================

#[test]
fn stack_starts_with_original_layer() {
    let stack = ValueLayerStack::new(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.get(ORIGINAL), Some(Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn stack_sum_and_multiply() {
    let mut stack = ValueLayerStack::new(Vec3::new(1.0, 2.0, 3.0));
    stack.push("wind", Vec3::new(0.5, 0.0, -1.0));
    stack.push("hover", Vec3::new(0.0, 2.0, 0.0));

    assert!(vec3_approx(stack.sum(), Vec3::new(1.5, 4.0, 2.0)));
    assert!(vec3_approx(stack.multiply(), Vec3::ZERO));

    let mut scale = ValueLayerStack::new(Vec3::splat(2.0));
    scale.push("pulse", Vec3::new(1.5, 1.0, 0.5));
    assert!(vec3_approx(scale.multiply(), Vec3::new(3.0, 2.0, 1.0)));
}

#[test]
fn stack_push_existing_name_updates_in_place() {
    let mut stack = ValueLayerStack::new(Vec3::ZERO);
    stack.push("wind", Vec3::X);
    stack.push("hover", Vec3::Y);
    stack.push("wind", Vec3::Z);

    assert_eq!(stack.len(), 3);
    let names: Vec<&str> = stack.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec![ORIGINAL, "wind", "hover"]);
    assert_eq!(stack.get("wind"), Some(Vec3::Z));
}

#[test]
fn stack_set_only_touches_existing_layers() {
    let mut stack = ValueLayerStack::new(Vec3::ZERO);
    assert!(!stack.set("wind", Vec3::X));
    assert_eq!(stack.len(), 1);
    assert!(stack.set(ORIGINAL, Vec3::X));
    assert_eq!(stack.sum(), Vec3::X);
}

#[test]
fn stack_original_layer_cannot_be_removed() {
    let mut stack = ValueLayerStack::new(Vec3::ONE);
    stack.push("wind", Vec3::X);

    assert_eq!(stack.remove(ORIGINAL), None);
    assert_eq!(stack.remove("wind"), Some(Vec3::X));
    assert_eq!(stack.remove("wind"), None);
    assert_eq!(stack.len(), 1);
}

// ============================================================================
// update_transform
// ============================================================================

#[test]
fn load_writes_configured_transform() {
    let options = Options::new()
        .with_position(Vec3::new(1.0, 2.0, 3.0))
        .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0))
        .with_scale(Vec3::splat(2.0));
    let (host, component) = loaded_group(options);

    let transform = node_transform(&host, &component);
    assert!(vec3_approx(transform.position, Vec3::new(1.0, 2.0, 3.0)));
    assert!(vec3_approx(transform.rotation, Vec3::new(0.0, FRAC_PI_2, 0.0)));
    assert!(vec3_approx(transform.scale, Vec3::splat(2.0)));
}

#[test]
fn sub_epsilon_changes_are_not_written() {
    let (host, component) = loaded_group(Options::new().with_position(Vec3::new(1.0, 0.0, 0.0)));

    component.set_layer(Channel::Position, "jitter", Vec3::new(0.005, -0.009, 0.0));
    component.set_layer(Channel::Rotation, "jitter", Vec3::new(0.0005, 0.0, 0.0));
    component.set_layer(Channel::Scale, "jitter", Vec3::new(1.0005, 1.0, 1.0));

    assert_eq!(component.update_transform(), TransformWrites::empty());
    let transform = node_transform(&host, &component);
    assert_eq!(transform.position, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(transform.rotation, Vec3::ZERO);
    assert_eq!(transform.scale, Vec3::ONE);
}

#[test]
fn one_axis_over_epsilon_writes_all_three() {
    let (host, component) = loaded_group(Options::new());

    component.set_layer(Channel::Position, "drift", Vec3::new(0.005, 0.02, 0.005));

    assert_eq!(component.update_transform(), TransformWrites::POSITION);
    let transform = node_transform(&host, &component);
    assert_eq!(transform.position, Vec3::new(0.005, 0.02, 0.005));
}

#[test]
fn each_channel_uses_its_own_epsilon() {
    let (_host, component) = loaded_group(Options::new());

    component.set_layer(Channel::Position, "nudge", Vec3::new(0.002, 0.0, 0.0));
    component.set_layer(Channel::Rotation, "nudge", Vec3::new(0.002, 0.0, 0.0));
    component.set_layer(Channel::Scale, "nudge", Vec3::new(1.002, 1.0, 1.0));

    assert_eq!(
        component.update_transform(),
        TransformWrites::ROTATION | TransformWrites::SCALE
    );
}

#[test]
fn removing_a_layer_restores_the_composed_value() {
    let (host, component) = loaded_group(Options::new().with_position(Vec3::new(0.0, 1.0, 0.0)));

    component.set_layer(Channel::Position, "lift", Vec3::new(0.0, 4.0, 0.0));
    component.update_transform();
    assert!(vec3_approx(node_transform(&host, &component).position, Vec3::new(0.0, 5.0, 0.0)));

    assert_eq!(component.remove_layer(Channel::Position, "lift"), Some(Vec3::new(0.0, 4.0, 0.0)));
    assert_eq!(component.remove_layer(Channel::Position, ORIGINAL), None);
    component.update_transform();
    assert!(vec3_approx(node_transform(&host, &component).position, Vec3::new(0.0, 1.0, 0.0)));
}

#[test]
fn frame_applies_layers_set_in_loop_callbacks() {
    let (host, component) = loaded_group(Options::new());
    let target = component.clone();
    component.add_frame_callback(move |m| {
        let y = target.layer(Channel::Position, "bob").map_or(0.0, |v| v.y);
        target.set_layer(Channel::Position, "bob", Vec3::new(0.0, y + m, 0.0));
    });

    host.frame(1.0);
    host.frame(0.5);

    assert!(vec3_approx(node_transform(&host, &component).position, Vec3::new(0.0, 1.5, 0.0)));
}

#[test]
fn component_without_node_writes_nothing() {
    let host = Host::default();
    let component = Component::builder(&host)
        .options(Options::new())
        .decorators(Vec::new())
        .build();
    component.set_layer(Channel::Position, "any", Vec3::splat(10.0));

    assert_eq!(component.update_transform(), TransformWrites::empty());
    assert_eq!(component.composed(Channel::Position), Vec3::splat(10.0));
}

// ============================================================================
// Scene Transform
// ============================================================================

#[test]
fn transform_default_is_identity() {
    let mut t = Transform::new();
    assert!(t.update_local_matrix());
    assert_eq!(*t.local_matrix(), Affine3A::IDENTITY);
    assert!(!t.update_local_matrix());
}

#[test]
fn euler_rotation_builds_quaternion_xyz() {
    let mut t = Transform::new();
    t.rotation = Vec3::new(0.0, 0.0, FRAC_PI_2);
    let expected = Quat::from_rotation_z(FRAC_PI_2);
    assert!(t.quat().abs_diff_eq(expected, EPSILON));

    assert!(t.update_local_matrix());
    let rotated = t.local_matrix().transform_vector3(Vec3::X);
    assert!(vec3_approx(rotated, Vec3::Y));
}
