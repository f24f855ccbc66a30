//! Host Tests
//!
//! Tests for:
//! - LoopMode: Independent ticking vs Master-driven frames
//! - Mount / unmount bookkeeping
//! - Task queue driven load evaluation
//! - Diagnostics observer and severity filtering

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pollster::block_on;

use stagecraft::errors::Severity;
use stagecraft::utils::Timer;
use stagecraft::{Component, Diagnostics, Host, HostConfig, LoopMode, Options, WidgetError};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn root(host: &Host) -> Component {
    Component::builder(host)
        .group()
        .options(Options::new().with_short_name("root"))
        .decorators(Vec::new())
        .build()
}

// ============================================================================
// Loop Mode
// ============================================================================

#[test]
fn independent_host_ticks_its_own_clock() {
    let host = Host::new(HostConfig::default());
    assert_eq!(host.loop_mode(), LoopMode::Independent);

    let frames = Rc::new(Cell::new(0));
    let f = frames.clone();
    host.loop_callbacks()
        .borrow_mut()
        .push(Rc::new(move |_m: f32| f.set(f.get() + 1)));

    assert!(host.tick());
    assert!(host.tick());
    assert_eq!(host.frame_count(), 2);
    assert_eq!(frames.get(), 2);
}

#[test]
fn master_host_only_runs_external_frames() {
    let host = Host::new(HostConfig {
        loop_mode: LoopMode::Master,
        ..HostConfig::default()
    });
    let component = root(&host);
    assert_eq!(component.loop_mode(), LoopMode::Master);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    host.loop_callbacks()
        .borrow_mut()
        .push(Rc::new(move |m: f32| s.borrow_mut().push(m)));

    assert!(!host.tick());
    assert_eq!(host.frame_count(), 0);
    host.frame(0.5);
    assert_eq!(*seen.borrow(), vec![0.5]);
}

#[test]
fn timer_multiplier_is_normalised_to_sixty_fps() {
    let mut timer = Timer::new();
    timer.delta = std::time::Duration::from_millis(50);
    assert!((timer.multiplier() - 3.0).abs() < 1e-4);
    timer.tick();
    assert_eq!(timer.frame_count, 1);
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn mount_is_deduplicated_and_unmount_destroys() {
    init_logger();
    let host = Host::new(HostConfig {
        debug: true,
        ..HostConfig::default()
    });
    let component = root(&host);

    block_on(host.mount(component.clone())).unwrap();
    block_on(host.mount(component.clone())).unwrap();
    assert_eq!(host.children().len(), 1);

    block_on(host.check_if_load()).unwrap();
    assert!(component.is_active());

    block_on(host.unmount(&component)).unwrap();
    assert!(host.children().is_empty());
    assert!(component.is_destroyed());
    assert!(host.loop_callbacks().borrow().is_empty());
    assert!(host.resize_callbacks().borrow().is_empty());
}

#[test]
fn spawned_check_runs_on_the_task_queue() {
    let host = Host::default();
    let component = root(&host);
    block_on(host.mount(component.clone())).unwrap();

    host.spawn_check();
    assert!(!component.is_loaded());

    host.run_until_stalled();
    assert!(component.is_loaded());
    assert!(component.is_active());
}

#[test]
fn root_component_attaches_under_scene_root() {
    let host = Host::default();
    let component = root(&host);
    block_on(host.mount(component.clone())).unwrap();
    block_on(host.check_if_load()).unwrap();

    let scene = host.scene().borrow();
    let node = scene.get_node(component.node().unwrap()).unwrap();
    assert_eq!(node.parent(), Some(host.attachment_point()));
    assert_eq!(node.name, "widget-root");
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn observer_sees_every_report() {
    let diagnostics = Diagnostics::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    diagnostics.set_observer(move |r| s.borrow_mut().push(r.origin.clone()));

    diagnostics.report("widget-a", WidgetError::Canceled("widget-a".into()));
    diagnostics.report(
        "widget-b",
        WidgetError::MissingAttachPoint {
            component: "widget-b".into(),
        },
    );
    diagnostics.report("widget-c", WidgetError::decorator("mesh", "no texture"));

    assert_eq!(*seen.borrow(), vec!["widget-a", "widget-b", "widget-c"]);
    assert_eq!(diagnostics.count_at_least(Severity::Warning), 2);
    assert_eq!(diagnostics.count_at_least(Severity::Error), 1);
    assert_eq!(diagnostics.take_reports().len(), 3);
    assert_eq!(diagnostics.count_at_least(Severity::Info), 0);
}

#[test]
fn invalid_json_options_are_a_configuration_error() {
    let error = Options::from_json("{ not json").unwrap_err();
    assert!(matches!(error, WidgetError::InvalidOptions(_)));
    assert_eq!(error.severity(), Severity::Warning);
}

#[test]
fn diagnostics_are_shared_between_host_and_components() {
    let host = Host::default();
    let component = Component::builder(&host).decorators(Vec::new()).build();

    assert_eq!(component.diagnostics().count_at_least(Severity::Warning), 1);
    assert_eq!(host.diagnostics().take_reports().len(), 1);
}
