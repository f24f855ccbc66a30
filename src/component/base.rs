//! The component state machine.
//!
//! States are `{Unloaded, Loaded} × {Inactive, Active}`; `Active` is only
//! reachable from `Loaded` because the active conditions always contain an
//! "is loaded" predicate.
//!
//! - [`Component::evaluate_load`] flips `loaded` when the load conditions
//!   changed, waits for every attached decorator to re-evaluate, runs the
//!   load or unload sequence and finally [`Component::evaluate_active`].
//! - [`Component::evaluate_active`] flips `active` and fires
//!   `on_activate`/`on_deactivate`. It is idempotent.
//!
//! Failures are caught here and reported through [`Diagnostics`]; they never
//! reach the parent and nothing is retried.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use bitflags::bitflags;
use futures::future::join_all;
use glam::Vec3;

use crate::component::callbacks::{CallbackSet, FrameFn, ResizeFn};
use crate::component::cancel::CancelToken;
use crate::component::conditions::{self, ConditionSet, Predicate};
use crate::component::decorator::{Decorator, TaskFuture};
use crate::component::hooks::{Hooks, NoHooks};
use crate::component::layers::{ORIGINAL, ValueLayerStack};
use crate::errors::{Diagnostics, Result, WidgetError};
use crate::host::{Context, Host, LoopMode};
use crate::options::{Options, defaults};
use crate::render::{Composer, RenderTarget};
use crate::resources::uniforms::apply_known;
use crate::resources::{Geometry, Material, OwnedResources, UniformMap};
use crate::scene::{NodeHandle, SceneRef};

/// Position writes are suppressed below this per-axis difference.
pub const POSITION_EPSILON: f32 = 0.01;
/// Rotation writes are suppressed below this per-axis difference.
pub const ROTATION_EPSILON: f32 = 0.001;
/// Scale writes are suppressed below this per-axis difference.
pub const SCALE_EPSILON: f32 = 0.001;

bitflags! {
    /// Which node vectors [`Component::update_transform`] wrote.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TransformWrites: u8 {
        const POSITION = 1 << 0;
        const ROTATION = 1 << 1;
        const SCALE    = 1 << 2;
    }
}

/// What the component owns in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentKind {
    /// No scene node; a pure lifecycle/logic component.
    #[default]
    Base,
    /// A child-bearing group node.
    Group,
    /// A renderable mesh node.
    Mesh,
}

/// One of the three transform channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Position,
    Rotation,
    Scale,
}

/// Where a component is created.
#[derive(Clone)]
pub enum Parent {
    /// The root host: always load-eligible.
    Host(Host),
    /// Another component: load-eligible while it is loaded.
    Component(Component),
}

impl From<&Host> for Parent {
    fn from(host: &Host) -> Self {
        Self::Host(host.clone())
    }
}

impl From<&Component> for Parent {
    fn from(component: &Component) -> Self {
        Self::Component(component.clone())
    }
}

enum ParentLink {
    Host,
    Component(Weak<Inner>),
}

pub(crate) struct Inner {
    pub(crate) name: String,
    pub(crate) short_name: String,
    pub(crate) kind: ComponentKind,
    pub(crate) context: Context,

    parent: ParentLink,
    parent_loops: Rc<RefCell<CallbackSet<FrameFn>>>,
    parent_resizes: Rc<RefCell<CallbackSet<ResizeFn>>>,

    loaded: Cell<bool>,
    active: Cell<bool>,
    destroyed: Cell<bool>,
    initialized: Cell<bool>,

    options: RefCell<Options>,

    load_conditions: RefCell<ConditionSet>,
    active_conditions: RefCell<ConditionSet>,
    loop_callbacks: Rc<RefCell<CallbackSet<FrameFn>>>,
    resize_callbacks: Rc<RefCell<CallbackSet<ResizeFn>>>,

    position: RefCell<ValueLayerStack>,
    rotation: RefCell<ValueLayerStack>,
    scale: RefCell<ValueLayerStack>,

    child_decorators: Vec<Rc<dyn Decorator>>,
    decorators: RefCell<Vec<(String, Rc<dyn Decorator>)>>,

    pub(crate) node: Cell<Option<NodeHandle>>,
    pub(crate) resources: RefCell<OwnedResources>,
    hooks: Rc<dyn Hooks>,
    pending: RefCell<Vec<CancelToken>>,

    frame_fn: Rc<FrameFn>,
    resize_fn: Rc<ResizeFn>,
}

/// A node of the lifecycle tree.
///
/// `Component` is a cheap handle; clones refer to the same component. The
/// parent link is weak, so a component lives as long as its owner (parent
/// registry or host) keeps it.
#[derive(Clone)]
pub struct Component {
    pub(crate) inner: Rc<Inner>,
}

/// Non-owning handle to a [`Component`].
#[derive(Clone)]
pub struct WeakComponent(Weak<Inner>);

impl WeakComponent {
    #[must_use]
    pub fn upgrade(&self) -> Option<Component> {
        self.0.upgrade().map(|inner| Component { inner })
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builds a [`Component`] from the `{parent, options, decorators}` triple.
///
/// Missing `options` or `decorators` are configuration errors: they are
/// reported as warnings and the component is built with defaults.
pub struct ComponentBuilder {
    parent: Parent,
    kind: ComponentKind,
    options: Option<Options>,
    defaults: Option<Options>,
    decorators: Option<Vec<Rc<dyn Decorator>>>,
    hooks: Rc<dyn Hooks>,
    resources: OwnedResources,
}

impl ComponentBuilder {
    #[must_use]
    pub fn new(parent: impl Into<Parent>) -> Self {
        Self {
            parent: parent.into(),
            kind: ComponentKind::Base,
            options: None,
            defaults: None,
            decorators: None,
            hooks: Rc::new(NoHooks),
            resources: OwnedResources::new(),
        }
    }

    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Replaces the per-kind default record the options are merged over.
    #[must_use]
    pub fn defaults(mut self, defaults: Options) -> Self {
        self.defaults = Some(defaults);
        self
    }

    #[must_use]
    pub fn decorators(mut self, decorators: Vec<Rc<dyn Decorator>>) -> Self {
        self.decorators = Some(decorators);
        self
    }

    #[must_use]
    pub fn hooks(mut self, hooks: Rc<dyn Hooks>) -> Self {
        self.hooks = hooks;
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: ComponentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Owns a group node; see [`crate::component::group`].
    #[must_use]
    pub fn group(self) -> Self {
        self.kind(ComponentKind::Group)
    }

    /// Owns a renderable mesh node with the given resources.
    #[must_use]
    pub fn mesh(mut self, material: Material, geometry: Geometry) -> Self {
        self.resources = std::mem::take(&mut self.resources).with_mesh(material, geometry);
        self.kind(ComponentKind::Mesh)
    }

    /// Owns a composited render target.
    #[must_use]
    pub fn composer(mut self, composer: Box<dyn Composer>) -> Self {
        self.resources = std::mem::take(&mut self.resources).with_composer(composer);
        self
    }

    #[must_use]
    pub fn build(self) -> Component {
        let defaults = self.defaults.unwrap_or_else(|| match self.kind {
            ComponentKind::Base => defaults::base(),
            ComponentKind::Group => defaults::group(),
            ComponentKind::Mesh => defaults::mesh(),
        });
        let missing_options = self.options.is_none();
        let missing_decorators = self.decorators.is_none();
        let options = self.options.unwrap_or_default().over(defaults);
        let name = options.name();
        let short_name = options.short_name().to_owned();

        let (context, parent, parent_loops, parent_resizes) = match &self.parent {
            Parent::Host(host) => (
                host.context().clone(),
                ParentLink::Host,
                host.loop_callbacks(),
                host.resize_callbacks(),
            ),
            Parent::Component(component) => (
                component.inner.context.clone(),
                ParentLink::Component(Rc::downgrade(&component.inner)),
                component.loop_callbacks(),
                component.resize_callbacks(),
            ),
        };

        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
            let mut load_conditions = ConditionSet::new();
            match &parent {
                ParentLink::Host => {
                    load_conditions.push(|| true);
                }
                ParentLink::Component(parent) => {
                    let parent = parent.clone();
                    load_conditions.push(move || parent.upgrade().is_some_and(|p| p.loaded.get()));
                }
            }

            let mut active_conditions = ConditionSet::new();
            let me = weak.clone();
            active_conditions.push(move || me.upgrade().is_some_and(|c| c.loaded.get()));

            let me = weak.clone();
            let frame_fn: Rc<FrameFn> = Rc::new(move |multiplier: f32| {
                if let Some(inner) = me.upgrade() {
                    Component { inner }.on_frame(multiplier);
                }
            });
            let me = weak.clone();
            let resize_fn: Rc<ResizeFn> = Rc::new(move || {
                if let Some(inner) = me.upgrade() {
                    Component { inner }.handle_resize();
                }
            });

            Inner {
                name,
                short_name,
                kind: self.kind,
                context,
                parent,
                parent_loops,
                parent_resizes,
                loaded: Cell::new(false),
                active: Cell::new(false),
                destroyed: Cell::new(false),
                initialized: Cell::new(false),
                position: RefCell::new(ValueLayerStack::new(options.position())),
                rotation: RefCell::new(ValueLayerStack::new(options.rotation())),
                scale: RefCell::new(ValueLayerStack::new(options.scale())),
                options: RefCell::new(options),
                load_conditions: RefCell::new(load_conditions),
                active_conditions: RefCell::new(active_conditions),
                loop_callbacks: Rc::default(),
                resize_callbacks: Rc::default(),
                child_decorators: self.decorators.unwrap_or_default(),
                decorators: RefCell::new(Vec::new()),
                node: Cell::new(None),
                resources: RefCell::new(self.resources),
                hooks: self.hooks,
                pending: RefCell::new(Vec::new()),
                frame_fn,
                resize_fn,
            }
        });

        let component = Component { inner };
        if missing_options {
            component.report(WidgetError::MissingOptions {
                component: component.inner.name.clone(),
            });
        }
        if missing_decorators {
            component.report(WidgetError::MissingDecorators {
                component: component.inner.name.clone(),
            });
        }
        component
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Component {
    #[must_use]
    pub fn builder(parent: impl Into<Parent>) -> ComponentBuilder {
        ComponentBuilder::new(parent)
    }

    /// `<namePrefix>-<shortName>`, fixed at construction.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[inline]
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.inner.short_name
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.inner.kind
    }

    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.inner.loaded.get()
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    #[inline]
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.get()
    }

    #[inline]
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.inner.context
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &SceneRef {
        &self.inner.context.scene
    }

    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.inner.context.diagnostics
    }

    #[inline]
    #[must_use]
    pub fn loop_mode(&self) -> LoopMode {
        self.inner.context.loop_mode
    }

    /// Current merged options.
    #[must_use]
    pub fn options(&self) -> Options {
        self.inner.options.borrow().clone()
    }

    /// The parent component, if the parent is not the host.
    #[must_use]
    pub fn parent(&self) -> Option<Component> {
        match &self.inner.parent {
            ParentLink::Host => None,
            ParentLink::Component(weak) => weak.upgrade().map(|inner| Component { inner }),
        }
    }

    pub(crate) fn has_host_parent(&self) -> bool {
        matches!(self.inner.parent, ParentLink::Host)
    }

    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Component) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakComponent {
        WeakComponent(Rc::downgrade(&self.inner))
    }

    pub(crate) fn report(&self, error: WidgetError) {
        self.inner.context.diagnostics.report(&self.inner.name, error);
    }

    fn log_transition(&self, what: &str) {
        if self.inner.context.debug {
            log::info!("{what} {}", self.inner.name);
        } else {
            log::debug!("{what} {}", self.inner.name);
        }
    }

    // ========================================================================
    // Conditions
    // ========================================================================

    /// Adds a load-gating predicate. Keep the returned handle to remove it.
    pub fn add_load_condition(&self, predicate: impl Fn() -> bool + 'static) -> Predicate {
        self.inner.load_conditions.borrow_mut().push(predicate)
    }

    pub fn remove_load_condition(&self, predicate: &Predicate) -> bool {
        self.inner.load_conditions.borrow_mut().remove(predicate)
    }

    /// Adds an active-gating predicate. Keep the returned handle to remove it.
    pub fn add_active_condition(&self, predicate: impl Fn() -> bool + 'static) -> Predicate {
        self.inner.active_conditions.borrow_mut().push(predicate)
    }

    pub fn remove_active_condition(&self, predicate: &Predicate) -> bool {
        self.inner.active_conditions.borrow_mut().remove(predicate)
    }

    #[must_use]
    pub fn load_condition_count(&self) -> usize {
        self.inner.load_conditions.borrow().len()
    }

    #[must_use]
    pub fn active_condition_count(&self) -> usize {
        self.inner.active_conditions.borrow().len()
    }

    // ========================================================================
    // Callbacks
    // ========================================================================

    /// Frame callbacks this component drives; children register here.
    #[must_use]
    pub fn loop_callbacks(&self) -> Rc<RefCell<CallbackSet<FrameFn>>> {
        Rc::clone(&self.inner.loop_callbacks)
    }

    /// Resize callbacks this component drives; children register here.
    #[must_use]
    pub fn resize_callbacks(&self) -> Rc<RefCell<CallbackSet<ResizeFn>>> {
        Rc::clone(&self.inner.resize_callbacks)
    }

    pub fn add_frame_callback(&self, callback: impl Fn(f32) + 'static) -> Rc<FrameFn> {
        let callback: Rc<FrameFn> = Rc::new(callback);
        self.inner.loop_callbacks.borrow_mut().push(Rc::clone(&callback));
        callback
    }

    pub fn remove_frame_callback(&self, callback: &Rc<FrameFn>) -> bool {
        self.inner.loop_callbacks.borrow_mut().remove(callback)
    }

    pub fn add_resize_callback(&self, callback: impl Fn() + 'static) -> Rc<ResizeFn> {
        let callback: Rc<ResizeFn> = Rc::new(callback);
        self.inner.resize_callbacks.borrow_mut().push(Rc::clone(&callback));
        callback
    }

    pub fn remove_resize_callback(&self, callback: &Rc<ResizeFn>) -> bool {
        self.inner.resize_callbacks.borrow_mut().remove(callback)
    }

    /// Whether this component's own frame callback sits in its parent's set.
    #[must_use]
    pub fn is_registered_with_parent(&self) -> bool {
        self.inner.parent_loops.borrow().contains(&self.inner.frame_fn)
    }

    fn register_with_parent(&self) {
        {
            let mut loops = self.inner.parent_loops.borrow_mut();
            if !loops.contains(&self.inner.frame_fn) {
                loops.push(Rc::clone(&self.inner.frame_fn));
            }
        }
        let mut resizes = self.inner.parent_resizes.borrow_mut();
        if !resizes.contains(&self.inner.resize_fn) {
            resizes.push(Rc::clone(&self.inner.resize_fn));
        }
    }

    fn deregister_from_parent(&self) {
        self.inner.parent_loops.borrow_mut().remove(&self.inner.frame_fn);
        self.inner.parent_resizes.borrow_mut().remove(&self.inner.resize_fn);
    }

    // ========================================================================
    // Transform layers
    // ========================================================================

    fn stack(&self, channel: Channel) -> &RefCell<ValueLayerStack> {
        match channel {
            Channel::Position => &self.inner.position,
            Channel::Rotation => &self.inner.rotation,
            Channel::Scale => &self.inner.scale,
        }
    }

    /// Adds or updates a named contribution on one channel.
    pub fn set_layer(&self, channel: Channel, name: &str, value: Vec3) {
        self.stack(channel).borrow_mut().push(name, value);
    }

    /// Removes a named contribution. The original layer stays.
    pub fn remove_layer(&self, channel: Channel, name: &str) -> Option<Vec3> {
        self.stack(channel).borrow_mut().remove(name)
    }

    #[must_use]
    pub fn layer(&self, channel: Channel, name: &str) -> Option<Vec3> {
        self.stack(channel).borrow().get(name)
    }

    #[must_use]
    pub fn layer_count(&self, channel: Channel) -> usize {
        self.stack(channel).borrow().len()
    }

    /// The authoritative value of a channel: sum for position and rotation,
    /// product for scale.
    #[must_use]
    pub fn composed(&self, channel: Channel) -> Vec3 {
        let stack = self.stack(channel).borrow();
        match channel {
            Channel::Position | Channel::Rotation => stack.sum(),
            Channel::Scale => stack.multiply(),
        }
    }

    /// Writes the composed transform into the owned node.
    ///
    /// Each vector is written only when some axis differs from the node's
    /// current value by more than the channel epsilon.
    pub fn update_transform(&self) -> TransformWrites {
        let Some(handle) = self.inner.node.get() else {
            return TransformWrites::empty();
        };
        let position = self.composed(Channel::Position);
        let rotation = self.composed(Channel::Rotation);
        let scale = self.composed(Channel::Scale);

        let mut scene = self.inner.context.scene.borrow_mut();
        let Some(node) = scene.get_node_mut(handle) else {
            return TransformWrites::empty();
        };
        let transform = &mut node.transform;

        let mut writes = TransformWrites::empty();
        if exceeds(position, transform.position, POSITION_EPSILON) {
            transform.position = position;
            writes |= TransformWrites::POSITION;
        }
        if exceeds(rotation, transform.rotation, ROTATION_EPSILON) {
            transform.rotation = rotation;
            writes |= TransformWrites::ROTATION;
        }
        if exceeds(scale, transform.scale, SCALE_EPSILON) {
            transform.scale = scale;
            writes |= TransformWrites::SCALE;
        }
        writes
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Merges `options` into the current configuration and refreshes the
    /// original transform layers. Does not re-evaluate load or active.
    pub fn update(&self, options: &Options) {
        let (position, rotation, scale) = {
            let mut current = self.inner.options.borrow_mut();
            current.merge(options);
            (current.position(), current.rotation(), current.scale())
        };

        self.inner.position.borrow_mut().set(ORIGINAL, position);
        self.inner.rotation.borrow_mut().set(ORIGINAL, rotation);
        self.inner.scale.borrow_mut().set(ORIGINAL, scale);

        self.inner.hooks.on_update(self);
    }

    /// Forwards uniform values to decorators, the owned material, the
    /// `uniforms` option record and the composer.
    pub fn update_uniforms(&self, uniforms: &UniformMap) {
        for decorator in self.decorator_list() {
            decorator.update_uniforms(uniforms);
        }
        self.inner.resources.borrow_mut().update_uniforms(uniforms);
        if let Some(own) = self.inner.options.borrow_mut().uniforms.as_mut() {
            apply_known(own, uniforms);
        }
    }

    // ========================================================================
    // Decorator registry
    // ========================================================================

    /// Registers an attached decorator instance, replacing one of the same name.
    pub fn register_decorator(&self, name: &str, decorator: Rc<dyn Decorator>) {
        let mut decorators = self.inner.decorators.borrow_mut();
        match decorators.iter_mut().find(|(n, _)| n.as_str() == name) {
            Some(entry) => entry.1 = decorator,
            None => decorators.push((name.to_owned(), decorator)),
        }
    }

    pub fn unregister_decorator(&self, name: &str) -> Option<Rc<dyn Decorator>> {
        let mut decorators = self.inner.decorators.borrow_mut();
        let index = decorators.iter().position(|(n, _)| n.as_str() == name)?;
        Some(decorators.remove(index).1)
    }

    #[must_use]
    pub fn decorator(&self, name: &str) -> Option<Rc<dyn Decorator>> {
        self.inner
            .decorators
            .borrow()
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, d)| Rc::clone(d))
    }

    #[must_use]
    pub fn decorator_names(&self) -> Vec<String> {
        self.inner
            .decorators
            .borrow()
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }

    fn decorator_list(&self) -> Vec<Rc<dyn Decorator>> {
        self.inner
            .decorators
            .borrow()
            .iter()
            .map(|(_, d)| Rc::clone(d))
            .collect()
    }

    // ========================================================================
    // State machine
    // ========================================================================

    /// Re-evaluates the load conditions. See the module docs for the order.
    pub fn evaluate_load(&self) -> TaskFuture {
        let this = self.clone();
        Box::pin(async move {
            this.run_load_evaluation().await;
            Ok(())
        })
    }

    async fn run_load_evaluation(&self) {
        if self.is_destroyed() {
            return;
        }

        let predicates = self.inner.load_conditions.borrow().snapshot();
        let want_loaded = conditions::reduce_and(&predicates);
        let changed = want_loaded != self.inner.loaded.get();
        if changed {
            self.inner.loaded.set(want_loaded);
            if !want_loaded {
                self.evaluate_active();
            }
        }

        let token = CancelToken::new();
        self.inner.pending.borrow_mut().push(token.clone());

        let decorators = self.decorator_list();
        let results = join_all(decorators.iter().map(|d| d.check_if_load())).await;

        self.inner.pending.borrow_mut().retain(|t| !t.same_as(&token));

        let mut failed = false;
        for error in results.into_iter().filter_map(|r| r.err()) {
            self.report(error);
            failed = true;
        }
        if failed {
            return;
        }
        if token.is_canceled() {
            self.report(WidgetError::Canceled(self.inner.name.clone()));
            return;
        }

        if changed {
            let sequence = if want_loaded { self.load() } else { self.unload() };
            if let Err(error) = sequence {
                self.report(error);
                return;
            }
        }

        self.evaluate_active();
    }

    fn load(&self) -> Result<()> {
        self.attach_node();
        self.update_transform();
        self.handle_resize();
        self.register_with_parent();

        self.log_transition("loaded");
        self.inner.hooks.on_load(self)
    }

    fn unload(&self) -> Result<()> {
        self.update_transform();
        self.handle_resize();
        self.detach_node();
        self.deregister_from_parent();

        self.log_transition("unloaded");
        self.inner.hooks.on_unload(self)
    }

    /// Marks every in-flight load evaluation as canceled.
    pub fn cancel_load(&self) {
        for token in self.inner.pending.borrow().iter() {
            token.cancel();
        }
    }

    #[must_use]
    pub fn pending_evaluations(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    /// Re-evaluates the active conditions, then lets every attached
    /// decorator re-evaluate its own.
    pub fn evaluate_active(&self) {
        let predicates = self.inner.active_conditions.borrow().snapshot();
        let want_active = conditions::reduce_and(&predicates);

        match (self.inner.active.get(), want_active) {
            (true, false) => {
                self.inner.active.set(false);
                self.deactivate();
                self.log_transition("inactive");
            }
            (false, true) => {
                self.inner.active.set(true);
                self.activate();
                self.log_transition("active");
            }
            _ => {}
        }

        for decorator in self.decorator_list() {
            decorator.check_if_active();
        }
    }

    fn activate(&self) {
        self.set_node_visible(true);
        self.inner.hooks.on_activate(self);
    }

    fn deactivate(&self) {
        self.set_node_visible(false);
        self.inner.hooks.on_deactivate(self);
    }

    // ========================================================================
    // Frame & resize
    // ========================================================================

    /// One frame: child callbacks in registration order, `on_loop`, the
    /// transform update, then the gated render call.
    pub fn on_frame(&self, multiplier: f32) {
        if self.is_destroyed() {
            return;
        }

        let callbacks = self.inner.loop_callbacks.borrow().snapshot();
        for callback in callbacks {
            callback(multiplier);
        }

        self.inner.hooks.on_loop(self, multiplier);
        self.update_transform();
        self.render();
    }

    pub fn handle_resize(&self) {
        let callbacks = self.inner.resize_callbacks.borrow().snapshot();
        for callback in callbacks {
            callback();
        }

        self.inner.hooks.on_resize(self);
    }

    /// Issues the composer render call while loaded and active.
    pub fn render(&self) -> bool {
        if !(self.is_loaded() && self.is_active()) {
            return false;
        }
        let mut resources = self.inner.resources.borrow_mut();
        match resources.composer_mut() {
            Some(composer) => {
                composer.render(RenderTarget::Screen);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Init & destroy
    // ========================================================================

    /// Creates the owned node, attaches the construction-time decorators
    /// concurrently and runs `on_init`. Runs once; fails with
    /// [`WidgetError::Destroyed`] after `destroy`.
    pub fn init(&self) -> TaskFuture {
        let this = self.clone();
        Box::pin(async move {
            if this.is_destroyed() {
                return Err(WidgetError::Destroyed(this.name().to_owned()));
            }
            if this.inner.initialized.replace(true) {
                return Ok(());
            }

            this.create_node();

            let options = Options::new();
            let attaches = this
                .inner
                .child_decorators
                .iter()
                .map(|d| d.attach(&this, &options));
            for error in join_all(attaches).await.into_iter().filter_map(|r| r.err()) {
                this.report(error);
            }

            Rc::clone(&this.inner.hooks).on_init(this.clone()).await
        })
    }

    /// Unloads, detaches every decorator, runs `on_destroy` and releases the
    /// owned node and render resources. Runs once.
    pub fn destroy(&self) -> TaskFuture {
        let this = self.clone();
        Box::pin(async move {
            if this.inner.destroyed.get() {
                return Ok(());
            }

            this.cancel_load();
            let was_loaded = this.inner.loaded.replace(false);
            this.evaluate_active();
            if was_loaded && let Err(error) = this.unload() {
                this.report(error);
            }
            this.inner.destroyed.set(true);

            let options = Options::new();
            let detaches = this
                .inner
                .child_decorators
                .iter()
                .map(|d| d.detach(&this, &options));
            for error in join_all(detaches).await.into_iter().filter_map(|r| r.err()) {
                this.report(error);
            }

            if let Err(error) = Rc::clone(&this.inner.hooks).on_destroy(this.clone()).await {
                this.report(error);
            }

            let remaining: Vec<_> = this.inner.decorators.borrow_mut().drain(..).collect();
            let detaches = remaining.iter().map(|(_, d)| d.detach(&this, &options));
            for error in join_all(detaches).await.into_iter().filter_map(|r| r.err()) {
                this.report(error);
            }

            this.release_node();
            this.inner.resources.borrow_mut().release();
            this.log_transition("destroyed");
            Ok(())
        })
    }

    /// Whether the owned render resources were released.
    #[must_use]
    pub fn resources_released(&self) -> bool {
        self.inner.resources.borrow().is_released()
    }

    /// Runs `f` with the owned material, if any.
    pub fn with_material<R>(&self, f: impl FnOnce(&Material) -> R) -> Option<R> {
        self.inner.resources.borrow().material().map(f)
    }
}

fn exceeds(target: Vec3, current: Vec3, epsilon: f32) -> bool {
    (target - current).abs().max_element() > epsilon
}

// ============================================================================
// A component is itself a decorator of its parent
// ============================================================================

impl Decorator for Component {
    fn name(&self) -> &str {
        &self.inner.name
    }

    /// Registers under the short name, merges `options` and initialises.
    fn attach(&self, host: &Component, options: &Options) -> TaskFuture {
        let this = self.clone();
        let host = host.clone();
        let options = options.clone();
        Box::pin(async move {
            if this.is_destroyed() {
                return Err(WidgetError::Destroyed(this.name().to_owned()));
            }
            host.register_decorator(this.short_name(), Rc::new(this.clone()));
            this.update(&options);
            this.init().await
        })
    }

    /// Unregisters from the host and destroys.
    fn detach(&self, host: &Component, _options: &Options) -> TaskFuture {
        let this = self.clone();
        let host = host.clone();
        Box::pin(async move {
            host.unregister_decorator(this.short_name());
            this.destroy().await
        })
    }

    fn check_if_load(&self) -> TaskFuture {
        self.evaluate_load()
    }

    fn check_if_active(&self) {
        self.evaluate_active();
    }

    fn update_uniforms(&self, uniforms: &UniformMap) {
        Component::update_uniforms(self, uniforms);
    }
}
