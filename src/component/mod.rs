//! Component module
//!
//! The widget tree and its lifecycle:
//! - [`Component`]: load/active state machine, layered transform, decorator registry
//! - [`GroupComponent`]: owns a group node children attach under
//! - [`GalleryComponent`]: a group laying out a ring of mesh children
//! - [`Decorator`]: pluggable behaviour attached to a component
//! - [`ValueLayerStack`], [`ConditionSet`], [`CallbackSet`]: the building blocks
//!
//! # Data flow
//!
//! ```text
//! Host::check_if_load
//!   └─ Component::evaluate_load
//!        ├─ flip `loaded` from the load conditions
//!        ├─ join_all(decorator.check_if_load())   ← children recurse here
//!        ├─ load / unload sequence
//!        └─ Component::evaluate_active
//!             └─ decorator.check_if_active()
//! ```

pub mod base;
pub mod callbacks;
pub mod cancel;
pub mod conditions;
pub mod decorator;
pub mod gallery;
pub mod group;
pub mod hooks;
pub mod layers;
pub mod mesh;

pub use base::{
    Channel, Component, ComponentBuilder, ComponentKind, Parent, POSITION_EPSILON,
    ROTATION_EPSILON, SCALE_EPSILON, TransformWrites, WeakComponent,
};
pub use callbacks::{CallbackSet, FrameFn, ResizeFn};
pub use cancel::CancelToken;
pub use conditions::{ConditionSet, Predicate};
pub use decorator::{Decorator, TaskFuture, done};
pub use gallery::{GalleryComponent, Placement, ring_layout};
pub use group::GroupComponent;
pub use hooks::{Hooks, NoHooks};
pub use layers::{Layer, ORIGINAL, ValueLayerStack};
pub use mesh::{MeshDecorator, PLACEMENT};
