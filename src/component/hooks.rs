use std::rc::Rc;

use crate::component::Component;
use crate::component::decorator::{TaskFuture, done};
use crate::errors::Result;

/// User-overridable lifecycle hooks.
///
/// All methods default to no-ops. `on_init` and `on_destroy` may suspend;
/// the rest run synchronously inside the state machine and must not await.
/// Errors returned from `on_load`/`on_unload` are reported, never propagated.
pub trait Hooks {
    fn on_init(self: Rc<Self>, _component: Component) -> TaskFuture {
        done()
    }

    fn on_destroy(self: Rc<Self>, _component: Component) -> TaskFuture {
        done()
    }

    fn on_load(&self, _component: &Component) -> Result<()> {
        Ok(())
    }

    fn on_unload(&self, _component: &Component) -> Result<()> {
        Ok(())
    }

    fn on_activate(&self, _component: &Component) {}

    fn on_deactivate(&self, _component: &Component) {}

    fn on_update(&self, _component: &Component) {}

    fn on_loop(&self, _component: &Component, _multiplier: f32) {}

    fn on_resize(&self, _component: &Component) {}
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl Hooks for NoHooks {}
