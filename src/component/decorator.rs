//! Decorator capability interface.

use futures::future::{self, LocalBoxFuture};

use crate::component::Component;
use crate::errors::Result;
use crate::options::Options;
use crate::resources::UniformMap;

/// A pending step of the single-threaded task queue.
pub type TaskFuture = LocalBoxFuture<'static, Result<()>>;

/// An already-completed task.
#[must_use]
pub fn done() -> TaskFuture {
    Box::pin(future::ok(()))
}

/// A pluggable behaviour extension attachable to a [`Component`].
///
/// `attach`/`detach` are mandatory. The remaining capabilities default to
/// no-ops so implementors only override what they contribute. Futures are
/// `'static`: implementors clone the handles they need.
pub trait Decorator {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    fn attach(&self, host: &Component, options: &Options) -> TaskFuture;

    fn detach(&self, host: &Component, options: &Options) -> TaskFuture;

    /// Re-evaluates the decorator's own load condition.
    fn check_if_load(&self) -> TaskFuture {
        done()
    }

    /// Re-evaluates the decorator's own active condition.
    fn check_if_active(&self) {}

    fn update_uniforms(&self, _uniforms: &UniformMap) {}
}
