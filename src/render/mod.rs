//! Renderer Interface
//!
//! The widget tree does not rasterise anything. Components that own a
//! composited render target talk to the external rendering engine through
//! the [`Composer`] trait and issue one render call per frame while they are
//! both loaded and active.

use crate::resources::UniformMap;

/// Where a composer writes its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderTarget {
    /// The default framebuffer.
    #[default]
    Screen,
}

/// Post-processing composer owned by a component.
pub trait Composer {
    fn render(&mut self, target: RenderTarget);

    fn update_uniforms(&mut self, _uniforms: &UniformMap) {}

    /// Releases GPU-side storage. Called exactly once.
    fn dispose(&mut self);
}
