//! Render Resources
//!
//! CPU-side descriptions of the render resources a component may own:
//! - [`Material`]: uniform values and shader defines
//! - [`Geometry`]: shape descriptor
//! - [`uniforms`]: the [`UniformValue`] map shared by materials and composers
//!
//! Ownership is explicit. A component holds its resources in an
//! [`OwnedResources`] guard; [`OwnedResources::release`] disposes them
//! synchronously on destroy, and dropping the guard releases anything that
//! was not released yet.

pub mod geometry;
pub mod material;
pub mod uniforms;

pub use geometry::{Geometry, GeometryShape};
pub use material::Material;
pub use uniforms::{UniformMap, UniformValue};

use crate::render::Composer;

/// A resource whose backing storage must be freed explicitly.
pub trait Dispose {
    fn dispose(&mut self);
}

/// Scoped holder of the render resources exclusively owned by one component.
#[derive(Default)]
pub struct OwnedResources {
    material: Option<Material>,
    geometry: Option<Geometry>,
    composer: Option<Box<dyn Composer>>,
    released: bool,
}

impl OwnedResources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mesh(mut self, material: Material, geometry: Geometry) -> Self {
        self.material = Some(material);
        self.geometry = Some(geometry);
        self
    }

    #[must_use]
    pub fn with_composer(mut self, composer: Box<dyn Composer>) -> Self {
        self.composer = Some(composer);
        self
    }

    #[inline]
    #[must_use]
    pub fn has_mesh(&self) -> bool {
        self.material.is_some()
    }

    #[inline]
    #[must_use]
    pub fn has_composer(&self) -> bool {
        self.composer.is_some()
    }

    #[must_use]
    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    #[must_use]
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn composer_mut(&mut self) -> Option<&mut (dyn Composer + 'static)> {
        self.composer.as_deref_mut()
    }

    #[inline]
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Forwards uniform values to the material and the composer.
    pub fn update_uniforms(&mut self, values: &UniformMap) {
        if self.released {
            return;
        }
        if let Some(material) = self.material.as_mut() {
            material.update_uniforms(values);
        }
        if let Some(composer) = self.composer.as_mut() {
            composer.update_uniforms(values);
        }
    }

    /// Disposes every held resource. Returns `false` if already released.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;

        if let Some(material) = self.material.as_mut() {
            material.dispose();
        }
        if let Some(geometry) = self.geometry.as_mut() {
            geometry.dispose();
        }
        if let Some(composer) = self.composer.as_mut() {
            composer.dispose();
        }
        true
    }
}

impl Drop for OwnedResources {
    fn drop(&mut self) {
        self.release();
    }
}
