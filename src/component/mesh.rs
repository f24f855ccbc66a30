//! Mesh decorator.
//!
//! [`MeshDecorator`] attaches a renderable child to a host component. The
//! child owns a plane [`Geometry`] and a [`Material`] built from the
//! options' `uniforms` and `defines`, is placed through a dedicated
//! `placement` layer (`z` on position, `angle` on rotation), and is
//! registered on the host under its short name.

use std::rc::Rc;

use glam::Vec3;

use crate::component::base::{Channel, Component};
use crate::component::decorator::{Decorator, TaskFuture};
use crate::errors::WidgetError;
use crate::options::{Options, defaults};
use crate::resources::{Geometry, Material};

/// Layer name carrying the layout offset of a mesh child.
pub const PLACEMENT: &str = "placement";

/// Builds mesh children on attach and destroys them on detach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDecorator {
    pub width: f32,
    pub height: f32,
}

impl Default for MeshDecorator {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

impl MeshDecorator {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Builds, but does not attach, the mesh child for `options`.
    #[must_use]
    pub fn build_child(&self, host: &Component, options: &Options) -> Component {
        let options = options.over(defaults::mesh());
        let material = Material::new(
            options.uniforms.clone().unwrap_or_default(),
            options.defines.clone().unwrap_or_default(),
        );
        let geometry = Geometry::plane(self.width, self.height);

        let child = Component::builder(host)
            .mesh(material, geometry)
            .options(options.clone())
            .decorators(Vec::new())
            .build();

        child.set_layer(
            Channel::Position,
            PLACEMENT,
            Vec3::new(0.0, 0.0, options.z.unwrap_or(0.0)),
        );
        child.set_layer(
            Channel::Rotation,
            PLACEMENT,
            Vec3::new(0.0, 0.0, options.angle.unwrap_or(0.0)),
        );
        child
    }
}

impl Decorator for MeshDecorator {
    fn name(&self) -> &str {
        "mesh"
    }

    fn attach(&self, host: &Component, options: &Options) -> TaskFuture {
        let child = self.build_child(host, options);
        let host = host.clone();
        let options = options.clone();
        Box::pin(async move { child.attach(&host, &options).await })
    }

    fn detach(&self, host: &Component, options: &Options) -> TaskFuture {
        let host = host.clone();
        let short_name = options.short_name().to_owned();
        let options = options.clone();
        Box::pin(async move {
            let child: Rc<dyn Decorator> = host
                .decorator(&short_name)
                .ok_or(WidgetError::DecoratorNotFound(short_name))?;
            child.detach(&host, &options).await
        })
    }
}
