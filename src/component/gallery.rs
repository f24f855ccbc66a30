//! Gallery components.
//!
//! A gallery is a group that lays out `total` mesh children on a ring at
//! evenly spaced depth offsets between `minDepth` and `maxDepth`, rotated
//! by `3π/4` per step. The media records of its data source are read once on
//! init and served round-robin through [`GalleryComponent::next_pooled_texture`].
//! Building the ring leaves the pool cursor untouched.
//!
//! | child   | z                            | angle      |
//! |---------|------------------------------|------------|
//! | `we_0`  | `BASE_DEPTH_OFFSET`          | `0`        |
//! | `we_i`  | `BASE_DEPTH_OFFSET - i·step` | `i · 3π/4` |
//!
//! where `step = (maxDepth - minDepth) / total`.

use std::cell::RefCell;
use std::f32::consts::PI;
use std::ops::Deref;
use std::rc::Rc;

use futures::future::join_all;

use crate::assets::{DataSource, Texture, TexturePool};
use crate::component::base::{Component, Parent};
use crate::component::decorator::{Decorator, TaskFuture};
use crate::component::hooks::Hooks;
use crate::component::mesh::MeshDecorator;
use crate::options::{Options, defaults};

/// Depth added to every ring slot.
pub const BASE_DEPTH_OFFSET: f32 = 1000.0;
/// Angular distance between consecutive ring slots.
pub const ANGLE_STEP: f32 = 3.0 * PI / 4.0;

/// Layout of one ring slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub z: f32,
    pub angle: f32,
}

/// Computes the ring layout for `total` children.
#[must_use]
pub fn ring_layout(total: usize, min_depth: f32, max_depth: f32) -> Vec<Placement> {
    if total == 0 {
        return Vec::new();
    }
    let step = (max_depth - min_depth) / total as f32;
    (0..total)
        .map(|i| {
            let i = i as f32;
            Placement {
                z: -i * step + BASE_DEPTH_OFFSET,
                angle: i * ANGLE_STEP,
            }
        })
        .collect()
}

/// Short name of the ring child at `index`.
#[must_use]
pub fn item_name(index: usize) -> String {
    format!("we_{index}")
}

struct GalleryState {
    source: Box<dyn DataSource>,
    pool: RefCell<TexturePool>,
    mesh: MeshDecorator,
    items: RefCell<Vec<String>>,
}

impl GalleryState {
    fn next_texture(&self) -> Option<Texture> {
        self.pool.borrow().next_texture()
    }
}

impl Hooks for GalleryState {
    fn on_init(self: Rc<Self>, component: Component) -> TaskFuture {
        Box::pin(async move {
            *self.pool.borrow_mut() = TexturePool::new(self.source.items());

            let options = component.options();
            let total = options.total.unwrap_or(defaults::GALLERY_TOTAL);
            let min_depth = options.min_depth.unwrap_or(defaults::GALLERY_MIN_DEPTH);
            let max_depth = options.max_depth.unwrap_or(defaults::GALLERY_MAX_DEPTH);

            let mut attaches = Vec::with_capacity(total);
            for (i, placement) in ring_layout(total, min_depth, max_depth).into_iter().enumerate() {
                let name = item_name(i);
                let item = Options {
                    short_name: Some(name.clone()),
                    z: Some(placement.z),
                    angle: Some(placement.angle),
                    min_depth: Some(min_depth),
                    max_depth: Some(max_depth),
                    background: options.background.clone(),
                    defines: options.defines.clone(),
                    uniforms: options.uniforms.clone(),
                    ..Options::default()
                };

                self.items.borrow_mut().push(name);
                attaches.push(self.mesh.attach(&component, &item));
            }

            for error in join_all(attaches).await.into_iter().filter_map(Result::err) {
                component.diagnostics().report(component.name(), error);
            }
            Ok(())
        })
    }

    fn on_destroy(self: Rc<Self>, component: Component) -> TaskFuture {
        Box::pin(async move {
            let names: Vec<String> = self.items.borrow_mut().drain(..).collect();
            let detaches = names.into_iter().map(|name| {
                self.mesh
                    .detach(&component, &Options::new().with_short_name(name))
            });
            for error in join_all(detaches).await.into_iter().filter_map(Result::err) {
                component.diagnostics().report(component.name(), error);
            }
            Ok(())
        })
    }
}

/// A group component owning a ring of mesh children and a texture pool.
#[derive(Clone)]
pub struct GalleryComponent {
    component: Component,
    state: Rc<GalleryState>,
}

impl GalleryComponent {
    #[must_use]
    pub fn new(
        parent: impl Into<Parent>,
        options: Options,
        decorators: Vec<Rc<dyn Decorator>>,
        source: impl DataSource + 'static,
    ) -> Self {
        Self::with_mesh(parent, options, decorators, source, MeshDecorator::default())
    }

    /// Like [`new`](Self::new) with a custom mesh decorator for the ring.
    #[must_use]
    pub fn with_mesh(
        parent: impl Into<Parent>,
        options: Options,
        decorators: Vec<Rc<dyn Decorator>>,
        source: impl DataSource + 'static,
        mesh: MeshDecorator,
    ) -> Self {
        let state = Rc::new(GalleryState {
            source: Box::new(source),
            pool: RefCell::new(TexturePool::default()),
            mesh,
            items: RefCell::new(Vec::new()),
        });
        let component = Component::builder(parent)
            .group()
            .defaults(defaults::gallery())
            .options(options)
            .decorators(decorators)
            .hooks(state.clone())
            .build();
        Self { component, state }
    }

    #[must_use]
    pub fn component(&self) -> &Component {
        &self.component
    }

    /// Returns the pooled texture at the rotating index and advances it.
    ///
    /// Consecutive calls return different slots until the pool is exhausted,
    /// then wrap. `None` while the pool is empty.
    pub fn next_pooled_texture(&self) -> Option<Texture> {
        self.state.next_texture()
    }

    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.state.pool.borrow().len()
    }

    /// Short names of the ring children currently attached.
    #[must_use]
    pub fn item_names(&self) -> Vec<String> {
        self.state.items.borrow().clone()
    }
}

impl Deref for GalleryComponent {
    type Target = Component;

    fn deref(&self) -> &Component {
        &self.component
    }
}

impl From<GalleryComponent> for Component {
    fn from(gallery: GalleryComponent) -> Self {
        gallery.component
    }
}
