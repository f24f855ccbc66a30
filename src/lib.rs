#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod assets;
pub mod component;
pub mod errors;
pub mod host;
pub mod options;
pub mod render;
pub mod resources;
pub mod scene;
pub mod utils;

pub use assets::{DataSource, MediaItem, MediaKind, Texture, TexturePool};
pub use component::{
    CallbackSet, CancelToken, Channel, Component, ComponentBuilder, ComponentKind, ConditionSet,
    Decorator, GalleryComponent, GroupComponent, Hooks, MeshDecorator, NoHooks, Parent,
    TaskFuture, TransformWrites, ValueLayerStack,
};
pub use errors::{Diagnostics, Report, Result, Severity, WidgetError};
pub use host::{Context, Host, HostConfig, LoopMode};
pub use options::Options;
pub use render::{Composer, RenderTarget};
pub use resources::{Geometry, Material, OwnedResources, UniformMap, UniformValue};
pub use scene::{Node, NodeHandle, NodeKind, Scene, SceneRef};
