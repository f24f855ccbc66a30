//! Scene graph module
//!
//! The external scene graph the components write into:
//! - Node: hierarchy, renderability flag and transform
//! - Transform: position, Euler rotation and scale with matrix cache
//! - Scene: arena of nodes with a permanent root

pub mod node;
pub mod scene;
pub mod transform;

pub use node::{Node, NodeKind};
pub use scene::{Scene, SceneRef};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
