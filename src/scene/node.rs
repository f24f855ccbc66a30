use crate::scene::NodeHandle;
use crate::scene::transform::Transform;
use glam::Affine3A;

/// What a node stands for in the external rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The permanent scene root.
    Root,
    /// A child-bearing group owned by a group component.
    Group,
    /// A renderable mesh owned by a mesh component.
    Mesh,
}

/// A scene node.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child links:
/// - `parent`: handle of the parent (None when detached or for the root)
/// - `children`: handles of the children, in insertion order
///
/// # Renderability
///
/// `visible` is the renderability flag. Components toggle it on
/// activate/deactivate instead of removing the node from the graph, so group
/// and mesh nodes start invisible.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,

    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: kind == NodeKind::Root,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}
