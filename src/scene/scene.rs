use std::cell::RefCell;
use std::rc::Rc;

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::{Node, NodeKind};

/// Shared handle to the scene graph.
///
/// The tree is single-threaded; every component mutates only the node it owns
/// and never keeps the borrow across a suspension point.
pub type SceneRef = Rc<RefCell<Scene>>;

/// Scene graph.
///
/// An arena of [`Node`]s with one permanent root. Nodes may exist detached
/// (created but not yet added under any parent); only nodes reachable from
/// the root are part of the rendered scene.
#[derive(Debug)]
pub struct Scene {
    nodes: SlotMap<NodeHandle, Node>,
    root: NodeHandle,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("scene", NodeKind::Root));
        Self { nodes, root }
    }

    #[must_use]
    pub fn shared() -> SceneRef {
        Rc::new(RefCell::new(Self::new()))
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Number of nodes in the arena, the root included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Creates a detached node.
    pub fn create_node(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeHandle {
        self.nodes.insert(Node::new(name, kind))
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Adds `child` under `parent`, detaching it from any previous parent.
    pub fn add(&mut self, parent: NodeHandle, child: NodeHandle) {
        if child == parent {
            log::warn!("Cannot add a node to itself");
            return;
        }
        if child == self.root {
            log::warn!("The scene root cannot be re-parented");
            return;
        }
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            log::error!("Node not found while adding to scene");
            return;
        }

        self.detach(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// Removes `child` from `parent`. The node stays in the arena.
    pub fn remove(&mut self, parent: NodeHandle, child: NodeHandle) {
        let is_child = self
            .nodes
            .get(child)
            .is_some_and(|c| c.parent == Some(parent));
        if is_child {
            self.detach(child);
        }
    }

    fn detach(&mut self, child: NodeHandle) {
        let Some(old_parent) = self.nodes.get(child).and_then(Node::parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(old_parent)
            && let Some(i) = p.children.iter().position(|&x| x == child)
        {
            p.children.remove(i);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = None;
        }
    }

    /// Deletes a node and its whole subtree from the arena.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        if handle == self.root {
            log::warn!("The scene root cannot be removed");
            return;
        }
        self.detach(handle);

        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
            }
        }
    }

    /// Whether the node is reachable from the scene root.
    #[must_use]
    pub fn is_attached(&self, handle: NodeHandle) -> bool {
        let mut current = Some(handle);
        while let Some(h) = current {
            if h == self.root {
                return true;
            }
            current = self.nodes.get(h).and_then(Node::parent);
        }
        false
    }

    /// Whether the node and all its ancestors are renderable.
    #[must_use]
    pub fn is_rendered(&self, handle: NodeHandle) -> bool {
        let mut current = Some(handle);
        while let Some(h) = current {
            let Some(node) = self.nodes.get(h) else {
                return false;
            };
            if !node.visible {
                return false;
            }
            if h == self.root {
                return true;
            }
            current = node.parent;
        }
        false
    }

    // ========================================================================
    // Matrix update
    // ========================================================================

    /// Propagates local matrices down from the root into world matrices.
    pub fn update_matrix_world(&mut self) {
        let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);
        stack.push((self.root, Affine3A::IDENTITY, false));

        while let Some((handle, parent_world, parent_changed)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };

            let local_changed = node.transform.update_local_matrix();
            let world_needs_update = local_changed || parent_changed;
            if world_needs_update {
                let world = parent_world * *node.transform.local_matrix();
                node.transform.set_world_matrix(world);
            }

            let current_world = node.transform.world_matrix;
            for &child in node.children.iter().rev() {
                stack.push((child, current_world, world_needs_update));
            }
        }
    }
}
