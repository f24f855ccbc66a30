//! Group components and scene-node ownership.
//!
//! A group owns one child-bearing scene node. The node is created detached
//! and invisible on init, added under the parent's attachment point on load,
//! shown on activate, hidden on deactivate, removed on unload and deleted on
//! destroy. Children of the group attach their own nodes under it.

use std::ops::Deref;
use std::rc::Rc;

use crate::component::Decorator;
use crate::component::base::{Component, ComponentBuilder, ComponentKind, Parent};
use crate::errors::WidgetError;
use crate::options::Options;
use crate::scene::{NodeHandle, NodeKind};

/// A [`Component`] owning a group node.
#[derive(Clone)]
pub struct GroupComponent {
    component: Component,
}

impl GroupComponent {
    /// Builder preset to the group kind and its defaults.
    #[must_use]
    pub fn builder(parent: impl Into<Parent>) -> ComponentBuilder {
        Component::builder(parent).group()
    }

    #[must_use]
    pub fn new(
        parent: impl Into<Parent>,
        options: Options,
        decorators: Vec<Rc<dyn Decorator>>,
    ) -> Self {
        Self {
            component: Self::builder(parent)
                .options(options)
                .decorators(decorators)
                .build(),
        }
    }

    #[must_use]
    pub fn component(&self) -> &Component {
        &self.component
    }

    /// The group node, once initialised.
    #[must_use]
    pub fn group_node(&self) -> Option<NodeHandle> {
        self.component.node()
    }
}

impl Deref for GroupComponent {
    type Target = Component;

    fn deref(&self) -> &Component {
        &self.component
    }
}

impl From<GroupComponent> for Component {
    fn from(group: GroupComponent) -> Self {
        group.component
    }
}

// ============================================================================
// Node helpers
// ============================================================================

impl Component {
    /// The owned scene node, if this kind owns one and it was created.
    #[inline]
    #[must_use]
    pub fn node(&self) -> Option<NodeHandle> {
        self.inner.node.get()
    }

    /// Where children of this component attach their nodes.
    ///
    /// A group offers its own node, a base component defers to its parent,
    /// and a mesh offers nothing.
    #[must_use]
    pub fn attachment_point(&self) -> Option<NodeHandle> {
        match self.inner.kind {
            ComponentKind::Group => self.node(),
            ComponentKind::Mesh => None,
            ComponentKind::Base => self.parent_attachment_point(),
        }
    }

    fn parent_attachment_point(&self) -> Option<NodeHandle> {
        match self.parent() {
            Some(parent) => parent.attachment_point(),
            None if self.has_host_parent() => Some(self.scene().borrow().root()),
            None => None,
        }
    }

    pub(crate) fn create_node(&self) {
        let kind = match self.inner.kind {
            ComponentKind::Base => return,
            ComponentKind::Group => NodeKind::Group,
            ComponentKind::Mesh => NodeKind::Mesh,
        };
        if self.node().is_some() {
            return;
        }

        let handle = self.scene().borrow_mut().create_node(self.name(), kind);
        self.inner.node.set(Some(handle));

        if self.parent_attachment_point().is_none() {
            self.report(WidgetError::MissingAttachPoint {
                component: self.name().to_owned(),
            });
        }
    }

    pub(crate) fn attach_node(&self) {
        let Some(handle) = self.node() else {
            return;
        };
        match self.parent_attachment_point() {
            Some(parent) => self.scene().borrow_mut().add(parent, handle),
            None => self.report(WidgetError::MissingAttachPoint {
                component: self.name().to_owned(),
            }),
        }
    }

    pub(crate) fn detach_node(&self) {
        let Some(handle) = self.node() else {
            return;
        };
        let mut scene = self.scene().borrow_mut();
        if let Some(parent) = scene.get_node(handle).and_then(|n| n.parent()) {
            scene.remove(parent, handle);
        }
    }

    pub(crate) fn release_node(&self) {
        if let Some(handle) = self.inner.node.take() {
            self.scene().borrow_mut().remove_node(handle);
        }
    }

    pub(crate) fn set_node_visible(&self, visible: bool) {
        let Some(handle) = self.node() else {
            return;
        };
        if let Some(node) = self.scene().borrow_mut().get_node_mut(handle) {
            node.visible = visible;
        }
    }

    /// Whether the owned node is currently reachable from the scene root.
    #[must_use]
    pub fn is_node_attached(&self) -> bool {
        self.node()
            .is_some_and(|handle| self.scene().borrow().is_attached(handle))
    }

    /// Whether the owned node is renderable.
    #[must_use]
    pub fn is_node_visible(&self) -> bool {
        self.node().is_some_and(|handle| {
            self.scene()
                .borrow()
                .get_node(handle)
                .is_some_and(|n| n.visible)
        })
    }
}
