//! View containment
//!
//! The token engine never walks a real view hierarchy itself. It only needs
//! to ask whether one view is contained in another, which is expressed by the
//! [`Containment`] capability. [`ViewTree`] is a small reference hierarchy that
//! hosts (and tests) can use directly.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use thiserror::Error;

new_key_type! {
    /// Unique identifier for a view
    pub struct ViewId;
}

/// Answers view-containment queries for the host UI framework
pub trait Containment {
    /// Whether `view` is `ancestor` or is nested (at any depth) inside it
    fn is_descendant(&self, view: ViewId, ancestor: ViewId) -> bool;
}

/// Errors raised by [`ViewTree`] mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("view {0:?} is not part of this tree")]
    UnknownView(ViewId),

    #[error("moving {view:?} under {parent:?} would create a cycle")]
    Cycle { view: ViewId, parent: ViewId },
}

#[derive(Default)]
struct ViewNode {
    parent: Option<ViewId>,
    children: SmallVec<[ViewId; 4]>,
}

/// A parent/child hierarchy of views
#[derive(Default)]
pub struct ViewTree {
    nodes: SlotMap<ViewId, ViewNode>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a view with no parent (a window or a detached subtree root)
    pub fn insert_root(&mut self) -> ViewId {
        self.nodes.insert(ViewNode::default())
    }

    /// Insert a new view as the last child of `parent`
    pub fn insert_child(&mut self, parent: ViewId) -> Result<ViewId, ViewError> {
        if !self.nodes.contains_key(parent) {
            return Err(ViewError::UnknownView(parent));
        }
        let child = self.nodes.insert(ViewNode {
            parent: Some(parent),
            children: SmallVec::new(),
        });
        self.nodes[parent].children.push(child);
        Ok(child)
    }

    /// Re-parent `view`. Passing `None` detaches it into its own root.
    pub fn move_view(&mut self, view: ViewId, new_parent: Option<ViewId>) -> Result<(), ViewError> {
        if !self.nodes.contains_key(view) {
            return Err(ViewError::UnknownView(view));
        }
        if let Some(parent) = new_parent {
            if !self.nodes.contains_key(parent) {
                return Err(ViewError::UnknownView(parent));
            }
            if self.is_descendant(parent, view) {
                return Err(ViewError::Cycle { view, parent });
            }
        }

        self.detach(view);
        self.nodes[view].parent = new_parent;
        if let Some(parent) = new_parent {
            self.nodes[parent].children.push(view);
        }
        tracing::trace!("moved view {:?} under {:?}", view, new_parent);
        Ok(())
    }

    /// Remove `view` and its whole subtree, returning the removed views
    pub fn remove(&mut self, view: ViewId) -> Vec<ViewId> {
        let mut removed = Vec::new();
        if !self.nodes.contains_key(view) {
            return removed;
        }
        self.detach(view);

        let mut pending = vec![view];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.nodes.remove(id) {
                pending.extend(node.children);
                removed.push(id);
            }
        }
        removed
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.nodes.contains_key(view)
    }

    pub fn parent(&self, view: ViewId) -> Option<ViewId> {
        self.nodes.get(view).and_then(|node| node.parent)
    }

    pub fn children(&self, view: ViewId) -> &[ViewId] {
        self.nodes
            .get(view)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate from `view` (inclusive) up to its root
    pub fn ancestors(&self, view: ViewId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.nodes.contains_key(view).then_some(view),
        }
    }

    /// The topmost ancestor of `view`
    pub fn root_of(&self, view: ViewId) -> Option<ViewId> {
        self.ancestors(view).last()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn detach(&mut self, view: ViewId) {
        if let Some(parent) = self.nodes[view].parent.take() {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|child| *child != view);
            }
        }
    }
}

impl Containment for ViewTree {
    fn is_descendant(&self, view: ViewId, ancestor: ViewId) -> bool {
        self.ancestors(view).any(|id| id == ancestor)
    }
}

/// Iterator returned by [`ViewTree::ancestors`]
pub struct Ancestors<'a> {
    tree: &'a ViewTree,
    next: Option<ViewId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ViewId;

    fn next(&mut self) -> Option<ViewId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
