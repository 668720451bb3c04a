//! Theming context supplied by the host UI framework
//!
//! Token sets need two things from the host: containment queries (to scope
//! theme broadcasts) and the theme that applies at a given view.
//! [`ThemedViewTree`] is a ready-made host built on [`ViewTree`].

use crate::broadcast;
use crate::theme::Theme;
use kestrel_core::{Containment, ViewError, ViewId, ViewTree};
use rustc_hash::FxHashMap;
use std::cell::{Ref, RefCell};

/// Host capability consumed by [`ControlTokenSet`](crate::ControlTokenSet)
pub trait ThemeHost: Containment {
    /// The theme in effect at `view`
    fn theme_for(&self, view: ViewId) -> Theme;
}

/// A view tree whose views may carry their own theme.
///
/// A view without an explicit theme inherits from its nearest themed
/// ancestor, and finally from [`Theme::shared`]. Every mutation takes `&self`
/// and releases its borrows before broadcasting, so observers may query the
/// tree while a notification is being delivered.
#[derive(Default)]
pub struct ThemedViewTree {
    tree: RefCell<ViewTree>,
    themes: RefCell<FxHashMap<ViewId, Theme>>,
}

impl ThemedViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_root(&self) -> ViewId {
        self.tree.borrow_mut().insert_root()
    }

    pub fn insert_child(&self, parent: ViewId) -> Result<ViewId, ViewError> {
        self.tree.borrow_mut().insert_child(parent)
    }

    /// Re-parent `view`. Controls inside it should call
    /// [`ControlTokenSet::update`](crate::ControlTokenSet::update) with the
    /// theme of their new context.
    pub fn move_view(&self, view: ViewId, new_parent: Option<ViewId>) -> Result<(), ViewError> {
        self.tree.borrow_mut().move_view(view, new_parent)
    }

    /// Remove `view` and its subtree, forgetting any themes they carried
    pub fn remove(&self, view: ViewId) -> usize {
        let removed = self.tree.borrow_mut().remove(view);
        let mut themes = self.themes.borrow_mut();
        for id in &removed {
            themes.remove(id);
        }
        removed.len()
    }

    /// Read access to the underlying tree
    pub fn tree(&self) -> Ref<'_, ViewTree> {
        self.tree.borrow()
    }

    /// The theme set directly on `view`, ignoring inheritance
    pub fn explicit_theme(&self, view: ViewId) -> Option<Theme> {
        self.themes.borrow().get(&view).cloned()
    }

    /// Assign `theme` to the subtree rooted at `view` and broadcast the change
    /// from `view`. Re-assigning the theme the view already carries is ignored.
    pub fn set_theme(&self, view: ViewId, theme: Theme) -> Result<bool, ViewError> {
        if !self.tree.borrow().contains(view) {
            return Err(ViewError::UnknownView(view));
        }
        {
            let mut themes = self.themes.borrow_mut();
            if themes.get(&view) == Some(&theme) {
                return Ok(false);
            }
            tracing::debug!("set theme {:?} on view {:?}", theme.name(), view);
            themes.insert(view, theme);
        }
        broadcast::post_theme_change(view);
        Ok(true)
    }

    /// Remove the theme set directly on `view` (it inherits again) and broadcast
    pub fn clear_theme(&self, view: ViewId) -> bool {
        let removed = self.themes.borrow_mut().remove(&view).is_some();
        if removed {
            broadcast::post_theme_change(view);
        }
        removed
    }
}

impl Containment for ThemedViewTree {
    fn is_descendant(&self, view: ViewId, ancestor: ViewId) -> bool {
        self.tree.borrow().is_descendant(view, ancestor)
    }
}

impl ThemeHost for ThemedViewTree {
    fn theme_for(&self, view: ViewId) -> Theme {
        let tree = self.tree.borrow();
        let themes = self.themes.borrow();
        tree.ancestors(view)
            .find_map(|id| themes.get(&id).cloned())
            .unwrap_or_else(Theme::shared)
    }
}
