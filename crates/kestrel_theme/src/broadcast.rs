//! Theme-change broadcast
//!
//! When the theme of a subtree changes, the host posts a notification from the
//! subtree's root view. The notification carries only that origin view; each
//! observer decides whether it lives inside the origin and, if so, looks up
//! the new theme itself.
//!
//! Delivery is synchronous and confined to the posting thread, like the rest
//! of the UI-thread machinery.

use kestrel_core::ViewId;
use std::cell::RefCell;
use std::rc::Rc;

type Observer = Rc<dyn Fn(ViewId)>;

#[derive(Default)]
struct ThemeChangeCenter {
    next_id: u64,
    observers: Vec<(u64, Observer)>,
}

impl ThemeChangeCenter {
    fn is_registered(&self, id: u64) -> bool {
        self.observers.iter().any(|(observer_id, _)| *observer_id == id)
    }
}

thread_local! {
    static THEME_CHANGES: RefCell<ThemeChangeCenter> = RefCell::new(ThemeChangeCenter::default());
}

/// Handle for an active theme-change observer.
///
/// Dropping the handle (or calling [`cancel`](Self::cancel)) stops delivery.
#[must_use = "dropping the subscription stops delivery"]
pub struct ThemeChangeSubscription {
    id: Option<u64>,
}

impl ThemeChangeSubscription {
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Stop receiving notifications. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            let _ = THEME_CHANGES.try_with(|center| {
                center
                    .borrow_mut()
                    .observers
                    .retain(|(observer_id, _)| *observer_id != id);
            });
        }
    }
}

impl Drop for ThemeChangeSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Observe every theme change posted on this thread
pub fn observe_theme_changes<F>(observer: F) -> ThemeChangeSubscription
where
    F: Fn(ViewId) + 'static,
{
    let id = THEME_CHANGES.with(|center| {
        let mut center = center.borrow_mut();
        center.next_id += 1;
        let id = center.next_id;
        center.observers.push((id, Rc::new(observer)));
        id
    });
    ThemeChangeSubscription { id: Some(id) }
}

/// Announce that the theme of the subtree rooted at `origin` changed.
///
/// Returns the number of observers notified. Observers cancelled by an
/// earlier observer during the same delivery are skipped.
pub fn post_theme_change(origin: ViewId) -> usize {
    let snapshot: Vec<(u64, Observer)> = THEME_CHANGES
        .try_with(|center| center.borrow().observers.clone())
        .unwrap_or_default();

    tracing::debug!(
        "theme change posted from {:?} to {} observer(s)",
        origin,
        snapshot.len()
    );

    let mut delivered = 0;
    for (id, observer) in snapshot {
        let still_registered = THEME_CHANGES
            .try_with(|center| center.borrow().is_registered(id))
            .unwrap_or(false);
        if still_registered {
            observer(origin);
            delivered += 1;
        }
    }
    delivered
}

/// Number of live observers on this thread
pub fn observer_count() -> usize {
    THEME_CHANGES
        .try_with(|center| center.borrow().observers.len())
        .unwrap_or(0)
}
