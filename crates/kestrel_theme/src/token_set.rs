//! Control token sets
//!
//! A [`ControlTokenSet`] is owned by one control instance and answers "what
//! value does token `K` have right now". Reads resolve through three layers:
//!
//! 1. the instance override layer, written through [`ControlTokenSet::set`]
//! 2. the override layer the current [`Theme`] registers for `K`
//! 3. the compiled-in default provider bound at construction
//!
//! Writes and theme replacements mark the set as changed. If a control has
//! registered with [`ControlTokenSet::register_on_update`], its callback is
//! queued on the UI-thread dispatch queue and runs on the next turn, once per
//! turn no matter how many changes were made in between. The callback reads
//! the set as it is when the callback runs.

use crate::broadcast::{self, ThemeChangeSubscription};
use crate::host::ThemeHost;
use crate::key::TokenSetKey;
use crate::theme::{Theme, TokenOverrides};
use crate::value::ControlTokenValue;
use kestrel_core::{dispatch, ViewId};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use thiserror::Error;

/// Default value provider: must cover every key of `K`
pub type DefaultsFn<K> = dyn Fn(K, &Theme) -> ControlTokenValue;

/// Errors raised by [`ControlTokenSet::register_on_update`]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    /// The set already has an observer. The existing registration is kept.
    #[error("token set is already registered for updates from view {existing:?}")]
    AlreadyRegistered { existing: ViewId },
}

struct Observer {
    registration: u64,
    control: ViewId,
    on_update: Rc<dyn Fn()>,
    update_pending: Cell<bool>,
    // Dropping the subscription detaches from the theme broadcast.
    _theme_changes: ThemeChangeSubscription,
}

struct TokenSetState<K: TokenSetKey> {
    theme: RefCell<Theme>,
    overrides: RefCell<Option<TokenOverrides<K>>>,
    defaults: Box<DefaultsFn<K>>,
    observer: RefCell<Option<Observer>>,
    registrations: Cell<u64>,
}

/// Per-control token storage with change notification
pub struct ControlTokenSet<K: TokenSetKey> {
    inner: Rc<TokenSetState<K>>,
}

impl<K: TokenSetKey> ControlTokenSet<K> {
    /// Create a token set bound to the process-wide [`Theme::shared`]
    pub fn new<F>(defaults: F) -> Self
    where
        F: Fn(K, &Theme) -> ControlTokenValue + 'static,
    {
        Self::with_theme(Theme::shared(), defaults)
    }

    /// Create a token set bound to an explicit theme
    pub fn with_theme<F>(theme: Theme, defaults: F) -> Self
    where
        F: Fn(K, &Theme) -> ControlTokenValue + 'static,
    {
        Self {
            inner: Rc::new(TokenSetState {
                theme: RefCell::new(theme),
                overrides: RefCell::new(None),
                defaults: Box::new(defaults),
                observer: RefCell::new(None),
                registrations: Cell::new(0),
            }),
        }
    }

    // ========== Reads ==========

    /// Resolve `key`: instance override, then theme override, then default
    pub fn get(&self, key: K) -> ControlTokenValue {
        if let Some(value) = self.override_value(key) {
            return value;
        }
        let theme = self.theme();
        (self.inner.defaults)(key, &theme)
    }

    /// The active override for `key` (instance layer first, then theme layer)
    pub fn override_value(&self, key: K) -> Option<ControlTokenValue> {
        if let Some(value) = self.instance_override(key) {
            return Some(value);
        }
        self.inner
            .theme
            .borrow()
            .tokens::<K>()
            .and_then(|tokens| tokens.get(&key))
            .cloned()
    }

    /// Whether `key` has an instance-level override
    pub fn has_override(&self, key: K) -> bool {
        self.instance_override(key).is_some()
    }

    /// The theme currently applied to this set
    pub fn theme(&self) -> Theme {
        self.inner.theme.borrow().clone()
    }

    fn instance_override(&self, key: K) -> Option<ControlTokenValue> {
        self.inner
            .overrides
            .borrow()
            .as_ref()
            .and_then(|overrides| overrides.get(&key))
            .cloned()
    }

    // ========== Writes ==========

    /// Store an instance-level override for `key`
    pub fn set(&self, key: K, value: impl Into<ControlTokenValue>) {
        let value = value.into();
        tracing::trace!("set override {:?} = {:?}", key, value);
        self.inner
            .overrides
            .borrow_mut()
            .get_or_insert_with(TokenOverrides::default)
            .insert(key, value);
        self.inner.mark_changed();
    }

    /// Store or clear the override for `key`. `None` behaves like
    /// [`remove_override`](Self::remove_override).
    pub fn set_override(&self, key: K, value: Option<ControlTokenValue>) {
        match value {
            Some(value) => self.set(key, value),
            None => {
                self.remove_override(key);
            }
        }
    }

    /// Remove the instance-level override for `key`.
    ///
    /// Returns `false`, without signalling a change, if there was none.
    pub fn remove_override(&self, key: K) -> bool {
        let removed = self
            .inner
            .overrides
            .borrow_mut()
            .as_mut()
            .and_then(|overrides| overrides.remove(&key))
            .is_some();
        if removed {
            tracing::trace!("removed override {:?}", key);
            self.inner.mark_changed();
        }
        removed
    }

    /// Make the instance layer match `overrides` for every key of `K`.
    ///
    /// Keys present in `overrides` are set; every other key loses its
    /// override. `None` removes all overrides. Observers are notified once.
    pub fn replace_all_overrides(&self, overrides: Option<&TokenOverrides<K>>) {
        for key in K::all() {
            match overrides.and_then(|overrides| overrides.get(key)) {
                Some(value) => self.set(*key, value.clone()),
                None => {
                    self.remove_override(*key);
                }
            }
        }
    }

    /// Apply `theme` if it is not the theme already held.
    ///
    /// Returns whether the theme changed.
    pub fn update(&self, theme: &Theme) -> bool {
        self.inner.update(theme)
    }

    // ========== Observation ==========

    /// Register `control` to be told when this set changes.
    ///
    /// `on_update` runs on the next dispatch turn after any write to this set,
    /// and after a theme broadcast from a view that contains `control` when
    /// that broadcast changes the theme `host` reports for `control`.
    ///
    /// Only one control may be registered at a time. A second registration
    /// without an intervening [`deregister_on_update`](Self::deregister_on_update)
    /// is rejected and the first one stays in effect.
    pub fn register_on_update<H, F>(
        &self,
        control: ViewId,
        host: &Rc<H>,
        on_update: F,
    ) -> Result<(), RegistrationError>
    where
        H: ThemeHost + 'static,
        F: Fn() + 'static,
    {
        if let Some(existing) = self.registered_control() {
            tracing::error!(
                "attempted to double-register token set for {:?}; already registered for {:?}",
                control,
                existing
            );
            debug_assert!(false, "double registration for token set updates");
            return Err(RegistrationError::AlreadyRegistered { existing });
        }

        let registration = self.inner.registrations.get() + 1;
        self.inner.registrations.set(registration);

        let state = Rc::downgrade(&self.inner);
        let host: Weak<H> = Rc::downgrade(host);
        let theme_changes = broadcast::observe_theme_changes(move |origin| {
            let (Some(state), Some(host)) = (state.upgrade(), host.upgrade()) else {
                return;
            };
            if host.is_descendant(control, origin) {
                state.update(&host.theme_for(control));
            }
        });

        tracing::debug!("token set registered for {:?}", control);
        *self.inner.observer.borrow_mut() = Some(Observer {
            registration,
            control,
            on_update: Rc::new(on_update),
            update_pending: Cell::new(false),
            _theme_changes: theme_changes,
        });
        Ok(())
    }

    /// Stop notifying the registered control. Safe to call repeatedly.
    ///
    /// A notification already queued for the old registration is dropped.
    pub fn deregister_on_update(&self) {
        // Take first so the subscription drops outside the borrow.
        let observer = self.inner.observer.borrow_mut().take();
        if let Some(observer) = observer {
            tracing::debug!("token set deregistered from {:?}", observer.control);
        }
    }

    pub fn is_registered(&self) -> bool {
        self.inner.observer.borrow().is_some()
    }

    /// The control currently registered for updates
    pub fn registered_control(&self) -> Option<ViewId> {
        self.inner
            .observer
            .borrow()
            .as_ref()
            .map(|observer| observer.control)
    }
}

impl<K: TokenSetKey> TokenSetState<K> {
    fn update(self: &Rc<Self>, theme: &Theme) -> bool {
        {
            let mut current = self.theme.borrow_mut();
            if *current == *theme {
                return false;
            }
            tracing::debug!(
                "token set theme {:?} -> {:?}",
                current.name(),
                theme.name()
            );
            *current = theme.clone();
        }
        self.mark_changed();
        true
    }

    fn mark_changed(self: &Rc<Self>) {
        let observer = self.observer.borrow();
        let Some(observer) = observer.as_ref() else {
            return;
        };
        if observer.update_pending.replace(true) {
            return;
        }

        let registration = observer.registration;
        let state = Rc::downgrade(self);
        dispatch::dispatch_async(move || {
            if let Some(state) = state.upgrade() {
                state.deliver_update(registration);
            }
        });
    }

    fn deliver_update(&self, registration: u64) {
        let on_update = {
            let observer = self.observer.borrow();
            match observer.as_ref() {
                Some(observer) if observer.registration == registration => {
                    observer.update_pending.set(false);
                    observer.on_update.clone()
                }
                _ => return,
            }
        };
        on_update();
    }
}

impl<K: TokenSetKey> Drop for ControlTokenSet<K> {
    fn drop(&mut self) {
        self.deregister_on_update();
    }
}

impl<K: TokenSetKey> fmt::Debug for ControlTokenSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let overrides: Vec<K> = K::all()
            .iter()
            .copied()
            .filter(|key| self.has_override(*key))
            .collect();
        f.debug_struct("ControlTokenSet")
            .field("theme", &self.inner.theme.borrow().name())
            .field("overrides", &overrides)
            .field("registered_control", &self.registered_control())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ThemedViewTree;
    use crate::theme::ThemeBuilder;
    use kestrel_core::Color;

    crate::token_set_keys! {
        enum CardTokens {
            CornerRadius: Float => "corner_radius",
            Fill: DynamicColor => "fill",
            BorderWidth: Float => "border_width",
        }
    }

    fn card_defaults(key: CardTokens, theme: &Theme) -> ControlTokenValue {
        match key {
            CardTokens::CornerRadius => 8.0_f32.into(),
            CardTokens::Fill => theme.color(crate::tokens::ColorToken::Background1).into(),
            CardTokens::BorderWidth => 1.0_f32.into(),
        }
    }

    fn card_set() -> ControlTokenSet<CardTokens> {
        ControlTokenSet::with_theme(Theme::default(), card_defaults)
    }

    fn counter() -> (Rc<Cell<usize>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        (count, move || sink.set(sink.get() + 1))
    }

    fn registered(
        set: &ControlTokenSet<CardTokens>,
    ) -> (Rc<ThemedViewTree>, ViewId, Rc<Cell<usize>>) {
        let host = Rc::new(ThemedViewTree::new());
        let view = host.insert_root();
        let (count, on_update) = counter();
        set.register_on_update(view, &host, on_update).unwrap();
        (host, view, count)
    }

    #[test]
    fn test_corner_radius_scenario() {
        let set = card_set();
        assert_eq!(set.get(CardTokens::CornerRadius).as_float(), 8.0);

        set.set(CardTokens::CornerRadius, 12.0_f32);
        assert_eq!(set.get(CardTokens::CornerRadius).as_float(), 12.0);

        assert!(set.remove_override(CardTokens::CornerRadius));
        assert_eq!(set.get(CardTokens::CornerRadius).as_float(), 8.0);
    }

    #[test]
    fn test_theme_layer_sits_between_instance_and_default() {
        let theme = ThemeBuilder::new("rounded")
            .control_token(CardTokens::CornerRadius, 16.0_f32.into())
            .build();
        let set = ControlTokenSet::with_theme(theme, card_defaults);

        assert_eq!(set.get(CardTokens::CornerRadius).as_float(), 16.0);
        assert!(!set.has_override(CardTokens::CornerRadius));
        assert!(set.override_value(CardTokens::CornerRadius).is_some());

        set.set(CardTokens::CornerRadius, 4.0_f32);
        assert_eq!(set.get(CardTokens::CornerRadius).as_float(), 4.0);

        set.remove_override(CardTokens::CornerRadius);
        assert_eq!(set.get(CardTokens::CornerRadius).as_float(), 16.0);
        assert_eq!(set.get(CardTokens::BorderWidth).as_float(), 1.0);
    }

    #[test]
    fn test_set_override_none_removes() {
        let set = card_set();
        set.set_override(CardTokens::BorderWidth, Some(2.0_f32.into()));
        assert!(set.has_override(CardTokens::BorderWidth));

        set.set_override(CardTokens::BorderWidth, None);
        assert!(!set.has_override(CardTokens::BorderWidth));
        assert_eq!(set.get(CardTokens::BorderWidth).as_float(), 1.0);
    }

    #[test]
    fn test_writes_notify_once_on_next_turn() {
        let set = card_set();
        let (_host, _view, count) = registered(&set);

        set.set(CardTokens::CornerRadius, 12.0_f32);
        set.set(CardTokens::Fill, Color::WHITE);
        assert_eq!(count.get(), 0);

        dispatch::run_turn();
        assert_eq!(count.get(), 1);
        assert_eq!(dispatch::run_until_idle(), 0);
    }

    #[test]
    fn test_removing_missing_override_is_silent() {
        let set = card_set();
        let (_host, _view, count) = registered(&set);

        assert!(!set.remove_override(CardTokens::Fill));
        dispatch::run_until_idle();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_update_with_same_theme_is_silent() {
        let set = card_set();
        let (_host, _view, count) = registered(&set);

        assert!(!set.update(&Theme::default()));
        dispatch::run_until_idle();
        assert_eq!(count.get(), 0);

        assert!(set.update(&ThemeBuilder::new("other").build()));
        dispatch::run_until_idle();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_replace_all_overrides() {
        let set = card_set();
        set.set(CardTokens::Fill, Color::BLACK);

        let mut replacement = TokenOverrides::default();
        replacement.insert(CardTokens::CornerRadius, 20.0_f32.into());
        set.replace_all_overrides(Some(&replacement));

        assert_eq!(set.get(CardTokens::CornerRadius).as_float(), 20.0);
        assert!(!set.has_override(CardTokens::Fill));
        assert!(!set.has_override(CardTokens::BorderWidth));

        set.replace_all_overrides(None);
        assert!(CardTokens::all().iter().all(|key| !set.has_override(*key)));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "double registration")]
    fn test_double_registration_asserts_in_debug() {
        let set = card_set();
        let (host, view, _count) = registered(&set);
        let _ = set.register_on_update(view, &host, || {});
    }

    #[test]
    fn test_double_registration_keeps_first() {
        let set = card_set();
        let (host, view, first) = registered(&set);
        let (second, on_update) = counter();

        let attempt = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            set.register_on_update(view, &host, on_update)
        }));
        match attempt {
            Ok(result) => assert_eq!(
                result,
                Err(RegistrationError::AlreadyRegistered { existing: view })
            ),
            Err(_) => assert!(cfg!(debug_assertions)),
        }
        assert_eq!(set.registered_control(), Some(view));

        set.set(CardTokens::BorderWidth, 3.0_f32);
        dispatch::run_until_idle();
        assert_eq!((first.get(), second.get()), (1, 0));
    }

    #[test]
    fn test_deregister_cancels_pending_notification() {
        let set = card_set();
        let (_host, _view, count) = registered(&set);

        set.set(CardTokens::CornerRadius, 2.0_f32);
        set.deregister_on_update();
        set.deregister_on_update();
        assert!(!set.is_registered());

        dispatch::run_until_idle();
        assert_eq!(count.get(), 0);
        assert_eq!(broadcast::observer_count(), 0);
    }

    #[test]
    fn test_reregistration_drops_stale_notification() {
        let set = card_set();
        let (host, _view, old) = registered(&set);
        set.set(CardTokens::CornerRadius, 2.0_f32);

        set.deregister_on_update();
        let next_view = host.insert_root();
        let (new, on_update) = counter();
        set.register_on_update(next_view, &host, on_update).unwrap();
        assert_eq!(set.registered_control(), Some(next_view));

        dispatch::run_until_idle();
        assert_eq!((old.get(), new.get()), (0, 0));

        set.set(CardTokens::CornerRadius, 3.0_f32);
        dispatch::run_until_idle();
        assert_eq!(new.get(), 1);
    }

    #[test]
    fn test_callback_reads_current_state() {
        let set = Rc::new(card_set());
        let host = Rc::new(ThemedViewTree::new());
        let view = host.insert_root();

        let seen = Rc::new(Cell::new(0.0));
        let (reader, sink) = (Rc::downgrade(&set), seen.clone());
        set.register_on_update(view, &host, move || {
            if let Some(set) = reader.upgrade() {
                sink.set(set.get(CardTokens::CornerRadius).as_float());
            }
        })
        .unwrap();

        set.set(CardTokens::CornerRadius, 10.0_f32);
        set.set(CardTokens::CornerRadius, 14.0_f32);
        dispatch::run_until_idle();
        assert_eq!(seen.get(), 14.0);
    }

    #[test]
    fn test_broadcast_is_scoped_to_containing_views() {
        let set = card_set();
        let host = Rc::new(ThemedViewTree::new());
        let window = host.insert_root();
        let panel = host.insert_child(window).unwrap();
        let card = host.insert_child(panel).unwrap();
        let sidebar = host.insert_child(window).unwrap();

        let (count, on_update) = counter();
        set.register_on_update(card, &host, on_update).unwrap();

        host.set_theme(sidebar, ThemeBuilder::new("sidebar").build()).unwrap();
        dispatch::run_until_idle();
        assert_eq!(count.get(), 0);
        assert_eq!(set.theme(), Theme::default());

        let panel_theme = ThemeBuilder::new("panel").build();
        host.set_theme(panel, panel_theme.clone()).unwrap();
        assert_eq!(count.get(), 0);
        dispatch::run_until_idle();
        assert_eq!(count.get(), 1);
        assert_eq!(set.theme(), panel_theme);
    }

    #[test]
    fn test_drop_unsubscribes_from_broadcast() {
        let set = card_set();
        let (_host, _view, _count) = registered(&set);
        assert_eq!(broadcast::observer_count(), 1);
        drop(set);
        assert_eq!(broadcast::observer_count(), 0);
    }

    #[test]
    fn test_every_key_resolves_before_any_override() {
        let set = card_set();
        for key in CardTokens::all() {
            let _ = format!("{:?}", set.get(*key));
        }
        assert!(format!("{set:?}").contains("ControlTokenSet"));
    }
}
