//! Themes
//!
//! A [`Theme`] is an immutable bundle of alias tokens plus a per-control
//! override layer. Clones share the same instance; two themes compare equal
//! only when they are the same instance, which is what lets token sets ignore
//! a re-broadcast of the theme they already hold.
//!
//! One theme is process-wide: [`Theme::shared`] returns it and
//! [`Theme::set_shared`] replaces it. Views can also carry their own theme
//! through a [`ThemeHost`](crate::ThemeHost).

use crate::config::{ConfigError, ThemeConfig};
use crate::key::TokenSetKey;
use crate::tokens::*;
use crate::value::ControlTokenValue;
use kestrel_core::DynamicColor;
use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Override layer for one control type
pub type TokenOverrides<K> = FxHashMap<K, ControlTokenValue>;

/// The built-in default theme (stable identity)
static DEFAULT_THEME: OnceLock<Theme> = OnceLock::new();

/// The process-wide current theme
static SHARED_THEME: OnceLock<RwLock<Theme>> = OnceLock::new();

static NEXT_THEME_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of a theme instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ThemeId(u64);

#[derive(Clone)]
struct ControlEntry {
    control: &'static str,
    tokens: Arc<dyn Any + Send + Sync>,
}

struct ThemeInner {
    id: ThemeId,
    name: String,
    colors: ColorTokens,
    shadows: ShadowTokens,
    typography: TypographyTokens,
    controls: FxHashMap<TypeId, ControlEntry>,
}

/// Registry of alias tokens and per-control token overrides
#[derive(Clone)]
pub struct Theme {
    inner: Arc<ThemeInner>,
}

impl Theme {
    pub fn id(&self) -> ThemeId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn colors(&self) -> &ColorTokens {
        &self.inner.colors
    }

    pub fn color(&self, token: ColorToken) -> DynamicColor {
        self.inner.colors.get(token)
    }

    pub fn shadow(&self, token: ShadowToken) -> ShadowInfo {
        self.inner.shadows.get(token)
    }

    pub fn font(&self, token: TypographyToken) -> FontInfo {
        self.inner.typography.get(token)
    }

    /// The override layer registered for the control keyed by `K`, if any
    pub fn tokens<K: TokenSetKey>(&self) -> Option<&TokenOverrides<K>> {
        self.inner
            .controls
            .get(&TypeId::of::<K>())
            .and_then(|entry| entry.tokens.downcast_ref::<TokenOverrides<K>>())
    }

    /// Names of the control types this theme overrides
    pub fn overridden_controls(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.inner.controls.values().map(|e| e.control).collect();
        names.sort_unstable();
        names
    }

    // ========== Process-wide theme ==========

    /// The current process-wide theme
    pub fn shared() -> Theme {
        shared_slot()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the process-wide theme. Returns `false` if `theme` is already current.
    ///
    /// This does not notify anything; the host broadcasts the change from the
    /// root view(s) that should pick it up.
    pub fn set_shared(theme: Theme) -> bool {
        let mut current = shared_slot().write().unwrap_or_else(PoisonError::into_inner);
        if *current == theme {
            return false;
        }
        tracing::debug!(
            "Theme::set_shared - replacing {:?} with {:?}",
            current.name(),
            theme.name()
        );
        *current = theme;
        true
    }
}

fn shared_slot() -> &'static RwLock<Theme> {
    SHARED_THEME.get_or_init(|| RwLock::new(Theme::default()))
}

impl Default for Theme {
    /// The built-in theme. Every call returns the same instance.
    fn default() -> Self {
        DEFAULT_THEME
            .get_or_init(|| ThemeBuilder::new("default").build())
            .clone()
    }
}

impl PartialEq for Theme {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Theme {}

impl fmt::Debug for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Theme")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("controls", &self.overridden_controls())
            .finish()
    }
}

/// Builder for [`Theme`]
pub struct ThemeBuilder {
    name: String,
    colors: ColorTokens,
    shadows: ShadowTokens,
    typography: TypographyTokens,
    controls: FxHashMap<TypeId, ControlEntry>,
}

impl ThemeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: ColorTokens::default(),
            shadows: ShadowTokens::default(),
            typography: TypographyTokens::default(),
            controls: FxHashMap::default(),
        }
    }

    /// Start from an existing theme's tokens. The result is a new, distinct theme.
    pub fn from_theme(theme: &Theme, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: theme.inner.colors.clone(),
            shadows: theme.inner.shadows.clone(),
            typography: theme.inner.typography.clone(),
            controls: theme.inner.controls.clone(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn color(mut self, token: ColorToken, color: DynamicColor) -> Self {
        self.colors.set(token, color);
        self
    }

    pub fn shadow(mut self, token: ShadowToken, shadow: ShadowInfo) -> Self {
        self.shadows.set(token, shadow);
        self
    }

    pub fn font(mut self, token: TypographyToken, font: FontInfo) -> Self {
        self.typography.set(token, font);
        self
    }

    /// Register the full override layer for the control keyed by `K`,
    /// replacing any previous layer for that control
    pub fn control_tokens<K: TokenSetKey>(mut self, tokens: TokenOverrides<K>) -> Self {
        self.controls.insert(
            TypeId::of::<K>(),
            ControlEntry {
                control: std::any::type_name::<K>(),
                tokens: Arc::new(tokens),
            },
        );
        self
    }

    /// Add a single override for the control keyed by `K`
    pub fn control_token<K: TokenSetKey>(self, key: K, value: ControlTokenValue) -> Self {
        let mut tokens = self
            .controls
            .get(&TypeId::of::<K>())
            .and_then(|entry| entry.tokens.downcast_ref::<TokenOverrides<K>>())
            .cloned()
            .unwrap_or_default();
        tokens.insert(key, value);
        self.control_tokens(tokens)
    }

    /// Apply the name and alias color overrides from a configuration
    pub fn with_config(mut self, config: &ThemeConfig) -> Result<Self, ConfigError> {
        if let Some(name) = &config.name {
            self.name = name.clone();
        }
        for (token, color) in config.alias_colors()? {
            self.colors.set(token, color);
        }
        Ok(self)
    }

    /// Apply one control's overrides from a configuration
    ///
    /// `control` is the section name under `[controls]`. A missing section is
    /// not an error.
    pub fn with_config_tokens<K: TokenSetKey>(
        self,
        config: &ThemeConfig,
        control: &str,
    ) -> Result<Self, ConfigError> {
        match config.control_overrides::<K>(control)? {
            Some(tokens) => Ok(self.control_tokens(tokens)),
            None => Ok(self),
        }
    }

    pub fn build(self) -> Theme {
        let id = ThemeId(NEXT_THEME_ID.fetch_add(1, Ordering::Relaxed));
        tracing::trace!("built theme {:?} ({:?})", self.name, id);
        Theme {
            inner: Arc::new(ThemeInner {
                id,
                name: self.name,
                colors: self.colors,
                shadows: self.shadows,
                typography: self.typography,
                controls: self.controls,
            }),
        }
    }
}
