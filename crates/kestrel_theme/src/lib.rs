//! Kestrel Theme
//!
//! Design-token engine for Kestrel controls:
//!
//! - **Themes**: immutable registries of alias tokens and per-control overrides
//! - **Token values**: lazily evaluated floats, colors, fonts and shadows
//! - **Control token sets**: per-instance resolution with deferred change notification
//! - **Theme broadcast**: subtree-scoped "the theme changed" notifications
//! - **Configuration**: themes described in TOML
//!
//! # Example
//!
//! ```rust
//! use kestrel_theme::{ControlTokenSet, Theme};
//!
//! kestrel_theme::token_set_keys! {
//!     pub enum ChipTokens {
//!         CornerRadius: Float => "corner_radius",
//!     }
//! }
//!
//! let tokens = ControlTokenSet::with_theme(Theme::default(), |key, _theme| match key {
//!     ChipTokens::CornerRadius => 8.0_f32.into(),
//! });
//! assert_eq!(tokens.get(ChipTokens::CornerRadius).as_float(), 8.0);
//!
//! tokens.set(ChipTokens::CornerRadius, 12.0_f32);
//! assert_eq!(tokens.get(ChipTokens::CornerRadius).as_float(), 12.0);
//! ```

pub mod broadcast;
pub mod config;
pub mod host;
pub mod key;
pub mod theme;
pub mod token_set;
pub mod tokens;
pub mod value;

pub use broadcast::{observe_theme_changes, post_theme_change, ThemeChangeSubscription};
pub use config::{ConfigError, ThemeConfig};
pub use host::{ThemeHost, ThemedViewTree};
pub use key::TokenSetKey;
pub use theme::{Theme, ThemeBuilder, ThemeId, TokenOverrides};
pub use token_set::{ControlTokenSet, RegistrationError};
pub use tokens::*;
pub use value::{fallback_color, ControlTokenValue, TokenShape, TokenValueError};
