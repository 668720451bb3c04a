//! Token set keys

use crate::value::TokenShape;
use std::fmt::Debug;
use std::hash::Hash;

/// The tunable properties of one control type.
///
/// Every implementation is a closed, exhaustively enumerable set: bulk
/// operations such as
/// [`ControlTokenSet::replace_all_overrides`](crate::ControlTokenSet::replace_all_overrides)
/// iterate [`TokenSetKey::all`] instead of discovering keys at runtime.
///
/// The key type also identifies its control type inside a [`Theme`](crate::Theme),
/// so each control declares its own key enum. Use [`token_set_keys!`](crate::token_set_keys)
/// to declare one.
pub trait TokenSetKey: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every key, in declaration order
    fn all() -> &'static [Self];

    /// Stable snake_case name used by theme configuration files
    fn name(self) -> &'static str;

    /// The value shape every value stored under this key must have
    fn shape(self) -> TokenShape;

    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|key| key.name() == name)
    }
}

/// Declare a token key enum and implement [`TokenSetKey`] for it.
///
/// Each variant names its [`TokenShape`] and its configuration name.
///
/// ```rust
/// kestrel_theme::token_set_keys! {
///     /// Tokens for a badge
///     pub enum BadgeTokens {
///         /// Fill color
///         BackgroundColor: DynamicColor => "background_color",
///         CornerRadius: Float => "corner_radius",
///     }
/// }
///
/// use kestrel_theme::{TokenSetKey, TokenShape};
/// assert_eq!(BadgeTokens::all().len(), 2);
/// assert_eq!(BadgeTokens::from_name("corner_radius"), Some(BadgeTokens::CornerRadius));
/// assert_eq!(BadgeTokens::BackgroundColor.shape(), TokenShape::DynamicColor);
/// ```
#[macro_export]
macro_rules! token_set_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident : $shape:ident => $key:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $crate::TokenSetKey for $name {
            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            fn shape(self) -> $crate::TokenShape {
                match self {
                    $($name::$variant => $crate::TokenShape::$shape,)+
                }
            }
        }
    };
}
