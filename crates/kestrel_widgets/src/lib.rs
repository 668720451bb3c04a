//! Kestrel Widget Library
//!
//! Token sets for the built-in controls, plus headless controls that resolve
//! their appearance from those tokens.

pub mod button;
pub mod pill_button_bar;
pub mod shimmer;
pub mod tooltip;
pub mod widget;

pub use button::{Button, ButtonAppearance, ButtonSize, ButtonStyle, ButtonToken, ButtonTokenSet};
pub use pill_button_bar::{
    PillAppearance, PillButtonBar, PillButtonBarTokenSet, PillButtonStyle, PillButtonToken,
    PillItem,
};
pub use shimmer::{ShimmerStyle, ShimmerSweep, ShimmerToken, ShimmerTokenSet};
pub use tooltip::{Tooltip, TooltipLayout, TooltipToken, TooltipTokenSet};
pub use widget::Control;

use kestrel_theme::{ConfigError, Theme, ThemeBuilder, ThemeConfig};

/// `[controls.<name>]` sections understood by [`theme_from_config`]
pub const CONTROL_SECTIONS: [&str; 4] = ["button", "pill_button_bar", "shimmer", "tooltip"];

/// Build a theme from a configuration, including overrides for every
/// built-in control.
///
/// A `[controls]` section naming an unknown control is an error.
pub fn theme_from_config(config: &ThemeConfig) -> Result<Theme, ConfigError> {
    if let Some(unknown) = config
        .control_names()
        .find(|name| !CONTROL_SECTIONS.contains(name))
    {
        return Err(ConfigError::UnknownControl(unknown.to_string()));
    }

    let theme = ThemeBuilder::new("custom")
        .with_config(config)?
        .with_config_tokens::<ButtonToken>(config, "button")?
        .with_config_tokens::<PillButtonToken>(config, "pill_button_bar")?
        .with_config_tokens::<ShimmerToken>(config, "shimmer")?
        .with_config_tokens::<TooltipToken>(config, "tooltip")?
        .build();
    tracing::debug!(
        "built theme {:?} overriding {:?}",
        theme.name(),
        theme.overridden_controls()
    );
    Ok(theme)
}
