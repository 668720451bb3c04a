//! Shimmer loading placeholder tokens

use kestrel_core::{Color, DynamicColor};
use kestrel_theme::{
    ColorToken, ControlTokenSet, ControlTokenValue, CornerRadius, GlobalTokens, Theme,
};
use std::f32::consts::FRAC_PI_4;
use std::ops::Deref;

kestrel_theme::token_set_keys! {
    /// Tunable properties of a shimmer
    pub enum ShimmerToken {
        TintColor: DynamicColor => "tint_color",
        DarkGradient: DynamicColor => "dark_gradient",
        LightGradient: DynamicColor => "light_gradient",
        /// Sweep angle in radians
        Angle: Float => "angle",
        ShimmerWidth: Float => "shimmer_width",
        ShimmerAlpha: Float => "shimmer_alpha",
        /// Points per second
        ShimmerSpeed: Float => "shimmer_speed",
        /// Seconds between sweeps
        ShimmerDelay: Float => "shimmer_delay",
        CornerRadius: Float => "corner_radius",
        LabelCornerRadius: Float => "label_corner_radius",
        LabelHeight: Float => "label_height",
        LabelSpacing: Float => "label_spacing",
    }
}

/// How the shimmer relates to the content it covers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShimmerStyle {
    /// The gradient sweeps over an opaque cover
    #[default]
    Concealing,
    /// The gradient reveals the content through a mask
    Revealing,
}

pub struct ShimmerTokenSet {
    tokens: ControlTokenSet<ShimmerToken>,
}

/// Timing of one shimmer sweep across some content
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShimmerSweep {
    pub duration: f32,
    pub delay: f32,
    pub angle: f32,
    pub width: f32,
}

impl ShimmerTokenSet {
    pub fn new<S>(theme: Theme, style: S) -> Self
    where
        S: Fn() -> ShimmerStyle + 'static,
    {
        let tokens = ControlTokenSet::with_theme(theme, move |token: ShimmerToken, theme: &Theme| {
            shimmer_default(token, theme, style())
        });
        Self { tokens }
    }

    /// Sweep timing for content `content_width` points wide
    pub fn sweep(&self, content_width: f32) -> ShimmerSweep {
        let width = self.get(ShimmerToken::ShimmerWidth).as_float();
        let speed = self.get(ShimmerToken::ShimmerSpeed).as_float();
        let duration = if speed > 0.0 {
            (content_width + width) / speed
        } else {
            0.0
        };
        ShimmerSweep {
            duration,
            delay: self.get(ShimmerToken::ShimmerDelay).as_float(),
            angle: self.get(ShimmerToken::Angle).as_float(),
            width,
        }
    }
}

impl Deref for ShimmerTokenSet {
    type Target = ControlTokenSet<ShimmerToken>;

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

fn shimmer_default(token: ShimmerToken, theme: &Theme, style: ShimmerStyle) -> ControlTokenValue {
    match token {
        ShimmerToken::TintColor => {
            let tint = match style {
                ShimmerStyle::Concealing => theme.color(ColorToken::Background5),
                ShimmerStyle::Revealing => theme.color(ColorToken::Stroke2),
            };
            ControlTokenValue::dynamic_color(move || tint)
        }
        ShimmerToken::DarkGradient => DynamicColor::with_dark(Color::BLACK, Color::WHITE).into(),
        ShimmerToken::LightGradient => DynamicColor::new(Color::WHITE.with_alpha(0.0)).into(),
        ShimmerToken::Angle => (-FRAC_PI_4).into(),
        ShimmerToken::ShimmerWidth => 180.0_f32.into(),
        ShimmerToken::ShimmerAlpha => match style {
            ShimmerStyle::Concealing => 0.4_f32.into(),
            ShimmerStyle::Revealing => 1.0_f32.into(),
        },
        ShimmerToken::ShimmerSpeed => 350.0_f32.into(),
        ShimmerToken::ShimmerDelay => 0.4_f32.into(),
        ShimmerToken::CornerRadius | ShimmerToken::LabelCornerRadius => {
            GlobalTokens::corner(CornerRadius::Radius40).into()
        }
        ShimmerToken::LabelHeight => 11.0_f32.into(),
        ShimmerToken::LabelSpacing => 11.0_f32.into(),
    }
}
