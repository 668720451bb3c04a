//! Color alias tokens

use kestrel_core::{Color, DynamicColor};

/// Semantic color token keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorToken {
    // Brand
    BrandBackground,
    BrandBackgroundPressed,
    BrandBackgroundSelected,
    BrandForeground,

    // Foreground
    Foreground1,
    Foreground2,
    Foreground3,
    ForegroundDisabled,
    ForegroundOnColor,

    // Background
    Background1,
    Background1Pressed,
    Background5,
    Background5Selected,
    BackgroundDisabled,

    // Stroke
    Stroke1,
    Stroke1Pressed,
    Stroke2,
    StrokeFocus,
    StrokeDisabled,

    // Status
    DangerBackground,
    DangerBackgroundPressed,
    DangerForeground,

    // Static (same in light and dark)
    BackgroundDarkStatic,
    ForegroundLightStatic,
}

impl ColorToken {
    pub const COUNT: usize = 24;

    /// Every color token, in declaration order
    pub fn all() -> &'static [ColorToken] {
        const ALL: [ColorToken; ColorToken::COUNT] = [
            ColorToken::BrandBackground,
            ColorToken::BrandBackgroundPressed,
            ColorToken::BrandBackgroundSelected,
            ColorToken::BrandForeground,
            ColorToken::Foreground1,
            ColorToken::Foreground2,
            ColorToken::Foreground3,
            ColorToken::ForegroundDisabled,
            ColorToken::ForegroundOnColor,
            ColorToken::Background1,
            ColorToken::Background1Pressed,
            ColorToken::Background5,
            ColorToken::Background5Selected,
            ColorToken::BackgroundDisabled,
            ColorToken::Stroke1,
            ColorToken::Stroke1Pressed,
            ColorToken::Stroke2,
            ColorToken::StrokeFocus,
            ColorToken::StrokeDisabled,
            ColorToken::DangerBackground,
            ColorToken::DangerBackgroundPressed,
            ColorToken::DangerForeground,
            ColorToken::BackgroundDarkStatic,
            ColorToken::ForegroundLightStatic,
        ];
        &ALL
    }

    /// Stable snake_case name used by theme configuration files
    pub fn name(self) -> &'static str {
        match self {
            ColorToken::BrandBackground => "brand_background",
            ColorToken::BrandBackgroundPressed => "brand_background_pressed",
            ColorToken::BrandBackgroundSelected => "brand_background_selected",
            ColorToken::BrandForeground => "brand_foreground",
            ColorToken::Foreground1 => "foreground1",
            ColorToken::Foreground2 => "foreground2",
            ColorToken::Foreground3 => "foreground3",
            ColorToken::ForegroundDisabled => "foreground_disabled",
            ColorToken::ForegroundOnColor => "foreground_on_color",
            ColorToken::Background1 => "background1",
            ColorToken::Background1Pressed => "background1_pressed",
            ColorToken::Background5 => "background5",
            ColorToken::Background5Selected => "background5_selected",
            ColorToken::BackgroundDisabled => "background_disabled",
            ColorToken::Stroke1 => "stroke1",
            ColorToken::Stroke1Pressed => "stroke1_pressed",
            ColorToken::Stroke2 => "stroke2",
            ColorToken::StrokeFocus => "stroke_focus",
            ColorToken::StrokeDisabled => "stroke_disabled",
            ColorToken::DangerBackground => "danger_background",
            ColorToken::DangerBackgroundPressed => "danger_background_pressed",
            ColorToken::DangerForeground => "danger_foreground",
            ColorToken::BackgroundDarkStatic => "background_dark_static",
            ColorToken::ForegroundLightStatic => "foreground_light_static",
        }
    }

    pub fn from_name(name: &str) -> Option<ColorToken> {
        Self::all().iter().copied().find(|token| token.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Complete set of color alias tokens
#[derive(Clone, Debug, PartialEq)]
pub struct ColorTokens {
    values: [DynamicColor; ColorToken::COUNT],
}

impl ColorTokens {
    /// Get a color by token key
    pub fn get(&self, token: ColorToken) -> DynamicColor {
        self.values[token.index()]
    }

    /// Replace the color for a token key
    pub fn set(&mut self, token: ColorToken, color: DynamicColor) {
        self.values[token.index()] = color;
    }
}

impl Default for ColorTokens {
    fn default() -> Self {
        let values = std::array::from_fn(|i| default_color(ColorToken::all()[i]));
        Self { values }
    }
}

fn default_color(token: ColorToken) -> DynamicColor {
    match token {
        ColorToken::BrandBackground => DynamicColor::from_hex(0x0F6CBD, 0x115EA3),
        ColorToken::BrandBackgroundPressed => DynamicColor::from_hex(0x0C3B5E, 0x0E4775),
        ColorToken::BrandBackgroundSelected => DynamicColor::from_hex(0x0F548C, 0x0F6CBD),
        ColorToken::BrandForeground => DynamicColor::from_hex(0x0F6CBD, 0x479EF5),
        ColorToken::Foreground1 => DynamicColor::from_hex(0x242424, 0xFFFFFF),
        ColorToken::Foreground2 => DynamicColor::from_hex(0x424242, 0xD6D6D6),
        ColorToken::Foreground3 => DynamicColor::from_hex(0x616161, 0xADADAD),
        ColorToken::ForegroundDisabled => DynamicColor::from_hex(0xBDBDBD, 0x5C5C5C),
        ColorToken::ForegroundOnColor => DynamicColor::new(Color::WHITE),
        ColorToken::Background1 => DynamicColor::from_hex(0xFFFFFF, 0x000000),
        ColorToken::Background1Pressed => DynamicColor::from_hex(0xE0E0E0, 0x1F1F1F),
        ColorToken::Background5 => DynamicColor::from_hex(0xEBEBEB, 0x3D3D3D),
        ColorToken::Background5Selected => DynamicColor::from_hex(0xC7C7C7, 0x616161),
        ColorToken::BackgroundDisabled => DynamicColor::from_hex(0xF0F0F0, 0x141414),
        ColorToken::Stroke1 => DynamicColor::from_hex(0xD1D1D1, 0x666666),
        ColorToken::Stroke1Pressed => DynamicColor::from_hex(0xB3B3B3, 0x858585),
        ColorToken::Stroke2 => DynamicColor::from_hex(0xE0E0E0, 0x525252),
        ColorToken::StrokeFocus => DynamicColor::from_hex(0x000000, 0xFFFFFF),
        ColorToken::StrokeDisabled => DynamicColor::from_hex(0xE0E0E0, 0x424242),
        ColorToken::DangerBackground => DynamicColor::from_hex(0xC50F1F, 0xD13438),
        ColorToken::DangerBackgroundPressed => DynamicColor::from_hex(0x960B18, 0xA4262C),
        ColorToken::DangerForeground => DynamicColor::from_hex(0xB10E1C, 0xDC626D),
        ColorToken::BackgroundDarkStatic => DynamicColor::new(Color::from_hex(0x292929)),
        ColorToken::ForegroundLightStatic => DynamicColor::new(Color::WHITE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tokens_are_indexed_in_order() {
        assert_eq!(ColorToken::all().len(), ColorToken::COUNT);
        for (i, token) in ColorToken::all().iter().enumerate() {
            assert_eq!(token.index(), i, "{token:?} out of order");
        }
    }

    #[test]
    fn test_names_round_trip() {
        for token in ColorToken::all() {
            assert_eq!(ColorToken::from_name(token.name()), Some(*token));
        }
        assert_eq!(ColorToken::from_name("hot_pink"), None);
    }

    #[test]
    fn test_set_replaces_single_token() {
        let mut colors = ColorTokens::default();
        let pink = DynamicColor::new(Color::from_hex(0xE3008C));
        colors.set(ColorToken::BrandBackground, pink);

        assert_eq!(colors.get(ColorToken::BrandBackground), pink);
        assert_eq!(
            colors.get(ColorToken::BrandForeground),
            ColorTokens::default().get(ColorToken::BrandForeground)
        );
    }
}
