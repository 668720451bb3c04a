//! Color primitives

use std::fmt;

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from a `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_hex),
            8 => {
                let value = u32::from_str_radix(digits, 16).ok()?;
                Some(Self::from_hex(value >> 8).with_alpha((value & 0xFF) as f32 / 255.0))
            }
            _ => None,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )?;
        if self.a < 1.0 {
            write!(f, "{:02X}", channel(self.a))?;
        }
        Ok(())
    }
}

/// Light or dark appearance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// A color with light and (optionally) dark variants.
///
/// The variant is picked at render time from the control's current
/// [`ColorScheme`]; a missing dark variant falls back to the light one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DynamicColor {
    pub light: Color,
    pub dark: Option<Color>,
}

impl DynamicColor {
    pub const fn new(light: Color) -> Self {
        Self { light, dark: None }
    }

    pub const fn with_dark(light: Color, dark: Color) -> Self {
        Self {
            light,
            dark: Some(dark),
        }
    }

    pub fn from_hex(light: u32, dark: u32) -> Self {
        Self::with_dark(Color::from_hex(light), Color::from_hex(dark))
    }

    pub fn resolve(&self, scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Light => self.light,
            ColorScheme::Dark => self.dark.unwrap_or(self.light),
        }
    }
}

impl From<Color> for DynamicColor {
    fn from(color: Color) -> Self {
        Self::new(color)
    }
}

impl fmt::Display for DynamicColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dark {
            Some(dark) => write!(f, "{} / {}", self.light, dark),
            None => write!(f, "{}", self.light),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse_hex("#FFFFFF"), Some(Color::WHITE));
        assert_eq!(Color::parse_hex("000000"), Some(Color::BLACK));
        assert_eq!(Color::parse_hex("#E3008C"), Some(Color::from_hex(0xE3008C)));

        let translucent = Color::parse_hex("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < f32::EPSILON);

        assert_eq!(Color::parse_hex("#12345"), None);
        assert_eq!(Color::parse_hex("#GGGGGG"), None);
        assert_eq!(Color::parse_hex("+12345"), None);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let color = Color::from_hex(0x0F6CBD);
        assert_eq!(color.to_string(), "#0F6CBD");
        assert_eq!(Color::parse_hex(&color.to_string()), Some(color));
    }

    #[test]
    fn test_dynamic_color_resolution() {
        let both = DynamicColor::from_hex(0xFFFFFF, 0x000000);
        assert_eq!(both.resolve(ColorScheme::Light), Color::WHITE);
        assert_eq!(both.resolve(ColorScheme::Dark), Color::BLACK);

        let light_only = DynamicColor::new(Color::WHITE);
        assert_eq!(light_only.resolve(ColorScheme::Dark), Color::WHITE);
    }
}
