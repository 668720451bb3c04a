//! Typography alias tokens

use serde::Deserialize;
use std::fmt;

/// Font weight
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

/// Font descriptor
///
/// `name` is a family name; `None` means the platform system font.
#[derive(Clone, Debug, PartialEq)]
pub struct FontInfo {
    pub name: Option<String>,
    pub size: f32,
    pub weight: FontWeight,
}

impl FontInfo {
    pub fn new(size: f32, weight: FontWeight) -> Self {
        Self {
            name: None,
            size,
            weight,
        }
    }
}

impl fmt::Display for FontInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}pt {:?}",
            self.name.as_deref().unwrap_or("system"),
            self.size,
            self.weight
        )
    }
}

/// Semantic text style keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum TypographyToken {
    Title1,
    Title2,
    Title3,
    Body1Strong,
    Body1,
    Body2Strong,
    Body2,
    Caption1Strong,
    Caption1,
    Caption2,
}

impl TypographyToken {
    pub const COUNT: usize = 10;

    pub fn all() -> &'static [TypographyToken] {
        const ALL: [TypographyToken; TypographyToken::COUNT] = [
            TypographyToken::Title1,
            TypographyToken::Title2,
            TypographyToken::Title3,
            TypographyToken::Body1Strong,
            TypographyToken::Body1,
            TypographyToken::Body2Strong,
            TypographyToken::Body2,
            TypographyToken::Caption1Strong,
            TypographyToken::Caption1,
            TypographyToken::Caption2,
        ];
        &ALL
    }
}

/// Complete set of typography tokens
#[derive(Clone, Debug, PartialEq)]
pub struct TypographyTokens {
    fonts: [FontInfo; TypographyToken::COUNT],
}

impl TypographyTokens {
    pub fn get(&self, token: TypographyToken) -> FontInfo {
        self.fonts[token as usize].clone()
    }

    pub fn set(&mut self, token: TypographyToken, font: FontInfo) {
        self.fonts[token as usize] = font;
    }
}

impl Default for TypographyTokens {
    fn default() -> Self {
        let fonts = std::array::from_fn(|i| default_font(TypographyToken::all()[i]));
        Self { fonts }
    }
}

fn default_font(token: TypographyToken) -> FontInfo {
    use FontWeight::*;
    match token {
        TypographyToken::Title1 => FontInfo::new(28.0, Semibold),
        TypographyToken::Title2 => FontInfo::new(22.0, Semibold),
        TypographyToken::Title3 => FontInfo::new(20.0, Semibold),
        TypographyToken::Body1Strong => FontInfo::new(17.0, Semibold),
        TypographyToken::Body1 => FontInfo::new(17.0, Regular),
        TypographyToken::Body2Strong => FontInfo::new(15.0, Semibold),
        TypographyToken::Body2 => FontInfo::new(15.0, Regular),
        TypographyToken::Caption1Strong => FontInfo::new(13.0, Semibold),
        TypographyToken::Caption1 => FontInfo::new(13.0, Regular),
        TypographyToken::Caption2 => FontInfo::new(12.0, Regular),
    }
}
