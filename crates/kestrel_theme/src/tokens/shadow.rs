//! Shadow alias tokens

use kestrel_core::{Color, DynamicColor};
use std::fmt;

/// Semantic shadow token keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ShadowToken {
    Clear,
    Shadow02,
    Shadow04,
    Shadow08,
    Shadow16,
    Shadow28,
    Shadow64,
}

impl ShadowToken {
    pub const COUNT: usize = 7;

    pub fn all() -> &'static [ShadowToken] {
        const ALL: [ShadowToken; ShadowToken::COUNT] = [
            ShadowToken::Clear,
            ShadowToken::Shadow02,
            ShadowToken::Shadow04,
            ShadowToken::Shadow08,
            ShadowToken::Shadow16,
            ShadowToken::Shadow28,
            ShadowToken::Shadow64,
        ];
        &ALL
    }

    /// Elevation in points
    pub fn elevation(self) -> f32 {
        match self {
            ShadowToken::Clear => 0.0,
            ShadowToken::Shadow02 => 2.0,
            ShadowToken::Shadow04 => 4.0,
            ShadowToken::Shadow08 => 8.0,
            ShadowToken::Shadow16 => 16.0,
            ShadowToken::Shadow28 => 28.0,
            ShadowToken::Shadow64 => 64.0,
        }
    }
}

/// A two-layer shadow: a directional key shadow plus a soft ambient shadow
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowInfo {
    pub key_color: DynamicColor,
    pub key_blur: f32,
    pub x_key: f32,
    pub y_key: f32,
    pub ambient_color: DynamicColor,
    pub ambient_blur: f32,
    pub x_ambient: f32,
    pub y_ambient: f32,
}

impl ShadowInfo {
    pub const fn none() -> Self {
        Self {
            key_color: DynamicColor::new(Color::TRANSPARENT),
            key_blur: 0.0,
            x_key: 0.0,
            y_key: 0.0,
            ambient_color: DynamicColor::new(Color::TRANSPARENT),
            ambient_blur: 0.0,
            x_ambient: 0.0,
            y_ambient: 0.0,
        }
    }

    /// Standard shadow for an elevation: key blur equals the elevation and
    /// drops half of it vertically, ambient blur is fixed at 2pt.
    pub fn for_elevation(elevation: f32) -> Self {
        if elevation <= 0.0 {
            return Self::none();
        }
        Self {
            key_color: DynamicColor::with_dark(
                Color::BLACK.with_alpha(0.14),
                Color::BLACK.with_alpha(0.28),
            ),
            key_blur: elevation,
            x_key: 0.0,
            y_key: elevation / 2.0,
            ambient_color: DynamicColor::with_dark(
                Color::BLACK.with_alpha(0.12),
                Color::BLACK.with_alpha(0.20),
            ),
            ambient_blur: 2.0,
            x_ambient: 0.0,
            y_ambient: 0.0,
        }
    }
}

impl Default for ShadowInfo {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for ShadowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key({} blur {} @ {},{}) ambient({} blur {} @ {},{})",
            self.key_color,
            self.key_blur,
            self.x_key,
            self.y_key,
            self.ambient_color,
            self.ambient_blur,
            self.x_ambient,
            self.y_ambient
        )
    }
}

/// Complete set of shadow tokens
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowTokens {
    shadows: [ShadowInfo; ShadowToken::COUNT],
}

impl ShadowTokens {
    pub fn get(&self, token: ShadowToken) -> ShadowInfo {
        self.shadows[token as usize]
    }

    pub fn set(&mut self, token: ShadowToken, shadow: ShadowInfo) {
        self.shadows[token as usize] = shadow;
    }
}

impl Default for ShadowTokens {
    fn default() -> Self {
        let shadows =
            std::array::from_fn(|i| ShadowInfo::for_elevation(ShadowToken::all()[i].elevation()));
        Self { shadows }
    }
}
