//! Theme configuration files
//!
//! Themes can be described in TOML:
//!
//! ```toml
//! name = "contoso"
//!
//! [colors]
//! brand_background = { light = "#0F6CBD", dark = "#479EF5" }
//!
//! [controls.button]
//! corner_radius = 12.0
//! foreground_color = "#FFFFFF"
//! title_font = { size = 17.0, weight = "semibold" }
//! ```
//!
//! Numbers become float tokens, hex strings or `{ light, dark }` tables
//! become colors, tables with a `size` become fonts, and tables with a
//! `key_blur` become shadows.

use crate::key::TokenSetKey;
use crate::theme::TokenOverrides;
use crate::tokens::{ColorToken, FontInfo, FontWeight, ShadowInfo};
use crate::value::{ControlTokenValue, TokenShape};
use kestrel_core::{Color, DynamicColor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or applying a theme configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read theme config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse theme config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid color {0:?}, expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    #[error("unknown color token {0:?}")]
    UnknownColorToken(String),

    #[error("unknown token {token:?} for control {control:?}")]
    UnknownToken { control: String, token: String },

    #[error("token {token:?} for control {control:?} takes a {expected}, found a {actual}")]
    WrongShape {
        control: String,
        token: String,
        expected: TokenShape,
        actual: TokenShape,
    },

    #[error("no control named {0:?} is known")]
    UnknownControl(String),
}

/// Parsed theme configuration
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: Option<String>,
    #[serde(default)]
    pub colors: BTreeMap<String, ColorSpec>,
    #[serde(default)]
    pub controls: BTreeMap<String, BTreeMap<String, TokenSpec>>,
}

/// A color written as a hex string or a light/dark pair
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Hex(String),
    Pair(ColorPair),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorPair {
    pub light: String,
    pub dark: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontSpec {
    pub name: Option<String>,
    pub size: f32,
    #[serde(default)]
    pub weight: FontWeight,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShadowSpec {
    pub key_color: ColorSpec,
    pub key_blur: f32,
    #[serde(default)]
    pub x_key: f32,
    #[serde(default)]
    pub y_key: f32,
    pub ambient_color: ColorSpec,
    pub ambient_blur: f32,
    #[serde(default)]
    pub x_ambient: f32,
    #[serde(default)]
    pub y_ambient: f32,
}

/// A single control token value
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TokenSpec {
    Float(f32),
    Color(ColorSpec),
    Font(FontSpec),
    Shadow(ShadowSpec),
}

impl ThemeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("loading theme config from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Control section names present in this configuration
    pub fn control_names(&self) -> impl Iterator<Item = &str> {
        self.controls.keys().map(String::as_str)
    }

    /// Resolve the `[colors]` table into alias color overrides
    pub fn alias_colors(&self) -> Result<Vec<(ColorToken, DynamicColor)>, ConfigError> {
        self.colors
            .iter()
            .map(|(name, spec)| {
                let token = ColorToken::from_name(name)
                    .ok_or_else(|| ConfigError::UnknownColorToken(name.clone()))?;
                Ok((token, spec.to_dynamic_color()?))
            })
            .collect()
    }

    /// Resolve the `[controls.<control>]` table into an override layer for `K`.
    ///
    /// Returns `Ok(None)` when the configuration has no such section.
    pub fn control_overrides<K: TokenSetKey>(
        &self,
        control: &str,
    ) -> Result<Option<TokenOverrides<K>>, ConfigError> {
        let Some(section) = self.controls.get(control) else {
            return Ok(None);
        };

        let mut overrides = TokenOverrides::default();
        for (name, spec) in section {
            let key = K::from_name(name).ok_or_else(|| ConfigError::UnknownToken {
                control: control.to_string(),
                token: name.clone(),
            })?;
            if spec.shape() != key.shape() {
                return Err(ConfigError::WrongShape {
                    control: control.to_string(),
                    token: name.clone(),
                    expected: key.shape(),
                    actual: spec.shape(),
                });
            }
            overrides.insert(key, spec.to_value()?);
        }
        tracing::trace!("{} override(s) configured for {control}", overrides.len());
        Ok(Some(overrides))
    }
}

impl ColorSpec {
    pub fn to_dynamic_color(&self) -> Result<DynamicColor, ConfigError> {
        match self {
            ColorSpec::Hex(hex) => Ok(DynamicColor::new(parse_color(hex)?)),
            ColorSpec::Pair(pair) => {
                let light = parse_color(&pair.light)?;
                match &pair.dark {
                    Some(dark) => Ok(DynamicColor::with_dark(light, parse_color(dark)?)),
                    None => Ok(DynamicColor::new(light)),
                }
            }
        }
    }
}

impl TokenSpec {
    /// The shape of token value this entry produces
    pub fn shape(&self) -> TokenShape {
        match self {
            TokenSpec::Float(_) => TokenShape::Float,
            TokenSpec::Color(_) => TokenShape::DynamicColor,
            TokenSpec::Font(_) => TokenShape::FontInfo,
            TokenSpec::Shadow(_) => TokenShape::ShadowInfo,
        }
    }

    pub fn to_value(&self) -> Result<ControlTokenValue, ConfigError> {
        let value = match self {
            TokenSpec::Float(value) => ControlTokenValue::from(*value),
            TokenSpec::Color(color) => ControlTokenValue::from(color.to_dynamic_color()?),
            TokenSpec::Font(font) => ControlTokenValue::from(FontInfo {
                name: font.name.clone(),
                size: font.size,
                weight: font.weight,
            }),
            TokenSpec::Shadow(shadow) => ControlTokenValue::from(ShadowInfo {
                key_color: shadow.key_color.to_dynamic_color()?,
                key_blur: shadow.key_blur,
                x_key: shadow.x_key,
                y_key: shadow.y_key,
                ambient_color: shadow.ambient_color.to_dynamic_color()?,
                ambient_blur: shadow.ambient_blur,
                x_ambient: shadow.x_ambient,
                y_ambient: shadow.y_ambient,
            }),
        };
        Ok(value)
    }
}

fn parse_color(text: &str) -> Result<Color, ConfigError> {
    Color::parse_hex(text).ok_or_else(|| ConfigError::InvalidColor(text.to_string()))
}
