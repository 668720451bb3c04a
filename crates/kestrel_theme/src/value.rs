//! Token values
//!
//! A [`ControlTokenValue`] wraps a zero-argument evaluator rather than a
//! finished value, so a value may depend on theme state that is only final
//! after the token set was built (a brand color swapped at runtime, say).
//! Every accessor re-runs the evaluator; nothing is cached between reads.

use crate::tokens::{FontInfo, ShadowInfo};
use kestrel_core::{Color, DynamicColor};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Shared zero-argument evaluator
pub type TokenFn<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// The shape of value a token holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenShape {
    Float,
    DynamicColor,
    FontInfo,
    ShadowInfo,
}

impl fmt::Display for TokenShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenShape::Float => "float",
            TokenShape::DynamicColor => "dynamic color",
            TokenShape::FontInfo => "font info",
            TokenShape::ShadowInfo => "shadow info",
        };
        f.write_str(name)
    }
}

/// Reading a token value as a shape it does not hold
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenValueError {
    #[error("cannot convert {actual} token to {expected}")]
    WrongShape {
        expected: TokenShape,
        actual: TokenShape,
    },
}

/// Union of every value shape a control token can hold
#[derive(Clone)]
pub enum ControlTokenValue {
    Float(TokenFn<f32>),
    DynamicColor(TokenFn<DynamicColor>),
    FontInfo(TokenFn<FontInfo>),
    ShadowInfo(TokenFn<ShadowInfo>),
}

impl ControlTokenValue {
    pub fn float<F>(f: F) -> Self
    where
        F: Fn() -> f32 + Send + Sync + 'static,
    {
        ControlTokenValue::Float(Arc::new(f))
    }

    pub fn dynamic_color<F>(f: F) -> Self
    where
        F: Fn() -> DynamicColor + Send + Sync + 'static,
    {
        ControlTokenValue::DynamicColor(Arc::new(f))
    }

    pub fn font_info<F>(f: F) -> Self
    where
        F: Fn() -> FontInfo + Send + Sync + 'static,
    {
        ControlTokenValue::FontInfo(Arc::new(f))
    }

    pub fn shadow_info<F>(f: F) -> Self
    where
        F: Fn() -> ShadowInfo + Send + Sync + 'static,
    {
        ControlTokenValue::ShadowInfo(Arc::new(f))
    }

    pub fn shape(&self) -> TokenShape {
        match self {
            ControlTokenValue::Float(_) => TokenShape::Float,
            ControlTokenValue::DynamicColor(_) => TokenShape::DynamicColor,
            ControlTokenValue::FontInfo(_) => TokenShape::FontInfo,
            ControlTokenValue::ShadowInfo(_) => TokenShape::ShadowInfo,
        }
    }

    pub fn try_float(&self) -> Result<f32, TokenValueError> {
        match self {
            ControlTokenValue::Float(f) => Ok(f()),
            _ => Err(self.mismatch(TokenShape::Float)),
        }
    }

    pub fn try_dynamic_color(&self) -> Result<DynamicColor, TokenValueError> {
        match self {
            ControlTokenValue::DynamicColor(f) => Ok(f()),
            _ => Err(self.mismatch(TokenShape::DynamicColor)),
        }
    }

    pub fn try_font_info(&self) -> Result<FontInfo, TokenValueError> {
        match self {
            ControlTokenValue::FontInfo(f) => Ok(f()),
            _ => Err(self.mismatch(TokenShape::FontInfo)),
        }
    }

    pub fn try_shadow_info(&self) -> Result<ShadowInfo, TokenValueError> {
        match self {
            ControlTokenValue::ShadowInfo(f) => Ok(f()),
            _ => Err(self.mismatch(TokenShape::ShadowInfo)),
        }
    }

    /// Evaluate as a float.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the value is not a float. Release builds
    /// log the mismatch and return `0.0`.
    pub fn as_float(&self) -> f32 {
        self.try_float().unwrap_or_else(|err| {
            report_mismatch(self, err);
            0.0
        })
    }

    /// Evaluate as a dynamic color.
    ///
    /// # Panics
    ///
    /// Panics in debug builds on a shape mismatch. Release builds log the
    /// mismatch and return [`fallback_color`].
    pub fn as_dynamic_color(&self) -> DynamicColor {
        self.try_dynamic_color().unwrap_or_else(|err| {
            report_mismatch(self, err);
            fallback_color()
        })
    }

    /// Evaluate as a font.
    ///
    /// # Panics
    ///
    /// Panics in debug builds on a shape mismatch. Release builds return a
    /// zero-sized system font.
    pub fn as_font_info(&self) -> FontInfo {
        self.try_font_info().unwrap_or_else(|err| {
            report_mismatch(self, err);
            FontInfo::new(0.0, Default::default())
        })
    }

    /// Evaluate as a shadow.
    ///
    /// # Panics
    ///
    /// Panics in debug builds on a shape mismatch. Release builds return a
    /// shadow drawn in [`fallback_color`] on both layers.
    pub fn as_shadow_info(&self) -> ShadowInfo {
        self.try_shadow_info().unwrap_or_else(|err| {
            report_mismatch(self, err);
            fallback_shadow()
        })
    }

    fn mismatch(&self, expected: TokenShape) -> TokenValueError {
        TokenValueError::WrongShape {
            expected,
            actual: self.shape(),
        }
    }
}

impl From<f32> for ControlTokenValue {
    fn from(value: f32) -> Self {
        ControlTokenValue::float(move || value)
    }
}

impl From<DynamicColor> for ControlTokenValue {
    fn from(value: DynamicColor) -> Self {
        ControlTokenValue::dynamic_color(move || value)
    }
}

impl From<Color> for ControlTokenValue {
    fn from(value: Color) -> Self {
        DynamicColor::new(value).into()
    }
}

impl From<FontInfo> for ControlTokenValue {
    fn from(value: FontInfo) -> Self {
        ControlTokenValue::font_info(move || value.clone())
    }
}

impl From<ShadowInfo> for ControlTokenValue {
    fn from(value: ShadowInfo) -> Self {
        ControlTokenValue::shadow_info(move || value)
    }
}

impl fmt::Debug for ControlTokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlTokenValue::Float(v) => write!(f, "ControlTokenValue::Float({})", v()),
            ControlTokenValue::DynamicColor(v) => {
                write!(f, "ControlTokenValue::DynamicColor({})", v())
            }
            ControlTokenValue::FontInfo(v) => write!(f, "ControlTokenValue::FontInfo({})", v()),
            ControlTokenValue::ShadowInfo(v) => {
                write!(f, "ControlTokenValue::ShadowInfo({})", v())
            }
        }
    }
}

/// Color returned for a wrong-shape color read.
///
/// Hot pink (`#E3008C`) in debug builds so misuse stands out, black otherwise.
pub fn fallback_color() -> DynamicColor {
    if cfg!(debug_assertions) {
        DynamicColor::new(Color::from_hex(0xE3008C))
    } else {
        DynamicColor::new(Color::BLACK)
    }
}

fn fallback_shadow() -> ShadowInfo {
    ShadowInfo {
        key_color: fallback_color(),
        key_blur: 10.0,
        x_key: 10.0,
        y_key: 10.0,
        ambient_color: fallback_color(),
        ambient_blur: 10.0,
        x_ambient: 10.0,
        y_ambient: 10.0,
    }
}

fn report_mismatch(value: &ControlTokenValue, err: TokenValueError) {
    tracing::error!("{err}: {value:?}");
    if cfg!(debug_assertions) {
        panic!("{err}: {value:?}");
    }
}
