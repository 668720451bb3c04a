//! Alias and global design tokens
//!
//! Alias tokens are the semantic values a [`Theme`](crate::Theme) carries and
//! that control default providers read at evaluation time:
//! - Colors (light/dark pairs)
//! - Typography (font descriptors)
//! - Shadows (two-layer shadow descriptors)
//!
//! Global tokens (corner radii, spacing, stroke widths) are theme-independent
//! constants.

mod color;
mod global;
mod shadow;
mod typography;

pub use color::*;
pub use global::*;
pub use shadow::*;
pub use typography::*;
