//! Theme-independent constants

/// Corner radius scale
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum CornerRadius {
    None,
    Radius20,
    Radius40,
    Radius60,
    Radius80,
    Radius120,
    Circular,
}

/// Spacing scale (4px based)
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Spacing {
    None,
    Size20,
    Size40,
    Size60,
    Size80,
    Size100,
    Size120,
    Size160,
    Size200,
    Size240,
}

/// Stroke width scale
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum StrokeWidth {
    None,
    Width10,
    Width20,
    Width40,
}

/// Lookup for global tokens
pub struct GlobalTokens;

impl GlobalTokens {
    pub const fn corner(radius: CornerRadius) -> f32 {
        match radius {
            CornerRadius::None => 0.0,
            CornerRadius::Radius20 => 2.0,
            CornerRadius::Radius40 => 4.0,
            CornerRadius::Radius60 => 6.0,
            CornerRadius::Radius80 => 8.0,
            CornerRadius::Radius120 => 12.0,
            CornerRadius::Circular => 9999.0,
        }
    }

    pub const fn spacing(size: Spacing) -> f32 {
        match size {
            Spacing::None => 0.0,
            Spacing::Size20 => 2.0,
            Spacing::Size40 => 4.0,
            Spacing::Size60 => 6.0,
            Spacing::Size80 => 8.0,
            Spacing::Size100 => 10.0,
            Spacing::Size120 => 12.0,
            Spacing::Size160 => 16.0,
            Spacing::Size200 => 20.0,
            Spacing::Size240 => 24.0,
        }
    }

    pub const fn stroke_width(width: StrokeWidth) -> f32 {
        match width {
            StrokeWidth::None => 0.0,
            StrokeWidth::Width10 => 1.0,
            StrokeWidth::Width20 => 2.0,
            StrokeWidth::Width40 => 4.0,
        }
    }
}
