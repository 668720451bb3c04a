//! Tooltip tokens and presenter
//!
//! A single [`Tooltip`] presenter is reused for every tooltip shown. Each
//! presentation re-binds the same token set to the anchor view of that
//! presentation, so overrides made on the presenter survive from one tooltip
//! to the next.

use kestrel_core::{DynamicColor, ViewId};
use kestrel_theme::{
    ColorToken, ControlTokenSet, ControlTokenValue, CornerRadius, FontInfo, GlobalTokens,
    RegistrationError, ShadowInfo, ShadowToken, Spacing, Theme, ThemeHost, TypographyToken,
};
use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::rc::Rc;

kestrel_theme::token_set_keys! {
    /// Tunable properties of a tooltip
    pub enum TooltipToken {
        /// Body color
        TooltipColor: DynamicColor => "tooltip_color",
        TextColor: DynamicColor => "text_color",
        ShadowInfo: ShadowInfo => "shadow_info",
        BackgroundCornerRadius: Float => "background_corner_radius",
        MessageLabelTextStyle: FontInfo => "message_label_text_style",
        TitleLabelTextStyle: FontInfo => "title_label_text_style",
        /// Maximum width outside accessibility text sizes
        MaximumWidth: Float => "maximum_width",
        ArrowHeight: Float => "arrow_height",
        ArrowWidth: Float => "arrow_width",
    }
}

/// Token set for tooltips
pub struct TooltipTokenSet {
    tokens: ControlTokenSet<TooltipToken>,
}

impl TooltipTokenSet {
    /// Horizontal padding between the text and the tooltip edge
    pub const PADDING_HORIZONTAL: f32 = GlobalTokens::spacing(Spacing::Size120);
    /// Vertical padding when both a title and a message are shown
    pub const PADDING_VERTICAL_WITH_TITLE: f32 = GlobalTokens::spacing(Spacing::Size120);
    /// Vertical padding for a message-only tooltip
    pub const PADDING_VERTICAL_WITHOUT_TITLE: f32 = GlobalTokens::spacing(Spacing::Size80);
    /// Gap between title and message
    pub const SPACING_VERTICAL: f32 = GlobalTokens::spacing(Spacing::Size80);
    /// Margin kept from the window's safe area
    pub const SCREEN_MARGIN: f32 = GlobalTokens::spacing(Spacing::Size160);

    pub fn new(theme: Theme) -> Self {
        Self {
            tokens: ControlTokenSet::with_theme(theme, tooltip_default),
        }
    }
}

impl Deref for TooltipTokenSet {
    type Target = ControlTokenSet<TooltipToken>;

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

fn tooltip_default(token: TooltipToken, theme: &Theme) -> ControlTokenValue {
    match token {
        TooltipToken::TooltipColor => {
            let color = theme.color(ColorToken::BackgroundDarkStatic);
            ControlTokenValue::dynamic_color(move || color)
        }
        TooltipToken::TextColor => {
            let color = theme.color(ColorToken::ForegroundLightStatic);
            ControlTokenValue::dynamic_color(move || color)
        }
        TooltipToken::ShadowInfo => {
            let shadow = theme.shadow(ShadowToken::Shadow16);
            ControlTokenValue::shadow_info(move || shadow)
        }
        TooltipToken::BackgroundCornerRadius => {
            ControlTokenValue::float(|| GlobalTokens::corner(CornerRadius::Radius80))
        }
        TooltipToken::MessageLabelTextStyle => theme.font(TypographyToken::Body2).into(),
        TooltipToken::TitleLabelTextStyle => theme.font(TypographyToken::Body1Strong).into(),
        TooltipToken::MaximumWidth => 250.0_f32.into(),
        TooltipToken::ArrowHeight => 7.0_f32.into(),
        TooltipToken::ArrowWidth => 14.0_f32.into(),
    }
}

/// Resolved geometry and styling of the tooltip being shown
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipLayout {
    pub message: String,
    pub title: Option<String>,
    pub background: DynamicColor,
    pub text_color: DynamicColor,
    pub shadow: ShadowInfo,
    pub corner_radius: f32,
    pub message_font: FontInfo,
    pub title_font: Option<FontInfo>,
    pub maximum_width: f32,
    pub arrow_size: (f32, f32),
    pub padding: (f32, f32),
}

struct Presentation {
    anchor: ViewId,
    message: String,
    title: Option<String>,
}

struct TooltipInner {
    tokens: TooltipTokenSet,
    current: RefCell<Option<Presentation>>,
    layout: RefCell<Option<TooltipLayout>>,
    layouts: Cell<u64>,
}

/// Presents one tooltip at a time
pub struct Tooltip {
    inner: Rc<TooltipInner>,
}

impl Tooltip {
    pub fn new(theme: Theme) -> Self {
        Self {
            inner: Rc::new(TooltipInner {
                tokens: TooltipTokenSet::new(theme),
                current: RefCell::new(None),
                layout: RefCell::new(None),
                layouts: Cell::new(0),
            }),
        }
    }

    /// Show a tooltip anchored at `anchor`, replacing any tooltip on screen
    pub fn show<H: ThemeHost + 'static>(
        &self,
        host: &Rc<H>,
        anchor: ViewId,
        message: impl Into<String>,
        title: Option<String>,
    ) -> Result<(), RegistrationError> {
        let tokens = &self.inner.tokens;
        tokens.deregister_on_update();
        tokens.update(&host.theme_for(anchor));

        let weak = Rc::downgrade(&self.inner);
        tokens.register_on_update(anchor, host, move || {
            if let Some(inner) = weak.upgrade() {
                inner.layout();
            }
        })?;

        *self.inner.current.borrow_mut() = Some(Presentation {
            anchor,
            message: message.into(),
            title,
        });
        tracing::debug!("showing tooltip at {:?}", anchor);
        self.inner.layout();
        Ok(())
    }

    /// Dismiss the tooltip on screen, if any
    pub fn hide(&self) {
        self.inner.tokens.deregister_on_update();
        self.inner.current.borrow_mut().take();
        self.inner.layout.borrow_mut().take();
    }

    pub fn is_visible(&self) -> bool {
        self.inner.current.borrow().is_some()
    }

    pub fn anchor(&self) -> Option<ViewId> {
        self.inner.current.borrow().as_ref().map(|p| p.anchor)
    }

    /// Layout of the visible tooltip
    pub fn layout(&self) -> Option<TooltipLayout> {
        self.inner.layout.borrow().clone()
    }

    /// Number of layout passes so far
    pub fn layout_count(&self) -> u64 {
        self.inner.layouts.get()
    }

    pub fn tokens(&self) -> &TooltipTokenSet {
        &self.inner.tokens
    }
}

impl TooltipInner {
    fn layout(&self) {
        let layout = self.current.borrow().as_ref().map(|presentation| {
            let tokens = &self.tokens;
            let has_title = presentation.title.is_some();
            TooltipLayout {
                message: presentation.message.clone(),
                title: presentation.title.clone(),
                background: tokens.get(TooltipToken::TooltipColor).as_dynamic_color(),
                text_color: tokens.get(TooltipToken::TextColor).as_dynamic_color(),
                shadow: tokens.get(TooltipToken::ShadowInfo).as_shadow_info(),
                corner_radius: tokens.get(TooltipToken::BackgroundCornerRadius).as_float(),
                message_font: tokens.get(TooltipToken::MessageLabelTextStyle).as_font_info(),
                title_font: has_title
                    .then(|| tokens.get(TooltipToken::TitleLabelTextStyle).as_font_info()),
                maximum_width: tokens.get(TooltipToken::MaximumWidth).as_float(),
                arrow_size: (
                    tokens.get(TooltipToken::ArrowWidth).as_float(),
                    tokens.get(TooltipToken::ArrowHeight).as_float(),
                ),
                padding: (
                    TooltipTokenSet::PADDING_HORIZONTAL,
                    if has_title {
                        TooltipTokenSet::PADDING_VERTICAL_WITH_TITLE
                    } else {
                        TooltipTokenSet::PADDING_VERTICAL_WITHOUT_TITLE
                    },
                ),
            }
        });
        *self.layout.borrow_mut() = layout;
        self.layouts.set(self.layouts.get() + 1);
    }
}
