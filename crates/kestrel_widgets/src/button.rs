//! Button tokens and a headless button control
//!
//! The button's defaults depend on its style and size. Both are read through
//! closures at resolution time, so changing the style of a live button changes
//! what its token set resolves to without rebuilding the set.

use kestrel_core::{Color, DynamicColor, ViewId};
use kestrel_theme::{
    ColorToken, ControlTokenSet, ControlTokenValue, CornerRadius, FontInfo, GlobalTokens,
    RegistrationError, Spacing, StrokeWidth, Theme, ThemeHost, TypographyToken,
};
use std::cell::{Cell, Ref, RefCell};
use std::ops::Deref;
use std::rc::{Rc, Weak};

use crate::widget::Control;

kestrel_theme::token_set_keys! {
    /// Tunable properties of a [`Button`]
    pub enum ButtonToken {
        BackgroundColor: DynamicColor => "background_color",
        BackgroundFocusedColor: DynamicColor => "background_focused_color",
        BackgroundPressedColor: DynamicColor => "background_pressed_color",
        BackgroundDisabledColor: DynamicColor => "background_disabled_color",
        BorderColor: DynamicColor => "border_color",
        BorderFocusedColor: DynamicColor => "border_focused_color",
        BorderPressedColor: DynamicColor => "border_pressed_color",
        BorderDisabledColor: DynamicColor => "border_disabled_color",
        BorderWidth: Float => "border_width",
        CornerRadius: Float => "corner_radius",
        ForegroundColor: DynamicColor => "foreground_color",
        ForegroundPressedColor: DynamicColor => "foreground_pressed_color",
        ForegroundDisabledColor: DynamicColor => "foreground_disabled_color",
        TitleFont: FontInfo => "title_font",
    }
}

/// Visual emphasis of a button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonStyle {
    Accent,
    #[default]
    Outline,
    Subtle,
    Danger,
}

/// Size category of a button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Token set for [`Button`]
pub struct ButtonTokenSet {
    tokens: ControlTokenSet<ButtonToken>,
}

impl ButtonTokenSet {
    /// Create a set whose defaults follow `style` and `size` as they change
    pub fn new<S, Z>(theme: Theme, style: S, size: Z) -> Self
    where
        S: Fn() -> ButtonStyle + 'static,
        Z: Fn() -> ButtonSize + 'static,
    {
        let tokens = ControlTokenSet::with_theme(theme, move |token: ButtonToken, theme: &Theme| {
            button_default(token, theme, style(), size())
        });
        Self { tokens }
    }

    /// Horizontal padding between the title and the button edge
    pub fn horizontal_padding(size: ButtonSize) -> f32 {
        match size {
            ButtonSize::Small => GlobalTokens::spacing(Spacing::Size80),
            ButtonSize::Medium => GlobalTokens::spacing(Spacing::Size120),
            ButtonSize::Large => GlobalTokens::spacing(Spacing::Size200),
        }
    }

    pub fn min_container_height(size: ButtonSize) -> f32 {
        match size {
            ButtonSize::Small => 28.0,
            ButtonSize::Medium => 40.0,
            ButtonSize::Large => 52.0,
        }
    }

    /// Space between the image and the title
    pub fn title_image_spacing(size: ButtonSize) -> f32 {
        match size {
            ButtonSize::Small => GlobalTokens::spacing(Spacing::Size40),
            ButtonSize::Medium | ButtonSize::Large => GlobalTokens::spacing(Spacing::Size80),
        }
    }
}

impl Deref for ButtonTokenSet {
    type Target = ControlTokenSet<ButtonToken>;

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

fn clear() -> ControlTokenValue {
    Color::TRANSPARENT.into()
}

fn alias(theme: &Theme, token: ColorToken) -> ControlTokenValue {
    let color: DynamicColor = theme.color(token);
    ControlTokenValue::dynamic_color(move || color)
}

fn button_default(
    token: ButtonToken,
    theme: &Theme,
    style: ButtonStyle,
    size: ButtonSize,
) -> ControlTokenValue {
    use ButtonStyle::*;

    match token {
        ButtonToken::BackgroundColor => match style {
            Accent => alias(theme, ColorToken::BrandBackground),
            Outline | Subtle => clear(),
            Danger => alias(theme, ColorToken::DangerBackground),
        },
        ButtonToken::BackgroundFocusedColor => match style {
            Accent => alias(theme, ColorToken::BrandBackgroundSelected),
            Outline | Subtle => clear(),
            Danger => alias(theme, ColorToken::DangerBackgroundPressed),
        },
        ButtonToken::BackgroundPressedColor => match style {
            Accent => alias(theme, ColorToken::BrandBackgroundPressed),
            Outline | Subtle => alias(theme, ColorToken::Background1Pressed),
            Danger => alias(theme, ColorToken::DangerBackgroundPressed),
        },
        ButtonToken::BackgroundDisabledColor => match style {
            Accent | Danger => alias(theme, ColorToken::BackgroundDisabled),
            Outline | Subtle => clear(),
        },
        ButtonToken::BorderColor => match style {
            Outline => alias(theme, ColorToken::Stroke1),
            _ => clear(),
        },
        ButtonToken::BorderFocusedColor => alias(theme, ColorToken::StrokeFocus),
        ButtonToken::BorderPressedColor => match style {
            Outline => alias(theme, ColorToken::Stroke1Pressed),
            _ => clear(),
        },
        ButtonToken::BorderDisabledColor => match style {
            Outline => alias(theme, ColorToken::StrokeDisabled),
            _ => clear(),
        },
        ButtonToken::BorderWidth => match style {
            Outline => GlobalTokens::stroke_width(StrokeWidth::Width10).into(),
            _ => GlobalTokens::stroke_width(StrokeWidth::None).into(),
        },
        ButtonToken::CornerRadius => match size {
            ButtonSize::Small => GlobalTokens::corner(CornerRadius::Radius40).into(),
            ButtonSize::Medium | ButtonSize::Large => {
                GlobalTokens::corner(CornerRadius::Radius80).into()
            }
        },
        ButtonToken::ForegroundColor | ButtonToken::ForegroundPressedColor => match style {
            Accent | Danger => alias(theme, ColorToken::ForegroundOnColor),
            Outline | Subtle => alias(theme, ColorToken::BrandForeground),
        },
        ButtonToken::ForegroundDisabledColor => alias(theme, ColorToken::ForegroundDisabled),
        ButtonToken::TitleFont => {
            let font = match size {
                ButtonSize::Small => theme.font(TypographyToken::Caption1Strong),
                ButtonSize::Medium => theme.font(TypographyToken::Body2Strong),
                ButtonSize::Large => theme.font(TypographyToken::Body1Strong),
            };
            ControlTokenValue::font_info(move || font.clone())
        }
    }
}

/// Everything a renderer needs to draw a button in its current state
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonAppearance {
    pub background: DynamicColor,
    pub border: DynamicColor,
    pub border_width: f32,
    pub corner_radius: f32,
    pub foreground: DynamicColor,
    pub title_font: FontInfo,
    pub horizontal_padding: f32,
    pub min_height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Interaction {
    enabled: bool,
    pressed: bool,
    focused: bool,
}

struct ButtonInner {
    view: ViewId,
    title: RefCell<String>,
    style: Rc<Cell<ButtonStyle>>,
    size: Rc<Cell<ButtonSize>>,
    interaction: Cell<Interaction>,
    tokens: ButtonTokenSet,
    appearance: RefCell<ButtonAppearance>,
    renders: Cell<u64>,
}

/// A button without a rendering backend.
///
/// Rendering resolves the tokens into a [`ButtonAppearance`]; the button
/// re-renders on the dispatch turn after any of its tokens change.
pub struct Button {
    inner: Rc<ButtonInner>,
}

impl Button {
    /// Create a button occupying `view` and register it with its token set
    pub fn new<H: ThemeHost + 'static>(
        host: &Rc<H>,
        view: ViewId,
        title: impl Into<String>,
        style: ButtonStyle,
        size: ButtonSize,
    ) -> Result<Self, RegistrationError> {
        let style = Rc::new(Cell::new(style));
        let size = Rc::new(Cell::new(size));
        let tokens = {
            let (style, size) = (style.clone(), size.clone());
            ButtonTokenSet::new(host.theme_for(view), move || style.get(), move || size.get())
        };
        let appearance = resolve(&tokens, size.get(), Interaction::default());

        let inner = Rc::new(ButtonInner {
            view,
            title: RefCell::new(title.into()),
            style,
            size,
            interaction: Cell::new(Interaction::default()),
            tokens,
            appearance: RefCell::new(appearance),
            renders: Cell::new(1),
        });

        let weak: Weak<ButtonInner> = Rc::downgrade(&inner);
        inner.tokens.register_on_update(view, host, move || {
            if let Some(inner) = weak.upgrade() {
                inner.render();
            }
        })?;

        Ok(Self { inner })
    }

    pub fn title(&self) -> Ref<'_, String> {
        self.inner.title.borrow()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        *self.inner.title.borrow_mut() = title.into();
    }

    pub fn style(&self) -> ButtonStyle {
        self.inner.style.get()
    }

    /// Change the style. Token defaults follow immediately.
    pub fn set_style(&self, style: ButtonStyle) {
        if self.inner.style.replace(style) != style {
            self.inner.render();
        }
    }

    pub fn size(&self) -> ButtonSize {
        self.inner.size.get()
    }

    pub fn set_size(&self, size: ButtonSize) {
        if self.inner.size.replace(size) != size {
            self.inner.render();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.interaction.get().enabled
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.interact(|state| state.enabled = enabled);
    }

    pub fn set_pressed(&self, pressed: bool) {
        self.interact(|state| state.pressed = pressed);
    }

    pub fn set_focused(&self, focused: bool) {
        self.interact(|state| state.focused = focused);
    }

    /// The appearance from the most recent render
    pub fn appearance(&self) -> ButtonAppearance {
        self.inner.appearance.borrow().clone()
    }

    /// Number of renders so far, including the initial one
    pub fn render_count(&self) -> u64 {
        self.inner.renders.get()
    }

    /// The button's token set, for overrides
    pub fn tokens(&self) -> &ButtonTokenSet {
        &self.inner.tokens
    }

    fn interact(&self, change: impl FnOnce(&mut Interaction)) {
        let mut state = self.inner.interaction.get();
        change(&mut state);
        if self.inner.interaction.replace(state) != state {
            self.inner.render();
        }
    }
}

impl Control for Button {
    type Tokens = ButtonToken;

    fn view(&self) -> ViewId {
        self.inner.view
    }

    fn token_set(&self) -> &ControlTokenSet<ButtonToken> {
        &self.inner.tokens
    }

    fn render(&self) {
        self.inner.render();
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            enabled: true,
            pressed: false,
            focused: false,
        }
    }
}

impl ButtonInner {
    fn render(&self) {
        let appearance = resolve(&self.tokens, self.size.get(), self.interaction.get());
        *self.appearance.borrow_mut() = appearance;
        self.renders.set(self.renders.get() + 1);
        tracing::trace!("button {:?} rendered", self.view);
    }
}

fn resolve(tokens: &ButtonTokenSet, size: ButtonSize, state: Interaction) -> ButtonAppearance {
    let color = |token| tokens.get(token).as_dynamic_color();

    let background = if !state.enabled {
        color(ButtonToken::BackgroundDisabledColor)
    } else if state.pressed {
        color(ButtonToken::BackgroundPressedColor)
    } else if state.focused {
        color(ButtonToken::BackgroundFocusedColor)
    } else {
        color(ButtonToken::BackgroundColor)
    };

    let border = if !state.enabled {
        color(ButtonToken::BorderDisabledColor)
    } else if state.pressed {
        color(ButtonToken::BorderPressedColor)
    } else if state.focused {
        color(ButtonToken::BorderFocusedColor)
    } else {
        color(ButtonToken::BorderColor)
    };

    let foreground = if !state.enabled {
        color(ButtonToken::ForegroundDisabledColor)
    } else if state.pressed {
        color(ButtonToken::ForegroundPressedColor)
    } else {
        color(ButtonToken::ForegroundColor)
    };

    ButtonAppearance {
        background,
        border,
        border_width: tokens.get(ButtonToken::BorderWidth).as_float(),
        corner_radius: tokens.get(ButtonToken::CornerRadius).as_float(),
        foreground,
        title_font: tokens.get(ButtonToken::TitleFont).as_font_info(),
        horizontal_padding: ButtonTokenSet::horizontal_padding(size),
        min_height: ButtonTokenSet::min_container_height(size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::dispatch;
    use kestrel_theme::{ThemeBuilder, ThemedViewTree, TokenSetKey};

    fn fixture(style: ButtonStyle) -> (Rc<ThemedViewTree>, Button) {
        let host = Rc::new(ThemedViewTree::new());
        let window = host.insert_root();
        host.set_theme(window, Theme::default()).unwrap();
        let view = host.insert_child(window).unwrap();
        let button = Button::new(&host, view, "OK", style, ButtonSize::Medium).unwrap();
        (host, button)
    }

    #[test]
    fn test_every_token_has_a_default_for_every_style() {
        for style in [
            ButtonStyle::Accent,
            ButtonStyle::Outline,
            ButtonStyle::Subtle,
            ButtonStyle::Danger,
        ] {
            let tokens = ButtonTokenSet::new(Theme::default(), move || style, || ButtonSize::Large);
            for token in ButtonToken::all() {
                match token {
                    ButtonToken::BorderWidth | ButtonToken::CornerRadius => {
                        tokens.get(*token).as_float();
                    }
                    ButtonToken::TitleFont => {
                        tokens.get(*token).as_font_info();
                    }
                    _ => {
                        tokens.get(*token).as_dynamic_color();
                    }
                }
            }
        }
    }

    #[test]
    fn test_defaults_follow_style_changes() {
        let (_host, button) = fixture(ButtonStyle::Outline);
        assert_eq!(button.appearance().border_width, 1.0);

        button.set_style(ButtonStyle::Accent);
        let theme = Theme::default();
        assert_eq!(button.appearance().border_width, 0.0);
        assert_eq!(
            button.appearance().background,
            theme.color(ColorToken::BrandBackground)
        );
    }

    #[test]
    fn test_size_drives_radius_and_font() {
        let (_host, button) = fixture(ButtonStyle::Subtle);
        assert_eq!(button.appearance().corner_radius, 8.0);

        button.set_size(ButtonSize::Small);
        let appearance = button.appearance();
        assert_eq!(appearance.corner_radius, 4.0);
        assert_eq!(
            appearance.title_font,
            Theme::default().font(TypographyToken::Caption1Strong)
        );
        assert_eq!(appearance.min_height, 28.0);
    }

    #[test]
    fn test_interaction_state_selects_tokens() {
        let (_host, button) = fixture(ButtonStyle::Accent);
        let theme = Theme::default();

        button.set_pressed(true);
        assert_eq!(
            button.appearance().background,
            theme.color(ColorToken::BrandBackgroundPressed)
        );

        button.set_pressed(false);
        button.set_enabled(false);
        let appearance = button.appearance();
        assert_eq!(appearance.background, theme.color(ColorToken::BackgroundDisabled));
        assert_eq!(appearance.foreground, theme.color(ColorToken::ForegroundDisabled));
    }

    #[test]
    fn test_override_rerenders_on_next_turn() {
        let (_host, button) = fixture(ButtonStyle::Outline);
        let before = button.render_count();

        button.tokens().set(ButtonToken::CornerRadius, 20.0_f32);
        button.tokens().set(ButtonToken::BorderWidth, 3.0_f32);
        assert_eq!(button.appearance().corner_radius, 8.0);

        dispatch::run_until_idle();
        assert_eq!(button.render_count(), before + 1);
        assert_eq!(button.appearance().corner_radius, 20.0);
        assert_eq!(button.appearance().border_width, 3.0);
    }

    #[test]
    fn test_theme_broadcast_rerenders() {
        let (host, button) = fixture(ButtonStyle::Accent);
        let brand = DynamicColor::new(Color::from_hex(0x8764B8));
        let purple = ThemeBuilder::new("purple")
            .color(ColorToken::BrandBackground, brand)
            .build();

        let window = host.tree().root_of(button.view()).unwrap();
        host.set_theme(window, purple).unwrap();
        dispatch::run_until_idle();
        assert_eq!(button.appearance().background, brand);
    }

    #[test]
    fn test_did_move_to_adopts_new_context() {
        let (host, button) = fixture(ButtonStyle::Accent);
        let other = host.insert_root();
        let brand = DynamicColor::new(Color::from_hex(0x107C10));
        host.set_theme(
            other,
            ThemeBuilder::new("green")
                .color(ColorToken::BrandBackground, brand)
                .build(),
        )
        .unwrap();

        host.move_view(button.view(), Some(other)).unwrap();
        let before = button.render_count();
        button.did_move_to(host.as_ref());
        assert_eq!(button.render_count(), before);

        dispatch::run_until_idle();
        assert_eq!(button.render_count(), before + 1);
        assert_eq!(button.appearance().background, brand);
    }

    #[test]
    fn test_did_move_to_same_theme_renders_once_immediately() {
        let (host, button) = fixture(ButtonStyle::Accent);
        let sibling = host.insert_root();
        host.move_view(button.view(), Some(sibling)).unwrap();

        let before = button.render_count();
        button.did_move_to(host.as_ref());
        assert_eq!(button.render_count(), before + 1);
        dispatch::run_until_idle();
        assert_eq!(button.render_count(), before + 1);
    }

    #[test]
    fn test_dropping_button_stops_updates() {
        let (_host, button) = fixture(ButtonStyle::Outline);
        button.tokens().set(ButtonToken::BorderWidth, 2.0_f32);
        drop(button);
        assert_eq!(dispatch::run_until_idle(), 1);
        assert_eq!(kestrel_theme::broadcast::observer_count(), 0);
    }
}
