//! Pill button bar
//!
//! A horizontal row of pill-shaped buttons with at most one selected. All
//! pills share the bar's token set.

use kestrel_core::{DynamicColor, ViewId};
use kestrel_theme::{
    ColorToken, ControlTokenSet, ControlTokenValue, FontInfo, GlobalTokens, RegistrationError,
    Spacing, Theme, ThemeHost, TypographyToken,
};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::rc::Rc;

use crate::widget::Control;

kestrel_theme::token_set_keys! {
    /// Tunable properties of a pill button
    pub enum PillButtonToken {
        BackgroundColor: DynamicColor => "background_color",
        BackgroundColorSelected: DynamicColor => "background_color_selected",
        BackgroundColorDisabled: DynamicColor => "background_color_disabled",
        BackgroundColorSelectedDisabled: DynamicColor => "background_color_selected_disabled",
        TitleColor: DynamicColor => "title_color",
        TitleColorSelected: DynamicColor => "title_color_selected",
        TitleColorDisabled: DynamicColor => "title_color_disabled",
        TitleColorSelectedDisabled: DynamicColor => "title_color_selected_disabled",
        EnabledUnreadDotColor: DynamicColor => "enabled_unread_dot_color",
        DisabledUnreadDotColor: DynamicColor => "disabled_unread_dot_color",
        Font: FontInfo => "font",
    }
}

/// Surface the bar sits on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PillButtonStyle {
    #[default]
    Primary,
    OnBrand,
}

pub struct PillButtonBarTokenSet {
    tokens: ControlTokenSet<PillButtonToken>,
}

impl PillButtonBarTokenSet {
    pub const CORNER_RADIUS: f32 = 16.0;
    pub const HORIZONTAL_INSET: f32 = GlobalTokens::spacing(Spacing::Size160);
    pub const VERTICAL_INSET: f32 = GlobalTokens::spacing(Spacing::Size60);
    pub const MIN_HEIGHT: f32 = 28.0;
    pub const MIN_WIDTH: f32 = 56.0;
    pub const ITEM_SPACING: f32 = GlobalTokens::spacing(Spacing::Size80);
    pub const UNREAD_DOT_SIZE: f32 = 6.0;

    pub fn new<S>(theme: Theme, style: S) -> Self
    where
        S: Fn() -> PillButtonStyle + 'static,
    {
        let defaults =
            move |token: PillButtonToken, theme: &Theme| pill_default(token, theme, style());
        Self {
            tokens: ControlTokenSet::with_theme(theme, defaults),
        }
    }
}

impl Deref for PillButtonBarTokenSet {
    type Target = ControlTokenSet<PillButtonToken>;

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

fn pill_default(
    token: PillButtonToken,
    theme: &Theme,
    style: PillButtonStyle,
) -> ControlTokenValue {
    use PillButtonStyle::*;

    let color = match (token, style) {
        (PillButtonToken::Font, _) => return theme.font(TypographyToken::Body2).into(),
        (PillButtonToken::BackgroundColor, Primary) => ColorToken::Background5,
        (PillButtonToken::BackgroundColor, OnBrand) => ColorToken::BrandBackgroundPressed,
        (PillButtonToken::BackgroundColorSelected, Primary) => ColorToken::BrandBackground,
        (PillButtonToken::BackgroundColorSelected, OnBrand) => ColorToken::Background1,
        (PillButtonToken::BackgroundColorDisabled, _) => ColorToken::Background5,
        (PillButtonToken::BackgroundColorSelectedDisabled, _) => ColorToken::BackgroundDisabled,
        (PillButtonToken::TitleColor, Primary) => ColorToken::Foreground2,
        (PillButtonToken::TitleColor, OnBrand) => ColorToken::ForegroundOnColor,
        (PillButtonToken::TitleColorSelected, Primary) => ColorToken::ForegroundOnColor,
        (PillButtonToken::TitleColorSelected, OnBrand) => ColorToken::BrandForeground,
        (PillButtonToken::TitleColorDisabled, _)
        | (PillButtonToken::TitleColorSelectedDisabled, _) => ColorToken::ForegroundDisabled,
        (PillButtonToken::EnabledUnreadDotColor, Primary) => ColorToken::BrandForeground,
        (PillButtonToken::EnabledUnreadDotColor, OnBrand) => ColorToken::ForegroundOnColor,
        (PillButtonToken::DisabledUnreadDotColor, _) => ColorToken::ForegroundDisabled,
    };
    let color = theme.color(color);
    ControlTokenValue::dynamic_color(move || color)
}

/// One pill in a bar
#[derive(Clone, Debug, PartialEq)]
pub struct PillItem {
    pub title: String,
    pub enabled: bool,
    pub unread: bool,
}

impl PillItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            enabled: true,
            unread: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn unread(mut self) -> Self {
        self.unread = true;
        self
    }
}

/// Resolved styling of one pill
#[derive(Clone, Debug, PartialEq)]
pub struct PillAppearance {
    pub background: DynamicColor,
    pub title_color: DynamicColor,
    pub unread_dot: Option<DynamicColor>,
    pub font: FontInfo,
}

struct BarInner {
    view: ViewId,
    style: Rc<Cell<PillButtonStyle>>,
    items: SmallVec<[PillItem; 8]>,
    selected: Cell<Option<usize>>,
    tokens: PillButtonBarTokenSet,
    appearance: RefCell<SmallVec<[PillAppearance; 8]>>,
}

/// A headless pill button bar
pub struct PillButtonBar {
    inner: Rc<BarInner>,
}

impl PillButtonBar {
    pub fn new<H, I>(
        host: &Rc<H>,
        view: ViewId,
        items: I,
        style: PillButtonStyle,
    ) -> Result<Self, RegistrationError>
    where
        H: ThemeHost + 'static,
        I: IntoIterator<Item = PillItem>,
    {
        let style = Rc::new(Cell::new(style));
        let tokens = {
            let style = style.clone();
            PillButtonBarTokenSet::new(host.theme_for(view), move || style.get())
        };

        let inner = Rc::new(BarInner {
            view,
            style,
            items: items.into_iter().collect(),
            selected: Cell::new(None),
            tokens,
            appearance: RefCell::new(SmallVec::new()),
        });
        inner.render();

        let weak = Rc::downgrade(&inner);
        inner.tokens.register_on_update(view, host, move || {
            if let Some(inner) = weak.upgrade() {
                inner.render();
            }
        })?;
        Ok(Self { inner })
    }

    pub fn items(&self) -> &[PillItem] {
        &self.inner.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.inner.selected.get()
    }

    /// Select the pill at `index`. Out-of-range or disabled pills are ignored.
    pub fn select(&self, index: Option<usize>) -> bool {
        if let Some(i) = index {
            match self.inner.items.get(i) {
                Some(item) if item.enabled => {}
                _ => {
                    tracing::warn!("cannot select pill {i}");
                    return false;
                }
            }
        }
        if self.inner.selected.replace(index) != index {
            self.inner.render();
        }
        true
    }

    pub fn set_style(&self, style: PillButtonStyle) {
        if self.inner.style.replace(style) != style {
            self.inner.render();
        }
    }

    /// Appearance of every pill as of the most recent render
    pub fn appearance(&self) -> SmallVec<[PillAppearance; 8]> {
        self.inner.appearance.borrow().clone()
    }

    pub fn tokens(&self) -> &PillButtonBarTokenSet {
        &self.inner.tokens
    }
}

impl Control for PillButtonBar {
    type Tokens = PillButtonToken;

    fn view(&self) -> ViewId {
        self.inner.view
    }

    fn token_set(&self) -> &ControlTokenSet<PillButtonToken> {
        &self.inner.tokens
    }

    fn render(&self) {
        self.inner.render();
    }
}

impl BarInner {
    fn render(&self) {
        let color = |token| self.tokens.get(token).as_dynamic_color();
        let font = self.tokens.get(PillButtonToken::Font).as_font_info();
        let selected = self.selected.get();

        let appearance = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let (background, title) = match (selected == Some(index), item.enabled) {
                    (false, true) => (
                        PillButtonToken::BackgroundColor,
                        PillButtonToken::TitleColor,
                    ),
                    (true, true) => (
                        PillButtonToken::BackgroundColorSelected,
                        PillButtonToken::TitleColorSelected,
                    ),
                    (false, false) => (
                        PillButtonToken::BackgroundColorDisabled,
                        PillButtonToken::TitleColorDisabled,
                    ),
                    (true, false) => (
                        PillButtonToken::BackgroundColorSelectedDisabled,
                        PillButtonToken::TitleColorSelectedDisabled,
                    ),
                };
                let dot = if item.enabled {
                    PillButtonToken::EnabledUnreadDotColor
                } else {
                    PillButtonToken::DisabledUnreadDotColor
                };
                PillAppearance {
                    background: color(background),
                    title_color: color(title),
                    unread_dot: item.unread.then(|| color(dot)),
                    font: font.clone(),
                }
            })
            .collect();
        *self.appearance.borrow_mut() = appearance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::{dispatch, Color};
    use kestrel_theme::ThemedViewTree;

    fn bar(style: PillButtonStyle) -> (Rc<ThemedViewTree>, PillButtonBar) {
        let host = Rc::new(ThemedViewTree::new());
        let view = host.insert_root();
        let items = [
            PillItem::new("All"),
            PillItem::new("Unread").unread(),
            PillItem::new("Archived").disabled(),
        ];
        let bar = PillButtonBar::new(&host, view, items, style).unwrap();
        (host, bar)
    }

    #[test]
    fn test_selection_changes_pill_colors() {
        let (_host, bar) = bar(PillButtonStyle::Primary);
        let theme = Theme::default();
        assert_eq!(bar.appearance().len(), 3);

        assert!(bar.select(Some(1)));
        let pills = bar.appearance();
        assert_eq!(pills[0].background, theme.color(ColorToken::Background5));
        assert_eq!(pills[1].background, theme.color(ColorToken::BrandBackground));
        assert_eq!(pills[1].unread_dot, Some(theme.color(ColorToken::BrandForeground)));
        assert_eq!(pills[2].title_color, theme.color(ColorToken::ForegroundDisabled));
    }

    #[test]
    fn test_disabled_and_missing_pills_cannot_be_selected() {
        let (_host, bar) = bar(PillButtonStyle::Primary);
        assert!(!bar.select(Some(2)));
        assert!(!bar.select(Some(7)));
        assert_eq!(bar.selected(), None);
        assert!(bar.select(None));
    }

    #[test]
    fn test_style_switch_and_override() {
        let (_host, bar) = bar(PillButtonStyle::Primary);
        bar.set_style(PillButtonStyle::OnBrand);
        assert_eq!(
            bar.appearance()[0].title_color,
            Theme::default().color(ColorToken::ForegroundOnColor)
        );

        bar.tokens().set(PillButtonToken::TitleColor, Color::BLACK);
        dispatch::run_until_idle();
        assert_eq!(bar.appearance()[0].title_color, DynamicColor::new(Color::BLACK));
    }
}
