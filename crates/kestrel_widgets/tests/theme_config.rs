use kestrel_core::{dispatch, Color, ColorScheme};
use kestrel_theme::{ConfigError, ThemeConfig, ThemedViewTree, TokenSetKey, TokenShape};
use kestrel_widgets::{
    theme_from_config, Button, ButtonSize, ButtonStyle, ButtonToken, Control, Tooltip,
    TooltipToken,
};
use std::rc::Rc;

const CONTOSO: &str = r##"
name = "contoso"

[colors]
brand_background = { light = "#0F6CBD", dark = "#479EF5" }

[controls.button]
corner_radius = 12.0
foreground_color = "#FFFFFF"
title_font = { size = 17.0, weight = "semibold" }

[controls.tooltip]
maximum_width = 300
"##;

#[test]
fn configured_theme_reaches_live_controls() {
    let theme = theme_from_config(&ThemeConfig::from_toml_str(CONTOSO).unwrap()).unwrap();
    assert_eq!(theme.name(), "contoso");

    let host = Rc::new(ThemedViewTree::new());
    let window = host.insert_root();
    let view = host.insert_child(window).unwrap();
    let button = Button::new(&host, view, "Send", ButtonStyle::Accent, ButtonSize::Medium).unwrap();
    assert_eq!(button.appearance().corner_radius, 8.0);

    host.set_theme(window, theme).unwrap();
    dispatch::run_until_idle();

    let appearance = button.appearance();
    assert_eq!(appearance.corner_radius, 12.0);
    assert_eq!(appearance.title_font.size, 17.0);
    assert_eq!(
        appearance.background.resolve(ColorScheme::Dark),
        Color::from_hex(0x479EF5)
    );
    assert_eq!(button.token_set().theme().name(), "contoso");
}

#[test]
fn tooltip_reads_configured_width() {
    let theme = theme_from_config(&ThemeConfig::from_toml_str(CONTOSO).unwrap()).unwrap();
    let host = Rc::new(ThemedViewTree::new());
    let window = host.insert_root();
    host.set_theme(window, theme.clone()).unwrap();

    let tooltip = Tooltip::new(theme);
    tooltip.show(&host, window, "Sent", None).unwrap();
    assert_eq!(tooltip.layout().unwrap().maximum_width, 300.0);
    assert_eq!(tooltip.tokens().get(TooltipToken::ArrowWidth).as_float(), 14.0);
}

#[test]
fn unknown_control_sections_are_rejected() {
    let config = ThemeConfig::from_toml_str("[controls.slider]\ntrack_height = 4.0\n").unwrap();
    assert!(matches!(
        theme_from_config(&config),
        Err(ConfigError::UnknownControl(name)) if name == "slider"
    ));
}

fn sample_value(shape: TokenShape) -> &'static str {
    match shape {
        TokenShape::Float => "1.0",
        TokenShape::DynamicColor => "\"#FFFFFF\"",
        TokenShape::FontInfo => "{ size = 15.0 }",
        TokenShape::ShadowInfo => concat!(
            "{ key_color = \"#00000024\", key_blur = 8.0, ",
            "ambient_color = \"#0000001F\", ambient_blur = 2.0 }"
        ),
    }
}

#[test]
fn every_button_token_is_addressable_from_config() {
    for token in ButtonToken::all() {
        let source = format!(
            "[controls.button]\n{} = {}\n",
            token.name(),
            sample_value(token.shape())
        );
        let config = ThemeConfig::from_toml_str(&source).unwrap();
        let theme = theme_from_config(&config).unwrap();
        let value = &theme.tokens::<ButtonToken>().unwrap()[token];
        assert_eq!(value.shape(), token.shape());
    }
}

#[test]
fn mismatched_token_shapes_are_rejected() {
    let config = ThemeConfig::from_toml_str("[controls.button]\nforeground_color = 3.0\n").unwrap();
    assert!(matches!(
        theme_from_config(&config),
        Err(ConfigError::WrongShape {
            control,
            token,
            expected: TokenShape::DynamicColor,
            actual: TokenShape::Float,
        }) if control == "button" && token == "foreground_color"
    ));

    let config =
        ThemeConfig::from_toml_str("[controls.button]\ncorner_radius = \"#FFFFFF\"\n").unwrap();
    assert!(matches!(
        theme_from_config(&config),
        Err(ConfigError::WrongShape {
            expected: TokenShape::Float,
            actual: TokenShape::DynamicColor,
            ..
        })
    ));
}

#[test]
fn configured_values_render_without_shape_errors() {
    let source = "[controls.button]\ncorner_radius = 6.0\nforeground_color = \"#101010\"\n";
    let theme = theme_from_config(&ThemeConfig::from_toml_str(source).unwrap()).unwrap();

    let host = Rc::new(ThemedViewTree::new());
    let window = host.insert_root();
    let button =
        Button::new(&host, window, "Retry", ButtonStyle::Subtle, ButtonSize::Small).unwrap();
    host.set_theme(window, theme).unwrap();
    dispatch::run_until_idle();

    let appearance = button.appearance();
    assert_eq!(appearance.corner_radius, 6.0);
    assert_eq!(
        appearance.foreground.resolve(ColorScheme::Light),
        Color::from_hex(0x101010)
    );
}
