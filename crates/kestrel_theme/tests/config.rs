use kestrel_core::{Color, ColorScheme};
use kestrel_theme::{
    ColorToken, ConfigError, ControlTokenSet, ControlTokenValue, FontWeight, Theme,
    ThemeBuilder, ThemeConfig,
};

kestrel_theme::token_set_keys! {
    pub enum ChipTokens {
        CornerRadius: Float => "corner_radius",
        LabelColor: DynamicColor => "label_color",
        LabelFont: FontInfo => "label_font",
    }
}

fn chip_defaults(key: ChipTokens, theme: &Theme) -> ControlTokenValue {
    match key {
        ChipTokens::CornerRadius => 8.0_f32.into(),
        ChipTokens::LabelColor => theme.color(ColorToken::Foreground1).into(),
        ChipTokens::LabelFont => theme.font(kestrel_theme::TypographyToken::Caption1).into(),
    }
}

const CONTOSO: &str = r##"
name = "contoso"

[colors]
brand_background = { light = "#0F6CBD", dark = "#479EF5" }
foreground1 = "#202020"

[controls.chip]
corner_radius = 16.0
label_font = { name = "Segoe UI", size = 13.0, weight = "medium" }
"##;

#[test]
fn config_builds_a_named_theme_with_alias_colors() {
    let config = ThemeConfig::from_toml_str(CONTOSO).unwrap();
    let theme = ThemeBuilder::new("base").with_config(&config).unwrap().build();

    assert_eq!(theme.name(), "contoso");
    let brand = theme.color(ColorToken::BrandBackground);
    assert_eq!(brand.resolve(ColorScheme::Light), Color::from_hex(0x0F6CBD));
    assert_eq!(brand.resolve(ColorScheme::Dark), Color::from_hex(0x479EF5));
}

#[test]
fn configured_control_tokens_sit_in_the_theme_layer() {
    let config = ThemeConfig::from_toml_str(CONTOSO).unwrap();
    let theme = ThemeBuilder::new("base")
        .with_config(&config)
        .and_then(|builder| builder.with_config_tokens::<ChipTokens>(&config, "chip"))
        .unwrap()
        .build();

    let chip = ControlTokenSet::with_theme(theme, chip_defaults);
    assert_eq!(chip.get(ChipTokens::CornerRadius).as_float(), 16.0);

    let font = chip.get(ChipTokens::LabelFont).as_font_info();
    assert_eq!(font.name.as_deref(), Some("Segoe UI"));
    assert_eq!(font.weight, FontWeight::Medium);

    // Not configured for the chip: default reads the configured alias color
    let label = chip.get(ChipTokens::LabelColor).as_dynamic_color();
    assert_eq!(label.resolve(ColorScheme::Light), Color::from_hex(0x202020));

    chip.set(ChipTokens::CornerRadius, 4.0_f32);
    assert_eq!(chip.get(ChipTokens::CornerRadius).as_float(), 4.0);
}

#[test]
fn wrong_token_names_are_reported() {
    let config = ThemeConfig::from_toml_str("[controls.chip]\nradius = 3.0\n").unwrap();
    let err = ThemeBuilder::new("broken")
        .with_config_tokens::<ChipTokens>(&config, "chip")
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "unknown token \"radius\" for control \"chip\"");
}

#[test]
fn values_of_the_wrong_shape_never_reach_the_theme() {
    let config = ThemeConfig::from_toml_str("[controls.chip]\nlabel_font = \"#FFFFFF\"\n").unwrap();
    let err = ThemeBuilder::new("broken")
        .with_config_tokens::<ChipTokens>(&config, "chip")
        .err()
        .unwrap();
    assert_eq!(
        err.to_string(),
        "token \"label_font\" for control \"chip\" takes a font info, found a dynamic color"
    );
}

#[test]
fn unknown_top_level_keys_fail_to_parse() {
    let err = ThemeConfig::from_toml_str("title = \"contoso\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn config_loads_from_disk() {
    let path = std::env::temp_dir().join(format!("kestrel-theme-{}.toml", std::process::id()));
    std::fs::write(&path, CONTOSO).unwrap();
    let config = ThemeConfig::load(&path);
    std::fs::remove_file(&path).unwrap();

    let config = config.unwrap();
    assert_eq!(config.name.as_deref(), Some("contoso"));
    assert_eq!(config.control_names().collect::<Vec<_>>(), vec!["chip"]);
}
