use scatter_rs::core::PlotPoint;
use scatter_rs::render::{
    CATEGORY_CYCLE, Color, ColorKey, FALLBACK_COLOR, OrdinalPalette, resolve_point_color,
};

fn tech_point() -> PlotPoint {
    PlotPoint::new(1, 0.0, "acme")
        .with_color("#336699")
        .with_text_field("industry", "tech")
        .with_text_field("source", "forbes")
}

#[test]
fn palette_lookup_resolves_the_configured_color() {
    let mut palette =
        OrdinalPalette::with_presets([("tech".to_owned(), "#1f77b4".to_owned())]);

    let resolved = resolve_point_color(&tech_point(), ColorKey::Industry, &mut palette)
        .expect("resolve");
    assert_eq!(resolved, Color::parse_hex("#1f77b4").expect("hex"));
}

#[test]
fn unrecognized_key_resolves_to_the_fixed_fallback() {
    assert_eq!(ColorKey::from_field_name("cluster"), ColorKey::Fixed);

    let mut palette = OrdinalPalette::new();
    let resolved = resolve_point_color(&tech_point(), ColorKey::Fixed, &mut palette)
        .expect("resolve");
    assert_eq!(resolved, Color::parse_hex(FALLBACK_COLOR).expect("hex"));
}

#[test]
fn passthrough_uses_the_point_color_directly() {
    let mut palette = OrdinalPalette::new();
    let resolved = resolve_point_color(&tech_point(), ColorKey::Passthrough, &mut palette)
        .expect("resolve");
    assert_eq!(resolved, Color::parse_hex("#336699").expect("hex"));
}

#[test]
fn passthrough_without_a_color_falls_back() {
    let bare = PlotPoint::new(2, 0.0, "bare");
    let mut palette = OrdinalPalette::new();
    let resolved =
        resolve_point_color(&bare, ColorKey::Passthrough, &mut palette).expect("resolve");
    assert_eq!(resolved, Color::parse_hex(FALLBACK_COLOR).expect("hex"));
}

#[test]
fn missing_palette_field_falls_back() {
    let bare = PlotPoint::new(3, 0.0, "bare");
    let mut palette = OrdinalPalette::new();
    let resolved =
        resolve_point_color(&bare, ColorKey::Industry, &mut palette).expect("resolve");
    assert_eq!(resolved, Color::parse_hex(FALLBACK_COLOR).expect("hex"));
}

#[test]
fn source_palette_assigns_cycle_colors_to_unseen_categories() {
    let mut palette = OrdinalPalette::new();
    let resolved = resolve_point_color(&tech_point(), ColorKey::Source, &mut palette)
        .expect("resolve");
    assert_eq!(resolved, Color::parse_hex(CATEGORY_CYCLE[0]).expect("hex"));

    // Same category keeps its assignment on later resolutions.
    let again = resolve_point_color(&tech_point(), ColorKey::Source, &mut palette)
        .expect("resolve");
    assert_eq!(again, resolved);
}
