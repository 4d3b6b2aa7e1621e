use scatter_rs::core::{
    LayoutMode, Margins, MarkerKind, PlotPoint, SwarmTuning, Viewport, build_layout,
};
use scatter_rs::interaction::ViewTransform;
use scatter_rs::render::{
    Color, ColorKey, FOCUS_RADIUS_FACTOR, LABEL_EDGE_MIN, OrdinalPalette, RenderBinding,
};

fn point(id: u64, x: f64, y: f64) -> PlotPoint {
    PlotPoint::new(id, x, format!("dot-{id}"))
        .with_color("#1f77b4")
        .with_number_field("pc2", y)
}

fn bound_binding() -> (RenderBinding, scatter_rs::core::Layout) {
    let points = vec![
        point(1, -2.0, -1.0),
        point(2, 0.5, 4.0),
        point(3, 3.0, 2.5),
    ];
    let viewport = Viewport::new(1050, 600);
    let margins = Margins::default();
    let layout = build_layout(
        &points,
        LayoutMode::Scatter,
        viewport,
        margins,
        "pc2",
        SwarmTuning::default(),
    )
    .expect("layout");

    let mut binding = RenderBinding::new(
        4.0,
        MarkerKind::Circle,
        ColorKey::Passthrough,
        OrdinalPalette::new(),
    )
    .expect("binding");
    binding
        .bind(
            &points,
            &layout,
            viewport,
            margins.inner_width(viewport),
            margins.inner_height(viewport),
            |_| None,
        )
        .expect("bind");
    (binding, layout)
}

#[test]
fn focus_enlarges_raises_and_labels_the_marker() {
    let (mut binding, _) = bound_binding();

    assert!(binding.focus_one(2, true));

    let marker = binding.marker_of(2).expect("marker");
    assert!((marker.radius - 4.0 * FOCUS_RADIUS_FACTOR).abs() <= 1e-12);
    assert!(marker.focused);

    let top_index = *binding.draw_order().last().expect("draw order");
    assert_eq!(binding.markers()[top_index].id, 2);

    let label = binding.labels().get(&2).expect("label");
    assert_eq!(label.text, "dot-2");
    assert!((label.x - (marker.x - 30.0).max(LABEL_EDGE_MIN)).abs() <= 1e-12);
    assert!((label.y - (marker.y - 15.0).max(LABEL_EDGE_MIN)).abs() <= 1e-12);
}

#[test]
fn labels_clamp_to_the_frame_edges() {
    let (mut binding, _) = bound_binding();
    // Point 1 sits at the left edge of the domain; its label would land
    // outside the frame without the clamp.
    let marker = binding.marker_of(1).expect("marker");
    assert!(marker.x < 30.0 + LABEL_EDGE_MIN);

    binding.focus_one(1, true);
    let label = binding.labels().get(&1).expect("label");
    assert!(label.x >= LABEL_EDGE_MIN);
    assert!(label.y >= LABEL_EDGE_MIN);
}

#[test]
fn focus_is_idempotent_and_unfocus_restores() {
    let (mut binding, _) = bound_binding();

    assert!(binding.focus_one(2, true));
    assert!(!binding.focus_one(2, true));
    assert_eq!(binding.labels().len(), 1);

    assert!(binding.unfocus());
    assert!(!binding.unfocus());

    let marker = binding.marker_of(2).expect("marker");
    assert!((marker.radius - 4.0).abs() <= 1e-12);
    assert!(!marker.focused);
    assert!(binding.labels().is_empty());
}

#[test]
fn label_registry_is_keyed_by_identity() {
    let (mut binding, _) = bound_binding();

    binding.focus_one(2, true);
    binding.focus_one(3, true);
    assert_eq!(binding.labels().len(), 2);

    // Re-focusing reuses the existing handle instead of matching text.
    binding.focus_one(2, true);
    assert_eq!(binding.labels().len(), 2);
}

#[test]
fn hover_focus_attaches_no_label() {
    let (mut binding, _) = bound_binding();

    assert!(binding.focus_one(2, false));
    assert!(binding.labels().is_empty());
    let marker = binding.marker_of(2).expect("marker");
    assert!((marker.radius - 8.0).abs() <= 1e-12);
}

#[test]
fn focus_set_dims_non_members_without_touching_their_binding() {
    let (mut binding, _) = bound_binding();

    assert!(binding.focus_set(&[1, 3]));

    let member = binding.marker_of(1).expect("member");
    assert_eq!(member.color, member.base_color);
    assert!(member.in_focus_set);

    let outsider = binding.marker_of(2).expect("outsider");
    assert_ne!(outsider.color, outsider.base_color);
    assert_eq!(outsider.base_color, Color::parse_hex("#1f77b4").expect("hex"));

    // Members draw above non-members.
    let order_ids: Vec<u64> = binding
        .draw_order()
        .iter()
        .map(|&i| binding.markers()[i].id)
        .collect();
    assert_eq!(order_ids, [2, 1, 3]);

    assert!(binding.unfocus_set());
    let restored = binding.marker_of(2).expect("outsider");
    assert_eq!(restored.color, restored.base_color);
}

#[test]
fn focus_set_is_idempotent() {
    let (mut binding, _) = bound_binding();

    assert!(binding.focus_set(&[1, 3]));
    assert!(!binding.focus_set(&[1, 3]));
    assert!(binding.unfocus_set());
    assert!(!binding.unfocus_set());
}

#[test]
fn zoom_reposition_preserves_color_size_and_focus() {
    let (mut binding, layout) = bound_binding();

    binding.focus_one(2, true);
    binding.focus_set(&[1, 3]);

    let before: Vec<_> = binding
        .markers()
        .iter()
        .map(|m| (m.id, m.radius, m.color, m.focused, m.in_focus_set))
        .collect();
    let positions_before: Vec<_> = binding.markers().iter().map(|m| (m.x, m.y)).collect();

    let transform = ViewTransform::new(40.0, -25.0, 1.6).expect("transform");
    let mut frame = layout.frame;
    let live_x = transform.rescale_x(frame.initial_x()).expect("live x");
    let live_y = transform.rescale_y(frame.initial_y()).expect("live y");
    frame.set_live(live_x, live_y);

    binding.reposition_through(&layout.points, frame);

    let after: Vec<_> = binding
        .markers()
        .iter()
        .map(|m| (m.id, m.radius, m.color, m.focused, m.in_focus_set))
        .collect();
    assert_eq!(before, after);

    let positions_after: Vec<_> = binding.markers().iter().map(|m| (m.x, m.y)).collect();
    assert_ne!(positions_before, positions_after);
}

#[test]
fn icon_markers_emit_images_with_circle_fallback() {
    let points = vec![point(1, -2.0, -1.0), point(2, 0.5, 4.0)];
    let viewport = Viewport::new(1050, 600);
    let margins = Margins::default();
    let layout = build_layout(
        &points,
        LayoutMode::Scatter,
        viewport,
        margins,
        "pc2",
        SwarmTuning::default(),
    )
    .expect("layout");

    let mut binding = RenderBinding::new(
        4.0,
        MarkerKind::Icon,
        ColorKey::Passthrough,
        OrdinalPalette::new(),
    )
    .expect("binding");
    binding
        .bind(
            &points,
            &layout,
            viewport,
            margins.inner_width(viewport),
            margins.inner_height(viewport),
            |point| (point.id == 1).then(|| format!("https://img.example/{}.png", point.id)),
        )
        .expect("bind");

    let scene = binding.scene("#fff").expect("scene");
    assert_eq!(scene.images.len(), 1);
    assert_eq!(scene.circles.len(), 1);
    assert_eq!(scene.images[0].size, 20.0);
}
