use approx::assert_relative_eq;
use scatter_rs::core::{
    DOMAIN_PAD_FACTOR, FrameMode, LayoutMode, Margins, PlotPoint, SwarmTuning, Viewport,
    build_layout,
};

fn scatter_point(id: u64, x: f64, y: f64) -> PlotPoint {
    PlotPoint::new(id, x, format!("dot-{id}")).with_number_field("pc2", y)
}

fn scatter_points() -> Vec<PlotPoint> {
    vec![
        scatter_point(1, -2.0, -1.0),
        scatter_point(2, 0.5, 4.0),
        scatter_point(3, 3.0, 2.5),
    ]
}

fn viewport() -> Viewport {
    Viewport::new(1050, 600)
}

#[test]
fn scatter_domain_bounds_are_padded_sign_preserving() {
    let layout = build_layout(
        &scatter_points(),
        LayoutMode::Scatter,
        viewport(),
        Margins::default(),
        "pc2",
        SwarmTuning::default(),
    )
    .expect("layout");

    let (x_start, x_end) = layout.frame.x().domain();
    assert_relative_eq!(x_start, -2.0 * DOMAIN_PAD_FACTOR, max_relative = 1e-12);
    assert_relative_eq!(x_end, 3.0 * DOMAIN_PAD_FACTOR, max_relative = 1e-12);

    let (y_start, y_end) = layout.frame.y().domain();
    assert_relative_eq!(y_start, -1.0 * DOMAIN_PAD_FACTOR, max_relative = 1e-12);
    assert_relative_eq!(y_end, 4.0 * DOMAIN_PAD_FACTOR, max_relative = 1e-12);
}

#[test]
fn scatter_pixels_stay_inside_the_plot_area() {
    let layout = build_layout(
        &scatter_points(),
        LayoutMode::Scatter,
        viewport(),
        Margins::default(),
        "pc2",
        SwarmTuning::default(),
    )
    .expect("layout");

    let width = Margins::default().inner_width(viewport());
    let height = Margins::default().inner_height(viewport());
    for placed in &layout.points {
        let px = layout.frame.x().scale(placed.plot_x);
        let py = layout.frame.y().scale(placed.plot_y);
        assert!(px >= -1e-9 && px <= width + 1e-9);
        assert!(py >= -1e-9 && py <= height + 1e-9);
    }
}

#[test]
fn scatter_ranges_subtract_margins() {
    let layout = build_layout(
        &scatter_points(),
        LayoutMode::Scatter,
        viewport(),
        Margins::default(),
        "pc2",
        SwarmTuning::default(),
    )
    .expect("layout");

    assert_eq!(layout.frame.x().range(), (0.0, 910.0));
    assert_eq!(layout.frame.y().range(), (580.0, 0.0));
    assert_eq!(layout.frame.mode(), FrameMode::DomainMapped);
}

#[test]
fn scatter_y_axis_plots_larger_values_higher() {
    let layout = build_layout(
        &scatter_points(),
        LayoutMode::Scatter,
        viewport(),
        Margins::default(),
        "pc2",
        SwarmTuning::default(),
    )
    .expect("layout");

    let low = layout.frame.y().scale(-1.0);
    let high = layout.frame.y().scale(4.0);
    assert!(high < low);
}

#[test]
fn empty_input_is_rejected_before_scale_math() {
    let result = build_layout(
        &[],
        LayoutMode::Scatter,
        viewport(),
        Margins::default(),
        "pc2",
        SwarmTuning::default(),
    );
    assert!(result.is_err());
}

#[test]
fn missing_y_field_is_rejected() {
    let points = vec![PlotPoint::new(1, 0.0, "bare")];
    let result = build_layout(
        &points,
        LayoutMode::Scatter,
        viewport(),
        Margins::default(),
        "pc2",
        SwarmTuning::default(),
    );
    assert!(result.is_err());
}

#[test]
fn degenerate_viewport_is_rejected() {
    let result = build_layout(
        &scatter_points(),
        LayoutMode::Scatter,
        Viewport::new(0, 600),
        Margins::default(),
        "pc2",
        SwarmTuning::default(),
    );
    assert!(result.is_err());
}

#[test]
fn swarm_frame_exposes_identity_scales() {
    let points = vec![
        PlotPoint::new(1, -1.0, "a").with_text_field("industry", "tech"),
        PlotPoint::new(2, 0.0, "b").with_text_field("industry", "bio"),
        PlotPoint::new(3, 2.0, "c").with_text_field("industry", "tech"),
    ];
    let layout = build_layout(
        &points,
        LayoutMode::Swarm,
        viewport(),
        Margins::default(),
        "industry",
        SwarmTuning::default(),
    )
    .expect("layout");

    assert_eq!(layout.frame.mode(), FrameMode::PixelIdentity);
    assert_relative_eq!(layout.frame.x().scale(123.0), 123.0, max_relative = 1e-12);
    assert_relative_eq!(layout.frame.y().scale(321.0), 321.0, max_relative = 1e-12);
    assert_eq!(layout.frame.x().domain(), layout.frame.x().range());
}

#[test]
fn point_without_category_normalizes_to_zero() {
    let points = vec![
        PlotPoint::new(1, -1.0, "a").with_text_field("industry", "tech"),
        PlotPoint::new(2, 0.5, "b"),
        PlotPoint::new(3, 2.0, "c").with_text_field("industry", "tech"),
    ];
    let layout = build_layout(
        &points,
        LayoutMode::Swarm,
        viewport(),
        Margins::default(),
        "industry",
        SwarmTuning::default(),
    )
    .expect("layout");

    let orphan = layout.points.iter().find(|p| p.id == 2).expect("orphan");
    assert_eq!(orphan.plot_y, 0.0);
    // x still projects through the continuous scale: extent [-1, 2] over 910px.
    assert_relative_eq!(orphan.plot_x, 910.0 * 0.5, max_relative = 1e-9);
}
