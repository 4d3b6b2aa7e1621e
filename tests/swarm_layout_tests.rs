use scatter_rs::core::{
    LayoutMode, LinearScale, Margins, PlotPoint, SwarmTuning, Viewport, build_layout,
};

fn band_point(id: u64, x: f64, category: &str) -> PlotPoint {
    PlotPoint::new(id, x, format!("dot-{id}")).with_text_field("industry", category)
}

fn viewport() -> Viewport {
    Viewport::new(1050, 600)
}

fn build(points: &[PlotPoint], tuning: SwarmTuning) -> scatter_rs::core::Layout {
    build_layout(
        points,
        LayoutMode::Swarm,
        viewport(),
        Margins::default(),
        "industry",
        tuning,
    )
    .expect("swarm layout")
}

fn min_pair_distance(coords: &[(f64, f64)]) -> f64 {
    let mut best = f64::INFINITY;
    for i in 0..coords.len() {
        for j in (i + 1)..coords.len() {
            let dx = coords[j].0 - coords[i].0;
            let dy = coords[j].1 - coords[i].1;
            best = best.min((dx * dx + dy * dy).sqrt());
        }
    }
    best
}

#[test]
fn band_members_respect_minimum_separation() {
    let tuning = SwarmTuning::default();
    let points: Vec<PlotPoint> = (0..40)
        .map(|i| band_point(i, (i % 8) as f64, "tech"))
        .collect();

    let layout = build(&points, tuning);
    let coords: Vec<(f64, f64)> = layout.points.iter().map(|p| (p.plot_x, p.plot_y)).collect();

    assert!(min_pair_distance(&coords) >= tuning.min_separation - 1e-6);
}

#[test]
fn coincident_points_still_separate() {
    let tuning = SwarmTuning::default();
    let points: Vec<PlotPoint> = (0..12).map(|i| band_point(i, 1.0, "tech")).collect();
    // A second value so the continuous extent is non-degenerate.
    let mut points = points;
    points.push(band_point(99, 2.0, "tech"));

    let layout = build(&points, tuning);
    let coords: Vec<(f64, f64)> = layout.points.iter().map(|p| (p.plot_x, p.plot_y)).collect();

    assert!(min_pair_distance(&coords) >= tuning.min_separation - 1e-6);
}

#[test]
fn simulated_x_stays_near_continuous_projection() {
    let tuning = SwarmTuning::default();
    let points: Vec<PlotPoint> = (0..30)
        .map(|i| band_point(i, i as f64, "tech"))
        .collect();

    let layout = build(&points, tuning);

    let width = Margins::default().inner_width(viewport());
    let projection = LinearScale::new((0.0, 29.0), (0.0, width)).expect("projection");
    for placed in &layout.points {
        let target = projection.scale(placed.index as f64);
        assert!(
            (placed.plot_x - target).abs() <= 2.0 * tuning.min_separation,
            "point {} drifted: {} vs {target}",
            placed.id,
            placed.plot_x
        );
    }
}

#[test]
fn bands_keep_categories_vertically_disjoint() {
    let tuning = SwarmTuning::default();
    let mut points = Vec::new();
    for i in 0..15 {
        points.push(band_point(i, i as f64, "tech"));
    }
    for i in 15..30 {
        points.push(band_point(i, (i - 15) as f64, "bio"));
    }

    let layout = build(&points, tuning);
    let height = Margins::default().inner_height(viewport());

    let tech_max = layout
        .points
        .iter()
        .take(15)
        .map(|p| p.plot_y)
        .fold(f64::NEG_INFINITY, f64::max);
    let bio_min = layout
        .points
        .iter()
        .skip(15)
        .map(|p| p.plot_y)
        .fold(f64::INFINITY, f64::min);

    // First-appearance order puts tech in the upper band.
    assert!(tech_max < bio_min);
    for placed in &layout.points {
        assert!(placed.plot_y >= 0.0 && placed.plot_y <= height);
    }
}

#[test]
fn rebuilds_are_deterministic() {
    let tuning = SwarmTuning::default();
    let points: Vec<PlotPoint> = (0..25)
        .map(|i| band_point(i, (i % 5) as f64, if i % 2 == 0 { "tech" } else { "bio" }))
        .collect();

    let first = build(&points, tuning);
    let second = build(&points, tuning);
    assert_eq!(first.points, second.points);
}

#[test]
fn marker_radius_drives_default_separation() {
    let tuning = SwarmTuning::for_marker_radius(4.0);
    assert!((tuning.min_separation - 6.0).abs() <= 1e-12);
}
