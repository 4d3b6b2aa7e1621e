use tracing::{debug, warn};

#[cfg(feature = "parallel-layout")]
use rayon::prelude::*;

use crate::core::swarm::{SwarmBody, SwarmTuning, relax_band};
use crate::core::{
    BandScale, CoordinateFrame, FrameMode, LayoutMode, LinearScale, Margins, PlacedPoint,
    PlotPoint, Viewport,
};
use crate::error::{PlotError, PlotResult};

/// Sign-preserving multiplicative pad applied to scatter domain bounds.
///
/// Padding is asymmetric whenever a bound is negative; kept as-is.
pub const DOMAIN_PAD_FACTOR: f64 = 1.05;

/// Inner and outer band padding for the categorical swarm axis.
pub const BAND_PADDING: f64 = 0.1;

/// One layout build: the frame plus derived coordinates per point.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub frame: CoordinateFrame,
    pub points: Vec<PlacedPoint>,
}

/// Builds scales and derived coordinates for a draw pass.
///
/// Empty input is a precondition violation surfaced as `InvalidData`;
/// callers re-invoke with corrected input rather than retrying.
pub fn build_layout(
    points: &[PlotPoint],
    mode: LayoutMode,
    viewport: Viewport,
    margins: Margins,
    y_field: &str,
    swarm_tuning: SwarmTuning,
) -> PlotResult<Layout> {
    if !viewport.is_valid() {
        return Err(PlotError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let margins = margins.validate()?;
    let width = margins.inner_width(viewport);
    let height = margins.inner_height(viewport);
    if width <= 0.0 || height <= 0.0 {
        return Err(PlotError::InvalidData(
            "margins leave no plotting area".to_owned(),
        ));
    }
    if points.is_empty() {
        return Err(PlotError::InvalidData(
            "layout cannot be built from empty data".to_owned(),
        ));
    }
    for point in points {
        point.validate()?;
    }

    debug!(point_count = points.len(), ?mode, "build layout");

    match mode {
        LayoutMode::Scatter => build_scatter_layout(points, width, height, y_field),
        LayoutMode::Swarm => build_swarm_layout(points, width, height, y_field, swarm_tuning),
    }
}

fn build_scatter_layout(
    points: &[PlotPoint],
    width: f64,
    height: f64,
    y_field: &str,
) -> PlotResult<Layout> {
    let mut placed = Vec::with_capacity(points.len());
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for (index, point) in points.iter().enumerate() {
        let y_value = point.number_field(y_field).ok_or_else(|| {
            PlotError::InvalidData(format!(
                "point {} lacks numeric field `{y_field}`",
                point.id
            ))
        })?;
        x_min = x_min.min(point.x);
        x_max = x_max.max(point.x);
        y_min = y_min.min(y_value);
        y_max = y_max.max(y_value);
        placed.push(PlacedPoint {
            id: point.id,
            index,
            plot_x: point.x,
            plot_y: y_value,
        });
    }

    // The pad multiplies the raw bounds directly; domains stay exactly at
    // 1.05x the data extent. Axis nicing is left to tick generation.
    let x_scale = LinearScale::new(
        (x_min * DOMAIN_PAD_FACTOR, x_max * DOMAIN_PAD_FACTOR),
        (0.0, width),
    )?;
    let y_scale = LinearScale::new(
        (y_min * DOMAIN_PAD_FACTOR, y_max * DOMAIN_PAD_FACTOR),
        (height, 0.0),
    )?;

    Ok(Layout {
        frame: CoordinateFrame::new(x_scale, y_scale, FrameMode::DomainMapped),
        points: placed,
    })
}

struct BandJob {
    center: f64,
    bodies: Vec<SwarmBody>,
}

fn build_swarm_layout(
    points: &[PlotPoint],
    width: f64,
    height: f64,
    y_field: &str,
    swarm_tuning: SwarmTuning,
) -> PlotResult<Layout> {
    let tuning = swarm_tuning.validate()?;

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    for point in points {
        x_min = x_min.min(point.x);
        x_max = x_max.max(point.x);
    }
    // Swarm keeps the true extent: no pad, no nicing.
    let x_projection = LinearScale::new((x_min, x_max), (0.0, width))?;

    let categories: Vec<String> = points
        .iter()
        .filter_map(|point| point.text_field(y_field).map(str::to_owned))
        .collect();
    if categories.is_empty() {
        return Err(PlotError::InvalidData(format!(
            "no point carries a categorical field `{y_field}`"
        )));
    }
    let bands = BandScale::new(categories, (0.0, height), BAND_PADDING)?;

    let mut placed: Vec<PlacedPoint> = points
        .iter()
        .enumerate()
        .map(|(index, point)| PlacedPoint {
            id: point.id,
            index,
            plot_x: x_projection.scale(point.x),
            plot_y: 0.0,
        })
        .collect();

    let mut jobs: Vec<BandJob> = Vec::with_capacity(bands.domain().len());
    let mut unmapped = 0_usize;
    for category in bands.domain().to_vec() {
        let center = match bands.center(&category) {
            Some(center) => center,
            None => continue,
        };
        let member_indices: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, point)| point.text_field(y_field) == Some(category.as_str()))
            .map(|(index, _)| index)
            .collect();

        let count = member_indices.len();
        let bodies = member_indices
            .iter()
            .enumerate()
            .map(|(slot, &index)| {
                // Deterministic tie-break so coincident points split along y.
                let seed_y = center + (slot as f64 - (count as f64 - 1.0) * 0.5) * 1e-3;
                SwarmBody::new(index, x_projection.scale(points[index].x), seed_y)
            })
            .collect();
        jobs.push(BandJob { center, bodies });
    }

    #[cfg(feature = "parallel-layout")]
    jobs.par_iter_mut()
        .for_each(|job| relax_band(&mut job.bodies, job.center, tuning));

    #[cfg(not(feature = "parallel-layout"))]
    for job in &mut jobs {
        relax_band(&mut job.bodies, job.center, tuning);
    }

    let mut mapped = vec![false; points.len()];
    for job in &jobs {
        for body in &job.bodies {
            placed[body.index].plot_x = body.x;
            placed[body.index].plot_y = body.y;
            mapped[body.index] = true;
        }
    }
    for flag in &mapped {
        if !*flag {
            unmapped += 1;
        }
    }
    if unmapped > 0 {
        // Points without a band keep plot_y = 0 instead of an undefined
        // position; the lookup gap itself is unresolved upstream.
        warn!(unmapped, "normalized category-less points to y = 0");
    }

    let x_scale = LinearScale::identity(width)?;
    let y_scale = LinearScale::identity(height)?;
    Ok(Layout {
        frame: CoordinateFrame::new(x_scale, y_scale, FrameMode::PixelIdentity),
        points: placed,
    })
}
