use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::PlotPoint;
use crate::error::PlotResult;
use crate::render::Color;

/// Fixed fallback fill for unrecognized color keys and missing attributes.
pub const FALLBACK_COLOR: &str = "#9467bd";

/// Neutral fill painted over non-members while a multi-point focus is active.
pub const DIM_COLOR: &str = "#ccc";

/// Deterministic 10-color categorical cycle for unseen palette categories.
pub const CATEGORY_CYCLE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// How a point's fill is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorKey {
    /// Use the point's own color attribute directly.
    #[default]
    Passthrough,
    /// Categorical palette lookup by the point's `industry` field.
    Industry,
    /// Categorical palette lookup by the point's `source` field.
    Source,
    /// Always the fixed fallback color.
    Fixed,
}

impl ColorKey {
    /// Maps a configured key name onto the closed set; anything outside the
    /// recognized names resolves to the fixed fallback.
    #[must_use]
    pub fn from_field_name(name: &str) -> Self {
        match name {
            "mean_color" => ColorKey::Passthrough,
            "industry" => ColorKey::Industry,
            "source" => ColorKey::Source,
            _ => ColorKey::Fixed,
        }
    }

    #[must_use]
    pub fn palette_field(self) -> Option<&'static str> {
        match self {
            ColorKey::Industry => Some("industry"),
            ColorKey::Source => Some("source"),
            ColorKey::Passthrough | ColorKey::Fixed => None,
        }
    }
}

/// Category-to-color assignment with first-come cycling for new categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OrdinalPalette {
    assignments: IndexMap<String, String>,
    cycle_next: usize,
}

impl OrdinalPalette {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Palette seeded with explicit category colors; unseen categories
    /// still draw from the cycle.
    #[must_use]
    pub fn with_presets(presets: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            assignments: presets.into_iter().collect(),
            cycle_next: 0,
        }
    }

    /// Resolves a category to its color, assigning the next cycle color on
    /// first sight.
    pub fn color_for(&mut self, category: &str) -> &str {
        if !self.assignments.contains_key(category) {
            let assigned = CATEGORY_CYCLE[self.cycle_next % CATEGORY_CYCLE.len()].to_owned();
            self.cycle_next += 1;
            self.assignments.insert(category.to_owned(), assigned);
        }
        self.assignments
            .get(category)
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }
}

/// Resolves one point's fill through the configured policy.
pub fn resolve_point_color(
    point: &PlotPoint,
    key: ColorKey,
    palette: &mut OrdinalPalette,
) -> PlotResult<Color> {
    let hex = match key {
        ColorKey::Passthrough => point.color.as_deref().unwrap_or(FALLBACK_COLOR).to_owned(),
        ColorKey::Industry | ColorKey::Source => {
            let field = key.palette_field().unwrap_or_default();
            match point.text_field(field) {
                Some(category) => palette.color_for(category).to_owned(),
                None => FALLBACK_COLOR.to_owned(),
            }
        }
        ColorKey::Fixed => FALLBACK_COLOR.to_owned(),
    };
    Color::parse_hex(&hex)
}
