use serde::{Deserialize, Serialize};

use crate::core::{LayoutMode, Margins, MarkerKind, SwarmTuning, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::render::{Color, ColorKey};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load plot
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f64,
    #[serde(default)]
    pub color_key: ColorKey,
    /// Explicit category colors consulted before the deterministic cycle.
    #[serde(default)]
    pub palette_presets: Vec<(String, String)>,
    #[serde(default)]
    pub marker_kind: MarkerKind,
    #[serde(default = "default_y_field")]
    pub y_field: String,
    #[serde(default)]
    pub mode: LayoutMode,
    /// Swarm relaxation override; derived from the marker radius when unset.
    #[serde(default)]
    pub swarm_tuning: Option<SwarmTuning>,
}

impl Default for ScatterEngineConfig {
    fn default() -> Self {
        Self::new(Viewport::new(1050, 600))
    }
}

impl ScatterEngineConfig {
    /// Creates a config with the stock layout parameters.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margins: Margins::default(),
            background: default_background(),
            marker_radius: default_marker_radius(),
            color_key: ColorKey::default(),
            palette_presets: Vec::new(),
            marker_kind: MarkerKind::default(),
            y_field: default_y_field(),
            mode: LayoutMode::default(),
            swarm_tuning: None,
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    #[must_use]
    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }

    #[must_use]
    pub fn with_color_key(mut self, key: ColorKey) -> Self {
        self.color_key = key;
        self
    }

    #[must_use]
    pub fn with_palette_preset(
        mut self,
        category: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        self.palette_presets.push((category.into(), color.into()));
        self
    }

    #[must_use]
    pub fn with_marker_kind(mut self, kind: MarkerKind) -> Self {
        self.marker_kind = kind;
        self
    }

    #[must_use]
    pub fn with_y_field(mut self, y_field: impl Into<String>) -> Self {
        self.y_field = y_field.into();
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_swarm_tuning(mut self, tuning: SwarmTuning) -> Self {
        self.swarm_tuning = Some(tuning);
        self
    }

    /// The relaxation tuning in effect for swarm builds.
    #[must_use]
    pub fn resolved_swarm_tuning(&self) -> SwarmTuning {
        self.swarm_tuning
            .unwrap_or_else(|| SwarmTuning::for_marker_radius(self.marker_radius))
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.margins.validate()?;
        if !self.marker_radius.is_finite() || self.marker_radius <= 0.0 {
            return Err(PlotError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        if self.y_field.is_empty() {
            return Err(PlotError::InvalidData(
                "y field name must not be empty".to_owned(),
            ));
        }
        Color::parse_hex(&self.background)?;
        for (_, color) in &self.palette_presets {
            Color::parse_hex(color)?;
        }
        if let Some(tuning) = self.swarm_tuning {
            tuning.validate()?;
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_background() -> String {
    "#fff".to_owned()
}

fn default_marker_radius() -> f64 {
    4.0
}

fn default_y_field() -> String {
    "y".to_owned()
}
