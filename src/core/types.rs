use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Outer margins around the plotting area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 70.0,
            bottom: 10.0,
            left: 70.0,
        }
    }
}

impl Margins {
    pub fn validate(self) -> PlotResult<Self> {
        for (name, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlotError::InvalidData(format!(
                    "margin `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    /// Inner plotting width once margins are subtracted.
    #[must_use]
    pub fn inner_width(self, viewport: Viewport) -> f64 {
        f64::from(viewport.width) - self.left - self.right
    }

    /// Inner plotting height once margins are subtracted.
    #[must_use]
    pub fn inner_height(self, viewport: Viewport) -> f64 {
        f64::from(viewport.height) - self.top - self.bottom
    }
}

/// Layout projection selected for a draw pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutMode {
    /// Continuous x/y scatter.
    #[default]
    Scatter,
    /// Continuous x, categorical y with de-overlap relaxation.
    Swarm,
}

/// Visual marker shape drawn per point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MarkerKind {
    #[default]
    Circle,
    Icon,
}

/// One attribute value carried by a data record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Number(_) => None,
            FieldValue::Text(value) => Some(value.as_str()),
        }
    }
}

/// One host-supplied data record.
///
/// The engine reads records and never mutates them; derived plot coordinates
/// live on [`PlacedPoint`] so repeated layout builds stay side-effect free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub id: u64,
    pub x: f64,
    pub name: String,
    /// Passthrough color, used when the color key selects it directly.
    #[serde(default)]
    pub color: Option<String>,
    /// Host-side image key for icon markers, consulted after the resolver.
    #[serde(default)]
    pub image_ref: Option<String>,
    /// Named attributes: y-field candidates and palette lookup fields.
    #[serde(default)]
    pub fields: IndexMap<String, FieldValue>,
}

impl PlotPoint {
    #[must_use]
    pub fn new(id: u64, x: f64, name: impl Into<String>) -> Self {
        Self {
            id,
            x,
            name: name.into(),
            color: None,
            image_ref: None,
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    #[must_use]
    pub fn with_number_field(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), FieldValue::Number(value));
        self
    }

    #[must_use]
    pub fn with_text_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .insert(name.into(), FieldValue::Text(value.into()));
        self
    }

    #[must_use]
    pub fn number_field(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(FieldValue::as_number)
    }

    #[must_use]
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::as_text)
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.x.is_finite() {
            return Err(PlotError::InvalidData(format!(
                "point {} has non-finite x",
                self.id
            )));
        }
        for (name, value) in &self.fields {
            if let FieldValue::Number(number) = value {
                if !number.is_finite() {
                    return Err(PlotError::InvalidData(format!(
                        "point {} field `{name}` must be finite",
                        self.id
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Derived plot coordinates for one data record.
///
/// In scatter mode these are data-space values mapped through the frame
/// scales at draw time; in swarm mode they are already pixel positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedPoint {
    pub id: u64,
    /// Index into the host data slice this placement was built from.
    pub index: usize,
    pub plot_x: f64,
    pub plot_y: f64,
}
