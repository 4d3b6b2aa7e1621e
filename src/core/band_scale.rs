use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Categorical axis assigning each category an equal-height band.
///
/// Categories keep first-appearance order. Inner and outer padding are
/// expressed as fractions of the band step; lookup of a category outside
/// the domain returns `None` so callers decide how to normalize it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: Vec<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    pub fn new(
        categories: impl IntoIterator<Item = String>,
        range: (f64, f64),
        padding: f64,
    ) -> PlotResult<Self> {
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(PlotError::InvalidData(
                "band range must be finite".to_owned(),
            ));
        }
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(PlotError::InvalidData(
                "band padding must be finite and in [0, 1)".to_owned(),
            ));
        }

        let mut domain = Vec::new();
        for category in categories {
            if !domain.contains(&category) {
                domain.push(category);
            }
        }
        if domain.is_empty() {
            return Err(PlotError::InvalidData(
                "band scale cannot be built from an empty category set".to_owned(),
            ));
        }

        Ok(Self {
            domain,
            range_start: range.0,
            range_end: range.1,
            padding_inner: padding,
            padding_outer: padding,
        })
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Distance between the starts of two adjacent bands.
    #[must_use]
    pub fn step(&self) -> f64 {
        let count = self.domain.len() as f64;
        let span = self.range_end - self.range_start;
        span / (count - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    /// Height of one band once inner padding is removed.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start coordinate of the band for `category`, if it is in the domain.
    #[must_use]
    pub fn position(&self, category: &str) -> Option<f64> {
        let index = self.domain.iter().position(|c| c == category)?;
        let step = self.step();
        let count = self.domain.len() as f64;
        let span = self.range_end - self.range_start;
        let start =
            self.range_start + (span - step * (count - self.padding_inner)) * 0.5;
        Some(start + step * index as f64)
    }

    /// Vertical center of the band for `category`, if it is in the domain.
    #[must_use]
    pub fn center(&self, category: &str) -> Option<f64> {
        self.position(category)
            .map(|start| start + self.bandwidth() * 0.5)
    }
}
