pub mod squarify;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An axis-aligned rectangle. In the default layout all coordinates live in
/// the unit square with `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// The unit square `(0, 0, 1, 1)`.
    pub const UNIT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 1.0,
        h: 1.0,
    };

    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Anchor point for a centered label.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// `max(w/h, h/w)`; infinite for collapsed rectangles.
    pub fn aspect_ratio(&self) -> f64 {
        if self.w <= 0.0 || self.h <= 0.0 {
            return f64::INFINITY;
        }
        (self.w / self.h).max(self.h / self.w)
    }

    /// Area shared with `other` (zero when they only touch along an edge).
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let w = (self.x + self.w).min(other.x + other.w) - self.x.max(other.x);
        let h = (self.y + self.h).min(other.y + other.h) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::UNIT
    }
}

/// A named category weighted by a non-negative value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    pub label: CompactString,
    pub value: f64,
}

impl WeightedItem {
    pub fn new(label: impl Into<CompactString>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A laid-out item ready for drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub label: CompactString,
    /// The original (un-normalized) value
    pub value: f64,
    /// `value / total`
    pub share: f64,
    pub rect: Rect,
}

/// Configuration for treemap layout.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Target rectangle the tiles fill
    pub bounds: Rect,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { bounds: Rect::UNIT }
    }
}

/// Lay out normalized weights (sorted descending, summing to 1) in the unit square.
///
/// Returns one rectangle per weight, in input order. An empty input yields an
/// empty layout.
pub fn layout_treemap(weights: &[f64]) -> Result<Vec<Rect>> {
    layout_treemap_in(weights, Rect::UNIT)
}

/// Lay out normalized weights in `bounds`; each rectangle's area is
/// `weight * bounds.area()`.
pub fn layout_treemap_in(weights: &[f64], bounds: Rect) -> Result<Vec<Rect>> {
    validate_weights(weights)?;
    if weights.is_empty() {
        return Ok(Vec::new());
    }
    if weights.iter().sum::<f64>() <= 0.0 {
        return Err(Error::ZeroTotalWeight);
    }

    let total_area = bounds.area();
    let areas: Vec<f64> = weights.iter().map(|&w| w * total_area).collect();
    Ok(squarify::squarify(&areas, bounds))
}

/// Sort, normalize and lay out labeled items.
///
/// Items are ordered by value descending (ties keep input order) and the
/// returned tiles follow that order.
pub fn layout_items(items: &[WeightedItem], config: &LayoutConfig) -> Result<Vec<Tile>> {
    let values: Vec<f64> = items.iter().map(|item| item.value).collect();
    validate_weights(&values)?;
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let mut sorted: Vec<&WeightedItem> = items.iter().collect();
    sorted.sort_by(|a, b| b.value.total_cmp(&a.value));

    let total: f64 = sorted.iter().map(|item| item.value).sum();
    if total <= 0.0 {
        return Err(Error::ZeroTotalWeight);
    }
    let shares: Vec<f64> = sorted.iter().map(|item| item.value / total).collect();

    tracing::info!(
        "Laying out {} items (total={:.2}) in {:.2}x{:.2}",
        sorted.len(),
        total,
        config.bounds.w,
        config.bounds.h
    );

    let rects = layout_treemap_in(&shares, config.bounds)?;
    Ok(sorted
        .into_iter()
        .zip(shares)
        .zip(rects)
        .map(|((item, share), rect)| Tile {
            label: item.label.clone(),
            value: item.value,
            share,
            rect,
        })
        .collect())
}

fn validate_weights(weights: &[f64]) -> Result<()> {
    match weights
        .iter()
        .position(|w| !w.is_finite() || *w < 0.0)
    {
        Some(index) => Err(Error::InvalidWeight {
            index,
            value: weights[index],
        }),
        None => Ok(()),
    }
}
