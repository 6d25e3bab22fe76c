//! Border rings: normalization of the ring pair and where each ring sits inside the shape.

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ShapeClipError, ShapeClipResult};

fn default_color() -> Rgba8 {
    Rgba8::BLACK
}

fn default_opacity() -> f32 {
    1.0
}

/// One decorative ring: width in pixels, straight-alpha color and an opacity multiplier.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Border {
    /// Ring width in pixels; zero disables the ring.
    pub width: u32,
    /// Ring color (straight alpha).
    #[serde(default = "default_color")]
    pub color: Rgba8,
    /// Multiplier applied to the color alpha, in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

impl Border {
    /// Fully opaque border.
    pub fn new(width: u32, color: Rgba8) -> Self {
        Self {
            width,
            color,
            opacity: 1.0,
        }
    }

    /// Replace the opacity multiplier.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Color with the opacity multiplier folded into alpha.
    pub fn effective_color(&self) -> Rgba8 {
        self.color.with_opacity(self.opacity)
    }

    pub(crate) fn validate(&self) -> ShapeClipResult<()> {
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ShapeClipError::validation(format!(
                "border opacity must be within [0, 1], got {}",
                self.opacity
            )));
        }
        Ok(())
    }
}

impl PartialEq for Border {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.color == other.color
            && self.opacity.to_bits() == other.opacity.to_bits()
    }
}

impl Eq for Border {}

impl std::hash::Hash for Border {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.color.hash(state);
        self.opacity.to_bits().hash(state);
    }
}

/// Up to two rings, outermost first.
///
/// Construction drops zero-width rings and promotes the second ring into the first slot when
/// the first is absent, so `second` is only ever set alongside `first`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "BordersRepr", into = "BordersRepr")]
pub struct Borders {
    first: Option<Border>,
    second: Option<Border>,
}

#[derive(Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
struct BordersRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first: Option<Border>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    second: Option<Border>,
}

impl From<BordersRepr> for Borders {
    fn from(r: BordersRepr) -> Self {
        Self::new(r.first, r.second)
    }
}

impl From<Borders> for BordersRepr {
    fn from(b: Borders) -> Self {
        Self {
            first: b.first,
            second: b.second,
        }
    }
}

impl Borders {
    /// Normalize a ring pair.
    pub fn new(first: Option<Border>, second: Option<Border>) -> Self {
        let first = first.filter(|b| b.width > 0);
        let second = second.filter(|b| b.width > 0);
        match (first, second) {
            (None, second) => Self {
                first: second,
                second: None,
            },
            (first, second) => Self { first, second },
        }
    }

    /// No rings.
    pub fn none() -> Self {
        Self::default()
    }

    /// A single ring.
    pub fn one(border: Border) -> Self {
        Self::new(Some(border), None)
    }

    /// Two rings, outermost first.
    pub fn two(first: Border, second: Border) -> Self {
        Self::new(Some(first), Some(second))
    }

    /// Outer ring, if any.
    pub fn first(&self) -> Option<&Border> {
        self.first.as_ref()
    }

    /// Inner ring, if any.
    pub fn second(&self) -> Option<&Border> {
        self.second.as_ref()
    }

    /// Outer ring width (0 when absent).
    pub fn first_width(&self) -> u32 {
        self.first.map_or(0, |b| b.width)
    }

    /// Inner ring width (0 when absent).
    pub fn second_width(&self) -> u32 {
        self.second.map_or(0, |b| b.width)
    }

    /// Sum of both ring widths.
    pub fn total_width(&self) -> u32 {
        self.first_width().saturating_add(self.second_width())
    }

    /// Whether any ring is present.
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Ring strokes in painting order (outer first), centered on each ring band.
    pub fn strokes(&self) -> Vec<RingStroke> {
        let mut out = Vec::with_capacity(2);
        let mut inset = 0.0;
        for border in [self.first, self.second].into_iter().flatten() {
            let width = f64::from(border.width);
            out.push(RingStroke {
                inset: inset + width / 2.0,
                width,
                color: border.effective_color(),
            });
            inset += width;
        }
        out
    }

    pub(crate) fn validate(&self) -> ShapeClipResult<()> {
        for b in [self.first, self.second].iter().flatten() {
            b.validate()?;
        }
        Ok(())
    }
}

/// A ring expressed as a centered stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingStroke {
    /// Distance from the outer shape boundary to the stroke center line.
    pub inset: f64,
    /// Stroke width.
    pub width: f64,
    /// Effective stroke color.
    pub color: Rgba8,
}

/// Concentric boundaries of a shape with rings, as extents measured from the shape center.
///
/// For circles the extents are radii. Every field is clamped at zero and they never increase
/// from `outer` to `image`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingGeometry {
    /// Outer shape boundary.
    pub outer: f64,
    /// Inner edge of the first ring.
    pub ring1_inner: f64,
    /// Inner edge of the second ring.
    pub ring2_inner: f64,
    /// Image boundary.
    pub image: f64,
}

impl RingGeometry {
    /// Boundaries of a circle of radius `radius`.
    pub fn for_circle(radius: f64, borders: &Borders) -> Self {
        let outer = radius.max(0.0);
        let ring1_inner = (outer - f64::from(borders.first_width())).max(0.0);
        let ring2_inner = (ring1_inner - f64::from(borders.second_width())).max(0.0);
        Self {
            outer,
            ring1_inner,
            ring2_inner,
            image: ring2_inner,
        }
    }

    /// Boundaries as insets from the outer edge; `outer` is always 0 and values grow inward.
    pub fn insets(borders: &Borders) -> RingInsets {
        let ring1_inner = borders.first_width();
        let ring2_inner = ring1_inner.saturating_add(borders.second_width());
        RingInsets {
            outer: 0,
            ring1_inner,
            ring2_inner,
            image: ring2_inner,
        }
    }
}

/// Ring boundaries as pixel insets from the canvas edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingInsets {
    /// Outer boundary inset (always 0).
    pub outer: u32,
    /// Inner edge of the first ring.
    pub ring1_inner: u32,
    /// Inner edge of the second ring.
    pub ring2_inner: u32,
    /// Image boundary inset.
    pub image: u32,
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/rings.rs"]
mod tests;
