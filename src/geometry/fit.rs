//! Mapping of path units and source pixels into destination boxes.

use crate::foundation::core::{Affine, Rect, Vec2};

/// Uniform scale plus translation placing path units inside a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathFit {
    /// Uniform scale factor.
    pub scale: f64,
    /// Translation applied after scaling.
    pub offset: Vec2,
}

impl PathFit {
    /// Largest uniform scale that fits a `path_width x path_height` outline inside `bounds`,
    /// centered on both axes. `None` for empty inputs.
    pub fn contain(path_width: f64, path_height: f64, bounds: Rect) -> Option<Self> {
        if !(path_width > 0.0 && path_height > 0.0) || bounds.is_zero_area() || !positive(bounds)
        {
            return None;
        }
        let scale = (bounds.width() / path_width).min(bounds.height() / path_height);
        let offset = Vec2::new(
            bounds.x0 + (bounds.width() - path_width * scale) / 2.0,
            bounds.y0 + (bounds.height() - path_height * scale) / 2.0,
        );
        Some(Self { scale, offset })
    }

    /// The fit as an affine transform.
    pub fn affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }
}

/// Center-crop mapping: uniform scale so a `src_width x src_height` image covers `bounds`.
pub fn cover(src_width: u32, src_height: u32, bounds: Rect) -> Option<Affine> {
    if src_width == 0 || src_height == 0 || !positive(bounds) {
        return None;
    }
    let (sw, sh) = (f64::from(src_width), f64::from(src_height));
    let scale = (bounds.width() / sw).max(bounds.height() / sh);
    let offset = Vec2::new(
        bounds.x0 + (bounds.width() - sw * scale) / 2.0,
        bounds.y0 + (bounds.height() - sh * scale) / 2.0,
    );
    Some(Affine::translate(offset) * Affine::scale(scale))
}

/// Non-uniform mapping of a `src_width x src_height` image onto exactly `bounds`.
pub fn stretch(src_width: u32, src_height: u32, bounds: Rect) -> Option<Affine> {
    if src_width == 0 || src_height == 0 || !positive(bounds) {
        return None;
    }
    let sx = bounds.width() / f64::from(src_width);
    let sy = bounds.height() / f64::from(src_height);
    Some(Affine::translate(Vec2::new(bounds.x0, bounds.y0)) * Affine::scale_non_uniform(sx, sy))
}

fn positive(r: Rect) -> bool {
    r.x1 > r.x0 && r.y1 > r.y0
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
