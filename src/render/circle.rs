use kurbo::{Circle, Shape};

use crate::foundation::core::{CanvasSize, Point};
use crate::foundation::error::ShapeClipResult;
use crate::geometry::fit;
use crate::geometry::rings::{Borders, RingGeometry};
use crate::render::pool::{BufferPool, PixelBuffer};
use crate::render::raster;

const TOLERANCE: f64 = 0.05;

/// Render a circle on a `min(width, height)` square canvas.
///
/// The source is cover-fitted into the square inset by the total ring width and clipped to the
/// image circle; rings are stroked outside it, outermost first.
pub(crate) fn render(
    source: Option<&PixelBuffer>,
    canvas: CanvasSize,
    borders: &Borders,
    pool: &mut dyn BufferPool,
) -> ShapeClipResult<PixelBuffer> {
    let size = canvas.min_side();
    let mut out = pool.acquire(size, size)?;
    let outer = f64::from(size) / 2.0;
    let center = Point::new(outer, outer);
    let geometry = RingGeometry::for_circle(outer, borders);

    if let Some(src) = source
        && geometry.image > 0.0
    {
        let square = CanvasSize::new(size, size);
        let image_box = square.inset_rect(f64::from(borders.total_width()));
        if let Some(cover) = fit::cover(src.width(), src.height(), image_box) {
            let clip = Circle::new(center, geometry.image).to_path(TOLERANCE);
            raster::fill_path_image(&mut out, &clip, src, cover, kurbo::Affine::IDENTITY);
        }
    }

    for stroke in borders.strokes() {
        let radius = outer - stroke.inset;
        if radius <= 0.0 {
            continue;
        }
        let ring = Circle::new(center, radius).to_path(TOLERANCE);
        raster::stroke_path(&mut out, &ring, stroke.width, stroke.color);
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/circle.rs"]
mod tests;
