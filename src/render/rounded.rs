use crate::foundation::core::{Affine, CanvasSize};
use crate::foundation::error::ShapeClipResult;
use crate::geometry::corners::{self, CornerType};
use crate::geometry::fit;
use crate::geometry::rings::Borders;
use crate::render::pool::{BufferPool, PixelBuffer};
use crate::render::raster;

/// Render a rounded rectangle filling the canvas.
///
/// The image area is the union of the corner-type primitives at inset `total`; each ring is a
/// centered stroke along a corner outline concentric with the image boundary.
pub(crate) fn render(
    source: Option<&PixelBuffer>,
    canvas: CanvasSize,
    radius: u32,
    corner_type: CornerType,
    borders: &Borders,
    pool: &mut dyn BufferPool,
) -> ShapeClipResult<PixelBuffer> {
    let mut out = pool.acquire(canvas.width, canvas.height)?;
    let total = f64::from(borders.total_width());
    let r = f64::from(radius);

    if let Some(src) = source
        && canvas.shrink(borders.total_width()).is_some()
        && let Some(cover) = fit::cover(src.width(), src.height(), canvas.inset_rect(total))
    {
        let primitives = corners::decompose(
            f64::from(canvas.width),
            f64::from(canvas.height),
            r,
            corner_type,
            total,
        );
        let clip = corners::union_path(&primitives);
        raster::fill_path_image(&mut out, &clip, src, cover, Affine::IDENTITY);
    }

    let rounded = corner_type.rounded_corners();
    for stroke in borders.strokes() {
        let rect = canvas.inset_rect(stroke.inset);
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            continue;
        }
        let ring_radius = if radius == 0 {
            0.0
        } else {
            (r + total - stroke.inset).max(0.0)
        };
        let outline = corners::corner_outline(rect, ring_radius, rounded);
        raster::stroke_path(&mut out, &outline, stroke.width, stroke.color);
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/rounded.rs"]
mod tests;
