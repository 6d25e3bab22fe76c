use crate::assets::path::PathDefinition;
use crate::foundation::core::{Affine, CanvasSize};
use crate::foundation::error::ShapeClipResult;
use crate::geometry::fit::{self, PathFit};
use crate::geometry::rings::Borders;
use crate::render::pool::{BufferPool, PixelBuffer};
use crate::render::raster;

/// Render a vector-path shape filling the canvas.
///
/// Rings are the path fitted to the full canvas and to the canvas inset by the first ring
/// width, filled back to front; the image is the path fitted to the box inset by the total ring
/// width. Without a path the canvas stays transparent.
pub(crate) fn render(
    source: Option<&PixelBuffer>,
    path: Option<&PathDefinition>,
    canvas: CanvasSize,
    borders: &Borders,
    pool: &mut dyn BufferPool,
) -> ShapeClipResult<PixelBuffer> {
    let mut out = pool.acquire(canvas.width, canvas.height)?;
    let Some(def) = path else {
        return Ok(out);
    };
    let fit_to = |inset: u32| {
        PathFit::contain(
            def.width(),
            def.height(),
            canvas.inset_rect(f64::from(inset)),
        )
    };

    let mut inset = 0;
    for ring in [borders.first(), borders.second()].into_iter().flatten() {
        if let Some(f) = fit_to(inset) {
            let outline = def.transformed(f.affine());
            raster::fill_path_solid(&mut out, &outline, ring.effective_color());
        }
        inset += ring.width;
    }

    let total = borders.total_width();
    let image_box = canvas.inset_rect(f64::from(total));
    if let Some(src) = source
        && let Some(f) = fit_to(total)
        && let Some(m) = fit::cover(src.width(), src.height(), image_box)
    {
        let image_path = def.transformed(m.inverse() * f.affine());
        raster::fill_path_image(&mut out, &image_path, src, Affine::IDENTITY, m);
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/vector.rs"]
mod tests;
