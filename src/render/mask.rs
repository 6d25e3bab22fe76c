//! Stencil-mask shapes with rings built from alpha subtraction.
//!
//! The stencil's alpha defines the shape. Ring layers are the stencil scaled to successively
//! smaller boxes; each inner layer is punched out of the layer around it, so a ring is exactly
//! the band between two scaled copies of the stencil.

use crate::foundation::core::{CanvasSize, Rgba8};
use crate::foundation::error::ShapeClipResult;
use crate::geometry::fit;
use crate::geometry::rings::{Borders, RingGeometry};
use crate::render::composite;
use crate::render::pool::{BufferPool, PixelBuffer};
use crate::render::raster;

/// Acquire one buffer per requested size, releasing the ones already taken if any fails.
fn acquire_layers<const N: usize>(
    pool: &mut dyn BufferPool,
    sizes: [Option<CanvasSize>; N],
) -> ShapeClipResult<[Option<PixelBuffer>; N]> {
    let mut out: [Option<PixelBuffer>; N] = std::array::from_fn(|_| None);
    for (slot, size) in out.iter_mut().zip(sizes) {
        let Some(size) = size else { continue };
        match pool.acquire(size.width, size.height) {
            Ok(buf) => *slot = Some(buf),
            Err(e) => {
                release_layers(pool, out);
                return Err(e);
            }
        }
    }
    Ok(out)
}

fn release_layers<const N: usize>(pool: &mut dyn BufferPool, layers: [Option<PixelBuffer>; N]) {
    for buf in layers.into_iter().flatten() {
        pool.release(buf);
    }
}

/// Stencil stretched onto the whole of `layer`.
fn draw_stencil(layer: &mut PixelBuffer, stencil: &PixelBuffer) {
    let size = CanvasSize::new(layer.width(), layer.height());
    if let Some(m) = fit::stretch(stencil.width(), stencil.height(), size.rect()) {
        raster::draw_image(layer, stencil, m);
    }
}

/// Keep `layer`'s coverage and fill it with `source` cover-fitted to the layer.
fn fill_with_source(layer: &mut PixelBuffer, source: &PixelBuffer) {
    let size = CanvasSize::new(layer.width(), layer.height());
    if let Some(m) = fit::cover(source.width(), source.height(), size.rect()) {
        raster::source_in_image(layer, source, m);
    } else {
        layer.data_mut().fill(0);
    }
}

/// Render a stencil-masked image with up to two rings onto a `canvas` sized buffer.
pub(crate) fn render(
    source: Option<&PixelBuffer>,
    stencil: &PixelBuffer,
    canvas: CanvasSize,
    borders: &Borders,
    pool: &mut dyn BufferPool,
) -> ShapeClipResult<PixelBuffer> {
    let insets = RingGeometry::insets(borders);

    let Some(ring1) = borders.first() else {
        let mut out = pool.acquire(canvas.width, canvas.height)?;
        draw_stencil(&mut out, stencil);
        match source {
            Some(src) => fill_with_source(&mut out, src),
            None => out.data_mut().fill(0),
        }
        return Ok(out);
    };

    // Without a source the inner layer only punches out the ring interior.
    let image_size = canvas.shrink(insets.image);
    let shape2_size = borders.second().and(canvas.shrink(insets.ring1_inner));
    let mut shape1 = pool.acquire(canvas.width, canvas.height)?;
    let [mut shape2, mut image] = match acquire_layers(pool, [shape2_size, image_size]) {
        Ok(layers) => layers,
        Err(e) => {
            pool.release(shape1);
            return Err(e);
        }
    };

    draw_stencil(&mut shape1, stencil);
    composite::recolor(&mut shape1, Rgba8::BLACK);

    if let Some(layer) = image.as_mut() {
        draw_stencil(layer, stencil);
        if let Some(src) = source {
            fill_with_source(layer, src);
        }
    }

    let ring1_at = insets.ring1_inner;
    let image_at = insets.image;
    if let Some(layer) = shape2.as_mut() {
        draw_stencil(layer, stencil);
        composite::recolor(layer, Rgba8::BLACK);
        composite::destination_out_at(&mut shape1, layer, ring1_at, ring1_at);
        if let Some(img) = image.as_ref() {
            let d = image_at - ring1_at;
            composite::destination_out_at(layer, img, d, d);
        }
    } else if let Some(img) = image.as_ref() {
        composite::destination_out_at(&mut shape1, img, image_at, image_at);
    }

    composite::recolor(&mut shape1, ring1.effective_color());
    if let (Some(layer), Some(ring2)) = (shape2.as_mut(), borders.second()) {
        composite::recolor(layer, ring2.effective_color());
    }

    if let Some(layer) = shape2.as_ref() {
        composite::over_at(&mut shape1, layer, ring1_at, ring1_at);
    }
    if let (Some(img), Some(_)) = (image.as_ref(), source) {
        composite::over_at(&mut shape1, img, image_at, image_at);
    }

    release_layers(pool, [shape2, image]);
    Ok(shape1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
