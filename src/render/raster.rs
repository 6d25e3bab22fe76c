//! Bridge from kurbo geometry and decoded images to tiny-skia drawing calls.

use resvg::tiny_skia;

use crate::assets::decode::RasterImage;
use crate::foundation::core::{Affine, BezPath, Rgba8};
use crate::foundation::error::ShapeClipResult;
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::render::pool::{BufferPool, PixelBuffer};

pub(crate) fn skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    use kurbo::PathEl;

    let p = |pt: kurbo::Point| (pt.x as f32, pt.y as f32);
    let mut pb = tiny_skia::PathBuilder::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(a) => {
                let (x, y) = p(a);
                pb.move_to(x, y);
            }
            PathEl::LineTo(a) => {
                let (x, y) = p(a);
                pb.line_to(x, y);
            }
            PathEl::QuadTo(a, b) => {
                let ((x1, y1), (x, y)) = (p(a), p(b));
                pb.quad_to(x1, y1, x, y);
            }
            PathEl::CurveTo(a, b, c) => {
                let ((x1, y1), (x2, y2), (x, y)) = (p(a), p(b), p(c));
                pb.cubic_to(x1, y1, x2, y2, x, y);
            }
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

pub(crate) fn skia_transform(a: Affine) -> tiny_skia::Transform {
    let [sx, ky, kx, sy, tx, ty] = a.as_coeffs();
    tiny_skia::Transform::from_row(
        sx as f32, ky as f32, kx as f32, sy as f32, tx as f32, ty as f32,
    )
}

fn solid_paint(color: Rgba8) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint {
        anti_alias: true,
        ..Default::default()
    };
    if color.is_transparent() {
        paint.blend_mode = tiny_skia::BlendMode::Clear;
    } else {
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    }
    paint
}

fn image_paint(image: &PixelBuffer, image_transform: Affine) -> tiny_skia::Paint<'_> {
    tiny_skia::Paint {
        shader: tiny_skia::Pattern::new(
            image.as_ref(),
            tiny_skia::SpreadMode::Pad,
            tiny_skia::FilterQuality::Bilinear,
            1.0,
            skia_transform(image_transform),
        ),
        anti_alias: true,
        ..Default::default()
    }
}

/// Copy a decoded image into a pool buffer as premultiplied pixels.
pub(crate) fn upload(image: &RasterImage, pool: &mut dyn BufferPool) -> ShapeClipResult<PixelBuffer> {
    let mut buf = pool.acquire(image.width(), image.height())?;
    let data = buf.data_mut();
    data.copy_from_slice(image.pixels().as_raw());
    premultiply_rgba8_in_place(data);
    Ok(buf)
}

/// Fill `path` with a solid color; a transparent color clears the covered pixels.
pub(crate) fn fill_path_solid(dst: &mut PixelBuffer, path: &BezPath, color: Rgba8) {
    if let Some(p) = skia_path(path) {
        dst.fill_path(
            &p,
            &solid_paint(color),
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );
    }
}

/// Stroke `path` centered with `width`; a transparent color clears the covered pixels.
pub(crate) fn stroke_path(dst: &mut PixelBuffer, path: &BezPath, width: f64, color: Rgba8) {
    if width <= 0.0 {
        return;
    }
    if let Some(p) = skia_path(path) {
        let stroke = tiny_skia::Stroke {
            width: width as f32,
            ..Default::default()
        };
        dst.stroke_path(
            &p,
            &solid_paint(color),
            &stroke,
            tiny_skia::Transform::identity(),
            None,
        );
    }
}

/// Fill `path` (in user space) with `image` mapped by `image_transform`, then map everything
/// through `transform`.
pub(crate) fn fill_path_image(
    dst: &mut PixelBuffer,
    path: &BezPath,
    image: &PixelBuffer,
    image_transform: Affine,
    transform: Affine,
) {
    if let Some(p) = skia_path(path) {
        dst.fill_path(
            &p,
            &image_paint(image, image_transform),
            tiny_skia::FillRule::Winding,
            skia_transform(transform),
            None,
        );
    }
}

/// Draw `image` mapped by `transform` over `dst`.
pub(crate) fn draw_image(dst: &mut PixelBuffer, image: &PixelBuffer, transform: Affine) {
    let paint = tiny_skia::PixmapPaint {
        quality: tiny_skia::FilterQuality::Bilinear,
        ..Default::default()
    };
    dst.draw_pixmap(0, 0, image.as_ref(), &paint, skia_transform(transform), None);
}

/// Replace the color of `dst` with `image` mapped by `image_transform`, keeping `dst`'s alpha.
pub(crate) fn source_in_image(dst: &mut PixelBuffer, image: &PixelBuffer, image_transform: Affine) {
    let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, dst.width() as f32, dst.height() as f32)
    else {
        return;
    };
    let mut paint = image_paint(image, image_transform);
    paint.blend_mode = tiny_skia::BlendMode::SourceIn;
    paint.anti_alias = false;
    dst.fill_rect(rect, &paint, tiny_skia::Transform::identity(), None);
}

/// Convert a premultiplied buffer to a straight-alpha RGBA image.
pub fn to_rgba_image(buffer: &PixelBuffer) -> image::RgbaImage {
    let mut rgba = buffer.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);
    image::RgbaImage::from_raw(buffer.width(), buffer.height(), rgba)
        .unwrap_or_else(|| image::RgbaImage::new(buffer.width(), buffer.height()))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
