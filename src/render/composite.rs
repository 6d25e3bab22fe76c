//! Premultiplied RGBA8 alpha operations used to layer masks and rings.
//!
//! Layers are placed at a non-negative pixel offset inside the destination; pixels falling
//! outside the destination are ignored.

use crate::foundation::core::Rgba8;
use crate::foundation::math::mul_div255_u8;
use crate::render::pool::PixelBuffer;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Porter-Duff destination-out: keep `dst` where `src` is transparent.
pub fn destination_out(dst: PremulRgba8, src_alpha: u8) -> PremulRgba8 {
    let keep = 255u16 - u16::from(src_alpha);
    dst.map(|c| mul_div255_u8(u16::from(c), keep))
}

/// Porter-Duff source-in of a solid color over a destination alpha.
pub fn source_in(color: PremulRgba8, dst_alpha: u8) -> PremulRgba8 {
    color.map(|c| mul_div255_u8(u16::from(c), u16::from(dst_alpha)))
}

/// Straight-alpha color to premultiplied form.
pub fn premultiply(c: Rgba8) -> PremulRgba8 {
    let a = u16::from(c.a);
    [
        mul_div255_u8(u16::from(c.r), a),
        mul_div255_u8(u16::from(c.g), a),
        mul_div255_u8(u16::from(c.b), a),
        c.a,
    ]
}

/// Recolor every pixel of `layer` with `color`, keeping its alpha as coverage.
///
/// A fully transparent color clears the layer.
pub fn recolor(layer: &mut PixelBuffer, color: Rgba8) {
    if color.is_transparent() {
        layer.data_mut().fill(0);
        return;
    }
    let p = premultiply(color);
    for px in layer.data_mut().chunks_exact_mut(4) {
        let out = source_in(p, px[3]);
        px.copy_from_slice(&out);
    }
}

/// Punch `src`'s alpha out of `dst`, with `src` placed at `(dx, dy)`.
pub fn destination_out_at(dst: &mut PixelBuffer, src: &PixelBuffer, dx: u32, dy: u32) {
    for_each_overlap(dst, src, dx, dy, |d, s| {
        let out = destination_out([d[0], d[1], d[2], d[3]], s[3]);
        d.copy_from_slice(&out);
    });
}

/// Composite `src` over `dst`, with `src` placed at `(dx, dy)`.
pub fn over_at(dst: &mut PixelBuffer, src: &PixelBuffer, dx: u32, dy: u32) {
    for_each_overlap(dst, src, dx, dy, |d, s| {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    });
}

fn for_each_overlap(
    dst: &mut PixelBuffer,
    src: &PixelBuffer,
    dx: u32,
    dy: u32,
    mut f: impl FnMut(&mut [u8], &[u8]),
) {
    let (dw, dh) = (dst.width(), dst.height());
    if dx >= dw || dy >= dh {
        return;
    }
    let cols = src.width().min(dw - dx) as usize;
    let rows = src.height().min(dh - dy) as usize;
    let dst_stride = dw as usize * 4;
    let src_stride = src.width() as usize * 4;
    let src_data = src.data();
    let dst_data = dst.data_mut();

    for row in 0..rows {
        let d0 = (dy as usize + row) * dst_stride + dx as usize * 4;
        let s0 = row * src_stride;
        let d_row = &mut dst_data[d0..d0 + cols * 4];
        let s_row = &src_data[s0..s0 + cols * 4];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            f(d, s);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
