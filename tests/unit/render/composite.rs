use super::*;
use resvg::tiny_skia;

fn solid(w: u32, h: u32, px: [u8; 4]) -> PixelBuffer {
    let mut p = tiny_skia::Pixmap::new(w, h).unwrap();
    for c in p.data_mut().chunks_exact_mut(4) {
        c.copy_from_slice(&px);
    }
    p
}

fn pixel(p: &PixelBuffer, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * p.width() + x) * 4) as usize;
    let d = p.data();
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

#[test]
fn over_handles_extremes() {
    assert_eq!(over([1, 2, 3, 4], [0, 0, 0, 0]), [1, 2, 3, 4]);
    assert_eq!(over([1, 2, 3, 4], [9, 9, 9, 255]), [9, 9, 9, 255]);
    assert_eq!(over([0, 0, 255, 255], [128, 0, 0, 128]), [128, 0, 127, 255]);
}

#[test]
fn destination_out_scales_by_inverse_alpha() {
    assert_eq!(destination_out([200, 100, 50, 255], 255), [0, 0, 0, 0]);
    assert_eq!(destination_out([200, 100, 50, 255], 0), [200, 100, 50, 255]);
}

#[test]
fn recolor_keeps_coverage() {
    let mut layer = solid(2, 1, [0, 0, 0, 255]);
    layer.data_mut()[4..8].copy_from_slice(&[0, 0, 0, 128]);
    recolor(&mut layer, Rgba8::opaque(255, 0, 0));
    assert_eq!(pixel(&layer, 0, 0), [255, 0, 0, 255]);
    assert_eq!(pixel(&layer, 1, 0), [128, 0, 0, 128]);

    recolor(&mut layer, Rgba8::TRANSPARENT);
    assert!(layer.data().iter().all(|&v| v == 0));
}

#[test]
fn offset_ops_clip_to_destination() {
    let mut dst = solid(4, 4, [0, 0, 0, 255]);
    let hole = solid(4, 4, [0, 0, 0, 255]);
    destination_out_at(&mut dst, &hole, 2, 1);
    assert_eq!(pixel(&dst, 1, 1), [0, 0, 0, 255]);
    assert_eq!(pixel(&dst, 2, 1), [0, 0, 0, 0]);
    assert_eq!(pixel(&dst, 3, 3), [0, 0, 0, 0]);
    assert_eq!(pixel(&dst, 3, 0), [0, 0, 0, 255]);

    let red = solid(1, 1, [255, 0, 0, 255]);
    over_at(&mut dst, &red, 0, 0);
    assert_eq!(pixel(&dst, 0, 0), [255, 0, 0, 255]);
    over_at(&mut dst, &red, 9, 9);
}

#[test]
fn premultiply_rounds() {
    assert_eq!(premultiply(Rgba8::new(255, 128, 0, 128)), [128, 64, 0, 128]);
}
