use super::*;
use crate::foundation::core::Rect;
use crate::render::pool::HeapPool;

fn alpha(p: &PixelBuffer, x: u32, y: u32) -> u8 {
    p.data()[((y * p.width() + x) * 4 + 3) as usize]
}

#[test]
fn upload_premultiplies() {
    let img = RasterImage::solid(2, 2, [255, 0, 0, 128]);
    let buf = upload(&img, &mut HeapPool).unwrap();
    assert_eq!(&buf.data()[..4], &[128, 0, 0, 128]);
    assert_eq!(to_rgba_image(&buf).get_pixel(1, 1).0, [255, 0, 0, 128]);
}

#[test]
fn transparent_fill_clears() {
    let mut buf = HeapPool.acquire(10, 10).unwrap();
    let square = kurbo::Shape::to_path(&Rect::new(0.0, 0.0, 10.0, 10.0), 0.1);
    fill_path_solid(&mut buf, &square, Rgba8::opaque(0, 255, 0));
    assert_eq!(alpha(&buf, 5, 5), 255);

    let half = kurbo::Shape::to_path(&Rect::new(0.0, 0.0, 5.0, 10.0), 0.1);
    fill_path_solid(&mut buf, &half, Rgba8::TRANSPARENT);
    assert_eq!(alpha(&buf, 2, 5), 0);
    assert_eq!(alpha(&buf, 7, 5), 255);
}

#[test]
fn stroke_is_centered_on_path() {
    let mut buf = HeapPool.acquire(20, 20).unwrap();
    let square = kurbo::Shape::to_path(&Rect::new(2.0, 2.0, 18.0, 18.0), 0.1);
    stroke_path(&mut buf, &square, 4.0, Rgba8::BLACK);
    assert_eq!(alpha(&buf, 10, 0), 255);
    assert_eq!(alpha(&buf, 10, 3), 255);
    assert_eq!(alpha(&buf, 10, 10), 0);
}

#[test]
fn source_in_keeps_destination_alpha() {
    let mut pool = HeapPool;
    let src = upload(&RasterImage::solid(4, 4, [0, 0, 255, 255]), &mut pool).unwrap();
    let mut dst = pool.acquire(4, 4).unwrap();
    dst.data_mut()[..4].copy_from_slice(&[0, 0, 0, 255]);
    source_in_image(&mut dst, &src, Affine::IDENTITY);
    assert_eq!(&dst.data()[..4], &[0, 0, 255, 255]);
    assert_eq!(alpha(&dst, 3, 3), 0);
}

#[test]
fn draw_image_scales() {
    let mut pool = HeapPool;
    let src = upload(&RasterImage::solid(2, 2, [0, 0, 0, 255]), &mut pool).unwrap();
    let mut dst = pool.acquire(8, 8).unwrap();
    draw_image(&mut dst, &src, Affine::scale(2.0));
    assert_eq!(alpha(&dst, 2, 2), 255);
    assert_eq!(alpha(&dst, 6, 6), 0);
}
