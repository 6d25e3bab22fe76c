use super::*;
use crate::assets::decode::RasterImage;
use crate::geometry::rings::Border;
use crate::render::pool::HeapPool;

#[derive(Default)]
struct CountingPool {
    acquired: usize,
    released: usize,
    fail_after: Option<usize>,
}

impl BufferPool for CountingPool {
    fn acquire(&mut self, width: u32, height: u32) -> ShapeClipResult<PixelBuffer> {
        if self.fail_after.is_some_and(|n| self.acquired >= n) {
            return Err(crate::ShapeClipError::out_of_memory(width, height));
        }
        self.acquired += 1;
        HeapPool.acquire(width, height)
    }

    fn release(&mut self, _buffer: PixelBuffer) {
        self.released += 1;
    }
}

fn pixel(p: &PixelBuffer, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * p.width() + x) * 4) as usize;
    let d = p.data();
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

fn upload(img: RasterImage) -> PixelBuffer {
    raster::upload(&img, &mut HeapPool).unwrap()
}

const RED: Rgba8 = Rgba8::opaque(255, 0, 0);
const BLUE: Rgba8 = Rgba8::opaque(0, 0, 255);

#[test]
fn two_rings_nest_inside_the_stencil() {
    let stencil = upload(RasterImage::solid(10, 10, [0, 0, 0, 255]));
    let source = upload(RasterImage::solid(7, 5, [255, 255, 255, 255]));
    let borders = Borders::two(Border::new(4, RED), Border::new(2, BLUE));
    let mut pool = CountingPool::default();
    let out = render(
        Some(&source),
        &stencil,
        CanvasSize::new(40, 40),
        &borders,
        &mut pool,
    )
    .unwrap();

    assert_eq!(pixel(&out, 1, 20), [255, 0, 0, 255]);
    assert_eq!(pixel(&out, 20, 38), [255, 0, 0, 255]);
    assert_eq!(pixel(&out, 5, 20), [0, 0, 255, 255]);
    assert_eq!(pixel(&out, 20, 20), [255, 255, 255, 255]);
    assert_eq!(pool.acquired, pool.released + 1);
}

#[test]
fn stencil_transparency_is_preserved() {
    let mut half = image::RgbaImage::new(2, 1);
    half.put_pixel(0, 0, image::Rgba([0, 0, 0, 255]));
    let stencil = upload(RasterImage::new(half, true));
    let source = upload(RasterImage::solid(4, 4, [0, 255, 0, 255]));
    let borders = Borders::one(Border::new(2, RED));
    let out = render(
        Some(&source),
        &stencil,
        CanvasSize::new(40, 20),
        &borders,
        &mut HeapPool,
    )
    .unwrap();

    assert_eq!(pixel(&out, 35, 10)[3], 0);
    assert_eq!(pixel(&out, 0, 10), [255, 0, 0, 255]);
    assert_eq!(pixel(&out, 5, 10), [0, 255, 0, 255]);
}

#[test]
fn no_rings_is_stencil_times_source() {
    let stencil = upload(RasterImage::solid(3, 3, [0, 0, 0, 255]));
    let source = upload(RasterImage::solid(3, 3, [10, 20, 30, 255]));
    let out = render(
        Some(&source),
        &stencil,
        CanvasSize::new(12, 12),
        &Borders::none(),
        &mut HeapPool,
    )
    .unwrap();
    assert!(out.data().chunks_exact(4).all(|p| p == [10, 20, 30, 255]));
}

#[test]
fn transparent_ring_color_clears_the_band() {
    let stencil = upload(RasterImage::solid(10, 10, [0, 0, 0, 255]));
    let source = upload(RasterImage::solid(4, 4, [255, 255, 255, 255]));
    let borders = Borders::two(Border::new(3, Rgba8::TRANSPARENT), Border::new(3, BLUE));
    let out = render(
        Some(&source),
        &stencil,
        CanvasSize::new(30, 30),
        &borders,
        &mut HeapPool,
    )
    .unwrap();
    assert_eq!(pixel(&out, 1, 15)[3], 0);
    assert_eq!(pixel(&out, 4, 15), [0, 0, 255, 255]);
    assert_eq!(pixel(&out, 15, 15), [255, 255, 255, 255]);
}

#[test]
fn rings_too_wide_for_canvas_skip_the_image() {
    let stencil = upload(RasterImage::solid(4, 4, [0, 0, 0, 255]));
    let source = upload(RasterImage::solid(4, 4, [255, 255, 255, 255]));
    let borders = Borders::two(Border::new(3, RED), Border::new(3, BLUE));
    let mut pool = CountingPool::default();
    let out = render(
        Some(&source),
        &stencil,
        CanvasSize::new(10, 10),
        &borders,
        &mut pool,
    )
    .unwrap();
    assert_eq!(pixel(&out, 5, 5), [0, 0, 255, 255]);
    assert_eq!(pixel(&out, 0, 5), [255, 0, 0, 255]);
    assert_eq!(pool.acquired, 2);
    assert_eq!(pool.released, 1);
}

#[test]
fn allocation_failure_returns_held_buffers() {
    let stencil = upload(RasterImage::solid(4, 4, [0, 0, 0, 255]));
    let source = upload(RasterImage::solid(4, 4, [255, 255, 255, 255]));
    let borders = Borders::two(Border::new(2, RED), Border::new(2, BLUE));
    let mut pool = CountingPool {
        fail_after: Some(2),
        ..Default::default()
    };
    let err = render(
        Some(&source),
        &stencil,
        CanvasSize::new(20, 20),
        &borders,
        &mut pool,
    )
    .unwrap_err();
    assert!(matches!(err, crate::ShapeClipError::OutOfMemory { .. }));
    assert_eq!(pool.acquired, pool.released);
}

#[test]
fn empty_source_leaves_interior_transparent() {
    let stencil = upload(RasterImage::solid(10, 10, [0, 0, 0, 255]));
    let mut pool = CountingPool::default();
    let out = render(
        None,
        &stencil,
        CanvasSize::new(40, 40),
        &Borders::one(Border::new(4, BLUE)),
        &mut pool,
    )
    .unwrap();
    assert_eq!(pixel(&out, 1, 20), [0, 0, 255, 255]);
    assert_eq!(pixel(&out, 20, 20), [0, 0, 0, 0]);
    assert_eq!(pool.acquired, pool.released + 1);
}

#[test]
fn empty_source_with_two_rings_keeps_both_bands() {
    let stencil = upload(RasterImage::solid(10, 10, [0, 0, 0, 255]));
    let borders = Borders::two(Border::new(4, RED), Border::new(2, BLUE));
    let out = render(
        None,
        &stencil,
        CanvasSize::new(40, 40),
        &borders,
        &mut HeapPool,
    )
    .unwrap();
    assert_eq!(pixel(&out, 1, 20), [255, 0, 0, 255]);
    assert_eq!(pixel(&out, 5, 20), [0, 0, 255, 255]);
    assert_eq!(pixel(&out, 20, 20), [0, 0, 0, 0]);
}
