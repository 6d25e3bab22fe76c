use super::*;
use crate::assets::decode::RasterImage;
use crate::foundation::core::Rgba8;
use crate::geometry::rings::Border;
use crate::render::pool::HeapPool;

fn pixel(p: &PixelBuffer, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * p.width() + x) * 4) as usize;
    let d = p.data();
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

fn white() -> PixelBuffer {
    raster::upload(&RasterImage::solid(4, 4, [255, 255, 255, 255]), &mut HeapPool).unwrap()
}

fn diamond() -> PathDefinition {
    PathDefinition::from_path_data("M12 0 L24 12 L12 24 L0 12 Z", 24.0, 24.0).unwrap()
}

#[test]
fn absent_path_yields_transparent_canvas() {
    let src = white();
    let borders = Borders::one(Border::new(3, Rgba8::BLACK));
    let out = render(
        Some(&src),
        None,
        CanvasSize::new(16, 8),
        &borders,
        &mut HeapPool,
    )
    .unwrap();
    assert_eq!((out.width(), out.height()), (16, 8));
    assert!(out.data().iter().all(|&v| v == 0));
}

#[test]
fn path_is_fitted_with_aspect_preserved() {
    let src = white();
    let def = diamond();
    let out = render(
        Some(&src),
        Some(&def),
        CanvasSize::new(200, 100),
        &Borders::none(),
        &mut HeapPool,
    )
    .unwrap();
    assert_eq!(pixel(&out, 100, 50), [255, 255, 255, 255]);
    assert_eq!(pixel(&out, 55, 50)[3], 255);
    assert_eq!(pixel(&out, 45, 50)[3], 0);
    assert_eq!(pixel(&out, 145, 50)[3], 255);
    assert_eq!(pixel(&out, 155, 50)[3], 0);
    assert_eq!(pixel(&out, 60, 10)[3], 0);
}

#[test]
fn rings_are_layered_outside_in() {
    let src = white();
    let def = PathDefinition::from_path_data("M0 0 H10 V10 H0 Z", 10.0, 10.0).unwrap();
    let borders = Borders::two(
        Border::new(5, Rgba8::opaque(255, 0, 0)),
        Border::new(5, Rgba8::opaque(0, 0, 255)),
    );
    let out = render(
        Some(&src),
        Some(&def),
        CanvasSize::new(60, 60),
        &borders,
        &mut HeapPool,
    )
    .unwrap();
    assert_eq!(pixel(&out, 2, 30), [255, 0, 0, 255]);
    assert_eq!(pixel(&out, 7, 30), [0, 0, 255, 255]);
    assert_eq!(pixel(&out, 30, 30), [255, 255, 255, 255]);
}

#[test]
fn missing_source_draws_rings_only() {
    let def = diamond();
    let borders = Borders::one(Border::new(4, Rgba8::opaque(0, 255, 0)));
    let out = render(
        None,
        Some(&def),
        CanvasSize::new(48, 48),
        &borders,
        &mut HeapPool,
    )
    .unwrap();
    assert_eq!(pixel(&out, 24, 24), [0, 255, 0, 255]);
}
